//! Pre-defined currencies.

use crate::currency::Currency;

/// U.S. Dollar.
pub static USD: Currency = Currency::new("U.S. Dollar", "USD", 840, "$", 2);

/// Euro.
pub static EUR: Currency = Currency::new("Euro", "EUR", 978, "€", 2);

/// British Pound Sterling.
pub static GBP: Currency = Currency::new("British Pound Sterling", "GBP", 826, "£", 2);

/// Japanese Yen.
pub static JPY: Currency = Currency::new("Japanese Yen", "JPY", 392, "¥", 0);

/// Swiss Franc.
pub static CHF: Currency = Currency::new("Swiss Franc", "CHF", 756, "Fr", 2);

/// Australian Dollar.
pub static AUD: Currency = Currency::new("Australian Dollar", "AUD", 36, "A$", 2);

/// Canadian Dollar.
pub static CAD: Currency = Currency::new("Canadian Dollar", "CAD", 124, "CA$", 2);

pub(crate) static ALL: [&Currency; 7] = [&USD, &EUR, &GBP, &JPY, &CHF, &AUD, &CAD];
