//! `Index`: conventions shared by Ibor and overnight indexes.

use ir_core::errors::{Error, Result};
use ir_currencies::Currency;
use ir_time::DayCounter;

/// Base trait for rate indexes.
pub trait Index: std::fmt::Debug + Send + Sync {
    /// Unique name (e.g. `"EURIBOR-6M"`).
    fn name(&self) -> &str;

    /// Natural currency of the index.
    fn currency(&self) -> &'static Currency;

    /// Day counter used to accrue the index rate.
    fn day_counter(&self) -> &dyn DayCounter;

    /// Fail with [`Error::CurrencyMismatch`] unless `currency` is the index
    /// currency.
    fn check_currency(&self, currency: &Currency) -> Result<()> {
        if self.currency() != currency {
            return Err(Error::CurrencyMismatch {
                expected: self.currency().code.to_string(),
                found: currency.code.to_string(),
            });
        }
        Ok(())
    }
}
