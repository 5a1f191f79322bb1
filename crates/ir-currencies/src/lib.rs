//! # ir-currencies
//!
//! ISO 4217 currency definitions. Currencies are `'static` values compared
//! by reference or by code; coupons carry a `&'static Currency`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `Currency` type and code lookup.
pub mod currency;

/// Pre-defined currencies.
pub mod currencies;

pub use currencies::{AUD, CAD, CHF, EUR, GBP, JPY, USD};
pub use currency::Currency;
