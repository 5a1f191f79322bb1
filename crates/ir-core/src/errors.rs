//! Error types for irkit.
//!
//! A single `thiserror`-derived enum covers both the generic failures of the
//! date and convention layer and the domain errors raised while building
//! coupons and resolving fixings:
//!
//! * construction validation: [`Error::CurrencyMismatch`],
//!   [`Error::LengthMismatch`], [`Error::InvalidAccrualFactor`],
//!   [`Error::MissingField`] and failed [`ensure!`] checks;
//! * [`Error::MissingFixing`] when a fixing that must be known is absent;
//! * [`Error::PastPaymentDate`] when a coupon is converted after it paid.

use thiserror::Error;

/// The top-level error type used throughout irkit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Date-related error.
    #[error("date error: {0}")]
    Date(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A coupon currency differs from the natural currency of its index.
    #[error("currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Currency required by the index.
        expected: String,
        /// Currency supplied for the coupon.
        found: String,
    },

    /// Two parallel per-observation arrays have different lengths.
    #[error("length mismatch: {first} has {first_len} elements but {second} has {second_len}")]
    LengthMismatch {
        /// Name of the first array.
        first: &'static str,
        /// Length of the first array.
        first_len: usize,
        /// Name of the second array.
        second: &'static str,
        /// Length of the second array.
        second_len: usize,
    },

    /// A compounding sub-period has a negative accrual factor.
    #[error("invalid accrual factor {factor} for sub-period {index}")]
    InvalidAccrualFactor {
        /// Position of the offending sub-period.
        index: usize,
        /// The negative factor.
        factor: f64,
    },

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A fixing strictly before the valuation date is not in the series.
    #[error("missing fixing for {index} on {date}")]
    MissingFixing {
        /// Index (or FX pair) name.
        index: String,
        /// Fixing date.
        date: String,
    },

    /// Conversion requested with a valuation date after the payment date.
    #[error("valuation date {valuation} is after payment date {payment}")]
    PastPaymentDate {
        /// Requested valuation date.
        valuation: String,
        /// Coupon payment date.
        payment: String,
    },
}

impl Error {
    /// `true` for errors raised while validating a coupon at construction.
    ///
    /// `Precondition` counts: every `ensure!` on coupon inputs (ordering of
    /// fixing dates, FX dates, non-zero accrual) fails with it.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Error::CurrencyMismatch { .. }
                | Error::LengthMismatch { .. }
                | Error::InvalidAccrualFactor { .. }
                | Error::MissingField(_)
                | Error::Precondition(_)
        )
    }
}

/// Shorthand `Result` type used throughout irkit.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ir_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ir_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::LengthMismatch { .. })` unless two slices have the
/// same length.
///
/// # Example
/// ```
/// use ir_core::{ensure_same_len, errors::Error};
/// fn check(a: &[f64], b: &[f64]) -> ir_core::errors::Result<()> {
///     ensure_same_len!(a, "weights", b, "fixing dates");
///     Ok(())
/// }
/// assert!(check(&[1.0], &[2.0]).is_ok());
/// assert!(matches!(
///     check(&[1.0], &[]),
///     Err(Error::LengthMismatch { first: "weights", .. })
/// ));
/// ```
#[macro_export]
macro_rules! ensure_same_len {
    ($a:expr, $a_name:expr, $b:expr, $b_name:expr) => {
        if $a.len() != $b.len() {
            return Err($crate::errors::Error::LengthMismatch {
                first: $a_name,
                first_len: $a.len(),
                second: $b_name,
                second_len: $b.len(),
            });
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use ir_core::{fail, errors::Error};
/// fn always_err() -> ir_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_names_both_arrays() {
        let err = Error::LengthMismatch {
            first: "weights",
            first_len: 3,
            second: "fixing dates",
            second_len: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("weights"));
        assert!(msg.contains("fixing dates"));
        assert!(err.is_construction_error());
    }

    #[test]
    fn fixing_errors_are_not_construction_errors() {
        let missing = Error::MissingFixing {
            index: "USDLIBOR3M".into(),
            date: "2011-05-23".into(),
        };
        assert!(!missing.is_construction_error());
        assert_eq!(missing.to_string(), "missing fixing for USDLIBOR3M on 2011-05-23");

        let past = Error::PastPaymentDate {
            valuation: "2012-01-10".into(),
            payment: "2012-01-09".into(),
        };
        assert!(!past.is_construction_error());
    }

    #[test]
    fn failed_preconditions_are_construction_errors() {
        fn ordered(a: i32, b: i32) -> Result<()> {
            crate::ensure!(a < b, "{a} should be before {b}");
            Ok(())
        }
        let err = ordered(2, 1).unwrap_err();
        assert_eq!(err, Error::Precondition("2 should be before 1".into()));
        assert!(err.is_construction_error());
        assert!(!Error::Runtime("registry".into()).is_construction_error());
        assert!(!Error::InvalidArgument("3X".into()).is_construction_error());
    }

    #[test]
    fn currency_mismatch_display() {
        let err = Error::CurrencyMismatch {
            expected: "USD".into(),
            found: "EUR".into(),
        };
        assert_eq!(err.to_string(), "currency mismatch: expected USD, found EUR");
    }
}
