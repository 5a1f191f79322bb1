//! `Currency`: ISO 4217 metadata for a payment currency.

use crate::currencies::ALL;
use ir_core::errors::{Error, Result};

/// Data describing a single currency.
///
/// Two currencies are the same currency when their ISO codes match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency {
    /// Full name (e.g. "U.S. Dollar").
    pub name: &'static str,
    /// ISO 4217 alphabetic code (e.g. "USD").
    pub code: &'static str,
    /// ISO 4217 numeric code (e.g. 840).
    pub numeric_code: u16,
    /// Symbol used in financial notation (e.g. "$").
    pub symbol: &'static str,
    /// Number of decimal places amounts are quoted with.
    pub rounding: u8,
}

impl Currency {
    pub(crate) const fn new(
        name: &'static str,
        code: &'static str,
        numeric_code: u16,
        symbol: &'static str,
        rounding: u8,
    ) -> Self {
        Self {
            name,
            code,
            numeric_code,
            symbol,
            rounding,
        }
    }

    /// Look up a pre-defined currency by its ISO code (case-insensitive).
    pub fn from_code(code: &str) -> Result<&'static Currency> {
        ALL.iter()
            .copied()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| Error::InvalidArgument(format!("unknown currency code '{code}'")))
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Currency {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
