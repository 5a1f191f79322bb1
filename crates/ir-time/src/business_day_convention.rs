//! Rolling rules for dates that land on a holiday.
//!
//! Conventions parse from the short market codes used in term sheets
//! (`"MF"`, `"F"`, ...) as well as from their full names.

use ir_core::errors::{Error, Result};
use std::str::FromStr;

/// How to roll a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BusinessDayConvention {
    /// Next business day.
    Following,
    /// Next business day, or the previous one if rolling forward leaves the
    /// month.
    ModifiedFollowing,
    /// Previous business day.
    Preceding,
    /// Previous business day, or the next one if rolling back leaves the
    /// month.
    ModifiedPreceding,
    /// Keep the date as is.
    Unadjusted,
    /// Closest business day; forward on a tie.
    Nearest,
}

const ALL: [BusinessDayConvention; 6] = [
    BusinessDayConvention::Following,
    BusinessDayConvention::ModifiedFollowing,
    BusinessDayConvention::Preceding,
    BusinessDayConvention::ModifiedPreceding,
    BusinessDayConvention::Unadjusted,
    BusinessDayConvention::Nearest,
];

impl BusinessDayConvention {
    /// Market code: `F`, `MF`, `P`, `MP`, `U` or `N`.
    pub fn code(&self) -> &'static str {
        match self {
            BusinessDayConvention::Following => "F",
            BusinessDayConvention::ModifiedFollowing => "MF",
            BusinessDayConvention::Preceding => "P",
            BusinessDayConvention::ModifiedPreceding => "MP",
            BusinessDayConvention::Unadjusted => "U",
            BusinessDayConvention::Nearest => "N",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Nearest => "Nearest",
        }
    }

    /// Day step used when rolling: `1` forward, `-1` backward, `0` for
    /// [`Unadjusted`](Self::Unadjusted).
    pub fn direction(&self) -> i32 {
        match self {
            BusinessDayConvention::Following
            | BusinessDayConvention::ModifiedFollowing
            | BusinessDayConvention::Nearest => 1,
            BusinessDayConvention::Preceding | BusinessDayConvention::ModifiedPreceding => -1,
            BusinessDayConvention::Unadjusted => 0,
        }
    }

    /// Whether a roll that crosses a month boundary is reversed.
    pub fn keeps_month(&self) -> bool {
        matches!(
            self,
            BusinessDayConvention::ModifiedFollowing | BusinessDayConvention::ModifiedPreceding
        )
    }
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BusinessDayConvention {
    type Err = Error;

    /// Accepts the market code or the full name, ignoring case, spaces,
    /// hyphens and underscores.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_uppercase();
        ALL.into_iter()
            .find(|c| key == c.code() || key == c.name().replace(' ', "").to_ascii_uppercase())
            .ok_or_else(|| Error::InvalidArgument(format!("unknown business day convention '{s}'")))
    }
}
