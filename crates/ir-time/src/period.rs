//! `Period`: a time span expressed in a [`TimeUnit`].

use crate::date::Date;
use crate::time_unit::TimeUnit;
use ir_core::errors::{Error, Result};
use std::str::FromStr;

/// A tenor made up of an integer length and a [`TimeUnit`], e.g. `3M`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    /// Number of units.
    pub length: i32,
    /// The unit of time.
    pub unit: TimeUnit,
}

impl Period {
    /// Create a new period.
    pub fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// `n` days.
    pub fn days(n: i32) -> Self {
        Self::new(n, TimeUnit::Days)
    }

    /// `n` weeks.
    pub fn weeks(n: i32) -> Self {
        Self::new(n, TimeUnit::Weeks)
    }

    /// `n` months.
    pub fn months(n: i32) -> Self {
        Self::new(n, TimeUnit::Months)
    }

    /// `n` years.
    pub fn years(n: i32) -> Self {
        Self::new(n, TimeUnit::Years)
    }

    /// `true` when the period is counted in days or weeks. The end-of-month
    /// rule never applies to such periods.
    pub fn is_day_based(&self) -> bool {
        self.unit.is_day_based() && self.length != 0
    }

    /// Apply the period to `date` without any business-day adjustment.
    pub fn add_to(&self, date: Date) -> Result<Date> {
        date.advance(self.length, self.unit)
    }
}

impl std::ops::Neg for Period {
    type Output = Self;
    fn neg(self) -> Self {
        Period::new(-self.length, self.unit)
    }
}

impl std::ops::Mul<i32> for Period {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self {
        Period::new(self.length * rhs, self.unit)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.length, self.unit.abbreviation())
    }
}

impl std::fmt::Debug for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Period({self})")
    }
}

impl FromStr for Period {
    type Err = Error;

    /// Parse a tenor string like `"3M"`, `"1Y"`, `"30D"`, `"2W"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let bad = || Error::InvalidArgument(format!("cannot parse period '{s}'"));
        let unit = s
            .chars()
            .last()
            .and_then(TimeUnit::from_abbreviation)
            .ok_or_else(bad)?;
        let length = s[..s.len() - 1].parse().map_err(|_| bad())?;
        Ok(Period::new(length, unit))
    }
}
