//! `DayCounter` trait and built-in day-count conventions.
//!
//! A day counter computes the fraction of a year between two dates. The
//! fraction is signed: `year_fraction(d2, d1) == -year_fraction(d1, d2)`.

use crate::date::{is_leap_year, Date};
use ir_core::{Real, Time};

/// A convention for counting the fraction of a year between two dates.
///
/// Day counters are stateless and shared as `Arc<dyn DayCounter>`; two day
/// counters are considered equal when their names are.
pub trait DayCounter: std::fmt::Debug + Send + Sync {
    /// Human-readable name of this convention (e.g. `"Actual/360"`).
    fn name(&self) -> &str;

    /// Number of days between `d1` and `d2` according to this convention.
    fn day_count(&self, d1: Date, d2: Date) -> i64;

    /// Signed fraction of a year between `d1` and `d2`.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;
}

/// Actual/365 (Fixed) day counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> &str {
        "Actual/365 (Fixed)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2 - d1) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// Actual/360 day counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> &str {
        "Actual/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2 - d1) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// 30/360 (Bond Basis) day counter.
///
/// `days = 360(Y2−Y1) + 30(M2−M1) + (D2−D1)` with D1 = 31 → 30 and
/// D2 = 31 → 30 when D1 ≥ 30.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360;

impl DayCounter for Thirty360 {
    fn name(&self) -> &str {
        "30/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        let dd1 = (d1.day_of_month() as i64).min(30);
        let mut dd2 = d2.day_of_month() as i64;
        if dd2 == 31 && dd1 == 30 {
            dd2 = 30;
        }
        360 * (d2.year() as i64 - d1.year() as i64)
            + 30 * (d2.month() as i64 - d1.month() as i64)
            + (dd2 - dd1)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Actual/Actual (ISDA) day counter.
///
/// Days in leap years count 1/366, other days 1/365.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActualActualIsda;

impl DayCounter for ActualActualIsda {
    fn name(&self) -> &str {
        "Actual/Actual (ISDA)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2 - d1) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        if d1 > d2 {
            return -self.year_fraction(d2, d1);
        }
        let basis = |y: u16| if is_leap_year(y) { 366.0 } else { 365.0 };
        let (y1, y2) = (d1.year(), d2.year());
        if y1 == y2 {
            return (d2 - d1) as Real / basis(y1);
        }
        let start_of = |y: u16| Date::from_ymd(y, 1, 1).map(|d| d.serial()).unwrap_or(d2.serial());
        let first = (start_of(y1 + 1) - d1.serial()) as Real / basis(y1);
        let last = (d2.serial() - start_of(y2)) as Real / basis(y2);
        first + (y2 - y1 - 1) as Real + last
    }
}
