//! `Calendar` trait and the calendars used by coupon schedules.
//!
//! A calendar answers one question, whether a date is a business day. Rolling
//! by a [`BusinessDayConvention`] and stepping over business days are provided
//! on top of it.

use crate::business_day_convention::BusinessDayConvention;
use crate::date::Date;
use std::collections::BTreeSet;

/// A holiday calendar.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"NYC"`).
    fn name(&self) -> &str;

    /// Return `true` if `date` is a business day in this calendar.
    fn is_business_day(&self, date: Date) -> bool;

    /// Return `true` if `date` is a holiday (non-business) day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Return `true` if `date` falls on a Saturday or Sunday.
    fn is_weekend(&self, date: Date) -> bool {
        date.weekday().is_weekend()
    }

    /// Return `true` if `date` is the last business day of its month, i.e.
    /// the next business day is in another month.
    fn is_end_of_month(&self, date: Date) -> bool {
        date.month() != self.advance_business_days(date, 1).month()
    }

    /// Return the last business day of the month containing `date`.
    fn end_of_month(&self, date: Date) -> Date {
        self.adjust(date.end_of_month(), BusinessDayConvention::Preceding)
    }

    /// Adjust `date` according to the given business-day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        let step = convention.direction();
        if step == 0 {
            return date;
        }
        let rolled = roll(self, date, step);
        if convention == BusinessDayConvention::Nearest {
            let back = roll(self, date, -1);
            return if rolled - date <= date - back { rolled } else { back };
        }
        if convention.keeps_month() && rolled.month() != date.month() {
            roll(self, date, -step)
        } else {
            rolled
        }
    }

    /// Move `n` business days from `date` (backwards when `n < 0`). The
    /// starting date itself need not be a business day.
    fn advance_business_days(&self, mut date: Date, n: i32) -> Date {
        let step = n.signum();
        let mut remaining = n.abs();
        while remaining > 0 {
            date = date + step;
            if self.is_business_day(date) {
                remaining -= 1;
            }
        }
        date
    }
}

fn roll<C: Calendar + ?Sized>(calendar: &C, mut date: Date, step: i32) -> Date {
    while calendar.is_holiday(date) {
        date = date + step;
    }
    date
}

/// A calendar where every day is a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }

    fn is_weekend(&self, _date: Date) -> bool {
        false
    }
}

/// A calendar whose only non-business days are Saturdays and Sundays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date)
    }
}

/// Weekends plus an explicit list of holidays.
///
/// Built once and then shared read-only, e.g.
///
/// ```
/// use ir_time::{Calendar, Date, HolidayCalendar};
/// let nyc = HolidayCalendar::new("NYC", [Date::from_ymd(2011, 9, 5).unwrap()]);
/// assert!(nyc.is_holiday(Date::from_ymd(2011, 9, 5).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Create a calendar from a name and its holidays.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Number of explicit holidays.
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date) && !self.holidays.contains(&date)
    }
}
