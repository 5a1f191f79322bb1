//! # ir-time
//!
//! Dates, calendars, day counters, business-day conventions and the schedule
//! generator used to build coupon dates.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// Calendar trait and built-in implementations.
pub mod calendar;

/// `Date` type.
pub mod date;

/// `DayCounter` trait and built-in day-count conventions.
pub mod day_counter;

/// `Period`: a time span in a `TimeUnit`.
pub mod period;

/// Adjusted dates and date schedules.
pub mod schedule;

/// `TimeUnit`, the unit of a tenor.
pub mod time_unit;

/// `Weekday`: day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, HolidayCalendar, NullCalendar, WeekendsOnly};
pub use date::Date;
pub use day_counter::{Actual360, Actual365Fixed, ActualActualIsda, DayCounter, Thirty360};
pub use period::Period;
pub use schedule::{
    adjusted_date, adjusted_date_by_days, adjusted_date_schedule,
    adjusted_date_schedule_for_tenor, business_day_schedule, start_dates,
    unadjusted_date_schedule, StubType,
};
pub use time_unit::TimeUnit;
pub use weekday::Weekday;
