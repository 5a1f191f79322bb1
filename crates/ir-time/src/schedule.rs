//! Schedule generation: adjusted dates and accrual/fixing date schedules.
//!
//! The functions here only sequence calls to a [`Calendar`] and a
//! [`BusinessDayConvention`]; all rolling is delegated to them. Generated
//! schedules exclude the anchor (start) date, are strictly increasing and
//! end on the (adjusted) end date.
//!
//! End-of-month rule: when it is requested and the start date is the last
//! business day of its month, every generated date is moved to the last
//! business day of its own month, whichever direction the dates are
//! generated in. This matches [`adjusted_date`] for the final boundary.
//! Schedules generated backwards (see [`StubType`]) also follow the rule
//! when their end date is the last business day of its month.

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::Calendar;
use crate::date::Date;
use crate::period::Period;
use ir_core::{ensure, errors::Result};

/// Position and length of the irregular period when a period does not fit
/// exactly between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StubType {
    /// No stub expected; generated from the start like a short end stub.
    None,
    /// Short stub at the start, dates generated backwards from the end.
    ShortStart,
    /// Long stub at the start, dates generated backwards from the end.
    LongStart,
    /// Short stub at the end, dates generated forwards from the start.
    ShortEnd,
    /// Long stub at the end, dates generated forwards from the start.
    LongEnd,
    /// Stubs at both ends; treated as a short end stub.
    Both,
}

impl StubType {
    /// `true` when dates are generated backwards from the end date.
    pub fn generates_from_end(&self) -> bool {
        matches!(self, StubType::ShortStart | StubType::LongStart)
    }

    /// `true` when the irregular period is shorter than the schedule period.
    pub fn is_short(&self) -> bool {
        !matches!(self, StubType::LongStart | StubType::LongEnd)
    }
}

/// Roll `date` to a business day (Following) and then move `shift` business
/// days, backwards for a negative shift.
///
/// A shift of zero returns the following business day; this is how spot lags,
/// fixing lags and payment lags are applied.
pub fn adjusted_date_by_days(date: Date, shift: i32, calendar: &dyn Calendar) -> Date {
    let rolled = calendar.adjust(date, BusinessDayConvention::Following);
    calendar.advance_business_days(rolled, shift)
}

/// `start + period`, adjusted.
///
/// With `end_of_month` set, a month/year based period and a start date on the
/// last business day of its month, the result is the last business day of
/// the target month. Otherwise `convention` is applied.
pub fn adjusted_date(
    start: Date,
    period: Period,
    convention: BusinessDayConvention,
    calendar: &dyn Calendar,
    end_of_month: bool,
) -> Result<Date> {
    let end = period.add_to(start)?;
    if end_of_month && !period.is_day_based() && calendar.is_end_of_month(start) {
        return Ok(calendar.end_of_month(end));
    }
    Ok(calendar.adjust(end, convention))
}

/// Unadjusted period boundaries between `start` (excluded) and `end`
/// (included).
///
/// Each date is computed from the anchor as `anchor ± k·period`, never by
/// chaining, so month-end clamping does not drift. For a long stub the date
/// closest to the stub is removed, merging the stub into its neighbour.
pub fn unadjusted_date_schedule(
    start: Date,
    end: Date,
    period: Period,
    stub: StubType,
) -> Result<Vec<Date>> {
    ensure!(start < end, "start date {start} should be strictly before end date {end}");
    ensure!(period.length > 0, "schedule period must be positive, got {period}");

    let mut dates = Vec::new();
    if !stub.generates_from_end() {
        let mut k = 1;
        let mut date = (period * k).add_to(start)?;
        while date < end {
            dates.push(date);
            k += 1;
            date = (period * k).add_to(start)?;
        }
        if !stub.is_short() && date != end && !dates.is_empty() {
            dates.pop();
        }
        dates.push(end);
        return Ok(dates);
    }

    let mut k = 0;
    let mut date = end;
    while date > start {
        dates.push(date);
        k += 1;
        date = (-(period * k)).add_to(end)?;
    }
    if !stub.is_short() && date != start && dates.len() > 1 {
        dates.pop();
    }
    dates.reverse();
    Ok(dates)
}

/// Adjusted period boundaries between `start` (excluded) and `end`.
///
/// The result is strictly increasing and its first date is strictly after
/// `start`; adjustments that collapse two boundaries onto the same business
/// day keep a single date.
pub fn adjusted_date_schedule(
    start: Date,
    end: Date,
    period: Period,
    stub: StubType,
    convention: BusinessDayConvention,
    calendar: &dyn Calendar,
    end_of_month: bool,
) -> Result<Vec<Date>> {
    let unadjusted = unadjusted_date_schedule(start, end, period, stub)?;
    let month_end_anchor =
        calendar.is_end_of_month(start) || (stub.generates_from_end() && calendar.is_end_of_month(end));
    let apply_eom = end_of_month && !period.is_day_based() && month_end_anchor;

    let mut dates: Vec<Date> = unadjusted
        .into_iter()
        .map(|d| {
            if apply_eom {
                calendar.end_of_month(d)
            } else {
                calendar.adjust(d, convention)
            }
        })
        .filter(|d| *d > start)
        .collect();
    dates.sort();
    dates.dedup();
    ensure!(
        !dates.is_empty(),
        "no adjusted date after {start} in schedule to {end} with period {period}"
    );
    tracing::debug!(
        start = %start,
        end = %end,
        period = %period,
        eom = apply_eom,
        count = dates.len(),
        "adjusted date schedule generated"
    );
    Ok(dates)
}

/// Adjusted schedule from a start date and a total tenor.
///
/// The end date is `start + total` (unadjusted). The end-of-month rule is
/// only considered when `total` is month/year based, so a one-week coupon
/// starting on a month end is not pushed to the next month end.
#[allow(clippy::too_many_arguments)]
pub fn adjusted_date_schedule_for_tenor(
    start: Date,
    total: Period,
    period: Period,
    stub: StubType,
    convention: BusinessDayConvention,
    calendar: &dyn Calendar,
    end_of_month: bool,
) -> Result<Vec<Date>> {
    let end = total.add_to(start)?;
    adjusted_date_schedule(
        start,
        end,
        period,
        stub,
        convention,
        calendar,
        end_of_month && !total.is_day_based(),
    )
}

/// Every business day in `[start, end]`, in order.
///
/// Used for the daily fixing periods of overnight coupons; `start` and `end`
/// are included whether or not they are business days.
pub fn business_day_schedule(start: Date, end: Date, calendar: &dyn Calendar) -> Result<Vec<Date>> {
    ensure!(start < end, "start date {start} should be strictly before end date {end}");
    let mut dates = vec![start];
    let mut date = calendar.advance_business_days(start, 1);
    while date < end {
        dates.push(date);
        date = calendar.advance_business_days(date, 1);
    }
    dates.push(end);
    Ok(dates)
}

/// Start dates matching a list of end dates: `[start, ends[0], …, ends[n-2]]`.
pub fn start_dates(start: Date, ends: &[Date]) -> Vec<Date> {
    std::iter::once(start)
        .chain(ends.iter().copied())
        .take(ends.len())
        .collect()
}
