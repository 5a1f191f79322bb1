//! `IborIndex`: term interbank offered-rate index.

use crate::index::Index;
use ir_core::errors::Result;
use ir_currencies::Currency;
use ir_time::{
    adjusted_date, adjusted_date_by_days, BusinessDayConvention, Calendar, Date, DayCounter, Period,
};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An Interbank Offered Rate index (e.g. Euribor, USD LIBOR).
///
/// Equality and hashing compare every convention; the day counter is
/// compared by name.
#[derive(Debug, Clone)]
pub struct IborIndex {
    name: String,
    currency: &'static Currency,
    tenor: Period,
    spot_lag: u32,
    day_counter: Arc<dyn DayCounter>,
    convention: BusinessDayConvention,
    end_of_month: bool,
}

impl IborIndex {
    /// Create a new IBOR index.
    pub fn new(
        name: impl Into<String>,
        currency: &'static Currency,
        tenor: Period,
        spot_lag: u32,
        day_counter: impl DayCounter + 'static,
        convention: BusinessDayConvention,
        end_of_month: bool,
    ) -> Self {
        Self {
            name: name.into(),
            currency,
            tenor,
            spot_lag,
            day_counter: Arc::new(day_counter),
            convention,
            end_of_month,
        }
    }

    /// Tenor of the rate (e.g. 3M).
    pub fn tenor(&self) -> Period {
        self.tenor
    }

    /// Business days between fixing and the start of the fixing period.
    pub fn spot_lag(&self) -> u32 {
        self.spot_lag
    }

    /// Convention used to roll the fixing-period end date.
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// Whether fixing periods follow the end-of-month rule.
    pub fn end_of_month(&self) -> bool {
        self.end_of_month
    }

    /// Shared handle on the day counter.
    pub fn shared_day_counter(&self) -> Arc<dyn DayCounter> {
        Arc::clone(&self.day_counter)
    }

    /// Fixing date of a fixing period starting on `start`: `start` moved back
    /// by the spot lag in business days.
    pub fn fixing_date(&self, start: Date, calendar: &dyn Calendar) -> Date {
        adjusted_date_by_days(start, -(self.spot_lag as i32), calendar)
    }

    /// Start of the fixing period observed on `fixing_date`.
    pub fn fixing_period_start(&self, fixing_date: Date, calendar: &dyn Calendar) -> Date {
        adjusted_date_by_days(fixing_date, self.spot_lag as i32, calendar)
    }
}

/// End of the index fixing period starting on `start`, using the index tenor,
/// business-day convention and end-of-month flag.
pub fn adjusted_date_for_index(start: Date, index: &IborIndex, calendar: &dyn Calendar) -> Result<Date> {
    adjusted_date(start, index.tenor, index.convention, calendar, index.end_of_month)
}

impl Index for IborIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.day_counter
    }
}

impl PartialEq for IborIndex {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.currency == other.currency
            && self.tenor == other.tenor
            && self.spot_lag == other.spot_lag
            && self.day_counter.name() == other.day_counter.name()
            && self.convention == other.convention
            && self.end_of_month == other.end_of_month
    }
}

impl Eq for IborIndex {}

impl Hash for IborIndex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.currency.code.hash(state);
        self.tenor.hash(state);
        self.spot_lag.hash(state);
        self.day_counter.name().hash(state);
        self.convention.hash(state);
        self.end_of_month.hash(state);
    }
}

impl std::fmt::Display for IborIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
