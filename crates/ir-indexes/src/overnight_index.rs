//! `OvernightIndex`: daily overnight rate index.

use crate::index::Index;
use ir_currencies::Currency;
use ir_time::{adjusted_date_by_days, Calendar, Date, DayCounter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An overnight rate index (e.g. Fed Funds, EONIA, SOFR).
///
/// The publication lag is the number of business days between the date a
/// rate applies to and the date it is published: 0 for EONIA, 1 for Fed
/// Funds.
#[derive(Debug, Clone)]
pub struct OvernightIndex {
    name: String,
    currency: &'static Currency,
    day_counter: Arc<dyn DayCounter>,
    publication_lag: u32,
}

impl OvernightIndex {
    /// Create a new overnight index.
    pub fn new(
        name: impl Into<String>,
        currency: &'static Currency,
        day_counter: impl DayCounter + 'static,
        publication_lag: u32,
    ) -> Self {
        Self {
            name: name.into(),
            currency,
            day_counter: Arc::new(day_counter),
            publication_lag,
        }
    }

    /// Business days between a fixing date and its publication.
    pub fn publication_lag(&self) -> u32 {
        self.publication_lag
    }

    /// Date on which the rate for `fixing_date` is published.
    pub fn publication_date(&self, fixing_date: Date, calendar: &dyn Calendar) -> Date {
        adjusted_date_by_days(fixing_date, self.publication_lag as i32, calendar)
    }

    /// Shared handle on the day counter.
    pub fn shared_day_counter(&self) -> Arc<dyn DayCounter> {
        Arc::clone(&self.day_counter)
    }
}

impl Index for OvernightIndex {
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

impl PartialEq for OvernightIndex {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.currency == other.currency
            && self.day_counter.name() == other.day_counter.name()
            && self.publication_lag == other.publication_lag
    }
}

impl Eq for OvernightIndex {}

impl Hash for OvernightIndex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.currency.code.hash(state);
        self.day_counter.name().hash(state);
        self.publication_lag.hash(state);
    }
}

impl std::fmt::Display for OvernightIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
