//! Fixing resolution against a historical series.
//!
//! A fixing observed on date `f` and published on date `p` (`p == f` for Ibor
//! and FX fixings, `p` after `f` for overnight indexes with a publication
//! lag) is classified at valuation date `v` as follows:
//!
//! | case     | series contains `f` | series lacks `f` (or no series) |
//! |----------|---------------------|---------------------------------|
//! | `v < p`  | unresolved          | unresolved                      |
//! | `v == p` | resolved            | unresolved                      |
//! | `v > p`  | resolved            | [`Error::MissingFixing`]        |
//!
//! The series is not consulted at all when `v < p`.

use ir_core::errors::{Error, Result};
use ir_core::{Rate, Real, Time, TimeSeries};
use ir_time::{Actual365Fixed, Date, DayCounter};

/// Outcome of resolving a single fixing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixingStatus {
    /// The rate is known.
    Resolved(Rate),
    /// The rate has to be forecast.
    Unresolved,
}

impl FixingStatus {
    /// The resolved rate, if any.
    pub fn rate(&self) -> Option<Rate> {
        match self {
            FixingStatus::Resolved(rate) => Some(*rate),
            FixingStatus::Unresolved => None,
        }
    }

    /// Whether the rate is known.
    pub fn is_resolved(&self) -> bool {
        matches!(self, FixingStatus::Resolved(_))
    }
}

/// How much of a multi-observation coupon is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Every observation is known.
    Resolved,
    /// Some, but not all, observations are known.
    PartiallyResolved,
    /// No observation is known.
    Unresolved,
}

/// Resolve the fixing of `label` observed on `fixing_date` and published on
/// `publication_date`, at valuation date `valuation`.
pub fn resolve(
    label: &str,
    fixing_date: Date,
    publication_date: Date,
    valuation: Date,
    fixings: Option<&TimeSeries<Date, Real>>,
) -> Result<FixingStatus> {
    if valuation < publication_date {
        return Ok(FixingStatus::Unresolved);
    }
    let known = fixings.and_then(|series| series.get(&fixing_date)).copied();
    match known {
        Some(rate) => {
            tracing::debug!(index = label, date = %fixing_date, rate, "fixing resolved from history");
            Ok(FixingStatus::Resolved(rate))
        }
        None if valuation == publication_date => {
            tracing::debug!(index = label, date = %fixing_date, "fixing not yet published");
            Ok(FixingStatus::Unresolved)
        }
        None => {
            tracing::warn!(index = label, date = %fixing_date, valuation = %valuation, "missing past fixing");
            Err(Error::MissingFixing {
                index: label.to_string(),
                date: fixing_date.to_string(),
            })
        }
    }
}

/// Reject conversion at a valuation date strictly after the payment date.
/// Conversion on the payment date itself is allowed.
pub fn check_payment_date(valuation: Date, payment_date: Date) -> Result<()> {
    if valuation > payment_date {
        return Err(Error::PastPaymentDate {
            valuation: valuation.to_string(),
            payment: payment_date.to_string(),
        });
    }
    Ok(())
}

/// The known leading observations of a sequence of fixings.
#[derive(Debug, Clone, PartialEq)]
pub struct FixingPrefix {
    /// Rates of the resolved observations, in order.
    pub rates: Vec<Rate>,
    /// Total number of observations.
    pub total: usize,
}

impl FixingPrefix {
    /// Position of the first unresolved observation (`total` when complete).
    pub fn first_unresolved(&self) -> usize {
        self.rates.len()
    }

    /// Whether every observation is known.
    pub fn is_complete(&self) -> bool {
        self.rates.len() == self.total
    }

    /// Classification of the whole sequence.
    pub fn resolution(&self) -> Resolution {
        match self.rates.len() {
            0 if self.total > 0 => Resolution::Unresolved,
            n if n == self.total => Resolution::Resolved,
            _ => Resolution::PartiallyResolved,
        }
    }
}

/// Resolve `(fixing_date, publication_date)` observations in order.
///
/// Every observation is resolved on its own, so a missing past fixing is an
/// error wherever it sits in the sequence. The returned prefix holds the
/// rates known before the first unresolved observation; a rate known after
/// it is left to the forecast.
pub fn resolve_all<I>(
    label: &str,
    observations: I,
    valuation: Date,
    fixings: Option<&TimeSeries<Date, Real>>,
) -> Result<FixingPrefix>
where
    I: IntoIterator<Item = (Date, Date)>,
    I::IntoIter: ExactSizeIterator,
{
    let observations = observations.into_iter();
    let total = observations.len();
    let mut rates = Vec::with_capacity(total);
    let mut open = true;
    for (fixing_date, publication_date) in observations {
        match resolve(label, fixing_date, publication_date, valuation, fixings)? {
            FixingStatus::Resolved(rate) if open => rates.push(rate),
            FixingStatus::Resolved(_) => {}
            FixingStatus::Unresolved => open = false,
        }
    }
    Ok(FixingPrefix { rates, total })
}

/// Signed time in years from `valuation` to `date` (Actual/365 Fixed).
pub fn time_from(valuation: Date, date: Date) -> Time {
    Actual365Fixed.year_fraction(valuation, date)
}
