//! Ibor coupon paying a weighted average of several fixings over a single
//! accrual period.

use crate::coupon::{hash_reals, CouponCommon};
use crate::derivative::{CouponDerivative, CouponIborAverage};
use crate::fixed_rate_coupon::fixed_derivative;
use crate::fixing::{check_payment_date, resolve, time_from, FixingStatus};
use crate::ibor_coupon::IborFixing;
use ir_core::errors::{Error, Result};
use ir_core::{ensure_same_len, Rate, Real, Time, TimeSeries};
use ir_currencies::Currency;
use ir_indexes::{IborIndex, Index};
use ir_time::{
    adjusted_date, adjusted_date_by_days, adjusted_date_schedule_for_tenor, start_dates,
    BusinessDayConvention, Calendar, Date, Period, StubType,
};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An Ibor coupon paying `Σ weights[i] × fixing[i]` on one accrual period.
///
/// Every observation has its own fixing date and fixing period; the
/// observations are resolved independently of each other.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborAverageDefinition {
    common: CouponCommon,
    index: Arc<IborIndex>,
    fixing_dates: Arc<[Date]>,
    weights: Arc<[Real]>,
    fixing_period_start_dates: Arc<[Date]>,
    fixing_period_end_dates: Arc<[Date]>,
    fixing_period_accrual_factors: Arc<[Real]>,
}

impl CouponIborAverageDefinition {
    /// Create the coupon with every per-observation array supplied.
    ///
    /// All five arrays must have the same, non-zero length.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: &'static Currency,
        payment_date: Date,
        accrual_start_date: Date,
        accrual_end_date: Date,
        payment_year_fraction: Real,
        notional: Real,
        index: Arc<IborIndex>,
        fixing_dates: impl Into<Arc<[Date]>>,
        weights: impl Into<Arc<[Real]>>,
        fixing_period_start_dates: impl Into<Arc<[Date]>>,
        fixing_period_end_dates: impl Into<Arc<[Date]>>,
        fixing_period_accrual_factors: impl Into<Arc<[Real]>>,
    ) -> Result<Self> {
        index.check_currency(currency)?;
        let fixing_dates = fixing_dates.into();
        let weights = weights.into();
        let fixing_period_start_dates = fixing_period_start_dates.into();
        let fixing_period_end_dates = fixing_period_end_dates.into();
        let fixing_period_accrual_factors = fixing_period_accrual_factors.into();
        ensure_same_len!(weights, "weights", fixing_dates, "fixing dates");
        ensure_same_len!(fixing_dates, "fixing dates", fixing_period_start_dates, "fixing period start dates");
        ensure_same_len!(fixing_dates, "fixing dates", fixing_period_end_dates, "fixing period end dates");
        ensure_same_len!(
            fixing_dates,
            "fixing dates",
            fixing_period_accrual_factors,
            "fixing period accrual factors"
        );
        if fixing_dates.is_empty() {
            return Err(Error::MissingField("fixing dates"));
        }
        Ok(Self {
            common: CouponCommon::new(
                currency,
                payment_date,
                accrual_start_date,
                accrual_end_date,
                payment_year_fraction,
                notional,
            ),
            index,
            fixing_dates,
            weights,
            fixing_period_start_dates,
            fixing_period_end_dates,
            fixing_period_accrual_factors,
        })
    }

    /// Create the coupon from fixing dates and weights; every fixing period
    /// is derived from the index spot lag and tenor.
    #[allow(clippy::too_many_arguments)]
    pub fn from_fixing_dates(
        currency: &'static Currency,
        payment_date: Date,
        accrual_start_date: Date,
        accrual_end_date: Date,
        payment_year_fraction: Real,
        notional: Real,
        index: Arc<IborIndex>,
        fixing_dates: &[Date],
        weights: impl Into<Arc<[Real]>>,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let observed = fixing_dates
            .iter()
            .map(|d| IborFixing::observed_on(*d, &index, calendar))
            .collect::<Result<Vec<_>>>()?;
        Self::new(
            currency,
            payment_date,
            accrual_start_date,
            accrual_end_date,
            payment_year_fraction,
            notional,
            Arc::clone(&index),
            fixing_dates,
            weights,
            observed.iter().map(|o| o.period_start).collect::<Vec<_>>(),
            observed.iter().map(|o| o.period_end).collect::<Vec<_>>(),
            observed.iter().map(|o| o.accrual_factor).collect::<Vec<_>>(),
        )
    }

    /// Create the coupon from an effective date and a tenor.
    ///
    /// The accrual end is `effective + tenor` adjusted, the payment date is
    /// `payment_lag` business days later and the accrual factor uses the
    /// index day counter. Observations start every `observation_period`
    /// from `effective` (short first stub) and fix spot-lag business days
    /// before they start; `weights` needs one entry per observation.
    #[allow(clippy::too_many_arguments)]
    pub fn from(
        index: Arc<IborIndex>,
        effective_date: Date,
        tenor: Period,
        notional: Real,
        payment_lag: i32,
        convention: BusinessDayConvention,
        end_of_month: bool,
        observation_period: Period,
        weights: impl Into<Arc<[Real]>>,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let accrual_end_date = adjusted_date(effective_date, tenor, convention, calendar, end_of_month)?;
        let payment_date = adjusted_date_by_days(accrual_end_date, payment_lag, calendar);
        let payment_year_fraction = index.day_counter().year_fraction(effective_date, accrual_end_date);
        let observation_ends = adjusted_date_schedule_for_tenor(
            effective_date,
            tenor,
            observation_period,
            StubType::ShortStart,
            convention,
            calendar,
            end_of_month,
        )?;
        let fixing_dates: Vec<Date> = start_dates(effective_date, &observation_ends)
            .into_iter()
            .map(|start| index.fixing_date(start, calendar))
            .collect();
        Self::from_fixing_dates(
            index.currency(),
            payment_date,
            effective_date,
            accrual_end_date,
            payment_year_fraction,
            notional,
            index,
            &fixing_dates,
            weights,
            calendar,
        )
    }

    /// Common coupon attributes.
    pub fn common(&self) -> &CouponCommon {
        &self.common
    }

    /// Index observed.
    pub fn index(&self) -> &Arc<IborIndex> {
        &self.index
    }

    /// Fixing dates of the observations.
    pub fn fixing_dates(&self) -> &Arc<[Date]> {
        &self.fixing_dates
    }

    /// Weights of the observations.
    pub fn weights(&self) -> &Arc<[Real]> {
        &self.weights
    }

    /// Fixing-period start dates.
    pub fn fixing_period_start_dates(&self) -> &Arc<[Date]> {
        &self.fixing_period_start_dates
    }

    /// Fixing-period end dates.
    pub fn fixing_period_end_dates(&self) -> &Arc<[Date]> {
        &self.fixing_period_end_dates
    }

    /// Fixing-period accrual factors in the index day count.
    pub fn fixing_period_accrual_factors(&self) -> &Arc<[Real]> {
        &self.fixing_period_accrual_factors
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: Real) -> Self {
        Self {
            common: self.common.with_notional(notional),
            ..self.clone()
        }
    }

    /// Convert at `valuation`, looking the fixings up in `fixings`.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fixings: Option<&TimeSeries<Date, Real>>,
    ) -> Result<CouponDerivative> {
        check_payment_date(valuation, self.common.payment_date())?;
        let mut rate_accrued: Rate = 0.0;
        let mut pending = Vec::new();
        for (i, date) in self.fixing_dates.iter().enumerate() {
            match resolve(self.index.name(), *date, *date, valuation, fixings)? {
                FixingStatus::Resolved(fixing) => rate_accrued += self.weights[i] * fixing,
                FixingStatus::Unresolved => pending.push(i),
            }
        }
        if pending.is_empty() {
            tracing::debug!(index = self.index.name(), rate = rate_accrued, "Ibor average collapsed to fixed");
            return Ok(CouponDerivative::Fixed(fixed_derivative(&self.common, valuation, rate_accrued)));
        }
        let times = |dates: &[Date]| -> Vec<Time> {
            pending.iter().map(|i| time_from(valuation, dates[*i])).collect()
        };
        Ok(CouponDerivative::IborAverage(CouponIborAverage {
            currency: self.common.currency(),
            payment_time: time_from(valuation, self.common.payment_date()),
            payment_year_fraction: self.common.payment_year_fraction(),
            notional: self.common.notional(),
            index: Arc::clone(&self.index),
            rate_accrued,
            fixing_times: times(&self.fixing_dates[..]),
            weights: pending.iter().map(|i| self.weights[*i]).collect(),
            fixing_period_start_times: times(&self.fixing_period_start_dates[..]),
            fixing_period_end_times: times(&self.fixing_period_end_dates[..]),
            fixing_accrual_factors: pending
                .iter()
                .map(|i| self.fixing_period_accrual_factors[*i])
                .collect(),
        }))
    }
}

impl Hash for CouponIborAverageDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.common.hash(state);
        self.index.hash(state);
        self.fixing_dates.hash(state);
        hash_reals(&self.weights, state);
        self.fixing_period_start_dates.hash(state);
        self.fixing_period_end_dates.hash(state);
        hash_reals(&self.fixing_period_accrual_factors, state);
    }
}
