//! Ibor coupon with a single fixing.

use crate::coupon::{hash_real, CouponCommon};
use crate::derivative::{CouponDerivative, CouponIbor};
use crate::fixed_rate_coupon::fixed_derivative;
use crate::fixing::{check_payment_date, resolve, time_from, FixingStatus};
use ir_core::errors::Result;
use ir_core::{Real, Spread, TimeSeries};
use ir_currencies::Currency;
use ir_indexes::{adjusted_date_for_index, IborIndex, Index};
use ir_time::{Calendar, Date};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Fixing date and fixing period of one Ibor observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct IborFixing {
    pub(crate) fixing_date: Date,
    pub(crate) period_start: Date,
    pub(crate) period_end: Date,
    pub(crate) accrual_factor: Real,
}

impl IborFixing {
    /// The period starts spot-lag business days after the fixing and lasts
    /// one index tenor.
    pub(crate) fn observed_on(fixing_date: Date, index: &IborIndex, calendar: &dyn Calendar) -> Result<Self> {
        let period_start = index.fixing_period_start(fixing_date, calendar);
        let period_end = adjusted_date_for_index(period_start, index, calendar)?;
        Ok(Self {
            fixing_date,
            period_start,
            period_end,
            accrual_factor: index.day_counter().year_fraction(period_start, period_end),
        })
    }
}

impl Hash for IborFixing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fixing_date.hash(state);
        self.period_start.hash(state);
        self.period_end.hash(state);
        hash_real(self.accrual_factor, state);
    }
}

/// An Ibor coupon paying `notional × (fixing + spread) × payment_year_fraction`.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborDefinition {
    common: CouponCommon,
    index: Arc<IborIndex>,
    fixing: IborFixing,
    spread: Spread,
}

impl CouponIborDefinition {
    /// Create the coupon from explicit dates. The fixing period is derived
    /// from the fixing date and the index conventions.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: &'static Currency,
        payment_date: Date,
        accrual_start_date: Date,
        accrual_end_date: Date,
        payment_year_fraction: Real,
        notional: Real,
        fixing_date: Date,
        index: Arc<IborIndex>,
        spread: Spread,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        index.check_currency(currency)?;
        let fixing = IborFixing::observed_on(fixing_date, &index, calendar)?;
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
            fixing,
            spread,
        })
    }

    /// Create the coupon for the accrual period `[start, end]`, fixing
    /// spot-lag business days before `start`. The accrual factor uses the
    /// index day counter and the currency is the index currency.
    pub fn from(
        accrual_start_date: Date,
        accrual_end_date: Date,
        payment_date: Date,
        notional: Real,
        index: Arc<IborIndex>,
        spread: Spread,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let fixing_date = index.fixing_date(accrual_start_date, calendar);
        let payment_year_fraction = index
            .day_counter()
            .year_fraction(accrual_start_date, accrual_end_date);
        Self::new(
            index.currency(),
            payment_date,
            accrual_start_date,
            accrual_end_date,
            payment_year_fraction,
            notional,
            fixing_date,
            index,
            spread,
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

    /// Fixing date.
    pub fn fixing_date(&self) -> Date {
        self.fixing.fixing_date
    }

    /// Start of the index fixing period.
    pub fn fixing_period_start_date(&self) -> Date {
        self.fixing.period_start
    }

    /// End of the index fixing period.
    pub fn fixing_period_end_date(&self) -> Date {
        self.fixing.period_end
    }

    /// Index accrual factor of the fixing period.
    pub fn fixing_period_accrual_factor(&self) -> Real {
        self.fixing.accrual_factor
    }

    /// Spread over the index.
    pub fn spread(&self) -> Spread {
        self.spread
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: Real) -> Self {
        Self {
            common: self.common.with_notional(notional),
            ..self.clone()
        }
    }

    /// Convert at `valuation`, looking the fixing up in `fixings`.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fixings: Option<&TimeSeries<Date, Real>>,
    ) -> Result<CouponDerivative> {
        check_payment_date(valuation, self.common.payment_date())?;
        let date = self.fixing.fixing_date;
        match resolve(self.index.name(), date, date, valuation, fixings)? {
            FixingStatus::Resolved(fixing) => {
                tracing::debug!(index = self.index.name(), rate = fixing, "Ibor coupon collapsed to fixed");
                Ok(CouponDerivative::Fixed(fixed_derivative(
                    &self.common,
                    valuation,
                    fixing + self.spread,
                )))
            }
            FixingStatus::Unresolved => Ok(CouponDerivative::Ibor(CouponIbor {
                currency: self.common.currency(),
                payment_time: time_from(valuation, self.common.payment_date()),
                payment_year_fraction: self.common.payment_year_fraction(),
                notional: self.common.notional(),
                index: Arc::clone(&self.index),
                fixing_time: time_from(valuation, date),
                fixing_period_start_time: time_from(valuation, self.fixing.period_start),
                fixing_period_end_time: time_from(valuation, self.fixing.period_end),
                fixing_accrual_factor: self.fixing.accrual_factor,
                spread: self.spread,
            })),
        }
    }
}

impl Hash for CouponIborDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.common.hash(state);
        self.index.hash(state);
        self.fixing.hash(state);
        hash_real(self.spread, state);
    }
}
