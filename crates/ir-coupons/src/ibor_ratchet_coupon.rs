//! Ibor ratchet coupon.
//!
//! The rate is `min(max(main, floor), cap)` where each of the three terms is
//! `c[0] × prior coupon rate + c[1] × index fixing + c[2]`. The prior coupon
//! rate is only known to the engine pricing the whole leg, so the
//! definition never collapses into a fixed coupon.

use crate::coupon::{hash_reals, CouponCommon};
use crate::derivative::{CouponDerivative, CouponIborRatchet};
use crate::fixing::{check_payment_date, resolve, time_from};
use crate::ibor_coupon::IborFixing;
use ir_core::errors::Result;
use ir_core::{Real, TimeSeries};
use ir_currencies::Currency;
use ir_indexes::{IborIndex, Index};
use ir_time::{Calendar, Date};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An Ibor coupon whose rate depends on the previous coupon rate.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborRatchetDefinition {
    common: CouponCommon,
    index: Arc<IborIndex>,
    fixing: IborFixing,
    main: [Real; 3],
    floor: [Real; 3],
    cap: [Real; 3],
}

impl CouponIborRatchetDefinition {
    /// Create the coupon. The fixing period is derived from the fixing date
    /// and the index conventions.
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
        main: [Real; 3],
        floor: [Real; 3],
        cap: [Real; 3],
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
            main,
            floor,
            cap,
        })
    }

    /// Create the coupon for `[start, end]`, fixing spot-lag business days
    /// before `start`, accruing in the index day count.
    #[allow(clippy::too_many_arguments)]
    pub fn from(
        accrual_start_date: Date,
        accrual_end_date: Date,
        payment_date: Date,
        notional: Real,
        index: Arc<IborIndex>,
        main: [Real; 3],
        floor: [Real; 3],
        cap: [Real; 3],
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
            main,
            floor,
            cap,
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

    /// Coefficients of the main formula.
    pub fn main_coefficients(&self) -> [Real; 3] {
        self.main
    }

    /// Coefficients of the floor.
    pub fn floor_coefficients(&self) -> [Real; 3] {
        self.floor
    }

    /// Coefficients of the cap.
    pub fn cap_coefficients(&self) -> [Real; 3] {
        self.cap
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: Real) -> Self {
        Self {
            common: self.common.with_notional(notional),
            ..self.clone()
        }
    }

    /// Convert at `valuation`. The index fixing is attached to the
    /// derivative when it is already known.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fixings: Option<&TimeSeries<Date, Real>>,
    ) -> Result<CouponDerivative> {
        check_payment_date(valuation, self.common.payment_date())?;
        let date = self.fixing.fixing_date;
        let status = resolve(self.index.name(), date, date, valuation, fixings)?;
        Ok(CouponDerivative::IborRatchet(CouponIborRatchet {
            currency: self.common.currency(),
            payment_time: time_from(valuation, self.common.payment_date()),
            payment_year_fraction: self.common.payment_year_fraction(),
            notional: self.common.notional(),
            index: Arc::clone(&self.index),
            fixing_time: time_from(valuation, date),
            fixing_period_start_time: time_from(valuation, self.fixing.period_start),
            fixing_period_end_time: time_from(valuation, self.fixing.period_end),
            fixing_accrual_factor: self.fixing.accrual_factor,
            main: self.main,
            floor: self.floor,
            cap: self.cap,
            index_fixing: status.rate(),
        }))
    }
}

impl Hash for CouponIborRatchetDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.common.hash(state);
        self.index.hash(state);
        self.fixing.hash(state);
        hash_reals(&self.main, state);
        hash_reals(&self.floor, state);
        hash_reals(&self.cap, state);
    }
}
