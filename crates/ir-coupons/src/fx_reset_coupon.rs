//! Fixed coupon with an FX-reset notional.
//!
//! The notional is expressed in a reference currency and converted into the
//! payment currency at an FX fixing. Once that fixing is known the coupon is
//! an ordinary fixed coupon in the payment currency.

use crate::coupon::{hash_real, CouponCommon};
use crate::derivative::{CouponDerivative, CouponFixedFxReset};
use crate::fixed_rate_coupon::fixed_derivative;
use crate::fixing::{check_payment_date, resolve, time_from, FixingStatus};
use ir_core::errors::Result;
use ir_core::{ensure, Rate, Real, TimeSeries};
use ir_currencies::Currency;
use ir_time::Date;
use std::hash::{Hash, Hasher};

/// A fixed coupon whose notional is reset by an FX fixing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouponFixedFxResetDefinition {
    common: CouponCommon,
    rate: Rate,
    reference_currency: &'static Currency,
    fx_fixing_date: Date,
    fx_delivery_date: Date,
}

impl CouponFixedFxResetDefinition {
    /// Create the coupon. `currency` is the payment currency and `notional`
    /// is expressed in `reference_currency`.
    ///
    /// The two currencies must differ and the FX delivery date must not be
    /// before the FX fixing date.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: &'static Currency,
        payment_date: Date,
        accrual_start_date: Date,
        accrual_end_date: Date,
        payment_year_fraction: Real,
        notional: Real,
        rate: Rate,
        reference_currency: &'static Currency,
        fx_fixing_date: Date,
        fx_delivery_date: Date,
    ) -> Result<Self> {
        ensure!(
            currency != reference_currency,
            "payment and reference currencies are both {currency}"
        );
        ensure!(
            fx_delivery_date >= fx_fixing_date,
            "FX delivery date {fx_delivery_date} is before FX fixing date {fx_fixing_date}"
        );
        Ok(Self {
            common: CouponCommon::new(
                currency,
                payment_date,
                accrual_start_date,
                accrual_end_date,
                payment_year_fraction,
                notional,
            ),
            rate,
            reference_currency,
            fx_fixing_date,
            fx_delivery_date,
        })
    }

    /// Common coupon attributes; the notional is in the reference currency.
    pub fn common(&self) -> &CouponCommon {
        &self.common
    }

    /// Fixed rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Currency of the notional.
    pub fn reference_currency(&self) -> &'static Currency {
        self.reference_currency
    }

    /// Date of the FX fixing.
    pub fn fx_fixing_date(&self) -> Date {
        self.fx_fixing_date
    }

    /// Delivery date of the FX fixing.
    pub fn fx_delivery_date(&self) -> Date {
        self.fx_delivery_date
    }

    /// Name of the FX fixing: reference currency, then payment currency.
    pub fn fx_label(&self) -> String {
        format!("{}/{}", self.reference_currency, self.common.currency())
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: Real) -> Self {
        Self {
            common: self.common.with_notional(notional),
            ..*self
        }
    }

    /// Convert at `valuation`; `fx_fixings` holds FX rates (payment currency
    /// per unit of reference currency) keyed by fixing date.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fx_fixings: Option<&TimeSeries<Date, Real>>,
    ) -> Result<CouponDerivative> {
        check_payment_date(valuation, self.common.payment_date())?;
        let label = self.fx_label();
        match resolve(&label, self.fx_fixing_date, self.fx_fixing_date, valuation, fx_fixings)? {
            FixingStatus::Resolved(fx) => {
                tracing::debug!(fx = %label, rate = fx, "FX reset coupon collapsed to fixed");
                let reset = self.common.with_notional(self.common.notional() * fx);
                Ok(CouponDerivative::Fixed(fixed_derivative(&reset, valuation, self.rate)))
            }
            FixingStatus::Unresolved => Ok(CouponDerivative::FixedFxReset(CouponFixedFxReset {
                currency: self.common.currency(),
                reference_currency: self.reference_currency,
                payment_time: time_from(valuation, self.common.payment_date()),
                payment_year_fraction: self.common.payment_year_fraction(),
                notional: self.common.notional(),
                rate: self.rate,
                fx_fixing_time: time_from(valuation, self.fx_fixing_date),
                fx_delivery_time: time_from(valuation, self.fx_delivery_date),
            })),
        }
    }
}

impl Hash for CouponFixedFxResetDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.common.hash(state);
        hash_real(self.rate, state);
        self.reference_currency.code.hash(state);
        self.fx_fixing_date.hash(state);
        self.fx_delivery_date.hash(state);
    }
}
