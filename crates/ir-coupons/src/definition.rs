//! `CouponDefinition`: every coupon kind behind one type.

use crate::coupon::CouponCommon;
use crate::derivative::CouponDerivative;
use crate::fixed_rate_coupon::{
    CouponFixedAccruedCompoundingDefinition, CouponFixedDefinition, PaymentFixedDefinition,
};
use crate::fx_reset_coupon::CouponFixedFxResetDefinition;
use crate::ibor_average_coupon::CouponIborAverageDefinition;
use crate::ibor_compounding_coupon::{
    CouponIborCompoundingDefinition, CouponIborCompoundingFlatSpreadDefinition, CouponIborCompoundingSpreadDefinition,
};
use crate::ibor_coupon::CouponIborDefinition;
use crate::ibor_ratchet_coupon::CouponIborRatchetDefinition;
use crate::overnight_average_coupon::{
    CouponOvernightAverageDefinition, CouponOvernightAverageSpreadDefinition,
};
use crate::overnight_simplified_coupon::CouponOvernightSimplifiedDefinition;
use ir_core::errors::{Error, Result};
use ir_core::{Real, TimeSeries};
use ir_currencies::Currency;
use ir_time::Date;

/// A coupon (or single payment) described by calendar dates.
#[derive(Debug, Clone, PartialEq, Hash)]
pub enum CouponDefinition {
    /// Single known amount.
    FixedPayment(PaymentFixedDefinition),
    /// Simple fixed-rate coupon.
    Fixed(CouponFixedDefinition),
    /// Fixed rate compounded over sub-periods.
    FixedAccruedCompounding(CouponFixedAccruedCompoundingDefinition),
    /// Fixed rate with an FX-reset notional.
    FixedFxReset(CouponFixedFxResetDefinition),
    /// Single Ibor fixing.
    Ibor(CouponIborDefinition),
    /// Weighted average of Ibor fixings over one period.
    IborAverage(CouponIborAverageDefinition),
    /// Ibor fixings compounded over sub-periods.
    IborCompounding(CouponIborCompoundingDefinition),
    /// Ibor fixings plus spread compounded over sub-periods.
    IborCompoundingSpread(CouponIborCompoundingSpreadDefinition),
    /// Ibor fixings compounded over sub-periods with a flat spread.
    IborCompoundingFlatSpread(CouponIborCompoundingFlatSpreadDefinition),
    /// Ibor ratchet.
    IborRatchet(CouponIborRatchetDefinition),
    /// Arithmetic average of overnight fixings.
    OvernightAverage(CouponOvernightAverageDefinition),
    /// Arithmetic average of overnight fixings plus a spread.
    OvernightAverageSpread(CouponOvernightAverageSpreadDefinition),
    /// Compounded overnight fixings, simplified.
    OvernightSimplified(CouponOvernightSimplifiedDefinition),
}

macro_rules! impl_from_definition {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for CouponDefinition {
                fn from(coupon: $ty) -> Self {
                    CouponDefinition::$variant(coupon)
                }
            }
        )*
    };
}

impl_from_definition!(
    FixedPayment(PaymentFixedDefinition),
    Fixed(CouponFixedDefinition),
    FixedAccruedCompounding(CouponFixedAccruedCompoundingDefinition),
    FixedFxReset(CouponFixedFxResetDefinition),
    Ibor(CouponIborDefinition),
    IborAverage(CouponIborAverageDefinition),
    IborCompounding(CouponIborCompoundingDefinition),
    IborCompoundingSpread(CouponIborCompoundingSpreadDefinition),
    IborCompoundingFlatSpread(CouponIborCompoundingFlatSpreadDefinition),
    IborRatchet(CouponIborRatchetDefinition),
    OvernightAverage(CouponOvernightAverageDefinition),
    OvernightAverageSpread(CouponOvernightAverageSpreadDefinition),
    OvernightSimplified(CouponOvernightSimplifiedDefinition),
);

/// The accrual attributes of a coupon, or the fixed payment that has none.
enum Terms<'a> {
    Coupon(&'a CouponCommon),
    Payment(&'a PaymentFixedDefinition),
}

impl CouponDefinition {
    fn terms(&self) -> Terms<'_> {
        match self {
            CouponDefinition::FixedPayment(p) => Terms::Payment(p),
            CouponDefinition::Fixed(c) => Terms::Coupon(c.common()),
            CouponDefinition::FixedAccruedCompounding(c) => Terms::Coupon(c.common()),
            CouponDefinition::FixedFxReset(c) => Terms::Coupon(c.common()),
            CouponDefinition::Ibor(c) => Terms::Coupon(c.common()),
            CouponDefinition::IborAverage(c) => Terms::Coupon(c.common()),
            CouponDefinition::IborCompounding(c) => Terms::Coupon(c.common()),
            CouponDefinition::IborCompoundingSpread(c) => Terms::Coupon(c.common()),
            CouponDefinition::IborCompoundingFlatSpread(c) => Terms::Coupon(c.common()),
            CouponDefinition::IborRatchet(c) => Terms::Coupon(c.common()),
            CouponDefinition::OvernightAverage(c) => Terms::Coupon(c.common()),
            CouponDefinition::OvernightAverageSpread(c) => Terms::Coupon(c.common()),
            CouponDefinition::OvernightSimplified(c) => Terms::Coupon(c.common()),
        }
    }

    /// Accrual attributes; `None` for a fixed payment.
    pub fn common(&self) -> Option<&CouponCommon> {
        match self.terms() {
            Terms::Coupon(common) => Some(common),
            Terms::Payment(_) => None,
        }
    }

    /// Settlement currency.
    pub fn currency(&self) -> &'static Currency {
        match self.terms() {
            Terms::Coupon(common) => common.currency(),
            Terms::Payment(payment) => payment.currency(),
        }
    }

    /// Payment date.
    pub fn payment_date(&self) -> Date {
        match self.terms() {
            Terms::Coupon(common) => common.payment_date(),
            Terms::Payment(payment) => payment.payment_date(),
        }
    }

    /// Notional; `None` for a fixed payment.
    ///
    /// For an FX-reset coupon this is the notional in the reference
    /// currency.
    pub fn notional(&self) -> Option<Real> {
        self.common().map(CouponCommon::notional)
    }

    /// Accrual factor of the payment period; `None` for a fixed payment.
    pub fn payment_year_fraction(&self) -> Option<Real> {
        self.common().map(CouponCommon::payment_year_fraction)
    }

    /// Start of the accrual period; `None` for a fixed payment.
    pub fn accrual_start_date(&self) -> Option<Date> {
        self.common().map(CouponCommon::accrual_start_date)
    }

    /// End of the accrual period; `None` for a fixed payment.
    pub fn accrual_end_date(&self) -> Option<Date> {
        self.common().map(CouponCommon::accrual_end_date)
    }

    /// Same coupon with another notional.
    ///
    /// A fixed payment has no notional; use
    /// [`PaymentFixedDefinition::with_amount`] instead.
    pub fn with_notional(&self, notional: Real) -> Result<Self> {
        Ok(match self {
            CouponDefinition::FixedPayment(_) => {
                return Err(Error::InvalidArgument(
                    "a fixed payment has no notional".to_string(),
                ))
            }
            CouponDefinition::Fixed(c) => c.with_notional(notional).into(),
            CouponDefinition::FixedAccruedCompounding(c) => c.with_notional(notional).into(),
            CouponDefinition::FixedFxReset(c) => c.with_notional(notional).into(),
            CouponDefinition::Ibor(c) => c.with_notional(notional).into(),
            CouponDefinition::IborAverage(c) => c.with_notional(notional).into(),
            CouponDefinition::IborCompounding(c) => c.with_notional(notional).into(),
            CouponDefinition::IborCompoundingSpread(c) => c.with_notional(notional).into(),
            CouponDefinition::IborCompoundingFlatSpread(c) => c.with_notional(notional).into(),
            CouponDefinition::IborRatchet(c) => c.with_notional(notional).into(),
            CouponDefinition::OvernightAverage(c) => c.with_notional(notional).into(),
            CouponDefinition::OvernightAverageSpread(c) => c.with_notional(notional).into(),
            CouponDefinition::OvernightSimplified(c) => c.with_notional(notional).into(),
        })
    }

    /// Convert at `valuation`.
    ///
    /// `fixings` is the historical series of the coupon's index; for an
    /// FX-reset coupon it is the series of FX rates. Fixed coupons ignore it.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fixings: Option<&TimeSeries<Date, Real>>,
    ) -> Result<CouponDerivative> {
        match self {
            CouponDefinition::FixedPayment(c) => c.to_derivative(valuation),
            CouponDefinition::Fixed(c) => c.to_derivative(valuation),
            CouponDefinition::FixedAccruedCompounding(c) => c.to_derivative(valuation),
            CouponDefinition::FixedFxReset(c) => c.to_derivative(valuation, fixings),
            CouponDefinition::Ibor(c) => c.to_derivative(valuation, fixings),
            CouponDefinition::IborAverage(c) => c.to_derivative(valuation, fixings),
            CouponDefinition::IborCompounding(c) => c.to_derivative(valuation, fixings),
            CouponDefinition::IborCompoundingSpread(c) => c.to_derivative(valuation, fixings),
            CouponDefinition::IborCompoundingFlatSpread(c) => c.to_derivative(valuation, fixings),
            CouponDefinition::IborRatchet(c) => c.to_derivative(valuation, fixings),
            CouponDefinition::OvernightAverage(c) => c.to_derivative(valuation, fixings),
            CouponDefinition::OvernightAverageSpread(c) => c.to_derivative(valuation, fixings),
            CouponDefinition::OvernightSimplified(c) => c.to_derivative(valuation, fixings),
        }
    }
}
