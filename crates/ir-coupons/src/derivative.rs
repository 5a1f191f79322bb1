//! Time-denominated coupons produced by conversion.
//!
//! Every date of a definition becomes a signed time in years from the
//! valuation date. Fixed derivatives know their amount; floating ones carry
//! the accrued, already-fixed part and the data a pricing engine needs to
//! forecast the rest.

use ir_core::{Rate, Real, Spread, Time};
use ir_currencies::Currency;
use ir_indexes::{IborIndex, OvernightIndex};
use std::sync::Arc;

/// A single known amount paid at `payment_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentFixed {
    /// Settlement currency.
    pub currency: &'static Currency,
    /// Payment time.
    pub payment_time: Time,
    /// Signed amount.
    pub amount: Real,
}

/// A coupon at a known rate: `notional × rate × payment_year_fraction`.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponFixed {
    /// Settlement currency.
    pub currency: &'static Currency,
    /// Payment time.
    pub payment_time: Time,
    /// Accrual factor of the coupon.
    pub payment_year_fraction: Real,
    /// Notional.
    pub notional: Real,
    /// Fixed rate.
    pub rate: Rate,
}

impl CouponFixed {
    /// Paid amount.
    pub fn amount(&self) -> Real {
        self.notional * self.rate * self.payment_year_fraction
    }
}

/// A fixed rate compounded over the payment year fraction:
/// `notional × (1 + rate)^payment_year_fraction`.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponFixedAccruedCompounding {
    /// Settlement currency.
    pub currency: &'static Currency,
    /// Payment time.
    pub payment_time: Time,
    /// Sum of the sub-period accrual factors.
    pub payment_year_fraction: Real,
    /// Notional.
    pub notional: Real,
    /// Fixed rate.
    pub rate: Rate,
}

impl CouponFixedAccruedCompounding {
    /// Paid amount.
    pub fn amount(&self) -> Real {
        self.notional * (1.0 + self.rate).powf(self.payment_year_fraction)
    }
}

/// A fixed coupon whose notional, expressed in a reference currency, still
/// has to be converted at a future FX fixing.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponFixedFxReset {
    /// Payment currency.
    pub currency: &'static Currency,
    /// Currency of the notional.
    pub reference_currency: &'static Currency,
    /// Payment time.
    pub payment_time: Time,
    /// Accrual factor of the coupon.
    pub payment_year_fraction: Real,
    /// Notional in the reference currency.
    pub notional: Real,
    /// Fixed rate.
    pub rate: Rate,
    /// Time of the FX fixing.
    pub fx_fixing_time: Time,
    /// Time of delivery of the FX fixing.
    pub fx_delivery_time: Time,
}

impl CouponFixedFxReset {
    /// Amount in the reference currency, before FX conversion.
    pub fn reference_amount(&self) -> Real {
        self.notional * self.rate * self.payment_year_fraction
    }
}

/// An Ibor coupon whose fixing is not known yet.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIbor {
    /// Settlement currency.
    pub currency: &'static Currency,
    /// Payment time.
    pub payment_time: Time,
    /// Accrual factor of the coupon.
    pub payment_year_fraction: Real,
    /// Notional.
    pub notional: Real,
    /// Index to forecast.
    pub index: Arc<IborIndex>,
    /// Time of the fixing.
    pub fixing_time: Time,
    /// Start time of the fixing period.
    pub fixing_period_start_time: Time,
    /// End time of the fixing period.
    pub fixing_period_end_time: Time,
    /// Index accrual factor of the fixing period.
    pub fixing_accrual_factor: Real,
    /// Spread over the index.
    pub spread: Spread,
}

/// A weighted average of Ibor fixings over one accrual period.
///
/// The paid rate is `rate_accrued + Σ weights[i] × forecast[i]` over the
/// remaining observations.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborAverage {
    /// Settlement currency.
    pub currency: &'static Currency,
    /// Payment time.
    pub payment_time: Time,
    /// Accrual factor of the coupon.
    pub payment_year_fraction: Real,
    /// Notional.
    pub notional: Real,
    /// Index to forecast.
    pub index: Arc<IborIndex>,
    /// Weighted sum of the resolved fixings.
    pub rate_accrued: Rate,
    /// Fixing times of the unresolved observations.
    pub fixing_times: Vec<Time>,
    /// Weights of the unresolved observations.
    pub weights: Vec<Real>,
    /// Fixing-period start times of the unresolved observations.
    pub fixing_period_start_times: Vec<Time>,
    /// Fixing-period end times of the unresolved observations.
    pub fixing_period_end_times: Vec<Time>,
    /// Index accrual factors of the unresolved observations.
    pub fixing_accrual_factors: Vec<Real>,
}

/// Ibor rates compounded over the remaining sub-periods.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborCompounding {
    /// Settlement currency.
    pub currency: &'static Currency,
    /// Payment time.
    pub payment_time: Time,
    /// Accrual factor of the coupon.
    pub payment_year_fraction: Real,
    /// Notional.
    pub notional: Real,
    /// Notional compounded over the sub-periods already fixed.
    pub notional_accrued: Real,
    /// Index to forecast.
    pub index: Arc<IborIndex>,
    /// Payment accrual factors of the remaining sub-periods.
    pub payment_accrual_factors: Vec<Real>,
    /// Fixing times of the remaining sub-periods.
    pub fixing_times: Vec<Time>,
    /// Fixing-period start times of the remaining sub-periods.
    pub fixing_period_start_times: Vec<Time>,
    /// Fixing-period end times of the remaining sub-periods.
    pub fixing_period_end_times: Vec<Time>,
    /// Index accrual factors of the remaining sub-periods.
    pub fixing_accrual_factors: Vec<Real>,
}

/// Ibor rates plus a spread compounded over the remaining sub-periods.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborCompoundingSpread {
    /// The remaining sub-periods; the accrued notional includes the spread.
    pub compounding: CouponIborCompounding,
    /// Spread added to each fixing.
    pub spread: Spread,
}

/// Ibor rates compounded over the remaining sub-periods with a flat spread.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborCompoundingFlatSpread {
    /// The remaining sub-periods; the accrued notional is the notional.
    pub compounding: CouponIborCompounding,
    /// Amount accumulated over the sub-periods already fixed.
    pub compounding_period_amount_accumulated: Real,
    /// Spread accrued simply in each sub-period.
    pub spread: Spread,
}

/// An Ibor ratchet coupon.
///
/// The rate depends on the previous coupon's rate, which only the pricing
/// engine knows, so the coefficients are carried unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborRatchet {
    /// Settlement currency.
    pub currency: &'static Currency,
    /// Payment time.
    pub payment_time: Time,
    /// Accrual factor of the coupon.
    pub payment_year_fraction: Real,
    /// Notional.
    pub notional: Real,
    /// Index observed.
    pub index: Arc<IborIndex>,
    /// Time of the fixing.
    pub fixing_time: Time,
    /// Start time of the fixing period.
    pub fixing_period_start_time: Time,
    /// End time of the fixing period.
    pub fixing_period_end_time: Time,
    /// Index accrual factor of the fixing period.
    pub fixing_accrual_factor: Real,
    /// Main coefficients: prior rate, index fixing, constant.
    pub main: [Real; 3],
    /// Floor coefficients.
    pub floor: [Real; 3],
    /// Cap coefficients.
    pub cap: [Real; 3],
    /// The index fixing, when already known.
    pub index_fixing: Option<Rate>,
}

impl CouponIborRatchet {
    /// Coupon rate for a prior coupon rate and an index fixing:
    /// the main formula floored, then capped.
    pub fn rate(&self, prior_coupon_rate: Rate, index_fixing: Rate) -> Rate {
        let linear = |c: &[Real; 3]| c[0] * prior_coupon_rate + c[1] * index_fixing + c[2];
        linear(&self.main).max(linear(&self.floor)).min(linear(&self.cap))
    }

    /// Coupon rate using the stored index fixing; `None` while it is unknown.
    pub fn rate_with_prior(&self, prior_coupon_rate: Rate) -> Option<Rate> {
        self.index_fixing
            .map(|fixing| self.rate(prior_coupon_rate, fixing))
    }
}

/// Arithmetic average of overnight rates with the fixed part accrued.
///
/// The paid amount is
/// `notional × (rate_accrued + Σ forecast[i] × fixing_accrual_factors[i]) + spread_amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponOvernightArithmeticAverage {
    /// Settlement currency.
    pub currency: &'static Currency,
    /// Payment time.
    pub payment_time: Time,
    /// Accrual factor of the coupon.
    pub payment_year_fraction: Real,
    /// Notional.
    pub notional: Real,
    /// Index to forecast.
    pub index: Arc<OvernightIndex>,
    /// Boundaries of the remaining daily periods, including the end.
    pub fixing_period_times: Vec<Time>,
    /// Index accrual factors of the remaining daily periods.
    pub fixing_accrual_factors: Vec<Real>,
    /// `Σ rate × factor` over the fixed daily periods.
    pub rate_accrued: Rate,
    /// Spread over the average.
    pub spread: Spread,
    /// `spread × payment_year_fraction × notional`.
    pub spread_amount: Real,
}

/// Overnight coupon whose remaining part is forecast as a single period.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponOvernightSimplified {
    /// Settlement currency.
    pub currency: &'static Currency,
    /// Payment time.
    pub payment_time: Time,
    /// Accrual factor of the coupon.
    pub payment_year_fraction: Real,
    /// Notional.
    pub notional: Real,
    /// Index to forecast.
    pub index: Arc<OvernightIndex>,
    /// Start time of the part still to be fixed.
    pub fixing_period_start_time: Time,
    /// End time of the fixing period.
    pub fixing_period_end_time: Time,
    /// Index accrual factor of the part still to be fixed.
    pub fixing_period_year_fraction: Real,
    /// Notional compounded over the fixed daily periods.
    pub notional_accrued: Real,
}

/// A coupon converted at a valuation date.
#[derive(Debug, Clone, PartialEq)]
pub enum CouponDerivative {
    /// Known single amount.
    FixedPayment(PaymentFixed),
    /// Known rate.
    Fixed(CouponFixed),
    /// Known rate, compounded.
    FixedAccruedCompounding(CouponFixedAccruedCompounding),
    /// Known rate, FX fixing pending.
    FixedFxReset(CouponFixedFxReset),
    /// Single Ibor fixing pending.
    Ibor(CouponIbor),
    /// Ibor average with observations pending.
    IborAverage(CouponIborAverage),
    /// Ibor compounding with sub-periods pending.
    IborCompounding(CouponIborCompounding),
    /// Ibor compounding plus spread with sub-periods pending.
    IborCompoundingSpread(CouponIborCompoundingSpread),
    /// Ibor compounding with flat spread and sub-periods pending.
    IborCompoundingFlatSpread(CouponIborCompoundingFlatSpread),
    /// Ibor ratchet.
    IborRatchet(CouponIborRatchet),
    /// Overnight arithmetic average with daily fixings pending.
    OvernightArithmeticAverage(CouponOvernightArithmeticAverage),
    /// Overnight coupon with fixings pending.
    OvernightSimplified(CouponOvernightSimplified),
}

impl CouponDerivative {
    /// Payment time.
    pub fn payment_time(&self) -> Time {
        match self {
            CouponDerivative::FixedPayment(c) => c.payment_time,
            CouponDerivative::Fixed(c) => c.payment_time,
            CouponDerivative::FixedAccruedCompounding(c) => c.payment_time,
            CouponDerivative::FixedFxReset(c) => c.payment_time,
            CouponDerivative::Ibor(c) => c.payment_time,
            CouponDerivative::IborAverage(c) => c.payment_time,
            CouponDerivative::IborCompounding(c) => c.payment_time,
            CouponDerivative::IborCompoundingSpread(c) => c.compounding.payment_time,
            CouponDerivative::IborCompoundingFlatSpread(c) => c.compounding.payment_time,
            CouponDerivative::IborRatchet(c) => c.payment_time,
            CouponDerivative::OvernightArithmeticAverage(c) => c.payment_time,
            CouponDerivative::OvernightSimplified(c) => c.payment_time,
        }
    }

    /// Settlement currency.
    pub fn currency(&self) -> &'static Currency {
        match self {
            CouponDerivative::FixedPayment(c) => c.currency,
            CouponDerivative::Fixed(c) => c.currency,
            CouponDerivative::FixedAccruedCompounding(c) => c.currency,
            CouponDerivative::FixedFxReset(c) => c.currency,
            CouponDerivative::Ibor(c) => c.currency,
            CouponDerivative::IborAverage(c) => c.currency,
            CouponDerivative::IborCompounding(c) => c.currency,
            CouponDerivative::IborCompoundingSpread(c) => c.compounding.currency,
            CouponDerivative::IborCompoundingFlatSpread(c) => c.compounding.currency,
            CouponDerivative::IborRatchet(c) => c.currency,
            CouponDerivative::OvernightArithmeticAverage(c) => c.currency,
            CouponDerivative::OvernightSimplified(c) => c.currency,
        }
    }

    /// Paid amount, for the derivatives whose amount is already known.
    pub fn fixed_amount(&self) -> Option<Real> {
        match self {
            CouponDerivative::FixedPayment(c) => Some(c.amount),
            CouponDerivative::Fixed(c) => Some(c.amount()),
            CouponDerivative::FixedAccruedCompounding(c) => Some(c.amount()),
            _ => None,
        }
    }

    /// The fixed coupon, if this derivative collapsed to one.
    pub fn as_fixed(&self) -> Option<&CouponFixed> {
        match self {
            CouponDerivative::Fixed(c) => Some(c),
            _ => None,
        }
    }
}
