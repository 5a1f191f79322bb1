//! Fixed coupons: a single fixed payment, a simple fixed-rate coupon, and a
//! fixed rate compounded over sub-periods.

use crate::coupon::{hash_real, hash_reals, CouponCommon};
use crate::derivative::{CouponDerivative, CouponFixed, CouponFixedAccruedCompounding, PaymentFixed};
use crate::fixing::{check_payment_date, time_from};
use ir_core::errors::{Error, Result};
use ir_core::{ensure, ensure_same_len, Rate, Real};
use ir_currencies::Currency;
use ir_time::{
    adjusted_date_schedule, start_dates, BusinessDayConvention, Calendar, Date, DayCounter, Period,
    StubType,
};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// ────────────────────────────────────────────────────────────────────────────
// PaymentFixedDefinition
// ────────────────────────────────────────────────────────────────────────────

/// A known signed amount paid on a date. No accrual, no notional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentFixedDefinition {
    currency: &'static Currency,
    payment_date: Date,
    amount: Real,
}

impl PaymentFixedDefinition {
    /// Create a fixed payment.
    pub fn new(currency: &'static Currency, payment_date: Date, amount: Real) -> Self {
        Self {
            currency,
            payment_date,
            amount,
        }
    }

    /// Settlement currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Payment date.
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Signed amount.
    pub fn amount(&self) -> Real {
        self.amount
    }

    /// Same payment with another amount.
    pub fn with_amount(&self, amount: Real) -> Self {
        Self { amount, ..*self }
    }

    /// Convert at `valuation`.
    pub fn to_derivative(&self, valuation: Date) -> Result<CouponDerivative> {
        check_payment_date(valuation, self.payment_date)?;
        Ok(CouponDerivative::FixedPayment(PaymentFixed {
            currency: self.currency,
            payment_time: time_from(valuation, self.payment_date),
            amount: self.amount,
        }))
    }
}

impl Hash for PaymentFixedDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.currency.code.hash(state);
        self.payment_date.hash(state);
        hash_real(self.amount, state);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CouponFixedDefinition
// ────────────────────────────────────────────────────────────────────────────

/// A coupon paying `notional × rate × payment_year_fraction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouponFixedDefinition {
    common: CouponCommon,
    rate: Rate,
}

impl CouponFixedDefinition {
    /// Create a fixed coupon from explicit dates and accrual factor.
    pub fn new(
        currency: &'static Currency,
        payment_date: Date,
        accrual_start_date: Date,
        accrual_end_date: Date,
        payment_year_fraction: Real,
        notional: Real,
        rate: Rate,
    ) -> Self {
        Self {
            common: CouponCommon::new(
                currency,
                payment_date,
                accrual_start_date,
                accrual_end_date,
                payment_year_fraction,
                notional,
            ),
            rate,
        }
    }

    /// Create a fixed coupon, computing the accrual factor with `day_counter`.
    pub fn from(
        currency: &'static Currency,
        payment_date: Date,
        accrual_start_date: Date,
        accrual_end_date: Date,
        day_counter: &dyn DayCounter,
        notional: Real,
        rate: Rate,
    ) -> Self {
        let payment_year_fraction = day_counter.year_fraction(accrual_start_date, accrual_end_date);
        Self::new(
            currency,
            payment_date,
            accrual_start_date,
            accrual_end_date,
            payment_year_fraction,
            notional,
            rate,
        )
    }

    /// Common coupon attributes.
    pub fn common(&self) -> &CouponCommon {
        &self.common
    }

    /// Fixed rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Paid amount.
    pub fn amount(&self) -> Real {
        self.common.notional() * self.rate * self.common.payment_year_fraction()
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: Real) -> Self {
        Self {
            common: self.common.with_notional(notional),
            ..*self
        }
    }

    /// Convert at `valuation`.
    pub fn to_derivative(&self, valuation: Date) -> Result<CouponDerivative> {
        check_payment_date(valuation, self.common.payment_date())?;
        Ok(CouponDerivative::Fixed(fixed_derivative(&self.common, valuation, self.rate)))
    }
}

impl Hash for CouponFixedDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.common.hash(state);
        hash_real(self.rate, state);
    }
}

/// The fixed derivative a floating coupon collapses to once its rate is known.
pub(crate) fn fixed_derivative(common: &CouponCommon, valuation: Date, rate: Rate) -> CouponFixed {
    CouponFixed {
        currency: common.currency(),
        payment_time: time_from(valuation, common.payment_date()),
        payment_year_fraction: common.payment_year_fraction(),
        notional: common.notional(),
        rate,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CouponFixedAccruedCompoundingDefinition
// ────────────────────────────────────────────────────────────────────────────

/// A fixed rate compounded over sub-periods:
/// `notional × (1 + rate)^payment_year_fraction`, where the payment year
/// fraction is the sum of the sub-period accrual factors.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponFixedAccruedCompoundingDefinition {
    common: CouponCommon,
    rate: Rate,
    accrual_start_dates: Arc<[Date]>,
    accrual_end_dates: Arc<[Date]>,
    accrual_factors: Arc<[Real]>,
}

impl CouponFixedAccruedCompoundingDefinition {
    /// Create the coupon from explicit sub-periods.
    ///
    /// The three arrays must have the same, non-zero length and every
    /// accrual factor must be non-negative.
    pub fn new(
        currency: &'static Currency,
        payment_date: Date,
        accrual_start_dates: impl Into<Arc<[Date]>>,
        accrual_end_dates: impl Into<Arc<[Date]>>,
        accrual_factors: impl Into<Arc<[Real]>>,
        notional: Real,
        rate: Rate,
    ) -> Result<Self> {
        let accrual_start_dates = accrual_start_dates.into();
        let accrual_end_dates = accrual_end_dates.into();
        let accrual_factors = accrual_factors.into();
        ensure_same_len!(accrual_start_dates, "accrual start dates", accrual_end_dates, "accrual end dates");
        ensure_same_len!(accrual_start_dates, "accrual start dates", accrual_factors, "accrual factors");
        let (Some(&start), Some(&end)) = (accrual_start_dates.first(), accrual_end_dates.last()) else {
            return Err(Error::MissingField("accrual start dates"));
        };
        check_accrual_factors(&accrual_factors)?;
        let payment_year_fraction = accrual_factors.iter().sum();
        Ok(Self {
            common: CouponCommon::new(currency, payment_date, start, end, payment_year_fraction, notional),
            rate,
            accrual_start_dates,
            accrual_end_dates,
            accrual_factors,
        })
    }

    /// Build the sub-periods between `accrual_start_date` and
    /// `accrual_end_date` with step `period`, short final stub.
    #[allow(clippy::too_many_arguments)]
    pub fn from(
        currency: &'static Currency,
        payment_date: Date,
        accrual_start_date: Date,
        accrual_end_date: Date,
        period: Period,
        day_counter: &dyn DayCounter,
        notional: Real,
        rate: Rate,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
    ) -> Result<Self> {
        let ends = adjusted_date_schedule(
            accrual_start_date,
            accrual_end_date,
            period,
            StubType::ShortEnd,
            convention,
            calendar,
            false,
        )?;
        let starts = start_dates(accrual_start_date, &ends);
        let factors: Vec<Real> = starts
            .iter()
            .zip(&ends)
            .map(|(s, e)| day_counter.year_fraction(*s, *e))
            .collect();
        Self::new(currency, payment_date, starts, ends, factors, notional, rate)
    }

    /// Common coupon attributes.
    pub fn common(&self) -> &CouponCommon {
        &self.common
    }

    /// Fixed rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Start dates of the sub-periods.
    pub fn accrual_start_dates(&self) -> &Arc<[Date]> {
        &self.accrual_start_dates
    }

    /// End dates of the sub-periods.
    pub fn accrual_end_dates(&self) -> &Arc<[Date]> {
        &self.accrual_end_dates
    }

    /// Accrual factors of the sub-periods.
    pub fn accrual_factors(&self) -> &Arc<[Real]> {
        &self.accrual_factors
    }

    /// Paid amount.
    pub fn amount(&self) -> Real {
        self.common.notional() * (1.0 + self.rate).powf(self.common.payment_year_fraction())
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: Real) -> Self {
        Self {
            common: self.common.with_notional(notional),
            ..self.clone()
        }
    }

    /// Convert at `valuation`.
    pub fn to_derivative(&self, valuation: Date) -> Result<CouponDerivative> {
        check_payment_date(valuation, self.common.payment_date())?;
        Ok(CouponDerivative::FixedAccruedCompounding(CouponFixedAccruedCompounding {
            currency: self.common.currency(),
            payment_time: time_from(valuation, self.common.payment_date()),
            payment_year_fraction: self.common.payment_year_fraction(),
            notional: self.common.notional(),
            rate: self.rate,
        }))
    }
}

impl Hash for CouponFixedAccruedCompoundingDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.common.hash(state);
        hash_real(self.rate, state);
        self.accrual_start_dates.hash(state);
        self.accrual_end_dates.hash(state);
        hash_reals(&self.accrual_factors, state);
    }
}

/// Fail unless the payment year fraction is positive. Coupons that turn an
/// accrued amount back into a rate divide by it.
pub(crate) fn check_year_fraction(payment_year_fraction: Real) -> Result<()> {
    ensure!(
        payment_year_fraction > 0.0,
        "payment year fraction should be positive, got {payment_year_fraction}"
    );
    Ok(())
}

/// Fail on the first negative accrual factor.
pub(crate) fn check_accrual_factors(factors: &[Real]) -> Result<()> {
    match factors.iter().position(|f| *f < 0.0) {
        Some(index) => Err(Error::InvalidAccrualFactor {
            index,
            factor: factors[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ir_currencies::EUR;
    use ir_time::{Actual360, WeekendsOnly};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn fixed_amount_and_notional() {
        let c = CouponFixedDefinition::from(
            &EUR,
            date(2012, 3, 9),
            date(2011, 12, 9),
            date(2012, 3, 9),
            &Actual360,
            1_000_000.0,
            0.04,
        );
        assert_relative_eq!(c.common().payment_year_fraction(), 91.0 / 360.0, epsilon = 1e-15);
        assert_relative_eq!(c.amount(), 1_000_000.0 * 0.04 * 91.0 / 360.0, epsilon = 1e-8);
        assert_relative_eq!(c.with_notional(-2_000_000.0).amount(), -2.0 * c.amount(), epsilon = 1e-8);
    }

    #[test]
    fn compounding_sums_the_factors() {
        let c = CouponFixedAccruedCompoundingDefinition::from(
            &EUR,
            date(2012, 9, 10),
            date(2011, 9, 9),
            date(2012, 9, 9),
            Period::months(3),
            &Actual360,
            1_000_000.0,
            0.03,
            &WeekendsOnly,
            BusinessDayConvention::ModifiedFollowing,
        )
        .unwrap();
        assert_eq!(c.accrual_factors().len(), 4);
        let sum: Real = c.accrual_factors().iter().sum();
        assert_relative_eq!(c.common().payment_year_fraction(), sum, epsilon = 1e-10);
        assert_eq!(c.common().accrual_end_date(), date(2012, 9, 10));
    }

    #[test]
    fn compounding_rejects_bad_sub_periods() {
        let d = date(2011, 9, 9);
        let negative = CouponFixedAccruedCompoundingDefinition::new(
            &EUR,
            d + 60,
            vec![d, d + 30],
            vec![d + 30, d + 60],
            vec![0.08, -0.01],
            1.0,
            0.03,
        );
        assert!(matches!(negative, Err(Error::InvalidAccrualFactor { index: 1, .. })));

        let ragged = CouponFixedAccruedCompoundingDefinition::new(
            &EUR,
            d + 60,
            vec![d, d + 30],
            vec![d + 30],
            vec![0.08, 0.08],
            1.0,
            0.03,
        );
        assert!(matches!(ragged, Err(Error::LengthMismatch { .. })));

        let empty = CouponFixedAccruedCompoundingDefinition::new(
            &EUR,
            d,
            Vec::<Date>::new(),
            Vec::<Date>::new(),
            Vec::<Real>::new(),
            1.0,
            0.03,
        );
        assert!(matches!(empty, Err(Error::MissingField(_))));
    }
}
