//! Fixed coupons: fixed payment, simple fixed, accrued compounding and the
//! FX-reset coupon.

use approx::assert_relative_eq;
use ir_core::errors::Error;
use ir_core::{Real, TimeSeries};
use ir_coupons::{
    CouponDefinition, CouponDerivative, CouponFixedAccruedCompoundingDefinition, CouponFixedDefinition,
    CouponFixedFxResetDefinition, PaymentFixedDefinition,
};
use ir_currencies::{EUR, USD};
use ir_time::{Actual360, BusinessDayConvention, Date, Period, WeekendsOnly};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn fx_reset() -> CouponFixedFxResetDefinition {
    CouponFixedFxResetDefinition::new(
        &USD,
        date(2011, 12, 9),
        date(2011, 9, 9),
        date(2011, 12, 9),
        0.267,
        1_000_000.0,
        0.04,
        &EUR,
        date(2011, 9, 7),
        date(2011, 9, 9),
    )
    .unwrap()
}

#[test]
fn fixed_payment_projects_its_amount() {
    let payment = PaymentFixedDefinition::new(&USD, date(2011, 12, 9), -250_000.0);
    let derivative = CouponDefinition::from(payment)
        .to_derivative(date(2011, 9, 9), None)
        .unwrap();
    assert_eq!(derivative.fixed_amount(), Some(-250_000.0));
    assert_relative_eq!(derivative.payment_time(), 91.0 / 365.0, epsilon = 1e-15);
}

#[test]
fn fixed_coupon_ignores_the_series() {
    let coupon = CouponFixedDefinition::new(
        &EUR,
        date(2011, 12, 9),
        date(2011, 9, 9),
        date(2011, 12, 9),
        0.25,
        1_000_000.0,
        0.03,
    );
    let series = TimeSeries::new().with(date(2011, 9, 7), 1.5);
    let derivative = CouponDefinition::from(coupon)
        .to_derivative(date(2011, 12, 9), Some(&series))
        .unwrap();
    assert_relative_eq!(derivative.fixed_amount().unwrap(), 7_500.0, epsilon = 1e-8);
    assert_eq!(derivative.payment_time(), 0.0);
}

#[test]
fn fixed_compounding_pays_the_compounded_notional() {
    let d = date(2011, 9, 9);
    let coupon = CouponFixedAccruedCompoundingDefinition::new(
        &EUR,
        d + 365,
        vec![d, d + 180],
        vec![d + 180, d + 365],
        vec![0.5, 0.5],
        1_000_000.0,
        0.03,
    )
    .unwrap();
    let sum: Real = coupon.accrual_factors().iter().sum();
    assert_relative_eq!(coupon.common().payment_year_fraction(), sum, epsilon = 1e-10);

    match coupon.to_derivative(d).unwrap() {
        CouponDerivative::FixedAccruedCompounding(c) => {
            assert_relative_eq!(c.amount(), 1_000_000.0 * 1.03, epsilon = 1e-6);
            assert_relative_eq!(c.payment_time, 1.0, epsilon = 1e-15);
        }
        other => panic!("expected a compounding fixed coupon, got {other:?}"),
    }
}

#[test]
fn fixed_compounding_builder_is_the_manual_coupon() {
    let built = CouponFixedAccruedCompoundingDefinition::from(
        &EUR,
        date(2012, 3, 9),
        date(2011, 9, 9),
        date(2012, 3, 9),
        Period::months(3),
        &Actual360,
        1_000_000.0,
        0.03,
        &WeekendsOnly,
        BusinessDayConvention::ModifiedFollowing,
    )
    .unwrap();
    let manual = CouponFixedAccruedCompoundingDefinition::new(
        &EUR,
        date(2012, 3, 9),
        vec![date(2011, 9, 9), date(2011, 12, 9)],
        vec![date(2011, 12, 9), date(2012, 3, 9)],
        vec![91.0 / 360.0, 91.0 / 360.0],
        1_000_000.0,
        0.03,
    )
    .unwrap();
    assert_eq!(built, manual);
    assert_eq!(hash_of(&built), hash_of(&manual));
}

#[test]
fn fx_reset_collapses_once_the_fx_rate_is_known() {
    let fx = TimeSeries::new().with(date(2011, 9, 7), 1.40);
    let derivative = CouponDefinition::from(fx_reset())
        .to_derivative(date(2011, 9, 8), Some(&fx))
        .unwrap();
    let fixed = derivative.as_fixed().expect("the FX fixing is known");
    assert_eq!(fixed.currency, &USD);
    assert_relative_eq!(fixed.notional, 1_400_000.0, epsilon = 1e-8);
    assert_relative_eq!(fixed.amount(), 1_000_000.0 * 1.40 * 0.04 * 0.267, epsilon = 1e-8);
}

#[test]
fn fx_reset_keeps_the_reference_currency_until_fixing() {
    match fx_reset().to_derivative(date(2011, 9, 6), None).unwrap() {
        CouponDerivative::FixedFxReset(c) => {
            assert_eq!(c.currency, &USD);
            assert_eq!(c.reference_currency, &EUR);
            assert_eq!(c.notional, 1_000_000.0);
            assert_eq!(c.fx_fixing_time, 1.0 / 365.0);
            assert_eq!(c.fx_delivery_time, 3.0 / 365.0);
        }
        other => panic!("expected an FX-reset coupon, got {other:?}"),
    }
    // fixing day, rate not yet published
    assert!(matches!(
        fx_reset().to_derivative(date(2011, 9, 7), None).unwrap(),
        CouponDerivative::FixedFxReset(_)
    ));
    assert!(matches!(
        fx_reset().to_derivative(date(2011, 9, 8), None),
        Err(Error::MissingFixing { .. })
    ));
}

#[test]
fn fx_reset_validates_its_currencies_and_dates() {
    let same = CouponFixedFxResetDefinition::new(
        &USD,
        date(2011, 12, 9),
        date(2011, 9, 9),
        date(2011, 12, 9),
        0.25,
        1.0,
        0.04,
        &USD,
        date(2011, 9, 7),
        date(2011, 9, 9),
    );
    assert!(matches!(same, Err(Error::Precondition(_))));

    let reversed = CouponFixedFxResetDefinition::new(
        &USD,
        date(2011, 12, 9),
        date(2011, 9, 9),
        date(2011, 12, 9),
        0.25,
        1.0,
        0.04,
        &EUR,
        date(2011, 9, 9),
        date(2011, 9, 7),
    );
    assert!(reversed.is_err());
    assert_eq!(fx_reset().fx_label(), "EUR/USD");
}

#[test]
fn fixed_coupons_reject_a_past_payment_date() {
    let coupon = CouponFixedDefinition::from(
        &EUR,
        date(2011, 12, 9),
        date(2011, 9, 9),
        date(2011, 12, 9),
        &Actual360,
        1.0,
        0.03,
    );
    assert!(matches!(
        coupon.to_derivative(date(2011, 12, 12)),
        Err(Error::PastPaymentDate { .. })
    ));
}
