//! Properties every coupon definition keeps: `with_notional` changes only
//! the notional, equal coupons hash equally, and no coupon converts after
//! its payment date.

use ir_core::errors::Error;
use ir_core::TimeSeries;
use ir_coupons::{
    CouponDefinition, CouponFixedAccruedCompoundingDefinition, CouponFixedDefinition, CouponFixedFxResetDefinition,
    CouponIborAverageDefinition, CouponIborCompoundingDefinition, CouponIborCompoundingFlatSpreadDefinition,
    CouponIborCompoundingSpreadDefinition, CouponIborDefinition, CouponIborRatchetDefinition,
    CouponOvernightAverageDefinition, CouponOvernightAverageSpreadDefinition, CouponOvernightSimplifiedDefinition,
    PaymentFixedDefinition,
};
use ir_currencies::{EUR, USD};
use ir_indexes::{fed_fund, usd_libor};
use ir_time::{Actual360, BusinessDayConvention, Date, Period, StubType, WeekendsOnly};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn hash_of(coupon: &CouponDefinition) -> u64 {
    let mut hasher = DefaultHasher::new();
    coupon.hash(&mut hasher);
    hasher.finish()
}

/// One coupon of every kind, built with the `from` builders where they exist.
fn every_coupon(notional: f64) -> Vec<CouponDefinition> {
    let libor = Arc::new(usd_libor(Period::months(3)));
    let fed = Arc::new(fed_fund());
    let cal = WeekendsOnly;
    let conv = BusinessDayConvention::ModifiedFollowing;
    let start = date(2011, 9, 7);
    let end = date(2011, 12, 7);
    vec![
        PaymentFixedDefinition::new(&USD, end, notional).into(),
        CouponFixedDefinition::from(&USD, end, start, end, &Actual360, notional, 0.02).into(),
        CouponFixedAccruedCompoundingDefinition::from(
            &USD,
            end,
            start,
            end,
            Period::months(1),
            &Actual360,
            notional,
            0.02,
            &cal,
            conv,
        )
        .unwrap()
        .into(),
        CouponFixedFxResetDefinition::new(&USD, end, start, end, 0.25, notional, 0.02, &EUR, start, start + 2)
            .unwrap()
            .into(),
        CouponIborDefinition::from(start, end, end, notional, Arc::clone(&libor), 0.001, &cal)
            .unwrap()
            .into(),
        CouponIborAverageDefinition::from(
            Arc::clone(&libor),
            start,
            Period::months(3),
            notional,
            2,
            conv,
            false,
            Period::months(1),
            vec![0.3, 0.3, 0.4],
            &cal,
        )
        .unwrap()
        .into(),
        CouponIborCompoundingDefinition::from_tenor(
            notional,
            start,
            Period::months(6),
            Arc::clone(&libor),
            StubType::ShortStart,
            conv,
            false,
            &cal,
        )
        .unwrap()
        .into(),
        CouponIborCompoundingSpreadDefinition::from_tenor(
            notional,
            start,
            Period::months(6),
            Arc::clone(&libor),
            StubType::ShortStart,
            conv,
            false,
            0.001,
            &cal,
        )
        .unwrap()
        .into(),
        CouponIborCompoundingFlatSpreadDefinition::from_tenor(
            notional,
            start,
            Period::months(6),
            Arc::clone(&libor),
            StubType::ShortStart,
            conv,
            false,
            0.001,
            &cal,
        )
        .unwrap()
        .into(),
        CouponIborRatchetDefinition::from(
            start,
            end,
            end,
            notional,
            Arc::clone(&libor),
            [0.5, 0.5, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.05],
            &cal,
        )
        .unwrap()
        .into(),
        CouponOvernightAverageDefinition::from(Arc::clone(&fed), start, end, notional, 1, &cal)
            .unwrap()
            .into(),
        CouponOvernightAverageSpreadDefinition::from(Arc::clone(&fed), start, end, notional, 1, 0.001, &cal)
            .unwrap()
            .into(),
        CouponOvernightSimplifiedDefinition::from(fed, start, Period::months(3), notional, 1, conv, false, &cal)
            .unwrap()
            .into(),
    ]
}

#[test]
fn builders_are_deterministic() {
    let first = every_coupon(1_000_000.0);
    let second = every_coupon(1_000_000.0);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a, b);
        assert_eq!(hash_of(a), hash_of(b));
    }
    assert_eq!(first.len(), 13);
}

#[test]
fn every_coupon_rejects_a_past_payment_date() {
    // none of these are converted, whatever the series holds
    let series = TimeSeries::new().with(date(2011, 9, 5), 0.003);
    for coupon in every_coupon(1_000_000.0) {
        let late = coupon.payment_date() + 1;
        let result = coupon.to_derivative(late, Some(&series));
        assert!(
            matches!(result, Err(Error::PastPaymentDate { .. })),
            "{coupon:?} converted after its payment date: {result:?}"
        );
    }
}

#[test]
fn every_coupon_converts_before_any_fixing() {
    for coupon in every_coupon(1_000_000.0) {
        let derivative = coupon.to_derivative(date(2011, 9, 1), None).unwrap();
        assert_eq!(derivative.currency(), coupon.currency());
        assert!(derivative.payment_time() > 0.0);
    }
}

proptest! {
    #[test]
    fn with_notional_changes_only_the_notional(notional in -1.0e9..1.0e9f64) {
        for coupon in every_coupon(1_000_000.0) {
            let Ok(resized) = coupon.with_notional(notional) else {
                prop_assert!(matches!(coupon, CouponDefinition::FixedPayment(_)));
                continue;
            };
            prop_assert_eq!(resized.notional(), Some(notional));
            prop_assert_eq!(resized.currency(), coupon.currency());
            prop_assert_eq!(resized.payment_date(), coupon.payment_date());
            prop_assert_eq!(resized.accrual_start_date(), coupon.accrual_start_date());
            prop_assert_eq!(resized.accrual_end_date(), coupon.accrual_end_date());
            prop_assert_eq!(resized.payment_year_fraction(), coupon.payment_year_fraction());
            // back to the original notional gives the original coupon
            let restored = resized.with_notional(1_000_000.0).unwrap();
            prop_assert_eq!(&restored, &coupon);
            prop_assert_eq!(hash_of(&restored), hash_of(&coupon));
        }
    }

    #[test]
    fn equal_coupons_hash_equally(a in -1.0e6..1.0e6f64, b in -1.0e6..1.0e6f64) {
        for (x, y) in every_coupon(a).iter().zip(every_coupon(b).iter()) {
            if x == y {
                prop_assert_eq!(hash_of(x), hash_of(y));
            } else {
                prop_assert_ne!(a, b);
            }
        }
    }
}

#[test]
fn with_notional_shares_the_index_and_date_arrays() {
    let coupon = CouponIborAverageDefinition::from(
        Arc::new(usd_libor(Period::months(3))),
        date(2011, 9, 7),
        Period::months(3),
        1.0,
        2,
        BusinessDayConvention::ModifiedFollowing,
        false,
        Period::months(1),
        vec![0.3, 0.3, 0.4],
        &WeekendsOnly,
    )
    .unwrap();
    let resized = coupon.with_notional(2.0);
    assert!(Arc::ptr_eq(coupon.index(), resized.index()));
    assert!(Arc::ptr_eq(coupon.fixing_dates(), resized.fixing_dates()));
    assert!(Arc::ptr_eq(coupon.weights(), resized.weights()));
}
