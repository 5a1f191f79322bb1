//! Schedule generator tests: stub handling, end-of-month rule, adjustment
//! collapse and the structural properties every generated schedule keeps.

use ir_time::{
    adjusted_date, adjusted_date_by_days, adjusted_date_schedule, adjusted_date_schedule_for_tenor,
    business_day_schedule, unadjusted_date_schedule, BusinessDayConvention, Calendar, Date,
    HolidayCalendar, NullCalendar, Period, StubType, WeekendsOnly,
};
use proptest::prelude::*;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

/// Assert that the generated dates match `expected` exactly.
fn check_dates(actual: &[Date], expected: &[Date]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "expected {} dates, found {}.\n  actual:   {:?}\n  expected: {:?}",
        expected.len(),
        actual.len(),
        actual,
        expected,
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(a, e, "date {i}: expected {e}, found {a}");
    }
}

#[test]
fn unadjusted_short_and_long_stubs() {
    let (start, end) = (date(2011, 1, 15), date(2011, 5, 1));
    let m1 = Period::months(1);

    let short_end = unadjusted_date_schedule(start, end, m1, StubType::ShortEnd).unwrap();
    check_dates(
        &short_end,
        &[date(2011, 2, 15), date(2011, 3, 15), date(2011, 4, 15), date(2011, 5, 1)],
    );

    let long_end = unadjusted_date_schedule(start, end, m1, StubType::LongEnd).unwrap();
    check_dates(&long_end, &[date(2011, 2, 15), date(2011, 3, 15), date(2011, 5, 1)]);

    let short_start = unadjusted_date_schedule(start, end, m1, StubType::ShortStart).unwrap();
    check_dates(
        &short_start,
        &[date(2011, 2, 1), date(2011, 3, 1), date(2011, 4, 1), date(2011, 5, 1)],
    );

    let long_start = unadjusted_date_schedule(start, end, m1, StubType::LongStart).unwrap();
    check_dates(&long_start, &[date(2011, 3, 1), date(2011, 4, 1), date(2011, 5, 1)]);
}

#[test]
fn long_stub_is_not_applied_to_a_single_period() {
    let (start, end) = (date(2011, 1, 15), date(2011, 2, 1));
    for stub in [StubType::LongStart, StubType::LongEnd] {
        let dates = unadjusted_date_schedule(start, end, Period::months(1), stub).unwrap();
        check_dates(&dates, &[end]);
    }
}

#[test]
fn month_end_clamping_does_not_drift() {
    let dates = unadjusted_date_schedule(
        date(2011, 1, 31),
        date(2011, 5, 31),
        Period::months(1),
        StubType::ShortEnd,
    )
    .unwrap();
    check_dates(
        &dates,
        &[date(2011, 2, 28), date(2011, 3, 31), date(2011, 4, 30), date(2011, 5, 31)],
    );
}

#[test]
fn invalid_ranges_are_rejected() {
    let d = date(2011, 9, 9);
    assert!(unadjusted_date_schedule(d, d, Period::months(1), StubType::ShortEnd).is_err());
    assert!(unadjusted_date_schedule(d + 10, d, Period::months(1), StubType::ShortEnd).is_err());
    assert!(unadjusted_date_schedule(d, d + 10, Period::months(0), StubType::ShortEnd).is_err());
    assert!(business_day_schedule(d, d, &WeekendsOnly).is_err());
}

#[test]
fn one_year_quarterly_backwards() {
    let dates = adjusted_date_schedule(
        date(2011, 9, 9),
        date(2012, 9, 9),
        Period::months(3),
        StubType::ShortStart,
        BusinessDayConvention::ModifiedFollowing,
        &WeekendsOnly,
        false,
    )
    .unwrap();
    check_dates(
        &dates,
        &[date(2011, 12, 9), date(2012, 3, 9), date(2012, 6, 11), date(2012, 9, 10)],
    );
}

#[test]
fn end_of_month_rule_follows_the_anchor() {
    let cal = WeekendsOnly;
    // 2011-02-28 is the last business day of February
    let start = date(2011, 2, 28);
    let end = date(2011, 8, 31);
    let mf = BusinessDayConvention::ModifiedFollowing;

    let eom = adjusted_date_schedule(start, end, Period::months(1), StubType::ShortEnd, mf, &cal, true)
        .unwrap();
    check_dates(
        &eom,
        &[
            date(2011, 3, 31),
            date(2011, 4, 29),
            date(2011, 5, 31),
            date(2011, 6, 30),
            date(2011, 7, 29),
            date(2011, 8, 31),
        ],
    );

    let plain =
        adjusted_date_schedule(start, end, Period::months(1), StubType::ShortEnd, mf, &cal, false)
            .unwrap();
    check_dates(
        &plain,
        &[
            date(2011, 3, 28),
            date(2011, 4, 28),
            date(2011, 5, 30),
            date(2011, 6, 28),
            date(2011, 7, 28),
            date(2011, 8, 31),
        ],
    );
}

#[test]
fn end_of_month_start_drives_backward_schedules() {
    let cal = WeekendsOnly;
    let mf = BusinessDayConvention::ModifiedFollowing;
    let start = date(2011, 2, 28);
    let expected = [date(2011, 3, 31), date(2011, 4, 29), date(2011, 5, 31)];

    for stub in [StubType::ShortStart, StubType::LongStart, StubType::ShortEnd] {
        let dates =
            adjusted_date_schedule_for_tenor(start, Period::months(3), Period::months(1), stub, mf, &cal, true)
                .unwrap();
        check_dates(&dates, &expected);
        assert!(dates.iter().all(|d| cal.is_end_of_month(*d)), "{stub:?}: {dates:?}");
        assert_eq!(
            *dates.last().unwrap(),
            adjusted_date(start, Period::months(3), mf, &cal, true).unwrap()
        );
    }

    // an explicit end on a month end keeps the rule for backward generation
    let backward = adjusted_date_schedule(
        date(2011, 1, 14),
        date(2011, 4, 29),
        Period::months(1),
        StubType::ShortStart,
        mf,
        &cal,
        true,
    )
    .unwrap();
    check_dates(&backward, &[date(2011, 1, 31), date(2011, 2, 28), date(2011, 3, 31), date(2011, 4, 29)]);
}

#[test]
fn end_of_month_never_applies_to_day_based_periods() {
    let cal = WeekendsOnly;
    let mf = BusinessDayConvention::ModifiedFollowing;
    let start = date(2011, 2, 28);
    assert_eq!(adjusted_date(start, Period::days(7), mf, &cal, true).unwrap(), date(2011, 3, 7));
    assert_eq!(adjusted_date(start, Period::months(1), mf, &cal, true).unwrap(), date(2011, 3, 31));
    assert_eq!(adjusted_date(start, Period::months(1), mf, &cal, false).unwrap(), date(2011, 3, 28));

    // 2011-04-29 is the last business day of April
    let weekly = adjusted_date_schedule_for_tenor(
        date(2011, 4, 29),
        Period::weeks(1),
        Period::weeks(1),
        StubType::ShortStart,
        mf,
        &cal,
        true,
    )
    .unwrap();
    check_dates(&weekly, &[date(2011, 5, 6)]);
}

#[test]
fn adjustment_collapses_duplicate_dates() {
    // Friday to Monday with daily periods: everything rolls onto Monday
    let dates = adjusted_date_schedule(
        date(2011, 9, 9),
        date(2011, 9, 12),
        Period::days(1),
        StubType::ShortEnd,
        BusinessDayConvention::Following,
        &WeekendsOnly,
        false,
    )
    .unwrap();
    check_dates(&dates, &[date(2011, 9, 12)]);
}

#[test]
fn schedule_with_nothing_after_start_is_an_error() {
    // the only boundary (Saturday) rolls back onto the start date
    let result = adjusted_date_schedule(
        date(2011, 9, 9),
        date(2011, 9, 10),
        Period::days(1),
        StubType::ShortEnd,
        BusinessDayConvention::Preceding,
        &WeekendsOnly,
        false,
    );
    assert!(result.is_err());
}

#[test]
fn daily_business_days_skip_holidays() {
    let week = business_day_schedule(date(2011, 9, 9), date(2011, 9, 16), &WeekendsOnly).unwrap();
    check_dates(
        &week,
        &[
            date(2011, 9, 9),
            date(2011, 9, 12),
            date(2011, 9, 13),
            date(2011, 9, 14),
            date(2011, 9, 15),
            date(2011, 9, 16),
        ],
    );

    let nyc = HolidayCalendar::new("NYC", [date(2011, 9, 5)]);
    let labour_day = business_day_schedule(date(2011, 9, 2), date(2011, 9, 7), &nyc).unwrap();
    check_dates(&labour_day, &[date(2011, 9, 2), date(2011, 9, 6), date(2011, 9, 7)]);

    let every_day = business_day_schedule(date(2011, 9, 9), date(2011, 9, 12), &NullCalendar).unwrap();
    assert_eq!(every_day.len(), 4);
}

#[test]
fn settlement_lag_over_a_weekend() {
    let cal = WeekendsOnly;
    // 2011-09-07 (Wednesday) spot is Friday, two more days is Tuesday
    let spot = adjusted_date_by_days(date(2011, 9, 7), 2, &cal);
    assert_eq!(spot, date(2011, 9, 9));
    assert_eq!(adjusted_date_by_days(spot, 2, &cal), date(2011, 9, 13));
}

fn stub_strategy() -> impl Strategy<Value = StubType> {
    prop_oneof![
        Just(StubType::None),
        Just(StubType::ShortStart),
        Just(StubType::LongStart),
        Just(StubType::ShortEnd),
        Just(StubType::LongEnd),
        Just(StubType::Both),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn adjusted_schedules_are_strictly_increasing(
        offset in 0i32..10_000,
        months in 1i32..=12,
        total_months in 1i32..=60,
        extra_days in 0i32..40,
        stub in stub_strategy(),
        eom in any::<bool>(),
    ) {
        let cal = WeekendsOnly;
        let start = date(2000, 1, 1) + offset;
        let end = Period::months(total_months).add_to(start).unwrap() + extra_days;
        let dates = adjusted_date_schedule(
            start,
            end,
            Period::months(months),
            stub,
            BusinessDayConvention::ModifiedFollowing,
            &cal,
            eom,
        )
        .unwrap();

        prop_assert!(!dates.is_empty());
        prop_assert!(dates[0] > start);
        prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(dates.iter().all(|d| cal.is_business_day(*d)));
        if !eom {
            prop_assert_eq!(
                *dates.last().unwrap(),
                cal.adjust(end, BusinessDayConvention::ModifiedFollowing)
            );
        }
    }

    #[test]
    fn unadjusted_schedules_end_on_the_end_date(
        offset in 0i32..10_000,
        months in 1i32..=6,
        length in 1i32..=400,
        stub in stub_strategy(),
    ) {
        let start = date(2000, 1, 1) + offset;
        let end = start + length;
        let dates = unadjusted_date_schedule(start, end, Period::months(months), stub).unwrap();
        prop_assert_eq!(*dates.last().unwrap(), end);
        prop_assert!(dates[0] > start);
        prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }
}

#[cfg(feature = "serde")]
#[test]
fn schedule_inputs_serialize() {
    let period: Period = serde_json::from_str(&serde_json::to_string(&Period::months(3)).unwrap()).unwrap();
    assert_eq!(period, Period::months(3));
    assert_eq!(serde_json::to_string(&date(2011, 9, 9)).unwrap(), "\"2011-09-09\"");
    let stub: StubType = serde_json::from_str("\"ShortStart\"").unwrap();
    assert_eq!(stub, StubType::ShortStart);
}
