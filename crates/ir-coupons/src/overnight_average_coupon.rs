//! Overnight coupons paying the arithmetic average of daily fixings.
//!
//! The fixing period is split into consecutive business days. The rate
//! for day `d[i]` is published `publication_lag` business days later, which
//! on a business-day schedule is `d[i + lag]` (the period end for the last
//! days). Daily rates are resolved in order; the fixed part accrues into
//! `Σ rate × factor` and the rest is left to the pricing engine.

use crate::coupon::{hash_real, hash_reals, CouponCommon};
use crate::derivative::{CouponDerivative, CouponOvernightArithmeticAverage};
use crate::fixed_rate_coupon::{check_year_fraction, fixed_derivative};
use crate::fixing::{check_payment_date, resolve_all, time_from, FixingPrefix, Resolution};
use ir_core::errors::Result;
use ir_core::{Real, Spread, TimeSeries};
use ir_currencies::Currency;
use ir_indexes::{Index, OvernightIndex};
use ir_time::{adjusted_date, adjusted_date_by_days, business_day_schedule, BusinessDayConvention, Calendar, Date, Period};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An overnight arithmetic-average coupon.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponOvernightAverageDefinition {
    common: CouponCommon,
    index: Arc<OvernightIndex>,
    fixing_period_dates: Arc<[Date]>,
    fixing_period_accrual_factors: Arc<[Real]>,
}

impl CouponOvernightAverageDefinition {
    /// Create the coupon. Every business day of
    /// `[fixing_period_start, fixing_period_end]` starts a daily fixing
    /// period accruing in the index day count.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: &'static Currency,
        payment_date: Date,
        accrual_start_date: Date,
        accrual_end_date: Date,
        payment_year_fraction: Real,
        notional: Real,
        index: Arc<OvernightIndex>,
        fixing_period_start_date: Date,
        fixing_period_end_date: Date,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        index.check_currency(currency)?;
        check_year_fraction(payment_year_fraction)?;
        let dates = business_day_schedule(fixing_period_start_date, fixing_period_end_date, calendar)?;
        let day_counter = index.day_counter();
        let factors: Vec<Real> = dates
            .windows(2)
            .map(|w| day_counter.year_fraction(w[0], w[1]))
            .collect();
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
            fixing_period_dates: dates.into(),
            fixing_period_accrual_factors: factors.into(),
        })
    }

    /// Create the coupon for `[start, end]`.
    ///
    /// The payment date is `payment_lag` business days after the
    /// publication of the last fixing, and the accrual factor uses the
    /// index day counter.
    pub fn from(
        index: Arc<OvernightIndex>,
        start_date: Date,
        end_date: Date,
        notional: Real,
        payment_lag: i32,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let shift = -1 + index.publication_lag() as i32 + payment_lag;
        let payment_date = adjusted_date_by_days(end_date, shift, calendar);
        let payment_year_fraction = index.day_counter().year_fraction(start_date, end_date);
        Self::new(
            index.currency(),
            payment_date,
            start_date,
            end_date,
            payment_year_fraction,
            notional,
            index,
            start_date,
            end_date,
            calendar,
        )
    }

    /// Create the coupon from an effective date and a tenor.
    #[allow(clippy::too_many_arguments)]
    pub fn from_tenor(
        index: Arc<OvernightIndex>,
        effective_date: Date,
        tenor: Period,
        notional: Real,
        payment_lag: i32,
        convention: BusinessDayConvention,
        end_of_month: bool,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let end_date = adjusted_date(effective_date, tenor, convention, calendar, end_of_month)?;
        Self::from(index, effective_date, end_date, notional, payment_lag, calendar)
    }

    /// Common coupon attributes.
    pub fn common(&self) -> &CouponCommon {
        &self.common
    }

    /// Index observed.
    pub fn index(&self) -> &Arc<OvernightIndex> {
        &self.index
    }

    /// Boundaries of the daily fixing periods, from the fixing-period start
    /// to its end.
    pub fn fixing_period_dates(&self) -> &Arc<[Date]> {
        &self.fixing_period_dates
    }

    /// Index accrual factor of each daily fixing period.
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

    /// How many daily fixings are known at `valuation`.
    pub fn resolution(&self, valuation: Date, fixings: Option<&TimeSeries<Date, Real>>) -> Result<Resolution> {
        Ok(self.resolve_daily(valuation, fixings)?.resolution())
    }

    /// Convert at `valuation`, looking the daily fixings up in `fixings`.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fixings: Option<&TimeSeries<Date, Real>>,
    ) -> Result<CouponDerivative> {
        self.project(valuation, fixings, 0.0, 0.0)
    }

    fn resolve_daily(&self, valuation: Date, fixings: Option<&TimeSeries<Date, Real>>) -> Result<FixingPrefix> {
        let dates = &self.fixing_period_dates;
        let last = dates.len() - 1;
        let lag = self.index.publication_lag() as usize;
        resolve_all(
            self.index.name(),
            (0..last).map(|i| (dates[i], dates[(i + lag).min(last)])),
            valuation,
            fixings,
        )
    }

    pub(crate) fn project(
        &self,
        valuation: Date,
        fixings: Option<&TimeSeries<Date, Real>>,
        spread: Spread,
        spread_amount: Real,
    ) -> Result<CouponDerivative> {
        check_payment_date(valuation, self.common.payment_date())?;
        let prefix = self.resolve_daily(valuation, fixings)?;
        let rate_accrued: Real = prefix
            .rates
            .iter()
            .zip(self.fixing_period_accrual_factors.iter())
            .map(|(rate, factor)| rate * factor)
            .sum();
        if prefix.is_complete() {
            let rate = rate_accrued / self.common.payment_year_fraction() + spread;
            tracing::debug!(index = self.index.name(), rate, "overnight average collapsed to fixed");
            return Ok(CouponDerivative::Fixed(fixed_derivative(&self.common, valuation, rate)));
        }
        let first = prefix.first_unresolved();
        Ok(CouponDerivative::OvernightArithmeticAverage(CouponOvernightArithmeticAverage {
            currency: self.common.currency(),
            payment_time: time_from(valuation, self.common.payment_date()),
            payment_year_fraction: self.common.payment_year_fraction(),
            notional: self.common.notional(),
            index: Arc::clone(&self.index),
            fixing_period_times: self.fixing_period_dates[first..]
                .iter()
                .map(|d| time_from(valuation, *d))
                .collect(),
            fixing_accrual_factors: self.fixing_period_accrual_factors[first..].to_vec(),
            rate_accrued,
            spread,
            spread_amount,
        }))
    }
}

impl Hash for CouponOvernightAverageDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.common.hash(state);
        self.index.hash(state);
        self.fixing_period_dates.hash(state);
        hash_reals(&self.fixing_period_accrual_factors, state);
    }
}

/// An overnight arithmetic-average coupon paying a spread on top.
///
/// The spread pays `spread × payment_year_fraction × notional`.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponOvernightAverageSpreadDefinition {
    average: CouponOvernightAverageDefinition,
    spread: Spread,
    spread_amount: Real,
}

impl CouponOvernightAverageSpreadDefinition {
    /// Create the coupon; see [`CouponOvernightAverageDefinition::new`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: &'static Currency,
        payment_date: Date,
        accrual_start_date: Date,
        accrual_end_date: Date,
        payment_year_fraction: Real,
        notional: Real,
        index: Arc<OvernightIndex>,
        fixing_period_start_date: Date,
        fixing_period_end_date: Date,
        spread: Spread,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let average = CouponOvernightAverageDefinition::new(
            currency,
            payment_date,
            accrual_start_date,
            accrual_end_date,
            payment_year_fraction,
            notional,
            index,
            fixing_period_start_date,
            fixing_period_end_date,
            calendar,
        )?;
        Ok(Self::with_spread(average, spread))
    }

    /// Create the coupon for `[start, end]`; see
    /// [`CouponOvernightAverageDefinition::from`].
    pub fn from(
        index: Arc<OvernightIndex>,
        start_date: Date,
        end_date: Date,
        notional: Real,
        payment_lag: i32,
        spread: Spread,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let average =
            CouponOvernightAverageDefinition::from(index, start_date, end_date, notional, payment_lag, calendar)?;
        Ok(Self::with_spread(average, spread))
    }

    /// Create the coupon from an effective date and a tenor.
    #[allow(clippy::too_many_arguments)]
    pub fn from_tenor(
        index: Arc<OvernightIndex>,
        effective_date: Date,
        tenor: Period,
        notional: Real,
        payment_lag: i32,
        convention: BusinessDayConvention,
        end_of_month: bool,
        spread: Spread,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let average = CouponOvernightAverageDefinition::from_tenor(
            index,
            effective_date,
            tenor,
            notional,
            payment_lag,
            convention,
            end_of_month,
            calendar,
        )?;
        Ok(Self::with_spread(average, spread))
    }

    fn with_spread(average: CouponOvernightAverageDefinition, spread: Spread) -> Self {
        let common = average.common();
        let spread_amount = spread * common.payment_year_fraction() * common.notional();
        Self {
            average,
            spread,
            spread_amount,
        }
    }

    /// The coupon without its spread.
    pub fn average(&self) -> &CouponOvernightAverageDefinition {
        &self.average
    }

    /// Common coupon attributes.
    pub fn common(&self) -> &CouponCommon {
        self.average.common()
    }

    /// Index observed.
    pub fn index(&self) -> &Arc<OvernightIndex> {
        self.average.index()
    }

    /// Spread over the average.
    pub fn spread(&self) -> Spread {
        self.spread
    }

    /// `spread × payment_year_fraction × notional`.
    pub fn spread_amount(&self) -> Real {
        self.spread_amount
    }

    /// Same coupon with another notional; the spread amount follows.
    pub fn with_notional(&self, notional: Real) -> Self {
        Self::with_spread(self.average.with_notional(notional), self.spread)
    }

    /// How many daily fixings are known at `valuation`.
    pub fn resolution(&self, valuation: Date, fixings: Option<&TimeSeries<Date, Real>>) -> Result<Resolution> {
        self.average.resolution(valuation, fixings)
    }

    /// Convert at `valuation`, looking the daily fixings up in `fixings`.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fixings: Option<&TimeSeries<Date, Real>>,
    ) -> Result<CouponDerivative> {
        self.average
            .project(valuation, fixings, self.spread, self.spread_amount)
    }
}

impl Hash for CouponOvernightAverageSpreadDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.average.hash(state);
        hash_real(self.spread, state);
        hash_real(self.spread_amount, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ir_indexes::{eonia, fed_fund};
    use ir_time::WeekendsOnly;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn week(index: OvernightIndex) -> CouponOvernightAverageDefinition {
        CouponOvernightAverageDefinition::from(
            Arc::new(index),
            date(2011, 9, 9),
            date(2011, 9, 16),
            100_000_000.0,
            2,
            &WeekendsOnly,
        )
        .unwrap()
    }

    #[test]
    fn daily_periods_cover_business_days() {
        let c = week(fed_fund());
        assert_eq!(c.fixing_period_dates().len(), 6);
        assert_eq!(c.fixing_period_accrual_factors()[0], 3.0 / 360.0);
        assert_eq!(c.common().payment_date(), date(2011, 9, 20));
    }

    #[test]
    fn publication_lag_shifts_the_payment() {
        let c = week(eonia());
        assert_eq!(c.common().payment_date(), date(2011, 9, 19));
    }

    #[test]
    fn resolution_follows_the_publication_lag() {
        let c = week(fed_fund());
        let fixings = TimeSeries::new().with(date(2011, 9, 9), 0.001);
        assert_eq!(c.resolution(date(2011, 9, 9), Some(&fixings)).unwrap(), Resolution::Unresolved);
        assert_eq!(
            c.resolution(date(2011, 9, 12), Some(&fixings)).unwrap(),
            Resolution::PartiallyResolved
        );
    }

    #[test]
    fn spread_amount_tracks_the_notional() {
        let average = week(fed_fund());
        let spread = CouponOvernightAverageSpreadDefinition::with_spread(average, 0.0025);
        let yf = spread.common().payment_year_fraction();
        assert_relative_eq!(spread.spread_amount(), 0.0025 * yf * 100_000_000.0, epsilon = 1e-9);
        let doubled = spread.with_notional(200_000_000.0);
        assert_relative_eq!(doubled.spread_amount(), 2.0 * spread.spread_amount(), epsilon = 1e-9);
        assert!(Arc::ptr_eq(
            doubled.average().fixing_period_dates(),
            spread.average().fixing_period_dates()
        ));
    }

    #[test]
    fn fully_fixed_average_adds_the_spread() {
        let c = CouponOvernightAverageSpreadDefinition::from(
            Arc::new(fed_fund()),
            date(2011, 9, 9),
            date(2011, 9, 16),
            1.0,
            2,
            0.001,
            &WeekendsOnly,
        )
        .unwrap();
        let fixings: TimeSeries<Date, Real> = [9, 12, 13, 14, 15]
            .into_iter()
            .map(|d| (date(2011, 9, d), 0.01))
            .collect();
        let d = c.to_derivative(date(2011, 9, 19), Some(&fixings)).unwrap();
        // a flat daily rate averages to itself
        assert_relative_eq!(d.as_fixed().unwrap().rate, 0.011, epsilon = 1e-12);
    }

    #[test]
    fn zero_payment_year_fraction_is_rejected() {
        let index = Arc::new(fed_fund());
        let err = CouponOvernightAverageDefinition::new(
            index.currency(),
            date(2011, 9, 20),
            date(2011, 9, 9),
            date(2011, 9, 16),
            0.0,
            1.0,
            index,
            date(2011, 9, 9),
            date(2011, 9, 16),
            &WeekendsOnly,
        )
        .unwrap_err();
        assert!(matches!(err, ir_core::errors::Error::Precondition(_)));
    }
}
