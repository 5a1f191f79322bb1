//! Compounded overnight coupon projected as a single forward period.
//!
//! Known daily fixings compound into an accrued notional. The part still to
//! be fixed is handed to the pricing engine as one period, from the first
//! unknown day to the end of the fixing period.

use crate::coupon::{hash_real, hash_reals, CouponCommon};
use crate::derivative::{CouponDerivative, CouponOvernightSimplified};
use crate::fixed_rate_coupon::{check_year_fraction, fixed_derivative};
use crate::fixing::{check_payment_date, resolve_all, time_from, FixingPrefix, Resolution};
use ir_core::errors::Result;
use ir_core::{Real, TimeSeries};
use ir_currencies::Currency;
use ir_indexes::{Index, OvernightIndex};
use ir_time::{adjusted_date, adjusted_date_by_days, business_day_schedule, BusinessDayConvention, Calendar, Date, Period};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An overnight compounded coupon in its simplified representation.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponOvernightSimplifiedDefinition {
    common: CouponCommon,
    index: Arc<OvernightIndex>,
    fixing_period_start_date: Date,
    fixing_period_end_date: Date,
    fixing_period_accrual_factor: Real,
    fixing_period_dates: Arc<[Date]>,
    fixing_period_accrual_factors: Arc<[Real]>,
}

impl CouponOvernightSimplifiedDefinition {
    /// Create the coupon. The aggregate fixing-period factor and the daily
    /// factors use the index day counter.
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
        let fixing_period_accrual_factor =
            day_counter.year_fraction(fixing_period_start_date, fixing_period_end_date);
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
            fixing_period_start_date,
            fixing_period_end_date,
            fixing_period_accrual_factor,
            fixing_period_dates: dates.into(),
            fixing_period_accrual_factors: factors.into(),
        })
    }

    /// Create the coupon from a start date and a tenor.
    ///
    /// The last fixing is one business day before the end date and the
    /// payment is `settlement_days` business days after its publication.
    #[allow(clippy::too_many_arguments)]
    pub fn from(
        index: Arc<OvernightIndex>,
        start_date: Date,
        tenor: Period,
        notional: Real,
        settlement_days: i32,
        convention: BusinessDayConvention,
        end_of_month: bool,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let end_date = adjusted_date(start_date, tenor, convention, calendar, end_of_month)?;
        let last_fixing = adjusted_date_by_days(end_date, -1, calendar);
        let payment_date = adjusted_date_by_days(index.publication_date(last_fixing, calendar), settlement_days, calendar);
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

    /// Common coupon attributes.
    pub fn common(&self) -> &CouponCommon {
        &self.common
    }

    /// Index observed.
    pub fn index(&self) -> &Arc<OvernightIndex> {
        &self.index
    }

    /// Start of the index fixing period.
    pub fn fixing_period_start_date(&self) -> Date {
        self.fixing_period_start_date
    }

    /// End of the index fixing period.
    pub fn fixing_period_end_date(&self) -> Date {
        self.fixing_period_end_date
    }

    /// Index accrual factor of the whole fixing period.
    pub fn fixing_period_accrual_factor(&self) -> Real {
        self.fixing_period_accrual_factor
    }

    /// Boundaries of the daily fixing periods.
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

    /// Convert at `valuation`, looking the daily fixings up in `fixings`.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fixings: Option<&TimeSeries<Date, Real>>,
    ) -> Result<CouponDerivative> {
        check_payment_date(valuation, self.common.payment_date())?;
        let prefix = self.resolve_daily(valuation, fixings)?;
        let ratio = prefix
            .rates
            .iter()
            .zip(self.fixing_period_accrual_factors.iter())
            .fold(1.0, |acc, (rate, factor)| acc * (1.0 + rate * factor));
        if prefix.is_complete() {
            let rate = (ratio - 1.0) / self.common.payment_year_fraction();
            tracing::debug!(index = self.index.name(), rate, "overnight compounding collapsed to fixed");
            return Ok(CouponDerivative::Fixed(fixed_derivative(&self.common, valuation, rate)));
        }
        let first = prefix.first_unresolved();
        let remaining_factor = if first == 0 {
            self.fixing_period_accrual_factor
        } else {
            self.fixing_period_accrual_factors[first..].iter().sum()
        };
        Ok(CouponDerivative::OvernightSimplified(CouponOvernightSimplified {
            currency: self.common.currency(),
            payment_time: time_from(valuation, self.common.payment_date()),
            payment_year_fraction: self.common.payment_year_fraction(),
            notional: self.common.notional(),
            index: Arc::clone(&self.index),
            fixing_period_start_time: time_from(valuation, self.fixing_period_dates[first]),
            fixing_period_end_time: time_from(valuation, self.fixing_period_end_date),
            fixing_period_year_fraction: remaining_factor,
            notional_accrued: self.common.notional() * ratio,
        }))
    }
}

impl Hash for CouponOvernightSimplifiedDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.common.hash(state);
        self.index.hash(state);
        self.fixing_period_start_date.hash(state);
        self.fixing_period_end_date.hash(state);
        hash_real(self.fixing_period_accrual_factor, state);
        self.fixing_period_dates.hash(state);
        hash_reals(&self.fixing_period_accrual_factors, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ir_indexes::eonia;
    use ir_time::WeekendsOnly;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn coupon() -> CouponOvernightSimplifiedDefinition {
        CouponOvernightSimplifiedDefinition::from(
            Arc::new(eonia()),
            date(2011, 9, 9),
            Period::days(7),
            100_000_000.0,
            2,
            BusinessDayConvention::ModifiedFollowing,
            true,
            &WeekendsOnly,
        )
        .unwrap()
    }

    #[test]
    fn builder_dates() {
        let c = coupon();
        assert_eq!(c.fixing_period_end_date(), date(2011, 9, 16));
        assert_eq!(c.common().payment_date(), date(2011, 9, 19));
        assert_relative_eq!(c.fixing_period_accrual_factor(), 7.0 / 360.0, epsilon = 1e-15);
    }

    #[test]
    fn unresolved_coupon_keeps_the_whole_period() {
        let c = coupon();
        match c.to_derivative(date(2011, 9, 8), None).unwrap() {
            CouponDerivative::OvernightSimplified(d) => {
                assert_eq!(d.notional_accrued, 100_000_000.0);
                assert_eq!(d.fixing_period_start_time, 1.0 / 365.0);
                assert_eq!(d.fixing_period_year_fraction, 7.0 / 360.0);
            }
            other => panic!("expected a simplified derivative, got {other:?}"),
        }
    }

    #[test]
    fn known_days_compound_into_the_notional() {
        let c = coupon();
        let fixings = TimeSeries::new().with(date(2011, 9, 9), 0.01);
        match c.to_derivative(date(2011, 9, 9), Some(&fixings)).unwrap() {
            CouponDerivative::OvernightSimplified(d) => {
                assert_relative_eq!(d.notional_accrued, 100_000_000.0 * (1.0 + 0.01 * 3.0 / 360.0), epsilon = 1e-6);
                assert_eq!(d.fixing_period_start_time, 3.0 / 365.0);
                assert_relative_eq!(d.fixing_period_year_fraction, 4.0 / 360.0, epsilon = 1e-15);
            }
            other => panic!("expected a simplified derivative, got {other:?}"),
        }
    }

    #[test]
    fn zero_payment_year_fraction_is_rejected() {
        let index = Arc::new(eonia());
        let err = CouponOvernightSimplifiedDefinition::new(
            index.currency(),
            date(2011, 9, 19),
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
