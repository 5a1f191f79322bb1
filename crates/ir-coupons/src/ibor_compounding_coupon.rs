//! Ibor coupon compounded over several sub-periods.
//!
//! Each sub-period `k` accrues `1 + δₖ × fixingₖ`, with `δₖ` its payment
//! accrual factor and `fixingₖ` an Ibor fixing observed spot-lag business
//! days before the sub-period starts. The coupon pays
//! `notional × (Πₖ (1 + δₖ × fixingₖ) − 1)`.
//!
//! Fixings are resolved in order. The known prefix is folded into an
//! accrued notional and only the remaining sub-periods are projected.
//!
//! Two spread variants share the sub-period structure:
//!
//! * [`CouponIborCompoundingSpreadDefinition`] adds the spread to every
//!   fixing before compounding, `Πₖ (1 + δₖ × (fixingₖ + s)) − 1`.
//! * [`CouponIborCompoundingFlatSpreadDefinition`] compounds the fixings
//!   only. The amount accumulated so far earns the fixing and each
//!   sub-period adds `notional × (fixingₖ + s) × δₖ` on top.

use crate::coupon::{hash_real, hash_reals, CouponCommon};
use crate::derivative::{
    CouponDerivative, CouponIborCompounding, CouponIborCompoundingFlatSpread, CouponIborCompoundingSpread,
};
use crate::fixed_rate_coupon::{check_accrual_factors, check_year_fraction, fixed_derivative};
use crate::fixing::{check_payment_date, resolve_all, time_from};
use ir_core::errors::{Error, Result};
use ir_core::{ensure, ensure_same_len, Rate, Real, Spread, Time, TimeSeries};
use ir_currencies::Currency;
use ir_indexes::{adjusted_date_for_index, IborIndex, Index};
use ir_time::{adjusted_date_schedule_for_tenor, start_dates, BusinessDayConvention, Calendar, Date, Period, StubType};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An Ibor coupon compounding one fixing per sub-period.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborCompoundingDefinition {
    common: CouponCommon,
    index: Arc<IborIndex>,
    accrual_start_dates: Arc<[Date]>,
    accrual_end_dates: Arc<[Date]>,
    payment_accrual_factors: Arc<[Real]>,
    fixing_dates: Arc<[Date]>,
    fixing_period_start_dates: Arc<[Date]>,
    fixing_period_end_dates: Arc<[Date]>,
    fixing_period_accrual_factors: Arc<[Real]>,
    initial_rate: Option<Rate>,
}

impl CouponIborCompoundingDefinition {
    /// Create the coupon from its sub-period arrays.
    ///
    /// The accrual period runs from the first sub-period start to the last
    /// sub-period end and the payment year fraction is the sum of the
    /// payment accrual factors.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: &'static Currency,
        payment_date: Date,
        notional: Real,
        index: Arc<IborIndex>,
        accrual_start_dates: impl Into<Arc<[Date]>>,
        accrual_end_dates: impl Into<Arc<[Date]>>,
        payment_accrual_factors: impl Into<Arc<[Real]>>,
        fixing_dates: impl Into<Arc<[Date]>>,
        fixing_period_start_dates: impl Into<Arc<[Date]>>,
        fixing_period_end_dates: impl Into<Arc<[Date]>>,
        fixing_period_accrual_factors: impl Into<Arc<[Real]>>,
    ) -> Result<Self> {
        index.check_currency(currency)?;
        let accrual_start_dates = accrual_start_dates.into();
        let accrual_end_dates = accrual_end_dates.into();
        let payment_accrual_factors = payment_accrual_factors.into();
        let fixing_dates = fixing_dates.into();
        let fixing_period_start_dates = fixing_period_start_dates.into();
        let fixing_period_end_dates = fixing_period_end_dates.into();
        let fixing_period_accrual_factors = fixing_period_accrual_factors.into();

        ensure_same_len!(accrual_start_dates, "accrual start dates", accrual_end_dates, "accrual end dates");
        ensure_same_len!(
            accrual_start_dates,
            "accrual start dates",
            payment_accrual_factors,
            "payment accrual factors"
        );
        ensure_same_len!(accrual_start_dates, "accrual start dates", fixing_dates, "fixing dates");
        ensure_same_len!(fixing_dates, "fixing dates", fixing_period_start_dates, "fixing period start dates");
        ensure_same_len!(fixing_dates, "fixing dates", fixing_period_end_dates, "fixing period end dates");
        ensure_same_len!(
            fixing_dates,
            "fixing dates",
            fixing_period_accrual_factors,
            "fixing period accrual factors"
        );
        let (Some(first_start), Some(last_end)) = (accrual_start_dates.first(), accrual_end_dates.last()) else {
            return Err(Error::MissingField("accrual start dates"));
        };
        check_accrual_factors(&payment_accrual_factors)?;
        check_accrual_factors(&fixing_period_accrual_factors)?;
        ensure!(
            fixing_dates.windows(2).all(|w| w[0] < w[1]),
            "fixing dates should be strictly increasing"
        );
        let payment_year_fraction = payment_accrual_factors.iter().sum();
        check_year_fraction(payment_year_fraction)?;

        Ok(Self {
            common: CouponCommon::new(
                currency,
                payment_date,
                *first_start,
                *last_end,
                payment_year_fraction,
                notional,
            ),
            index,
            accrual_start_dates,
            accrual_end_dates,
            payment_accrual_factors,
            fixing_dates,
            fixing_period_start_dates,
            fixing_period_end_dates,
            fixing_period_accrual_factors,
            initial_rate: None,
        })
    }

    /// Create the coupon from sub-period accrual dates and factors.
    ///
    /// Each sub-period fixes spot-lag business days before it starts; its
    /// fixing period starts with the sub-period and lasts one index tenor.
    /// The currency is the index currency.
    #[allow(clippy::too_many_arguments)]
    pub fn from_periods(
        payment_date: Date,
        notional: Real,
        index: Arc<IborIndex>,
        accrual_start_dates: &[Date],
        accrual_end_dates: &[Date],
        payment_accrual_factors: impl Into<Arc<[Real]>>,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let fixing_dates: Vec<Date> = accrual_start_dates
            .iter()
            .map(|start| index.fixing_date(*start, calendar))
            .collect();
        let fixing_period_end_dates = accrual_start_dates
            .iter()
            .map(|start| adjusted_date_for_index(*start, &index, calendar))
            .collect::<Result<Vec<_>>>()?;
        let day_counter = index.day_counter();
        let fixing_period_accrual_factors: Vec<Real> = accrual_start_dates
            .iter()
            .zip(fixing_period_end_dates.iter())
            .map(|(start, end)| day_counter.year_fraction(*start, *end))
            .collect();
        Self::new(
            index.currency(),
            payment_date,
            notional,
            Arc::clone(&index),
            accrual_start_dates,
            accrual_end_dates,
            payment_accrual_factors,
            fixing_dates,
            accrual_start_dates,
            fixing_period_end_dates,
            fixing_period_accrual_factors,
        )
    }

    /// Create the coupon from a start date and a total tenor; the
    /// sub-periods follow the index tenor and conventions, the payment
    /// date is the last accrual end and the accrual factors use the index
    /// day counter.
    #[allow(clippy::too_many_arguments)]
    pub fn from_tenor(
        notional: Real,
        accrual_start_date: Date,
        tenor: Period,
        index: Arc<IborIndex>,
        stub: StubType,
        convention: BusinessDayConvention,
        end_of_month: bool,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let ends = adjusted_date_schedule_for_tenor(
            accrual_start_date,
            tenor,
            index.tenor(),
            stub,
            convention,
            calendar,
            end_of_month,
        )?;
        let starts = start_dates(accrual_start_date, &ends);
        let day_counter = index.day_counter();
        let factors: Vec<Real> = starts
            .iter()
            .zip(ends.iter())
            .map(|(start, end)| day_counter.year_fraction(*start, *end))
            .collect();
        let Some(payment_date) = ends.last().copied() else {
            return Err(Error::MissingField("accrual end dates"));
        };
        Self::from_periods(payment_date, notional, index, &starts, &ends, factors, calendar)
    }

    /// Same coupon with the rate of the first sub-period already agreed.
    ///
    /// The first fixing is then never looked up.
    pub fn with_initial_rate(&self, rate: Rate) -> Self {
        Self {
            initial_rate: Some(rate),
            ..self.clone()
        }
    }

    /// Common coupon attributes.
    pub fn common(&self) -> &CouponCommon {
        &self.common
    }

    /// Index observed.
    pub fn index(&self) -> &Arc<IborIndex> {
        &self.index
    }

    /// Sub-period accrual start dates.
    pub fn accrual_start_dates(&self) -> &Arc<[Date]> {
        &self.accrual_start_dates
    }

    /// Sub-period accrual end dates.
    pub fn accrual_end_dates(&self) -> &Arc<[Date]> {
        &self.accrual_end_dates
    }

    /// Sub-period payment accrual factors.
    pub fn payment_accrual_factors(&self) -> &Arc<[Real]> {
        &self.payment_accrual_factors
    }

    /// Sub-period fixing dates.
    pub fn fixing_dates(&self) -> &Arc<[Date]> {
        &self.fixing_dates
    }

    /// Fixing-period start dates.
    pub fn fixing_period_start_dates(&self) -> &Arc<[Date]> {
        &self.fixing_period_start_dates
    }

    /// Fixing-period end dates.
    pub fn fixing_period_end_dates(&self) -> &Arc<[Date]> {
        &self.fixing_period_end_dates
    }

    /// Fixing-period accrual factors in the index day count.
    pub fn fixing_period_accrual_factors(&self) -> &Arc<[Real]> {
        &self.fixing_period_accrual_factors
    }

    /// Agreed rate of the first sub-period, if any.
    pub fn initial_rate(&self) -> Option<Rate> {
        self.initial_rate
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: Real) -> Self {
        Self {
            common: self.common.with_notional(notional),
            ..self.clone()
        }
    }

    /// Rates known at `valuation`, the agreed initial rate first.
    ///
    /// The length of the result is the position of the first sub-period
    /// still to be forecast.
    fn known_rates(&self, valuation: Date, fixings: Option<&TimeSeries<Date, Real>>) -> Result<Vec<Rate>> {
        check_payment_date(valuation, self.common.payment_date())?;
        let known = usize::from(self.initial_rate.is_some());
        let prefix = resolve_all(
            self.index.name(),
            self.fixing_dates[known..].iter().map(|d| (*d, *d)),
            valuation,
            fixings,
        )?;
        Ok(self.initial_rate.into_iter().chain(prefix.rates).collect())
    }

    /// The sub-periods from `first` on, as seen from `valuation`.
    fn pending(&self, valuation: Date, first: usize, notional_accrued: Real) -> CouponIborCompounding {
        let times = |dates: &[Date]| -> Vec<Time> { dates[first..].iter().map(|d| time_from(valuation, *d)).collect() };
        CouponIborCompounding {
            currency: self.common.currency(),
            payment_time: time_from(valuation, self.common.payment_date()),
            payment_year_fraction: self.common.payment_year_fraction(),
            notional: self.common.notional(),
            notional_accrued,
            index: Arc::clone(&self.index),
            payment_accrual_factors: self.payment_accrual_factors[first..].to_vec(),
            fixing_times: times(&self.fixing_dates[..]),
            fixing_period_start_times: times(&self.fixing_period_start_dates[..]),
            fixing_period_end_times: times(&self.fixing_period_end_dates[..]),
            fixing_accrual_factors: self.fixing_period_accrual_factors[first..].to_vec(),
        }
    }

    /// `Πₖ (1 + δₖ × (rateₖ + spread))` over the known rates.
    fn ratio(&self, rates: &[Rate], spread: Spread) -> Real {
        rates
            .iter()
            .zip(self.payment_accrual_factors.iter())
            .fold(1.0, |acc, (rate, factor)| acc * (1.0 + factor * (rate + spread)))
    }

    fn is_complete(&self, rates: &[Rate]) -> bool {
        rates.len() == self.fixing_dates.len()
    }

    /// Convert at `valuation`, looking the fixings up in `fixings`.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fixings: Option<&TimeSeries<Date, Real>>,
    ) -> Result<CouponDerivative> {
        let rates = self.known_rates(valuation, fixings)?;
        let ratio = self.ratio(&rates, 0.0);
        if self.is_complete(&rates) {
            let rate = (ratio - 1.0) / self.common.payment_year_fraction();
            tracing::debug!(index = self.index.name(), rate, "Ibor compounding collapsed to fixed");
            return Ok(CouponDerivative::Fixed(fixed_derivative(&self.common, valuation, rate)));
        }
        Ok(CouponDerivative::IborCompounding(self.pending(
            valuation,
            rates.len(),
            self.common.notional() * ratio,
        )))
    }
}

impl Hash for CouponIborCompoundingDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.common.hash(state);
        self.index.hash(state);
        self.accrual_start_dates.hash(state);
        self.accrual_end_dates.hash(state);
        hash_reals(&self.payment_accrual_factors, state);
        self.fixing_dates.hash(state);
        self.fixing_period_start_dates.hash(state);
        self.fixing_period_end_dates.hash(state);
        hash_reals(&self.fixing_period_accrual_factors, state);
        self.initial_rate.is_some().hash(state);
        if let Some(rate) = self.initial_rate {
            hash_real(rate, state);
        }
    }
}

/// An Ibor compounding coupon with the spread added to every fixing.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborCompoundingSpreadDefinition {
    compounding: CouponIborCompoundingDefinition,
    spread: Spread,
}

impl CouponIborCompoundingSpreadDefinition {
    /// Create the coupon from its sub-period arrays; see
    /// [`CouponIborCompoundingDefinition::new`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: &'static Currency,
        payment_date: Date,
        notional: Real,
        index: Arc<IborIndex>,
        accrual_start_dates: impl Into<Arc<[Date]>>,
        accrual_end_dates: impl Into<Arc<[Date]>>,
        payment_accrual_factors: impl Into<Arc<[Real]>>,
        fixing_dates: impl Into<Arc<[Date]>>,
        fixing_period_start_dates: impl Into<Arc<[Date]>>,
        fixing_period_end_dates: impl Into<Arc<[Date]>>,
        fixing_period_accrual_factors: impl Into<Arc<[Real]>>,
        spread: Spread,
    ) -> Result<Self> {
        let compounding = CouponIborCompoundingDefinition::new(
            currency,
            payment_date,
            notional,
            index,
            accrual_start_dates,
            accrual_end_dates,
            payment_accrual_factors,
            fixing_dates,
            fixing_period_start_dates,
            fixing_period_end_dates,
            fixing_period_accrual_factors,
        )?;
        Ok(Self { compounding, spread })
    }

    /// Create the coupon from sub-period accrual dates and factors; see
    /// [`CouponIborCompoundingDefinition::from_periods`].
    #[allow(clippy::too_many_arguments)]
    pub fn from_periods(
        payment_date: Date,
        notional: Real,
        index: Arc<IborIndex>,
        accrual_start_dates: &[Date],
        accrual_end_dates: &[Date],
        payment_accrual_factors: impl Into<Arc<[Real]>>,
        spread: Spread,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let compounding = CouponIborCompoundingDefinition::from_periods(
            payment_date,
            notional,
            index,
            accrual_start_dates,
            accrual_end_dates,
            payment_accrual_factors,
            calendar,
        )?;
        Ok(Self { compounding, spread })
    }

    /// Create the coupon from a start date and a total tenor; see
    /// [`CouponIborCompoundingDefinition::from_tenor`].
    #[allow(clippy::too_many_arguments)]
    pub fn from_tenor(
        notional: Real,
        accrual_start_date: Date,
        tenor: Period,
        index: Arc<IborIndex>,
        stub: StubType,
        convention: BusinessDayConvention,
        end_of_month: bool,
        spread: Spread,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let compounding = CouponIborCompoundingDefinition::from_tenor(
            notional,
            accrual_start_date,
            tenor,
            index,
            stub,
            convention,
            end_of_month,
            calendar,
        )?;
        Ok(Self { compounding, spread })
    }

    /// Same coupon with the rate of the first sub-period already agreed.
    /// The spread is still added to it.
    pub fn with_initial_rate(&self, rate: Rate) -> Self {
        Self {
            compounding: self.compounding.with_initial_rate(rate),
            spread: self.spread,
        }
    }

    /// The coupon without its spread.
    pub fn compounding(&self) -> &CouponIborCompoundingDefinition {
        &self.compounding
    }

    /// Common coupon attributes.
    pub fn common(&self) -> &CouponCommon {
        self.compounding.common()
    }

    /// Spread added to each fixing.
    pub fn spread(&self) -> Spread {
        self.spread
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: Real) -> Self {
        Self {
            compounding: self.compounding.with_notional(notional),
            spread: self.spread,
        }
    }

    /// Convert at `valuation`, looking the fixings up in `fixings`.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fixings: Option<&TimeSeries<Date, Real>>,
    ) -> Result<CouponDerivative> {
        let c = &self.compounding;
        let rates = c.known_rates(valuation, fixings)?;
        let ratio = c.ratio(&rates, self.spread);
        if c.is_complete(&rates) {
            let rate = (ratio - 1.0) / c.common.payment_year_fraction();
            tracing::debug!(index = c.index.name(), rate, "Ibor compounding with spread collapsed to fixed");
            return Ok(CouponDerivative::Fixed(fixed_derivative(&c.common, valuation, rate)));
        }
        Ok(CouponDerivative::IborCompoundingSpread(CouponIborCompoundingSpread {
            compounding: c.pending(valuation, rates.len(), c.common.notional() * ratio),
            spread: self.spread,
        }))
    }
}

impl Hash for CouponIborCompoundingSpreadDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.compounding.hash(state);
        hash_real(self.spread, state);
    }
}

/// An Ibor compounding coupon with a flat spread.
///
/// The spread accrues simply each sub-period and is not compounded.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborCompoundingFlatSpreadDefinition {
    compounding: CouponIborCompoundingDefinition,
    spread: Spread,
}

impl CouponIborCompoundingFlatSpreadDefinition {
    /// Create the coupon from its sub-period arrays; see
    /// [`CouponIborCompoundingDefinition::new`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: &'static Currency,
        payment_date: Date,
        notional: Real,
        index: Arc<IborIndex>,
        accrual_start_dates: impl Into<Arc<[Date]>>,
        accrual_end_dates: impl Into<Arc<[Date]>>,
        payment_accrual_factors: impl Into<Arc<[Real]>>,
        fixing_dates: impl Into<Arc<[Date]>>,
        fixing_period_start_dates: impl Into<Arc<[Date]>>,
        fixing_period_end_dates: impl Into<Arc<[Date]>>,
        fixing_period_accrual_factors: impl Into<Arc<[Real]>>,
        spread: Spread,
    ) -> Result<Self> {
        let compounding = CouponIborCompoundingDefinition::new(
            currency,
            payment_date,
            notional,
            index,
            accrual_start_dates,
            accrual_end_dates,
            payment_accrual_factors,
            fixing_dates,
            fixing_period_start_dates,
            fixing_period_end_dates,
            fixing_period_accrual_factors,
        )?;
        Ok(Self { compounding, spread })
    }

    /// Create the coupon from sub-period accrual dates and factors.
    #[allow(clippy::too_many_arguments)]
    pub fn from_periods(
        payment_date: Date,
        notional: Real,
        index: Arc<IborIndex>,
        accrual_start_dates: &[Date],
        accrual_end_dates: &[Date],
        payment_accrual_factors: impl Into<Arc<[Real]>>,
        spread: Spread,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let compounding = CouponIborCompoundingDefinition::from_periods(
            payment_date,
            notional,
            index,
            accrual_start_dates,
            accrual_end_dates,
            payment_accrual_factors,
            calendar,
        )?;
        Ok(Self { compounding, spread })
    }

    /// Create the coupon from a start date and a total tenor.
    #[allow(clippy::too_many_arguments)]
    pub fn from_tenor(
        notional: Real,
        accrual_start_date: Date,
        tenor: Period,
        index: Arc<IborIndex>,
        stub: StubType,
        convention: BusinessDayConvention,
        end_of_month: bool,
        spread: Spread,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        let compounding = CouponIborCompoundingDefinition::from_tenor(
            notional,
            accrual_start_date,
            tenor,
            index,
            stub,
            convention,
            end_of_month,
            calendar,
        )?;
        Ok(Self { compounding, spread })
    }

    /// Same coupon with the rate of the first sub-period already agreed.
    pub fn with_initial_rate(&self, rate: Rate) -> Self {
        Self {
            compounding: self.compounding.with_initial_rate(rate),
            spread: self.spread,
        }
    }

    /// The coupon without its spread.
    pub fn compounding(&self) -> &CouponIborCompoundingDefinition {
        &self.compounding
    }

    /// Common coupon attributes.
    pub fn common(&self) -> &CouponCommon {
        self.compounding.common()
    }

    /// Flat spread.
    pub fn spread(&self) -> Spread {
        self.spread
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: Real) -> Self {
        Self {
            compounding: self.compounding.with_notional(notional),
            spread: self.spread,
        }
    }

    /// Amount accumulated per unit of notional over the known rates.
    fn accumulated(&self, rates: &[Rate]) -> Real {
        rates
            .iter()
            .zip(self.compounding.payment_accrual_factors.iter())
            .fold(0.0, |acc, (rate, factor)| acc + acc * rate * factor + (rate + self.spread) * factor)
    }

    /// Convert at `valuation`, looking the fixings up in `fixings`.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fixings: Option<&TimeSeries<Date, Real>>,
    ) -> Result<CouponDerivative> {
        let c = &self.compounding;
        let rates = c.known_rates(valuation, fixings)?;
        let accumulated = self.accumulated(&rates);
        if c.is_complete(&rates) {
            let rate = accumulated / c.common.payment_year_fraction();
            tracing::debug!(index = c.index.name(), rate, "Ibor compounding with flat spread collapsed to fixed");
            return Ok(CouponDerivative::Fixed(fixed_derivative(&c.common, valuation, rate)));
        }
        let notional = c.common.notional();
        Ok(CouponDerivative::IborCompoundingFlatSpread(CouponIborCompoundingFlatSpread {
            compounding: c.pending(valuation, rates.len(), notional),
            compounding_period_amount_accumulated: notional * accumulated,
            spread: self.spread,
        }))
    }
}

impl Hash for CouponIborCompoundingFlatSpreadDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.compounding.hash(state);
        hash_real(self.spread, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ir_indexes::usd_libor;
    use ir_time::WeekendsOnly;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn coupon() -> CouponIborCompoundingDefinition {
        CouponIborCompoundingDefinition::from_tenor(
            1_000_000.0,
            date(2011, 9, 7),
            Period::months(6),
            Arc::new(usd_libor(Period::months(3))),
            StubType::ShortStart,
            BusinessDayConvention::ModifiedFollowing,
            true,
            &WeekendsOnly,
        )
        .unwrap()
    }

    #[test]
    fn tenor_builder_splits_into_index_periods() {
        let c = coupon();
        assert_eq!(&c.accrual_start_dates()[..], &[date(2011, 9, 7), date(2011, 12, 7)]);
        assert_eq!(&c.accrual_end_dates()[..], &[date(2011, 12, 7), date(2012, 3, 7)]);
        assert_eq!(&c.fixing_dates()[..], &[date(2011, 9, 5), date(2011, 12, 5)]);
        assert_eq!(c.common().payment_date(), date(2012, 3, 7));
        assert_relative_eq!(c.common().payment_year_fraction(), 182.0 / 360.0, epsilon = 1e-14);
    }

    #[test]
    fn partially_fixed_coupon_accrues_the_notional() {
        let c = coupon();
        let fixings = TimeSeries::new().with(date(2011, 9, 5), 0.01);
        match c.to_derivative(date(2011, 10, 3), Some(&fixings)).unwrap() {
            CouponDerivative::IborCompounding(d) => {
                assert_relative_eq!(d.notional_accrued, 1_000_000.0 * (1.0 + 0.01 * 91.0 / 360.0), epsilon = 1e-8);
                assert_eq!(d.fixing_times, vec![63.0 / 365.0]);
                assert_eq!(d.payment_accrual_factors.len(), 1);
            }
            other => panic!("expected a compounding derivative, got {other:?}"),
        }
    }

    #[test]
    fn fully_fixed_coupon_collapses() {
        let c = coupon();
        let fixings = TimeSeries::new()
            .with(date(2011, 9, 5), 0.01)
            .with(date(2011, 12, 5), 0.02);
        let d = c.to_derivative(date(2011, 12, 5), Some(&fixings)).unwrap();
        let fixed = d.as_fixed().unwrap();
        let expected = ((1.0 + 0.01 * 91.0 / 360.0) * (1.0 + 0.02 * 91.0 / 360.0) - 1.0) / (182.0 / 360.0);
        assert_relative_eq!(fixed.rate, expected, epsilon = 1e-14);
    }

    #[test]
    fn initial_rate_skips_the_first_lookup() {
        let c = coupon().with_initial_rate(0.015);
        match c.to_derivative(date(2011, 10, 3), None).unwrap() {
            CouponDerivative::IborCompounding(d) => {
                assert_relative_eq!(d.notional_accrued, 1_000_000.0 * (1.0 + 0.015 * 91.0 / 360.0), epsilon = 1e-8);
            }
            other => panic!("expected a compounding derivative, got {other:?}"),
        }
        assert_ne!(c, coupon());
    }

    #[test]
    fn negative_factor_is_rejected() {
        let index = Arc::new(usd_libor(Period::months(3)));
        let err = CouponIborCompoundingDefinition::from_periods(
            date(2012, 3, 7),
            1.0,
            index,
            &[date(2011, 9, 7), date(2011, 12, 7)],
            &[date(2011, 12, 7), date(2012, 3, 7)],
            vec![0.25, -0.25],
            &WeekendsOnly,
        )
        .unwrap_err();
        assert_eq!(err, Error::InvalidAccrualFactor { index: 1, factor: -0.25 });
    }

    fn with_spread(spread: Spread) -> CouponIborCompoundingSpreadDefinition {
        CouponIborCompoundingSpreadDefinition::from_tenor(
            1_000_000.0,
            date(2011, 9, 7),
            Period::months(6),
            Arc::new(usd_libor(Period::months(3))),
            StubType::ShortStart,
            BusinessDayConvention::ModifiedFollowing,
            true,
            spread,
            &WeekendsOnly,
        )
        .unwrap()
    }

    fn with_flat_spread(spread: Spread) -> CouponIborCompoundingFlatSpreadDefinition {
        CouponIborCompoundingFlatSpreadDefinition::from_tenor(
            1_000_000.0,
            date(2011, 9, 7),
            Period::months(6),
            Arc::new(usd_libor(Period::months(3))),
            StubType::ShortStart,
            BusinessDayConvention::ModifiedFollowing,
            true,
            spread,
            &WeekendsOnly,
        )
        .unwrap()
    }

    fn both_fixings() -> TimeSeries<Date, Real> {
        TimeSeries::new()
            .with(date(2011, 9, 5), 0.01)
            .with(date(2011, 12, 5), 0.02)
    }

    #[test]
    fn spread_is_compounded_with_each_fixing() {
        let c = with_spread(0.001);
        assert_eq!(c.compounding(), &coupon());
        let d = c.to_derivative(date(2011, 12, 5), Some(&both_fixings())).unwrap();
        let delta = 91.0 / 360.0;
        let expected = ((1.0 + delta * 0.011) * (1.0 + delta * 0.021) - 1.0) / (2.0 * delta);
        assert_relative_eq!(d.as_fixed().unwrap().rate, expected, epsilon = 1e-14);
    }

    #[test]
    fn spread_compounding_accrues_the_notional_with_the_spread() {
        let c = with_spread(0.001);
        let fixings = TimeSeries::new().with(date(2011, 9, 5), 0.01);
        match c.to_derivative(date(2011, 10, 3), Some(&fixings)).unwrap() {
            CouponDerivative::IborCompoundingSpread(d) => {
                assert_relative_eq!(
                    d.compounding.notional_accrued,
                    1_000_000.0 * (1.0 + 0.011 * 91.0 / 360.0),
                    epsilon = 1e-8
                );
                assert_eq!(d.compounding.fixing_times.len(), 1);
                assert_eq!(d.spread, 0.001);
            }
            other => panic!("expected a compounding spread derivative, got {other:?}"),
        }
    }

    #[test]
    fn zero_spread_matches_plain_compounding() {
        let plain = coupon().to_derivative(date(2011, 12, 5), Some(&both_fixings())).unwrap();
        let spread = with_spread(0.0).to_derivative(date(2011, 12, 5), Some(&both_fixings())).unwrap();
        assert_relative_eq!(
            plain.as_fixed().unwrap().rate,
            spread.as_fixed().unwrap().rate,
            epsilon = 1e-15
        );
    }

    #[test]
    fn flat_spread_is_not_compounded() {
        let c = with_flat_spread(0.001);
        let d = c.to_derivative(date(2011, 12, 5), Some(&both_fixings())).unwrap();
        let delta = 91.0 / 360.0;
        let first = 0.011 * delta;
        let second = first + first * 0.02 * delta + 0.021 * delta;
        assert_relative_eq!(d.as_fixed().unwrap().rate, second / (2.0 * delta), epsilon = 1e-14);

        let compounded = with_spread(0.001).to_derivative(date(2011, 12, 5), Some(&both_fixings())).unwrap();
        assert!(d.as_fixed().unwrap().rate < compounded.as_fixed().unwrap().rate);
    }

    #[test]
    fn flat_spread_carries_the_accumulated_amount() {
        let c = with_flat_spread(0.001).with_initial_rate(0.01);
        match c.to_derivative(date(2011, 10, 3), None).unwrap() {
            CouponDerivative::IborCompoundingFlatSpread(d) => {
                assert_relative_eq!(
                    d.compounding_period_amount_accumulated,
                    1_000_000.0 * 0.011 * 91.0 / 360.0,
                    epsilon = 1e-8
                );
                assert_eq!(d.compounding.notional_accrued, 1_000_000.0);
                assert_eq!(d.compounding.payment_accrual_factors.len(), 1);
            }
            other => panic!("expected a flat spread derivative, got {other:?}"),
        }
    }

    #[test]
    fn flat_spread_on_zero_notional_stays_finite() {
        let c = with_flat_spread(0.001).with_notional(0.0);
        let d = c.to_derivative(date(2011, 12, 5), Some(&both_fixings())).unwrap();
        assert!(d.as_fixed().unwrap().rate.is_finite());
        assert_eq!(d.fixed_amount(), Some(0.0));
    }

    #[test]
    fn unordered_fixing_dates_are_rejected() {
        let index = Arc::new(usd_libor(Period::months(3)));
        let err = CouponIborCompoundingDefinition::new(
            index.currency(),
            date(2012, 3, 7),
            1.0,
            index,
            vec![date(2011, 9, 7), date(2011, 12, 7)],
            vec![date(2011, 12, 7), date(2012, 3, 7)],
            vec![0.25, 0.25],
            vec![date(2011, 12, 5), date(2011, 9, 5)],
            vec![date(2011, 12, 7), date(2011, 9, 7)],
            vec![date(2012, 3, 7), date(2011, 12, 7)],
            vec![0.25, 0.25],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
        assert!(err.is_construction_error());
    }

    #[test]
    fn zero_payment_year_fraction_is_rejected() {
        let index = Arc::new(usd_libor(Period::months(3)));
        let err = CouponIborCompoundingDefinition::from_periods(
            date(2012, 3, 7),
            1.0,
            index,
            &[date(2011, 9, 7), date(2011, 12, 7)],
            &[date(2011, 12, 7), date(2012, 3, 7)],
            vec![0.0, 0.0],
            &WeekendsOnly,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }
}
