//! # irkit
//!
//! Interest-rate coupon definitions and their conversion, at a valuation
//! date, into the time-denominated cashflows a pricing engine consumes.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `ir-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! irkit = "0.1"
//! ```
//!
//! ```rust
//! use irkit::prelude::*;
//! use std::sync::Arc;
//!
//! let libor = IndexRegistry::global().ibor("USD-LIBOR-3M").unwrap();
//! let start = Date::from_ymd(2011, 9, 7).unwrap();
//! let end = Date::from_ymd(2011, 12, 7).unwrap();
//! let coupon: CouponDefinition =
//!     CouponIborDefinition::from(start, end, end, 1_000_000.0, Arc::clone(&libor), 0.0, &WeekendsOnly)
//!         .unwrap()
//!         .into();
//!
//! let fixings = TimeSeries::new().with(Date::from_ymd(2011, 9, 5).unwrap(), 0.0035);
//! let derivative = coupon.to_derivative(Date::from_ymd(2011, 9, 6).unwrap(), Some(&fixings)).unwrap();
//! assert_eq!(derivative.as_fixed().map(|c| c.rate), Some(0.0035));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use ir_core as core;

/// Date, calendar, day counter, and schedule generation.
pub use ir_time as time;

/// Currency definitions.
pub use ir_currencies as currencies;

/// Ibor and overnight indexes, and the index registry.
pub use ir_indexes as indexes;

/// Coupon definitions, fixing resolution and derivative projection.
pub use ir_coupons as coupons;

/// The items most programs need, in one import.
pub mod prelude {
    pub use ir_core::errors::{Error, Result};
    pub use ir_core::{Rate, Real, Spread, Time, TimeSeries};
    pub use ir_coupons::{
        CouponDefinition, CouponDerivative, CouponFixedAccruedCompoundingDefinition, CouponFixedDefinition,
        CouponFixedFxResetDefinition, CouponIborAverageDefinition, CouponIborCompoundingDefinition,
        CouponIborCompoundingFlatSpreadDefinition, CouponIborCompoundingSpreadDefinition,
        CouponIborDefinition, CouponIborRatchetDefinition, CouponOvernightAverageDefinition,
        CouponOvernightAverageSpreadDefinition, CouponOvernightSimplifiedDefinition, FixingStatus,
        PaymentFixedDefinition, Resolution,
    };
    pub use ir_currencies::Currency;
    pub use ir_indexes::{IborIndex, Index, IndexRegistry, OvernightIndex, RateIndex};
    pub use ir_time::{
        BusinessDayConvention, Calendar, Date, DayCounter, HolidayCalendar, NullCalendar, Period, StubType,
        WeekendsOnly,
    };
}
