//! # ir-coupons
//!
//! Coupon definitions keyed by calendar dates, and their conversion into
//! time-denominated derivatives at a valuation date.
//!
//! A [`CouponDefinition`] is an immutable value built either directly from
//! explicit dates or through a `from` builder that derives the dates with the
//! `ir-time` schedule generator. [`CouponDefinition::to_derivative`] checks
//! the valuation date against the payment date, resolves the fixings that
//! are already known from a historical [`TimeSeries`](ir_core::TimeSeries),
//! and returns a [`CouponDerivative`]: a fixed coupon when every rate is
//! known, or a floating derivative carrying what is still to be forecast.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Attributes shared by every accruing coupon.
pub mod coupon;

/// The `CouponDefinition` sum type.
pub mod definition;

/// Time-denominated coupons produced by conversion.
pub mod derivative;

/// Fixing resolution against a historical series.
pub mod fixing;

/// Fixed coupons: fixed payment, simple fixed, accrued-compounding.
pub mod fixed_rate_coupon;

/// Fixed coupon with notional reset by an FX fixing.
pub mod fx_reset_coupon;

/// Single-fixing Ibor coupon.
pub mod ibor_coupon;

/// Ibor coupon paying a weighted average of fixings over one period.
pub mod ibor_average_coupon;

/// Ibor coupons compounded over sub-periods, with and without spread.
pub mod ibor_compounding_coupon;

/// Ibor ratchet coupon.
pub mod ibor_ratchet_coupon;

/// Overnight arithmetic-average coupons, with and without spread.
pub mod overnight_average_coupon;

/// Overnight coupon with a single aggregate accrual factor.
pub mod overnight_simplified_coupon;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use coupon::CouponCommon;
pub use definition::CouponDefinition;
pub use derivative::CouponDerivative;
pub use fixed_rate_coupon::{
    CouponFixedAccruedCompoundingDefinition, CouponFixedDefinition, PaymentFixedDefinition,
};
pub use fixing::{check_payment_date, resolve, resolve_all, time_from, FixingPrefix, FixingStatus, Resolution};
pub use fx_reset_coupon::CouponFixedFxResetDefinition;
pub use ibor_average_coupon::CouponIborAverageDefinition;
pub use ibor_compounding_coupon::{
    CouponIborCompoundingDefinition, CouponIborCompoundingFlatSpreadDefinition, CouponIborCompoundingSpreadDefinition,
};
pub use ibor_coupon::CouponIborDefinition;
pub use ibor_ratchet_coupon::CouponIborRatchetDefinition;
pub use overnight_average_coupon::{
    CouponOvernightAverageDefinition, CouponOvernightAverageSpreadDefinition,
};
pub use overnight_simplified_coupon::CouponOvernightSimplifiedDefinition;
