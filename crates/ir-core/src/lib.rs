//! # ir-core
//!
//! Core types and error definitions for irkit.
//!
//! This crate provides the building blocks shared by every other crate in the
//! workspace: the numeric type aliases, the error taxonomy used by coupon
//! construction and fixing resolution, and the date-keyed `TimeSeries` that
//! carries historical fixings.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Ordered time-series container.
pub mod time_series;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used for amounts, rates and year fractions.
pub type Real = f64;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A spread over a reference rate.
pub type Spread = Real;

/// Act/365F years from the valuation date; negative in the past.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use time_series::TimeSeries;
