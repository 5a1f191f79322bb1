//! # ir-indexes
//!
//! Interest-rate index definitions used by floating coupons.
//!
//! Indexes are immutable conventions only: they carry no calendar and no
//! fixing history. Calendars are supplied by the caller when dates are
//! derived, and historical fixings are passed to coupon conversion as a
//! `TimeSeries`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Index` trait: the conventions shared by every rate index.
pub mod index;

/// `IborIndex`: term interbank offered-rate indexes (Euribor, LIBOR, etc.).
pub mod ibor_index;

/// `OvernightIndex`: overnight rate indexes (Fed Funds, SOFR, ESTR, etc.).
pub mod overnight_index;

/// Concrete IBOR index definitions (Euribor, USD LIBOR, etc.).
pub mod ibor;

/// Concrete overnight index definitions (Fed Funds, EONIA, SOFR, etc.).
pub mod overnight;

/// Process-wide, read-only index registry.
pub mod registry;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use ibor::{euribor, gbp_libor, usd_libor};
pub use ibor_index::{adjusted_date_for_index, IborIndex};
pub use index::Index;
pub use overnight::{eonia, estr, fed_fund, sofr, sonia};
pub use overnight_index::OvernightIndex;
pub use registry::{IndexRegistry, IndexRegistryBuilder, RateIndex};
