//! Concrete IBOR index factory functions.
//!
//! Every factory fixes the conventions of one family and takes the tenor.

use crate::ibor_index::IborIndex;
use ir_currencies::{EUR, GBP, USD};
use ir_time::{Actual360, Actual365Fixed, BusinessDayConvention, Period};

/// Create a Euribor index with the given tenor.
///
/// - Currency: EUR
/// - Day counter: Actual/360
/// - Spot lag: 2
/// - Convention: Modified Following
/// - End of month: true
pub fn euribor(tenor: Period) -> IborIndex {
    IborIndex::new(
        format!("EURIBOR-{tenor}"),
        &EUR,
        tenor,
        2,
        Actual360,
        BusinessDayConvention::ModifiedFollowing,
        true,
    )
}

/// Create a USD LIBOR index with the given tenor.
///
/// - Currency: USD
/// - Day counter: Actual/360
/// - Spot lag: 2
/// - Convention: Modified Following
/// - End of month: true
pub fn usd_libor(tenor: Period) -> IborIndex {
    IborIndex::new(
        format!("USD-LIBOR-{tenor}"),
        &USD,
        tenor,
        2,
        Actual360,
        BusinessDayConvention::ModifiedFollowing,
        true,
    )
}

/// Create a GBP LIBOR index with the given tenor (Actual/365 Fixed, same-day
/// spot).
pub fn gbp_libor(tenor: Period) -> IborIndex {
    IborIndex::new(
        format!("GBP-LIBOR-{tenor}"),
        &GBP,
        tenor,
        0,
        Actual365Fixed,
        BusinessDayConvention::ModifiedFollowing,
        true,
    )
}
