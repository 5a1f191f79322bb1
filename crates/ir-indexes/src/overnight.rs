//! Concrete overnight index factory functions.

use crate::overnight_index::OvernightIndex;
use ir_currencies::{EUR, GBP, USD};
use ir_time::{Actual360, Actual365Fixed};

/// US Federal Funds effective rate: USD, Actual/360, published the next
/// business day.
pub fn fed_fund() -> OvernightIndex {
    OvernightIndex::new("FED-FUND", &USD, Actual360, 1)
}

/// Euro OverNight Index Average: EUR, Actual/360, published the same day.
pub fn eonia() -> OvernightIndex {
    OvernightIndex::new("EONIA", &EUR, Actual360, 0)
}

/// Secured Overnight Financing Rate: USD, Actual/360, published the next
/// business day.
pub fn sofr() -> OvernightIndex {
    OvernightIndex::new("SOFR", &USD, Actual360, 1)
}

/// Euro Short-Term Rate: EUR, Actual/360, published the next business day.
pub fn estr() -> OvernightIndex {
    OvernightIndex::new("ESTR", &EUR, Actual360, 1)
}

/// Sterling Overnight Index Average: GBP, Actual/365 (Fixed), published the
/// next business day.
pub fn sonia() -> OvernightIndex {
    OvernightIndex::new("SONIA", &GBP, Actual365Fixed, 1)
}
