//! `CouponCommon`: attributes shared by every accruing coupon.
//!
//! A coupon accrues interest over `[accrual_start_date, accrual_end_date]`
//! and pays on `payment_date`. The payment year fraction is the day-count
//! fraction of the accrual period in the coupon's own convention.

use ir_core::Real;
use ir_currencies::Currency;
use ir_time::Date;
use std::hash::{Hash, Hasher};

/// Currency, dates, payment year fraction and notional of a coupon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouponCommon {
    currency: &'static Currency,
    payment_date: Date,
    accrual_start_date: Date,
    accrual_end_date: Date,
    payment_year_fraction: Real,
    notional: Real,
}

impl CouponCommon {
    /// Create the common part of a coupon.
    pub fn new(
        currency: &'static Currency,
        payment_date: Date,
        accrual_start_date: Date,
        accrual_end_date: Date,
        payment_year_fraction: Real,
        notional: Real,
    ) -> Self {
        Self {
            currency,
            payment_date,
            accrual_start_date,
            accrual_end_date,
            payment_year_fraction,
            notional,
        }
    }

    /// Settlement currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Payment date.
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Start of the accrual period.
    pub fn accrual_start_date(&self) -> Date {
        self.accrual_start_date
    }

    /// End of the accrual period.
    pub fn accrual_end_date(&self) -> Date {
        self.accrual_end_date
    }

    /// Day-count fraction of the accrual period.
    pub fn payment_year_fraction(&self) -> Real {
        self.payment_year_fraction
    }

    /// Notional amount.
    pub fn notional(&self) -> Real {
        self.notional
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: Real) -> Self {
        Self { notional, ..*self }
    }
}

impl Hash for CouponCommon {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.currency.code.hash(state);
        self.payment_date.hash(state);
        self.accrual_start_date.hash(state);
        self.accrual_end_date.hash(state);
        hash_real(self.payment_year_fraction, state);
        hash_real(self.notional, state);
    }
}

/// Hash a float consistently with `==`: `0.0` and `-0.0` hash alike.
pub(crate) fn hash_real<H: Hasher>(value: Real, state: &mut H) {
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_bits().hash(state);
}

pub(crate) fn hash_reals<H: Hasher>(values: &[Real], state: &mut H) {
    values.len().hash(state);
    for v in values {
        hash_real(*v, state);
    }
}
