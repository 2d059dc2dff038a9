// src/model/constraints.rs

use serde::{Deserialize, Serialize};

/// Supplier-side limits on the lot size. Zero means "no constraint".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderConstraints {
    /// Minimum order quantity accepted by the supplier.
    pub min_order_qty: f64,
    /// Lots must be a whole number of this pack size (box, pallet, ...).
    pub lot_multiple: f64,
}

impl OrderConstraints {
    pub fn new(min_order_qty: f64, lot_multiple: f64) -> Self {
        Self {
            min_order_qty,
            lot_multiple,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn apply(&self, quantity: f64) -> f64 {
        apply_moq_multiple(quantity, self.min_order_qty, self.lot_multiple)
    }
}

/// Raises `q` to the minimum order quantity, then rounds it up to the next
/// lot multiple.
///
/// The floor is applied before the rounding so the result satisfies both.
/// NaN passes through untouched.
pub fn apply_moq_multiple(q: f64, min_order_qty: f64, lot_multiple: f64) -> f64 {
    if q.is_nan() {
        return q;
    }

    let mut adjusted = q;
    if min_order_qty > 0.0 && adjusted < min_order_qty {
        adjusted = min_order_qty;
    }
    if lot_multiple > 0.0 {
        adjusted = lot_multiple * (adjusted / lot_multiple).ceil();
    }
    adjusted
}
