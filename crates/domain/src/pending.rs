// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pending-quantity derivation for the cascading operation chain.
//!
//! Pending is **computed**, not stored. It's a pure function of current
//! committed state and must be recomputed on every call, since upstream
//! completion can change between punches.

use crate::types::{EPSILON, Operation};

/// Resolves the required quantity for an operation.
///
/// The first positive value among the operation's own candidates wins,
/// in priority order: `operation_qty`, `for_quantity`, `qty`,
/// `required_qty`. If none is positive, the work order's own quantity is
/// used; if that is not positive either, the result is 0.
///
/// # Arguments
///
/// * `operation` - The operation to resolve
/// * `work_order_qty` - The work order's order-level quantity
#[must_use]
pub fn required_qty(operation: &Operation, work_order_qty: f64) -> f64 {
    let candidates = [
        operation.operation_qty,
        operation.for_quantity,
        operation.qty,
        operation.required_qty,
    ];
    for candidate in candidates.into_iter().flatten() {
        if candidate > 0.0 {
            return candidate;
        }
    }
    if work_order_qty > 0.0 {
        work_order_qty
    } else {
        0.0
    }
}

/// Returns the quantity already absorbed by an operation.
///
/// Both accepted-good and rejected units consume the pending bound.
#[must_use]
pub fn done_qty(operation: &Operation) -> f64 {
    operation.completed_qty + operation.rejected_qty
}

/// Computes the outstanding reportable quantity for operation `op_index`.
///
/// For the first operation the bound is its required quantity. For every
/// downstream operation the bound is the predecessor's *completed* (good)
/// quantity, additionally capped at the operation's own required
/// quantity. Rejected units never flow downstream.
///
/// Returns 0 for an out-of-range index.
///
/// # Arguments
///
/// * `operations` - The work order's ordered operation chain
/// * `work_order_qty` - The work order's order-level quantity
/// * `op_index` - The operation's sequence index
#[must_use]
pub fn pending_qty(operations: &[Operation], work_order_qty: f64, op_index: usize) -> f64 {
    let Some(operation) = operations.get(op_index) else {
        return 0.0;
    };

    let required = required_qty(operation, work_order_qty);
    let bound = if op_index == 0 {
        required
    } else {
        operations[op_index - 1].completed_qty.min(required)
    };

    (bound - done_qty(operation)).max(0.0)
}

/// Finds the smallest operation index that still has work outstanding.
///
/// An operation counts as pending while it is not flagged `reported` and
/// its absorbed quantity is short of its required quantity. Returns
/// `None` when every operation is fully reported.
///
/// # Arguments
///
/// * `operations` - The work order's ordered operation chain
/// * `work_order_qty` - The work order's order-level quantity
#[must_use]
pub fn first_pending(operations: &[Operation], work_order_qty: f64) -> Option<usize> {
    operations.iter().position(|operation| {
        !operation.reported
            && done_qty(operation) < required_qty(operation, work_order_qty) - EPSILON
    })
}
