// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::WorkOrder;

/// Validates the quantities and rejection reason of a punch.
///
/// This checks the punch in isolation; the pending-bound check requires
/// chain context and happens in the core transition.
///
/// # Arguments
///
/// * `produced_qty` - Accepted-good units in this punch
/// * `rejected_qty` - Rejected units in this punch
/// * `rejection_reason` - The reason, required when rejecting
///
/// # Errors
///
/// Returns an error if:
/// - Either quantity is negative or non-finite
/// - Both quantities are zero
/// - A rejection is reported without a non-empty reason
pub fn validate_punch_quantities(
    produced_qty: f64,
    rejected_qty: f64,
    rejection_reason: Option<&str>,
) -> Result<(), DomainError> {
    for (field, value) in [("produced_qty", produced_qty), ("rejected_qty", rejected_qty)] {
        if !value.is_finite() {
            return Err(DomainError::InvalidQuantity {
                field: String::from(field),
                message: String::from("quantity must be a finite number"),
            });
        }
        if value < 0.0 {
            return Err(DomainError::InvalidQuantity {
                field: String::from(field),
                message: String::from("quantity cannot be negative"),
            });
        }
    }

    if produced_qty <= 0.0 && rejected_qty <= 0.0 {
        return Err(DomainError::EmptyPunch);
    }

    if rejected_qty > 0.0
        && rejection_reason
            .map(str::trim)
            .is_none_or(str::is_empty)
    {
        return Err(DomainError::RejectionReasonRequired { rejected_qty });
    }

    Ok(())
}

/// Validates that a work order accepts punches at all.
///
/// # Arguments
///
/// * `work_order` - The work order to check
///
/// # Errors
///
/// Returns an error if:
/// - The work order has not been submitted
/// - Materials have not been transferred to work-in-progress
pub fn validate_reportable(work_order: &WorkOrder) -> Result<(), DomainError> {
    if !work_order.submitted {
        return Err(DomainError::WorkOrderNotSubmitted {
            work_order: work_order.id.value().to_owned(),
        });
    }

    if !work_order.material_transferred {
        return Err(DomainError::MaterialNotTransferred {
            work_order: work_order.id.value().to_owned(),
        });
    }

    Ok(())
}
