// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::TransitionResult;
use time::OffsetDateTime;
use wo_punch_domain::{
    COMPLETION_EPSILON, DomainError, EPSILON, Employee, OperationStatus, WorkOrder, Workstation,
    authorize_employee, done_qty, first_pending, pending_qty, required_qty,
    validate_punch_quantities, validate_reportable,
};
use wo_punch_ledger::PunchRecord;

/// Applies a punch command against a committed work order snapshot.
///
/// This is the pure transition: it validates the full precondition
/// chain, derives the new operation aggregates and status, and produces
/// the punch record, without touching the store. The caller holds the
/// operation's critical section, commits the result atomically, and
/// fires the downstream trigger if the operation completed.
///
/// Preconditions, first failure wins:
/// 1. The work order is submitted and materials are transferred.
/// 2. The operation index exists and is the first pending operation.
/// 3. Quantities are non-negative and not both zero.
/// 4. A rejection carries a non-empty reason.
/// 5. The punch does not exceed the pending quantity.
/// 6. An explicit completion consumes the pending quantity exactly.
/// 7. The employee is permitted on the operation's workstation.
///
/// # Arguments
///
/// * `work_order` - The committed work order snapshot
/// * `workstation` - The operation's workstation record, if any
/// * `employee` - The resolved reporting employee
/// * `command` - The punch command
/// * `posting_datetime` - The resolved posting timestamp
///
/// # Returns
///
/// * `Ok(TransitionResult)` with the updated operation, the punch
///   record, and the completion outcome
/// * `Err(CoreError)` if any precondition fails; no state is changed
///
/// # Errors
///
/// Returns an error classified per the taxonomy in [`CoreError`].
pub fn apply(
    work_order: &WorkOrder,
    workstation: Option<&Workstation>,
    employee: &Employee,
    command: &Command,
    posting_datetime: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let Command::ReportOperation {
        op_index,
        produced_qty,
        rejected_qty,
        rejection_reason,
        complete_operation,
        ..
    } = command;
    let op_index = *op_index;
    let produced_qty = *produced_qty;
    let rejected_qty = *rejected_qty;

    validate_reportable(work_order)?;

    let operations = &work_order.operations;
    let operation = operations
        .get(op_index)
        .ok_or(DomainError::OperationIndexOutOfRange {
            op_index,
            operation_count: operations.len(),
        })?;

    // Sequence enforcement: only the first operation with outstanding
    // pending quantity may be reported.
    match first_pending(operations, work_order.quantity) {
        None => {
            return Err(DomainError::AllOperationsReported {
                work_order: work_order.id.value().to_owned(),
            }
            .into());
        }
        Some(first) if first != op_index => {
            let required = required_qty(operation, work_order.quantity);
            if operation.reported || done_qty(operation) + EPSILON >= required {
                return Err(DomainError::OperationAlreadyCompleted { op_index }.into());
            }
            return Err(DomainError::OutOfSequence {
                requested: op_index,
                first_pending: first,
            }
            .into());
        }
        Some(_) => {}
    }

    validate_punch_quantities(produced_qty, rejected_qty, rejection_reason.as_deref())?;

    let pending = pending_qty(operations, work_order.quantity, op_index);
    let requested = produced_qty + rejected_qty;
    if requested - EPSILON > pending {
        return Err(DomainError::ExceedsPending { requested, pending }.into());
    }
    if *complete_operation && (requested - pending).abs() > COMPLETION_EPSILON {
        return Err(DomainError::CompletionQuantityMismatch { requested, pending }.into());
    }

    authorize_employee(workstation, employee)?;

    // The bound in force at transaction start: the predecessor's
    // committed completed quantity, or the required quantity at index 0.
    let required = required_qty(operation, work_order.quantity);
    let bound = if op_index == 0 {
        required
    } else {
        operations[op_index - 1].completed_qty.min(required)
    };

    let mut new_operation = operation.clone();
    new_operation.completed_qty += produced_qty;
    new_operation.rejected_qty += rejected_qty;

    let done = done_qty(&new_operation);
    let old_status = OperationStatus::derive(done_qty(operation), bound);
    let status = OperationStatus::derive(done, bound);
    old_status.validate_transition(status)?;

    let operation_completed = status == OperationStatus::Completed;
    if operation_completed {
        new_operation.reported = true;
        new_operation.reported_by = Some(employee.display_name.clone());
        new_operation.reported_at = Some(posting_datetime);
    }

    let record = PunchRecord::new(
        op_index,
        employee.employee_number.clone(),
        employee.display_name.clone(),
        produced_qty,
        rejected_qty,
        rejection_reason.clone(),
        posting_datetime,
    );

    // Produced roll-up follows the last operation in the chain, clamped
    // to the order quantity.
    let produced_roll_up = if op_index + 1 == operations.len() {
        let mut produced = new_operation.completed_qty;
        if work_order.quantity > 0.0 {
            produced = produced.min(work_order.quantity);
        }
        produced.max(0.0)
    } else {
        work_order.produced_qty
    };

    Ok(TransitionResult {
        remaining_pending: (bound - done).max(0.0),
        new_operation,
        record,
        status,
        operation_completed,
        produced_roll_up,
    })
}
