// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::Command;
use time::OffsetDateTime;
use time::macros::datetime;
use wo_punch_domain::{Employee, EmployeeNumber, Operation, WorkOrder, WorkOrderId, Workstation};

pub fn posting_time() -> OffsetDateTime {
    datetime!(2026-03-14 09:00 UTC)
}

pub fn create_test_employee() -> Employee {
    Employee {
        employee_number: EmployeeNumber::new("E001"),
        canonical_id: String::from("HR-E001"),
        display_name: String::from("Pat Doe"),
    }
}

pub fn create_test_operation(name: &str, operation_qty: f64) -> Operation {
    Operation::new(
        String::from(name),
        Some(format!("WS-{name}")),
        Some(operation_qty),
    )
}

/// A work order with a two-operation chain, 100 units each.
pub fn create_test_work_order() -> WorkOrder {
    WorkOrder::new(
        WorkOrderId::new("MFG-WO-2026-00001"),
        100.0,
        vec![
            create_test_operation("Cutting", 100.0),
            create_test_operation("Assembly", 100.0),
        ],
    )
}

pub fn create_test_workstation(allowed: &str) -> Workstation {
    Workstation {
        id: String::from("WS-Cutting"),
        allowed_employees: String::from(allowed),
    }
}

pub fn create_test_command(op_index: usize, produced: f64, rejected: f64) -> Command {
    Command::ReportOperation {
        work_order: WorkOrderId::new("MFG-WO-2026-00001"),
        op_index,
        operation_name: None,
        employee_number: EmployeeNumber::new("E001"),
        produced_qty: produced,
        rejected_qty: rejected,
        rejection_reason: if rejected > 0.0 {
            Some(String::from("Tooling chatter"))
        } else {
            None
        },
        posting_datetime: Some(posting_time()),
        complete_operation: false,
        force_complete: false,
    }
}
