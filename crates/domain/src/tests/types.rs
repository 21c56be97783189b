// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Employee, EmployeeNumber, Operation, WorkOrder, WorkOrderId};

#[test]
fn test_employee_number_normalizes_case_and_whitespace() {
    let number: EmployeeNumber = EmployeeNumber::new("  e001 ");

    assert_eq!(number.value(), "E001");
}

#[test]
fn test_employee_numbers_compare_after_normalization() {
    assert_eq!(EmployeeNumber::new("e001"), EmployeeNumber::new("E001"));
}

#[test]
fn test_new_operation_starts_unreported() {
    let operation: Operation =
        Operation::new(String::from("Cutting"), Some(String::from("WS-1")), Some(50.0));

    assert!(!operation.reported);
    assert_eq!(operation.completed_qty, 0.0);
    assert_eq!(operation.rejected_qty, 0.0);
    assert!(operation.reported_by.is_none());
    assert!(operation.reported_at.is_none());
}

#[test]
fn test_new_work_order_is_ready_to_report() {
    let work_order: WorkOrder = WorkOrder::new(
        WorkOrderId::new("MFG-WO-2026-00001"),
        100.0,
        vec![Operation::new(String::from("Cutting"), None, None)],
    );

    assert!(work_order.submitted);
    assert!(work_order.material_transferred);
    assert_eq!(work_order.produced_qty, 0.0);
    assert_eq!(work_order.operations.len(), 1);
}

#[test]
fn test_work_order_id_display_round_trip() {
    let id: WorkOrderId = WorkOrderId::new("MFG-WO-2026-00042");

    assert_eq!(id.to_string(), "MFG-WO-2026-00042");
    assert_eq!(id.value(), "MFG-WO-2026-00042");
}

#[test]
fn test_employee_serializes_with_normalized_number() {
    let employee: Employee = Employee {
        employee_number: EmployeeNumber::new("e007"),
        canonical_id: String::from("HR-E007"),
        display_name: String::from("Pat Doe"),
    };

    assert_eq!(employee.employee_number.value(), "E007");
}
