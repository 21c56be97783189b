// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    TEST_WORK_ORDER, create_punch, create_test_harness, seed_test_work_order,
};
use wo_punch::{CoreError, PunchOutcome, RecordStore};
use wo_punch_domain::{WorkOrder, WorkOrderId, Workstation};

#[tokio::test]
async fn test_partial_then_final_punch_completes_operation() {
    let harness = create_test_harness();
    seed_test_work_order(&harness);

    let first: PunchOutcome = harness
        .service
        .report_operation(create_punch("E001", 0, 60.0, 0.0))
        .await
        .unwrap();
    assert_eq!(first.remaining_pending, 40.0);
    assert!(!first.operation_completed);
    assert_eq!(first.punch_seq, 1);

    let second: PunchOutcome = harness
        .service
        .report_operation(create_punch("E002", 0, 40.0, 0.0))
        .await
        .unwrap();
    assert_eq!(second.remaining_pending, 0.0);
    assert!(second.operation_completed);
    assert_eq!(second.punch_seq, 2);

    let completions = harness.job_cards.completions();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].op_index, 0);
}

#[tokio::test]
async fn test_ledger_reconciles_with_aggregates() {
    let harness = create_test_harness();
    seed_test_work_order(&harness);
    let id: WorkOrderId = WorkOrderId::new(TEST_WORK_ORDER);

    harness
        .service
        .report_operation(create_punch("E001", 0, 30.0, 0.0))
        .await
        .unwrap();
    harness
        .service
        .report_operation(create_punch("E002", 0, 20.0, 5.0))
        .await
        .unwrap();

    let work_order: WorkOrder = harness.store.work_order(&id).unwrap();
    let logs = harness.service.punch_logs(&id).unwrap();
    let records = logs.get(&0).unwrap();

    let produced_sum: f64 = records.iter().map(|r| r.produced_qty).sum();
    let rejected_sum: f64 = records.iter().map(|r| r.rejected_qty).sum();
    assert_eq!(produced_sum, work_order.operations[0].completed_qty);
    assert_eq!(rejected_sum, work_order.operations[0].rejected_qty);
}

#[tokio::test]
async fn test_punch_logs_read_is_idempotent() {
    let harness = create_test_harness();
    seed_test_work_order(&harness);
    let id: WorkOrderId = WorkOrderId::new(TEST_WORK_ORDER);

    harness
        .service
        .report_operation(create_punch("E001", 0, 30.0, 0.0))
        .await
        .unwrap();

    let first = harness.service.punch_logs(&id).unwrap();
    let second = harness.service.punch_logs(&id).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_rejection_flows_into_ledger_and_completion() {
    let harness = create_test_harness();
    seed_test_work_order(&harness);
    let id: WorkOrderId = WorkOrderId::new(TEST_WORK_ORDER);

    let outcome: PunchOutcome = harness
        .service
        .report_operation(create_punch("E001", 0, 90.0, 10.0))
        .await
        .unwrap();

    assert!(outcome.operation_completed);
    let work_order: WorkOrder = harness.store.work_order(&id).unwrap();
    assert_eq!(work_order.operations[0].completed_qty, 90.0);
    assert_eq!(work_order.operations[0].rejected_qty, 10.0);
    assert!(work_order.operations[0].reported);
    // Only the 90 good units are workable downstream.
    let downstream = harness
        .service
        .report_operation(create_punch("E001", 1, 95.0, 0.0))
        .await;
    assert!(matches!(downstream, Err(CoreError::Validation(_))));
}

#[tokio::test]
async fn test_downstream_failure_keeps_punch_committed() {
    let harness = create_test_harness();
    seed_test_work_order(&harness);
    let id: WorkOrderId = WorkOrderId::new(TEST_WORK_ORDER);
    harness.job_cards.set_failure("job card service is down");

    let result = harness
        .service
        .report_operation(create_punch("E001", 0, 100.0, 0.0))
        .await;

    assert!(matches!(result, Err(CoreError::Downstream { .. })));
    // The ledger mutation stands.
    let work_order: WorkOrder = harness.store.work_order(&id).unwrap();
    assert_eq!(work_order.operations[0].completed_qty, 100.0);
    assert!(work_order.operations[0].reported);
    let logs = harness.service.punch_logs(&id).unwrap();
    assert_eq!(logs.get(&0).map(Vec::len), Some(1));
    assert!(harness.job_cards.completions().is_empty());
}

#[tokio::test]
async fn test_unknown_employee_is_not_found() {
    let harness = create_test_harness();
    seed_test_work_order(&harness);

    let result = harness
        .service
        .report_operation(create_punch("E999", 0, 10.0, 0.0))
        .await;

    assert!(matches!(result, Err(CoreError::NotFound { .. })));
}

#[tokio::test]
async fn test_unknown_work_order_is_not_found() {
    let harness = create_test_harness();

    let result = harness
        .service
        .report_operation(create_punch("E001", 0, 10.0, 0.0))
        .await;

    assert!(matches!(result, Err(CoreError::NotFound { .. })));
}

#[tokio::test]
async fn test_workstation_gate_applies_through_the_service() {
    let harness = create_test_harness();
    seed_test_work_order(&harness);
    harness.store.insert_workstation(Workstation {
        id: String::from("WS-Cutting"),
        allowed_employees: String::from("E001"),
    });

    let refused = harness
        .service
        .report_operation(create_punch("E002", 0, 10.0, 0.0))
        .await;
    assert!(matches!(refused, Err(CoreError::Authorization(_))));

    let permitted = harness
        .service
        .report_operation(create_punch("E001", 0, 10.0, 0.0))
        .await;
    assert!(permitted.is_ok());
}

#[tokio::test]
async fn test_workstation_allowed_returns_raw_list() {
    let harness = create_test_harness();
    harness.store.insert_workstation(Workstation {
        id: String::from("WS-Cutting"),
        allowed_employees: String::from("E001, E002;E003"),
    });

    assert_eq!(
        harness.service.workstation_allowed("WS-Cutting"),
        "E001, E002;E003"
    );
    assert_eq!(harness.service.workstation_allowed("WS-UNKNOWN"), "");
}

#[tokio::test]
async fn test_produced_roll_up_tracks_last_operation() {
    let harness = create_test_harness();
    seed_test_work_order(&harness);
    let id: WorkOrderId = WorkOrderId::new(TEST_WORK_ORDER);

    harness
        .service
        .report_operation(create_punch("E001", 0, 100.0, 0.0))
        .await
        .unwrap();
    let after_first: WorkOrder = harness.store.work_order(&id).unwrap();
    assert_eq!(after_first.produced_qty, 0.0);

    harness
        .service
        .report_operation(create_punch("E001", 1, 40.0, 0.0))
        .await
        .unwrap();
    let after_last: WorkOrder = harness.store.work_order(&id).unwrap();
    assert_eq!(after_last.produced_qty, 40.0);
}
