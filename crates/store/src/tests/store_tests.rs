// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{TEST_WORK_ORDER, create_test_harness, seed_test_work_order};
use crate::{MemoryStore, StoreError};
use time::macros::datetime;
use wo_punch::RecordStore;
use wo_punch_domain::{EmployeeNumber, Operation, WorkOrder, WorkOrderId};
use wo_punch_ledger::PunchRecord;

fn create_test_record(produced: f64) -> PunchRecord {
    PunchRecord::new(
        0,
        EmployeeNumber::new("E001"),
        String::from("Pat Doe"),
        produced,
        0.0,
        None,
        datetime!(2026-03-14 09:00 UTC),
    )
}

#[test]
fn test_duplicate_work_order_is_rejected() {
    let harness = create_test_harness();
    seed_test_work_order(&harness);

    let duplicate: WorkOrder = WorkOrder::new(WorkOrderId::new(TEST_WORK_ORDER), 50.0, vec![]);
    let result = harness.store.insert_work_order(duplicate);

    assert_eq!(
        result,
        Err(StoreError::DuplicateWorkOrder(String::from(
            TEST_WORK_ORDER
        )))
    );
}

#[test]
fn test_work_order_snapshot_is_isolated() {
    let harness = create_test_harness();
    seed_test_work_order(&harness);
    let id: WorkOrderId = WorkOrderId::new(TEST_WORK_ORDER);

    let mut snapshot: WorkOrder = harness.store.work_order(&id).unwrap();
    snapshot.operations[0].completed_qty = 999.0;

    let fresh: WorkOrder = harness.store.work_order(&id).unwrap();
    assert_eq!(fresh.operations[0].completed_qty, 0.0);
}

#[test]
fn test_unknown_work_order_reads_as_none() {
    let store: MemoryStore = MemoryStore::new();
    let id: WorkOrderId = WorkOrderId::new("MFG-WO-2026-09999");

    assert!(store.work_order(&id).is_none());
    assert!(store.punch_logs(&id).is_none());
}

#[test]
fn test_commit_punch_assigns_sequence_and_updates_aggregates() {
    let harness = create_test_harness();
    seed_test_work_order(&harness);
    let id: WorkOrderId = WorkOrderId::new(TEST_WORK_ORDER);

    let mut operation: Operation = harness.store.work_order(&id).unwrap().operations[0].clone();
    operation.completed_qty = 60.0;

    let committed: PunchRecord = harness
        .store
        .commit_punch(&id, 0, operation, 0.0, create_test_record(60.0))
        .unwrap();

    assert_eq!(committed.seq, 1);
    let fresh: WorkOrder = harness.store.work_order(&id).unwrap();
    assert_eq!(fresh.operations[0].completed_qty, 60.0);

    let logs = harness.store.punch_logs(&id).unwrap();
    assert_eq!(logs.get(&0).map(Vec::len), Some(1));
}

#[test]
fn test_commit_punch_against_unknown_work_order_fails() {
    let store: MemoryStore = MemoryStore::new();
    let id: WorkOrderId = WorkOrderId::new("MFG-WO-2026-09999");
    let operation: Operation = Operation::new(String::from("Cutting"), None, Some(10.0));

    let result = store.commit_punch(&id, 0, operation, 0.0, create_test_record(10.0));

    assert!(result.is_err());
}

#[test]
fn test_empty_ledger_reads_as_empty_map() {
    let harness = create_test_harness();
    seed_test_work_order(&harness);
    let id: WorkOrderId = WorkOrderId::new(TEST_WORK_ORDER);

    let logs = harness.store.punch_logs(&id).unwrap();

    assert!(logs.is_empty());
}
