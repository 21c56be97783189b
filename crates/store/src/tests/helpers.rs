// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{MemoryDirectory, MemoryJobCards, MemoryStore};
use std::sync::Arc;
use std::time::Duration;
use wo_punch::{Command, ReportOperationService};
use wo_punch_domain::{Employee, EmployeeNumber, Operation, WorkOrder, WorkOrderId};

pub const TEST_WORK_ORDER: &str = "MFG-WO-2026-00001";

/// The service wired to in-memory collaborators, with handles kept for
/// seeding and assertions.
pub struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub job_cards: Arc<MemoryJobCards>,
    pub service: Arc<ReportOperationService>,
}

pub fn create_test_harness() -> TestHarness {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let directory: Arc<MemoryDirectory> = Arc::new(MemoryDirectory::new());
    let job_cards: Arc<MemoryJobCards> = Arc::new(MemoryJobCards::new());

    directory.insert_employee(Employee {
        employee_number: EmployeeNumber::new("E001"),
        canonical_id: String::from("HR-E001"),
        display_name: String::from("Pat Doe"),
    });
    directory.insert_employee(Employee {
        employee_number: EmployeeNumber::new("E002"),
        canonical_id: String::from("HR-E002"),
        display_name: String::from("Sam Poe"),
    });

    let service: Arc<ReportOperationService> = Arc::new(ReportOperationService::new(
        store.clone(),
        directory,
        job_cards.clone(),
        Duration::from_secs(1),
    ));

    TestHarness {
        store,
        job_cards,
        service,
    }
}

/// Seeds a two-operation work order (Cutting → Assembly, 100 units).
pub fn seed_test_work_order(harness: &TestHarness) {
    harness
        .store
        .insert_work_order(WorkOrder::new(
            WorkOrderId::new(TEST_WORK_ORDER),
            100.0,
            vec![
                Operation::new(
                    String::from("Cutting"),
                    Some(String::from("WS-Cutting")),
                    Some(100.0),
                ),
                Operation::new(
                    String::from("Assembly"),
                    Some(String::from("WS-Assembly")),
                    Some(100.0),
                ),
            ],
        ))
        .unwrap();
}

pub fn create_punch(employee: &str, op_index: usize, produced: f64, rejected: f64) -> Command {
    Command::ReportOperation {
        work_order: WorkOrderId::new(TEST_WORK_ORDER),
        op_index,
        operation_name: None,
        employee_number: EmployeeNumber::new(employee),
        produced_qty: produced,
        rejected_qty: rejected,
        rejection_reason: if rejected > 0.0 {
            Some(String::from("Tooling chatter"))
        } else {
            None
        },
        posting_datetime: None,
        complete_operation: false,
        force_complete: false,
    }
}
