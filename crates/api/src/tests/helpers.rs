// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::request_response::ReportOperationRequest;
use std::sync::Arc;
use std::time::Duration;
use wo_punch::ReportOperationService;
use wo_punch_domain::{Employee, EmployeeNumber, Operation, WorkOrder, WorkOrderId, Workstation};
use wo_punch_store::{MemoryDirectory, MemoryJobCards, MemoryStore};

pub const TEST_WORK_ORDER: &str = "MFG-WO-2026-00001";

pub struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub job_cards: Arc<MemoryJobCards>,
    pub service: ReportOperationService,
}

/// A service over seeded in-memory collaborators: employees E001/E002
/// and a two-operation work order (Cutting → Assembly, 100 units).
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

    store
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

    let service: ReportOperationService = ReportOperationService::new(
        store.clone(),
        directory,
        job_cards.clone(),
        Duration::from_secs(1),
    );

    TestHarness {
        store,
        job_cards,
        service,
    }
}

pub fn seed_workstation(harness: &TestHarness, id: &str, allowed: &str) {
    harness.store.insert_workstation(Workstation {
        id: String::from(id),
        allowed_employees: String::from(allowed),
    });
}

pub fn create_valid_request() -> ReportOperationRequest {
    ReportOperationRequest {
        work_order: String::from(TEST_WORK_ORDER),
        op_index: 0,
        operation_name: Some(String::from("Cutting")),
        employee_number: String::from("E001"),
        produced_qty: 60.0,
        process_loss: 0.0,
        posting_datetime: Some(String::from("2026-03-14T09:00:00Z")),
        rejection_reason: None,
        complete_operation: false,
        force_complete: false,
    }
}
