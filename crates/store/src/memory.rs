// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory collaborator implementations.
//!
//! The host record framework, the employee directory, and the Job Card
//! system live outside this codebase. These implementations stand in
//! for them: good enough for the server binary and exact enough for the
//! concurrency tests. A punch commit is a single write-lock section,
//! so readers only ever observe committed punches.

use crate::error::StoreError;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use wo_punch::{CommitError, DownstreamFailure, EmployeeDirectory, JobCardCompletion, RecordStore};
use wo_punch_domain::{Employee, EmployeeNumber, Operation, WorkOrder, WorkOrderId, Workstation};
use wo_punch_ledger::{PunchLedger, PunchRecord};

/// A work order together with its per-operation punch ledgers.
#[derive(Debug, Clone)]
struct WorkOrderRecord {
    /// The work order state.
    work_order: WorkOrder,
    /// Punch ledgers keyed by operation index.
    ledgers: BTreeMap<usize, PunchLedger>,
}

/// In-memory record store.
pub struct MemoryStore {
    /// Work orders and their ledgers.
    records: RwLock<HashMap<WorkOrderId, WorkOrderRecord>>,
    /// Workstation records keyed by identifier.
    workstations: RwLock<HashMap<String, Workstation>>,
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            workstations: RwLock::new(HashMap::new()),
        }
    }

    /// Seeds a work order.
    ///
    /// # Arguments
    ///
    /// * `work_order` - The work order as supplied by the host framework
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateWorkOrder` if the identifier is
    /// already present.
    pub fn insert_work_order(&self, work_order: WorkOrder) -> Result<(), StoreError> {
        let mut records = write_lock(&self.records);
        if records.contains_key(&work_order.id) {
            return Err(StoreError::DuplicateWorkOrder(
                work_order.id.value().to_owned(),
            ));
        }
        records.insert(
            work_order.id.clone(),
            WorkOrderRecord {
                work_order,
                ledgers: BTreeMap::new(),
            },
        );
        Ok(())
    }

    /// Seeds or replaces a workstation record.
    pub fn insert_workstation(&self, workstation: Workstation) {
        write_lock(&self.workstations).insert(workstation.id.clone(), workstation);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn work_order(&self, id: &WorkOrderId) -> Option<WorkOrder> {
        read_lock(&self.records)
            .get(id)
            .map(|record| record.work_order.clone())
    }

    fn workstation(&self, id: &str) -> Option<Workstation> {
        read_lock(&self.workstations).get(id).cloned()
    }

    fn punch_logs(&self, id: &WorkOrderId) -> Option<BTreeMap<usize, Vec<PunchRecord>>> {
        read_lock(&self.records).get(id).map(|record| {
            record
                .ledgers
                .iter()
                .map(|(op_index, ledger)| (*op_index, ledger.records().to_vec()))
                .collect()
        })
    }

    fn commit_punch(
        &self,
        id: &WorkOrderId,
        op_index: usize,
        operation: Operation,
        produced_roll_up: f64,
        record: PunchRecord,
    ) -> Result<PunchRecord, CommitError> {
        let mut records = write_lock(&self.records);
        let stored = records.get_mut(id).ok_or_else(|| CommitError {
            message: format!("work order '{id}' vanished before commit"),
        })?;
        let Some(slot) = stored.work_order.operations.get_mut(op_index) else {
            return Err(CommitError {
                message: format!("operation {op_index} vanished from work order '{id}'"),
            });
        };
        *slot = operation;
        stored.work_order.produced_qty = produced_roll_up;
        let committed = stored.ledgers.entry(op_index).or_default().append(record);
        Ok(committed)
    }
}

/// In-memory employee directory.
pub struct MemoryDirectory {
    /// Employees keyed by normalized badge number.
    employees: RwLock<HashMap<EmployeeNumber, Employee>>,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            employees: RwLock::new(HashMap::new()),
        }
    }

    /// Seeds or replaces an employee record.
    pub fn insert_employee(&self, employee: Employee) {
        write_lock(&self.employees).insert(employee.employee_number.clone(), employee);
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeDirectory for MemoryDirectory {
    fn lookup(&self, employee_number: &EmployeeNumber) -> Option<Employee> {
        read_lock(&self.employees).get(employee_number).cloned()
    }
}

/// One invocation of the Job Card completion action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCall {
    /// The completed work order.
    pub work_order: WorkOrderId,
    /// The completed operation's index.
    pub op_index: usize,
    /// Whether completion was forced.
    pub force: bool,
}

/// In-memory Job Card completion.
///
/// Records every invocation; a failure message can be injected to
/// exercise the post-commit downstream error path.
pub struct MemoryJobCards {
    /// Every completion call, in order.
    completions: Mutex<Vec<CompletionCall>>,
    /// When set, `complete` fails with this message.
    failure: Mutex<Option<String>>,
}

impl MemoryJobCards {
    /// Creates a Job Card collaborator that always succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            completions: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// Makes subsequent `complete` calls fail with the given message.
    pub fn set_failure(&self, message: &str) {
        match self.failure.lock() {
            Ok(mut guard) => *guard = Some(message.to_owned()),
            Err(poisoned) => *poisoned.into_inner() = Some(message.to_owned()),
        }
    }

    /// Returns every completion call made so far.
    #[must_use]
    pub fn completions(&self) -> Vec<CompletionCall> {
        match self.completions.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for MemoryJobCards {
    fn default() -> Self {
        Self::new()
    }
}

impl JobCardCompletion for MemoryJobCards {
    fn complete(
        &self,
        work_order: &WorkOrderId,
        op_index: usize,
        force: bool,
    ) -> Result<(), DownstreamFailure> {
        let failure = match self.failure.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        if let Some(message) = failure {
            return Err(DownstreamFailure { message });
        }
        let call = CompletionCall {
            work_order: work_order.clone(),
            op_index,
            force,
        };
        match self.completions.lock() {
            Ok(mut guard) => guard.push(call),
            Err(poisoned) => poisoned.into_inner().push(call),
        }
        Ok(())
    }
}
