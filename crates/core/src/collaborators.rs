// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! External collaborator seams.
//!
//! The host record framework, the employee directory, and the Job Card
//! completion action are consumed, not owned. These traits are their
//! contracts; `wo-punch-store` provides the in-process implementations.

use std::collections::BTreeMap;
use wo_punch_domain::{Employee, EmployeeNumber, Operation, WorkOrder, WorkOrderId, Workstation};
use wo_punch_ledger::PunchRecord;

/// A commit against the record store failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitError {
    /// A description of the fault.
    pub message: String,
}

impl std::fmt::Display for CommitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Commit failed: {}", self.message)
    }
}

impl std::error::Error for CommitError {}

/// The downstream Job Card completion refused or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownstreamFailure {
    /// A description of the failure.
    pub message: String,
}

impl std::fmt::Display for DownstreamFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DownstreamFailure {}

/// The host record store: supplies work order state and persists punch
/// commits.
///
/// Reads return committed snapshots; they must never expose a
/// half-applied punch. `commit_punch` applies the aggregate update and
/// the ledger append as one atomic write.
pub trait RecordStore: Send + Sync {
    /// Returns a committed snapshot of a work order.
    fn work_order(&self, id: &WorkOrderId) -> Option<WorkOrder>;

    /// Returns a workstation record.
    fn workstation(&self, id: &str) -> Option<Workstation>;

    /// Returns the committed punch logs of a work order, keyed by
    /// operation index, chronological within each operation.
    fn punch_logs(&self, id: &WorkOrderId) -> Option<BTreeMap<usize, Vec<PunchRecord>>>;

    /// Atomically replaces the operation's aggregates, refreshes the
    /// work order's produced roll-up, and appends the punch record.
    ///
    /// Returns the record with its assigned ledger sequence number.
    ///
    /// # Errors
    ///
    /// Returns an error if the work order or operation vanished between
    /// snapshot and commit.
    fn commit_punch(
        &self,
        id: &WorkOrderId,
        op_index: usize,
        operation: Operation,
        produced_roll_up: f64,
        record: PunchRecord,
    ) -> Result<PunchRecord, CommitError>;
}

/// The employee directory: badge number to identity.
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up an employee by badge number.
    fn lookup(&self, employee_number: &EmployeeNumber) -> Option<Employee>;
}

/// The downstream Job Card completion action.
///
/// Invoked once per operation completion, after the ledger commit and
/// outside the operation's critical section. A failure must not roll
/// back the committed punch.
pub trait JobCardCompletion: Send + Sync {
    /// Completes the job card backing an operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the downstream system refuses or fails.
    fn complete(
        &self,
        work_order: &WorkOrderId,
        op_index: usize,
        force: bool,
    ) -> Result<(), DownstreamFailure>;
}
