// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use wo_punch_domain::{Operation, OperationStatus};
use wo_punch_ledger::PunchRecord;

/// The result of a successful punch transition.
///
/// Transitions are atomic: they either succeed completely or fail
/// without side effects. The record carries `seq = 0` until the store
/// assigns the ledger position at commit.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The operation with updated aggregates and completion stamps.
    pub new_operation: Operation,
    /// The punch record to append to the operation's ledger.
    pub record: PunchRecord,
    /// The operation's status after the punch.
    pub status: OperationStatus,
    /// Whether this punch completed the operation.
    pub operation_completed: bool,
    /// The pending quantity remaining after the punch.
    pub remaining_pending: f64,
    /// The work order's produced roll-up after the punch, clamped to
    /// the order quantity.
    pub produced_roll_up: f64,
}

/// The outcome of a committed punch, returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct PunchOutcome {
    /// The pending quantity remaining for the operation.
    pub remaining_pending: f64,
    /// Whether the punch completed the operation.
    pub operation_completed: bool,
    /// The ledger position assigned to the punch.
    pub punch_seq: u64,
    /// A human-readable summary for the operator.
    pub message: String,
}
