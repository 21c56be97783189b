// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use wo_punch_domain::{EmployeeNumber, WorkOrderId};

/// A command represents operator intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Report produced/rejected quantities against one operation.
    ReportOperation {
        /// The work order being reported.
        work_order: WorkOrderId,
        /// The operation's sequence index.
        op_index: usize,
        /// The operation name as shown to the operator. Informational;
        /// the index is authoritative.
        operation_name: Option<String>,
        /// The reporting employee's badge number.
        employee_number: EmployeeNumber,
        /// Accepted-good units in this punch.
        produced_qty: f64,
        /// Rejected units in this punch.
        rejected_qty: f64,
        /// The rejection reason. Required when `rejected_qty > 0`.
        rejection_reason: Option<String>,
        /// When the punch was posted. Defaults to now.
        posting_datetime: Option<OffsetDateTime>,
        /// Require this punch to consume the pending quantity exactly
        /// and complete the operation.
        complete_operation: bool,
        /// Forwarded to the downstream Job Card completion.
        force_complete: bool,
    },
}
