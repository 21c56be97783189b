// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// API request to report produced/rejected quantities for an operation.
///
/// This DTO is distinct from domain types and represents the API
/// contract. `process_loss` is the wire name for the rejected quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOperationRequest {
    /// The work order name.
    pub work_order: String,
    /// The operation's sequence index.
    pub op_index: usize,
    /// The operation name as shown to the operator (informational).
    #[serde(default)]
    pub operation_name: Option<String>,
    /// The reporting employee's badge number.
    pub employee_number: String,
    /// Accepted-good units in this punch.
    pub produced_qty: f64,
    /// Rejected units in this punch.
    #[serde(default)]
    pub process_loss: f64,
    /// When the punch was posted (RFC 3339). Defaults to now.
    #[serde(default)]
    pub posting_datetime: Option<String>,
    /// The rejection reason. Required when `process_loss > 0`.
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Require this punch to consume the pending quantity exactly.
    #[serde(default)]
    pub complete_operation: bool,
    /// Forwarded to the downstream Job Card completion.
    #[serde(default)]
    pub force_complete: bool,
}

/// API response for a successful punch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOperationResponse {
    /// Success indicator.
    pub ok: bool,
    /// A human-readable summary for the operator.
    pub message: String,
    /// The pending quantity remaining for the operation.
    pub remaining: f64,
    /// Whether the punch completed the operation.
    pub operation_completed: bool,
    /// The ledger position assigned to the punch.
    pub punch_seq: u64,
}

/// One punch log entry for UI rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchLogEntry {
    /// The reporting employee's badge number.
    pub employee_number: String,
    /// The reporting employee's display name.
    pub employee_name: String,
    /// Accepted-good units in this punch.
    pub produced_qty: f64,
    /// Rejected units in this punch.
    pub rejected_qty: f64,
    /// The rejection reason, when units were rejected.
    pub rejection_reason: Option<String>,
    /// When the punch was posted.
    #[serde(with = "time::serde::rfc3339")]
    pub posting_datetime: OffsetDateTime,
    /// The ledger position of the punch.
    pub seq: u64,
}

/// API response for punch logs, grouped by operation index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetPunchLogsResponse {
    /// The work order name.
    pub work_order: String,
    /// Chronological entries per operation index.
    pub logs: BTreeMap<usize, Vec<PunchLogEntry>>,
}

/// API response for a workstation's allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkstationAllowedResponse {
    /// The workstation identifier.
    pub workstation: String,
    /// The raw allow-list string; empty permits any employee.
    pub allowed: String,
}
