// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for the punch engine.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;
use wo_punch::{Command, PunchOutcome, ReportOperationService};
use wo_punch_domain::{EmployeeNumber, WorkOrderId};

use crate::error::{ApiError, translate_core_error};
use crate::request_response::{
    GetPunchLogsResponse, PunchLogEntry, ReportOperationRequest, ReportOperationResponse,
    WorkstationAllowedResponse,
};

/// Parses an optional RFC 3339 posting timestamp from the wire.
fn parse_posting_datetime(raw: Option<&str>) -> Result<Option<OffsetDateTime>, ApiError> {
    raw.map(|value| {
        OffsetDateTime::parse(value, &Rfc3339).map_err(|e| ApiError::InvalidInput {
            message: format!("Invalid posting_datetime '{value}': {e}"),
        })
    })
    .transpose()
}

/// Reports one punch via the API boundary.
///
/// This function:
/// - Translates the API request into a core command
/// - Runs the command through the report service
/// - Translates any errors to API errors
///
/// # Arguments
///
/// * `service` - The report service
/// * `request` - The API request
///
/// # Returns
///
/// * `Ok(ReportOperationResponse)` once the punch is committed
/// * `Err(ApiError)` if any precondition fails; only
///   `ApiError::DownstreamFailure` follows a committed punch
///
/// # Errors
///
/// Returns an error classified per the taxonomy in [`ApiError`].
pub async fn report_operation(
    service: &ReportOperationService,
    request: ReportOperationRequest,
) -> Result<ReportOperationResponse, ApiError> {
    info!(
        work_order = %request.work_order,
        op_index = request.op_index,
        employee = %request.employee_number,
        produced = request.produced_qty,
        rejected = request.process_loss,
        "Handling report_operation request"
    );

    let posting_datetime = parse_posting_datetime(request.posting_datetime.as_deref())?;

    let command: Command = Command::ReportOperation {
        work_order: WorkOrderId::new(&request.work_order),
        op_index: request.op_index,
        operation_name: request.operation_name,
        employee_number: EmployeeNumber::new(&request.employee_number),
        produced_qty: request.produced_qty,
        rejected_qty: request.process_loss,
        rejection_reason: request.rejection_reason,
        posting_datetime,
        complete_operation: request.complete_operation,
        force_complete: request.force_complete,
    };

    let outcome: PunchOutcome = service
        .report_operation(command)
        .await
        .map_err(translate_core_error)?;

    Ok(ReportOperationResponse {
        ok: true,
        message: outcome.message,
        remaining: outcome.remaining_pending,
        operation_completed: outcome.operation_completed,
        punch_seq: outcome.punch_seq,
    })
}

/// Returns the committed punch logs of a work order for UI rendering.
///
/// # Arguments
///
/// * `service` - The report service
/// * `work_order` - The work order name
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown work order.
pub fn get_punch_logs(
    service: &ReportOperationService,
    work_order: &str,
) -> Result<GetPunchLogsResponse, ApiError> {
    let id: WorkOrderId = WorkOrderId::new(work_order);
    let logs = service.punch_logs(&id).map_err(translate_core_error)?;

    Ok(GetPunchLogsResponse {
        work_order: work_order.to_owned(),
        logs: logs
            .into_iter()
            .map(|(op_index, records)| {
                let entries: Vec<PunchLogEntry> = records
                    .into_iter()
                    .map(|record| PunchLogEntry {
                        employee_number: record.employee_number.value().to_owned(),
                        employee_name: record.employee_name,
                        produced_qty: record.produced_qty,
                        rejected_qty: record.rejected_qty,
                        rejection_reason: record.rejection_reason,
                        posting_datetime: record.posting_datetime,
                        seq: record.seq,
                    })
                    .collect();
                (op_index, entries)
            })
            .collect(),
    })
}

/// Returns a workstation's raw allow-list.
///
/// An unknown workstation yields the empty string (permit any); this
/// endpoint never errors.
#[must_use]
pub fn get_workstation_allowed(
    service: &ReportOperationService,
    workstation: &str,
) -> WorkstationAllowedResponse {
    WorkstationAllowedResponse {
        workstation: workstation.to_owned(),
        allowed: service.workstation_allowed(workstation),
    }
}
