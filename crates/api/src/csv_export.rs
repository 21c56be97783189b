// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of punch logs for reporting and accountability.

use time::format_description::well_known::Rfc3339;
use wo_punch::ReportOperationService;
use wo_punch_domain::{WorkOrder, WorkOrderId};

use crate::error::{ApiError, translate_core_error};

/// Exports a work order's full punch log as CSV.
///
/// Columns: `op_index`, `operation`, `employee_number`,
/// `employee_name`, `produced_qty`, `rejected_qty`, `posting_datetime`.
/// Rows are ordered by operation index, then ledger sequence.
///
/// # Arguments
///
/// * `service` - The report service
/// * `work_order` - The work order name
///
/// # Errors
///
/// Returns an error if the work order is unknown or the CSV writer
/// fails.
pub fn export_punch_report_csv(
    service: &ReportOperationService,
    work_order: &str,
) -> Result<String, ApiError> {
    let id: WorkOrderId = WorkOrderId::new(work_order);
    let snapshot: WorkOrder = service.work_order(&id).map_err(translate_core_error)?;
    let logs = service.punch_logs(&id).map_err(translate_core_error)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "op_index",
            "operation",
            "employee_number",
            "employee_name",
            "produced_qty",
            "rejected_qty",
            "posting_datetime",
        ])
        .map_err(|e| ApiError::Internal {
            message: format!("CSV write failed: {e}"),
        })?;

    for (op_index, records) in &logs {
        let operation_name: &str = snapshot
            .operations
            .get(*op_index)
            .map_or("", |operation| operation.name.as_str());
        for record in records {
            let posting = record
                .posting_datetime
                .format(&Rfc3339)
                .map_err(|e| ApiError::Internal {
                    message: format!("Timestamp format failed: {e}"),
                })?;
            writer
                .write_record([
                    op_index.to_string().as_str(),
                    operation_name,
                    record.employee_number.value(),
                    record.employee_name.as_str(),
                    record.produced_qty.to_string().as_str(),
                    record.rejected_qty.to_string().as_str(),
                    posting.as_str(),
                ])
                .map_err(|e| ApiError::Internal {
                    message: format!("CSV write failed: {e}"),
                })?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("CSV finalize failed: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("CSV encoding failed: {e}"),
    })
}
