// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod csv_export;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use csv_export::export_punch_report_csv;
pub use error::{ApiError, translate_core_error};
pub use handlers::{get_punch_logs, get_workstation_allowed, report_operation};
pub use request_response::{
    GetPunchLogsResponse, PunchLogEntry, ReportOperationRequest, ReportOperationResponse,
    WorkstationAllowedResponse,
};
