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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use wo_punch::ReportOperationService;
use wo_punch_api::{
    ApiError, GetPunchLogsResponse, ReportOperationRequest, ReportOperationResponse,
    WorkstationAllowedResponse, export_punch_report_csv, get_punch_logs, get_workstation_allowed,
    report_operation,
};
use wo_punch_domain::{Employee, EmployeeNumber, Operation, WorkOrder, WorkOrderId, Workstation};
use wo_punch_store::{MemoryDirectory, MemoryJobCards, MemoryStore, StoreError};

/// Work Order Punch Server - HTTP server for the Work Order Punch System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Bound on per-operation lock acquisition, in milliseconds.
    /// On expiry a punch fails fast with a concurrency conflict.
    #[arg(long, default_value_t = 2000)]
    lock_timeout_ms: u64,
}

/// Application state shared across handlers.
///
/// The service owns the per-operation critical sections; the store and
/// directory handles are kept for the host-framework stand-in seed
/// endpoints.
#[derive(Clone)]
struct AppState {
    /// The punch report service.
    service: Arc<ReportOperationService>,
    /// The in-memory record store, for seeding.
    store: Arc<MemoryStore>,
    /// The in-memory employee directory, for seeding.
    directory: Arc<MemoryDirectory>,
}

impl AppState {
    /// Builds the application state over fresh in-memory collaborators.
    fn new(lock_timeout: Duration) -> Self {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let directory: Arc<MemoryDirectory> = Arc::new(MemoryDirectory::new());
        let job_cards: Arc<MemoryJobCards> = Arc::new(MemoryJobCards::new());
        let service: Arc<ReportOperationService> = Arc::new(ReportOperationService::new(
            store.clone(),
            directory.clone(),
            job_cards,
            lock_timeout,
        ));
        Self {
            service,
            store,
            directory,
        }
    }
}

/// One operation in a work order seed request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct OperationSeed {
    /// The operation name.
    name: String,
    /// The workstation identifier, if any.
    #[serde(default)]
    workstation: Option<String>,
    /// The operation-level required quantity, if set.
    #[serde(default)]
    operation_qty: Option<f64>,
}

/// API request for seeding a work order.
///
/// Stand-in for the host record framework that owns work orders.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SeedWorkOrderRequest {
    /// The work order name.
    work_order: String,
    /// The order-level production quantity.
    quantity: f64,
    /// The ordered operation chain.
    operations: Vec<OperationSeed>,
    /// Whether the work order is submitted. Defaults to true.
    #[serde(default = "default_true")]
    submitted: bool,
    /// Whether materials are transferred. Defaults to true.
    #[serde(default = "default_true")]
    material_transferred: bool,
}

const fn default_true() -> bool {
    true
}

/// API request for seeding a workstation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SeedWorkstationRequest {
    /// The workstation identifier.
    workstation: String,
    /// The raw allow-list string.
    #[serde(default)]
    allowed_employees: String,
}

/// API request for seeding an employee.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SeedEmployeeRequest {
    /// The badge number.
    employee_number: String,
    /// The canonical identifier in the host framework.
    canonical_id: String,
    /// The display name.
    display_name: String,
}

/// API response for write operations without a richer payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    ok: bool,
    /// A success message.
    message: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Success indicator, always false.
    ok: bool,
    /// The stable error kind.
    error_kind: String,
    /// The error message.
    error_message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The stable error kind.
    kind: String,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            ok: false,
            error_kind: self.kind,
            error_message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::SequenceViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::DownstreamFailure { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            kind: err.kind().to_owned(),
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        let status: StatusCode = match err {
            StoreError::DuplicateWorkOrder(_) => StatusCode::CONFLICT,
            StoreError::WorkOrderNotFound(_) | StoreError::OperationIndexOutOfRange { .. } => {
                StatusCode::NOT_FOUND
            }
        };
        Self {
            status,
            kind: String::from("store_error"),
            message: err.to_string(),
        }
    }
}

/// Query parameters for punch log endpoints.
#[derive(Debug, Deserialize)]
struct WorkOrderQuery {
    /// The work order name.
    work_order: String,
}

/// Query parameters for the workstation allow-list endpoint.
#[derive(Debug, Deserialize)]
struct WorkstationQuery {
    /// The workstation identifier.
    workstation: String,
}

/// Handler for POST `/report_operation`.
///
/// Reports one punch against a work order operation.
async fn handle_report_operation(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ReportOperationRequest>,
) -> Result<Json<ReportOperationResponse>, HttpError> {
    let response: ReportOperationResponse = report_operation(&app_state.service, req).await?;
    Ok(Json(response))
}

/// Handler for GET `/punch_logs`.
///
/// Returns committed punch logs grouped by operation index.
async fn handle_get_punch_logs(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<WorkOrderQuery>,
) -> Result<Json<GetPunchLogsResponse>, HttpError> {
    let response: GetPunchLogsResponse = get_punch_logs(&app_state.service, &query.work_order)?;
    Ok(Json(response))
}

/// Handler for GET `/punch_logs/export`.
///
/// Returns the punch log of a work order as CSV.
async fn handle_export_punch_csv(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<WorkOrderQuery>,
) -> Result<Response, HttpError> {
    let csv_content: String = export_punch_report_csv(&app_state.service, &query.work_order)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv")],
        csv_content,
    )
        .into_response())
}

/// Handler for GET `/workstation_allowed`.
///
/// Returns a workstation's raw allow-list; empty permits any employee.
async fn handle_get_workstation_allowed(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<WorkstationQuery>,
) -> Json<WorkstationAllowedResponse> {
    Json(get_workstation_allowed(
        &app_state.service,
        &query.workstation,
    ))
}

/// Handler for POST `/work_orders`.
///
/// Seeds a work order. Stand-in for the host record framework.
async fn handle_seed_work_order(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SeedWorkOrderRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        work_order = %req.work_order,
        operations = req.operations.len(),
        "Handling seed work order request"
    );

    let operations: Vec<Operation> = req
        .operations
        .into_iter()
        .map(|seed| Operation::new(seed.name, seed.workstation, seed.operation_qty))
        .collect();
    let mut work_order: WorkOrder =
        WorkOrder::new(WorkOrderId::new(&req.work_order), req.quantity, operations);
    work_order.submitted = req.submitted;
    work_order.material_transferred = req.material_transferred;

    app_state.store.insert_work_order(work_order)?;

    Ok(Json(WriteResponse {
        ok: true,
        message: format!("Created work order '{}'", req.work_order),
    }))
}

/// Handler for POST `/workstations`.
///
/// Seeds or replaces a workstation record.
async fn handle_seed_workstation(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SeedWorkstationRequest>,
) -> Json<WriteResponse> {
    app_state.store.insert_workstation(Workstation {
        id: req.workstation.clone(),
        allowed_employees: req.allowed_employees,
    });

    Json(WriteResponse {
        ok: true,
        message: format!("Created workstation '{}'", req.workstation),
    })
}

/// Handler for POST `/employees`.
///
/// Seeds or replaces an employee directory record.
async fn handle_seed_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SeedEmployeeRequest>,
) -> Json<WriteResponse> {
    let employee_number: EmployeeNumber = EmployeeNumber::new(&req.employee_number);
    app_state.directory.insert_employee(Employee {
        employee_number: employee_number.clone(),
        canonical_id: req.canonical_id,
        display_name: req.display_name,
    });

    Json(WriteResponse {
        ok: true,
        message: format!("Created employee '{employee_number}'"),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/report_operation", post(handle_report_operation))
        .route("/punch_logs", get(handle_get_punch_logs))
        .route("/punch_logs/export", get(handle_export_punch_csv))
        .route("/workstation_allowed", get(handle_get_workstation_allowed))
        .route("/work_orders", post(handle_seed_work_order))
        .route("/workstations", post(handle_seed_workstation))
        .route("/employees", post(handle_seed_employee))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Work Order Punch Server");

    let app_state: AppState = AppState::new(Duration::from_millis(args.lock_timeout_ms));

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
