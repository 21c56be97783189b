// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use wo_punch_domain::DomainError;

/// Errors that can occur while reporting an operation.
///
/// Every variant maps to one kind in the error taxonomy; no variant is
/// ever produced after a mutation except `Downstream`, whose punch
/// remains committed.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Malformed or out-of-range input. No mutation performed.
    Validation(DomainError),
    /// The wrong operation was reported, or the operation is already
    /// completed. No mutation performed.
    Sequence(DomainError),
    /// The employee is not permitted on the workstation. No mutation
    /// performed.
    Authorization(DomainError),
    /// The work order, operation, or employee does not exist.
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The operation's critical section could not be acquired in time.
    /// No mutation performed; the caller should retry.
    ConcurrencyConflict {
        /// The work order identifier.
        work_order: String,
        /// The operation index under contention.
        op_index: usize,
    },
    /// The Job Card completion failed after the ledger commit. The
    /// punch remains committed; this is a warning, not a rollback.
    Downstream {
        /// The work order identifier.
        work_order: String,
        /// The completed operation's index.
        op_index: usize,
        /// A description of the downstream failure.
        message: String,
    },
    /// A record store fault occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "Validation failed: {err}"),
            Self::Sequence(err) => write!(f, "Sequence violation: {err}"),
            Self::Authorization(err) => write!(f, "Authorization failed: {err}"),
            Self::NotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ConcurrencyConflict {
                work_order,
                op_index,
            } => {
                write!(
                    f,
                    "Operation {op_index} of work order '{work_order}' is being reported by someone else; retry"
                )
            }
            Self::Downstream {
                work_order,
                op_index,
                message,
            } => {
                write!(
                    f,
                    "Punch on operation {op_index} of work order '{work_order}' was recorded, but the job card completion failed: {message}"
                )
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidQuantity { .. }
            | DomainError::EmptyPunch
            | DomainError::RejectionReasonRequired { .. }
            | DomainError::ExceedsPending { .. }
            | DomainError::CompletionQuantityMismatch { .. }
            | DomainError::WorkOrderNotSubmitted { .. }
            | DomainError::MaterialNotTransferred { .. } => Self::Validation(err),
            DomainError::OutOfSequence { .. }
            | DomainError::AllOperationsReported { .. }
            | DomainError::OperationAlreadyCompleted { .. }
            | DomainError::InvalidStatusTransition { .. }
            | DomainError::InvalidStatus { .. } => Self::Sequence(err),
            DomainError::EmployeeNotAuthorized { .. } => Self::Authorization(err),
            DomainError::OperationIndexOutOfRange { .. } => Self::NotFound {
                resource_type: String::from("Operation"),
                message: err.to_string(),
            },
        }
    }
}
