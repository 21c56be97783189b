// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use wo_punch::CoreError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Every variant carries a stable kind string the
/// presentation layer can branch on.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Invalid input was provided. No mutation performed.
    InvalidInput {
        /// A human-readable description of the error.
        message: String,
    },
    /// The wrong operation was reported, or the operation is already
    /// completed. No mutation performed.
    SequenceViolation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// The employee is not permitted on the workstation.
    Unauthorized {
        /// A human-readable description of the refusal.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The operation is under contention; the caller should retry.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The Job Card completion failed after the punch was committed.
    /// The punch stands.
    DownstreamFailure {
        /// A human-readable description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the stable kind string for this error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "validation_error",
            Self::SequenceViolation { .. } => "sequence_error",
            Self::Unauthorized { .. } => "authorization_error",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Conflict { .. } => "concurrency_conflict",
            Self::DownstreamFailure { .. } => "downstream_error",
            Self::Internal { .. } => "internal_error",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { message } => write!(f, "Invalid input: {message}"),
            Self::SequenceViolation { message } => write!(f, "Sequence violation: {message}"),
            Self::Unauthorized { message } => write!(f, "Unauthorized: {message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::DownstreamFailure { message } => write!(f, "Downstream failure: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly across the API boundary.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Validation(domain_err) => ApiError::InvalidInput {
            message: domain_err.to_string(),
        },
        CoreError::Sequence(domain_err) => ApiError::SequenceViolation {
            message: domain_err.to_string(),
        },
        CoreError::Authorization(domain_err) => ApiError::Unauthorized {
            message: domain_err.to_string(),
        },
        CoreError::NotFound {
            resource_type,
            message,
        } => ApiError::ResourceNotFound {
            resource_type,
            message,
        },
        CoreError::ConcurrencyConflict {
            work_order,
            op_index,
        } => ApiError::Conflict {
            message: format!(
                "Operation {op_index} of work order '{work_order}' is being reported by someone else; retry"
            ),
        },
        CoreError::Downstream {
            work_order,
            op_index,
            message,
        } => ApiError::DownstreamFailure {
            message: format!(
                "Punch on operation {op_index} of work order '{work_order}' was recorded, but the job card completion failed: {message}"
            ),
        },
        CoreError::Internal { message } => ApiError::Internal { message },
    }
}
