// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation status derivation and transition logic.
//!
//! Status is a pure derivation from the operation's reported quantities
//! and the pending bound in force; it is never advanced by time alone.

use crate::error::DomainError;
use crate::types::EPSILON;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The reporting status of a work order operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    /// No quantity has been reported yet.
    #[default]
    Pending,
    /// Some quantity has been reported, but less than the bound.
    PartiallyReported,
    /// The full bound has been reported. Terminal.
    Completed,
}

impl OperationStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PartiallyReported => "partially_reported",
            Self::Completed => "completed",
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "partially_reported" => Ok(Self::PartiallyReported),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus {
                status: s.to_owned(),
            }),
        }
    }

    /// Returns true if this status is terminal.
    ///
    /// Completed operations never transition away from Completed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Derives the status from the reported total and the bound in force.
    ///
    /// # Arguments
    ///
    /// * `done` - The operation's `completed_qty + rejected_qty`
    /// * `bound` - The pending bound captured at transaction start
    #[must_use]
    pub fn derive(done: f64, bound: f64) -> Self {
        if done + EPSILON >= bound && bound > 0.0 {
            Self::Completed
        } else if done > 0.0 {
            Self::PartiallyReported
        } else {
            Self::Pending
        }
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// Status only ever advances: Pending → `PartiallyReported` →
    /// Completed, with either intermediate step skippable.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_owned(),
                to: new_status.as_str().to_owned(),
                reason: String::from("cannot transition from terminal state"),
            });
        }

        let valid = match self {
            Self::Pending => matches!(new_status, Self::PartiallyReported | Self::Completed),
            Self::PartiallyReported => {
                matches!(new_status, Self::PartiallyReported | Self::Completed)
            }
            Self::Completed => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_owned(),
                to: new_status.as_str().to_owned(),
                reason: String::from("status never regresses"),
            })
        }
    }
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
