// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Tolerance absorbing floating rounding in pending-bound comparisons.
pub const EPSILON: f64 = 1e-9;

/// Tolerance for the exact-consumption check on explicit completion.
pub const COMPLETION_EPSILON: f64 = 1e-6;

/// Identifies a work order within the host record framework.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkOrderId {
    /// The work order name (e.g., "MFG-WO-2026-00042").
    value: String,
}

impl WorkOrderId {
    /// Creates a new `WorkOrderId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The work order name
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    /// Returns the work order name.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for WorkOrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A shop-floor employee badge number.
///
/// Numbers are normalized to uppercase so that allow-list matching and
/// directory lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeNumber {
    /// The normalized badge number.
    value: String,
}

impl EmployeeNumber {
    /// Creates a new `EmployeeNumber`.
    ///
    /// The value is trimmed and normalized to uppercase.
    ///
    /// # Arguments
    ///
    /// * `value` - The badge number as entered on the floor
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the normalized badge number.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for EmployeeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// An employee directory record.
///
/// The directory is an external collaborator; this is the shape of a
/// successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The badge number used on the shop floor.
    pub employee_number: EmployeeNumber,
    /// The canonical identifier in the host framework.
    pub canonical_id: String,
    /// The display name shown in punch logs.
    pub display_name: String,
}

/// A workstation record with its reporting allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workstation {
    /// The workstation identifier.
    pub id: String,
    /// Raw allow-list of employee identifiers, separated by comma or
    /// semicolon. Empty means any employee may report.
    pub allowed_employees: String,
}

/// A single operation in a work order's manufacturing chain.
///
/// The position of the operation in the work order's `operations` vector
/// is its sequence index; operation *i* depends on operation *i-1*.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The operation name (e.g., "Cutting", "Assembly").
    pub name: String,
    /// The workstation this operation runs on, if any.
    pub workstation: Option<String>,
    /// Operation-level required quantity candidate (highest priority).
    pub operation_qty: Option<f64>,
    /// Required quantity candidate.
    pub for_quantity: Option<f64>,
    /// Required quantity candidate.
    pub qty: Option<f64>,
    /// Required quantity candidate (lowest operation-level priority).
    pub required_qty: Option<f64>,
    /// Cumulative accepted-good units. Monotonically non-decreasing.
    pub completed_qty: f64,
    /// Cumulative rejected units. Monotonically non-decreasing.
    pub rejected_qty: f64,
    /// Whether the operation has been fully reported.
    pub reported: bool,
    /// Display name of the employee who completed the operation.
    /// Set once, at completion.
    pub reported_by: Option<String>,
    /// When the operation completed. Set once, at completion.
    #[serde(with = "time::serde::rfc3339::option")]
    pub reported_at: Option<OffsetDateTime>,
}

impl Operation {
    /// Creates a fresh, unreported operation.
    ///
    /// # Arguments
    ///
    /// * `name` - The operation name
    /// * `workstation` - The workstation identifier, if any
    /// * `operation_qty` - The operation-level required quantity, if set
    #[must_use]
    pub const fn new(
        name: String,
        workstation: Option<String>,
        operation_qty: Option<f64>,
    ) -> Self {
        Self {
            name,
            workstation,
            operation_qty,
            for_quantity: None,
            qty: None,
            required_qty: None,
            completed_qty: 0.0,
            rejected_qty: 0.0,
            reported: false,
            reported_by: None,
            reported_at: None,
        }
    }
}

/// A work order with its ordered operation chain.
///
/// Work orders are created and owned by the external host framework;
/// the punch engine reads them and updates operation aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// The work order identifier.
    pub id: WorkOrderId,
    /// Whether the work order has been submitted in the host framework.
    pub submitted: bool,
    /// Whether materials have been transferred to work-in-progress.
    /// Reporting is blocked until this is set.
    pub material_transferred: bool,
    /// The order-level production quantity. Fallback for required-qty
    /// resolution and the clamp for the produced roll-up.
    pub quantity: f64,
    /// Cumulative produced quantity rolled up from the last operation,
    /// clamped to `[0, quantity]`.
    pub produced_qty: f64,
    /// The ordered operation chain. Index *i* depends on index *i-1*.
    pub operations: Vec<Operation>,
}

impl WorkOrder {
    /// Creates a new submitted, material-transferred work order.
    ///
    /// Host-framework defaults for a work order that is ready to report.
    ///
    /// # Arguments
    ///
    /// * `id` - The work order identifier
    /// * `quantity` - The order-level production quantity
    /// * `operations` - The ordered operation chain
    #[must_use]
    pub const fn new(id: WorkOrderId, quantity: f64, operations: Vec<Operation>) -> Self {
        Self {
            id,
            submitted: true,
            material_transferred: true,
            quantity,
            produced_qty: 0.0,
            operations,
        }
    }
}
