// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Workstation allow-list authorization.
//!
//! Workstations may carry a raw allow-list of employee identifiers. An
//! empty or absent list permits any employee; otherwise the reporting
//! employee must match one of the tokens.

use crate::error::DomainError;
use crate::types::{Employee, Workstation};

/// Splits a raw allow-list into normalized tokens.
///
/// Tokens are separated by comma or semicolon, trimmed, uppercased, and
/// empty entries are dropped.
///
/// # Arguments
///
/// * `raw` - The raw allow-list string from the workstation record
#[must_use]
pub fn parse_allow_list(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_uppercase)
        .collect()
}

/// Checks whether an employee may report against a workstation.
///
/// Matching is case-insensitive over the employee's candidate
/// identifiers: badge number, canonical id, and display name. A missing
/// workstation permits the punch (the downstream Job Card trigger may
/// still refuse to complete; that is its contract, not this gate's).
///
/// # Arguments
///
/// * `workstation` - The workstation record, if the operation has one
/// * `employee` - The reporting employee
///
/// # Errors
///
/// Returns `DomainError::EmployeeNotAuthorized` if the workstation
/// carries a non-empty allow-list and no candidate identifier matches.
pub fn authorize_employee(
    workstation: Option<&Workstation>,
    employee: &Employee,
) -> Result<(), DomainError> {
    let Some(workstation) = workstation else {
        return Ok(());
    };

    let tokens = parse_allow_list(&workstation.allowed_employees);
    if tokens.is_empty() {
        return Ok(());
    }

    let candidates = [
        employee.employee_number.value().to_uppercase(),
        employee.canonical_id.to_uppercase(),
        employee.display_name.to_uppercase(),
    ];

    if candidates
        .iter()
        .any(|candidate| tokens.iter().any(|token| token == candidate))
    {
        Ok(())
    } else {
        Err(DomainError::EmployeeNotAuthorized {
            workstation: workstation.id.clone(),
            employee_number: employee.employee_number.value().to_owned(),
        })
    }
}
