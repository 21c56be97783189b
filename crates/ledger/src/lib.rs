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

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use wo_punch_domain::EmployeeNumber;

/// An immutable record of one quantity punch against one operation.
///
/// Every accepted punch produces exactly one record. Records are
/// immutable once created and capture:
/// - Which operation absorbed the quantities (`op_index`)
/// - Who reported them (employee number and display name)
/// - The produced and rejected quantities
/// - Why units were rejected, when any were
/// - When the punch was posted
/// - The ledger position (`seq`), which defines chronological order and
///   is the tie-break for "latest punch"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchRecord {
    /// The operation's sequence index within its work order.
    pub op_index: usize,
    /// The reporting employee's badge number.
    pub employee_number: EmployeeNumber,
    /// The reporting employee's display name.
    pub employee_name: String,
    /// Accepted-good units in this punch.
    pub produced_qty: f64,
    /// Rejected units in this punch.
    pub rejected_qty: f64,
    /// The rejection reason. Present whenever `rejected_qty > 0`.
    pub rejection_reason: Option<String>,
    /// When the punch was posted.
    #[serde(with = "time::serde::rfc3339")]
    pub posting_datetime: OffsetDateTime,
    /// Monotonically increasing position within the operation's ledger.
    /// Assigned on append; 0 before the record has been appended.
    pub seq: u64,
}

impl PunchRecord {
    /// Creates a new, not-yet-appended `PunchRecord`.
    ///
    /// The ledger assigns `seq` when the record is appended.
    ///
    /// # Arguments
    ///
    /// * `op_index` - The operation's sequence index
    /// * `employee_number` - The reporting employee's badge number
    /// * `employee_name` - The reporting employee's display name
    /// * `produced_qty` - Accepted-good units
    /// * `rejected_qty` - Rejected units
    /// * `rejection_reason` - The reason, when units were rejected
    /// * `posting_datetime` - When the punch was posted
    #[must_use]
    pub const fn new(
        op_index: usize,
        employee_number: EmployeeNumber,
        employee_name: String,
        produced_qty: f64,
        rejected_qty: f64,
        rejection_reason: Option<String>,
        posting_datetime: OffsetDateTime,
    ) -> Self {
        Self {
            op_index,
            employee_number,
            employee_name,
            produced_qty,
            rejected_qty,
            rejection_reason,
            posting_datetime,
            seq: 0,
        }
    }
}

/// The append-only punch ledger for one operation.
///
/// The ledger is the reconciliation source of truth: the sums of its
/// records' quantities equal the operation's aggregate fields at all
/// times. Records are never mutated or removed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PunchLedger {
    /// The ordered records, ascending by `seq`.
    records: Vec<PunchRecord>,
}

impl PunchLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a record, assigning the next sequence number.
    ///
    /// Returns the record as appended. The caller is responsible for
    /// holding the operation's critical section; the ledger itself only
    /// guarantees ordering.
    pub fn append(&mut self, mut record: PunchRecord) -> PunchRecord {
        record.seq = self.records.len() as u64 + 1;
        self.records.push(record.clone());
        record
    }

    /// Returns the records in chronological order.
    #[must_use]
    pub fn records(&self) -> &[PunchRecord] {
        &self.records
    }

    /// Returns the most recent record, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&PunchRecord> {
        self.records.last()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no punch has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sums the produced quantities of all records.
    ///
    /// Reconciliation: this equals the operation's `completed_qty`.
    #[must_use]
    pub fn produced_total(&self) -> f64 {
        self.records.iter().map(|record| record.produced_qty).sum()
    }

    /// Sums the rejected quantities of all records.
    ///
    /// Reconciliation: this equals the operation's `rejected_qty`.
    #[must_use]
    pub fn rejected_total(&self) -> f64 {
        self.records.iter().map(|record| record.rejected_qty).sum()
    }
}
