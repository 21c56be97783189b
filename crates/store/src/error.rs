// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the store layer.

use thiserror::Error;

/// Errors that can occur while seeding or mutating the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A work order with the same identifier already exists.
    #[error("Work order '{0}' already exists")]
    DuplicateWorkOrder(String),

    /// The requested work order was not found.
    #[error("Work order '{0}' not found")]
    WorkOrderNotFound(String),

    /// The operation index does not exist on the work order.
    #[error("Operation index {op_index} out of range for work order '{work_order}'")]
    OperationIndexOutOfRange {
        /// The work order identifier.
        work_order: String,
        /// The requested operation index.
        op_index: usize,
    },
}
