// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::apply;
use crate::collaborators::{EmployeeDirectory, JobCardCompletion, RecordStore};
use crate::command::Command;
use crate::error::CoreError;
use crate::state::{PunchOutcome, TransitionResult};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};
use wo_punch_domain::{WorkOrder, WorkOrderId, Workstation};
use wo_punch_ledger::PunchRecord;

/// The single write path into the punch engine.
///
/// One service instance serves all work orders. The unit of mutual
/// exclusion is one operation within one work order: a punch reads,
/// validates, and commits under that operation's lock, so concurrent
/// punches against the same operation serialize while punches against
/// different operations (including adjacent ones in a chain) run
/// concurrently.
pub struct ReportOperationService {
    /// The host record store.
    store: Arc<dyn RecordStore>,
    /// The employee directory.
    directory: Arc<dyn EmployeeDirectory>,
    /// The downstream Job Card completion action.
    job_cards: Arc<dyn JobCardCompletion>,
    /// Bound on critical-section acquisition. On expiry the punch fails
    /// fast with `ConcurrencyConflict` instead of queuing.
    lock_timeout: Duration,
    /// Per-operation lock registry, keyed by work order and index.
    op_locks: StdMutex<HashMap<(WorkOrderId, usize), Arc<Mutex<()>>>>,
}

impl ReportOperationService {
    /// Creates a new service over the given collaborators.
    ///
    /// # Arguments
    ///
    /// * `store` - The host record store
    /// * `directory` - The employee directory
    /// * `job_cards` - The downstream Job Card completion action
    /// * `lock_timeout` - Bound on critical-section acquisition
    #[must_use]
    pub fn new(
        store: Arc<dyn RecordStore>,
        directory: Arc<dyn EmployeeDirectory>,
        job_cards: Arc<dyn JobCardCompletion>,
        lock_timeout: Duration,
    ) -> Self {
        Self {
            store,
            directory,
            job_cards,
            lock_timeout,
            op_locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Returns the lock guarding one operation's critical section.
    fn operation_lock(&self, work_order: &WorkOrderId, op_index: usize) -> Arc<Mutex<()>> {
        let mut registry = match self.op_locks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        registry
            .entry((work_order.clone(), op_index))
            .or_default()
            .clone()
    }

    /// Reports one punch end-to-end.
    ///
    /// Validation, authorization, the ledger append, and the aggregate
    /// update happen inside the operation's critical section; the
    /// downstream Job Card trigger runs after the commit, outside it.
    ///
    /// # Arguments
    ///
    /// * `command` - The punch command
    ///
    /// # Returns
    ///
    /// * `Ok(PunchOutcome)` once the punch is committed
    /// * `Err(CoreError)` with no mutation on any precondition failure;
    ///   `CoreError::Downstream` is the one post-commit error and the
    ///   punch stands
    ///
    /// # Errors
    ///
    /// Returns an error classified per the taxonomy in [`CoreError`].
    pub async fn report_operation(&self, command: Command) -> Result<PunchOutcome, CoreError> {
        let Command::ReportOperation {
            work_order: work_order_id,
            op_index,
            operation_name,
            employee_number,
            produced_qty,
            rejected_qty,
            posting_datetime,
            force_complete,
            ..
        } = &command;
        let op_index = *op_index;

        let employee =
            self.directory
                .lookup(employee_number)
                .ok_or_else(|| CoreError::NotFound {
                    resource_type: String::from("Employee"),
                    message: format!("Employee '{employee_number}' not found"),
                })?;

        let posting = posting_datetime.unwrap_or_else(OffsetDateTime::now_utc);

        let lock = self.operation_lock(work_order_id, op_index);
        let Ok(guard) = tokio::time::timeout(self.lock_timeout, lock.lock()).await else {
            return Err(CoreError::ConcurrencyConflict {
                work_order: work_order_id.value().to_owned(),
                op_index,
            });
        };

        // Committed snapshot, read under the lock so the pending bound
        // is authoritative for this punch.
        let work_order =
            self.store
                .work_order(work_order_id)
                .ok_or_else(|| CoreError::NotFound {
                    resource_type: String::from("Work order"),
                    message: format!("Work order '{work_order_id}' not found"),
                })?;

        let workstation: Option<Workstation> = work_order
            .operations
            .get(op_index)
            .and_then(|operation| operation.workstation.as_deref())
            .and_then(|id| self.store.workstation(id));

        let transition: TransitionResult = apply(
            &work_order,
            workstation.as_ref(),
            &employee,
            &command,
            posting,
        )?;

        let committed = self
            .store
            .commit_punch(
                work_order_id,
                op_index,
                transition.new_operation,
                transition.produced_roll_up,
                transition.record,
            )
            .map_err(|e| CoreError::Internal {
                message: e.to_string(),
            })?;
        drop(guard);

        let op_label = operation_name
            .clone()
            .unwrap_or_else(|| format!("#{op_index}"));
        info!(
            work_order = %work_order_id,
            op_index,
            employee = %employee.employee_number,
            produced = produced_qty,
            rejected = rejected_qty,
            seq = committed.seq,
            completed = transition.operation_completed,
            "Punch committed"
        );

        if transition.operation_completed {
            if let Err(failure) =
                self.job_cards
                    .complete(work_order_id, op_index, *force_complete)
            {
                error!(
                    work_order = %work_order_id,
                    op_index,
                    error = %failure,
                    "Job card completion failed after commit"
                );
                return Err(CoreError::Downstream {
                    work_order: work_order_id.value().to_owned(),
                    op_index,
                    message: format!("punch recorded (seq {}); {failure}", committed.seq),
                });
            }
        }

        Ok(PunchOutcome {
            remaining_pending: transition.remaining_pending,
            operation_completed: transition.operation_completed,
            punch_seq: committed.seq,
            message: format!(
                "Operation {op_label} reported: produced {produced_qty}, rejected {rejected_qty}. Remaining for this op: {}",
                transition.remaining_pending
            ),
        })
    }

    /// Returns a committed snapshot of a work order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown work order.
    pub fn work_order(&self, work_order: &WorkOrderId) -> Result<WorkOrder, CoreError> {
        self.store
            .work_order(work_order)
            .ok_or_else(|| CoreError::NotFound {
                resource_type: String::from("Work order"),
                message: format!("Work order '{work_order}' not found"),
            })
    }

    /// Returns the committed punch logs of a work order, keyed by
    /// operation index, chronological within each operation.
    ///
    /// Reads never take the operation locks and only ever observe
    /// committed punches.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown work order.
    pub fn punch_logs(
        &self,
        work_order: &WorkOrderId,
    ) -> Result<BTreeMap<usize, Vec<PunchRecord>>, CoreError> {
        self.store
            .punch_logs(work_order)
            .ok_or_else(|| CoreError::NotFound {
                resource_type: String::from("Work order"),
                message: format!("Work order '{work_order}' not found"),
            })
    }

    /// Returns a workstation's raw allow-list.
    ///
    /// An unknown workstation yields the empty string (permit any), so
    /// the presentation layer can always render the field.
    #[must_use]
    pub fn workstation_allowed(&self, workstation: &str) -> String {
        self.store
            .workstation(workstation)
            .map(|record| record.allowed_employees)
            .unwrap_or_default()
    }
}
