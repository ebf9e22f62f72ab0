//! Replication progress of every follower, held by a leader.
//!
//! Each follower's [`ProgressEntry`] is guarded by its own lock, so that results from different
//! followers are reconciled concurrently while results from one follower are applied one at a
//! time.

pub(crate) mod entry;

mod snapshot_trigger;


use std::collections::BTreeMap;
use std::sync::Arc;

pub use entry::ProgressEntry;
pub use snapshot_trigger::SnapshotTrigger;
use tokio::sync::mpsc;
use tokio::sync::Mutex;

use crate::engine::reconcile;
use crate::engine::NextAction;
use crate::errors::ReconcileError;
use crate::storage::LogReader;
use crate::AppendResult;
use crate::Config;
use crate::LogIndex;
use crate::NodeId;

/// The progress of all followers of one leadership.
///
/// It is built when a node becomes leader and dropped when it steps down.
pub struct ProgressTable {
    config: Arc<Config>,

    progresses: BTreeMap<NodeId, Mutex<ProgressEntry>>,

    tx_snapshot: mpsc::Sender<SnapshotTrigger>,
}

impl ProgressTable {
    /// Create a table for `targets`, with the leader's last log index `leader_last_index`.
    ///
    /// Snapshot triggers are delivered through the returned receiver.
    pub fn new(
        config: Arc<Config>,
        targets: impl IntoIterator<Item = NodeId>,
        leader_last_index: LogIndex,
    ) -> (Self, mpsc::Receiver<SnapshotTrigger>) {
        let (tx_snapshot, rx_snapshot) = mpsc::channel(std::cmp::max(1, config.snapshot_channel_size));

        let progresses = targets
            .into_iter()
            .map(|id| (id, Mutex::new(ProgressEntry::new(leader_last_index))))
            .collect();

        let table = Self {
            config,
            progresses,
            tx_snapshot,
        };

        (table, rx_snapshot)
    }

    pub fn targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.progresses.keys().copied()
    }

    /// A copy of the current progress of `target`.
    pub async fn progress(&self, target: NodeId) -> Option<ProgressEntry> {
        let p = self.progresses.get(&target)?;
        let entry = p.lock().await;
        Some(entry.clone())
    }

    /// Apply a result received from `target` and return what to do next for it.
    ///
    /// A protocol violation closes the session with `target`: this and every later result from
    /// it are rejected.
    #[tracing::instrument(level = "debug", skip(self, result, leader_log))]
    pub async fn handle_result<L>(
        &self,
        target: NodeId,
        result: AppendResult,
        leader_log: &L,
    ) -> Result<NextAction, ReconcileError>
    where
        L: LogReader + ?Sized,
    {
        let p = self.progresses.get(&target).ok_or(ReconcileError::FollowerNotFound(target))?;

        let mut entry = p.lock().await;

        if entry.is_closed() {
            tracing::debug!(result = display(&result), "session is closed, result ignored");
            return Err(ReconcileError::SessionClosed(target));
        }

        let snapshot_inflight = entry.is_snapshot_inflight();

        let action = match reconcile(target, &result, &mut *entry, leader_log, &self.config) {
            Ok(x) => x,
            Err(violation) => {
                tracing::error!("{}; close replication session", violation);
                entry.new_updater().close();
                return Err(violation.into());
            }
        };

        if action != NextAction::TriggerSnapshot {
            return Ok(action);
        }

        if snapshot_inflight {
            tracing::debug!("snapshot is already in flight, do not trigger again");
            return Ok(NextAction::TriggerSnapshot);
        }

        // The lock is held until the trigger is delivered, thus a concurrent result from `target`
        // sees whether the snapshot is actually in flight. The receiver never waits for this
        // lock: no trigger of `target` is queued or being handled while none is in flight.
        let res = self.tx_snapshot.send(SnapshotTrigger::new(target)).await;

        if let Err(e) = res {
            tracing::warn!("failed to send {}: receiver is closed", e.0);

            entry.new_updater().cancel_snapshot();
            return Err(ReconcileError::SnapshotReceiverClosed(target));
        }

        tracing::info!("snapshot triggered for follower {}", target);
        Ok(NextAction::TriggerSnapshot)
    }

    /// A snapshot including logs up to `last_included_index` is installed on `target`.
    pub async fn snapshot_installed(
        &self,
        target: NodeId,
        last_included_index: LogIndex,
    ) -> Result<(), ReconcileError> {
        let p = self.progresses.get(&target).ok_or(ReconcileError::FollowerNotFound(target))?;

        let mut entry = p.lock().await;
        if entry.is_closed() {
            return Err(ReconcileError::SessionClosed(target));
        }

        entry.new_updater().snapshot_installed(last_included_index);

        tracing::info!(
            progress = display(&*entry),
            "snapshot installed on follower {}",
            target
        );

        Ok(())
    }
}
