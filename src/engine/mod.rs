//! The two decision points of the append-result protocol.
//!
//! A follower evaluates an AppendEntries request against its local log and produces an
//! [`AppendResult`]. The leader reconciles the result against the follower's replication progress
//! and decides the [`NextAction`].

mod next_action;

pub(crate) mod handler;

pub use next_action::NextAction;

use crate::engine::handler::following_handler::FollowingHandler;
use crate::engine::handler::replication_handler::ReplicationHandler;
use crate::errors::ProtocolViolation;
use crate::progress::ProgressEntry;
use crate::storage::LogReader;
use crate::AppendResult;
use crate::Config;
use crate::LogId;
use crate::LogIndex;
use crate::NodeId;
use crate::Term;

/// Check an AppendEntries request against the follower's local `log`.
///
/// `entries` are the ids of the entries carried by the request; they start at
/// `prev_log_index + 1`. Appending them to the log is up to the caller and happens only if the
/// result is a success.
pub fn evaluate<L>(prev_log_index: LogIndex, prev_log_term: Term, entries: &[LogId], log: &L) -> AppendResult
where L: LogReader + ?Sized {
    FollowingHandler { log }.evaluate(prev_log_index, prev_log_term, entries)
}

/// Apply the `result` received from follower `target` to its replication `progress`.
///
/// The returned [`NextAction`] tells how to continue replicating to `target`. A
/// [`ProtocolViolation`] means the follower is not conforming and replication to it must stop.
pub fn reconcile<L>(
    target: NodeId,
    result: &AppendResult,
    progress: &mut ProgressEntry,
    leader_log: &L,
    config: &Config,
) -> Result<NextAction, ProtocolViolation>
where
    L: LogReader + ?Sized,
{
    ReplicationHandler { config, leader_log }.reconcile(target, result, progress)
}
