use crate::LogIndex;
use crate::NodeId;

/// A follower replied with a result that no conforming follower can produce.
///
/// It is fatal to the replication session with that follower.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("follower {target} violates append-result protocol: {kind}")]
pub struct ProtocolViolation {
    pub target: NodeId,
    pub kind: ViolationKind,
}

impl ProtocolViolation {
    pub fn new(target: NodeId, kind: ViolationKind) -> Self {
        Self { target, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ViolationKind {
    /// Matched nothing while the leader has logs to replicate.
    #[display(fmt = "matched index 0 while leader last index is {}", leader_last)]
    MatchedEmptyLog { leader_last: LogIndex },

    /// Reports no log at all after it has confirmed logs up to `matching`.
    #[display(fmt = "no log while matching index is {}", matching)]
    NoLogAfterMatched { matching: LogIndex },

    /// Claims to match logs the leader does not have.
    #[display(fmt = "matched index {} beyond leader last index {}", index, leader_last)]
    MatchedBeyondLeaderLog { index: LogIndex, leader_last: LogIndex },

    /// A conflict can only be found at or before the `prev_log_index` the leader sent.
    #[display(fmt = "conflict index {} beyond leader last index {}", index, leader_last)]
    ConflictBeyondLeaderLog { index: LogIndex, leader_last: LogIndex },
}
