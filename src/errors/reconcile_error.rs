use crate::errors::ProtocolViolation;
use crate::NodeId;

/// Error returned by [`ProgressTable`](crate::ProgressTable) when it can not apply a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error(transparent)]
    ProtocolViolation(#[from] ProtocolViolation),

    #[error("follower {0} is not replicated by this leader")]
    FollowerNotFound(NodeId),

    /// The session was closed by an earlier protocol violation.
    #[error("replication session to follower {0} is closed")]
    SessionClosed(NodeId),

    #[error("snapshot trigger receiver is closed, can not trigger snapshot for follower {0}")]
    SnapshotReceiverClosed(NodeId),
}
