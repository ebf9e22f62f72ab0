use crate::NodeId;

/// Request the InstallSnapshot task to send a snapshot to `target`.
///
/// At most one trigger is sent for a follower until the snapshot is reported installed with
/// [`ProgressTable::snapshot_installed`](crate::ProgressTable::snapshot_installed).
#[derive(Debug, Clone, Copy)]
#[derive(PartialEq, Eq)]
#[derive(derive_more::Display)]
#[display(fmt = "SnapshotTrigger{{target:{}}}", target)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SnapshotTrigger {
    pub target: NodeId,
}

impl SnapshotTrigger {
    pub fn new(target: NodeId) -> Self {
        Self { target }
    }
}
