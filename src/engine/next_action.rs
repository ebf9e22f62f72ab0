use crate::LogIndex;

/// What a leader does next for a follower after applying an [`AppendResult`].
///
/// [`AppendResult`]: crate::AppendResult
#[derive(Debug, Clone, Copy)]
#[derive(PartialEq, Eq)]
#[derive(derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum NextAction {
    /// The follower matches up to this index; continue replicating after it.
    #[display(fmt = "AdvanceCursor({})", _0)]
    AdvanceCursor(LogIndex),

    /// Send the next AppendEntries with this `prev_log_index`.
    #[display(fmt = "RetryAt({})", _0)]
    RetryAt(LogIndex),

    /// Stop incremental replication and install a snapshot on the follower.
    #[display(fmt = "TriggerSnapshot")]
    TriggerSnapshot,
}
