//! This mod defines the identity of a raft log entry.

use std::fmt::Display;
use std::fmt::Formatter;

/// A monotonically increasing leadership epoch.
pub type Term = u64;

/// The position of an entry in the log. Index `0` never holds an entry.
pub type LogIndex = u64;

/// The identity of a raft log.
///
/// It is composed of the term of the leader that proposed the log and an integer index. Log ids
/// are totally ordered by `(term, index)`.
#[derive(Debug, Default, Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct LogId {
    /// The term of the leader that proposed this log.
    pub term: Term,

    /// The index of a log in the storage.
    ///
    /// Log index is a consecutive integer.
    pub index: LogIndex,
}

impl LogId {
    pub fn new(term: Term, index: LogIndex) -> Self {
        LogId { term, index }
    }
}

impl Display for LogId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.term, self.index)
    }
}
