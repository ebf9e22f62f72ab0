//! Testing utilities used by all kinds of tests.

use crate::LogId;
use crate::LogIndex;
use crate::Term;

/// Builds a log id, for testing purposes.
pub fn log_id(term: Term, index: LogIndex) -> LogId {
    LogId::new(term, index)
}

/// Builds the ids of the consecutive logs `[start, end]` of `term`.
pub fn log_ids(term: Term, start: LogIndex, end: LogIndex) -> Vec<LogId> {
    (start..=end).map(|i| LogId::new(term, i)).collect()
}
