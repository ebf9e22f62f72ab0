//! Read access to a local log, the only thing the append-result decisions need from storage.

mod log_id_list;


use std::sync::Arc;

pub use log_id_list::LogIdList;

use crate::LogIndex;
use crate::Term;

/// APIs to read the term of log entries, on either the follower or the leader.
///
/// Terms along a log are non-decreasing. Index `0` never holds an entry, thus `last_index() == 0`
/// means the log is empty.
///
/// The provided methods scan the log one index at a time. Implementations that keep an index of
/// term changes, such as [`LogIdList`], should override them.
pub trait LogReader {
    /// The term of the entry at `index`, or `None` if there is no such entry.
    fn term_at(&self, index: LogIndex) -> Option<Term>;

    /// The index of the last entry, or `0` if the log is empty.
    fn last_index(&self) -> LogIndex;

    /// Return the first index of the run of entries sharing the term of the entry at `index`.
    ///
    /// Returns `None` if there is no entry at `index`.
    fn first_index_of_run(&self, index: LogIndex) -> Option<LogIndex> {
        let term = self.term_at(index)?;

        let mut first = index;
        while first > 1 {
            match self.term_at(first - 1) {
                Some(t) if t == term => first -= 1,
                _ => break,
            }
        }

        Some(first)
    }

    /// Return the greatest index `j` in `1..before` whose entry has a term `<= term`.
    fn last_index_with_term_at_most(&self, term: Term, before: LogIndex) -> Option<LogIndex> {
        let mut i = std::cmp::min(before.saturating_sub(1), self.last_index());

        while i >= 1 {
            match self.term_at(i) {
                Some(t) if t <= term => return Some(i),
                Some(_) => i -= 1,
                None => return None,
            }
        }

        None
    }
}

impl<T> LogReader for &T
where T: LogReader + ?Sized
{
    fn term_at(&self, index: LogIndex) -> Option<Term> {
        (**self).term_at(index)
    }

    fn last_index(&self) -> LogIndex {
        (**self).last_index()
    }

    fn first_index_of_run(&self, index: LogIndex) -> Option<LogIndex> {
        (**self).first_index_of_run(index)
    }

    fn last_index_with_term_at_most(&self, term: Term, before: LogIndex) -> Option<LogIndex> {
        (**self).last_index_with_term_at_most(term, before)
    }
}

impl<T> LogReader for Arc<T>
where T: LogReader + ?Sized
{
    fn term_at(&self, index: LogIndex) -> Option<Term> {
        (**self).term_at(index)
    }

    fn last_index(&self) -> LogIndex {
        (**self).last_index()
    }

    fn first_index_of_run(&self, index: LogIndex) -> Option<LogIndex> {
        (**self).first_index_of_run(index)
    }

    fn last_index_with_term_at_most(&self, term: Term, before: LogIndex) -> Option<LogIndex> {
        (**self).last_index_with_term_at_most(term, before)
    }
}
