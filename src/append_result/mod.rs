//! The result a follower returns to the leader after processing an AppendEntries request.

mod codec;


use std::fmt;

pub use codec::IndexEncoding;

use crate::display_ext::DisplayOptionExt;
use crate::LogIndex;
use crate::Term;

/// The response to an AppendEntries request.
///
/// It is the only information a leader receives about a follower's log, and it must tell the
/// three outcomes apart:
///
/// | case       | success | index | non_matching_term                     |
/// | :--        | :--     | :--   | :--                                   |
/// | `Matched`  | true    | `i`   | -                                     |
/// | `Conflict` | false   | `i>0` | the follower's term at `i`, if known  |
/// | `NoLog`    | false   | `0`   | -                                     |
///
/// `non_matching_term` is only known to the follower that built the result: it is not
/// transmitted, and a result decoded from the wire always has `non_matching_term == None`.
#[derive(Debug, Clone, Copy)]
#[derive(PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AppendResult {
    /// The follower's log matches the leader's up to and including `index`.
    Matched { index: LogIndex },

    /// The follower's log does not match the leader's at `index`.
    ///
    /// `index` is the first index of the follower's run of entries with `non_matching_term`, so
    /// that the leader can skip the entire run in one round trip.
    ///
    /// If the follower has no entry at `index` at all, i.e., its log is shorter than the
    /// leader expected, `index` is one past its last log and `non_matching_term` is `None`.
    Conflict {
        index: LogIndex,
        non_matching_term: Option<Term>,
    },

    /// The follower has no log at all and has to be caught up with a snapshot.
    NoLog,
}

impl AppendResult {
    pub fn matched(index: LogIndex) -> Self {
        AppendResult::Matched { index }
    }

    pub fn conflict(index: LogIndex, non_matching_term: Option<Term>) -> Self {
        debug_assert!(index > 0, "index 0 of a failed append means no-log");
        AppendResult::Conflict {
            index,
            non_matching_term,
        }
    }

    /// Returns true if the follower's log now matches the leader's.
    pub fn is_success(&self) -> bool {
        matches!(self, AppendResult::Matched { .. })
    }

    /// Returns true if the follower has no log and requires a snapshot.
    pub fn is_no_log(&self) -> bool {
        matches!(self, AppendResult::NoLog)
    }

    /// The index carried on the wire.
    ///
    /// The last matching index on success, the first conflicting index on conflict, and `0` if
    /// the follower has no log.
    pub fn index(&self) -> LogIndex {
        match self {
            AppendResult::Matched { index } => *index,
            AppendResult::Conflict { index, .. } => *index,
            AppendResult::NoLog => 0,
        }
    }

    /// The follower's term at the conflicting index.
    ///
    /// Always `None` for `Matched` and `NoLog`, and for a `Conflict` decoded from the wire.
    pub fn non_matching_term(&self) -> Option<Term> {
        match self {
            AppendResult::Conflict {
                non_matching_term, ..
            } => *non_matching_term,
            _ => None,
        }
    }

    /// Returns the result as the receiving end of the wire sees it.
    ///
    /// Compare a result built by the follower with a decoded one only after stripping it.
    pub fn to_wire_view(&self) -> Self {
        match *self {
            AppendResult::Conflict { index, .. } => AppendResult::Conflict {
                index,
                non_matching_term: None,
            },
            other => other,
        }
    }
}

impl fmt::Display for AppendResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppendResult::Matched { index } => write!(f, "Matched({})", index),
            AppendResult::Conflict {
                index,
                non_matching_term,
            } => {
                write!(f, "Conflict({}, term:{})", index, non_matching_term.display())
            }
            AppendResult::NoLog => write!(f, "NoLog"),
        }
    }
}
