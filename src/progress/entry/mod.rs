pub(crate) mod update;

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use validit::Validate;

use crate::progress::entry::update::Updater;
use crate::LogIndex;

/// State of replication to a target node, held by the leader.
#[derive(Clone, Debug)]
#[derive(PartialEq, Eq)]
pub struct ProgressEntry {
    /// The index of the last log known to match on the target node, a.k.a. `matchIndex`.
    ///
    /// It never decreases.
    pub(crate) matching: LogIndex,

    /// The index of the next log to send, a.k.a. `nextIndex`.
    ///
    /// The next AppendEntries carries `prev_log_index = next_index - 1`.
    pub(crate) next_index: LogIndex,

    /// A snapshot has been triggered for the target and is not installed yet.
    pub(crate) snapshot_inflight: bool,

    /// The target violated the protocol; no more results are accepted from it.
    pub(crate) closed: bool,
}

impl ProgressEntry {
    /// Create a progress entry for a new leader whose last log index is `leader_last_index`.
    ///
    /// Nothing is known to match yet; replication starts by probing right after the leader's
    /// last log.
    pub fn new(leader_last_index: LogIndex) -> Self {
        Self {
            matching: 0,
            next_index: leader_last_index + 1,
            snapshot_inflight: false,
            closed: false,
        }
    }

    /// Create a progress entry that already matches up to `matching`.
    pub fn with_matching(matching: LogIndex) -> Self {
        Self {
            matching,
            next_index: matching + 1,
            snapshot_inflight: false,
            closed: false,
        }
    }

    pub(crate) fn new_updater(&mut self) -> Updater<'_> {
        Updater::new(self)
    }

    pub fn matching(&self) -> LogIndex {
        self.matching
    }

    pub fn next_index(&self) -> LogIndex {
        self.next_index
    }

    /// The `prev_log_index` of the next AppendEntries to send.
    pub fn prev_index(&self) -> LogIndex {
        self.next_index - 1
    }

    pub fn is_snapshot_inflight(&self) -> bool {
        self.snapshot_inflight
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Display for ProgressEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{matching:{}, next:{}", self.matching, self.next_index)?;
        if self.snapshot_inflight {
            write!(f, ", snapshot")?;
        }
        if self.closed {
            write!(f, ", closed")?;
        }
        write!(f, "}}")
    }
}

impl Validate for ProgressEntry {
    fn validate(&self) -> Result<(), Box<dyn Error>> {
        validit::less_equal!(self.matching + 1, self.next_index);
        Ok(())
    }
}
