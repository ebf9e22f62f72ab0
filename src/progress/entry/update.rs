use crate::progress::entry::ProgressEntry;
use crate::LogIndex;

/// It implements updating operations for a [`ProgressEntry`]
pub(crate) struct Updater<'a> {
    entry: &'a mut ProgressEntry,
}

impl<'a> Updater<'a> {
    pub(crate) fn new(entry: &'a mut ProgressEntry) -> Self {
        Self { entry }
    }

    /// Update the matching log index.
    ///
    /// A smaller `matching` than the current one is from a reordered or duplicated result, and
    /// does not move the cursor back.
    pub(crate) fn update_matching(&mut self, matching: LogIndex) {
        tracing::debug!("update_matching: current progress_entry: {}; matching: {}", self.entry, matching);

        if matching < self.entry.matching {
            tracing::debug!(
                "matching {} < current matching {}: stale result, ignored",
                matching,
                self.entry.matching
            );
        }

        self.entry.matching = std::cmp::max(self.entry.matching, matching);
        self.entry.next_index = std::cmp::max(self.entry.next_index, self.entry.matching + 1);
        self.entry.snapshot_inflight = false;
    }

    /// Move the next AppendEntries back to probe at `prev_index`, after a conflict is found.
    ///
    /// `prev_index` must not be smaller than the matching index.
    pub(crate) fn update_conflicting(&mut self, prev_index: LogIndex) {
        tracing::debug!(
            "update_conflicting: current progress_entry: {}; prev_index: {}",
            self.entry,
            prev_index
        );

        debug_assert!(prev_index >= self.entry.matching);
        self.entry.next_index = prev_index + 1;
    }

    /// Mark a snapshot as in flight.
    pub(crate) fn begin_snapshot(&mut self) {
        self.entry.snapshot_inflight = true;
    }

    /// Forget an in flight snapshot whose trigger could not be delivered.
    pub(crate) fn cancel_snapshot(&mut self) {
        self.entry.snapshot_inflight = false;
    }

    /// A snapshot including logs up to `last_included_index` is installed on the target.
    pub(crate) fn snapshot_installed(&mut self, last_included_index: LogIndex) {
        tracing::debug!(
            "snapshot_installed: current progress_entry: {}; last_included_index: {}",
            self.entry,
            last_included_index
        );

        self.update_matching(last_included_index);
    }

    pub(crate) fn close(&mut self) {
        self.entry.closed = true;
    }
}
