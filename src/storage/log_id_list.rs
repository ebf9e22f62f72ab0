use crate::storage::LogReader;
use crate::LogId;
use crate::LogIndex;
use crate::Term;

/// Efficient in-memory index of log ids.
///
/// It stores only the ids of logs that start a new term, and the last log id at the end.
/// I.e., the first log id of every term run.
///
/// If it is not empty, the first one is the first present log and the last one is the last log.
/// The last one may have the same term as the second last one.
///
/// Given the logs `[1-1,1-2,3-3,3-4,3-5]` the key log ids are `[1-1,3-3,3-5]`.
#[derive(Default, Debug, Clone)]
#[derive(PartialEq, Eq)]
pub struct LogIdList {
    key_log_ids: Vec<LogId>,
}

impl LogIdList {
    /// Create a new `LogIdList` from a series of key log ids.
    pub fn new(key_log_ids: impl IntoIterator<Item = LogId>) -> Self {
        Self {
            key_log_ids: key_log_ids.into_iter().collect(),
        }
    }

    /// Extends the list with consecutive log ids.
    pub fn extend<I>(&mut self, new_ids: I)
    where I: IntoIterator<Item = LogId> {
        for log_id in new_ids {
            self.append(log_id);
        }
    }

    /// Append a new `log_id`.
    ///
    /// The log id to append does not have to be the next to the last one in `key_log_ids`.
    /// In such a case the gap is filled with entries of the term of the last log.
    ///
    /// NOTE: The last two in `key_log_ids` may have the same term, because the last log id is
    /// always present.
    pub fn append(&mut self, new_log_id: LogId) {
        let l = self.key_log_ids.len();
        if l == 0 {
            self.key_log_ids.push(new_log_id);
            return;
        }

        debug_assert!(
            new_log_id > self.key_log_ids[l - 1] && new_log_id.index > self.key_log_ids[l - 1].index,
            "new_log_id: {}, last: {}",
            new_log_id,
            self.key_log_ids[l - 1]
        );

        if l == 1 {
            self.key_log_ids.push(new_log_id);
            return;
        }

        // l >= 2

        let last = &self.key_log_ids[l - 1];

        if self.key_log_ids[l - 2].term == last.term {
            // Replace the **last log id**.
            self.key_log_ids[l - 1] = new_log_id;
            return;
        }

        // The last one is the first log of a term.
        // Add a **last log id** with the same term.

        self.key_log_ids.push(new_log_id);
    }

    /// Delete log ids from `at`, inclusive.
    pub fn truncate(&mut self, at: LogIndex) {
        let res = self.key_log_ids.binary_search_by(|log_id| log_id.index.cmp(&at));

        let i = match res {
            Ok(i) => i,
            Err(i) => {
                if i == self.key_log_ids.len() {
                    return;
                }
                i
            }
        };

        self.key_log_ids.truncate(i);

        // Add key log id if there is a gap between last.index and at - 1.
        if let Some(last) = self.key_log_ids.last().copied() {
            if last.index < at - 1 {
                self.append(LogId::new(last.term, at - 1));
            }
        }
    }

    /// Get the log id at the specified index.
    pub fn get(&self, index: LogIndex) -> Option<LogId> {
        let change_point = self.change_point(index)?;
        Some(LogId::new(self.key_log_ids[change_point].term, index))
    }

    pub fn first(&self) -> Option<&LogId> {
        self.key_log_ids.first()
    }

    pub fn last(&self) -> Option<&LogId> {
        self.key_log_ids.last()
    }

    pub fn key_log_ids(&self) -> &[LogId] {
        &self.key_log_ids
    }

    pub fn is_empty(&self) -> bool {
        self.key_log_ids.is_empty()
    }

    /// Position in `key_log_ids` of the term change point that covers `index`.
    fn change_point(&self, index: LogIndex) -> Option<usize> {
        let res = self.key_log_ids.binary_search_by(|log_id| log_id.index.cmp(&index));

        match res {
            Ok(i) => Some(i),
            Err(i) => {
                // i - 1 is the last one that is smaller than the input.
                if i == 0 || i == self.key_log_ids.len() {
                    None
                } else {
                    Some(i - 1)
                }
            }
        }
    }
}

impl LogReader for LogIdList {
    fn term_at(&self, index: LogIndex) -> Option<Term> {
        self.get(index).map(|x| x.term)
    }

    fn last_index(&self) -> LogIndex {
        self.last().map(|x| x.index).unwrap_or_default()
    }

    fn first_index_of_run(&self, index: LogIndex) -> Option<LogIndex> {
        let mut c = self.change_point(index)?;

        // The trailing last log id is not a change point if it shares the term of the one before.
        if c > 0 && self.key_log_ids[c - 1].term == self.key_log_ids[c].term {
            c -= 1;
        }

        Some(self.key_log_ids[c].index)
    }

    fn last_index_with_term_at_most(&self, term: Term, before: LogIndex) -> Option<LogIndex> {
        let ks = &self.key_log_ids;

        // Terms are non-decreasing, every log before the end of this run has a term `<= term`.
        let n = ks.partition_point(|x| x.term <= term);
        if n == 0 {
            return None;
        }

        let run_end = if n < ks.len() { ks[n].index - 1 } else { ks[n - 1].index };

        let j = std::cmp::min(run_end, before.saturating_sub(1));
        if j == 0 || j < ks[0].index {
            return None;
        }

        Some(j)
    }
}
