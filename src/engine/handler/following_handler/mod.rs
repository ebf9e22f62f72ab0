use crate::display_ext::DisplaySliceExt;
use crate::storage::LogReader;
use crate::AppendResult;
use crate::LogId;
use crate::LogIndex;
use crate::Term;


/// Check replication requests against the local log.
///
/// It implements the follower/learner side of the append-result protocol. It only reads the
/// log: appending and truncating entries are done by the caller according to the result.
pub(crate) struct FollowingHandler<'x, L>
where L: LogReader + ?Sized
{
    pub(crate) log: &'x L,
}

impl<'x, L> FollowingHandler<'x, L>
where L: LogReader + ?Sized
{
    /// Decide whether the local log matches the leader's at `prev_log_index`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(crate) fn evaluate(&self, prev_log_index: LogIndex, prev_log_term: Term, entries: &[LogId]) -> AppendResult {
        tracing::debug!(
            prev_log_index = prev_log_index,
            prev_log_term = prev_log_term,
            entries = display(entries.display()),
            my_last_index = self.log.last_index(),
            "append-entries request"
        );

        if let Some(x) = entries.first() {
            debug_assert_eq!(x.index, prev_log_index + 1);
        }

        let last_index = entries.last().map(|x| x.index).unwrap_or(prev_log_index);

        let res = self.check_prev(prev_log_index, prev_log_term, last_index);

        tracing::debug!(result = display(&res), "append-entries result");
        res
    }

    fn check_prev(&self, prev_log_index: LogIndex, prev_log_term: Term, last_index: LogIndex) -> AppendResult {
        // Replicating logs from the very beginning, nothing to match.
        if prev_log_index == 0 {
            return AppendResult::matched(last_index);
        }

        match self.log.term_at(prev_log_index) {
            Some(local_term) if local_term == prev_log_term => AppendResult::matched(last_index),

            Some(local_term) => {
                // Report the start of the conflicting run so that the leader skips the whole run.
                let first = self.log.first_index_of_run(prev_log_index).unwrap_or(prev_log_index);

                tracing::debug!(
                    local_term = local_term,
                    first_of_run = first,
                    "prev_log_id does not match"
                );

                AppendResult::conflict(first, Some(local_term))
            }

            None => {
                let my_last = self.log.last_index();

                if my_last == 0 {
                    tracing::debug!("no local log");
                    AppendResult::NoLog
                } else if my_last < prev_log_index {
                    tracing::debug!(my_last_index = my_last, "local log is shorter than prev_log_index");
                    AppendResult::conflict(my_last + 1, None)
                } else {
                    // The local log starts after `prev_log_index`: the entries before it are
                    // compacted into a snapshot, which only contains committed entries. Committed
                    // entries always match the leader's.
                    tracing::debug!(my_last_index = my_last, "prev_log_index is before the first local log");
                    AppendResult::matched(last_index)
                }
            }
        }
    }
}
