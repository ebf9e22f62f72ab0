use validit::Validate;

use crate::display_ext::DisplayOptionExt;
use crate::engine::NextAction;
use crate::errors::ProtocolViolation;
use crate::errors::ViolationKind;
use crate::progress::ProgressEntry;
use crate::storage::LogReader;
use crate::AppendResult;
use crate::Config;
use crate::LogIndex;
use crate::NodeId;
use crate::Term;


/// Handle append results received by a leader.
///
/// It updates the replication progress of one follower and decides how to continue
/// replicating to it.
pub(crate) struct ReplicationHandler<'x, L>
where L: LogReader + ?Sized
{
    pub(crate) config: &'x Config,
    pub(crate) leader_log: &'x L,
}

impl<'x, L> ReplicationHandler<'x, L>
where L: LogReader + ?Sized
{
    #[tracing::instrument(level = "debug", skip(self, result, entry))]
    pub(crate) fn reconcile(
        &self,
        target: NodeId,
        result: &AppendResult,
        entry: &mut ProgressEntry,
    ) -> Result<NextAction, ProtocolViolation> {
        let leader_last = self.leader_log.last_index();

        tracing::debug!(
            result = display(result),
            progress = display(&*entry),
            leader_last_index = leader_last,
            "reconcile append result"
        );

        let action = match *result {
            AppendResult::Matched { index } => {
                if index == 0 && leader_last > 0 {
                    return Err(ProtocolViolation::new(target, ViolationKind::MatchedEmptyLog {
                        leader_last,
                    }));
                }

                if index > leader_last {
                    return Err(ProtocolViolation::new(target, ViolationKind::MatchedBeyondLeaderLog {
                        index,
                        leader_last,
                    }));
                }

                entry.new_updater().update_matching(index);
                NextAction::AdvanceCursor(entry.matching)
            }

            AppendResult::NoLog => {
                // Confirmed logs can not disappear from a conforming follower.
                if entry.matching > 0 {
                    return Err(ProtocolViolation::new(target, ViolationKind::NoLogAfterMatched {
                        matching: entry.matching,
                    }));
                }

                entry.new_updater().begin_snapshot();
                NextAction::TriggerSnapshot
            }

            AppendResult::Conflict {
                index,
                non_matching_term,
            } => {
                if index > leader_last {
                    return Err(ProtocolViolation::new(target, ViolationKind::ConflictBeyondLeaderLog {
                        index,
                        leader_last,
                    }));
                }

                if index <= entry.matching {
                    // Logs up to `matching` are already confirmed; this result is from an earlier
                    // probe delivered late, or delivered twice.
                    tracing::debug!(
                        conflict = index,
                        matching = entry.matching,
                        "stale conflict, keep progress"
                    );
                    return Ok(NextAction::RetryAt(entry.prev_index()));
                }

                let prev = std::cmp::max(self.calc_probe(index, non_matching_term), entry.matching);

                entry.new_updater().update_conflicting(prev);
                NextAction::RetryAt(prev)
            }
        };

        debug_assert!(entry.validate().is_ok(), "invalid progress: {}", entry);

        tracing::debug!(action = display(&action), progress = display(&*entry), "reconciled");

        Ok(action)
    }

    /// Calculate the `prev_log_index` of the next probe after a conflict at `conflict`.
    ///
    /// The follower has `non_matching_term` from `conflict` on, thus its logs before `conflict`
    /// have smaller terms. Probe at the last leader log before `conflict` whose term is not
    /// greater than `non_matching_term`, or one before `conflict` if there is no such log or the
    /// term is unknown.
    fn calc_probe(&self, conflict: LogIndex, non_matching_term: Option<Term>) -> LogIndex {
        let one_back = conflict - 1;

        if !self.config.fast_rewind {
            return one_back;
        }

        let Some(term) = non_matching_term else {
            return one_back;
        };

        let found = self.leader_log.last_index_with_term_at_most(term, conflict);

        tracing::debug!(
            conflict = conflict,
            non_matching_term = display(non_matching_term.display()),
            found = display(found.display()),
            "fast rewind"
        );

        found.unwrap_or(one_back)
    }
}
