use std::sync::Arc;

use anyhow::Result;
use pretty_assertions::assert_eq;
use raft_append_result::testing::log_id;
use raft_append_result::Config;
use raft_append_result::LogIdList;
use raft_append_result::LogReader;
use raft_append_result::NextAction;
use raft_append_result::ProgressTable;

use crate::fixtures::init_ut_tracing;
use crate::fixtures::replicate;
use crate::fixtures::Follower;

/// Terms by index: 1 at `[1, 4]`, 2 at `[5, 6]`, 4 at `[7, 20]`.
fn leader_log() -> LogIdList {
    LogIdList::new([log_id(1, 1), log_id(2, 5), log_id(4, 7), log_id(4, 20)])
}

/// Terms by index: 1 at `[1, 4]`, 2 at `[5, 7]`, 3 at `[8, 12]`.
///
/// The term-3 logs were written by a leader that did not commit them.
fn follower_log() -> LogIdList {
    LogIdList::new([log_id(1, 1), log_id(2, 5), log_id(3, 8), log_id(3, 12)])
}

/// Fast rewind skips a follower's conflicting term in one round trip.
///
/// - The follower log is shorter: the leader retries at the follower's last index.
/// - The follower has term 3 at `[8, 12]`, which the leader does not have: the leader skips to its
///   last log with a term not greater than 3, i.e., index 6.
#[tokio::test]
async fn fast_rewind_skips_conflicting_term() -> Result<()> {
    init_ut_tracing();

    let config = Arc::new(Config::default().validate()?);
    let leader_log = leader_log();
    let mut follower = Follower::new(2, follower_log());

    let (table, _rx) = ProgressTable::new(config, [2], leader_log.last_index());

    let actions = replicate(&table, &mut follower, &leader_log, None).await?;

    assert_eq!(
        vec![
            NextAction::RetryAt(12),
            NextAction::RetryAt(6),
            NextAction::AdvanceCursor(20),
        ],
        actions
    );
    assert_eq!(leader_log, follower.log);

    let p = table.progress(2).await.unwrap();
    assert_eq!(20, p.matching());
    assert_eq!(21, p.next_index());

    Ok(())
}

/// Without fast rewind a leader walks back one follower term run per round trip.
#[tokio::test]
async fn without_fast_rewind_probes_run_by_run() -> Result<()> {
    init_ut_tracing();

    let config = Arc::new(Config::build(&["foo", "--fast-rewind", "false"])?);
    let leader_log = leader_log();
    let mut follower = Follower::new(2, follower_log());

    let (table, _rx) = ProgressTable::new(config, [2], leader_log.last_index());

    let actions = replicate(&table, &mut follower, &leader_log, None).await?;

    assert_eq!(
        vec![
            NextAction::RetryAt(12),
            NextAction::RetryAt(7),
            NextAction::RetryAt(4),
            NextAction::AdvanceCursor(20),
        ],
        actions
    );
    assert_eq!(leader_log, follower.log);

    Ok(())
}
