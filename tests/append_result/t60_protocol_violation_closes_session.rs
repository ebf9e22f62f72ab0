use std::sync::Arc;

use anyhow::Result;
use pretty_assertions::assert_eq;
use raft_append_result::errors::ProtocolViolation;
use raft_append_result::errors::ReconcileError;
use raft_append_result::errors::ViolationKind;
use raft_append_result::testing::log_id;
use raft_append_result::AppendResult;
use raft_append_result::Config;
use raft_append_result::LogIdList;
use raft_append_result::LogReader;
use raft_append_result::NextAction;
use raft_append_result::ProgressTable;

use crate::fixtures::init_ut_tracing;
use crate::fixtures::replicate;
use crate::fixtures::Follower;

/// A follower that breaks the protocol is cut off, while others keep replicating.
#[tokio::test]
async fn protocol_violation_closes_session() -> Result<()> {
    init_ut_tracing();

    let config = Arc::new(Config::default());
    let leader_log = LogIdList::new([log_id(1, 1), log_id(1, 10)]);

    let (table, _rx) = ProgressTable::new(config, [2, 3], leader_log.last_index());

    tracing::info!("--- follower 2 claims logs the leader does not have");
    {
        let res = table.handle_result(2, AppendResult::matched(12), &leader_log).await;
        assert_eq!(
            Err(ReconcileError::ProtocolViolation(ProtocolViolation::new(
                2,
                ViolationKind::MatchedBeyondLeaderLog {
                    index: 12,
                    leader_last: 10
                }
            ))),
            res
        );

        let p = table.progress(2).await.unwrap();
        assert_eq!(true, p.is_closed());
        assert_eq!(0, p.matching());
    }

    tracing::info!("--- later results from follower 2 are rejected");
    {
        let res = table.handle_result(2, AppendResult::matched(10), &leader_log).await;
        assert_eq!(Err(ReconcileError::SessionClosed(2)), res);
    }

    tracing::info!("--- follower 3 is not affected");
    {
        let mut follower = Follower::new(3, LogIdList::new([log_id(1, 1), log_id(1, 4)]));

        let actions = replicate(&table, &mut follower, &leader_log, None).await?;
        assert_eq!(vec![NextAction::RetryAt(4), NextAction::AdvanceCursor(10)], actions);
    }

    Ok(())
}

/// A success claimed by a follower at index 0 is only valid while the leader has no log.
#[tokio::test]
async fn matched_zero_with_non_empty_leader_log() -> Result<()> {
    init_ut_tracing();

    let config = Arc::new(Config::default());
    let leader_log = LogIdList::new([log_id(1, 1), log_id(1, 10)]);

    let (table, _rx) = ProgressTable::new(config, [2], leader_log.last_index());

    let res = table.handle_result(2, AppendResult::matched(0), &leader_log).await;
    assert_eq!(
        Err(ReconcileError::ProtocolViolation(ProtocolViolation::new(
            2,
            ViolationKind::MatchedEmptyLog { leader_last: 10 }
        ))),
        res
    );

    Ok(())
}

/// A follower that confirmed logs and then reports no log at all is cut off.
///
/// Otherwise the leader would keep a `matching` the follower no longer has, and after a snapshot
/// below it every conflict from the follower would be taken as stale.
#[tokio::test]
async fn no_log_after_matched() -> Result<()> {
    init_ut_tracing();

    let config = Arc::new(Config::default());
    let leader_log = LogIdList::new([log_id(1, 1), log_id(1, 20)]);

    let (table, mut rx) = ProgressTable::new(config, [2], leader_log.last_index());

    let act = table.handle_result(2, AppendResult::matched(10), &leader_log).await?;
    assert_eq!(NextAction::AdvanceCursor(10), act);

    let res = table.handle_result(2, AppendResult::NoLog, &leader_log).await;
    assert_eq!(
        Err(ReconcileError::ProtocolViolation(ProtocolViolation::new(
            2,
            ViolationKind::NoLogAfterMatched { matching: 10 }
        ))),
        res
    );
    assert!(rx.try_recv().is_err(), "no snapshot is triggered for a closed session");

    let p = table.progress(2).await.unwrap();
    assert_eq!(true, p.is_closed());

    let res = table.snapshot_installed(2, 5).await;
    assert_eq!(Err(ReconcileError::SessionClosed(2)), res);

    let mut follower = Follower::new(2, LogIdList::new([log_id(1, 5)]));
    let res = replicate(&table, &mut follower, &leader_log, None).await;
    assert!(res.is_err(), "replication to a closed session fails at once: {:?}", res);

    Ok(())
}
