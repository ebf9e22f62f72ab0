use std::sync::Arc;

use anyhow::Result;
use pretty_assertions::assert_eq;
use raft_append_result::testing::log_id;
use raft_append_result::AppendResult;
use raft_append_result::Config;
use raft_append_result::LogIdList;
use raft_append_result::LogReader;
use raft_append_result::NextAction;
use raft_append_result::ProgressTable;

use crate::fixtures::init_ut_tracing;

/// Results delivered twice, or out of order, never move the cursor back.
#[tokio::test]
async fn duplicate_and_reordered_delivery() -> Result<()> {
    init_ut_tracing();

    let config = Arc::new(Config::default());
    let leader_log = LogIdList::new([log_id(1, 1), log_id(3, 10), log_id(4, 15), log_id(4, 20)]);

    let (table, _rx) = ProgressTable::new(config, [2], leader_log.last_index());

    tracing::info!("--- in order");
    {
        let act = table.handle_result(2, AppendResult::matched(5), &leader_log).await?;
        assert_eq!(NextAction::AdvanceCursor(5), act);

        let act = table.handle_result(2, AppendResult::matched(15), &leader_log).await?;
        assert_eq!(NextAction::AdvanceCursor(15), act);
    }

    let before = table.progress(2).await.unwrap();
    assert_eq!(15, before.matching());
    assert_eq!(21, before.next_index());

    tracing::info!("--- duplicated");
    {
        let act = table.handle_result(2, AppendResult::matched(15), &leader_log).await?;
        assert_eq!(NextAction::AdvanceCursor(15), act);
        assert_eq!(before, table.progress(2).await.unwrap());
    }

    tracing::info!("--- late results of earlier requests");
    {
        let act = table.handle_result(2, AppendResult::matched(10), &leader_log).await?;
        assert_eq!(NextAction::AdvanceCursor(15), act);

        let act = table.handle_result(2, AppendResult::conflict(8, None), &leader_log).await?;
        assert_eq!(NextAction::RetryAt(20), act);

        let act = table.handle_result(2, AppendResult::conflict(10, Some(2)), &leader_log).await?;
        assert_eq!(NextAction::RetryAt(20), act);

        assert_eq!(before, table.progress(2).await.unwrap());
    }

    Ok(())
}
