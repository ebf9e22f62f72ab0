use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use maplit::btreemap;
use pretty_assertions::assert_eq;
use raft_append_result::testing::log_ids;
use raft_append_result::AppendResult;
use raft_append_result::Config;
use raft_append_result::LogIdList;
use raft_append_result::LogReader;
use raft_append_result::ProgressTable;

use crate::fixtures::init_ut_tracing;

/// Results of several followers are reconciled concurrently, in any order.
///
/// Every follower ends up with the greatest matched index it reported, and `next_index` never
/// moves back from where the leader started.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_delivery() -> Result<()> {
    init_ut_tracing();

    let config = Arc::new(Config::default());

    let mut leader_log = LogIdList::default();
    leader_log.extend(log_ids(1, 1, 50));
    leader_log.extend(log_ids(2, 51, 100));
    let leader_log = Arc::new(leader_log);

    let (table, _rx) = ProgressTable::new(config, [1, 2, 3], leader_log.last_index());
    let table = Arc::new(table);

    let max_matched = btreemap! {
        1 => 100,
        2 => 64,
        3 => 37,
    };

    let mut handles = vec![];

    for (target, max) in max_matched.iter() {
        // Every result is delivered twice, in descending and then in ascending order.
        for index in (1..=*max).rev().chain(1..=*max) {
            let table = table.clone();
            let leader_log = leader_log.clone();
            let target = *target;

            handles.push(tokio::spawn(async move {
                table.handle_result(target, AppendResult::matched(index), &leader_log).await
            }));
        }
    }

    for h in handles {
        h.await??;
    }

    let mut got = BTreeMap::new();
    for target in table.targets() {
        let p = table.progress(target).await.unwrap();
        assert_eq!(101, p.next_index());
        got.insert(target, p.matching());
    }

    assert_eq!(max_matched, got);

    Ok(())
}
