use alloc::{string::String, vec::Vec};
use core::cell::RefCell;
use serde::{Deserialize, Serialize};

use crate::{GatewayError, Level};

/// Number of entries shown on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 5;

/// Result of one ended run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: Level,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, score: Level) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Top scores, highest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    entries: Vec<ScoreRecord>,
}

impl LeaderboardSnapshot {
    /// Orders by score descending and keeps the first `limit`. The sort is stable: equal scores keep the order the
    /// store returned them in.
    pub fn from_records(mut records: Vec<ScoreRecord>, limit: usize) -> Self {
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(limit);
        Self { entries: records }
    }

    pub fn entries(&self) -> &[ScoreRecord] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries paired with their 1-based rank.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &ScoreRecord)> + '_ {
        self.entries.iter().enumerate().map(|(i, record)| (i + 1, record))
    }
}

/// Remote score store. Futures run on the single UI thread and need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait LeaderboardGateway {
    /// Appends one record.
    async fn submit(&self, record: &ScoreRecord) -> Result<(), GatewayError>;

    /// At most `limit` records, highest score first. Ties come back in store order.
    async fn fetch_top(&self, limit: usize) -> Result<Vec<ScoreRecord>, GatewayError>;
}

/// Fetches the current top scores as a snapshot.
pub async fn fetch_snapshot<G>(
    gateway: &G,
    limit: usize,
) -> Result<LeaderboardSnapshot, GatewayError>
where
    G: LeaderboardGateway,
{
    let records = gateway.fetch_top(limit).await?;
    Ok(LeaderboardSnapshot::from_records(records, limit))
}

/// Submits `record`, then fetches a fresh snapshot. A failed submit is logged and the fetch still happens.
pub async fn publish_score<G>(
    gateway: &G,
    record: ScoreRecord,
    limit: usize,
) -> Result<LeaderboardSnapshot, GatewayError>
where
    G: LeaderboardGateway,
{
    match gateway.submit(&record).await {
        Ok(()) => log::info!("saved score {} for {}", record.score, record.name),
        Err(err) => log::error!("Error saving score: {}", err),
    }
    fetch_snapshot(gateway, limit).await
}

/// Page-lifetime store. Ties keep insertion order.
#[derive(Debug, Default)]
pub struct MemoryLeaderboard {
    records: RefCell<Vec<ScoreRecord>>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl LeaderboardGateway for MemoryLeaderboard {
    async fn submit(&self, record: &ScoreRecord) -> Result<(), GatewayError> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }

    async fn fetch_top(&self, limit: usize) -> Result<Vec<ScoreRecord>, GatewayError> {
        let mut records = self.records.borrow().clone();
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};
    use core::cell::Cell;
    use futures_util::FutureExt;

    /// Records call order; optionally fails submits or fetches.
    #[derive(Default)]
    struct FlakyGateway {
        inner: MemoryLeaderboard,
        fail_submit: bool,
        fail_fetch: bool,
        calls: RefCell<Vec<&'static str>>,
        fetches: Cell<usize>,
    }

    impl LeaderboardGateway for FlakyGateway {
        async fn submit(&self, record: &ScoreRecord) -> Result<(), GatewayError> {
            self.calls.borrow_mut().push("submit");
            if self.fail_submit {
                return Err(GatewayError::Transport("offline".to_string()));
            }
            self.inner.submit(record).await
        }

        async fn fetch_top(&self, limit: usize) -> Result<Vec<ScoreRecord>, GatewayError> {
            self.calls.borrow_mut().push("fetch");
            self.fetches.set(self.fetches.get() + 1);
            if self.fail_fetch {
                return Err(GatewayError::Status {
                    code: 503,
                    message: "unavailable".to_string(),
                });
            }
            self.inner.fetch_top(limit).await
        }
    }

    #[test]
    fn snapshot_orders_descending_and_truncates() {
        let snapshot = LeaderboardSnapshot::from_records(
            vec![
                ScoreRecord::new("a", 3),
                ScoreRecord::new("b", 9),
                ScoreRecord::new("c", 1),
                ScoreRecord::new("d", 7),
                ScoreRecord::new("e", 5),
                ScoreRecord::new("f", 8),
            ],
            LEADERBOARD_SIZE,
        );
        let names: Vec<_> = snapshot.entries().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "f", "d", "e", "a"]);
        let ranks: Vec<_> = snapshot.ranked().map(|(rank, _)| rank).collect();
        assert_eq!(ranks, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn snapshot_keeps_store_order_for_ties() {
        let snapshot = LeaderboardSnapshot::from_records(
            vec![
                ScoreRecord::new("first", 4),
                ScoreRecord::new("second", 4),
                ScoreRecord::new("top", 6),
            ],
            LEADERBOARD_SIZE,
        );
        let names: Vec<_> = snapshot.entries().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["top", "first", "second"]);
    }

    #[test]
    fn publish_submits_before_fetching() {
        let gateway = FlakyGateway::default();
        let snapshot = publish_score(&gateway, ScoreRecord::new("ana", 6), LEADERBOARD_SIZE)
            .now_or_never()
            .unwrap()
            .unwrap();

        assert_eq!(*gateway.calls.borrow(), ["submit", "fetch"]);
        assert_eq!(snapshot.entries(), [ScoreRecord::new("ana", 6)]);
    }

    #[test]
    fn failed_submit_still_fetches() {
        let gateway = FlakyGateway {
            fail_submit: true,
            ..Default::default()
        };
        let snapshot = publish_score(&gateway, ScoreRecord::new("ana", 6), LEADERBOARD_SIZE)
            .now_or_never()
            .unwrap()
            .unwrap();

        assert_eq!(gateway.fetches.get(), 1);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn failed_fetch_is_reported() {
        let gateway = FlakyGateway {
            fail_fetch: true,
            ..Default::default()
        };
        let result = publish_score(&gateway, ScoreRecord::new("ana", 6), LEADERBOARD_SIZE)
            .now_or_never()
            .unwrap();

        assert!(matches!(result, Err(GatewayError::Status { code: 503, .. })));
        assert_eq!(gateway.inner.len(), 1);
    }

    #[test]
    fn memory_store_ranks_by_score_with_insertion_order_ties() {
        let store = MemoryLeaderboard::new();
        for (name, score) in [("a", 2), ("b", 5), ("c", 2), ("d", 5), ("e", 1), ("f", 3)] {
            store.submit(&ScoreRecord::new(name, score)).now_or_never().unwrap().unwrap();
        }

        let top = store.fetch_top(4).now_or_never().unwrap().unwrap();
        let names: Vec<_> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "d", "f", "a"]);
    }
}
