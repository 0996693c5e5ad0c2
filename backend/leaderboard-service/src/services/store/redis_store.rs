use async_trait::async_trait;
use redis::AsyncCommands;
use redis_utils::SharedConnectionManager;

use super::{validate_submission, RankedStore};
use crate::config::StoreKind;
use crate::error::Result;
use crate::models::RankedEntry;

/// Leaderboard backed by a Redis sorted set.
///
/// Key: configurable, `global_leaderboard` by default
/// Score: the last submitted value per member
pub struct RedisRankedStore {
    manager: SharedConnectionManager,
    key: String,
}

impl RedisRankedStore {
    pub fn new(manager: SharedConnectionManager, key: impl Into<String>) -> Self {
        Self {
            manager,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl RankedStore for RedisRankedStore {
    async fn upsert(&self, member: &str, score: f64) -> Result<()> {
        validate_submission(member, score)?;

        let mut conn = self.manager.lock().await;
        // ZADD global_leaderboard {score} {member}
        let _: i64 = conn.zadd(&self.key, member, score).await?;
        Ok(())
    }

    async fn top_k(&self, k: usize) -> Result<Vec<RankedEntry>> {
        // ZREVRANGE with stop = -1 would return the whole set
        if k == 0 {
            return Ok(Vec::new());
        }
        let stop = isize::try_from(k - 1).unwrap_or(isize::MAX);

        let mut conn = self.manager.lock().await;
        // ZREVRANGE global_leaderboard 0 {k-1} WITHSCORES
        let rows: Vec<(String, f64)> = conn.zrevrange_withscores(&self.key, 0, stop).await?;

        Ok(rows
            .into_iter()
            .map(|(member, score)| RankedEntry::new(member, score))
            .collect())
    }

    async fn cardinality(&self) -> Result<u64> {
        let mut conn = self.manager.lock().await;
        let count: u64 = conn.zcard(&self.key).await?;
        Ok(count)
    }

    async fn ping(&self) -> Result<()> {
        redis_utils::ping(&self.manager).await?;
        Ok(())
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Persistent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis_utils::RedisPool;

    async fn connect(key: &str) -> Option<RedisRankedStore> {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".into());
        match RedisPool::connect(&url).await {
            Ok(pool) => Some(RedisRankedStore::new(pool.manager(), key)),
            Err(_) => {
                // Skip when no Redis is reachable
                println!("Redis not available, skipping test");
                None
            }
        }
    }

    #[tokio::test]
    async fn redis_store_matches_sorted_set_semantics() {
        let key = format!("leaderboard:test:{}", std::process::id());
        let Some(store) = connect(&key).await else {
            return;
        };

        let mut conn = store.manager.lock().await.clone();
        let _: () = conn.del(&key).await.unwrap();

        store.upsert("alice", 10.0).await.unwrap();
        store.upsert("alice", 25.0).await.unwrap();
        store.upsert("bob", 25.0).await.unwrap();
        store.upsert("carol", 3.0).await.unwrap();

        let top = store.top_k(2).await.unwrap();
        assert_eq!(
            top,
            vec![RankedEntry::new("bob", 25.0), RankedEntry::new("alice", 25.0)]
        );
        assert_eq!(store.cardinality().await.unwrap(), 3);
        assert!(store.top_k(0).await.unwrap().is_empty());

        let _: () = conn.del(&key).await.unwrap();
    }
}
