use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;

use super::{validate_submission, RankedStore};
use crate::config::StoreKind;
use crate::error::Result;
use crate::models::RankedEntry;

/// Position of a member in the leaderboard order.
///
/// Sorts best-first: higher score, then higher member bytes on ties.
#[derive(Debug, Clone, PartialEq)]
struct IndexKey {
    score: f64,
    member: String,
}

impl Eq for IndexKey {}

impl Ord for IndexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.member.as_bytes().cmp(self.member.as_bytes()))
    }
}

impl PartialOrd for IndexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
struct Inner {
    scores: HashMap<String, f64>,
    index: BTreeSet<IndexKey>,
}

/// In-process sorted set.
///
/// Each call holds the lock for its whole duration, so an upsert never
/// exposes a member twice or not at all to a concurrent `top_k`.
#[derive(Debug, Default)]
pub struct MemoryRankedStore {
    inner: RwLock<Inner>,
}

impl MemoryRankedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RankedStore for MemoryRankedStore {
    async fn upsert(&self, member: &str, score: f64) -> Result<()> {
        validate_submission(member, score)?;
        // -0.0 and 0.0 are one score; total_cmp would split them
        let score = if score == 0.0 { 0.0 } else { score };

        let mut inner = self.inner.write().await;
        if let Some(previous) = inner.scores.insert(member.to_string(), score) {
            inner.index.remove(&IndexKey {
                score: previous,
                member: member.to_string(),
            });
        }
        inner.index.insert(IndexKey {
            score,
            member: member.to_string(),
        });
        Ok(())
    }

    async fn top_k(&self, k: usize) -> Result<Vec<RankedEntry>> {
        let inner = self.inner.read().await;
        Ok(inner
            .index
            .iter()
            .take(k)
            .map(|key| RankedEntry::new(key.member.clone(), key.score))
            .collect())
    }

    async fn cardinality(&self) -> Result<u64> {
        Ok(self.inner.read().await.scores.len() as u64)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn kind(&self) -> StoreKind {
        StoreKind::InMemory
    }
}
