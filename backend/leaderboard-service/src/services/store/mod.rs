//! Ranked score store
//!
//! A sorted set of `member -> score`, read back in descending score order.
//! Two backends implement [`RankedStore`]:
//!
//! - [`RedisRankedStore`]: Redis sorted set (`ZADD` / `ZREVRANGE` / `ZCARD`)
//! - [`MemoryRankedStore`]: process-local ordered index, lost on restart
//!
//! Ties between equal scores are ordered by member in descending byte order.
//! That is the order Redis `ZREVRANGE` produces, and the in-memory backend
//! reproduces it so that switching backends never reorders a leaderboard.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::StoreKind;
use crate::error::{AppError, Result};
use crate::models::RankedEntry;

pub mod memory_store;
pub mod redis_store;

pub use memory_store::MemoryRankedStore;
pub use redis_store::RedisRankedStore;

/// Shared handle passed into every component that reads or writes scores.
pub type SharedRankedStore = Arc<dyn RankedStore>;

#[async_trait]
pub trait RankedStore: Send + Sync {
    /// Set `member`'s score, inserting it if absent. Last write wins.
    async fn upsert(&self, member: &str, score: f64) -> Result<()>;

    /// Up to `k` highest-scoring members, best first.
    async fn top_k(&self, k: usize) -> Result<Vec<RankedEntry>>;

    /// Number of distinct members holding a score.
    async fn cardinality(&self) -> Result<u64>;

    /// Cheap liveness check used by readiness.
    async fn ping(&self) -> Result<()>;

    fn kind(&self) -> StoreKind;
}

/// Reject submissions no backend should ever store.
pub fn validate_submission(member: &str, score: f64) -> Result<()> {
    if member.trim().is_empty() {
        return Err(AppError::InvalidInput("Username required".to_string()));
    }
    if !score.is_finite() {
        return Err(AppError::InvalidInput(
            "Score must be a finite number".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_member_is_rejected() {
        let err = validate_submission("", 1.0).unwrap_err();
        assert_eq!(err.to_string(), "Username required");
        assert!(validate_submission("   ", 1.0).is_err());
    }

    #[test]
    fn non_finite_scores_are_rejected() {
        assert!(validate_submission("alice", f64::NAN).is_err());
        assert!(validate_submission("alice", f64::INFINITY).is_err());
        assert!(validate_submission("alice", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn negative_and_fractional_scores_are_accepted() {
        assert!(validate_submission("alice", -3.5).is_ok());
        assert!(validate_submission("alice", 0.0).is_ok());
    }
}
