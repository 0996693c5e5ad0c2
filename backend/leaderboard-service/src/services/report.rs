//! Read views derived from the ranked store.
//!
//! Both views assign dense 1-based ranks in the order the store returns
//! members, so equal scores still get distinct consecutive ranks.

use chrono::{DateTime, Local};

use super::store::SharedRankedStore;
use crate::error::Result;
use crate::models::{
    LeaderboardReport, PublicLeaderboard, PublicPlayer, RankedEntry, ReportRanking,
};

pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone)]
pub struct ReportGenerator {
    store: SharedRankedStore,
}

impl ReportGenerator {
    pub fn new(store: SharedRankedStore) -> Self {
        Self { store }
    }

    pub async fn generate_report(&self, limit: usize) -> Result<LeaderboardReport> {
        self.generate_report_at(limit, Local::now()).await
    }

    pub async fn generate_report_at(
        &self,
        limit: usize,
        now: DateTime<Local>,
    ) -> Result<LeaderboardReport> {
        let entries = self.store.top_k(limit).await?;

        Ok(LeaderboardReport {
            generated_at: now.format(REPORT_TIMESTAMP_FORMAT).to_string(),
            rankings: ranked(entries)
                .map(|(rank, entry)| ReportRanking {
                    rank,
                    player: entry.member,
                    score: entry.score,
                })
                .collect(),
        })
    }

    /// Public top-N listing with the total number of ranked players.
    pub async fn public_leaderboard(&self, top_n: usize) -> Result<PublicLeaderboard> {
        let entries = self.store.top_k(top_n).await?;
        let total_players = self.store.cardinality().await?;

        Ok(PublicLeaderboard {
            status: "success".to_string(),
            total_players,
            top_players: ranked(entries)
                .map(|(rank, entry)| PublicPlayer {
                    rank,
                    username: entry.member,
                    score: entry.score,
                })
                .collect(),
        })
    }
}

/// Pair each entry with its 1-based position.
pub fn ranked(entries: Vec<RankedEntry>) -> impl Iterator<Item = (usize, RankedEntry)> {
    entries.into_iter().enumerate().map(|(i, entry)| (i + 1, entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::{MemoryRankedStore, RankedStore};
    use chrono::TimeZone;
    use std::sync::Arc;

    async fn generator(entries: &[(&str, f64)]) -> ReportGenerator {
        let store = Arc::new(MemoryRankedStore::new());
        for (member, score) in entries {
            store.upsert(member, *score).await.unwrap();
        }
        ReportGenerator::new(store)
    }

    #[tokio::test]
    async fn report_limit_three_of_five() {
        let reports = generator(&[
            ("alice", 40.0),
            ("bob", 10.0),
            ("carol", 90.0),
            ("dave", 55.5),
            ("erin", 5.0),
        ])
        .await;

        let now = Local.with_ymd_and_hms(2026, 10, 19, 8, 30, 5).unwrap();
        let report = reports.generate_report_at(3, now).await.unwrap();

        assert_eq!(report.generated_at, "2026-10-19 08:30:05");
        assert_eq!(
            report.rankings,
            vec![
                ReportRanking { rank: 1, player: "carol".into(), score: 90.0 },
                ReportRanking { rank: 2, player: "dave".into(), score: 55.5 },
                ReportRanking { rank: 3, player: "alice".into(), score: 40.0 },
            ]
        );
    }

    #[tokio::test]
    async fn equal_scores_get_distinct_ranks() {
        let reports = generator(&[("a", 7.0), ("b", 7.0)]).await;

        let report = reports.generate_report(5).await.unwrap();
        let ranks: Vec<usize> = report.rankings.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[tokio::test]
    async fn public_listing_reports_total_beyond_top_n() {
        let entries: Vec<(String, f64)> = (0..12).map(|i| (format!("p{i:02}"), i as f64)).collect();
        let borrowed: Vec<(&str, f64)> = entries.iter().map(|(m, s)| (m.as_str(), *s)).collect();
        let reports = generator(&borrowed).await;

        let listing = reports.public_leaderboard(10).await.unwrap();
        assert_eq!(listing.status, "success");
        assert_eq!(listing.total_players, 12);
        assert_eq!(listing.top_players.len(), 10);
        assert_eq!(listing.top_players[0].username, "p11");
        assert_eq!(listing.top_players[9].rank, 10);
    }

    #[tokio::test]
    async fn empty_store_yields_empty_views() {
        let reports = generator(&[]).await;

        assert!(reports.generate_report(5).await.unwrap().rankings.is_empty());
        let listing = reports.public_leaderboard(10).await.unwrap();
        assert_eq!(listing.total_players, 0);
        assert!(listing.top_players.is_empty());
    }
}
