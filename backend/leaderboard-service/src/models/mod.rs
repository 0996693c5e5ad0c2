/// Data models for leaderboard-service
///
/// - `UserRecord`: registry entry persisted in the users snapshot
/// - `RankedEntry`: one member/score pair read from the ranked store
/// - Report, public listing and submission payloads returned by the API
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub member: String,
    pub score: f64,
}

impl RankedEntry {
    pub fn new(member: impl Into<String>, score: f64) -> Self {
        Self {
            member: member.into(),
            score,
        }
    }
}

/// One line of the timestamped top-N report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRanking {
    pub rank: usize,
    pub player: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardReport {
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`
    pub generated_at: String,
    pub rankings: Vec<ReportRanking>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicPlayer {
    pub rank: usize,
    pub username: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicLeaderboard {
    pub status: String,
    pub total_players: u64,
    pub top_players: Vec<PublicPlayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmitted {
    pub message: String,
    pub username: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
