/// Leaderboard Service Library
///
/// Registers users, accepts score submissions, and serves ranked views of
/// the scores.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route table
/// - `models`: Request/response and storage data structures
/// - `services`: Ranked store, user registry, report and export
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
/// - `state`: Shared handler state
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

pub use config::{Config, StoreKind};
pub use error::{AppError, Result};
pub use state::AppState;
