/// HTTP handlers for leaderboard endpoints
///
/// - Users: registration into the snapshot registry
/// - Scores: score submission into the ranked store
/// - Leaderboard: report, export and public read views
/// - Health: liveness and readiness checks
pub mod health;
pub mod leaderboard;
pub mod scores;
pub mod users;

use actix_web::{error::QueryPayloadError, web, HttpRequest};

use crate::error::AppError;

// Re-export handler functions at module level
pub use leaderboard::{export_leaderboard, get_public_leaderboard, get_report};
pub use scores::submit_score;
pub use users::register;

/// Register every route on an app or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config())
        .route("/register", web::post().to(register))
        .route("/score", web::post().to(submit_score))
        .service(
            web::scope("/leaderboard")
                .route("/report", web::get().to(get_report))
                .route("/export", web::get().to(export_leaderboard))
                .route("/public", web::get().to(get_public_leaderboard)),
        )
        .route("/metrics", web::get().to(crate::metrics::serve_metrics))
        .route("/api/v1/health", web::get().to(health::health_summary))
        .route("/api/v1/health/ready", web::get().to(health::readiness_summary))
        .route("/api/v1/health/live", web::get().to(health::liveness_check));
}

/// Malformed query strings (e.g. `score=abc`) get the same JSON error body as
/// every other client error.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        AppError::InvalidInput(format!("Invalid query parameters: {}", err)).into()
    })
}
