//! Prometheus metrics for leaderboard-service.
//!
//! Exposes write-path counters, read-view latency, and an HTTP handler for
//! the `/metrics` endpoint.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Score submissions segmented by outcome (ok, invalid, store_error).
    pub static ref SCORE_SUBMISSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "leaderboard_score_submissions_total",
        "Score submissions segmented by outcome",
        &["result"]
    )
    .expect("failed to register leaderboard_score_submissions_total");

    /// Registrations segmented by outcome (ok, duplicate, invalid, error).
    pub static ref REGISTRATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "leaderboard_registrations_total",
        "User registrations segmented by outcome",
        &["result"]
    )
    .expect("failed to register leaderboard_registrations_total");

    /// Export file writes segmented by outcome.
    pub static ref EXPORT_WRITES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "leaderboard_export_writes_total",
        "Export file writes segmented by outcome",
        &["result"]
    )
    .expect("failed to register leaderboard_export_writes_total");

    /// Read view latency by view (report, export, public).
    pub static ref VIEW_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "leaderboard_view_duration_seconds",
        "Leaderboard read view duration segmented by view",
        &["view"]
    )
    .expect("failed to register leaderboard_view_duration_seconds");
}

/// Outcome label shared by the write-path counters.
pub fn outcome<T>(result: &crate::error::Result<T>) -> &'static str {
    use crate::error::AppError;
    match result {
        Ok(_) => "ok",
        Err(AppError::InvalidInput(_)) => "invalid",
        Err(AppError::DuplicateUser) => "duplicate",
        Err(AppError::StoreUnavailable(_)) => "store_error",
        Err(AppError::PersistenceError(_) | AppError::CorruptState(_)) => "persistence_error",
    }
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
