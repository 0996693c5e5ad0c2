use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::metrics::{outcome, EXPORT_WRITES_TOTAL, VIEW_DURATION_SECONDS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub limit: Option<i64>,
}

impl ReportParams {
    /// Requested limit, capped at `max`. Zero and negative limits are rejected.
    pub(crate) fn resolve_limit(&self, default: usize, max: usize) -> Result<usize> {
        match self.limit {
            None => Ok(default.min(max)),
            Some(limit) if limit >= 1 => Ok(usize::try_from(limit).unwrap_or(usize::MAX).min(max)),
            Some(_) => Err(AppError::InvalidInput(
                "limit must be a positive integer".to_string(),
            )),
        }
    }
}

/// GET /leaderboard/report?limit=5
pub async fn get_report(
    query: web::Query<ReportParams>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let _timer = VIEW_DURATION_SECONDS
        .with_label_values(&["report"])
        .start_timer();

    let limit = query.resolve_limit(
        state.views.report_default_limit,
        state.views.report_max_limit,
    )?;
    debug!("Report request: limit={}", limit);

    let report = state.reports.generate_report(limit).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /leaderboard/export
///
/// Rewrites the export file, then serves it as an attachment.
pub async fn export_leaderboard(state: web::Data<AppState>) -> Result<HttpResponse> {
    let _timer = VIEW_DURATION_SECONDS
        .with_label_values(&["export"])
        .start_timer();

    let result = state.exporter.export_top(state.export_top_n).await;
    EXPORT_WRITES_TOTAL
        .with_label_values(&[outcome(&result)])
        .inc();
    let artifact = result?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(artifact.download_name)],
        })
        .body(artifact.body))
}

/// GET /leaderboard/public
pub async fn get_public_leaderboard(state: web::Data<AppState>) -> Result<HttpResponse> {
    let _timer = VIEW_DURATION_SECONDS
        .with_label_values(&["public"])
        .start_timer();

    let listing = state
        .reports
        .public_leaderboard(state.views.public_top_n)
        .await?;
    Ok(HttpResponse::Ok().json(listing))
}
