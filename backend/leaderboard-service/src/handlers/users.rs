use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::metrics::{outcome, REGISTRATIONS_TOTAL};
use crate::models::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterParams {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// POST /register?username=..&email=..
pub async fn register(
    query: web::Query<RegisterParams>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let result = register_inner(query.into_inner(), &state).await;
    REGISTRATIONS_TOTAL
        .with_label_values(&[outcome(&result)])
        .inc();
    result
}

async fn register_inner(params: RegisterParams, state: &AppState) -> Result<HttpResponse> {
    let username = params
        .username
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Username required".to_string()))?;
    let email = params
        .email
        .ok_or_else(|| AppError::InvalidInput("Email required".to_string()))?;

    debug!("Register request: username={}", username);
    state.registry.register(&username, &email).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User registered successfully".to_string(),
    }))
}
