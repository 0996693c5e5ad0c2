use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

use crate::state::AppState;

#[derive(Serialize, Clone)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    store_kind: String,
    checks: HashMap<String, ComponentCheck>,
    timestamp: String,
}

pub async fn health_summary() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "leaderboard-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn readiness_summary(state: web::Data<AppState>) -> HttpResponse {
    let mut checks = HashMap::new();
    let mut ready = true;

    let start = Instant::now();
    let store_result = state.store.ping().await;
    let store_latency = Some(start.elapsed().as_millis() as u64);
    let store_check = match store_result {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "Ranked store reachable".to_string(),
            latency_ms: store_latency,
        },
        Err(e) => {
            ready = false;
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: format!("Ranked store ping failed: {}", e),
                latency_ms: store_latency,
            }
        }
    };
    checks.insert("ranked_store".to_string(), store_check);

    let start = Instant::now();
    let registry_result = state.registry.count().await;
    let registry_latency = Some(start.elapsed().as_millis() as u64);
    let registry_check = match registry_result {
        Ok(users) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: format!("User registry readable ({} users)", users),
            latency_ms: registry_latency,
        },
        Err(e) => {
            ready = false;
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: format!("User registry unreadable: {}", e),
                latency_ms: registry_latency,
            }
        }
    };
    checks.insert("user_registry".to_string(), registry_check);

    let status = if ready {
        ComponentStatus::Healthy
    } else {
        ComponentStatus::Unhealthy
    };

    let response = ReadinessResponse {
        ready,
        status,
        store_kind: state.store.kind().to_string(),
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}
