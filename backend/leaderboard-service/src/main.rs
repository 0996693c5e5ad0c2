use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use leaderboard_service::services::{
    MemoryRankedStore, RedisRankedStore, SharedRankedStore, UserRegistry,
};
use leaderboard_service::{handlers, AppState, Config, StoreKind};
use redis_utils::RedisPool;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Leaderboard Service
///
/// # Routes
///
/// - `POST /register` - Register a user in the snapshot registry
/// - `POST /score` - Submit (overwrite) a player's score
/// - `GET /leaderboard/report` - Timestamped top-N report
/// - `GET /leaderboard/export` - Plain-text export download
/// - `GET /leaderboard/public` - Public top 10 with player count
///
/// # Deployment
///
/// Runs on port 8000 (configurable via LEADERBOARD_SERVICE_PORT). The ranked
/// store is Redis unless LEADERBOARD_STORE=in_memory is set explicitly.
#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting leaderboard-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let store = build_store(&config)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("{e:#}")))?;

    // Surface a corrupt snapshot at startup rather than on first registration
    let registry = UserRegistry::from_config(&config.registry);
    match registry.count().await {
        Ok(users) => tracing::info!(
            path = %registry.path().display(),
            users,
            strict = config.registry.strict,
            "User registry loaded"
        ),
        Err(e) => {
            tracing::error!("User registry check failed: {}", e);
            return Err(io::Error::new(io::ErrorKind::InvalidData, e.to_string()));
        }
    }

    let state = web::Data::new(AppState::new(&config, store));

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}

async fn build_store(config: &Config) -> anyhow::Result<SharedRankedStore> {
    match config.store.kind {
        StoreKind::Persistent => {
            let pool = RedisPool::connect(&config.store.redis_url)
                .await
                .context("Failed to initialize Redis connection")?;
            let store = RedisRankedStore::new(pool.manager(), config.store.leaderboard_key.clone());
            tracing::info!(
                target_addr = %pool.target(),
                key = %store.key(),
                "Ranked store: Redis sorted set"
            );
            Ok(Arc::new(store))
        }
        StoreKind::InMemory => {
            tracing::warn!(
                "Ranked store: in-memory. Scores are NOT durable and are lost on restart"
            );
            Ok(Arc::new(MemoryRankedStore::new()))
        }
    }
}
