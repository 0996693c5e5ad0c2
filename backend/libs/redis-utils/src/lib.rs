use anyhow::{Context, Result};
use redis::aio::ConnectionManager;
use redis::{Client, ConnectionAddr, ConnectionInfo, IntoConnectionInfo, RedisError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Shared Redis connection manager guarded by a Tokio mutex.
pub type SharedConnectionManager = Arc<Mutex<ConnectionManager>>;

/// Single-node Redis connection pool.
///
/// The connection manager reconnects transparently after a dropped socket, so
/// callers only ever see the error of the command that hit the broken link.
pub struct RedisPool {
    manager: SharedConnectionManager,
    target: String,
}

impl RedisPool {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let info: ConnectionInfo = redis_url
            .into_connection_info()
            .context("failed to parse REDIS_URL connection string")?;
        let target = describe_target(&info);

        let client = Client::open(info).context("failed to construct Redis client")?;
        let connection_manager = ConnectionManager::new(client)
            .await
            .with_context(|| format!("failed to initialize Redis connection manager for {target}"))?;

        info!("Redis connection manager ready for {}", target);

        Ok(Self {
            manager: Arc::new(Mutex::new(connection_manager)),
            target,
        })
    }

    pub fn manager(&self) -> SharedConnectionManager {
        self.manager.clone()
    }

    /// Host label safe for logs (never includes credentials).
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Issue `PING` on a shared manager and verify the reply.
pub async fn ping(manager: &SharedConnectionManager) -> Result<(), RedisError> {
    let mut conn = manager.lock().await;
    let pong: String = redis::cmd("PING").query_async(&mut *conn).await?;
    if pong == "PONG" {
        Ok(())
    } else {
        Err(RedisError::from((
            redis::ErrorKind::ResponseError,
            "unexpected PING response",
        )))
    }
}

fn describe_target(info: &ConnectionInfo) -> String {
    let db = info.redis.db;
    match &info.addr {
        ConnectionAddr::Tcp(host, port) => format!("redis://{host}:{port}/{db}"),
        ConnectionAddr::TcpTls { host, port, .. } => format!("rediss://{host}:{port}/{db}"),
        #[allow(unreachable_patterns)]
        _ => format!("redis+unix/{db}"),
    }
}
