/// Configuration management for Leaderboard Service
///
/// Everything is read from environment variables once at startup and handed to
/// components at construction. Nothing here is contacted at runtime: the store
/// backend in particular is an explicit deployment choice.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Ranked score store settings
    pub store: StoreConfig,
    /// User registry settings
    pub registry: RegistryConfig,
    /// Read view limits
    pub views: ViewsConfig,
    /// Export writer settings
    pub export: ExportConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Which ranked store backend serves the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// Redis sorted set; durable as far as the Redis deployment is.
    Persistent,
    /// Process-local index; all scores are lost on restart.
    InMemory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "persistent" | "redis" => Ok(StoreKind::Persistent),
            "in_memory" | "inmemory" | "memory" => Ok(StoreKind::InMemory),
            other => Err(format!(
                "unknown store kind '{other}' (expected 'persistent' or 'in_memory')"
            )),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Persistent => write!(f, "persistent"),
            StoreKind::InMemory => write!(f, "in_memory"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub kind: StoreKind,
    /// Redis URL (ignored for the in-memory store)
    pub redis_url: String,
    /// Sorted set key holding the leaderboard
    pub leaderboard_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// JSON snapshot file
    pub path: PathBuf,
    /// Fail instead of treating an unreadable snapshot as empty
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsConfig {
    pub report_default_limit: usize,
    pub report_max_limit: usize,
    pub public_top_n: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// On-disk location, overwritten on every export
    pub path: PathBuf,
    /// Filename offered to the client
    pub download_name: String,
    pub top_n: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let app_env = get("APP_ENV", "development");

        let kind: StoreKind = get("LEADERBOARD_STORE", "persistent").parse()?;
        if kind == StoreKind::InMemory && app_env.eq_ignore_ascii_case("production") {
            return Err("LEADERBOARD_STORE=in_memory is not allowed in production".to_string());
        }

        let report_default_limit = parse_var(&lookup, "REPORT_DEFAULT_LIMIT", 5usize)?;
        let report_max_limit = parse_var(&lookup, "REPORT_MAX_LIMIT", 100usize)?;
        if report_max_limit == 0 {
            return Err("REPORT_MAX_LIMIT must be at least 1".to_string());
        }
        if report_default_limit == 0 || report_default_limit > report_max_limit {
            return Err(format!(
                "REPORT_DEFAULT_LIMIT must be between 1 and {report_max_limit}"
            ));
        }

        let leaderboard_key = get("LEADERBOARD_KEY", "global_leaderboard");
        if leaderboard_key.trim().is_empty() {
            return Err("LEADERBOARD_KEY cannot be empty".to_string());
        }

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: get("LEADERBOARD_SERVICE_HOST", "0.0.0.0"),
                port: parse_var(&lookup, "LEADERBOARD_SERVICE_PORT", 8000u16)?,
            },
            store: StoreConfig {
                kind,
                redis_url: get("REDIS_URL", "redis://localhost:6379"),
                leaderboard_key,
            },
            registry: RegistryConfig {
                path: PathBuf::from(get("USER_REGISTRY_PATH", "users.json")),
                strict: parse_var(&lookup, "USER_REGISTRY_STRICT", false)?,
            },
            views: ViewsConfig {
                report_default_limit,
                report_max_limit,
                public_top_n: parse_var(&lookup, "PUBLIC_TOP_N", 10usize)?,
            },
            export: ExportConfig {
                path: PathBuf::from(get("EXPORT_PATH", "top_players_report.txt")),
                download_name: get("EXPORT_DOWNLOAD_NAME", "leaderboard_report.txt"),
                top_n: parse_var(&lookup, "EXPORT_TOP_N", 10usize)?,
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("{key} has invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = config_with(&[]).expect("defaults load");
        assert_eq!(config.app.port, 8000);
        assert_eq!(config.store.kind, StoreKind::Persistent);
        assert_eq!(config.store.leaderboard_key, "global_leaderboard");
        assert_eq!(config.registry.path, PathBuf::from("users.json"));
        assert!(!config.registry.strict);
        assert_eq!(config.views.report_default_limit, 5);
        assert_eq!(config.views.public_top_n, 10);
        assert_eq!(config.export.top_n, 10);
        assert_eq!(config.export.download_name, "leaderboard_report.txt");
    }

    #[test]
    fn store_kind_accepts_aliases() {
        assert_eq!("redis".parse::<StoreKind>(), Ok(StoreKind::Persistent));
        assert_eq!("In_Memory".parse::<StoreKind>(), Ok(StoreKind::InMemory));
        assert_eq!("memory".parse::<StoreKind>(), Ok(StoreKind::InMemory));
        assert!("fakeredis".parse::<StoreKind>().is_err());
    }

    #[test]
    fn in_memory_rejected_in_production() {
        let err = config_with(&[("APP_ENV", "production"), ("LEADERBOARD_STORE", "in_memory")])
            .unwrap_err();
        assert!(err.contains("not allowed in production"));
    }

    #[test]
    fn invalid_numbers_are_reported_by_name() {
        let err = config_with(&[("LEADERBOARD_SERVICE_PORT", "eighty")]).unwrap_err();
        assert!(err.contains("LEADERBOARD_SERVICE_PORT"));

        let err = config_with(&[("REPORT_DEFAULT_LIMIT", "500")]).unwrap_err();
        assert!(err.contains("REPORT_DEFAULT_LIMIT"));
    }
}
