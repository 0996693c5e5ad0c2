//! User registry persisted as a single JSON snapshot.
//!
//! The snapshot is a JSON object keyed by username. Registration is the only
//! mutation: load, check, insert, rewrite the whole file. That sequence runs
//! inside a single-writer section so concurrent registrations never drop each
//! other's entries.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::snapshot::write_atomic;
use crate::config::RegistryConfig;
use crate::error::{AppError, Result};
use crate::models::UserRecord;

pub type UserMap = BTreeMap<String, UserRecord>;

pub struct UserRegistry {
    path: PathBuf,
    strict: bool,
    write_lock: Mutex<()>,
}

impl UserRegistry {
    pub fn new(path: impl Into<PathBuf>, strict: bool) -> Self {
        Self {
            path: path.into(),
            strict,
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.path.clone(), config.strict)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full snapshot.
    ///
    /// A missing file is an empty registry. An unparseable file is also an
    /// empty registry unless strict mode is on, in which case it is
    /// `CorruptState`.
    pub async fn load(&self) -> Result<UserMap> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(UserMap::new()),
            Err(err) => return Err(AppError::PersistenceError(err.to_string())),
        };

        match serde_json::from_slice::<UserMap>(&raw) {
            Ok(users) => Ok(users),
            Err(err) if self.strict => Err(AppError::CorruptState(format!(
                "{}: {}",
                self.path.display(),
                err
            ))),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "User registry snapshot is unreadable, treating it as empty"
                );
                Ok(UserMap::new())
            }
        }
    }

    pub async fn register(&self, username: &str, email: &str) -> Result<UserRecord> {
        if username.trim().is_empty() {
            return Err(AppError::InvalidInput("Username required".to_string()));
        }

        let _guard = self.write_lock.lock().await;

        let mut users = self.load().await?;
        if users.contains_key(username) {
            return Err(AppError::DuplicateUser);
        }

        let record = UserRecord {
            username: username.to_string(),
            email: email.to_string(),
        };
        users.insert(username.to_string(), record.clone());
        self.save(&users).await?;

        info!(username = %username, total = users.len(), "User registered");
        Ok(record)
    }

    pub async fn get(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.load().await?.remove(username))
    }

    pub async fn count(&self) -> Result<usize> {
        Ok(self.load().await?.len())
    }

    async fn save(&self, users: &UserMap) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        serde::Serialize::serialize(users, &mut ser)?;

        write_atomic(&self.path, &buf).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_snapshot_loads_empty() {
        let dir = tempdir().unwrap();
        let registry = UserRegistry::new(dir.path().join("users.json"), false);

        assert!(registry.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected_once_stored() {
        let dir = tempdir().unwrap();
        let registry = UserRegistry::new(dir.path().join("users.json"), false);

        registry.register("alice", "alice@example.com").await.unwrap();
        let err = registry
            .register("alice", "other@example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateUser));
        assert_eq!(registry.count().await.unwrap(), 1);
        assert_eq!(
            registry.get("alice").await.unwrap().unwrap().email,
            "alice@example.com"
        );
    }

    #[tokio::test]
    async fn snapshot_survives_a_new_instance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");

        UserRegistry::new(&path, false)
            .register("bob", "bob@example.com")
            .await
            .unwrap();

        let reopened = UserRegistry::new(&path, true);
        let users = reopened.load().await.unwrap();
        assert_eq!(
            users.get("bob"),
            Some(&UserRecord {
                username: "bob".into(),
                email: "bob@example.com".into(),
            })
        );

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("    \"bob\": {"));
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_empty_unless_strict() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let lenient = UserRegistry::new(&path, false);
        assert!(lenient.load().await.unwrap().is_empty());

        let strict = UserRegistry::new(&path, true);
        assert!(matches!(
            strict.load().await.unwrap_err(),
            AppError::CorruptState(_)
        ));
        assert!(matches!(
            strict.register("carol", "c@example.com").await.unwrap_err(),
            AppError::CorruptState(_)
        ));
    }

    #[tokio::test]
    async fn lenient_registry_overwrites_corrupt_snapshot_on_register() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, b"[1, 2, 3]").unwrap();

        let registry = UserRegistry::new(&path, false);
        registry.register("dave", "d@example.com").await.unwrap();

        assert_eq!(registry.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_registrations_are_all_kept() {
        let dir = tempdir().unwrap();
        let registry = Arc::new(UserRegistry::new(dir.path().join("users.json"), true));

        let mut handles = Vec::new();
        for i in 0..16 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry
                    .register(&format!("user{i}"), &format!("user{i}@example.com"))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(registry.count().await.unwrap(), 16);
    }

    #[tokio::test]
    async fn empty_username_is_invalid_input() {
        let dir = tempdir().unwrap();
        let registry = UserRegistry::new(dir.path().join("users.json"), false);

        assert!(matches!(
            registry.register("", "x@example.com").await.unwrap_err(),
            AppError::InvalidInput(_)
        ));
        assert!(!registry.path().exists());
    }

    #[tokio::test]
    async fn unwritable_snapshot_is_persistence_error() {
        let dir = tempdir().unwrap();
        let registry = UserRegistry::new(dir.path().join("no_such_dir").join("users.json"), false);

        assert!(matches!(
            registry.register("erin", "e@example.com").await.unwrap_err(),
            AppError::PersistenceError(_)
        ));
    }
}
