//! Implements SessionStorePort using a JSON file.
//!
//! One file, one object: the signed-in user. A corrupt or missing file
//! reads as "no session" rather than an error.

use crate::domain::{DomainError, User};
use crate::ports::SessionStorePort;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// JSON file-based session storage.
pub struct SessionJson {
    path: std::path::PathBuf,
}

impl SessionJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Atomic save using write-replace:
    /// 1. Write to temp file
    /// 2. sync_all() to ensure flush to disk
    /// 3. Atomic rename to target path
    /// This prevents a half-written session if the process dies mid-write.
    async fn write_atomically(&self, json: &str) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Session(format!("create session dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Session(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Session(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Session(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Session(format!("atomic rename failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SessionStorePort for SessionJson {
    async fn load(&self) -> Result<Option<User>, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::Session(e.to_string())),
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "session file unreadable, ignoring");
                Ok(None)
            }
        }
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let json =
            serde_json::to_string_pretty(user).map_err(|e| DomainError::Session(e.to_string()))?;
        self.write_atomically(&json).await
    }

    async fn clear(&self) -> Result<(), DomainError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Session(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn demo_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Demo User".into(),
            email: "demo@example.com".into(),
            phone_number: Some("+1555".into()),
        }
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionJson::new(dir.path().join("session.json"));
        let user = demo_user();

        store.save(&user).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.id, user.id);
        assert_eq!(loaded.email, user.email);
        assert_eq!(loaded.phone_number, user.phone_number);
    }

    #[tokio::test]
    async fn load_without_a_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionJson::new(dir.path().join("session.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_session_reads_as_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, "not json at all").await.unwrap();
        let store = SessionJson::new(&path);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_removes_the_session_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionJson::new(dir.path().join("session.json"));
        store.save(&demo_user()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        // second clear on a missing file is fine
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn save_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionJson::new(dir.path().join("nested/deeper/session.json"));
        store.save(&demo_user()).await.unwrap();
        assert!(store.load().await.unwrap().is_some());
    }
}
