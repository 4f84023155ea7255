// ── Persistent session store ──
//
// Three fixed entries under a single directory: access token, refresh
// token, and the serialized user record. Writes are synchronous and
// unbuffered; every session mutation persists immediately. There is no
// versioning or migration -- a corrupt user file reads as absent.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::warn;

use campus_api::models::User;

use crate::error::CoreError;

const TOKEN_FILE: &str = "token";
const REFRESH_TOKEN_FILE: &str = "refresh_token";
const USER_FILE: &str = "user.json";

/// Durable key-value store for the session triplet.
///
/// Rooted at a directory: the platform data dir by default, injectable
/// for tests via [`SessionStorage::new`].
#[derive(Debug, Clone)]
pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    /// Storage rooted at an explicit directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage under the platform-standard data directory.
    pub fn open_default() -> Result<Self, CoreError> {
        let dirs = ProjectDirs::from("", "campus-tools", "campus").ok_or_else(|| {
            CoreError::Internal("cannot determine a home directory for session storage".into())
        })?;
        Ok(Self::new(dirs.data_local_dir().join("session")))
    }

    /// The directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // ── Entries ──────────────────────────────────────────────────────

    pub fn token(&self) -> Result<Option<String>, CoreError> {
        self.read_entry(TOKEN_FILE)
    }

    pub fn set_token(&self, token: &str) -> Result<(), CoreError> {
        self.write_entry(TOKEN_FILE, token)
    }

    pub fn refresh_token(&self) -> Result<Option<String>, CoreError> {
        self.read_entry(REFRESH_TOKEN_FILE)
    }

    pub fn set_refresh_token(&self, token: &str) -> Result<(), CoreError> {
        self.write_entry(REFRESH_TOKEN_FILE, token)
    }

    /// The stored user record. A file that no longer parses is treated
    /// as absent rather than an error.
    pub fn user(&self) -> Result<Option<User>, CoreError> {
        let Some(raw) = self.read_entry(USER_FILE)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("stored user record is unreadable, ignoring: {e}");
                Ok(None)
            }
        }
    }

    pub fn set_user(&self, user: &User) -> Result<(), CoreError> {
        let raw = serde_json::to_string(user)
            .map_err(|e| CoreError::Internal(format!("cannot serialize user record: {e}")))?;
        self.write_entry(USER_FILE, &raw)
    }

    /// Remove all three entries. Missing files are not an error.
    pub fn clear(&self) -> Result<(), CoreError> {
        for name in [TOKEN_FILE, REFRESH_TOKEN_FILE, USER_FILE] {
            match fs::remove_file(self.dir.join(name)) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(CoreError::Storage(e)),
            }
        }
        Ok(())
    }

    // ── Raw file access ──────────────────────────────────────────────

    fn read_entry(&self, name: &str) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.dir.join(name)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::Storage(e)),
        }
    }

    fn write_entry(&self, name: &str, value: &str) -> Result<(), CoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(name), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str) -> User {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": username,
            "roles": ["student"],
        }))
        .expect("static user record")
    }

    #[test]
    fn absent_entries_read_as_none() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = SessionStorage::new(tmp.path());
        assert!(storage.token().expect("read").is_none());
        assert!(storage.refresh_token().expect("read").is_none());
        assert!(storage.user().expect("read").is_none());
    }

    #[test]
    fn token_roundtrip() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = SessionStorage::new(tmp.path().join("session"));
        storage.set_token("tok-1").expect("write");
        storage.set_refresh_token("ref-1").expect("write");
        assert_eq!(storage.token().expect("read").as_deref(), Some("tok-1"));
        assert_eq!(
            storage.refresh_token().expect("read").as_deref(),
            Some("ref-1")
        );
    }

    #[test]
    fn user_roundtrip_preserves_record() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = SessionStorage::new(tmp.path());
        storage.set_user(&user("zyz")).expect("write");
        let restored = storage.user().expect("read").expect("present");
        assert_eq!(restored.username, "zyz");
        assert_eq!(restored.roles, vec!["student"]);
    }

    #[test]
    fn corrupt_user_file_reads_as_none() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = SessionStorage::new(tmp.path());
        fs::write(tmp.path().join(USER_FILE), "{not json").expect("write");
        assert!(storage.user().expect("read").is_none());
    }

    #[test]
    fn clear_removes_every_entry() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = SessionStorage::new(tmp.path());
        storage.set_token("tok").expect("write");
        storage.set_refresh_token("ref").expect("write");
        storage.set_user(&user("zyz")).expect("write");

        storage.clear().expect("clear");
        assert!(storage.token().expect("read").is_none());
        assert!(storage.refresh_token().expect("read").is_none());
        assert!(storage.user().expect("read").is_none());

        // clearing twice is fine
        storage.clear().expect("clear again");
    }
}
