//session.rs
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::api::User;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Cached identity of the signed-in user. Exists only while a login or
/// signup has succeeded and has not been cleared.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "isLoggedIn")]
    pub logged_in: bool,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub username: String,
    #[serde(rename = "userEmail")]
    pub email: String,
}

/// File-backed session persistence. The store is handed to the app as an
/// explicit dependency; nothing else reads or writes the file.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn open() -> Self {
        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join("fittrack").join("session.json"),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if session.logged_in => Some(session),
            Ok(_) => None,
            Err(e) => {
                warn!("ignoring malformed session file: {e}");
                None
            }
        }
    }

    /// Persist the session for `user` and return it. Written via a
    /// temporary file and rename so a crash never leaves a partial file.
    pub fn establish(&self, user: &User) -> Result<Session, SessionError> {
        let session = Session {
            logged_in: true,
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp = self.path.with_extension("tmp");
        let mut file = File::create(&temp)?;
        file.write_all(serde_json::to_string_pretty(&session)?.as_bytes())?;
        file.sync_all()?;
        fs::rename(temp, &self.path)?;
        Ok(session)
    }

    /// Remove the session file. Already-absent is fine.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.load().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> SessionStore {
        let path = std::env::temp_dir()
            .join(format!("fittrack-session-test-{}-{}", tag, std::process::id()))
            .join("session.json");
        let store = SessionStore::with_path(path);
        store.clear().unwrap();
        store
    }

    fn sample_user() -> User {
        User {
            id: 1,
            username: "a".to_string(),
            email: "a@b.com".to_string(),
        }
    }

    #[test]
    fn establish_then_clear_round_trip() {
        let store = temp_store("round-trip");
        assert!(!store.is_active());

        let session = store.establish(&sample_user()).unwrap();
        assert!(session.logged_in);
        assert!(store.is_active());

        let loaded = store.load().unwrap();
        assert_eq!(loaded.user_id, 1);
        assert_eq!(loaded.username, "a");
        assert_eq!(loaded.email, "a@b.com");

        store.clear().unwrap();
        assert!(!store.is_active());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = temp_store("clear-twice");
        store.establish(&sample_user()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(!store.is_active());
    }

    #[test]
    fn session_file_keys_are_stable() {
        let store = temp_store("keys");
        store.establish(&sample_user()).unwrap();
        let raw = fs::read_to_string(&store.path).unwrap();
        for key in ["isLoggedIn", "username", "userId", "userEmail"] {
            assert!(raw.contains(key), "missing key {key}");
        }
        store.clear().unwrap();
    }

    #[test]
    fn logged_out_flag_reads_as_inactive() {
        let store = temp_store("flag");
        if let Some(parent) = store.path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(
            &store.path,
            r#"{"isLoggedIn":false,"userId":1,"username":"a","userEmail":"a@b.com"}"#,
        )
        .unwrap();
        assert!(!store.is_active());
        store.clear().unwrap();
    }
}
