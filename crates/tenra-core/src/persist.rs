// ── Durable session storage ──
//
// One JSON file holding exactly the auth fields (token, user, expiry
// hint). Written on every session change, loaded on startup, removed on
// sign-out. Nothing else in the store is persisted.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Session, User};

/// The on-disk shape: the filtered auth subset, nothing more.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    access_token: String,
    user: User,
    #[serde(default)]
    token_expired_time: Option<DateTime<Utc>>,
}

/// Resolve the session file path via platform conventions.
pub(crate) fn default_session_path() -> PathBuf {
    ProjectDirs::from("io", "tenra", "tenra").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".local");
            p.push("share");
            p.push("tenra");
            p.push("session.json");
            p
        },
        |dirs| dirs.data_dir().join("session.json"),
    )
}

/// Load the persisted session, if any.
pub(crate) fn load(path: &Path) -> Result<Option<Session>, CoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(CoreError::SessionStore {
                message: format!("failed to read {}: {e}", path.display()),
            });
        }
    };

    let persisted: PersistedSession =
        serde_json::from_str(&raw).map_err(|e| CoreError::SessionStore {
            message: format!("corrupt session file {}: {e}", path.display()),
        })?;

    debug!(user = %persisted.user.username, "session rehydrated");
    Ok(Some(Session {
        access_token: SecretString::from(persisted.access_token),
        user: persisted.user,
        token_expired_time: persisted.token_expired_time,
    }))
}

/// Write the session file, creating parent directories as needed.
pub(crate) fn save(path: &Path, session: &Session) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CoreError::SessionStore {
            message: format!("failed to create {}: {e}", parent.display()),
        })?;
    }

    let persisted = PersistedSession {
        access_token: session.access_token.expose_secret().to_owned(),
        user: session.user.clone(),
        token_expired_time: session.token_expired_time,
    };
    let json = serde_json::to_string_pretty(&persisted).map_err(|e| CoreError::SessionStore {
        message: format!("failed to serialize session: {e}"),
    })?;

    fs::write(path, json).map_err(|e| CoreError::SessionStore {
        message: format!("failed to write {}: {e}", path.display()),
    })
}

/// Remove the session file. Missing files are fine.
pub(crate) fn remove(path: &Path) -> Result<(), CoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CoreError::SessionStore {
            message: format!("failed to remove {}: {e}", path.display()),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{EntityId, UserRole};

    fn session() -> Session {
        Session {
            access_token: SecretString::from("tok-123".to_owned()),
            user: User {
                id: EntityId::Int(1),
                username: "chi".into(),
                first_name: None,
                last_name: None,
                phone_number: Some("0901234567".into()),
                email: None,
                role: UserRole::Admin,
                is_active: true,
                store: None,
            },
            token_expired_time: None,
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        save(&path, &session()).unwrap();
        let restored = load(&path).unwrap().unwrap();

        assert_eq!(restored.access_token.expose_secret(), "tok-123");
        assert_eq!(restored.user.username, "chi");
        assert!(restored.is_authorized_for_admin());
    }

    #[test]
    fn load_of_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        save(&path, &session()).unwrap();
        remove(&path).unwrap();
        remove(&path).unwrap();
        assert!(load(&path).unwrap().is_none());
    }

    #[test]
    fn file_contains_only_auth_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        save(&path, &session()).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let keys: Vec<&str> = raw.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&"access_token"));
        assert!(keys.contains(&"user"));
        assert!(keys.contains(&"token_expired_time"));
    }
}
