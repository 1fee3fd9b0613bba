//! Login session persisted between runs
//!
//! The token, username and role live in `session.toml` under the XDG state
//! directory. Logging out, or any request rejected with 401, removes it.

use crate::config::get_state_dir;
use crate::types::Role;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SESSION_FILE: &str = "session.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
    pub role: Option<Role>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// "coach (admin)" or "not logged in"
    pub fn describe(&self) -> String {
        match (&self.username, self.role) {
            (Some(user), Some(role)) => format!("{} ({})", user, role),
            (Some(user), None) => user.clone(),
            _ if self.is_logged_in() => "logged in".to_string(),
            _ => "not logged in".to_string(),
        }
    }
}

/// File-backed session storage
///
/// A store without a path (no state directory) reads as logged out and
/// refuses to save.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStore {
    path: Option<PathBuf>,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    /// Store at the standard location, or an unsaved one when the state directory is unknown
    pub fn default_location() -> Self {
        match get_state_dir() {
            Some(dir) => Self::new(dir.join(SESSION_FILE)),
            None => {
                warn!("No state directory available; the session will not be saved");
                Self { path: None }
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the stored session; missing or unreadable files mean logged out
    pub fn load(&self) -> Session {
        let Some(path) = &self.path else {
            return Session::default();
        };
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Session::default(),
        };
        match toml::from_str(&content) {
            Ok(session) => session,
            Err(e) => {
                warn!("Ignoring malformed session file {}: {}", path.display(), e);
                Session::default()
            }
        }
    }

    /// Write the session, readable by the owner only
    pub fn save(&self, session: &Session) -> Result<()> {
        let Some(path) = &self.path else {
            bail!("No state directory available to store the session; set XDG_STATE_HOME or HOME");
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string(session).context("Failed to serialize session")?;
        write_private(path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Saved session to {}", path.display());
        Ok(())
    }

    /// Forget token, username and role
    pub fn clear(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            debug!("Cleared session at {}", path.display());
        }
        Ok(())
    }
}

#[cfg(unix)]
fn write_private(path: &Path, content: &str) -> io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies when the file is created
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(content.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, content: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> SessionStore {
        let dir = std::env::temp_dir().join(format!("hoops-session-{}-{}", name, std::process::id()));
        SessionStore::new(dir.join(SESSION_FILE))
    }

    #[test]
    fn test_missing_file_is_logged_out() {
        let store = temp_store("missing");
        let session = store.load();
        assert!(!session.is_logged_in());
        assert!(!session.is_admin());
        assert_eq!(session.describe(), "not logged in");
    }

    #[test]
    fn test_save_load_clear() {
        let store = temp_store("roundtrip");
        let session = Session {
            token: Some("abc".into()),
            username: Some("coach".into()),
            role: Some(Role::Admin),
        };
        store.save(&session).unwrap();
        assert_eq!(store.load(), session);
        assert!(store.load().is_admin());
        assert_eq!(store.load().describe(), "coach (admin)");

        store.clear().unwrap();
        assert_eq!(store.load(), Session::default());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let store = temp_store("mode");
        let path = store.path().unwrap().to_path_buf();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let session = Session {
            token: Some("secret".into()),
            ..Default::default()
        };
        store.save(&session).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        store.clear().unwrap();
    }

    #[test]
    fn test_store_without_path_does_not_persist() {
        let store = SessionStore { path: None };
        let session = Session {
            token: Some("secret".into()),
            ..Default::default()
        };
        assert!(store.save(&session).is_err());
        assert!(!store.load().is_logged_in());
        store.clear().unwrap();
    }

    #[test]
    fn test_malformed_file_is_logged_out() {
        let store = temp_store("malformed");
        let path = store.path().unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "token = [").unwrap();
        assert_eq!(store.load(), Session::default());
        store.clear().unwrap();
    }

    #[test]
    fn test_viewer_is_not_admin() {
        let session = Session {
            token: Some("t".into()),
            username: Some("fan".into()),
            role: Some(Role::Viewer),
        };
        assert!(!session.is_admin());
    }
}
