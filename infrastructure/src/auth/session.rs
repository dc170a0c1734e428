//! File-backed session persistence.

use askboard_application::{SessionError, SessionStore};
use askboard_domain::User;
use std::path::{Path, PathBuf};

/// Keeps the signed-in user as a small JSON file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<User>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| SessionError::Io(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| SessionError::Corrupt(e.to_string()))
    }

    fn save(&self, user: &User) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| SessionError::Io(format!("{}: {}", parent.display(), e)))?;
        }
        let json =
            serde_json::to_string_pretty(user).map_err(|e| SessionError::Io(e.to_string()))?;
        std::fs::write(&self.path, json)
            .map_err(|e| SessionError::Io(format!("{}: {}", self.path.display(), e)))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io(format!("{}: {}", self.path.display(), e))),
        }
    }
}
