//! JSON-file implementation of the persisted session slot.

use std::path::PathBuf;

use tracing::debug;

use super::{Session, SessionStore};
use crate::errors::{ApiError, Result};

/// Persists the session as a single JSON file on disk.
///
/// The file is the whole slot: `save` overwrites it, `clear` removes it, a
/// missing or unreadable-as-JSON file reads as "no session".
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by the file at `path`. Parent directories are
    /// created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ApiError::Storage(format!(
                    "failed to read session file {}: {e}",
                    self.path.display()
                )))
            }
        };

        match serde_json::from_str(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // A corrupt slot means starting unauthenticated, not failing
                // every request that reads the token.
                debug!(path = %self.path.display(), error = %e, "ignoring corrupt session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::Storage(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let contents = serde_json::to_string(session)
            .map_err(|e| ApiError::Storage(format!("failed to encode session: {e}")))?;

        std::fs::write(&self.path, contents).map_err(|e| {
            ApiError::Storage(format!("failed to write session file {}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), "session persisted");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Storage(format!(
                "failed to remove session file {}: {e}",
                self.path.display()
            ))),
        }
    }
}
