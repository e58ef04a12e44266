//! On-disk session persistence.
//!
//! The bearer token and the student snapshot live together in a single
//! JSON file. They are written together and removed together; a file
//! holding only one of them is corrupt and loads as logged out.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use courtbook_core::Student;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to write session file: {0}")]
    Write(#[source] io::Error),

    #[error("failed to remove session file: {0}")]
    Clear(#[source] io::Error),

    #[error("failed to encode session: {0}")]
    Encode(#[source] serde_json::Error),
}

/// What a login leaves behind on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub student: Student,
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted session. A missing file, unparsable JSON or
    /// an empty token all count as logged out; corrupt files are
    /// removed so the next load starts clean.
    pub fn load(&self) -> Option<SessionData> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<SessionData>(&raw) {
            Ok(data) if !data.token.is_empty() => Some(data),
            _ => {
                tracing::warn!(
                    path = %self.path.display(),
                    "discarding unreadable session file"
                );
                let _ = fs::remove_file(&self.path);
                None
            }
        }
    }

    pub fn save(&self, data: &SessionData) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(SessionError::Write)?;
            }
        }
        let body = serde_json::to_string_pretty(data).map_err(SessionError::Encode)?;
        fs::write(&self.path, body).map_err(SessionError::Write)
    }

    /// Removes the session file. Already-absent files are fine.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionError::Clear(err)),
        }
    }
}
