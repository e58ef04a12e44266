//! Runtime configuration, read once at startup from the environment.

use std::path::PathBuf;

/// Booking service the client talks to when `COURTBOOK_API_URL` is
/// unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

const SESSION_DIR: &str = ".courtbook";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
}

impl Config {
    /// Reads `COURTBOOK_API_URL` and `COURTBOOK_SESSION_FILE`, filling
    /// in defaults for anything unset or empty.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var("COURTBOOK_API_URL").ok(),
            std::env::var("COURTBOOK_SESSION_FILE").ok(),
            std::env::var("HOME").ok(),
        )
    }

    fn resolve(
        api_url: Option<String>,
        session_file: Option<String>,
        home: Option<String>,
    ) -> Self {
        let api_url = api_url
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let session_file = session_file
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_session_file(home.as_deref()));
        Self {
            api_url,
            session_file,
        }
    }
}

/// `$HOME/.courtbook/session.json`, or a file in the working directory
/// when no home directory is known.
fn default_session_file(home: Option<&str>) -> PathBuf {
    match home {
        Some(home) if !home.is_empty() => {
            PathBuf::from(home).join(SESSION_DIR).join(SESSION_FILE)
        }
        _ => PathBuf::from(SESSION_FILE),
    }
}
