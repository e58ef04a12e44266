use serde::Deserialize;

/// Errors from the booking service transport layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request produced no usable response (connect, DNS, TLS, or
    /// body decode failure).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status. `message` is the
    /// server's own text when the body carried one, so it can be shown
    /// to the user verbatim.
    #[error("{message}")]
    Status { status: u16, message: String },
}

/// Shape of the service's error bodies. Only `message` is contractual;
/// anything else in the body is ignored.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Builds a [`ApiError::Status`] from a raw response body, keeping
    /// the server's `message` when one parses out and falling back to a
    /// generic status-coded description otherwise.
    pub fn from_status_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.message)
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));
        Self::Status { status, message }
    }

    /// The HTTP status code, when the server answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Transport(_) => None,
            Self::Status { status, .. } => Some(*status),
        }
    }

    /// True when the service rejected the credential. The caller should
    /// drop the session and ask the user to sign in again.
    pub fn is_unauthorized(&self) -> bool {
        self.http_status() == Some(401)
    }
}
