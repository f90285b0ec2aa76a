//! Client error type shared by the API layer, the session store and the views.

/// Everything that can go wrong talking to the marketplace API or persisting the session.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection, timeout or protocol failure below the HTTP status level.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },

    /// A response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading or writing the persisted session failed.
    #[error("session storage failed: {0}")]
    Storage(#[from] std::io::Error),

    /// Client-side input could not be turned into a request.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Server-supplied message, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Text a view shows for this failure: the server's message, else `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
