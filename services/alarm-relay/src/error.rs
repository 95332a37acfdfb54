//! Error types for the alarm relay

/// Errors that can occur while relaying an alarm notification
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid event envelope: {0}")]
    Envelope(String),

    #[error("Invalid alarm payload: {0}")]
    Alarm(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Webhook rejected delivery with status {status}: {body}")]
    DeliveryRejected { status: u16, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RelayError {
    /// True for the two decode stages, which abort before anything is sent
    pub fn is_decode(&self) -> bool {
        matches!(self, RelayError::Envelope(_) | RelayError::Alarm(_))
    }
}

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
