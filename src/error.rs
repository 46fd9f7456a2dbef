//! Unified SDK error types.

use thiserror::Error;

pub use crate::shared::InvalidPeriod;
pub use crate::time::FormatError;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("WebSocket error: {0}")]
    Ws(#[from] WsError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// The reply was not valid JSON or did not have the expected shape.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The server answered `status: false` to a command.
    #[error("API error {code}: {description}")]
    Api { code: String, description: String },

    #[error(transparent)]
    InvalidPeriod(#[from] InvalidPeriod),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SdkError {
    /// Whether the failure happened on the socket and may succeed after a reconnect.
    pub fn is_transport(&self) -> bool {
        matches!(self, SdkError::Ws(_))
    }
}

/// WebSocket transport errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WsError {
    #[error("Not connected")]
    NotConnected,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    #[error("Connection closed: code={code:?} reason={reason}")]
    Closed {
        code: Option<u16>,
        reason: String,
    },

    #[error("Timeout")]
    Timeout,
}

/// Authentication errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Login failed ({code}): {description}")]
    LoginFailed { code: String, description: String },

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Already authenticated")]
    AlreadyAuthenticated,
}
