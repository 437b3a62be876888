//! Error types for dashboard synchronization.

use thiserror::Error;

/// Why a backend call or a cache transition did not happen.
///
/// Transport, status and shape failures all leave the cache untouched.
/// Precondition failures are raised before any request is sent.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response shape: {0}")]
    Malformed(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),
}

impl SyncError {
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// True when the error was raised client side without contacting the backend
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
