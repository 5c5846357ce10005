use atrium_core::ErrorInfo;
use thiserror::Error;

/// Result type for document library operations.
pub type DocsResult<T> = Result<T, DocsError>;

/// Errors from the document backend boundary.
#[derive(Error, Debug)]
pub enum DocsError {
    /// No session token. Document actions are user-initiated, so unlike the
    /// read paths this is surfaced, not swallowed.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Non-2xx from the backend, carrying the server message when it sent
    /// one.
    #[error("Document request failed: {0}")]
    Api(ErrorInfo),

    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl DocsError {
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// The record the cache keeps in its `error` field.
    pub fn to_info(&self) -> ErrorInfo {
        match self {
            DocsError::Api(info) => info.clone(),
            other => ErrorInfo::new(other.to_string()),
        }
    }
}
