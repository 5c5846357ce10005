use atrium_core::ErrorInfo;
use thiserror::Error;

/// Result type for tenant operations.
pub type TenantResult<T> = Result<T, TenantError>;

/// Errors from workspace resolution and the backend boundary.
#[derive(Error, Debug)]
pub enum TenantError {
    /// The requested workspace is not in the current directory snapshot.
    #[error("Workspace \"{key}\" not found")]
    WorkspaceNotFound { key: String },

    /// A switch is already in flight. Callers get immediate feedback
    /// instead of queued work against a snapshot that changed underneath
    /// them.
    #[error("A workspace switch is already in progress")]
    SwitchInProgress,

    /// Non-2xx from the backend, carrying the server message when it sent
    /// one.
    #[error("Workspace request failed: {0}")]
    Api(ErrorInfo),

    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl TenantError {
    pub fn not_found<S: Into<String>>(key: S) -> Self {
        Self::WorkspaceNotFound { key: key.into() }
    }

    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// The record the store keeps in its `error` field.
    pub fn to_info(&self) -> ErrorInfo {
        match self {
            TenantError::Api(info) => info.clone(),
            other => ErrorInfo::new(other.to_string()),
        }
    }
}
