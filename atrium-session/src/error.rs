use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors from the identity provider boundary.
///
/// Only the OTP flow surfaces these to callers; lifecycle paths convert
/// them to logged, empty state.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Identity provider error: {message}")]
    Provider { message: String },

    #[error("Verification failed: {message}")]
    Verification { message: String },
}

impl SessionError {
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    pub fn verification<S: Into<String>>(message: S) -> Self {
        Self::Verification {
            message: message.into(),
        }
    }
}
