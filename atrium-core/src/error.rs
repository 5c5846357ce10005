//! The error record stores keep in their state.
//!
//! Stores convert failures into state rather than throwing (the UI reads
//! `error` off a snapshot); this is the shape they keep. Typed errors on
//! the one surfaced path live in the store crates themselves.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A failure recorded in store state, optionally carrying the HTTP status
/// it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub message: String,
    pub status: Option<u16>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Pick the server-supplied message out of a non-2xx body, falling back
    /// to a generic line. Backends use either `message` or `error`.
    pub fn from_response_body(status: u16, body: &serde_json::Value) -> Self {
        let message = body
            .get("message")
            .and_then(|v| v.as_str())
            .or_else(|| body.get("error").and_then(|v| v.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {status}: request failed"));

        Self {
            message,
            status: Some(status),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ErrorInfo {}
