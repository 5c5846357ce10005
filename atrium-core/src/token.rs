//! Read-only view of the current session token.

use std::sync::RwLock;

/// Where token-gated fetches read the access token from.
///
/// The session store implements this, so the tenant and document crates
/// stay decoupled from it. A missing token is a valid state (not signed in
/// yet), never an error at this boundary.
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

/// A token source holding a settable value, for tests and tooling.
#[derive(Default)]
pub struct FixedTokenSource {
    token: RwLock<Option<String>>,
}

impl FixedTokenSource {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    pub fn set(&self, token: Option<String>) {
        *self.token.write().unwrap() = token;
    }
}

impl TokenSource for FixedTokenSource {
    fn access_token(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }
}
