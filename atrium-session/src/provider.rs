//! Identity provider boundary.
//!
//! Code delivery, code validation, and token persistence all happen on the
//! provider's side. The store consumes sessions and change notifications.

use std::sync::Arc;

use async_trait::async_trait;

use crate::identity::RawIdentity;
use crate::SessionResult;

/// A session as issued by the identity provider.
#[derive(Clone, Debug)]
pub struct ProviderSession {
    /// Opaque credential sent as the `access_token` header on backend calls.
    pub access_token: String,
    pub identity: RawIdentity,
}

/// Change notification pushed by the provider.
#[derive(Clone, Debug)]
pub enum SessionChange {
    SignedIn(ProviderSession),
    SignedOut,
    TokenRefreshed(ProviderSession),
}

/// Receiver of provider change notifications. The session store implements
/// this and subscribes itself during initialization.
#[async_trait]
pub trait SessionObserver: Send + Sync {
    async fn session_changed(&self, change: SessionChange);
}

/// The OTP-based identity provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The currently persisted session, if any.
    async fn current_session(&self) -> SessionResult<Option<ProviderSession>>;

    /// Ask the provider to deliver a one-time code to `email`.
    async fn send_code(&self, email: &str) -> SessionResult<()>;

    /// Exchange a one-time code for a session.
    async fn verify_code(&self, email: &str, code: &str) -> SessionResult<ProviderSession>;

    /// Drop the current session. Observers hear about it via `SignedOut`.
    async fn sign_out(&self) -> SessionResult<()>;

    /// Register an observer for the remainder of process life.
    fn subscribe(&self, observer: Arc<dyn SessionObserver>);
}
