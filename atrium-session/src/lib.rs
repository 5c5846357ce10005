//! atrium-session: the session store and its identity provider boundary.
//!
//! Owns the auth lifecycle: initialization from a persisted session, the
//! OTP request/verify flow, provider change notifications, and teardown on
//! sign-out. The provider delivers and validates one-time codes; this crate
//! only consumes the resulting sessions.
//!
//! Two policies run through everything here:
//!
//! - **Absence is not an error.** A missing session is a valid state. Even
//!   a provider failure during initialization resolves to "signed out" -
//!   the UI must never hang waiting for auth.
//! - **Downstream hears about transitions, not the other way around.** The
//!   store emits [`SessionEvent`]s and calls one injected teardown hook; it
//!   never reaches into tenant or cache state itself.

pub mod error;
pub mod events;
pub mod identity;
pub mod provider;
pub mod store;

pub use error::{SessionError, SessionResult};
pub use events::{ListenerFut, ListenerId, SessionEvent, SessionEvents};
pub use identity::{Identity, Profile, RawIdentity};
pub use provider::{AuthProvider, ProviderSession, SessionChange, SessionObserver};
pub use store::{SessionState, SessionStore};
