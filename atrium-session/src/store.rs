//! The session store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::{debug, error, warn};

use atrium_core::{KeyValueStorage, TokenSource, PROFILE_SLOT};

use crate::events::{SessionEvent, SessionEvents};
use crate::identity::{Identity, Profile, RawIdentity};
use crate::provider::{AuthProvider, ProviderSession, SessionChange, SessionObserver};
use crate::SessionResult;

/// Observable session state.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub profile: Option<Profile>,
    pub access_token: Option<String>,
    pub is_loading: bool,
    pub is_initialized: bool,
}

/// Holds the authenticated identity and owns the auth lifecycle.
///
/// Collaborators are injected: the identity provider behind
/// [`AuthProvider`], durable slots behind [`KeyValueStorage`]. Teardown of
/// tenant state and resource caches goes through one injected downstream
/// hook, so the dependency graph stays acyclic.
pub struct SessionStore {
    state: RwLock<SessionState>,
    provider: Arc<dyn AuthProvider>,
    storage: Arc<dyn KeyValueStorage>,
    events: SessionEvents,
    /// Runs before this store clears itself on sign-out. The composition
    /// root points it at the resource caches and the tenant store, giving
    /// the teardown order caches, tenant, session.
    downstream: RwLock<Option<Arc<dyn Fn() + Send + Sync>>>,
    init_started: AtomicBool,
}

impl SessionStore {
    pub fn new(provider: Arc<dyn AuthProvider>, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            state: RwLock::new(SessionState {
                is_loading: true,
                ..SessionState::default()
            }),
            provider,
            storage,
            events: SessionEvents::new(),
            downstream: RwLock::new(None),
            init_started: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read().unwrap().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.read().unwrap().identity.clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.state.read().unwrap().profile.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().unwrap().is_initialized
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap().is_loading
    }

    /// Hub for store-level transition events.
    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Install the sign-out teardown hook.
    pub fn set_downstream(&self, teardown: Arc<dyn Fn() + Send + Sync>) {
        *self.downstream.write().unwrap() = Some(teardown);
    }

    /// Idempotent. Reads the persisted session, then subscribes to provider
    /// change notifications for the remainder of process life.
    ///
    /// Provider failures resolve to an empty session and a log line; the
    /// store still ends up initialized. Session absence is a valid state.
    pub async fn initialize(self: Arc<Self>) {
        if self.state.read().unwrap().is_initialized {
            return;
        }
        if self.init_started.swap(true, Ordering::SeqCst) {
            return;
        }

        self.state.write().unwrap().is_loading = true;

        let restored = match self.provider.current_session().await {
            Ok(Some(session)) => {
                debug!(id = %session.identity.id, "restored persisted session");
                Some(self.apply_session(&session))
            }
            Ok(None) => {
                debug!("no persisted session");
                None
            }
            Err(err) => {
                error!("session read failed, treating as signed out: {err}");
                None
            }
        };

        {
            let mut state = self.state.write().unwrap();
            state.is_loading = false;
            state.is_initialized = true;
        }

        self.provider.subscribe(self.clone());

        if let Some(identity) = restored {
            self.events.emit(&SessionEvent::Authenticated(identity)).await;
        }
    }

    /// Seed state from a server-prepared snapshot, skipping the provider
    /// read entirely.
    pub fn hydrate(
        &self,
        identity: Option<Identity>,
        profile: Option<Profile>,
        access_token: Option<String>,
    ) {
        let mut state = self.state.write().unwrap();
        state.identity = identity;
        state.profile = profile;
        state.access_token = access_token;
        state.is_loading = false;
        state.is_initialized = true;
    }

    /// Push an identity directly, ahead of the provider's async
    /// notification. The OTP verification flow uses this so the identity is
    /// readable immediately after a manual verification call.
    pub fn set_identity(&self, raw: &RawIdentity) {
        self.apply_identity(raw, None);
    }

    /// Replace (or drop) the profile and its persisted copy.
    pub fn update_profile(&self, profile: Option<Profile>) {
        match &profile {
            Some(profile) => self.persist_profile(profile),
            None => self.storage.remove(PROFILE_SLOT),
        }
        self.state.write().unwrap().profile = profile;
    }

    /// Ask the provider to deliver a one-time code.
    pub async fn request_code(&self, email: &str) -> SessionResult<()> {
        debug!(email, "requesting one-time code");
        self.provider.send_code(email).await
    }

    /// Exchange a one-time code for a session and push the identity without
    /// waiting for the provider's change notification. Failures propagate:
    /// the login flow needs them.
    pub async fn verify_code(&self, email: &str, code: &str) -> SessionResult<Identity> {
        let session = self.provider.verify_code(email, code).await?;
        let identity = self.apply_session(&session);
        self.events
            .emit(&SessionEvent::Authenticated(identity.clone()))
            .await;
        Ok(identity)
    }

    /// Sign out at the provider. State teardown happens when the provider's
    /// `SignedOut` notification arrives.
    pub async fn sign_out(&self) -> SessionResult<()> {
        self.provider.sign_out().await
    }

    fn apply_session(&self, session: &ProviderSession) -> Identity {
        self.apply_identity(&session.identity, Some(session.access_token.clone()))
    }

    fn apply_identity(&self, raw: &RawIdentity, access_token: Option<String>) -> Identity {
        let identity = Identity::from_raw(raw);
        let profile = Profile::from_raw(raw);
        self.persist_profile(&profile);

        let mut state = self.state.write().unwrap();
        state.identity = Some(identity.clone());
        state.profile = Some(profile);
        if access_token.is_some() {
            state.access_token = access_token;
        }
        state.is_loading = false;
        identity
    }

    fn persist_profile(&self, profile: &Profile) {
        match serde_json::to_string(profile) {
            Ok(json) => self.storage.set(PROFILE_SLOT, &json),
            Err(err) => warn!("profile not persisted: {err}"),
        }
    }

    async fn handle_signed_out(&self) {
        debug!("signing out");

        // Downstream teardown first: caches, then tenant. This store clears
        // itself last so the teardown hook still sees the session.
        let downstream = self.downstream.read().unwrap().clone();
        if let Some(teardown) = downstream {
            teardown();
        }

        self.storage.remove(PROFILE_SLOT);
        {
            let mut state = self.state.write().unwrap();
            state.identity = None;
            state.profile = None;
            state.access_token = None;
            state.is_loading = false;
        }

        self.events.emit(&SessionEvent::SignedOut).await;
    }

    /// Token-bound fields only; the profile and its persisted copy stay.
    fn handle_token_refreshed(&self, session: &ProviderSession) {
        let identity = Identity::from_raw(&session.identity);
        let mut state = self.state.write().unwrap();
        state.identity = Some(identity);
        state.access_token = Some(session.access_token.clone());
    }
}

#[async_trait]
impl SessionObserver for SessionStore {
    async fn session_changed(&self, change: SessionChange) {
        match change {
            SessionChange::SignedIn(session) => {
                debug!(id = %session.identity.id, "provider sign-in");
                let identity = self.apply_session(&session);
                self.events
                    .emit(&SessionEvent::Authenticated(identity))
                    .await;
            }
            SessionChange::SignedOut => self.handle_signed_out().await,
            SessionChange::TokenRefreshed(session) => {
                self.handle_token_refreshed(&session);
                self.events.emit(&SessionEvent::TokenRefreshed).await;
            }
        }
    }
}

impl TokenSource for SessionStore {
    fn access_token(&self) -> Option<String> {
        self.state.read().unwrap().access_token.clone()
    }
}
