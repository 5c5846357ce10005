//! The tenant store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use atrium_core::{ErrorInfo, KeyValueStorage, TenantScoped, TokenSource, TENANT_KEY_SLOT};

use crate::api::WorkspacesApi;
use crate::invalidate::QueryInvalidator;
use crate::types::WorkspaceDirectory;

/// Observable tenant state.
///
/// Post-commit invariant: `active_tenant`, when set, equals the slug of the
/// personal workspace or of some team in `workspaces`.
#[derive(Clone, Debug, Default)]
pub struct TenantState {
    pub active_tenant: Option<String>,
    pub workspaces: Option<WorkspaceDirectory>,
    pub is_loading: bool,
    pub is_initialized: bool,
    pub is_switching: bool,
    pub error: Option<ErrorInfo>,
}

/// Holds the selected workspace key and the directory of workspaces
/// available to the session.
pub struct TenantStore {
    state: RwLock<TenantState>,
    api: Arc<dyn WorkspacesApi>,
    storage: Arc<dyn KeyValueStorage>,
    tokens: Arc<dyn TokenSource>,
    caches: Vec<Arc<dyn TenantScoped>>,
    invalidator: Option<Arc<dyn QueryInvalidator>>,
    /// Bumped by every fetch, clear, and switch; a fetch response whose
    /// stamp no longer matches is discarded instead of overwriting newer
    /// state.
    generation: AtomicU64,
}

impl TenantStore {
    pub fn new(
        api: Arc<dyn WorkspacesApi>,
        storage: Arc<dyn KeyValueStorage>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            // `is_loading` starts false: it is the in-flight guard for the
            // fetch, not a "not ready yet" marker (`is_initialized` is).
            state: RwLock::new(TenantState::default()),
            api,
            storage,
            tokens,
            caches: Vec::new(),
            invalidator: None,
            generation: AtomicU64::new(0),
        }
    }

    /// Register a cache the switch protocol and teardown must reset.
    pub fn with_dependent_cache(mut self, cache: Arc<dyn TenantScoped>) -> Self {
        self.caches.push(cache);
        self
    }

    /// Install the remote-data cache hook invoked on every commit.
    pub fn with_invalidator(mut self, invalidator: Arc<dyn QueryInvalidator>) -> Self {
        self.invalidator = Some(invalidator);
        self
    }

    pub fn snapshot(&self) -> TenantState {
        self.state.read().unwrap().clone()
    }

    pub fn active_tenant(&self) -> Option<String> {
        self.state.read().unwrap().active_tenant.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().unwrap().is_initialized
    }

    pub fn is_switching(&self) -> bool {
        self.state.read().unwrap().is_switching
    }

    /// Set (or clear) the active tenant key and mirror it into the durable
    /// slot. Pure and synchronous; validation is the switch protocol's job.
    pub fn set_active_tenant(&self, key: Option<&str>) {
        debug!(?key, "set active tenant");
        {
            let mut state = self.state.write().unwrap();
            state.active_tenant = key.map(str::to_string);
        }
        match key {
            Some(key) => self.storage.set(TENANT_KEY_SLOT, key),
            None => self.storage.remove(TENANT_KEY_SLOT),
        }
    }

    /// Startup-only reconciliation with the durable slot. Leaves the store
    /// uninitialized on purpose: initialization completes with the first
    /// workspace fetch once the session is authenticated. The slot is never
    /// read again afterwards.
    pub fn load_persisted(&self) {
        let persisted = self.storage.get(TENANT_KEY_SLOT);
        debug!(key = ?persisted, "loaded persisted tenant key");
        let mut state = self.state.write().unwrap();
        state.active_tenant = persisted;
        state.is_loading = false;
    }

    /// Fetch the workspace directory for the current session.
    ///
    /// One fetch at a time: a call while another is in flight is dropped.
    /// A missing token completes as a valid empty state (not signed in
    /// yet); the `Authenticated` transition retries it. Failures are
    /// recorded in `error` with the stale directory kept - stale data beats
    /// an empty screen, and `is_initialized` is set either way so the UI
    /// never spins forever.
    pub async fn fetch_workspaces(&self) {
        {
            let mut state = self.state.write().unwrap();
            if state.is_loading {
                return;
            }
            state.is_loading = true;
            state.error = None;
        }
        let generation = self.bump_generation();

        let Some(token) = self.tokens.access_token() else {
            let mut state = self.state.write().unwrap();
            state.is_loading = false;
            state.is_initialized = true;
            return;
        };

        let result = self.api.my_workspaces(&token).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("workspace fetch superseded, discarding response");
            self.state.write().unwrap().is_loading = false;
            return;
        }

        let default_key = match result {
            Ok(directory) => {
                let mut state = self.state.write().unwrap();
                state.workspaces = Some(directory);
                state.is_loading = false;
                state.is_initialized = true;
                state.error = None;
                if state.active_tenant.is_none() {
                    state
                        .workspaces
                        .as_ref()
                        .and_then(|d| d.personal.as_ref())
                        .map(|personal| personal.slug.clone())
                } else {
                    None
                }
            }
            Err(err) => {
                warn!("workspace fetch failed: {err}");
                let mut state = self.state.write().unwrap();
                state.error = Some(err.to_info());
                state.is_loading = false;
                state.is_initialized = true;
                None
            }
        };

        // Default-to-personal: a session with no chosen workspace lands in
        // its personal one.
        if let Some(slug) = default_key {
            self.set_active_tenant(Some(&slug));
        }
    }

    /// Full teardown on sign-out. Also invalidates any in-flight fetch.
    pub fn clear(&self) {
        debug!("clearing tenant store");
        self.bump_generation();
        {
            let mut state = self.state.write().unwrap();
            state.active_tenant = None;
            state.workspaces = None;
            state.error = None;
            state.is_loading = false;
            state.is_initialized = false;
        }
        self.storage.remove(TENANT_KEY_SLOT);
    }

    /// Seed state from a server-prepared snapshot.
    pub fn hydrate(
        &self,
        active_tenant: Option<String>,
        workspaces: Option<WorkspaceDirectory>,
    ) {
        let mut state = self.state.write().unwrap();
        state.active_tenant = active_tenant;
        state.workspaces = workspaces;
        state.is_loading = false;
        state.is_initialized = true;
    }

    pub(crate) fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn reset_dependent_caches(&self) {
        debug!(count = self.caches.len(), "resetting dependent caches");
        for cache in &self.caches {
            cache.reset();
        }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.storage
    }

    pub(crate) fn state(&self) -> &RwLock<TenantState> {
        &self.state
    }

    pub(crate) fn invalidator(&self) -> Option<&Arc<dyn QueryInvalidator>> {
        self.invalidator.as_ref()
    }
}
