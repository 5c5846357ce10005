//! Startup hydration.

use std::sync::{Arc, Mutex};

use tracing::debug;

use atrium_core::RouteTable;

use crate::runtime::StoreSet;
use crate::snapshot::HydrationSnapshot;

/// Per-mount guards, independent of store state. A guard that has fired
/// never fires again for this coordinator, so re-renders cannot repeat a
/// side effect even if a store was torn down in between.
#[derive(Default)]
struct Guards {
    session_hydrated: bool,
    tenant_hydrated: bool,
    org_settings_hydrated: bool,
    documents_hydrated: bool,
    auth_initialized: bool,
    tenant_loaded: bool,
}

/// Runs once per route-tree mount; safe to call on every render.
///
/// For each snapshot slice present (and store not yet initialized) the
/// store is hydrated directly, bypassing the network. With no session
/// slice, auth initialization runs unless the route is public or the caller
/// opted out. With no tenant slice, the persisted tenant key is read into
/// the store immediately; the workspace fetch itself is triggered by the
/// session's `Authenticated` transition, not by this coordinator.
pub struct StoreHydrator {
    stores: Arc<StoreSet>,
    routes: RouteTable,
    guards: Mutex<Guards>,
}

impl StoreHydrator {
    pub fn new(stores: Arc<StoreSet>, routes: RouteTable) -> Self {
        Self {
            stores,
            routes,
            guards: Mutex::new(Guards::default()),
        }
    }

    pub async fn run(
        &self,
        route: &str,
        snapshot: Option<&HydrationSnapshot>,
        should_initialize_auth: bool,
    ) {
        let empty = HydrationSnapshot::default();
        let snapshot = snapshot.unwrap_or(&empty);

        let mut initialize_auth = false;
        let mut load_tenant = false;
        {
            let mut guards = self.guards.lock().unwrap();

            if let Some(slice) = &snapshot.session {
                if !self.stores.session.is_initialized() && !guards.session_hydrated {
                    debug!("hydrating session from snapshot");
                    self.stores.session.hydrate(
                        slice.identity.clone(),
                        slice.profile.clone(),
                        slice.access_token.clone(),
                    );
                    guards.session_hydrated = true;
                }
            }

            if let Some(slice) = &snapshot.tenant {
                if !self.stores.tenant.is_initialized() && !guards.tenant_hydrated {
                    debug!("hydrating tenant from snapshot");
                    self.stores
                        .tenant
                        .hydrate(slice.active_tenant.clone(), slice.workspaces.clone());
                    guards.tenant_hydrated = true;
                }
            }

            if let Some(slice) = &snapshot.org_settings {
                if !self.stores.org_settings.is_initialized()
                    && !guards.org_settings_hydrated
                {
                    self.stores.org_settings.hydrate(slice.settings.clone());
                    guards.org_settings_hydrated = true;
                }
            }

            if let Some(slice) = &snapshot.documents {
                if !self.stores.documents.is_initialized() && !guards.documents_hydrated {
                    self.stores.documents.hydrate(slice.documents.clone());
                    guards.documents_hydrated = true;
                }
            }

            if snapshot.session.is_none()
                && !self.stores.session.is_initialized()
                && should_initialize_auth
                && !self.routes.is_public(route)
                && !guards.auth_initialized
            {
                initialize_auth = true;
                guards.auth_initialized = true;
            }

            if snapshot.tenant.is_none()
                && !self.stores.tenant.is_initialized()
                && !guards.tenant_loaded
            {
                load_tenant = true;
                guards.tenant_loaded = true;
            }
        }

        if load_tenant {
            self.stores.tenant.load_persisted();
        }
        if initialize_auth {
            debug!(route, "initializing auth");
            self.stores.session.clone().initialize().await;
        }
    }
}
