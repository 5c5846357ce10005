//! atrium-hydrate: startup hydration and store composition.
//!
//! Two jobs live here. [`StoreSet::wire`] builds the whole store graph and
//! installs the cross-store couplings: dependent caches into the switch
//! protocol, the workspace fetch onto the session's `Authenticated`
//! transition, and the sign-out teardown cascade (caches, then tenant, then
//! session). [`StoreHydrator`] runs once per route-tree mount, seeding
//! stores from a server-prepared snapshot where one exists and kicking off
//! client-side initialization where one does not.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use atrium_core::{MemoryStorage, RouteTable};
//! use atrium_hydrate::{StoreHydrator, StoreSet};
//! use atrium_session::AuthProvider;
//! use atrium_tenant::HttpWorkspacesApi;
//!
//! async fn boot(provider: Arc<dyn AuthProvider>) {
//!     let stores = StoreSet::wire(
//!         provider,
//!         Arc::new(HttpWorkspacesApi::new("https://api.example.com")),
//!         Arc::new(MemoryStorage::new()),
//!         None,
//!     );
//!     let hydrator = StoreHydrator::new(stores.clone(), RouteTable::defaults());
//!     hydrator.run("/dashboard", None, true).await;
//! }
//! ```

pub mod hydrator;
pub mod runtime;
pub mod snapshot;

pub use hydrator::StoreHydrator;
pub use runtime::StoreSet;
pub use snapshot::{
    DocumentsSlice, HydrationSnapshot, OrgSettingsSlice, SessionSlice, TenantSlice,
};
