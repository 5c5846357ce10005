mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use atrium_core::{KeyValueStorage, MemoryStorage, RouteTable, TENANT_KEY_SLOT};
use atrium_hydrate::{
    DocumentsSlice, HydrationSnapshot, SessionSlice, StoreHydrator, StoreSet, TenantSlice,
};
use atrium_session::Identity;

use common::{directory, provider_session, raw_identity, MockProvider, MockWorkspacesApi};

fn boot(
    provider: &Arc<MockProvider>,
    api: &Arc<MockWorkspacesApi>,
    storage: Arc<dyn KeyValueStorage>,
) -> (Arc<StoreSet>, StoreHydrator) {
    let stores = StoreSet::wire(provider.clone(), api.clone(), storage, None);
    let hydrator = StoreHydrator::new(stores.clone(), RouteTable::defaults());
    (stores, hydrator)
}

/// 11. A snapshot hydrates every store directly: no provider read, no
/// workspace fetch.
#[tokio::test]
async fn snapshot_hydration_bypasses_network() {
    let provider = MockProvider::new(None);
    let api = MockWorkspacesApi::new(directory());
    let (stores, hydrator) = boot(&provider, &api, Arc::new(MemoryStorage::new()));

    let snapshot = HydrationSnapshot {
        session: Some(SessionSlice {
            identity: Some(Identity::from_raw(&raw_identity(
                "user-1",
                "ada@acme.dev",
                "Ada Lovelace",
            ))),
            profile: None,
            access_token: Some("token-1".to_string()),
        }),
        tenant: Some(TenantSlice {
            active_tenant: Some("acme-team".to_string()),
            workspaces: Some(directory()),
        }),
        org_settings: None,
        documents: Some(DocumentsSlice { documents: vec![] }),
    };

    hydrator.run("/dashboard", Some(&snapshot), true).await;

    assert!(stores.session.is_initialized());
    assert_eq!(stores.session.identity().unwrap().id, "user-1");
    assert!(stores.tenant.is_initialized());
    assert_eq!(
        stores.tenant.active_tenant(),
        Some("acme-team".to_string())
    );
    assert!(stores.documents.is_initialized());
    assert_eq!(provider.reads.load(Ordering::SeqCst), 0);
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
}

/// Repeated runs (one per render) never repeat a side effect.
#[tokio::test]
async fn run_is_idempotent() {
    let provider = MockProvider::new(None);
    let api = MockWorkspacesApi::new(directory());
    let (_stores, hydrator) = boot(&provider, &api, Arc::new(MemoryStorage::new()));

    hydrator.run("/dashboard", None, true).await;
    hydrator.run("/dashboard", None, true).await;
    hydrator.run("/dashboard", None, true).await;

    assert_eq!(provider.reads.load(Ordering::SeqCst), 1);
}

/// Public routes never trigger an auth read.
#[tokio::test]
async fn public_route_skips_auth_initialization() {
    let provider = MockProvider::new(None);
    let api = MockWorkspacesApi::new(directory());
    let (stores, hydrator) = boot(&provider, &api, Arc::new(MemoryStorage::new()));

    hydrator.run("/auth/login", None, true).await;

    assert_eq!(provider.reads.load(Ordering::SeqCst), 0);
    assert!(!stores.session.is_initialized());
}

#[tokio::test]
async fn opt_out_skips_auth_initialization() {
    let provider = MockProvider::new(None);
    let api = MockWorkspacesApi::new(directory());
    let (stores, hydrator) = boot(&provider, &api, Arc::new(MemoryStorage::new()));

    hydrator.run("/dashboard", None, false).await;

    assert_eq!(provider.reads.load(Ordering::SeqCst), 0);
    assert!(!stores.session.is_initialized());
}

/// With no tenant snapshot the persisted key is read into the store
/// immediately, without marking the store initialized; the fetch completes
/// initialization once the session is authenticated.
#[tokio::test]
async fn persisted_tenant_key_is_loaded_not_initialized() {
    let provider = MockProvider::new(None);
    let api = MockWorkspacesApi::new(directory());
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TENANT_KEY_SLOT, "acme-team");
    let (stores, hydrator) = boot(&provider, &api, storage);

    hydrator.run("/dashboard", None, true).await;

    let state = stores.tenant.snapshot();
    assert_eq!(state.active_tenant, Some("acme-team".to_string()));
    assert!(!state.is_initialized);
    assert!(!state.is_loading);
}

/// A restored session drives the workspace fetch through the Authenticated
/// transition - no polling, no explicit call.
#[tokio::test]
async fn restored_session_triggers_workspace_fetch() {
    let provider = MockProvider::new(Some(provider_session(
        "user-1",
        "ada@acme.dev",
        "token-1",
    )));
    let api = MockWorkspacesApi::new(directory());
    let (stores, hydrator) = boot(&provider, &api, Arc::new(MemoryStorage::new()));

    hydrator.run("/dashboard", None, true).await;

    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    assert!(stores.tenant.is_initialized());
    assert_eq!(
        stores.tenant.active_tenant(),
        Some("acme-personal".to_string())
    );
}
