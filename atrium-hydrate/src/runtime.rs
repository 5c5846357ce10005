//! Store construction and wiring.

use std::sync::Arc;

use atrium_core::{KeyValueStorage, TenantScoped, TokenSource};
use atrium_docs::{DocumentsApi, DocumentsCache, DocumentsService, OrgSettingsCache};
use atrium_session::{AuthProvider, SessionEvent, SessionStore};
use atrium_tenant::{QueryInvalidator, TenantStore, WorkspacesApi};

/// The complete store graph for one dashboard process.
pub struct StoreSet {
    pub session: Arc<SessionStore>,
    pub tenant: Arc<TenantStore>,
    pub documents: Arc<DocumentsCache>,
    pub org_settings: Arc<OrgSettingsCache>,
}

impl StoreSet {
    /// Build the stores and install the cross-store couplings.
    ///
    /// All coupling is explicit and one-directional: the tenant store gets
    /// the caches it must reset, the session hub gets the listener that
    /// triggers the workspace fetch, and the session store gets the
    /// teardown hook that runs caches-then-tenant on sign-out. Nothing
    /// looks anything up dynamically.
    pub fn wire(
        provider: Arc<dyn AuthProvider>,
        workspaces_api: Arc<dyn WorkspacesApi>,
        storage: Arc<dyn KeyValueStorage>,
        invalidator: Option<Arc<dyn QueryInvalidator>>,
    ) -> Arc<Self> {
        let session = Arc::new(SessionStore::new(provider, storage.clone()));
        let documents = Arc::new(DocumentsCache::new());
        let org_settings = Arc::new(OrgSettingsCache::new());

        let tokens: Arc<dyn TokenSource> = session.clone();
        let mut tenant = TenantStore::new(workspaces_api, storage, tokens)
            .with_dependent_cache(documents.clone())
            .with_dependent_cache(org_settings.clone());
        if let Some(invalidator) = invalidator {
            tenant = tenant.with_invalidator(invalidator);
        }
        let tenant = Arc::new(tenant);

        // The workspace fetch is event-driven: it runs when the session
        // becomes authenticated, not on a timer. The fetch's own guards
        // handle repeats.
        {
            let tenant = tenant.clone();
            session.events().on(move |event: &SessionEvent| {
                let tenant = tenant.clone();
                let authenticated = matches!(event, SessionEvent::Authenticated(_));
                Box::pin(async move {
                    if authenticated {
                        tenant.fetch_workspaces().await;
                    }
                })
            });
        }

        // Sign-out teardown in dependency order: caches, then tenant. The
        // session store clears itself after this hook returns.
        {
            let documents = documents.clone();
            let org_settings = org_settings.clone();
            let tenant = tenant.clone();
            session.set_downstream(Arc::new(move || {
                documents.reset();
                org_settings.reset();
                tenant.clear();
            }));
        }

        Arc::new(Self {
            session,
            tenant,
            documents,
            org_settings,
        })
    }

    /// Document service bound to this store set's cache and session.
    pub fn documents_service(&self, api: Arc<dyn DocumentsApi>) -> DocumentsService {
        DocumentsService::new(api, self.documents.clone(), self.session.clone())
    }
}
