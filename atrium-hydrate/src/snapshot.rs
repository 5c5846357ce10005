//! Server-prepared hydration snapshot.
//!
//! A slice that is present hydrates its store directly, bypassing the
//! network; a slice that is absent leaves the store to client-side
//! initialization.

use atrium_docs::{Document, OrgSettings};
use atrium_session::{Identity, Profile};
use atrium_tenant::WorkspaceDirectory;

#[derive(Clone, Debug, Default)]
pub struct SessionSlice {
    pub identity: Option<Identity>,
    pub profile: Option<Profile>,
    pub access_token: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct TenantSlice {
    pub active_tenant: Option<String>,
    pub workspaces: Option<WorkspaceDirectory>,
}

#[derive(Clone, Debug, Default)]
pub struct OrgSettingsSlice {
    pub settings: Option<OrgSettings>,
}

#[derive(Clone, Debug, Default)]
pub struct DocumentsSlice {
    pub documents: Vec<Document>,
}

#[derive(Clone, Debug, Default)]
pub struct HydrationSnapshot {
    pub session: Option<SessionSlice>,
    pub tenant: Option<TenantSlice>,
    pub org_settings: Option<OrgSettingsSlice>,
    pub documents: Option<DocumentsSlice>,
}
