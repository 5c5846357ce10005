//! The org-settings cache.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atrium_core::{ErrorInfo, TenantScoped};

/// Workspace-level settings record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgSettings {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Observable org-settings state.
#[derive(Clone, Debug, Default)]
pub struct OrgSettingsState {
    pub settings: Option<OrgSettings>,
    pub is_loading: bool,
    pub is_initialized: bool,
    pub error: Option<ErrorInfo>,
}

/// Tenant-scoped cache of the active workspace's settings.
#[derive(Default)]
pub struct OrgSettingsCache {
    state: RwLock<OrgSettingsState>,
}

impl OrgSettingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> OrgSettingsState {
        self.state.read().unwrap().clone()
    }

    pub fn settings(&self) -> Option<OrgSettings> {
        self.state.read().unwrap().settings.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().unwrap().is_initialized
    }

    pub fn set_settings(&self, settings: Option<OrgSettings>) {
        let mut state = self.state.write().unwrap();
        state.settings = settings;
        state.error = None;
        state.is_loading = false;
        state.is_initialized = true;
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.write().unwrap().is_loading = loading;
    }

    pub fn set_error(&self, error: Option<ErrorInfo>) {
        let mut state = self.state.write().unwrap();
        state.error = error;
        state.is_loading = false;
    }

    pub fn hydrate(&self, settings: Option<OrgSettings>) {
        let mut state = self.state.write().unwrap();
        state.settings = settings;
        state.is_loading = false;
        state.is_initialized = true;
    }
}

impl TenantScoped for OrgSettingsCache {
    fn reset(&self) {
        *self.state.write().unwrap() = OrgSettingsState::default();
    }
}
