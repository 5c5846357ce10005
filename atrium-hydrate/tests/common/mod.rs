//! Shared doubles for the hydration and lifecycle suites.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use atrium_core::{KeyValueStorage, MemoryStorage};
use atrium_session::{
    AuthProvider, ProviderSession, RawIdentity, SessionChange, SessionObserver, SessionResult,
};
use atrium_tenant::{
    NewWorkspace, TenantError, TenantResult, Workspace, WorkspaceDirectory, WorkspacesApi,
};

pub fn raw_identity(id: &str, email: &str, name: &str) -> RawIdentity {
    let mut meta = Map::new();
    meta.insert("name".to_string(), Value::String(name.to_string()));
    RawIdentity {
        id: id.to_string(),
        email: Some(email.to_string()),
        phone: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        user_metadata: meta,
    }
}

pub fn provider_session(id: &str, email: &str, token: &str) -> ProviderSession {
    ProviderSession {
        access_token: token.to_string(),
        identity: raw_identity(id, email, "Ada Lovelace"),
    }
}

pub fn workspace(slug: &str, personal: bool) -> Workspace {
    Workspace {
        id: format!("ws-{slug}"),
        name: slug.to_string(),
        slug: slug.to_string(),
        description: None,
        is_active: true,
        is_personal: personal,
        owner_id: "user-1".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn directory() -> WorkspaceDirectory {
    WorkspaceDirectory {
        personal: Some(workspace("acme-personal", true)),
        teams: vec![workspace("acme-team", false)],
    }
}

pub struct MockProvider {
    pub session: Mutex<Option<ProviderSession>>,
    pub reads: AtomicUsize,
    observers: Mutex<Vec<Arc<dyn SessionObserver>>>,
}

impl MockProvider {
    pub fn new(session: Option<ProviderSession>) -> Arc<Self> {
        Arc::new(Self {
            session: Mutex::new(session),
            reads: AtomicUsize::new(0),
            observers: Mutex::new(Vec::new()),
        })
    }

    pub async fn notify(&self, change: SessionChange) {
        let observers: Vec<Arc<dyn SessionObserver>> =
            self.observers.lock().unwrap().clone();
        for observer in observers {
            observer.session_changed(change.clone()).await;
        }
    }
}

#[async_trait]
impl AuthProvider for MockProvider {
    async fn current_session(&self) -> SessionResult<Option<ProviderSession>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.session.lock().unwrap().clone())
    }

    async fn send_code(&self, _email: &str) -> SessionResult<()> {
        Ok(())
    }

    async fn verify_code(&self, email: &str, _code: &str) -> SessionResult<ProviderSession> {
        Ok(provider_session("user-1", email, "token-otp"))
    }

    async fn sign_out(&self) -> SessionResult<()> {
        *self.session.lock().unwrap() = None;
        self.notify(SessionChange::SignedOut).await;
        Ok(())
    }

    fn subscribe(&self, observer: Arc<dyn SessionObserver>) {
        self.observers.lock().unwrap().push(observer);
    }
}

pub struct MockWorkspacesApi {
    pub directory: Mutex<WorkspaceDirectory>,
    pub calls: AtomicUsize,
}

impl MockWorkspacesApi {
    pub fn new(directory: WorkspaceDirectory) -> Arc<Self> {
        Arc::new(Self {
            directory: Mutex::new(directory),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl WorkspacesApi for MockWorkspacesApi {
    async fn my_workspaces(&self, _token: &str) -> TenantResult<WorkspaceDirectory> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.directory.lock().unwrap().clone())
    }

    async fn create_workspace(
        &self,
        _token: &str,
        _payload: &NewWorkspace,
    ) -> TenantResult<Workspace> {
        Err(TenantError::transport("not used in these tests"))
    }
}

/// Storage wrapper that logs persistence traffic for ordering assertions.
pub struct RecordingStorage {
    inner: MemoryStorage,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl RecordingStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStorage::new(),
            log: Arc::new(Mutex::new(Vec::new())),
        })
    }
}

impl KeyValueStorage for RecordingStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.log.lock().unwrap().push(format!("persist:{key}"));
        self.inner.set(key, value);
    }

    fn remove(&self, key: &str) {
        self.log.lock().unwrap().push(format!("remove:{key}"));
        self.inner.remove(key);
    }
}
