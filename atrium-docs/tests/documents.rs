use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use atrium_core::{ErrorInfo, FixedTokenSource, TenantScoped};
use atrium_docs::{
    DocsError, DocsResult, Document, DocumentPatch, DocumentUpload, DocumentsApi,
    DocumentsCache, DocumentsService, OrgSettings, OrgSettingsCache,
};

/// Test factory functions
fn document(id: &str, file_name: &str, status: &str) -> Document {
    Document {
        id: id.to_string(),
        org_id: Some("ws-acme-personal".to_string()),
        industry: "finance".to_string(),
        file_name: file_name.to_string(),
        url: format!("https://cdn.example.com/{file_name}"),
        status: status.to_string(),
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn org_settings() -> OrgSettings {
    OrgSettings {
        id: "org-1".to_string(),
        name: "Acme".to_string(),
        description: None,
        industry: Some("finance".to_string()),
        logo_url: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

struct MockDocsApi {
    documents: Mutex<Vec<Document>>,
    fail_list: Mutex<Option<ErrorInfo>>,
    log: Mutex<Vec<String>>,
}

impl MockDocsApi {
    fn new(documents: Vec<Document>) -> Arc<Self> {
        Arc::new(Self {
            documents: Mutex::new(documents),
            fail_list: Mutex::new(None),
            log: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl DocumentsApi for MockDocsApi {
    async fn list(&self, _token: &str) -> DocsResult<Vec<Document>> {
        self.log.lock().unwrap().push("list".to_string());
        if let Some(info) = self.fail_list.lock().unwrap().clone() {
            return Err(DocsError::Api(info));
        }
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn upload(&self, _token: &str, upload: &DocumentUpload) -> DocsResult<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("upload:{}", upload.file_name));
        let id = format!("doc-{}", upload.file_name);
        self.documents
            .lock()
            .unwrap()
            .push(document(&id, &upload.file_name, "uploaded"));
        Ok(())
    }

    async fn train(&self, _token: &str, document_id: &str) -> DocsResult<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("train:{document_id}"));
        let mut documents = self.documents.lock().unwrap();
        if let Some(doc) = documents.iter_mut().find(|doc| doc.id == document_id) {
            doc.status = "trained".to_string();
        }
        Ok(())
    }

    async fn delete(&self, _token: &str, document_id: &str) -> DocsResult<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("delete:{document_id}"));
        self.documents
            .lock()
            .unwrap()
            .retain(|doc| doc.id != document_id);
        Ok(())
    }
}

fn service_with(
    api: Arc<MockDocsApi>,
    token: Option<&str>,
) -> (DocumentsService, Arc<DocumentsCache>) {
    let cache = Arc::new(DocumentsCache::new());
    let tokens = Arc::new(FixedTokenSource::new(token.map(str::to_string)));
    (
        DocumentsService::new(api, cache.clone(), tokens),
        cache,
    )
}

#[test]
fn cache_updates_apply_patches() {
    let cache = DocumentsCache::new();
    cache.set_documents(vec![document("doc-1", "q3.pdf", "uploaded")]);

    let applied = cache.update(
        "doc-1",
        DocumentPatch {
            status: Some("trained".to_string()),
            ..DocumentPatch::default()
        },
    );
    assert!(applied);
    assert_eq!(cache.documents()[0].status, "trained");

    let missing = cache.update("doc-9", DocumentPatch::default());
    assert!(!missing);
}

#[test]
fn cache_reset_returns_to_uninitialized() {
    let cache = DocumentsCache::new();
    cache.set_documents(vec![document("doc-1", "q3.pdf", "uploaded")]);
    assert!(cache.is_initialized());

    cache.reset();

    let state = cache.snapshot();
    assert!(state.documents.is_empty());
    assert!(!state.is_initialized);
    assert!(state.error.is_none());
}

#[test]
fn org_settings_cache_resets() {
    let cache = OrgSettingsCache::new();
    cache.set_settings(Some(org_settings()));
    assert!(cache.is_initialized());

    cache.reset();

    let state = cache.snapshot();
    assert!(state.settings.is_none());
    assert!(!state.is_initialized);
}

#[tokio::test]
async fn refresh_populates_the_cache() {
    let api = MockDocsApi::new(vec![document("doc-1", "q3.pdf", "trained")]);
    let (service, cache) = service_with(api, Some("token-1"));

    service.refresh().await.unwrap();

    let state = cache.snapshot();
    assert_eq!(state.documents.len(), 1);
    assert!(state.is_initialized);
    assert!(state.error.is_none());
}

/// 14. Mutations are token-gated: without a session nothing reaches the
/// wire and the cache is untouched.
#[tokio::test]
async fn operations_without_token_are_rejected() {
    let api = MockDocsApi::new(vec![document("doc-1", "q3.pdf", "trained")]);
    let (service, cache) = service_with(api.clone(), None);

    let upload = DocumentUpload {
        file_name: "q4.pdf".to_string(),
        bytes: b"%PDF-1.7".to_vec(),
        industry: Some("finance".to_string()),
    };
    assert!(matches!(
        service.upload(upload).await,
        Err(DocsError::NotAuthenticated)
    ));
    assert!(matches!(
        service.train("doc-1").await,
        Err(DocsError::NotAuthenticated)
    ));
    assert!(matches!(
        service.delete("doc-1").await,
        Err(DocsError::NotAuthenticated)
    ));

    assert!(api.log.lock().unwrap().is_empty());
    let state = cache.snapshot();
    assert!(state.documents.is_empty());
    assert!(!state.is_initialized);
}

#[tokio::test]
async fn upload_refreshes_the_list() {
    let api = MockDocsApi::new(vec![]);
    let (service, cache) = service_with(api.clone(), Some("token-1"));

    service
        .upload(DocumentUpload {
            file_name: "q4.pdf".to_string(),
            bytes: b"%PDF-1.7".to_vec(),
            industry: Some("finance".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(
        api.log.lock().unwrap().as_slice(),
        ["upload:q4.pdf".to_string(), "list".to_string()]
    );
    assert_eq!(cache.documents().len(), 1);
    assert_eq!(cache.documents()[0].file_name, "q4.pdf");
}

#[tokio::test]
async fn train_picks_up_the_status_change() {
    let api = MockDocsApi::new(vec![document("doc-1", "q3.pdf", "uploaded")]);
    let (service, cache) = service_with(api, Some("token-1"));
    service.refresh().await.unwrap();

    service.train("doc-1").await.unwrap();

    assert_eq!(cache.documents()[0].status, "trained");
}

#[tokio::test]
async fn delete_removes_and_reconciles() {
    let api = MockDocsApi::new(vec![
        document("doc-1", "q3.pdf", "trained"),
        document("doc-2", "q4.pdf", "uploaded"),
    ]);
    let (service, cache) = service_with(api.clone(), Some("token-1"));
    service.refresh().await.unwrap();

    service.delete("doc-1").await.unwrap();

    assert_eq!(cache.documents().len(), 1);
    assert_eq!(cache.documents()[0].id, "doc-2");
    assert!(api
        .log
        .lock()
        .unwrap()
        .contains(&"delete:doc-1".to_string()));
}

#[tokio::test]
async fn refresh_failure_is_recorded_and_returned() {
    let api = MockDocsApi::new(vec![document("doc-1", "q3.pdf", "trained")]);
    let (service, cache) = service_with(api.clone(), Some("token-1"));
    service.refresh().await.unwrap();

    *api.fail_list.lock().unwrap() =
        Some(ErrorInfo::new("document service unavailable").with_status(503));
    let result = service.refresh().await;

    assert!(matches!(result, Err(DocsError::Api(_))));
    let state = cache.snapshot();
    assert_eq!(
        state.error.as_ref().map(|e| e.message.as_str()),
        Some("document service unavailable")
    );
    // Stale list kept: errors do not wipe data.
    assert_eq!(state.documents.len(), 1);
}
