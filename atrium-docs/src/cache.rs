//! The documents cache.

use std::sync::RwLock;

use atrium_core::{ErrorInfo, TenantScoped};

use crate::types::{Document, DocumentPatch};

/// Observable documents state.
#[derive(Clone, Debug, Default)]
pub struct DocumentsState {
    pub documents: Vec<Document>,
    pub is_loading: bool,
    pub is_initialized: bool,
    pub error: Option<ErrorInfo>,
}

/// Tenant-scoped cache of the document library.
#[derive(Default)]
pub struct DocumentsCache {
    state: RwLock<DocumentsState>,
}

impl DocumentsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> DocumentsState {
        self.state.read().unwrap().clone()
    }

    pub fn documents(&self) -> Vec<Document> {
        self.state.read().unwrap().documents.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().unwrap().is_initialized
    }

    /// Replace the list with a fresh server snapshot.
    pub fn set_documents(&self, documents: Vec<Document>) {
        let mut state = self.state.write().unwrap();
        state.documents = documents;
        state.error = None;
        state.is_loading = false;
        state.is_initialized = true;
    }

    pub fn add(&self, document: Document) {
        self.state.write().unwrap().documents.push(document);
    }

    pub fn remove(&self, document_id: &str) {
        self.state
            .write()
            .unwrap()
            .documents
            .retain(|document| document.id != document_id);
    }

    /// Apply a partial update to one cached document. Returns false when the
    /// id is not cached.
    pub fn update(&self, document_id: &str, patch: DocumentPatch) -> bool {
        let mut state = self.state.write().unwrap();
        let Some(document) = state
            .documents
            .iter_mut()
            .find(|document| document.id == document_id)
        else {
            return false;
        };

        if let Some(status) = patch.status {
            document.status = status;
        }
        if let Some(url) = patch.url {
            document.url = url;
        }
        if let Some(updated_at) = patch.updated_at {
            document.updated_at = Some(updated_at);
        }
        true
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.write().unwrap().is_loading = loading;
    }

    pub fn set_error(&self, error: Option<ErrorInfo>) {
        let mut state = self.state.write().unwrap();
        state.error = error;
        state.is_loading = false;
    }

    pub fn hydrate(&self, documents: Vec<Document>) {
        let mut state = self.state.write().unwrap();
        state.documents = documents;
        state.is_loading = false;
        state.is_initialized = true;
    }
}

impl TenantScoped for DocumentsCache {
    fn reset(&self) {
        *self.state.write().unwrap() = DocumentsState::default();
    }
}
