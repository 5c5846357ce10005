//! Document library operations.
//!
//! The service embeds the cache and the API client, so callers get one call
//! per user action and the cache stays current. Every operation is
//! token-gated up front: nothing touches the cache or the wire without a
//! session.

use std::sync::Arc;

use tracing::{debug, warn};

use atrium_core::TokenSource;

use crate::api::{DocumentUpload, DocumentsApi};
use crate::cache::DocumentsCache;
use crate::{DocsError, DocsResult};

pub struct DocumentsService {
    api: Arc<dyn DocumentsApi>,
    cache: Arc<DocumentsCache>,
    tokens: Arc<dyn TokenSource>,
}

impl DocumentsService {
    pub fn new(
        api: Arc<dyn DocumentsApi>,
        cache: Arc<DocumentsCache>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self { api, cache, tokens }
    }

    pub fn cache(&self) -> &Arc<DocumentsCache> {
        &self.cache
    }

    fn token(&self) -> DocsResult<String> {
        self.tokens.access_token().ok_or(DocsError::NotAuthenticated)
    }

    /// Refresh the cached list from the backend. Failures are recorded in
    /// the cache error and returned.
    pub async fn refresh(&self) -> DocsResult<()> {
        let token = self.token()?;
        self.cache.set_loading(true);

        match self.api.list(&token).await {
            Ok(documents) => {
                debug!(count = documents.len(), "document list refreshed");
                self.cache.set_documents(documents);
                Ok(())
            }
            Err(err) => {
                warn!("document list refresh failed: {err}");
                self.cache.set_error(Some(err.to_info()));
                Err(err)
            }
        }
    }

    /// Upload a file into the library, then re-list to pick up the
    /// server-assigned record.
    pub async fn upload(&self, upload: DocumentUpload) -> DocsResult<()> {
        let token = self.token()?;
        self.api.upload(&token, &upload).await?;
        self.refresh().await
    }

    /// Ask the backend to train (embed) a document, then re-list to pick up
    /// the status change.
    pub async fn train(&self, document_id: &str) -> DocsResult<()> {
        let token = self.token()?;
        self.api.train(&token, document_id).await?;
        self.refresh().await
    }

    /// Delete a document. The cached entry goes immediately; the re-list
    /// reconciles with the server.
    pub async fn delete(&self, document_id: &str) -> DocsResult<()> {
        let token = self.token()?;
        self.api.delete(&token, document_id).await?;
        self.cache.remove(document_id);
        self.refresh().await
    }
}
