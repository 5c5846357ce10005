//! Backend REST boundary for the document library.

use async_trait::async_trait;

use atrium_core::ErrorInfo;

use crate::types::{Document, DocumentsEnvelope};
use crate::{DocsError, DocsResult};

/// A file handed to the upload endpoint.
#[derive(Clone, Debug)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub industry: Option<String>,
}

#[async_trait]
pub trait DocumentsApi: Send + Sync {
    /// `GET /admin/docs`.
    async fn list(&self, token: &str) -> DocsResult<Vec<Document>>;

    /// `POST /admin/docs/upload` (multipart). The caller re-lists to pick
    /// up the server-assigned record.
    async fn upload(&self, token: &str, upload: &DocumentUpload) -> DocsResult<()>;

    /// `POST /admin/embeddings`: ask the backend to train a document.
    async fn train(&self, token: &str, document_id: &str) -> DocsResult<()>;

    /// `DELETE /admin/docs/{id}`.
    async fn delete(&self, token: &str, document_id: &str) -> DocsResult<()>;
}

/// reqwest-backed client for the dashboard backend.
pub struct HttpDocumentsApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDocumentsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

async fn api_error(response: reqwest::Response) -> DocsError {
    let status = response.status().as_u16();
    let body = response
        .json::<serde_json::Value>()
        .await
        .unwrap_or(serde_json::Value::Null);
    DocsError::Api(ErrorInfo::from_response_body(status, &body))
}

#[async_trait]
impl DocumentsApi for HttpDocumentsApi {
    async fn list(&self, token: &str) -> DocsResult<Vec<Document>> {
        let response = self
            .client
            .get(format!("{}/admin/docs", self.base_url))
            .header("accept", "application/json")
            .header("access_token", token)
            .send()
            .await
            .map_err(|err| DocsError::transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let envelope: DocumentsEnvelope = response
            .json()
            .await
            .map_err(|err| DocsError::transport(err.to_string()))?;
        Ok(envelope.data)
    }

    async fn upload(&self, token: &str, upload: &DocumentUpload) -> DocsResult<()> {
        let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone());
        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(industry) = &upload.industry {
            form = form.text("industry", industry.clone());
        }

        let mut request = self
            .client
            .post(format!("{}/admin/docs/upload", self.base_url))
            .header("access_token", token)
            .multipart(form);
        if let Some(industry) = &upload.industry {
            request = request.header("x-industry", industry.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|err| DocsError::transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }

    async fn train(&self, token: &str, document_id: &str) -> DocsResult<()> {
        let response = self
            .client
            .post(format!("{}/admin/embeddings", self.base_url))
            .header("accept", "application/json")
            .header("access_token", token)
            .json(&serde_json::json!({ "documentId": document_id }))
            .send()
            .await
            .map_err(|err| DocsError::transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }

    async fn delete(&self, token: &str, document_id: &str) -> DocsResult<()> {
        let response = self
            .client
            .delete(format!("{}/admin/docs/{document_id}", self.base_url))
            .header("accept", "application/json")
            .header("access_token", token)
            .send()
            .await
            .map_err(|err| DocsError::transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }
}
