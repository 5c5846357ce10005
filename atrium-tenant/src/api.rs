//! Backend REST boundary for workspaces.

use async_trait::async_trait;

use atrium_core::ErrorInfo;

use crate::types::{Envelope, NewWorkspace, Workspace, WorkspaceDirectory};
use crate::{TenantError, TenantResult};

#[async_trait]
pub trait WorkspacesApi: Send + Sync {
    /// `GET /orgs/my-workspaces` for the holder of `token`.
    async fn my_workspaces(&self, token: &str) -> TenantResult<WorkspaceDirectory>;

    /// `POST /orgs`: create a team workspace.
    async fn create_workspace(
        &self,
        token: &str,
        payload: &NewWorkspace,
    ) -> TenantResult<Workspace>;
}

/// reqwest-backed client for the dashboard backend.
pub struct HttpWorkspacesApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpWorkspacesApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

async fn api_error(response: reqwest::Response) -> TenantError {
    let status = response.status().as_u16();
    let body = response
        .json::<serde_json::Value>()
        .await
        .unwrap_or(serde_json::Value::Null);
    TenantError::Api(ErrorInfo::from_response_body(status, &body))
}

#[async_trait]
impl WorkspacesApi for HttpWorkspacesApi {
    async fn my_workspaces(&self, token: &str) -> TenantResult<WorkspaceDirectory> {
        let response = self
            .client
            .get(format!("{}/orgs/my-workspaces", self.base_url))
            .header("accept", "*/*")
            .header("access_token", token)
            .send()
            .await
            .map_err(|err| TenantError::transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let envelope: Envelope<WorkspaceDirectory> = response
            .json()
            .await
            .map_err(|err| TenantError::transport(err.to_string()))?;
        Ok(envelope.data)
    }

    async fn create_workspace(
        &self,
        token: &str,
        payload: &NewWorkspace,
    ) -> TenantResult<Workspace> {
        let response = self
            .client
            .post(format!("{}/orgs", self.base_url))
            .header("accept", "*/*")
            .header("access_token", token)
            .json(payload)
            .send()
            .await
            .map_err(|err| TenantError::transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let envelope: Envelope<Workspace> = response
            .json()
            .await
            .map_err(|err| TenantError::transport(err.to_string()))?;
        Ok(envelope.data)
    }
}
