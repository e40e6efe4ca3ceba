//! HTTP client for the Octopus Deploy REST API
//!
//! A thin `reqwest` wrapper that authenticates with the `X-Octopus-ApiKey`
//! header and decodes the JSON resources the audit reads. Endpoints used:
//!
//! - `GET /api/environments/all`
//! - `GET /api/projects/all` (project-name lookup happens client-side)
//! - `GET /api/deploymentprocesses/{id}`
//! - `GET /api/libraryvariablesets/all`
//! - `GET /api/variables/{id}`
//!
//! Non-success statuses and transport failures surface as
//! [`AuditError::ApiRequest`]; a project-name miss surfaces as
//! [`AuditError::ProjectNotFound`].

use anyhow::Result;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::OctopusApi;
use super::models::{
    DeploymentProcessResource, EnvironmentResource, LibraryVariableSetResource, ProjectResource,
    VariableSetResource,
};
use crate::core::AuditError;

/// Header carrying the API key on every request
const API_KEY_HEADER: &str = "X-Octopus-ApiKey";

/// Authenticated client for one Octopus Deploy server
#[derive(Debug, Clone)]
pub struct OctopusClient {
    client: reqwest::Client,
    server_url: String,
    api_key: String,
}

impl OctopusClient {
    /// Create a client for the given server URL and API key
    ///
    /// The URL may carry a trailing slash; it is normalized away so endpoint
    /// paths concatenate cleanly.
    #[must_use]
    pub fn new(server_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut server_url = server_url.into();
        while server_url.ends_with('/') {
            server_url.pop();
        }

        Self {
            client: reqwest::Client::new(),
            server_url,
            api_key: api_key.into(),
        }
    }

    /// GET an endpoint and decode its JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.server_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| AuditError::ApiRequest {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::ApiRequest {
                url,
                reason: format!("HTTP {status}"),
            }
            .into());
        }

        let body = response.json::<T>().await.map_err(|e| AuditError::ApiRequest {
            url,
            reason: format!("invalid response body: {e}"),
        })?;

        Ok(body)
    }
}

impl OctopusApi for OctopusClient {
    async fn environments(&self) -> Result<Vec<EnvironmentResource>> {
        self.get_json("/api/environments/all").await
    }

    async fn find_project_by_name(&self, name: &str) -> Result<ProjectResource> {
        let projects: Vec<ProjectResource> = self.get_json("/api/projects/all").await?;

        projects.into_iter().find(|p| p.name == name).ok_or_else(|| {
            AuditError::ProjectNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    async fn deployment_process(&self, id: &str) -> Result<DeploymentProcessResource> {
        self.get_json(&format!("/api/deploymentprocesses/{id}")).await
    }

    async fn library_variable_sets(&self) -> Result<Vec<LibraryVariableSetResource>> {
        self.get_json("/api/libraryvariablesets/all").await
    }

    async fn variable_set(&self, id: &str) -> Result<VariableSetResource> {
        self.get_json(&format!("/api/variables/{id}")).await
    }
}
