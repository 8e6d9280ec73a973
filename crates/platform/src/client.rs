//! REST client for the build platform HTTP endpoints.
//!
//! Wraps the platform API (projects, deployments, domains, environment
//! variables) using [`reqwest`].  Every call funnels through one
//! request helper that attaches bearer auth and the optional team
//! scope, serializes JSON bodies, and classifies failures via
//! [`crate::error::classify_status`].

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

use crate::api::BuildPlatform;
use crate::error::{classify_status, PlatformError};
use crate::types::{
    Deployment, DeploymentFile, DomainConfigStatus, DomainStatus, EnvVar, Project,
};

/// Connection settings for one platform account.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// API base URL, no trailing slash.
    pub base_url: String,
    /// Bearer token.
    pub token: String,
    /// Optional team/org scope, sent as a query parameter.
    pub team_id: Option<String>,
}

impl PlatformConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var            | Default                          |
    /// |--------------------|----------------------------------|
    /// | `PLATFORM_API_URL` | `https://api.platform-edge.net`  |
    /// | `PLATFORM_TOKEN`   | (required)                       |
    /// | `PLATFORM_TEAM_ID` | (unset)                          |
    pub fn from_env() -> Self {
        let base_url = std::env::var("PLATFORM_API_URL")
            .unwrap_or_else(|_| "https://api.platform-edge.net".into());
        let token = std::env::var("PLATFORM_TOKEN").expect("PLATFORM_TOKEN must be set");
        let team_id = std::env::var("PLATFORM_TEAM_ID").ok();
        Self {
            base_url,
            token,
            team_id,
        }
    }
}

/// HTTP client for the build platform.
pub struct PlatformClient {
    client: reqwest::Client,
    config: PlatformConfig,
}

#[derive(Deserialize)]
struct DeploymentList {
    deployments: Vec<Deployment>,
}

#[derive(Deserialize)]
struct DomainList {
    domains: Vec<DomainStatus>,
}

impl PlatformClient {
    /// Create a new client.
    pub fn new(config: PlatformConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across accounts).
    pub fn with_client(client: reqwest::Client, config: PlatformConfig) -> Self {
        Self { client, config }
    }

    // ---- projects ----

    /// Create a project.  `POST /projects`.
    pub async fn create_project(
        &self,
        name: &str,
        framework: Option<&str>,
    ) -> Result<Project, PlatformError> {
        let body = serde_json::json!({
            "name": name,
            "framework": framework,
        });
        self.request_json(Method::POST, "/projects", Some(&body))
            .await
    }

    /// Fetch a project by name or id.  `GET /projects/{name}`.
    pub async fn project(&self, name: &str) -> Result<Project, PlatformError> {
        self.request_json(Method::GET, &format!("/projects/{name}"), None)
            .await
    }

    /// Update a project's framework setting.  `PATCH /projects/{id}`.
    pub async fn update_project(
        &self,
        project_id: &str,
        framework: Option<&str>,
    ) -> Result<Project, PlatformError> {
        let body = serde_json::json!({ "framework": framework });
        self.request_json(Method::PATCH, &format!("/projects/{project_id}"), Some(&body))
            .await
    }

    /// Delete a project.  `DELETE /projects/{id}`.
    pub async fn delete_project(&self, project_id: &str) -> Result<(), PlatformError> {
        self.request(Method::DELETE, &format!("/projects/{project_id}"), None)
            .await?;
        Ok(())
    }

    // ---- deployments ----

    /// Upload files and start a build.  `POST /deployments`.
    pub async fn start_deployment(
        &self,
        project_name: &str,
        files: Vec<DeploymentFile>,
        framework: Option<&str>,
    ) -> Result<Deployment, PlatformError> {
        let body = serde_json::json!({
            "name": project_name,
            "files": files,
            "projectSettings": { "framework": framework },
            "target": "production",
        });
        self.request_json(Method::POST, "/deployments", Some(&body))
            .await
    }

    /// Fetch deployment state.  `GET /deployments/{id}`.
    pub async fn deployment(&self, deployment_id: &str) -> Result<Deployment, PlatformError> {
        self.request_json(Method::GET, &format!("/deployments/{deployment_id}"), None)
            .await
    }

    /// List deployments for a project.  `GET /deployments?projectId=`.
    pub async fn list_deployments(
        &self,
        project_id: &str,
    ) -> Result<Vec<Deployment>, PlatformError> {
        let list: DeploymentList = self
            .request_json(
                Method::GET,
                &format!("/deployments?projectId={project_id}"),
                None,
            )
            .await?;
        Ok(list.deployments)
    }

    /// Request cancellation of a running deployment.
    /// `PATCH /deployments/{id}/cancel`.
    pub async fn cancel_deployment(
        &self,
        deployment_id: &str,
    ) -> Result<Deployment, PlatformError> {
        self.request_json(
            Method::PATCH,
            &format!("/deployments/{deployment_id}/cancel"),
            None,
        )
        .await
    }

    // ---- domains ----

    /// Attach a domain to a project.  `POST /projects/{id}/domains`.
    pub async fn attach_domain(
        &self,
        project_id: &str,
        domain: &str,
    ) -> Result<DomainStatus, PlatformError> {
        let body = serde_json::json!({ "name": domain });
        self.request_json(
            Method::POST,
            &format!("/projects/{project_id}/domains"),
            Some(&body),
        )
        .await
    }

    /// List domains attached to a project.  `GET /projects/{id}/domains`.
    pub async fn list_domains(&self, project_id: &str) -> Result<Vec<DomainStatus>, PlatformError> {
        let list: DomainList = self
            .request_json(Method::GET, &format!("/projects/{project_id}/domains"), None)
            .await?;
        Ok(list.domains)
    }

    /// Re-run domain verification.
    /// `POST /projects/{id}/domains/{domain}/verify`.
    pub async fn request_domain_verification(
        &self,
        project_id: &str,
        domain: &str,
    ) -> Result<DomainStatus, PlatformError> {
        self.request_json(
            Method::POST,
            &format!("/projects/{project_id}/domains/{domain}/verify"),
            None,
        )
        .await
    }

    /// Remove a domain from a project.
    /// `DELETE /projects/{id}/domains/{domain}`.
    pub async fn remove_domain(
        &self,
        project_id: &str,
        domain: &str,
    ) -> Result<(), PlatformError> {
        self.request(
            Method::DELETE,
            &format!("/projects/{project_id}/domains/{domain}"),
            None,
        )
        .await?;
        Ok(())
    }

    /// Check a domain's DNS configuration.  `GET /domains/{domain}/config`.
    pub async fn check_domain_config(
        &self,
        domain: &str,
    ) -> Result<DomainConfigStatus, PlatformError> {
        self.request_json(Method::GET, &format!("/domains/{domain}/config"), None)
            .await
    }

    // ---- environment variables ----

    /// Attach one environment variable.  `POST /projects/{id}/env`.
    pub async fn set_env_var(&self, project_id: &str, var: &EnvVar) -> Result<(), PlatformError> {
        let body = serde_json::json!({
            "key": var.key,
            "value": var.value,
            "target": ["production", "preview"],
            "type": "encrypted",
        });
        self.request(
            Method::POST,
            &format!("/projects/{project_id}/env"),
            Some(&body),
        )
        .await?;
        Ok(())
    }

    // ---- private helpers ----

    /// Issue a request with bearer auth and the optional team scope,
    /// returning the raw response after status classification.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, PlatformError> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let url = match &self.config.team_id {
            Some(team) => format!("{}{path}{separator}teamId={team}", self.config.base_url),
            None => format!("{}{path}", self.config.base_url),
        };

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(&self.config.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::ensure_success(response).await
    }

    /// Issue a request and parse the JSON response body.
    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, PlatformError> {
        let response = self.request(method, path, body).await?;
        Ok(response.json::<T>().await?)
    }

    /// Classify a non-2xx response into the fixed error taxonomy.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, PlatformError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        Err(classify_status(status.as_u16(), retry_after_secs, body))
    }
}

// ---------------------------------------------------------------------------
// BuildPlatform implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl BuildPlatform for PlatformClient {
    async fn get_project(&self, name: &str) -> Result<Option<Project>, PlatformError> {
        match self.project(name).await {
            Ok(project) => Ok(Some(project)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create_project(
        &self,
        name: &str,
        framework: Option<&str>,
    ) -> Result<Project, PlatformError> {
        PlatformClient::create_project(self, name, framework).await
    }

    async fn upsert_env_var(&self, project_id: &str, var: &EnvVar) -> Result<(), PlatformError> {
        self.set_env_var(project_id, var).await
    }

    async fn create_deployment(
        &self,
        project_name: &str,
        files: Vec<DeploymentFile>,
        framework: Option<&str>,
    ) -> Result<Deployment, PlatformError> {
        self.start_deployment(project_name, files, framework).await
    }

    async fn get_deployment(&self, deployment_id: &str) -> Result<Deployment, PlatformError> {
        self.deployment(deployment_id).await
    }

    async fn add_domain(
        &self,
        project_id: &str,
        domain: &str,
    ) -> Result<DomainStatus, PlatformError> {
        self.attach_domain(project_id, domain).await
    }

    async fn verify_domain(
        &self,
        project_id: &str,
        domain: &str,
    ) -> Result<DomainStatus, PlatformError> {
        self.request_domain_verification(project_id, domain).await
    }

    async fn domain_config(&self, domain: &str) -> Result<DomainConfigStatus, PlatformError> {
        self.check_domain_config(domain).await
    }
}
