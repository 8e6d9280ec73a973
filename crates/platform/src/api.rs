//! The build-platform seam consumed by the deployment orchestrator.
//!
//! [`BuildPlatform`] covers exactly the calls a deployment run makes;
//! the full REST surface lives on
//! [`PlatformClient`](crate::client::PlatformClient), which implements
//! this trait.  Tests substitute an in-memory fake.

use async_trait::async_trait;

use crate::error::PlatformError;
use crate::types::{
    Deployment, DeploymentFile, DomainConfigStatus, DomainStatus, EnvVar, Project,
};

#[async_trait]
pub trait BuildPlatform: Send + Sync {
    /// Look up a project by its stable name.  Returns `Ok(None)` when
    /// the platform reports it absent; any other failure propagates.
    async fn get_project(&self, name: &str) -> Result<Option<Project>, PlatformError>;

    /// Create a project with the given stable name.
    async fn create_project(
        &self,
        name: &str,
        framework: Option<&str>,
    ) -> Result<Project, PlatformError>;

    /// Attach one environment variable to a project.
    async fn upsert_env_var(&self, project_id: &str, var: &EnvVar) -> Result<(), PlatformError>;

    /// Upload all project files in one request, starting a build.
    async fn create_deployment(
        &self,
        project_name: &str,
        files: Vec<DeploymentFile>,
        framework: Option<&str>,
    ) -> Result<Deployment, PlatformError>;

    /// Fetch the current state of a deployment.
    async fn get_deployment(&self, deployment_id: &str) -> Result<Deployment, PlatformError>;

    /// Attach a domain to a project.
    async fn add_domain(
        &self,
        project_id: &str,
        domain: &str,
    ) -> Result<DomainStatus, PlatformError>;

    /// Ask the platform to re-check a domain's DNS configuration.
    async fn verify_domain(
        &self,
        project_id: &str,
        domain: &str,
    ) -> Result<DomainStatus, PlatformError>;

    /// Check whether a domain's DNS currently points at the platform.
    async fn domain_config(&self, domain: &str) -> Result<DomainConfigStatus, PlatformError>;
}
