//! Caller-facing request and domain types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use shipwright_core::domain::DnsRecord;
use shipwright_platform::types::EnvVar;

/// A deployment request.  Constructed by the caller, consumed once.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRequest {
    /// Id of the artifact to deploy.
    #[validate(length(min = 1))]
    pub artifact_id: String,
    /// Owning user.
    #[validate(length(min = 1))]
    pub user_id: String,
    /// Desired project name; slugged before any remote call.
    #[validate(length(min = 1, max = 100))]
    pub project_name: String,
    /// Optional custom domain to attach after a successful build.
    #[serde(default)]
    pub domain: Option<String>,
    /// Environment variables to attach to the remote project.
    #[serde(default)]
    pub env: Vec<EnvVar>,
}

/// Where a deployment's public hostname comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomainKind {
    PlatformSubdomain,
    Custom,
}

/// Resolved domain configuration for a deployment.
///
/// A custom domain counts as verified only once the platform confirms
/// DNS resolution; until then the deployment's public URL falls back
/// to the platform subdomain and `dns_records` lists what the owner
/// still needs to create.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainConfig {
    pub kind: DomainKind,
    pub domain: String,
    pub verified: bool,
    pub dns_records: Vec<DnsRecord>,
}
