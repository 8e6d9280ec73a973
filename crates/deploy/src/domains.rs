//! Custom-domain attachment and verification.

use shipwright_core::domain::{required_dns_records, validate_domain, DnsRecord};
use shipwright_platform::types::DomainStatus;
use shipwright_platform::BuildPlatform;

use crate::error::{DeployError, DeployErrorCode};
use crate::request::{DomainConfig, DomainKind};

/// Attach a custom domain to a project and report what is still
/// outstanding.
///
/// The platform's own verification challenge list takes precedence
/// over the locally computed default records: the platform may require
/// an ownership proof (e.g. a TXT challenge) before it will accept
/// standard A/CNAME records at all.  A failed verification call is not
/// an error — the domain is simply reported unverified.
pub async fn add_and_verify_domain(
    platform: &dyn BuildPlatform,
    project_id: &str,
    domain: &str,
) -> Result<DomainConfig, DeployError> {
    validate_domain(domain)
        .map_err(|e| DeployError::new(DeployErrorCode::DomainError, e.to_string()))?;

    let attached = platform
        .add_domain(project_id, domain)
        .await
        .map_err(|e| DeployError::new(DeployErrorCode::DomainError, e.to_string()))?;

    let status = if attached.verified {
        attached
    } else {
        match platform.verify_domain(project_id, domain).await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(domain, error = %e, "Domain verification call failed");
                attached
            }
        }
    };

    let mut verified = status.verified;
    if verified {
        // The attachment may be accepted while DNS still points
        // elsewhere; double-check the actual configuration.
        match platform.domain_config(domain).await {
            Ok(config) if config.misconfigured => {
                tracing::info!(domain, "Domain attached but DNS is misconfigured");
                verified = false;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(domain, error = %e, "Domain config check failed");
            }
        }
    }

    let dns_records = if verified {
        Vec::new()
    } else {
        outstanding_records(&status, domain)
    };

    Ok(DomainConfig {
        kind: DomainKind::Custom,
        domain: domain.to_string(),
        verified,
        dns_records,
    })
}

/// The records the domain owner still has to create: the platform's
/// challenge list when it provides one, the locally computed defaults
/// otherwise.
fn outstanding_records(status: &DomainStatus, domain: &str) -> Vec<DnsRecord> {
    if status.verification.is_empty() {
        required_dns_records(domain)
    } else {
        status
            .verification
            .iter()
            .map(|challenge| DnsRecord {
                record_type: challenge.record_type.clone(),
                name: challenge.domain.clone(),
                value: challenge.value.clone(),
            })
            .collect()
    }
}
