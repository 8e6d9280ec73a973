//! Wire types for the build platform REST API.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Remote build states
// ---------------------------------------------------------------------------

/// Remote deployment state as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadyState {
    Queued,
    Initializing,
    Building,
    Ready,
    Error,
    Canceled,
}

impl ReadyState {
    /// Whether no further automatic transition will occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Error | Self::Canceled)
    }

    /// Fixed state-to-progress lookup used while polling a build.
    /// Values sit inside the orchestrator's `building` window.
    pub fn progress(&self) -> u8 {
        match self {
            Self::Queued => 40,
            Self::Initializing => 50,
            Self::Building => 65,
            Self::Ready | Self::Error | Self::Canceled => 85,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::Initializing => "INITIALIZING",
            Self::Building => "BUILDING",
            Self::Ready => "READY",
            Self::Error => "ERROR",
            Self::Canceled => "CANCELED",
        }
    }
}

// ---------------------------------------------------------------------------
// Projects and deployments
// ---------------------------------------------------------------------------

/// A remote project record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
}

/// A remote deployment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: String,
    /// Raw build URL (host only, no scheme).
    #[serde(default)]
    pub url: Option<String>,
    pub ready_state: ReadyState,
    /// Production aliases, most specific first.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Error message for failed builds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Deployment {
    /// The public URL for this deployment: the first production alias,
    /// falling back to the raw build URL.
    pub fn live_url(&self) -> Option<String> {
        self.aliases
            .first()
            .or(self.url.as_ref())
            .map(|host| with_scheme(host))
    }
}

fn with_scheme(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

/// One file in a deployment upload request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentFile {
    /// Project-relative path.
    pub file: String,
    /// File content.
    pub data: String,
    pub encoding: String,
}

/// An environment variable to attach to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Domains
// ---------------------------------------------------------------------------

/// Domain attachment status as reported by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainStatus {
    pub name: String,
    pub verified: bool,
    /// Outstanding verification challenges the owner must satisfy.
    /// Takes precedence over locally computed default records.
    #[serde(default)]
    pub verification: Vec<DnsChallenge>,
}

/// One DNS challenge record required by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsChallenge {
    #[serde(rename = "type")]
    pub record_type: String,
    pub domain: String,
    pub value: String,
}

/// DNS configuration check result for a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainConfigStatus {
    pub misconfigured: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_state_parses_from_wire_format() {
        let state: ReadyState = serde_json::from_str("\"BUILDING\"").unwrap();
        assert_eq!(state, ReadyState::Building);
    }

    #[test]
    fn terminal_states() {
        assert!(ReadyState::Ready.is_terminal());
        assert!(ReadyState::Error.is_terminal());
        assert!(ReadyState::Canceled.is_terminal());
        assert!(!ReadyState::Queued.is_terminal());
        assert!(!ReadyState::Building.is_terminal());
    }

    #[test]
    fn progress_is_non_decreasing_across_states() {
        let sequence = [
            ReadyState::Queued,
            ReadyState::Initializing,
            ReadyState::Building,
            ReadyState::Ready,
        ];
        for pair in sequence.windows(2) {
            assert!(pair[0].progress() <= pair[1].progress());
        }
    }

    #[test]
    fn live_url_prefers_first_alias() {
        let deployment = Deployment {
            id: "dep-1".to_string(),
            url: Some("dep-1.platform-edge.net".to_string()),
            ready_state: ReadyState::Ready,
            aliases: vec!["my-app.platform-edge.net".to_string()],
            error_message: None,
        };
        assert_eq!(
            deployment.live_url().as_deref(),
            Some("https://my-app.platform-edge.net")
        );
    }

    #[test]
    fn live_url_falls_back_to_raw_url() {
        let deployment = Deployment {
            id: "dep-1".to_string(),
            url: Some("dep-1.platform-edge.net".to_string()),
            ready_state: ReadyState::Ready,
            aliases: Vec::new(),
            error_message: None,
        };
        assert_eq!(
            deployment.live_url().as_deref(),
            Some("https://dep-1.platform-edge.net")
        );
    }

    #[test]
    fn deployment_deserializes_with_missing_optionals() {
        let deployment: Deployment =
            serde_json::from_str(r#"{"id": "d1", "readyState": "QUEUED"}"#).unwrap();
        assert_eq!(deployment.ready_state, ReadyState::Queued);
        assert!(deployment.aliases.is_empty());
        assert!(deployment.live_url().is_none());
    }

    #[test]
    fn dns_challenge_uses_type_key() {
        let challenge: DnsChallenge = serde_json::from_str(
            r#"{"type": "TXT", "domain": "_verify.example.com", "value": "token"}"#,
        )
        .unwrap();
        assert_eq!(challenge.record_type, "TXT");
    }
}
