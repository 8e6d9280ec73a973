//! Deployment error taxonomy.
//!
//! Every failure that terminates a run carries a machine-readable code
//! plus an optional structured-details bag, so callers can render a
//! failure state without inspecting internals.

use shipwright_core::error::CoreError;
use shipwright_platform::PlatformError;
use shipwright_synth::SynthError;

/// Fixed machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeployErrorCode {
    ArtifactNotFound,
    ParseError,
    TransformError,
    PlatformApiError,
    BuildError,
    DomainError,
    Unauthorized,
    RateLimited,
    Unknown,
}

impl DeployErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArtifactNotFound => "ARTIFACT_NOT_FOUND",
            Self::ParseError => "PARSE_ERROR",
            Self::TransformError => "TRANSFORM_ERROR",
            Self::PlatformApiError => "PLATFORM_API_ERROR",
            Self::BuildError => "BUILD_ERROR",
            Self::DomainError => "DOMAIN_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::RateLimited => "RATE_LIMITED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for DeployErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terminal deployment failure.
#[derive(Debug, thiserror::Error)]
#[error("{code}: {message}")]
pub struct DeployError {
    pub code: DeployErrorCode,
    pub message: String,
    /// Structured details (HTTP status, remote error body, DNS state).
    pub details: Option<serde_json::Value>,
}

impl DeployError {
    pub fn new(code: DeployErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<CoreError> for DeployError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { .. } => {
                Self::new(DeployErrorCode::ArtifactNotFound, err.to_string())
            }
            CoreError::Validation(msg) => Self::new(DeployErrorCode::ParseError, msg),
            CoreError::Internal(msg) => Self::new(DeployErrorCode::Unknown, msg),
        }
    }
}

impl From<SynthError> for DeployError {
    fn from(err: SynthError) -> Self {
        Self::new(DeployErrorCode::TransformError, err.to_string())
    }
}

impl From<PlatformError> for DeployError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::Unauthorized(msg) => Self::new(DeployErrorCode::Unauthorized, msg),
            PlatformError::RateLimited { retry_after_secs } => {
                Self::new(DeployErrorCode::RateLimited, "Rate limited by the platform")
                    .with_details(serde_json::json!({ "retryAfterSecs": retry_after_secs }))
            }
            PlatformError::Api { status, body } => {
                Self::new(DeployErrorCode::PlatformApiError, format!("HTTP {status}"))
                    .with_details(serde_json::json!({ "status": status, "body": body }))
            }
            PlatformError::Timeout {
                ref deployment_id,
                timeout_secs,
            } => Self::new(
                DeployErrorCode::BuildError,
                format!("Build did not finish within {timeout_secs}s"),
            )
            .with_details(serde_json::json!({ "deploymentId": deployment_id })),
            other => Self::new(DeployErrorCode::PlatformApiError, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_serialize_to_fixed_strings() {
        assert_eq!(DeployErrorCode::ArtifactNotFound.as_str(), "ARTIFACT_NOT_FOUND");
        assert_eq!(DeployErrorCode::PlatformApiError.as_str(), "PLATFORM_API_ERROR");
        assert_eq!(DeployErrorCode::RateLimited.as_str(), "RATE_LIMITED");
    }

    #[test]
    fn platform_timeout_becomes_build_error() {
        let err: DeployError = PlatformError::Timeout {
            deployment_id: "dep-1".into(),
            timeout_secs: 300,
        }
        .into();
        assert_eq!(err.code, DeployErrorCode::BuildError);
    }

    #[test]
    fn platform_api_error_keeps_status_in_details() {
        let err: DeployError = PlatformError::Api {
            status: 500,
            body: "boom".into(),
        }
        .into();
        assert_eq!(err.code, DeployErrorCode::PlatformApiError);
        assert_eq!(err.details.unwrap()["status"], 500);
    }

    #[test]
    fn core_validation_is_a_parse_error() {
        let err: DeployError = CoreError::Validation("empty code".into()).into();
        assert_eq!(err.code, DeployErrorCode::ParseError);
    }
}
