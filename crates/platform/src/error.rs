//! Error taxonomy for the platform client.
//!
//! Every HTTP failure funnels through [`classify_status`] so the rest
//! of the pipeline sees a fixed set of variants instead of raw status
//! codes.

/// Errors from the build-platform REST layer.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The platform rejected the credentials or the team scope.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// HTTP 429 with an optional `Retry-After` hint in seconds.
    #[error("Rate limited by the platform (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-2xx response.
    #[error("Platform API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Polling exceeded the configured window.
    #[error("Timed out after {timeout_secs}s waiting for deployment {deployment_id}")]
    Timeout {
        deployment_id: String,
        timeout_secs: u64,
    },

    /// Polling was cancelled before a terminal state was observed.
    #[error("Wait for deployment {0} was cancelled")]
    Cancelled(String),
}

impl PlatformError {
    /// Whether this error means "the resource is absent" rather than
    /// "the call failed".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Classify a non-2xx HTTP response into the error taxonomy.
pub fn classify_status(status: u16, retry_after_secs: Option<u64>, body: String) -> PlatformError {
    match status {
        401 | 403 => PlatformError::Unauthorized(body),
        404 => PlatformError::NotFound(body),
        429 => PlatformError::RateLimited { retry_after_secs },
        _ => PlatformError::Api { status, body },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn unauthorized_statuses() {
        assert_matches!(
            classify_status(401, None, "no token".into()),
            PlatformError::Unauthorized(_)
        );
        assert_matches!(
            classify_status(403, None, "wrong team".into()),
            PlatformError::Unauthorized(_)
        );
    }

    #[test]
    fn rate_limit_carries_retry_hint() {
        assert_matches!(
            classify_status(429, Some(30), "slow down".into()),
            PlatformError::RateLimited {
                retry_after_secs: Some(30)
            }
        );
    }

    #[test]
    fn not_found_is_distinguished() {
        let err = classify_status(404, None, "no such project".into());
        assert!(err.is_not_found());
    }

    #[test]
    fn other_errors_carry_status_and_body() {
        assert_matches!(
            classify_status(500, None, "boom".into()),
            PlatformError::Api { status: 500, .. }
        );
        assert_matches!(
            classify_status(422, None, "bad name".into()),
            PlatformError::Api { status: 422, .. }
        );
    }
}
