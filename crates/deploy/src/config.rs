//! Orchestrator configuration.

use std::time::Duration;

use shipwright_platform::WaitConfig;

/// Per-run deployment settings loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Build poll interval in seconds (default: `3`).
    pub poll_interval_secs: u64,
    /// Upload-to-ready window in seconds (default: `300`).
    pub build_timeout_secs: u64,
    /// Whether content scoring runs during the transform stage
    /// (default: `true`).
    pub scoring_enabled: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 3,
            build_timeout_secs: 300,
            scoring_enabled: true,
        }
    }
}

impl DeployConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default |
    /// |----------------------------|---------|
    /// | `DEPLOY_POLL_INTERVAL_SECS`| `3`     |
    /// | `DEPLOY_BUILD_TIMEOUT_SECS`| `300`   |
    /// | `DEPLOY_SCORING_ENABLED`   | `true`  |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let poll_interval_secs: u64 = std::env::var("DEPLOY_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.poll_interval_secs);

        let build_timeout_secs: u64 = std::env::var("DEPLOY_BUILD_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.build_timeout_secs);

        let scoring_enabled = std::env::var("DEPLOY_SCORING_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(defaults.scoring_enabled);

        Self {
            poll_interval_secs,
            build_timeout_secs,
            scoring_enabled,
        }
    }

    /// The polling window for the remote build wait.
    pub fn wait_config(&self) -> WaitConfig {
        WaitConfig {
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            timeout: Duration::from_secs(self.build_timeout_secs),
        }
    }
}
