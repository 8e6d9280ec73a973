//! Bounded polling for deployment completion.
//!
//! [`wait_for_deployment`] polls the platform on a fixed interval until
//! the deployment reaches a terminal state, the configured timeout
//! elapses, or the [`CancellationToken`] is triggered.  The progress
//! callback fires on every poll regardless of whether the state
//! changed.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::BuildPlatform;
use crate::error::PlatformError;
use crate::types::Deployment;

/// Tunable parameters for the polling loop.
#[derive(Debug, Clone)]
pub struct WaitConfig {
    /// Delay between polls.
    pub poll_interval: Duration,
    /// Upper bound on the whole wait.
    pub timeout: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            timeout: Duration::from_secs(300),
        }
    }
}

/// Poll a deployment until it reaches a terminal state.
///
/// Returns the terminal [`Deployment`], or
/// [`PlatformError::Timeout`] / [`PlatformError::Cancelled`] when the
/// bound is hit first.  Remote fetch errors propagate immediately; the
/// only retry in this design is the polling itself.
pub async fn wait_for_deployment(
    platform: &dyn BuildPlatform,
    deployment_id: &str,
    config: &WaitConfig,
    cancel: &CancellationToken,
    mut on_poll: impl FnMut(&Deployment) + Send,
) -> Result<Deployment, PlatformError> {
    let deadline = tokio::time::Instant::now() + config.timeout;
    let mut poll = 0u32;

    loop {
        if cancel.is_cancelled() {
            return Err(PlatformError::Cancelled(deployment_id.to_string()));
        }

        poll += 1;
        let deployment = platform.get_deployment(deployment_id).await?;
        on_poll(&deployment);

        if deployment.ready_state.is_terminal() {
            tracing::debug!(
                deployment_id,
                poll,
                state = deployment.ready_state.as_str(),
                "Deployment reached terminal state",
            );
            return Ok(deployment);
        }

        if tokio::time::Instant::now() >= deadline {
            tracing::warn!(
                deployment_id,
                poll,
                timeout_secs = config.timeout.as_secs(),
                "Gave up waiting for deployment",
            );
            return Err(PlatformError::Timeout {
                deployment_id: deployment_id.to_string(),
                timeout_secs: config.timeout.as_secs(),
            });
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                return Err(PlatformError::Cancelled(deployment_id.to_string()));
            }
            _ = tokio::time::sleep(config.poll_interval) => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::types::{
        DeploymentFile, DomainConfigStatus, DomainStatus, EnvVar, Project, ReadyState,
    };

    /// Fake platform that serves a scripted sequence of build states,
    /// repeating the last one forever.
    struct ScriptedPlatform {
        states: Mutex<Vec<ReadyState>>,
    }

    impl ScriptedPlatform {
        fn new(states: &[ReadyState]) -> Self {
            let mut reversed: Vec<ReadyState> = states.to_vec();
            reversed.reverse();
            Self {
                states: Mutex::new(reversed),
            }
        }

        fn next_state(&self) -> ReadyState {
            let mut states = self.states.lock().unwrap();
            if states.len() > 1 {
                states.pop().unwrap()
            } else {
                *states.last().expect("script must not be empty")
            }
        }
    }

    #[async_trait]
    impl BuildPlatform for ScriptedPlatform {
        async fn get_project(&self, _name: &str) -> Result<Option<Project>, PlatformError> {
            unimplemented!("not used by the wait loop")
        }

        async fn create_project(
            &self,
            _name: &str,
            _framework: Option<&str>,
        ) -> Result<Project, PlatformError> {
            unimplemented!("not used by the wait loop")
        }

        async fn upsert_env_var(
            &self,
            _project_id: &str,
            _var: &EnvVar,
        ) -> Result<(), PlatformError> {
            unimplemented!("not used by the wait loop")
        }

        async fn create_deployment(
            &self,
            _project_name: &str,
            _files: Vec<DeploymentFile>,
            _framework: Option<&str>,
        ) -> Result<Deployment, PlatformError> {
            unimplemented!("not used by the wait loop")
        }

        async fn get_deployment(&self, deployment_id: &str) -> Result<Deployment, PlatformError> {
            Ok(Deployment {
                id: deployment_id.to_string(),
                url: Some("dep.platform-edge.net".to_string()),
                ready_state: self.next_state(),
                aliases: Vec::new(),
                error_message: None,
            })
        }

        async fn add_domain(
            &self,
            _project_id: &str,
            _domain: &str,
        ) -> Result<DomainStatus, PlatformError> {
            unimplemented!("not used by the wait loop")
        }

        async fn verify_domain(
            &self,
            _project_id: &str,
            _domain: &str,
        ) -> Result<DomainStatus, PlatformError> {
            unimplemented!("not used by the wait loop")
        }

        async fn domain_config(
            &self,
            _domain: &str,
        ) -> Result<DomainConfigStatus, PlatformError> {
            unimplemented!("not used by the wait loop")
        }
    }

    fn fast_config() -> WaitConfig {
        WaitConfig {
            poll_interval: Duration::from_millis(5),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn resolves_when_build_becomes_ready() {
        let platform = ScriptedPlatform::new(&[
            ReadyState::Queued,
            ReadyState::Building,
            ReadyState::Ready,
        ]);
        let cancel = CancellationToken::new();
        let mut polls = Vec::new();

        let deployment = wait_for_deployment(&platform, "dep-1", &fast_config(), &cancel, |d| {
            polls.push(d.ready_state)
        })
        .await
        .expect("wait succeeds");

        assert_eq!(deployment.ready_state, ReadyState::Ready);
        assert_eq!(
            polls,
            vec![ReadyState::Queued, ReadyState::Building, ReadyState::Ready]
        );
    }

    #[tokio::test]
    async fn callback_fires_even_without_state_change() {
        let platform = ScriptedPlatform::new(&[
            ReadyState::Building,
            ReadyState::Building,
            ReadyState::Building,
            ReadyState::Ready,
        ]);
        let cancel = CancellationToken::new();
        let mut count = 0u32;

        wait_for_deployment(&platform, "dep-1", &fast_config(), &cancel, |_| count += 1)
            .await
            .unwrap();

        assert_eq!(count, 4);
    }

    #[tokio::test]
    async fn error_state_is_returned_not_raised() {
        let platform = ScriptedPlatform::new(&[ReadyState::Building, ReadyState::Error]);
        let cancel = CancellationToken::new();

        let deployment = wait_for_deployment(&platform, "dep-1", &fast_config(), &cancel, |_| {})
            .await
            .expect("terminal error state still resolves the wait");

        assert_eq!(deployment.ready_state, ReadyState::Error);
    }

    #[tokio::test]
    async fn times_out_on_stuck_build() {
        let platform = ScriptedPlatform::new(&[ReadyState::Building]);
        let cancel = CancellationToken::new();
        let config = WaitConfig {
            poll_interval: Duration::from_millis(5),
            timeout: Duration::from_millis(20),
        };

        let result = wait_for_deployment(&platform, "dep-1", &config, &cancel, |_| {}).await;
        assert_matches!(result, Err(PlatformError::Timeout { .. }));
    }

    #[tokio::test]
    async fn cancellation_stops_the_wait() {
        let platform = ScriptedPlatform::new(&[ReadyState::Building]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = wait_for_deployment(&platform, "dep-1", &fast_config(), &cancel, |_| {}).await;
        assert_matches!(result, Err(PlatformError::Cancelled(_)));
    }
}
