//! The deployment state machine.
//!
//! One [`Orchestrator::deploy`] call drives a single artifact through
//! validation, synthesis, remote resource creation, upload, build
//! polling, and domain attachment.  Stage transitions and progress
//! updates are centralized on [`DeploymentState`]; every change is
//! published to the event bus as an immutable snapshot.  Runs for
//! different artifacts share no mutable state.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use validator::Validate;

use shipwright_core::analyzer::{parse_artifact, validate_artifact};
use shipwright_core::naming::project_slug;
use shipwright_core::seo::score_content;
use shipwright_core::types::Artifact;
use shipwright_events::EventBus;
use shipwright_platform::types::{DeploymentFile, Project, ReadyState};
use shipwright_platform::{wait_for_deployment, BuildPlatform};
use shipwright_synth::{transform, GeneratedProject};

use crate::config::DeployConfig;
use crate::domains::add_and_verify_domain;
use crate::error::{DeployError, DeployErrorCode};
use crate::request::{DeploymentRequest, DomainConfig};
use crate::state::{DeploymentState, DeploymentStatus};

/// Final result of a deployment run.
///
/// Always carries the full state (including the accumulated log), so a
/// caller can render success or failure without inspecting internals.
#[derive(Debug)]
pub struct DeploymentOutcome {
    pub state: DeploymentState,
    /// Domain configuration, when a custom domain was attached.
    pub domain: Option<DomainConfig>,
}

impl DeploymentOutcome {
    pub fn succeeded(&self) -> bool {
        self.state.status == DeploymentStatus::Ready
    }
}

/// How a run left the pipeline short of the terminal bookkeeping.
enum RunEnd {
    Ready(Option<DomainConfig>),
    Canceled,
}

/// Drives artifact deployments against a build platform.
pub struct Orchestrator {
    platform: Arc<dyn BuildPlatform>,
    bus: Arc<EventBus>,
    config: DeployConfig,
}

impl Orchestrator {
    pub fn new(platform: Arc<dyn BuildPlatform>, bus: Arc<EventBus>, config: DeployConfig) -> Self {
        Self {
            platform,
            bus,
            config,
        }
    }

    /// Deploy one artifact.  Never panics and never returns early: the
    /// outcome always holds a terminal state.
    pub async fn deploy(
        &self,
        artifact: &Artifact,
        request: &DeploymentRequest,
    ) -> DeploymentOutcome {
        let mut state = DeploymentState::new(uuid::Uuid::new_v4().to_string());
        tracing::info!(
            deployment_id = %state.id,
            artifact_id = %artifact.id,
            project_name = %request.project_name,
            "Starting deployment",
        );

        match self.run(artifact, request, &mut state).await {
            Ok(RunEnd::Ready(domain)) => {
                state.transition(DeploymentStatus::Ready);
                self.emit(&mut state, "Deployment ready");
                tracing::info!(
                    deployment_id = %state.id,
                    url = state.url.as_deref().unwrap_or(""),
                    "Deployment ready",
                );
                DeploymentOutcome { state, domain }
            }
            Ok(RunEnd::Canceled) => {
                state.transition(DeploymentStatus::Canceled);
                self.emit(&mut state, "Deployment canceled by the platform");
                DeploymentOutcome {
                    state,
                    domain: None,
                }
            }
            Err(err) => {
                tracing::error!(deployment_id = %state.id, error = %err, "Deployment failed");
                state.fail(&err);
                self.bus.publish(state.snapshot(&err.to_string()));
                DeploymentOutcome {
                    state,
                    domain: None,
                }
            }
        }
    }

    async fn run(
        &self,
        artifact: &Artifact,
        request: &DeploymentRequest,
        state: &mut DeploymentState,
    ) -> Result<RunEnd, DeployError> {
        // ---- pending: validation, before any remote call ----
        self.emit(state, "Validating artifact");
        request.validate().map_err(|e| {
            DeployError::new(
                DeployErrorCode::ParseError,
                format!("Invalid deployment request: {e}"),
            )
        })?;
        if request.artifact_id != artifact.id {
            return Err(DeployError::new(
                DeployErrorCode::ArtifactNotFound,
                format!("Artifact {} not found", request.artifact_id),
            ));
        }
        validate_artifact(artifact)?;

        // ---- transforming ----
        state.transition(DeploymentStatus::Transforming);
        self.emit(state, "Analyzing artifact source");
        let parsed = parse_artifact(artifact);
        if parsed.component_name_is_fallback {
            state.log(format!(
                "Component name fell back to '{}' (derived from the artifact title)",
                parsed.component_name
            ));
        }

        if self.config.scoring_enabled {
            // Scoring is advisory; its result is attached but a low
            // score never blocks the run.
            let report = score_content(&parsed.code, parsed.kind);
            state.log(format!("Content score {} ({})", report.score, report.grade));
            state.seo = Some(report);
        }

        let project = transform(&parsed)?;
        self.emit(
            state,
            &format!("Synthesized {} project files", project.files.len()),
        );

        // ---- uploading: remote project + environment ----
        state.transition(DeploymentStatus::Uploading);
        let slug = project_slug(&request.project_name);
        self.emit(state, &format!("Resolving project '{slug}'"));
        let remote_project = self.ensure_project(&slug, &project, state).await?;
        state.remote_project_id = Some(remote_project.id.clone());

        for var in &request.env {
            self.platform
                .upsert_env_var(&remote_project.id, var)
                .await?;
            state.log(format!("Attached environment variable {}", var.key));
        }

        // ---- building: upload + poll ----
        state.transition(DeploymentStatus::Building);
        let files = deployment_files(&project);
        self.emit(state, &format!("Uploading {} files", files.len()));
        let deployment = self
            .platform
            .create_deployment(&slug, files, Some(&project.framework))
            .await?;
        state.remote_deployment_id = Some(deployment.id.clone());

        // Cancellation is passive: the pipeline never cancels on its
        // own, it only observes a remote CANCELED state.
        let cancel = CancellationToken::new();
        let bus = &self.bus;
        let final_deployment = {
            let state = &mut *state;
            wait_for_deployment(
                self.platform.as_ref(),
                &deployment.id,
                &self.config.wait_config(),
                &cancel,
                |remote| {
                    state.set_progress(remote.ready_state.progress());
                    bus.publish(
                        state.snapshot(&format!("Remote build {}", remote.ready_state.as_str())),
                    );
                },
            )
            .await?
        };

        match final_deployment.ready_state {
            ReadyState::Ready => {}
            ReadyState::Canceled => return Ok(RunEnd::Canceled),
            other => {
                let message = final_deployment
                    .error_message
                    .unwrap_or_else(|| format!("Remote build ended in state {}", other.as_str()));
                return Err(DeployError::new(DeployErrorCode::BuildError, message));
            }
        }

        // ---- deploying: URL + optional custom domain ----
        state.transition(DeploymentStatus::Deploying);
        state.url = final_deployment.live_url();
        self.emit(state, "Build complete, finalizing deployment");

        let mut domain_config = None;
        if let Some(domain) = &request.domain {
            match add_and_verify_domain(self.platform.as_ref(), &remote_project.id, domain).await {
                Ok(config) => {
                    if config.verified {
                        state.log(format!("Custom domain {domain} attached and verified"));
                    } else {
                        state.log(format!(
                            "Custom domain {domain} attached; {} DNS record(s) outstanding",
                            config.dns_records.len()
                        ));
                    }
                    domain_config = Some(config);
                }
                Err(err) => {
                    // A domain problem never sinks a deployment that
                    // already built; the platform URL keeps working.
                    tracing::warn!(
                        deployment_id = %state.id,
                        domain,
                        error = %err,
                        "Domain configuration failed",
                    );
                    state.log(format!(
                        "Warning: domain configuration failed ({err}); deployment continues on the platform URL"
                    ));
                }
            }
        }

        Ok(RunEnd::Ready(domain_config))
    }

    /// Resolve the remote project for a stable slug: reuse when it
    /// exists, create exactly once when it does not.  Any non-"not
    /// found" lookup failure aborts the run.
    async fn ensure_project(
        &self,
        slug: &str,
        project: &GeneratedProject,
        state: &mut DeploymentState,
    ) -> Result<Project, DeployError> {
        match self.platform.get_project(slug).await? {
            Some(existing) => {
                state.log(format!("Reusing existing project {}", existing.id));
                Ok(existing)
            }
            None => {
                let created = self
                    .platform
                    .create_project(slug, Some(&project.framework))
                    .await?;
                state.log(format!("Created project {}", created.id));
                Ok(created)
            }
        }
    }

    /// Log a milestone on the state and publish it as a snapshot.
    fn emit(&self, state: &mut DeploymentState, message: &str) {
        state.log(message);
        self.bus.publish(state.snapshot(message));
    }
}

fn deployment_files(project: &GeneratedProject) -> Vec<DeploymentFile> {
    project
        .files
        .iter()
        .map(|f| DeploymentFile {
            file: f.path.clone(),
            data: f.content.clone(),
            encoding: f.encoding.clone(),
        })
        .collect()
}
