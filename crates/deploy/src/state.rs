//! Deployment run state.
//!
//! One [`DeploymentState`] per run, owned by the orchestrator.  Every
//! mutation goes through [`transition`](DeploymentState::transition) /
//! [`set_progress`](DeploymentState::set_progress) so the invariants
//! hold: progress is monotonically non-decreasing, and `error` is set
//! exactly when the status is `Error`.  Observers only ever see
//! immutable snapshots.

use serde::Serialize;

use shipwright_core::seo::SeoReport;
use shipwright_core::types::Timestamp;
use shipwright_events::DeployProgressEvent;

use crate::error::DeployError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Pipeline status.  Linear progression with two failure exits:
/// `pending -> transforming -> uploading -> building -> deploying ->
/// ready`, or `error` from any stage, or `canceled` when the remote
/// platform reports cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    Pending,
    Transforming,
    Uploading,
    Building,
    Deploying,
    Ready,
    Error,
    Canceled,
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Transforming => "transforming",
            Self::Uploading => "uploading",
            Self::Building => "building",
            Self::Deploying => "deploying",
            Self::Ready => "ready",
            Self::Error => "error",
            Self::Canceled => "canceled",
        }
    }

    /// Whether no further transition occurs.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Error | Self::Canceled)
    }

    /// Progress floor reached when the stage is entered.
    pub fn base_progress(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Transforming => 10,
            Self::Uploading => 30,
            Self::Building => 40,
            Self::Deploying => 90,
            Self::Ready => 100,
            // Failure states freeze progress where it was.
            Self::Error | Self::Canceled => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// One accumulated log line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogLine {
    pub timestamp: Timestamp,
    pub message: String,
}

/// Mutable per-run deployment state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentState {
    pub id: String,
    pub status: DeploymentStatus,
    /// 0–100, monotonically non-decreasing within a run.
    pub progress: u8,
    pub logs: Vec<LogLine>,
    pub remote_project_id: Option<String>,
    pub remote_deployment_id: Option<String>,
    pub url: Option<String>,
    /// Human-readable error; present iff `status == Error`.
    pub error: Option<String>,
    /// Machine-readable error code; present iff `status == Error`.
    pub error_code: Option<&'static str>,
    pub seo: Option<SeoReport>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub ready_at: Option<Timestamp>,
}

impl DeploymentState {
    pub fn new(id: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: id.into(),
            status: DeploymentStatus::Pending,
            progress: 0,
            logs: Vec::new(),
            remote_project_id: None,
            remote_deployment_id: None,
            url: None,
            error: None,
            error_code: None,
            seo: None,
            created_at: now,
            updated_at: now,
            ready_at: None,
        }
    }

    /// Move to the next stage, raising progress to the stage floor.
    pub fn transition(&mut self, status: DeploymentStatus) {
        self.status = status;
        self.set_progress(status.base_progress());
        if status == DeploymentStatus::Ready {
            self.ready_at = Some(chrono::Utc::now());
        }
        self.touch();
    }

    /// Raise progress.  Values below the current progress are ignored,
    /// values above 100 are clamped.
    pub fn set_progress(&mut self, progress: u8) {
        let progress = progress.min(100);
        if progress > self.progress {
            self.progress = progress;
            self.touch();
        }
    }

    /// Append a timestamped log line.
    pub fn log(&mut self, message: impl Into<String>) {
        self.logs.push(LogLine {
            timestamp: chrono::Utc::now(),
            message: message.into(),
        });
        self.touch();
    }

    /// Enter the terminal error state.
    pub fn fail(&mut self, err: &DeployError) {
        self.status = DeploymentStatus::Error;
        self.error = Some(err.message.clone());
        self.error_code = Some(err.code.as_str());
        self.log(format!("Deployment failed: {err}"));
        self.touch();
    }

    /// Build an immutable progress snapshot for the event bus.
    pub fn snapshot(&self, message: &str) -> DeployProgressEvent {
        DeployProgressEvent::new(
            self.id.clone(),
            self.status.as_str(),
            message,
            self.progress,
        )
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeployErrorCode;

    #[test]
    fn progress_is_monotonic() {
        let mut state = DeploymentState::new("dep-1");
        state.set_progress(40);
        state.set_progress(20);
        assert_eq!(state.progress, 40);
        state.set_progress(41);
        assert_eq!(state.progress, 41);
    }

    #[test]
    fn progress_clamps_at_100() {
        let mut state = DeploymentState::new("dep-1");
        state.set_progress(250);
        assert_eq!(state.progress, 100);
    }

    #[test]
    fn transitions_raise_progress_to_stage_floor() {
        let mut state = DeploymentState::new("dep-1");
        state.transition(DeploymentStatus::Transforming);
        assert_eq!(state.progress, 10);
        state.transition(DeploymentStatus::Building);
        assert_eq!(state.progress, 40);
        state.transition(DeploymentStatus::Ready);
        assert_eq!(state.progress, 100);
        assert!(state.ready_at.is_some());
    }

    #[test]
    fn failure_does_not_reset_progress() {
        let mut state = DeploymentState::new("dep-1");
        state.transition(DeploymentStatus::Building);
        state.fail(&DeployError::new(DeployErrorCode::BuildError, "remote build failed"));
        assert_eq!(state.progress, 40);
        assert_eq!(state.status, DeploymentStatus::Error);
        assert_eq!(state.error.as_deref(), Some("remote build failed"));
        assert_eq!(state.error_code, Some("BUILD_ERROR"));
    }

    #[test]
    fn error_field_tracks_error_status() {
        let state = DeploymentState::new("dep-1");
        assert!(state.error.is_none());

        let mut failed = state.clone();
        failed.fail(&DeployError::new(DeployErrorCode::Unknown, "boom"));
        assert!(failed.error.is_some());
        assert_eq!(failed.status, DeploymentStatus::Error);
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let mut state = DeploymentState::new("dep-7");
        state.transition(DeploymentStatus::Uploading);
        let event = state.snapshot("Uploading files");
        assert_eq!(event.deployment_id, "dep-7");
        assert_eq!(event.status, "uploading");
        assert_eq!(event.progress, 30);
    }

    #[test]
    fn terminal_statuses() {
        assert!(DeploymentStatus::Ready.is_terminal());
        assert!(DeploymentStatus::Error.is_terminal());
        assert!(DeploymentStatus::Canceled.is_terminal());
        assert!(!DeploymentStatus::Building.is_terminal());
    }
}
