//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for
//! [`DeployProgressEvent`]s.  It is designed to be shared via
//! `Arc<EventBus>` across the orchestrator and any relays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// DeployProgressEvent
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of a deployment run.
///
/// Write-once and fire-and-forget: the orchestrator emits one per state
/// change and never reads them back.  Constructed via
/// [`DeployProgressEvent::new`] and enriched with
/// [`with_details`](DeployProgressEvent::with_details).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployProgressEvent {
    /// Identifier of the deployment run.
    pub deployment_id: String,

    /// Pipeline status string, e.g. `"building"`.
    pub status: String,

    /// Human-readable progress message.
    pub message: String,

    /// Integer progress, 0–100.
    pub progress: u8,

    /// When the snapshot was taken (UTC).
    pub timestamp: DateTime<Utc>,

    /// Optional structured details (remote ids, DNS records, scores).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DeployProgressEvent {
    /// Create a new snapshot with no structured details.
    pub fn new(
        deployment_id: impl Into<String>,
        status: impl Into<String>,
        message: impl Into<String>,
        progress: u8,
    ) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            status: status.into(),
            message: message.into(),
            progress,
            timestamp: Utc::now(),
            details: None,
        }
    }

    /// Attach structured details to the snapshot.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out bus for progress snapshots.
///
/// Wraps a [`broadcast::Sender`] so any number of subscribers can
/// independently receive every published event.
///
/// # Usage
///
/// ```rust
/// use shipwright_events::bus::{DeployProgressEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(DeployProgressEvent::new("dep-1", "pending", "Validating artifact", 0));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<DeployProgressEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are
    /// dropped and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently
    /// dropped — progress is advisory, never load-bearing.
    pub fn publish(&self, event: DeployProgressEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<DeployProgressEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
