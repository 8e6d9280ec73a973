//! Deployment progress event stream.
//!
//! The orchestrator publishes [`bus::DeployProgressEvent`] snapshots to
//! an in-process [`bus::EventBus`]; calling layers subscribe and relay
//! them wherever they need to go (log, WebSocket, database).  The
//! pipeline itself retains nothing.

pub mod bus;

pub use bus::{DeployProgressEvent, EventBus};
