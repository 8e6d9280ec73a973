//! Typed client for the remote build platform.
//!
//! [`client::PlatformClient`] wraps the platform's REST API (projects,
//! deployments, domains, environment variables) behind one request
//! helper with centralized error classification.  The orchestrator
//! consumes the [`api::BuildPlatform`] trait rather than the concrete
//! client, so deployments are testable against an in-memory fake.

pub mod api;
pub mod client;
pub mod error;
pub mod types;
pub mod wait;

pub use api::BuildPlatform;
pub use client::{PlatformClient, PlatformConfig};
pub use error::PlatformError;
pub use wait::{wait_for_deployment, WaitConfig};
