//! Thin deployment runner.
//!
//! Reads an artifact JSON file, deploys it through the orchestrator,
//! and relays progress events to the log.  Platform credentials and
//! deployment settings come from the environment (`.env` supported).

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shipwright_core::types::Artifact;
use shipwright_deploy::{DeployConfig, DeploymentRequest, Orchestrator};
use shipwright_events::EventBus;
use shipwright_platform::{PlatformClient, PlatformConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shipwright_runner=info,shipwright_deploy=info,shipwright_platform=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args()
        .nth(1)
        .context("Usage: shipwright-runner <artifact.json>")?;
    let raw =
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?;
    let artifact: Artifact =
        serde_json::from_str(&raw).with_context(|| format!("Invalid artifact JSON in {path}"))?;

    let request = DeploymentRequest {
        artifact_id: artifact.id.clone(),
        user_id: std::env::var("DEPLOY_USER_ID").unwrap_or_else(|_| "local".into()),
        project_name: std::env::var("DEPLOY_PROJECT_NAME")
            .unwrap_or_else(|_| artifact.title.clone()),
        domain: std::env::var("DEPLOY_DOMAIN").ok(),
        env: Vec::new(),
    };

    let platform = Arc::new(PlatformClient::new(PlatformConfig::from_env()));
    let bus = Arc::new(EventBus::default());

    // Relay progress snapshots to the log until the run finishes.
    let mut rx = bus.subscribe();
    let relay = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            tracing::info!(
                deployment_id = %event.deployment_id,
                status = %event.status,
                progress = event.progress,
                "{}",
                event.message,
            );
        }
    });

    let orchestrator = Orchestrator::new(platform, Arc::clone(&bus), DeployConfig::from_env());
    let outcome = orchestrator.deploy(&artifact, &request).await;
    relay.abort();

    if outcome.succeeded() {
        println!(
            "Deployed: {}",
            outcome.state.url.as_deref().unwrap_or("(no url)")
        );
        if let Some(domain) = &outcome.domain {
            if !domain.verified {
                println!("Domain {} is pending DNS configuration:", domain.domain);
                for record in &domain.dns_records {
                    println!(
                        "  {} {} -> {}",
                        record.record_type, record.name, record.value
                    );
                }
            }
        }
        Ok(())
    } else {
        eprintln!(
            "Deployment failed: {}",
            outcome
                .state
                .error
                .as_deref()
                .unwrap_or("canceled by the platform")
        );
        std::process::exit(1);
    }
}
