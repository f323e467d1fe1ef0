//! Lifeguard REST API server binary.
//!
//! Loads the classifier artifact and knowledge bases once, then serves the
//! triage endpoints over HTTP. A missing or corrupt artifact aborts startup:
//! the process never serves with partial state.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{app, AppState};
use lifeguard_core::constants::DEFAULT_MODEL_FILENAME;
use lifeguard_core::{resolve_kb_dir, CoreConfig, TriageService};

/// Main entry point for the Lifeguard REST API server.
///
/// # Environment Variables
/// - `LIFEGUARD_REST_ADDR`: server address (default: "0.0.0.0:8000")
/// - `LIFEGUARD_MODEL_PATH`: model artifact path (default: "model.json")
/// - `LIFEGUARD_KB_DIR`: knowledge-base directory override (default: search
///   for `kb/` from the working directory upwards)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the model artifact or a knowledge-base file is missing or corrupt,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("lifeguard_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("LIFEGUARD_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let model_path = std::env::var("LIFEGUARD_MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_FILENAME));
    let kb_override = std::env::var("LIFEGUARD_KB_DIR").ok().map(PathBuf::from);

    let kb_dir = resolve_kb_dir(kb_override)?;
    let cfg = CoreConfig::new(model_path, kb_dir)?;
    let service = TriageService::from_config(&cfg)?;

    tracing::info!("-- Starting Lifeguard REST API on {}", addr);
    tracing::info!(
        "-- {} disease classes, {} vocabulary symptoms, {} symptom profiles",
        service.classifier().classes().len(),
        service.classifier().vocabulary().len(),
        service.kb().profiles.len()
    );

    let state = AppState {
        service: Arc::new(service),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
