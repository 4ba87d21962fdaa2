// SPDX-License-Identifier: MIT

//! Liftlog API Server
//!
//! Serves the workout-tracking JSON API: registration and login,
//! workout and exercise CRUD, and per-user progress summaries.

use liftlog::{config::Config, db::MongoDb, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Liftlog API");

    // Connect to MongoDB; unreachable store at startup is fatal
    let db = MongoDb::connect(&config)
        .await
        .expect("Failed to connect to MongoDB");

    // Ensure indexes before serving any traffic: the unique indexes
    // guard registration races and the compound index serves listing
    db.ensure_indexes()
        .await
        .expect("Failed to ensure indexes");

    // Build shared state
    let state = Arc::new(AppState { config, db });

    // Build router
    let app = liftlog::routes::create_router(state.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("liftlog=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
