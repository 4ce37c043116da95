// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Subthemes API Server
//!
//! Lets users sign in with Google, pull their complete YouTube subscription
//! list, and organize those subscriptions into named themes.

use std::sync::Arc;
use subthemes::{
    config::Config,
    db::FirestoreDb,
    services::{GoogleIdentityVerifier, SessionStore, SyncService, ThemeService, YouTubeClient},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Subthemes API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Google sign-in verification (JWKS discovery + cache)
    let verifier = Arc::new(
        GoogleIdentityVerifier::new(&config).expect("Failed to initialize identity verifier"),
    );

    // YouTube Data API client with the configured pagination ceiling
    let youtube = YouTubeClient::new(config.max_subscription_pages);
    tracing::info!(
        max_pages = config.max_subscription_pages,
        "YouTube client initialized"
    );

    // Per-user session state, shared across requests
    let sessions = SessionStore::new();

    let sync_service = SyncService::new(verifier, youtube, db.clone(), sessions);
    let theme_service = ThemeService::new(db.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        sync_service,
        theme_service,
    });

    // Build router
    let app = subthemes::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("subthemes=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
