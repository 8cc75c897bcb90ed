// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Vaxreg API Server
//!
//! Backend for the vaccination-registration application: public signup for
//! citizens and centers, and the administrator dashboard's role and
//! verification workflow.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vaxreg::{
    config::Config,
    db::FirestoreDb,
    services::{AdminService, IdentityService, RegistrationService},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Vaxreg API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Initialize the identity-provider client. The admin credential is
    // constructed here, once, and injected through AppState.
    let identity = IdentityService::new(&config)
        .await
        .expect("Failed to initialize identity provider client");
    tracing::info!("Identity provider client initialized");

    let admin = AdminService::new(db.clone(), identity.clone());
    let registration = RegistrationService::new(db.clone(), identity.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        identity,
        admin,
        registration,
    });

    let app = vaxreg::routes::create_router(state);

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
                .add_directive("vaxreg=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
