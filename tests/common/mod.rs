// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

use std::sync::Arc;
use vaxreg::config::Config;
use vaxreg::db::FirestoreDb;
use vaxreg::routes::create_router;
use vaxreg::services::{AdminService, IdentityService, RegistrationService};
use vaxreg::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Shared state with offline mock dependencies.
#[allow(dead_code)]
pub fn create_test_state() -> Arc<AppState> {
    let config = Config::test_default();
    let db = test_db_offline();
    let identity = IdentityService::new_mock();

    let admin = AdminService::new(db.clone(), identity.clone());
    let registration = RegistrationService::new(db.clone(), identity.clone());

    Arc::new(AppState {
        config,
        db,
        identity,
        admin,
        registration,
    })
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = create_test_state();
    (create_router(state.clone()), state)
}
