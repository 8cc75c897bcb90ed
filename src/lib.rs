// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Vaxreg: vaccination-registration backend
//!
//! This crate provides the backend API for citizen and center registration
//! and the role-gated administrative workflow (user roles, center
//! approval/rejection). Credentials and email delivery belong to the
//! identity provider; durable records live in Firestore.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::{AdminService, IdentityService, RegistrationService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub identity: IdentityService,
    pub admin: AdminService,
    pub registration: RegistrationService,
}
