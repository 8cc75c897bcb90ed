// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Services module - business logic layer.

pub mod admin;
pub mod identity;
pub mod registration;

pub use admin::AdminService;
pub use identity::{IdentityService, ProviderAccount, ProviderUser};
pub use registration::RegistrationService;
