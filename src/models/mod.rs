// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Data models for the application.

pub mod center;
pub mod user;

pub use center::{Center, Location};
pub use user::{Role, User};
