// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Middleware modules (session, security headers).

pub mod security;
pub mod session;

pub use session::{require_session, SessionUser};
