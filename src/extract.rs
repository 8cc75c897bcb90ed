// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Request extractors.

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body extractor that keeps rejections inside the response envelope.
///
/// axum's own `Json` answers a malformed or incomplete body with a
/// plain-text 422 from the deserializer. Every failure this service
/// produces must be `{"success": false, "error": ...}`, so body
/// rejections are folded into the validation error instead.
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
