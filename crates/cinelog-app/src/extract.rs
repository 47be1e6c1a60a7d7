use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON body, which reports malformed payload as JSON error
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);
