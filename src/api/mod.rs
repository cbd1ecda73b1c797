//! REST API module.
//!
//! Each handler builds the screen it fronts, runs one screen operation and
//! returns the outcome in the response envelope.

mod battalions;
mod lookups;
mod soldiers;
mod wars;
mod weapons;

pub use battalions::*;
pub use lookups::*;
pub use soldiers::*;
pub use wars::*;
pub use weapons::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Wrap a screen outcome in the response envelope.
pub fn respond<T: Serialize>(outcome: Result<T, AppError>) -> ApiResult<T> {
    outcome.map(ApiResponse::new)
}
