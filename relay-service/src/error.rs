use crate::models::responses::ErrorResponse;
use crate::services::provider::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

pub const SEARCH_FAILED: &str = "Google Books API error";
pub const CATEGORY_FAILED: &str = "Category search failed";
pub const DETAILS_FAILED: &str = "Failed to fetch book details";

/// A provider failure tagged with the operation that hit it. Always rendered as a 500.
#[derive(Error, Debug)]
#[error("{message}: {source}")]
pub struct ApiError {
    pub message: &'static str,
    #[source]
    pub source: ProviderError,
}

impl ApiError {
    pub fn new(message: &'static str, source: ProviderError) -> Self {
        Self { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{}", self);

        let body = ErrorResponse {
            message: self.message.to_string(),
            error: self.source.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
