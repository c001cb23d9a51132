use crate::models::book::{VolumeItem, VolumePage};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Upstream HTTP status; a bare code because reqwest and axum use different `http` versions.
    #[error("Request failed with status code {0}")]
    Status(u16),
    #[error("Invalid volume id: {0:?}")]
    InvalidId(String),
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read-only source of volume metadata.
#[async_trait]
pub trait VolumeProvider {
    /// Free-text search; `query` is forwarded untouched as the provider's `q`.
    async fn search(&self, query: &str, max_results: u32) -> Result<VolumePage, ProviderError>;
    async fn volume(&self, id: &str) -> Result<VolumeItem, ProviderError>;
}
