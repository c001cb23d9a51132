use super::provider::{ProviderError, VolumeProvider};
use crate::models::book::{VolumeItem, VolumePage};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

pub const GOOGLE_BOOKS_API: &str = "https://www.googleapis.com/books/v1/volumes";

pub struct GoogleBooks {
    client: Client,
    base_url: String,
}

impl GoogleBooks {
    pub fn new() -> Self {
        Self::with_base_url(GOOGLE_BOOKS_API)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single-volume URL with `id` encoded as exactly one path segment.
    /// Dot segments are refused since URL parsing would resolve them.
    pub fn volume_url(&self, id: &str) -> Result<String, ProviderError> {
        if id.is_empty() || id == "." || id == ".." {
            return Err(ProviderError::InvalidId(id.to_string()));
        }
        Ok(format!("{}/{}", self.base_url, urlencoding::encode(id)))
    }
}

impl Default for GoogleBooks {
    fn default() -> Self {
        Self::new()
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        warn!("Google Books responded with status {}", status);
        return Err(ProviderError::Status(status.as_u16()));
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl VolumeProvider for GoogleBooks {
    async fn search(&self, query: &str, max_results: u32) -> Result<VolumePage, ProviderError> {
        info!("Querying Google Books: q={:?} maxResults={}", query, max_results);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query.to_string()), ("maxResults", max_results.to_string())])
            .send()
            .await?;

        decode(response).await
    }

    async fn volume(&self, id: &str) -> Result<VolumeItem, ProviderError> {
        info!("Fetching Google Books volume {}", id);

        let url = self.volume_url(id)?;
        let response = self.client.get(&url).send().await?;

        decode(response).await
    }
}
