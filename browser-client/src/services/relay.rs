use crate::error::{ClientError, Result};
use relay_service::models::book::Book;
use relay_service::models::responses::{SearchResponse, StatusResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_RELAY_URL: &str = "http://localhost:8080";

#[derive(Deserialize)]
struct RelayRejection {
    message: Option<String>,
}

/// HTTP client for the relay's `/api` surface.
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn search_url(&self, query: &str, max_results: u32) -> String {
        format!(
            "{}/api/books/search/{}?maxResults={}",
            self.base_url,
            urlencoding::encode(query),
            max_results
        )
    }

    pub fn category_url(&self, category: &str, max_results: u32) -> String {
        format!(
            "{}/api/books/category/{}?maxResults={}",
            self.base_url,
            urlencoding::encode(category),
            max_results
        )
    }

    pub fn details_url(&self, id: &str) -> String {
        format!("{}/api/books/details/{}", self.base_url, urlencoding::encode(id))
    }

    pub async fn status(&self) -> Result<StatusResponse> {
        let url = format!("{}/api/status", self.base_url);
        self.get_json(&url, "Status check failed").await
    }

    pub async fn search(&self, query: &str, max_results: u32) -> Result<SearchResponse> {
        info!("Searching relay for {:?}", query);
        self.get_json(&self.search_url(query, max_results), "Search failed")
            .await
    }

    pub async fn search_category(&self, category: &str, max_results: u32) -> Result<SearchResponse> {
        info!("Searching relay category {:?}", category);
        self.get_json(
            &self.category_url(category, max_results),
            "Category search failed",
        )
        .await
    }

    pub async fn details(&self, id: &str) -> Result<Book> {
        info!("Loading details for {}", id);
        self.get_json(&self.details_url(id), "Failed to load book details")
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, fallback: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<RelayRejection>(&body)
                .ok()
                .and_then(|rejection| rejection.message)
                .unwrap_or_else(|| fallback.to_string());

            error!("Relay responded {} for {}: {}", status, url, message);
            return Err(ClientError::Relay {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

impl Default for RelayClient {
    fn default() -> Self {
        Self::new(DEFAULT_RELAY_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_percent_encodes_prefixed_query() {
        let client = RelayClient::new("http://relay:8080/");

        assert_eq!(
            client.search_url("intitle:dune messiah", 5),
            "http://relay:8080/api/books/search/intitle%3Adune%20messiah?maxResults=5"
        );
    }

    #[test]
    fn category_url_encodes_label() {
        let client = RelayClient::default();

        assert_eq!(
            client.category_url("Science Fiction", 10),
            "http://localhost:8080/api/books/category/Science%20Fiction?maxResults=10"
        );
    }

    #[test]
    fn details_url_uses_id_segment() {
        let client = RelayClient::default();

        assert_eq!(
            client.details_url("zyTCAlFPjgYC"),
            "http://localhost:8080/api/books/details/zyTCAlFPjgYC"
        );
    }
}
