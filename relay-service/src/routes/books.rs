use crate::error::{ApiError, CATEGORY_FAILED, DETAILS_FAILED, SEARCH_FAILED};
use crate::models::book::{Book, VolumePage};
use crate::models::responses::SearchResponse;
use crate::services::provider::{ProviderError, VolumeProvider};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use tracing::info;

pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const PROVIDER_LABEL: &str = "Google Books";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub max_results: Option<u32>,
}

impl SearchParams {
    fn max_results(&self) -> u32 {
        self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }
}

pub fn category_query(category: &str) -> String {
    format!("subject:{}", category)
}

fn into_search_response(page: VolumePage) -> SearchResponse {
    let books: Vec<Book> = page
        .items
        .unwrap_or_default()
        .into_iter()
        .map(Book::from)
        .collect();

    SearchResponse {
        books,
        total_items: page.total_items.unwrap_or(0),
        server: PROVIDER_LABEL.to_string(),
    }
}

async fn relay_search(
    provider: &(dyn VolumeProvider + Send + Sync),
    query: &str,
    max_results: u32,
) -> Result<SearchResponse, ProviderError> {
    let page = provider.search(query, max_results).await?;
    Ok(into_search_response(page))
}

pub async fn search_books(
    Path(query): Path<String>,
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> Result<Json<SearchResponse>, ApiError> {
    info!("Search query: {:?} {:?}", query, params);

    relay_search(state.provider.as_ref(), &query, params.max_results())
        .await
        .map(Json)
        .map_err(|e| ApiError::new(SEARCH_FAILED, e))
}

pub async fn search_category(
    Path(category): Path<String>,
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> Result<Json<SearchResponse>, ApiError> {
    info!("Category search: {:?} {:?}", category, params);

    relay_search(
        state.provider.as_ref(),
        &category_query(&category),
        params.max_results(),
    )
    .await
    .map(Json)
    .map_err(|e| ApiError::new(CATEGORY_FAILED, e))
}

pub async fn book_details(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Book>, ApiError> {
    info!("Book details: {}", id);

    state
        .provider
        .volume(&id)
        .await
        .map(|item| Json(Book::from(item)))
        .map_err(|e| ApiError::new(DETAILS_FAILED, e))
}
