//! Book search relay.
//!
//! Forwards search, category and detail lookups to the Google Books volumes API,
//! normalizes every returned volume into a [`models::book::Book`] and serves the
//! browsing page's static assets from the same origin.

use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use routes::{
    books::{book_details, search_books, search_category},
    status::server_status,
};
use services::provider::VolumeProvider;

pub type Provider = Arc<dyn VolumeProvider + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub provider: Provider,
    pub server_name: Arc<str>,
}

impl AppState {
    pub fn new(provider: Provider, server_name: impl Into<Arc<str>>) -> Self {
        Self {
            provider,
            server_name: server_name.into(),
        }
    }
}

pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/api/status", get(server_status))
        .route("/api/books/search/:query", get(search_books))
        .route("/api/books/category/:category", get(search_category))
        .route("/api/books/details/:id", get(book_details))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
