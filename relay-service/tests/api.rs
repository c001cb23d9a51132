use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use relay_service::models::book::{VolumeInfo, VolumeItem, VolumePage};
use relay_service::services::provider::{ProviderError, VolumeProvider};
use relay_service::config::Config;
use relay_service::{app, AppState};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Provider double that records every forwarded call.
#[derive(Default)]
struct FakeProvider {
    calls: Mutex<Vec<(String, u32)>>,
    lookups: Mutex<Vec<String>>,
    fail_with: Option<u16>,
}

impl FakeProvider {
    fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Default::default()
        }
    }
}

fn volume(id: &str, title: &str) -> VolumeItem {
    VolumeItem {
        id: Some(id.to_string()),
        volume_info: Some(VolumeInfo {
            title: Some(title.to_string()),
            ..Default::default()
        }),
    }
}

#[async_trait]
impl VolumeProvider for FakeProvider {
    async fn search(&self, query: &str, max_results: u32) -> Result<VolumePage, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));

        if let Some(status) = self.fail_with {
            return Err(ProviderError::Status(status));
        }

        let items = (0..max_results.min(3))
            .map(|i| volume(&format!("id{}", i), &format!("{} #{}", query, i)))
            .collect();

        Ok(VolumePage {
            items: Some(items),
            total_items: Some(987),
        })
    }

    async fn volume(&self, id: &str) -> Result<VolumeItem, ProviderError> {
        self.lookups.lock().unwrap().push(id.to_string());

        if let Some(status) = self.fail_with {
            return Err(ProviderError::Status(status));
        }

        Ok(VolumeItem {
            id: Some(id.to_string()),
            volume_info: None,
        })
    }
}

fn public_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public")
}

fn router(provider: Arc<FakeProvider>, server_name: &str) -> Router {
    app(AppState::new(provider, server_name), public_dir())
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

#[tokio::test]
async fn status_reports_configured_server_name() {
    let (status, body) = get(router(Arc::default(), "relay-a"), "/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["serverName"], "relay-a");
}

#[tokio::test]
async fn search_forwards_query_and_max_results() {
    let provider = Arc::new(FakeProvider::default());
    let (status, body) = get(
        router(provider.clone(), "relay"),
        "/api/books/search/dune?maxResults=5",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        provider.calls.lock().unwrap().as_slice(),
        &[("dune".to_string(), 5)]
    );
    assert_eq!(body["server"], "Google Books");
    assert_eq!(body["totalItems"], 987);
    assert!(body["books"].as_array().unwrap().len() <= 5);
    assert_eq!(body["books"][0]["title"], "dune #0");
    assert_eq!(body["books"][0]["authors"][0], "Unknown");
}

#[tokio::test]
async fn search_defaults_to_ten_results() {
    let provider = Arc::new(FakeProvider::default());
    get(router(provider.clone(), "relay"), "/api/books/search/rust").await;

    assert_eq!(provider.calls.lock().unwrap()[0].1, 10);
}

#[tokio::test]
async fn search_path_is_percent_decoded() {
    let provider = Arc::new(FakeProvider::default());
    get(
        router(provider.clone(), "relay"),
        "/api/books/search/intitle%3Adune%20messiah",
    )
    .await;

    assert_eq!(provider.calls.lock().unwrap()[0].0, "intitle:dune messiah");
}

#[tokio::test]
async fn category_search_is_a_subject_search() {
    let provider = Arc::new(FakeProvider::default());
    let (status, body) = get(
        router(provider.clone(), "relay"),
        "/api/books/category/fiction?maxResults=2",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        provider.calls.lock().unwrap().as_slice(),
        &[("subject:fiction".to_string(), 2)]
    );
    assert_eq!(body["books"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn details_returns_single_normalized_book() {
    let provider = Arc::new(FakeProvider::default());
    let (status, body) = get(
        router(provider.clone(), "relay"),
        "/api/books/details/zyTCAlFPjgYC",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.lookups.lock().unwrap()[0], "zyTCAlFPjgYC");
    assert_eq!(body["id"], "zyTCAlFPjgYC");
    assert_eq!(body["publisher"], "N/A");
    assert_eq!(body["publishedDate"], "Unknown");
    assert_eq!(body["language"], "N/A");
    assert_eq!(body["pageCount"], 0);
    assert_eq!(body["thumbnail"], "");
    assert!(body.get("averageRating").is_none());
}

#[tokio::test]
async fn provider_failure_on_search_is_a_500_with_error_text() {
    let provider = Arc::new(FakeProvider::failing(503));
    let (status, body) = get(router(provider, "relay"), "/api/books/search/dune").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Google Books API error");
    assert!(body["error"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn provider_failure_on_category_uses_category_message() {
    let provider = Arc::new(FakeProvider::failing(502));
    let (status, body) = get(router(provider, "relay"), "/api/books/category/history").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Category search failed");
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn provider_failure_on_details_uses_details_message() {
    let provider = Arc::new(FakeProvider::failing(404));
    let (status, body) = get(router(provider, "relay"), "/api/books/details/missing").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch book details");
    assert!(body["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn non_numeric_max_results_is_rejected() {
    let provider = Arc::new(FakeProvider::default());
    let (status, _) = get(
        router(provider.clone(), "relay"),
        "/api/books/search/dune?maxResults=lots",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(provider.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn static_page_is_served_from_same_origin() {
    let response = router(Arc::default(), "relay")
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("Book Search"));
}

#[tokio::test]
async fn default_config_serves_the_landing_page() {
    let static_dir = Config::from_lookup(|_| None).static_dir;
    let response = app(AppState::new(Arc::<FakeProvider>::default(), "relay"), static_dir)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8_lossy(&bytes);
    assert!(page.contains("browser-client"));
    assert!(page.contains("html &lt;path&gt;"));
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let response = router(Arc::default(), "relay")
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .header(header::ORIGIN, "http://elsewhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
