use relay_service::config::Config;
use relay_service::services::google_books::GoogleBooks;
use relay_service::AppState;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("relay_service=info,tower_http=info")
        .init();

    let config = Config::from_env();
    let state = AppState::new(Arc::new(GoogleBooks::new()), config.server_name.as_str());
    let app = relay_service::app(state, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.port);

    info!(
        "Book search relay {} starting on {} (static assets from {})",
        config.server_name,
        addr,
        config.static_dir.display()
    );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
