//! HTTP surface of the dashboard: JSON/XML routes plus the static front end.

pub mod response;
pub mod routes;
pub mod state;

use axum::{http::Method, routing::get, Router};
use log::{error, info};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

pub use response::ApiError;
pub use state::{AppState, Fetchers};

/// Builds the router. Unknown paths fall through to the static directory.
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/rss", get(routes::rss))
        .route("/weather", get(routes::weather))
        .route("/get-article-content", get(routes::article_content))
        .route("/standings", get(routes::standings))
        .route("/matches", get(routes::matches))
        .route("/health", get(routes::health_check))
        .fallback_service(static_files)
        .layer(cors)
        .with_state(state)
}

pub struct DashboardServer {
    port: u16,
    state: Arc<AppState>,
}

impl DashboardServer {
    pub fn new(port: u16, state: Arc<AppState>) -> Self {
        Self { port, state }
    }

    /// Serves until Ctrl+C.
    pub async fn start(self) -> std::io::Result<()> {
        let app = create_router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", self.port)).await?;

        info!("🚀 Dashboard server listening on port {}", self.port);
        info!("📁 Serving static files from {}", self.state.config.static_dir);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("👋 Dashboard server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
