use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::service::ReviewService;

pub mod routes;

/// Server state
pub struct AppState {
    pub service: ReviewService,
}

/// Build the API router over an already constructed service
pub fn router(service: ReviewService) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/health", get(routes::health))
        .route("/reviews", get(routes::list_reviews).post(routes::create_review))
        .route("/reviews/report", get(routes::report))
        .route("/reviews/{id}", get(routes::get_review))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(addr: SocketAddr, service: ReviewService) -> anyhow::Result<()> {
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server on {}", listener.local_addr()?);
    println!("🌍 Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
