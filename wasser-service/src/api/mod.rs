use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use wasser_client::db::RecordStore;

pub mod dto;
pub mod error;
pub mod handlers;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/wassermonat",
            get(handlers::list_records).post(handlers::create_record),
        )
        .route("/api/wassermonat/table", get(handlers::table))
        .route("/api/wassermonat/kpis", get(handlers::kpis))
        .route("/api/wassermonat/filters", get(handlers::filters))
        .route("/api/wassermonat/:id", put(handlers::update_record))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(bind_addr: &str, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid http.bind_addr: {e}"))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "wasser API listening");

    axum::serve(listener, router(state).into_make_service()).await?;
    Ok(())
}
