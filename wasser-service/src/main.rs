use anyhow::Result;
use wasser_service::{api, config::AppConfig, metrics_server, observability, store, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = AppConfig::load()?;

    // Start metrics server if configured
    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr)?;
    }

    let store = store::connect(&cfg).await?;

    api::serve(&cfg.http.bind_addr, AppState::new(store)).await
}
