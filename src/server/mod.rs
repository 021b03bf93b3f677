//! HTTP exposition: one collection cycle per scrape of `/metrics`.

pub mod encoder;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use parking_lot::Mutex;
use tokio::net::TcpListener;

use crate::core::config::ExporterConfig;
use crate::core::system_monitor::Collector;
use crate::error::{ExporterError, Result};

pub use encoder::{encode_text, to_metric_families, CONTENT_TYPE};

const LANDING_PAGE: &str = "<html>\
<head><title>Jetson Exporter</title></head>\
<body><h1>Jetson Exporter</h1><p><a href=\"/metrics\">Metrics</a></p></body>\
</html>";

/// Shared server state. The mutex serializes collection cycles.
struct AppState {
    collector: Mutex<Collector>,
}

fn scrape(state: &AppState) -> Result<String> {
    let records = state.collector.lock().collect();
    encode_text(&records)
}

async fn handle_metrics(State(state): State<Arc<AppState>>) -> Response {
    let result = tokio::task::spawn_blocking(move || scrape(&state)).await;

    match result {
        Ok(Ok(body)) => ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response(),
        Ok(Err(e)) => {
            log::error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            log::error!("Collection task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "collection failed").into_response()
        }
    }
}

async fn handle_index() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// Build the router around a ready collector.
pub fn build_router(collector: Collector) -> Router {
    let state = Arc::new(AppState {
        collector: Mutex::new(collector),
    });

    Router::new()
        .route("/", get(handle_index))
        .route("/metrics", get(handle_metrics))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}

/// Serve `/metrics` on the configured address until interrupted.
pub async fn serve(config: &ExporterConfig, collector: Collector) -> Result<()> {
    let listener = TcpListener::bind(&config.listen_address)
        .await
        .map_err(|e| {
            ExporterError::exposition(format!("cannot bind {}: {}", config.listen_address, e))
        })?;

    log::info!("Serving metrics on http://{}/metrics", listener.local_addr()?);

    axum::serve(listener, build_router(collector))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
