//! # HTTP Server
//!
//! Axum router exposing the analyzers over multipart uploads.
//!
//! - `POST /composition-analysis` with form field `file`
//! - `POST /analyze` with form fields `file` and optional `brand_color`
//! - `GET /` and `GET /health`
//!
//! Every request is bounded by a body size limit and a timeout. Analysis
//! runs on the blocking pool so slow images never stall the async workers.

mod error;
mod handlers;
mod upload;

pub use error::{status_for, ApiError};
pub use handlers::ROOT_MESSAGE;
pub use upload::{UploadForm, BRAND_COLOR_FIELD, FILE_FIELD};

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, StatusCode},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    analysis::AnalysisEngine,
    config::{Config, ErrorStatusPolicy, ServerConfig},
    error::Result,
};
use handlers::{handle_analyze, handle_composition_analysis, handle_health, handle_root};

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnalysisEngine>,
    pub error_status: ErrorStatusPolicy,
}

/// Build the application router with all layers applied
pub fn build_router(config: &Config) -> Router {
    let state = AppState {
        engine: Arc::new(AnalysisEngine::new(config)),
        error_status: config.server.error_status,
    };

    let routes = Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/composition-analysis", post(handle_composition_analysis))
        .route("/analyze", post(handle_analyze))
        .with_state(state);

    with_layers(routes, &config.server)
}

/// Body limit, timeout, CORS and request tracing around `routes`
fn with_layers(routes: Router, server: &ServerConfig) -> Router {
    routes
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(server.max_upload_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_secs),
        ))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the configured origins; "*" mirrors any origin and allows credentials
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.allows_any_origin() {
        return CorsLayer::very_permissive();
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: Config) -> Result<()> {
    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    serve_with_listener(listener, config).await
}

/// Serve on a pre-bound listener until Ctrl-C
pub async fn serve_with_listener(listener: TcpListener, config: Config) -> Result<()> {
    let addr = listener.local_addr()?;
    let app = build_router(&config);

    info!("Listening on http://{}", addr);
    info!("  POST /composition-analysis");
    info!("  POST /analyze");
    info!("  GET  /health");
    info!(
        "Upload limit {} bytes, timeout {}s, error status policy {:?}",
        config.server.max_upload_bytes,
        config.server.request_timeout_secs,
        config.server.error_status
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
