//! Route modules for PDF Raster Server

pub mod convert;
pub mod form;
pub mod health;
pub mod info;

use axum::{
    body::Bytes,
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::raster::PageSequence;
use crate::state::AppState;

/// Build the application router with its middleware
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_upload = state.config().upload.max_bytes;

    Router::new()
        .route("/health", get(health::health_check))
        .route("/convert", post(convert::convert_pdf))
        .route("/pdf-info", post(info::pdf_info))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run blocking work off the async runtime
pub(crate) async fn run_blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Processing(format!("Task join error: {}", e)))
}

/// Rasterize an uploaded document. Decode failures are client errors.
pub(crate) async fn rasterize_upload(
    state: &AppState,
    data: Bytes,
) -> Result<PageSequence, ApiError> {
    let rasterizer = state.rasterizer();
    let sequence = run_blocking(move || rasterizer.rasterize(&data)).await??;
    Ok(sequence)
}
