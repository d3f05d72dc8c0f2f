use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Json},
};

use crate::analysis::{ColorAnalysisResult, CompositionResult};

use super::error::ApiError;
use super::upload::UploadForm;
use super::AppState;

/// Message served from `GET /`
pub const ROOT_MESSAGE: &str =
    "Image analysis service for ad creatives: composition and color scoring \
     aimed at boosting brand conversions on major ad platforms";

/// GET /: static description
pub(super) async fn handle_root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": ROOT_MESSAGE }))
}

/// GET /health: liveness check
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /composition-analysis: symmetry, rule-of-thirds and aesthetic scores
pub(super) async fn handle_composition_analysis(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CompositionResult>, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let engine = state.engine.clone();

    let result = tokio::task::spawn_blocking(move || engine.composition_from_bytes(&form.file))
        .await
        .map_err(|e| ApiError::Internal(format!("Composition analysis task failed: {}", e)))?
        .map_err(|error| ApiError::analysis(state.error_status, error))?;

    Ok(Json(result))
}

/// POST /analyze: dominant color, channel statistics and predictive score
pub(super) async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ColorAnalysisResult>, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let engine = state.engine.clone();

    let result = tokio::task::spawn_blocking(move || {
        engine.color_from_bytes(&form.file, form.brand_color.as_deref())
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Color analysis task failed: {}", e)))?
    .map_err(|error| ApiError::analysis(state.error_status, error))?;

    Ok(Json(result))
}
