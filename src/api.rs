//! HTTP API для шага очистки

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::dataset::Dataset;
use crate::error::CleaningError;
use crate::steps;
use crate::types::{CleanRequest, CleaningSettings, SplitResult};

#[derive(Clone)]
pub struct AppState {
    settings: Arc<CleaningSettings>,
}

impl AppState {
    pub fn new(settings: CleaningSettings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub enum AppError {
    Cleaning(CleaningError),
    InvalidBody(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<CleaningError> for AppError {
    fn from(err: CleaningError) -> Self {
        AppError::Cleaning(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Cleaning(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError {
                    code: e.code().to_string(),
                    message: e.to_string(),
                },
            ),
            AppError::InvalidBody(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError {
                    code: "INVALID_BODY".to_string(),
                    message,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/preprocess", post(preprocess))
        .route("/api/clean", post(clean))
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Customer satisfaction data cleaning API (Rust)",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Настройки запроса, если переданы, иначе настройки сервера
fn request_settings(
    state: &AppState,
    overrides: Option<CleaningSettings>,
) -> Result<CleaningSettings, AppError> {
    let settings = overrides.unwrap_or_else(|| state.settings.as_ref().clone());
    settings.validate()?;
    Ok(settings)
}

async fn preprocess(
    State(state): State<AppState>,
    payload: Result<Json<CleanRequest>, JsonRejection>,
) -> Result<Json<Dataset>, AppError> {
    let Json(request) = payload?;
    let settings = request_settings(&state, request.settings)?;
    let dataset = request.dataset.into_dataset()?;
    tracing::info!("Preprocess request: {} rows, {} columns", dataset.height(), dataset.width());

    Ok(Json(steps::preprocess_data(dataset, &settings)?))
}

async fn clean(
    State(state): State<AppState>,
    payload: Result<Json<CleanRequest>, JsonRejection>,
) -> Result<Json<SplitResult>, AppError> {
    let Json(request) = payload?;
    let settings = request_settings(&state, request.settings)?;
    let dataset = request.dataset.into_dataset()?;
    tracing::info!("Clean request: {} rows, {} columns", dataset.height(), dataset.width());

    Ok(Json(steps::clean_data(dataset, &settings)?))
}
