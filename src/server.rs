//! HTTP surface: shared state, error-to-status mapping, handlers, router.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json,
};
use serde_json::json;
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{
    encoder::LabelEncoder,
    error::PredictError,
    model::Forest,
    pipeline, presenter,
    types::{Observation, PredictRequest, PredictResponse},
    weather::WeatherClient,
};

#[derive(Clone)]
pub struct AppState {
    pub forest: Arc<Forest>,
    pub encoder: Arc<LabelEncoder>,
    pub weather: Option<Arc<WeatherClient>>,
}

pub type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn api_error(e: PredictError) -> ApiError {
    let status = match &e {
        PredictError::UnknownWeather { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        PredictError::WeatherUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        PredictError::FeatureLengthMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() })))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    // Collector: a manually entered condition wins; otherwise fetch current
    // weather for the given coordinates.
    let (condition, temperature_c) = match req.weather_condition {
        Some(ref c) => (c.clone(), None),
        None => {
            let client = state.weather.as_ref().ok_or_else(|| {
                api_error(PredictError::WeatherUnavailable(
                    "no weather endpoint configured".to_string(),
                ))
            })?;
            let report = client.current(req.latitude, req.longitude).await.map_err(|e| {
                tracing::warn!("weather fetch failed: {}", e);
                api_error(e)
            })?;
            (report.condition, Some(report.temperature_c))
        }
    };

    let obs = Observation {
        latitude: req.latitude,
        longitude: req.longitude,
        weather_condition: condition.clone(),
        latency_ms: req.latency_ms,
        users_online: req.users_online,
    };

    let result =
        pipeline::predict_observation(&state.forest, &state.encoder, &obs).map_err(api_error)?;
    let (quality, suggestion) = presenter::present(result.signal_strength);

    tracing::info!(
        "{}",
        presenter::summary_line(
            &condition,
            req.latency_ms,
            req.users_online,
            result.signal_strength,
            quality
        )
    );

    let now_ms = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis() as i64;
    Ok(Json(PredictResponse {
        t: now_ms,
        signal_strength: result.signal_strength,
        quality,
        suggestion,
        weather_condition: condition,
        temperature_c,
    }))
}

pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .with_state(state)
}
