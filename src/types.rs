use serde::{Deserialize, Serialize};

/// Raw inputs for one prediction: coordinates, current weather, and the
/// network statistics measured client-side. Ephemeral, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    pub latitude: f64,
    pub longitude: f64,
    pub weather_condition: String,
    pub latency_ms: f64,
    pub users_online: u32,
}

/// Number of model inputs; must match the artifact's `n_features`.
pub const N_FEATURES: usize = 3;

/// Observation after categorical encoding, in the training feature order.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFeatureVector {
    pub latency_ms: f64,
    pub weather_code: i64,
    pub users_online: u32,
}

impl EncodedFeatureVector {
    /// Feature order the model was trained with: [latency_ms, weather_code, users_online].
    pub fn as_features(&self) -> [f32; 3] {
        [
            self.latency_ms as f32,
            self.weather_code as f32,
            self.users_online as f32,
        ]
    }
}

/// Scalar connectivity quality estimate in [0,100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub signal_strength: f32,
}

// ---------- Wire types ----------

/// Request body for POST /predict. `weather_condition` is the manual
/// override: when present the weather fetch is skipped entirely.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub latency_ms: f64,
    pub users_online: u32,
    pub weather_condition: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub t: i64,
    pub signal_strength: f32,
    pub quality: &'static str,
    pub suggestion: &'static str,
    pub weather_condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
}
