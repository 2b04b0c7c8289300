//! The per-request pipeline: Observation → encode → predict. Stateless and
//! side-effect free over immutable artifacts, so every call is isolated.

use crate::encoder::LabelEncoder;
use crate::error::PredictError;
use crate::model::Forest;
use crate::types::{EncodedFeatureVector, Observation, PredictionResult};

pub fn encode(
    encoder: &LabelEncoder,
    obs: &Observation,
) -> Result<EncodedFeatureVector, PredictError> {
    let weather_code = encoder.encode(&obs.weather_condition)?;
    Ok(EncodedFeatureVector {
        latency_ms: obs.latency_ms,
        weather_code,
        users_online: obs.users_online,
    })
}

pub fn predict_observation(
    forest: &Forest,
    encoder: &LabelEncoder,
    obs: &Observation,
) -> Result<PredictionResult, PredictError> {
    let encoded = encode(encoder, obs)?;
    let signal_strength = forest.predict(&encoded.as_features())?;
    Ok(PredictionResult { signal_strength })
}
