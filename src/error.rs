use thiserror::Error;

/// Request-time failures of the prediction pipeline. Artifact-load failures
/// are reported through `anyhow` at startup and never reach a request.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("unknown weather condition {label:?}; trained categories: {known:?}")]
    UnknownWeather { label: String, known: Vec<String> },

    #[error("feature length mismatch: got {got}, expected {expected}")]
    FeatureLengthMismatch { got: usize, expected: usize },

    #[error("weather lookup failed: {0}; retry with a manual weather_condition")]
    WeatherUnavailable(String),
}
