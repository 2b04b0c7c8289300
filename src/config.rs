use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

/// Optional JSON config file shape. Every field may be omitted; omitted
/// fields fall through to environment variables and then to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub model_path: Option<String>,
    pub encoder_path: Option<String>,
    pub port: Option<u16>,
    pub weather_api_url: Option<String>,
    pub weather_api_key: Option<String>,
}

/// Service configuration, read once at startup. Artifact paths default to
/// the bundled demo artifacts so a local run needs no setup at all.
#[derive(Debug)]
pub struct ServerConfig {
    pub model_path: String,
    pub encoder_path: String,
    pub port: u16,
    pub weather_api_url: Option<String>,
    pub weather_api_key: Option<String>,
}

impl ServerConfig {
    /// Reads `CONFIG_PATH` (default `predictor_config.json`) if it exists,
    /// then resolves with precedence: environment > config file > defaults.
    /// A present-but-invalid config file is an error, not a silent fallback.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH")
            .unwrap_or_else(|_| "predictor_config.json".to_string());
        let file = match fs::read_to_string(&path) {
            Ok(txt) => serde_json::from_str::<FileConfig>(&txt)
                .with_context(|| format!("invalid config JSON at {}", path))?,
            Err(_) => FileConfig::default(),
        };
        Ok(Self::resolve(file))
    }

    pub fn resolve(file: FileConfig) -> Self {
        let env = |key: &str| std::env::var(key).ok();
        Self {
            model_path: env("MODEL_PATH")
                .or(file.model_path)
                .unwrap_or_else(|| "artifacts/model.json".to_string()),
            encoder_path: env("ENCODER_PATH")
                .or(file.encoder_path)
                .unwrap_or_else(|| "artifacts/encoder.json".to_string()),
            port: env("PORT")
                .and_then(|s| s.parse().ok())
                .or(file.port)
                .unwrap_or(8080),
            weather_api_url: env("WEATHER_API_URL").or(file.weather_api_url),
            weather_api_key: env("WEATHER_API_KEY").or(file.weather_api_key),
        }
    }
}
