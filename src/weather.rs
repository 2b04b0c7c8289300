use serde::Deserialize;
use std::time::Duration;

use crate::error::PredictError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub condition: String,
    pub temperature_c: f64,
}

// OpenWeatherMap-shaped current-weather payload; only the fields we consume.
#[derive(Deserialize)]
struct WeatherJson {
    weather: Vec<ConditionJson>,
    main: MainJson,
}

#[derive(Deserialize)]
struct ConditionJson {
    main: String,
}

#[derive(Deserialize)]
struct MainJson {
    temp: f64,
}

/// Client for the third-party current-weather endpoint, parameterized by
/// coordinates and an API key. Any failure maps to `WeatherUnavailable`;
/// the caller falls back to manual entry, so no retries happen here.
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self, PredictError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PredictError::WeatherUnavailable(e.to_string()))?;
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReport, PredictError> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| PredictError::WeatherUnavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(PredictError::WeatherUnavailable(format!(
                "endpoint returned {}",
                resp.status()
            )));
        }

        let body: WeatherJson = resp
            .json()
            .await
            .map_err(|e| PredictError::WeatherUnavailable(format!("malformed response: {}", e)))?;

        let condition = body
            .weather
            .first()
            .map(|c| c.main.clone())
            .ok_or_else(|| {
                PredictError::WeatherUnavailable("response carried no condition".to_string())
            })?;

        Ok(WeatherReport {
            condition,
            temperature_c: body.main.temp,
        })
    }
}
