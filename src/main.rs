use std::sync::Arc;

use signal_predictor::{
    config::ServerConfig,
    encoder::LabelEncoder,
    model::Forest,
    server::{self, AppState},
    types::N_FEATURES,
    weather::WeatherClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = ServerConfig::load()?;

    let forest = Forest::load(&cfg.model_path)?;
    let encoder = LabelEncoder::load(&cfg.encoder_path)?;
    if forest.n_features() != N_FEATURES {
        anyhow::bail!(
            "model expects {} features but the pipeline produces {}",
            forest.n_features(),
            N_FEATURES
        );
    }

    // Warmup forward so artifact problems surface before the first request
    let _ = forest.predict(&[0.0; N_FEATURES])?;
    tracing::info!(
        "loaded model: {} trees, {} features; vocabulary: {:?}",
        forest.n_trees(),
        forest.n_features(),
        encoder.classes()
    );

    let weather = match (cfg.weather_api_url, cfg.weather_api_key) {
        (Some(url), Some(key)) => Some(Arc::new(WeatherClient::new(url, key)?)),
        (None, None) => None,
        _ => {
            tracing::warn!("WEATHER_API_URL and WEATHER_API_KEY must both be set; automatic weather fetch disabled");
            None
        }
    };
    if weather.is_none() {
        tracing::info!("running in manual-entry mode: requests must carry weather_condition");
    }

    let state = AppState {
        forest: Arc::new(forest),
        encoder: Arc::new(encoder),
        weather,
    };
    let app = server::router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
