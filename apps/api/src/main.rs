use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::config::Config;
use api::generation_client::{CohereClient, Generator, MODEL};
use api::routes::build_router;
use api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Evaluator API v{}", env!("CARGO_PKG_VERSION"));

    // The generation credential is checked per request, not at boot: the UI
    // and extraction endpoint keep working without it.
    let generator: Option<Arc<dyn Generator>> = match config.cohere_api_key.clone() {
        Some(key) => {
            info!("Generation client initialized (model: {MODEL})");
            Some(Arc::new(CohereClient::new(key)) as Arc<dyn Generator>)
        }
        None => {
            warn!("COHERE_API_KEY is not set; /api/analyze will report a configuration error");
            None
        }
    };

    let state = AppState {
        generator,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
