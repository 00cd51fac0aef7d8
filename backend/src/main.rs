use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ner_gateway::config::Config;
use ner_gateway::ner::{ModelConfig, NerModel};
use ner_gateway::porter::HttpPorter;
use ner_gateway::routes;
use ner_gateway::worker::WorkerClient;
use ner_gateway::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting NER Gateway");

    // Load the model configuration once at startup
    let model_config = ModelConfig::from_file(Path::new(&config.worker.model_config_path))?;
    tracing::info!(
        "Loaded model configuration from {}",
        config.worker.model_config_path
    );

    // Initialize components
    let worker_client = WorkerClient::new(&config.worker.base_url);
    let porter = Arc::new(HttpPorter::new(
        &config.porter.base_url,
        &config.porter.container,
    ));
    let model = NerModel::new(
        worker_client,
        model_config,
        config.retry.policy(),
        porter,
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        model: RwLock::new(model),
    });

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::annotate::router(state.clone()))
        .merge(routes::train::router(state.clone()))
        .merge(routes::evaluate::router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
