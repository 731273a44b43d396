//! Review Pulse API Server

use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod routes;
mod state;


use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("review_pulse_api=debug".parse()?)
                .add_directive("api=debug".parse()?)
                .add_directive("processor=info".parse()?),
        )
        .init();

    info!("📈 Starting Review Pulse API");

    // Load configuration
    let config = common::Config::from_env();
    config.validate()?;
    info!(
        "Lookback {} month(s), large dataset threshold {}, filter recomputes summaries: {}",
        config.lookback_months, config.large_dataset_threshold, config.filter_recomputes_summaries
    );

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(&config));

    let app = routes::router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    info!("🚀 Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
