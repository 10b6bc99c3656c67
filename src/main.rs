use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scopa::config::{build_version, ServerConfig};
use scopa::stats::JsonFileScoreboardRepository;
use scopa::{autoreload, router, AppState, EventBus, MatchService};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scopa=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    info!(version = build_version(), ?config, "Starting Scopa server");

    if config.autoreload {
        autoreload::spawn();
    }

    let scoreboard = Arc::new(JsonFileScoreboardRepository::open(&config.scoreboard_file).await);
    let rng = StdRng::seed_from_u64(config.rng_seed());
    let match_service = Arc::new(MatchService::new(scoreboard, EventBus::default(), rng));
    let app_state = AppState::new(match_service);

    let app = router(app_state, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %addr, error = %e, "Couldn't bind");
            std::process::exit(1);
        }
    };
    info!("Server running on http://localhost:{}", config.http_port);
    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server stopped");
        std::process::exit(1);
    }
}
