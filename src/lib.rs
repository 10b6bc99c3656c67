// Library crate for the Scopa game server
// This file exposes the public API for the binary and integration tests

pub mod autoreload;
pub mod config;
pub mod event;
pub mod game;
pub mod room;
pub mod shared;
pub mod stats;
pub mod websockets;

use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

// Re-export commonly used types for easier access in tests
pub use event::{EventBus, MatchEvent};
pub use game::{Card, Game, Move, MoveError, Suit};
pub use room::MatchService;
pub use shared::{AppError, AppState};
pub use websockets::{MessageType, WebSocketMessage};

/// All of the server's routes. Anything not matched is served from `static_dir`.
pub fn router(app_state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/matchID", get(room::match_id))
        .route("/newMatch", post(room::new_match))
        .route("/reset", post(room::reset))
        .route("/take", post(room::take_cards))
        .route("/drop", post(room::drop_card))
        .route("/debug", get(room::debug))
        .route("/join", get(websockets::websocket_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
