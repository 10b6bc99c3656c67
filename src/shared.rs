use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::game::MoveError;
use crate::room::MatchService;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub match_service: Arc<MatchService>,
}

impl AppState {
    pub fn new(match_service: Arc<MatchService>) -> Self {
        Self { match_service }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not your turn!")]
    NotYourTurn,

    #[error(transparent)]
    InvalidMove(#[from] MoveError),

    #[error("{0}")]
    JoinRejected(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotYourTurn => (StatusCode::BAD_REQUEST, "Not your turn!".to_string()),
            // Move errors are written for the player and go out verbatim.
            AppError::InvalidMove(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::JoinRejected(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
