use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::game::PlayerView;

/// Message types for WebSocket communication (server -> client)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    MatchJoined,
    GameStarted,
    State,
    MatchReset,
    Error,
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub payload: serde_json::Value,
    pub meta: Option<WebSocketMessageMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchJoinedPayload {
    pub match_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStartedPayload {
    /// Nicknames in turn order
    pub nicknames: Vec<String>,
    /// Cumulative score of each nickname over the pair's previous matches
    pub scorecard: HashMap<String, i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResetPayload {
    pub new_match_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new<T: Serialize>(message_type: MessageType, payload: T) -> serde_json::Result<Self> {
        Ok(Self {
            message_type,
            payload: serde_json::to_value(payload)?,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
            }),
        })
    }

    /// Create a MATCH_JOINED message
    pub fn match_joined(match_id: i64) -> serde_json::Result<Self> {
        Self::new(MessageType::MatchJoined, MatchJoinedPayload { match_id })
    }

    /// Create a GAME_STARTED message
    pub fn game_started(
        nicknames: Vec<String>,
        scorecard: HashMap<String, i32>,
    ) -> serde_json::Result<Self> {
        Self::new(
            MessageType::GameStarted,
            GameStartedPayload {
                nicknames,
                scorecard,
            },
        )
    }

    /// Create a STATE message carrying one player's view of the game
    pub fn state(view: &PlayerView) -> serde_json::Result<Self> {
        Self::new(MessageType::State, view)
    }

    /// Create a MATCH_RESET message
    pub fn match_reset(new_match_id: i64) -> serde_json::Result<Self> {
        Self::new(MessageType::MatchReset, MatchResetPayload { new_match_id })
    }

    /// Create an ERROR message
    pub fn error(message: impl Into<String>) -> serde_json::Result<Self> {
        Self::new(
            MessageType::Error,
            ErrorPayload {
                message: message.into(),
            },
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
