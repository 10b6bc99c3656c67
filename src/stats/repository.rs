use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{models::Scoreboard, ScoreboardError};

#[async_trait]
pub trait ScoreboardRepository: Send + Sync {
    async fn scores(&self, a: &str, b: &str) -> HashMap<String, i32>;
    async fn next_player(&self, a: &str, b: &str) -> String;
    async fn record(&self, a: &str, b: &str, a_score: i32, b_score: i32)
        -> Result<(), ScoreboardError>;
}

#[derive(Debug, Default)]
pub struct InMemoryScoreboardRepository {
    board: RwLock<Scoreboard>,
}

impl InMemoryScoreboardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScoreboardRepository for InMemoryScoreboardRepository {
    async fn scores(&self, a: &str, b: &str) -> HashMap<String, i32> {
        self.board.read().await.scores(a, b)
    }

    async fn next_player(&self, a: &str, b: &str) -> String {
        self.board.read().await.next_player(a, b)
    }

    async fn record(
        &self,
        a: &str,
        b: &str,
        a_score: i32,
        b_score: i32,
    ) -> Result<(), ScoreboardError> {
        self.board.write().await.record(a, b, a_score, b_score);
        Ok(())
    }
}

/// Scoreboard kept in memory and rewritten to a JSON file after every recorded match.
#[derive(Debug)]
pub struct JsonFileScoreboardRepository {
    path: PathBuf,
    board: RwLock<Scoreboard>,
}

impl JsonFileScoreboardRepository {
    /// Loads the scoreboard at `path`. A missing or unreadable file starts an empty board.
    pub async fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        let board = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Scoreboard>(&bytes) {
                Ok(board) => {
                    info!(path = %path.display(), pairs = board.len(), "Loaded scoreboard");
                    board
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Couldn't parse scoreboard json");
                    Scoreboard::new()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Couldn't read scoreboard");
                Scoreboard::new()
            }
        };

        Self {
            path,
            board: RwLock::new(board),
        }
    }

    async fn save(&self, board: &Scoreboard) -> Result<(), ScoreboardError> {
        let bytes = serde_json::to_vec(board)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|source| ScoreboardError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        debug!(path = %self.path.display(), "Saved scoreboard");
        Ok(())
    }
}

#[async_trait]
impl ScoreboardRepository for JsonFileScoreboardRepository {
    async fn scores(&self, a: &str, b: &str) -> HashMap<String, i32> {
        self.board.read().await.scores(a, b)
    }

    async fn next_player(&self, a: &str, b: &str) -> String {
        self.board.read().await.next_player(a, b)
    }

    async fn record(
        &self,
        a: &str,
        b: &str,
        a_score: i32,
        b_score: i32,
    ) -> Result<(), ScoreboardError> {
        let mut board = self.board.write().await;
        board.record(a, b, a_score, b_score);
        self.save(&board).await
    }
}
