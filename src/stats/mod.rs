mod errors;
pub mod models;
pub mod repository;

pub use errors::ScoreboardError;
pub use models::{match_points, scorekey, Scoreboard, Scorecard};
pub use repository::{InMemoryScoreboardRepository, JsonFileScoreboardRepository, ScoreboardRepository};
