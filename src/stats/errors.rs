use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreboardError {
    #[error("Couldn't write scoreboard to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Couldn't convert scoreboard to json: {0}")]
    Serialization(#[from] serde_json::Error),
}
