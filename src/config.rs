use clap::Parser;
use std::path::PathBuf;

/// Command line configuration for the Scopa server
#[derive(Debug, Clone, Parser)]
#[command(name = "scopa", about = "Two player Scopa server", version)]
pub struct ServerConfig {
    /// The port to listen on for http requests
    #[arg(long, default_value_t = 8080)]
    pub http_port: u16,

    /// Seed the shuffler from the wall clock instead of `--seed`
    #[arg(long)]
    pub random: bool,

    /// Seed used when `--random` is not set, for reproducible games
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// The file to read and write scopa scores to
    #[arg(long, default_value = "scoreboard.json")]
    pub scoreboard_file: PathBuf,

    /// Directory of static client files served at `/`
    #[arg(long, default_value = "web")]
    pub static_dir: PathBuf,

    /// Restart with the new binary when the running executable is replaced
    #[arg(long)]
    pub autoreload: bool,
}

impl ServerConfig {
    /// The seed the process-wide shuffler starts from.
    pub fn rng_seed(&self) -> u64 {
        if self.random {
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
        } else {
            self.seed
        }
    }
}

/// Version string baked in at build time with `GIT_COMMIT=$(git rev-parse HEAD) cargo build`.
pub fn build_version() -> &'static str {
    option_env!("GIT_COMMIT").unwrap_or("")
}
