// Public API - what other modules can use
pub use handlers::{debug, drop_card, match_id, new_match, reset, take_cards};
pub use models::{Match, MAX_SEATS};
pub use service::{JoinedMatch, MatchService};
pub use types::StartedMatch;

// Internal modules
mod handlers;
mod models;
mod service;
mod types;
