use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::game::Card;

/// Response carrying the id of the current match
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchIdResponse {
    pub match_id: i64,
}

/// Request payload for starting over. Only acts when `old_match_id` is still current,
/// so two clients asking at once start a single new match.
#[derive(Debug, Deserialize)]
pub struct NewMatchRequest {
    pub old_match_id: i64,
}

/// Request payload for capturing cards from the table
#[derive(Debug, Deserialize)]
pub struct TakeRequest {
    pub player: String,
    pub card: Card,
    pub table: Vec<Card>,
}

/// Request payload for dropping a card on the table
#[derive(Debug, Deserialize)]
pub struct DropRequest {
    pub player: String,
    pub card: Card,
}

/// Who is playing, in turn order, and their record against each other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartedMatch {
    pub nicknames: Vec<String>,
    pub scorecard: HashMap<String, i32>,
}
