use serde::{Deserialize, Serialize};

/// Things that have happened to a match.
///
/// Events carry no game state; subscribers read the state they are allowed to see from the
/// match itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Both seats are filled and the cards are dealt
    GameStarted,

    /// A move was applied
    StateChanged,

    /// The match was thrown away in favour of a new one
    MatchReset { new_match_id: i64 },
}

impl MatchEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            MatchEvent::GameStarted => "game_started",
            MatchEvent::StateChanged => "state_changed",
            MatchEvent::MatchReset { .. } => "match_reset",
        }
    }
}
