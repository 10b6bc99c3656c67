use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::game::Player;

/// What a finished game is worth on the scoreboard: one point per award plus one per
/// scopa.
pub fn match_points(player: &Player) -> i32 {
    (player.awards.len() as u32 + player.scopas) as i32
}

/// Key for a pair of players, independent of the order they are given in.
pub fn scorekey(a: &str, b: &str) -> String {
    let mut names = [a, b];
    names.sort();
    names.join("|")
}

/// Running totals for one pair of players.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub scores: HashMap<String, i32>,
    /// Who deals first in the pair's next match.
    pub next_player: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scoreboard {
    cards: HashMap<String, Scorecard>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a finished match to the pair's totals and flips who goes first.
    pub fn record(&mut self, a: &str, b: &str, a_score: i32, b_score: i32) {
        let key = scorekey(a, b);
        match self.cards.get_mut(&key) {
            None => {
                // First match between these two: b starts the next one.
                self.cards.insert(
                    key,
                    Scorecard {
                        scores: HashMap::from([(a.to_string(), a_score), (b.to_string(), b_score)]),
                        next_player: b.to_string(),
                    },
                );
            }
            Some(card) => {
                *card.scores.entry(a.to_string()).or_insert(0) += a_score;
                *card.scores.entry(b.to_string()).or_insert(0) += b_score;
                card.next_player = if card.next_player == a {
                    b.to_string()
                } else {
                    a.to_string()
                };
            }
        }
    }

    pub fn scores(&self, a: &str, b: &str) -> HashMap<String, i32> {
        self.cards
            .get(&scorekey(a, b))
            .map(|card| card.scores.clone())
            .unwrap_or_default()
    }

    /// Who should go first between `a` and `b`. Strangers: `a`.
    pub fn next_player(&self, a: &str, b: &str) -> String {
        self.cards
            .get(&scorekey(a, b))
            .map(|card| card.next_player.clone())
            .unwrap_or_else(|| a.to_string())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
