use serde::{Deserialize, Serialize};

use super::cards::Card;
use super::logic::{Game, GameError, Move, Player};
use super::scoring::Award;

/// What everybody can see about a player: no hand contents, just its size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPlayer {
    pub name: String,
    pub hand_size: usize,
    pub grabbed: Vec<Card>,
    pub scopas: u32,
    pub awards: Vec<Award>,
}

impl From<&Player> for PublicPlayer {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            hand_size: player.hand.len(),
            grabbed: player.grabbed.clone(),
            scopas: player.scopas,
            awards: player.awards.clone(),
        }
    }
}

/// The game as seen by one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub next_player: String,
    pub last_player_to_take: Option<String>,
    pub table: Vec<Card>,
    pub players: Vec<PublicPlayer>,
    pub player: Player,
    pub last_move: Option<Move>,
    pub deck_size: usize,
    pub ended: bool,
}

impl Game {
    pub fn view_for(&self, name: &str) -> Result<PlayerView, GameError> {
        let player = self.player(name)?.clone();

        Ok(PlayerView {
            next_player: self.current_player().name.clone(),
            last_player_to_take: self.last_capturer().map(|p| p.name.clone()),
            table: self.table().to_vec(),
            players: self.players().iter().map(PublicPlayer::from).collect(),
            player,
            last_move: self.last_move().cloned(),
            deck_size: self.deck().len(),
            ended: self.ended(),
        })
    }
}
