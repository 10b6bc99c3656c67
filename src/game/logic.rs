// A Game is one Scopa match between two players.
//
// The game owns every one of the 40 cards at all times: each card is in exactly one of
// the draw pile, the table, a player's hand or a player's grabbed pile.
//
// Moves are validated completely before anything is mutated, so a rejected move leaves
// the game exactly as it was.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::game::cards::{format_cards, new_deck, shuffle, Card, DECK_SIZE};
use crate::game::scoring::{apply_awards, Award};

pub const TABLE_SIZE: usize = 4;
pub const HAND_SIZE: usize = 3;

/// The deal is thrown away when more Re's than this land on the table.
pub const MAX_TENS_ON_TABLE: usize = 2;

/// Whether a freshly dealt table can be played, or the deal must be thrown away.
pub(crate) fn acceptable_table(table: &[Card]) -> bool {
    table.iter().filter(|c| c.value == 10).count() <= MAX_TENS_ON_TABLE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub hand: Vec<Card>,
    pub grabbed: Vec<Card>,
    pub scopas: u32,
    pub awards: Vec<Award>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: vec![],
            grabbed: vec![],
            scopas: 0,
            awards: vec![],
        }
    }

    pub fn holds(&self, card: &Card) -> bool {
        self.hand.contains(card)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Move {
    Drop {
        player: String,
        card: Card,
    },
    Take {
        player: String,
        card: Card,
        table: Vec<Card>,
    },
}

impl Move {
    /// Nickname of the player making the move.
    pub fn player(&self) -> &str {
        match self {
            Move::Drop { player, .. } | Move::Take { player, .. } => player,
        }
    }
}

/// A rule violation caused by the player's chosen move. Safe to show to the player.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("{card} can't take {}", format_cards(.taken))]
    BadMath { card: Card, taken: Vec<Card> },
    #[error("{card} is not a card on the table {}", format_cards(.table))]
    NotOnTable { card: Card, table: Vec<Card> },
    #[error("Player {player} doesn't have {card} in their hand: {}", format_cards(.hand))]
    CardNotHeld {
        player: String,
        card: Card,
        hand: Vec<Card>,
    },
    #[error("You gotta take {0}")]
    MustTakeFace(Card),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("{0} isn't a player in this game")]
    UnknownPlayer(String),
    #[error("Failed 40 card check: {0}")]
    CardConservation(String),
    #[error("Player index {0} is out of range")]
    InvalidPlayerIndex(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    players: Vec<Player>, // The first player in the list starts
    current_turn: usize,  // The index of the player who is to act
    last_capturer: Option<usize>,
    deck: Vec<Card>,
    table: Vec<Card>,
    last_move: Option<Move>,
}

impl Game {
    /// Builds a game from explicit parts. Used to resume or to set up specific positions.
    pub fn new(players: Vec<Player>, current_turn: usize, deck: Vec<Card>, table: Vec<Card>) -> Self {
        Self {
            players,
            current_turn,
            last_capturer: None,
            deck,
            table,
            last_move: None,
        }
    }

    /// Shuffles and deals a new game for the given players, who play in the order given.
    ///
    /// Deals are repeated with a fresh shuffle until at most two Re's are face up on the
    /// table.
    ///
    /// # Panics
    ///
    /// Panics when fewer than two players are supplied.
    pub fn new_game<R: Rng + ?Sized>(player_names: &[String], rng: &mut R) -> Self {
        assert!(
            player_names.len() >= 2,
            "Scopa needs at least two players, got {}",
            player_names.len()
        );

        let mut attempts = 0;
        loop {
            attempts += 1;
            let mut cards = new_deck();
            shuffle(&mut cards, rng);

            let (players, table, deck) = Self::deal(player_names, cards);
            if acceptable_table(&table) {
                info!(
                    players = ?player_names,
                    attempts = attempts,
                    "Dealt a new game"
                );
                return Self::new(players, 0, deck, table);
            }

            debug!(table = %format_cards(&table), "Too many Re's on the table, reshuffling");
        }
    }

    // One card to the table, then three rounds of one card to each player followed by
    // one to the table. Whatever is left becomes the draw pile.
    pub(crate) fn deal(
        player_names: &[String],
        cards: Vec<Card>,
    ) -> (Vec<Player>, Vec<Card>, Vec<Card>) {
        let mut cards = cards.into_iter();
        let mut players: Vec<Player> = player_names.iter().map(Player::new).collect();
        let mut table = Vec::with_capacity(TABLE_SIZE);

        table.extend(cards.next());
        for _ in 0..HAND_SIZE {
            for player in players.iter_mut() {
                player.hand.extend(cards.next());
            }
            table.extend(cards.next());
        }

        (players, table, cards.collect())
    }

    /// Captures `taken` from the table with `card` from the current player's hand.
    pub fn take(&mut self, card: Card, taken: &[Card]) -> Result<(), MoveError> {
        let sum: u32 = taken.iter().map(|c| c.value as u32).sum();
        if sum != card.value as u32 {
            return Err(MoveError::BadMath {
                card,
                taken: taken.to_vec(),
            });
        }

        // Claim each taken card out of a copy of the table so a card can't be claimed twice.
        let mut remaining = self.table.clone();
        for t in taken {
            match remaining.iter().position(|c| c == t) {
                Some(pos) => {
                    remaining.remove(pos);
                }
                None => {
                    return Err(MoveError::NotOnTable {
                        card: *t,
                        table: self.table.clone(),
                    })
                }
            }
        }

        self.ensure_current_player_holds(&card)?;

        // A face card has to take a matching face directly instead of a sum.
        if card.is_face() && taken.len() > 1 {
            if let Some(face) = self
                .table
                .iter()
                .find(|t| t.value == card.value && !taken.contains(t))
            {
                return Err(MoveError::MustTakeFace(*face));
            }
        }

        let current = self.current_turn;
        let player = &mut self.players[current];
        player.hand.retain(|c| *c != card);
        player.grabbed.push(card);
        player.grabbed.extend_from_slice(taken);
        self.table = remaining;

        if self.table.is_empty() {
            player.scopas += 1;
            info!(player = %player.name, scopas = player.scopas, "Scopa!");
        }

        debug!(player = %player.name, card = %card, taken = %format_cards(taken), "Take");
        self.last_move = Some(Move::Take {
            player: player.name.clone(),
            card,
            table: taken.to_vec(),
        });
        self.last_capturer = Some(current);
        self.end_turn();
        Ok(())
    }

    /// Plays `card` from the current player's hand onto the table.
    pub fn drop(&mut self, card: Card) -> Result<(), MoveError> {
        self.ensure_current_player_holds(&card)?;

        let player = &mut self.players[self.current_turn];
        player.hand.retain(|c| *c != card);
        self.table.push(card);

        debug!(player = %player.name, card = %card, "Drop");
        self.last_move = Some(Move::Drop {
            player: player.name.clone(),
            card,
        });
        self.end_turn();
        Ok(())
    }

    fn ensure_current_player_holds(&self, card: &Card) -> Result<(), MoveError> {
        let player = self.current_player();
        if player.holds(card) {
            Ok(())
        } else {
            Err(MoveError::CardNotHeld {
                player: player.name.clone(),
                card: *card,
                hand: player.hand.clone(),
            })
        }
    }

    fn end_turn(&mut self) {
        self.current_turn = (self.current_turn + 1) % self.players.len();

        if self.ended() {
            self.finish();
            return;
        }

        if self.hands_empty() {
            self.redeal();
        }
    }

    // The last player to capture sweeps whatever is left, then the awards are decided.
    fn finish(&mut self) {
        match self.last_capturer {
            Some(index) => {
                let count = self.players.len();
                let Some(player) = self.players.get_mut(index) else {
                    panic!(
                        "last capturer index {} is not one of the {} players",
                        index, count
                    );
                };
                player.grabbed.append(&mut self.table);
            }
            None => {
                warn!(
                    table = %format_cards(&self.table),
                    "Game ended without a single capture, leaving the table in place"
                );
            }
        }

        apply_awards(&mut self.players);

        info!(
            results = ?self
                .players
                .iter()
                .map(|p| (p.name.as_str(), p.awards.len(), p.scopas))
                .collect::<Vec<_>>(),
            "Game ended"
        );
    }

    fn redeal(&mut self) {
        for player in self.players.iter_mut() {
            let n = HAND_SIZE.min(self.deck.len());
            player.hand = self.deck.drain(..n).collect();
        }
        debug!(remaining = self.deck.len(), "Dealt new hands");
    }

    fn hands_empty(&self) -> bool {
        self.players.iter().all(|p| p.hand.is_empty())
    }

    /// True once the draw pile and every hand are empty. The game is then final.
    pub fn ended(&self) -> bool {
        self.deck.is_empty() && self.hands_empty()
    }

    /// Verifies that the 40 cards are all accounted for exactly once and the indices
    /// are in range.
    pub fn check_invariants(&self) -> Result<(), GameError> {
        if self.current_turn >= self.players.len() {
            return Err(GameError::InvalidPlayerIndex(self.current_turn));
        }
        if let Some(index) = self.last_capturer {
            if index >= self.players.len() {
                return Err(GameError::InvalidPlayerIndex(index));
            }
        }

        let all: Vec<Card> = self.all_cards().collect();
        if all.len() != DECK_SIZE {
            return Err(GameError::CardConservation(format!(
                "found {} cards",
                all.len()
            )));
        }

        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for card in &all {
            if !seen.insert(*card) {
                return Err(GameError::CardConservation(format!(
                    "{} appears more than once",
                    card
                )));
            }
        }

        Ok(())
    }

    fn all_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.deck
            .iter()
            .chain(self.table.iter())
            .chain(
                self.players
                    .iter()
                    .flat_map(|p| p.hand.iter().chain(p.grabbed.iter())),
            )
            .copied()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_turn]
    }

    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    pub fn last_capturer(&self) -> Option<&Player> {
        self.last_capturer.and_then(|i| self.players.get(i))
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn table(&self) -> &[Card] {
        &self.table
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }
}
