use rand::Rng;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::game::{Game, Move, MoveError};

/// A Scopa match is always played heads up.
pub const MAX_SEATS: usize = 2;

/// The server's one live match: who is seated, the game once it is dealt, and a log of
/// every move attempt for `/debug`.
#[derive(Debug)]
pub struct Match {
    pub id: i64,
    seats: Vec<String>,
    game: Option<Game>,
    logs: Vec<String>,
    started: watch::Sender<bool>,
}

/// Why a move couldn't be applied to a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    NotStarted,
    NotYourTurn,
    Rejected(MoveError),
}

impl Match {
    pub fn new(id: i64) -> Self {
        let (started, _) = watch::channel(false);
        Self {
            id,
            seats: Vec::with_capacity(MAX_SEATS),
            game: None,
            logs: vec![],
            started,
        }
    }

    pub fn seats(&self) -> &[String] {
        &self.seats
    }

    pub fn is_seated(&self, nickname: &str) -> bool {
        self.seats.iter().any(|s| s == nickname)
    }

    pub fn is_full(&self) -> bool {
        self.seats.len() >= MAX_SEATS
    }

    pub fn seat(&mut self, nickname: &str) {
        if !self.is_seated(nickname) {
            self.seats.push(nickname.to_string());
        }
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
    }

    /// Resolves to `true` once the cards are dealt. The sender goes away with the match,
    /// so waiters on a reset match see the channel close.
    pub fn started(&self) -> watch::Receiver<bool> {
        self.started.subscribe()
    }

    /// Deals the game with `first` to act, then wakes everyone waiting on [`Match::started`].
    pub fn start<R: Rng + ?Sized>(&mut self, first: &str, rng: &mut R) {
        if let Some(pos) = self.seats.iter().position(|s| s == first) {
            self.seats.swap(0, pos);
        }

        let game = Game::new_game(&self.seats, rng);
        self.log(format!("state: {:?}", game));
        self.game = Some(game);
        self.started.send_replace(true);

        info!(match_id = self.id, players = ?self.seats, "Match started");
    }

    /// Applies `mv` for the player named in it, logging the attempt and its outcome.
    pub fn play(&mut self, mv: &Move) -> Result<(), PlayError> {
        let Some(game) = self.game.as_mut() else {
            return Err(PlayError::NotStarted);
        };

        if game.current_player().name != mv.player() {
            return Err(PlayError::NotYourTurn);
        }

        self.logs.push(format!("state: {:?}", game));
        let result = match mv {
            Move::Take { card, table, .. } => game.take(*card, table),
            Move::Drop { card, .. } => game.drop(*card),
        };

        match result {
            Ok(()) => {
                self.logs.push(format!("{:?}", mv));
                Ok(())
            }
            Err(e) => {
                debug!(match_id = self.id, error = %e, "Move rejected");
                self.logs.push(format!("FAIL {:?}: {}", mv, e));
                Err(PlayError::Rejected(e))
            }
        }
    }
}
