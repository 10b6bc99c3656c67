use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::{broadcast, watch, Mutex};
use tracing::{debug, error, info, instrument, warn};

use super::{
    models::{Match, PlayError},
    types::StartedMatch,
};
use crate::config::build_version;
use crate::event::{EventBus, MatchEvent};
use crate::game::{Card, Move, PlayerView};
use crate::shared::AppError;
use crate::stats::{match_points, ScoreboardRepository};

/// What a player gets back from joining: the match they are in, a signal for when the
/// cards are dealt, and the match's event stream.
#[derive(Debug)]
pub struct JoinedMatch {
    pub match_id: i64,
    pub started: watch::Receiver<bool>,
    pub events: broadcast::Receiver<MatchEvent>,
}

struct MatchState {
    current: Match,
    rng: StdRng,
}

/// Service for coordinating the current match between the two connected players
pub struct MatchService {
    state: Mutex<MatchState>,
    scoreboard: Arc<dyn ScoreboardRepository>,
    event_bus: EventBus,
}

impl MatchService {
    pub fn new(
        scoreboard: Arc<dyn ScoreboardRepository>,
        event_bus: EventBus,
        rng: StdRng,
    ) -> Self {
        Self {
            state: Mutex::new(MatchState {
                current: Match::new(unix_now()),
                rng,
            }),
            scoreboard,
            event_bus,
        }
    }

    /// Seats `nickname` in the current match, or reconnects them if `match_id` is the
    /// current match and they already hold a seat. Filling the second seat deals the game.
    #[instrument(skip(self))]
    pub async fn join(
        &self,
        match_id: Option<i64>,
        nickname: &str,
    ) -> Result<JoinedMatch, AppError> {
        if nickname.is_empty() {
            return Err(AppError::BadRequest(
                "Nickname field needs to be set.".to_string(),
            ));
        }

        let mut guard = self.state.lock().await;
        let MatchState { current, rng } = &mut *guard;

        if match_id == Some(current.id) && current.is_seated(nickname) {
            info!(match_id = current.id, nickname = %nickname, "Player reconnected");
            return Ok(self.joined(current).await);
        }

        if current.is_full() {
            return Err(AppError::JoinRejected("match is full".to_string()));
        }
        if current.is_seated(nickname) {
            return Err(AppError::JoinRejected(format!(
                "nickname {} is already taken",
                nickname
            )));
        }

        current.seat(nickname);
        info!(
            match_id = current.id,
            nickname = %nickname,
            seats = current.seats().len(),
            "Player joined"
        );
        let joined = self.joined(current).await;

        if current.is_full() {
            let (a, b) = (&current.seats()[0], &current.seats()[1]);
            let first = self.scoreboard.next_player(a, b).await;
            current.start(&first, rng);
            self.event_bus
                .emit_to_match(current.id, MatchEvent::GameStarted)
                .await;
        }

        Ok(joined)
    }

    async fn joined(&self, current: &Match) -> JoinedMatch {
        JoinedMatch {
            match_id: current.id,
            started: current.started(),
            events: self.event_bus.subscribe_to_match(current.id).await,
        }
    }

    #[instrument(skip(self))]
    pub async fn take_cards(
        &self,
        player: &str,
        card: Card,
        table: Vec<Card>,
    ) -> Result<(), AppError> {
        self.play(Move::Take {
            player: player.to_string(),
            card,
            table,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn drop_card(&self, player: &str, card: Card) -> Result<(), AppError> {
        self.play(Move::Drop {
            player: player.to_string(),
            card,
        })
        .await
    }

    async fn play(&self, mv: Move) -> Result<(), AppError> {
        let mut guard = self.state.lock().await;
        let current = &mut guard.current;

        current.play(&mv).map_err(|e| match e {
            PlayError::NotStarted => {
                AppError::BadRequest("The match hasn't started yet".to_string())
            }
            PlayError::NotYourTurn => AppError::NotYourTurn,
            PlayError::Rejected(e) => AppError::InvalidMove(e),
        })?;

        let Some(game) = current.game() else {
            return Err(AppError::Internal);
        };

        if let Err(e) = game.check_invariants() {
            error!(match_id = current.id, error = %e, "Game is corrupt");
        }

        if game.ended() {
            let (a, b) = (&game.players()[0], &game.players()[1]);
            let (a_points, b_points) = (match_points(a), match_points(b));
            info!(
                match_id = current.id,
                a = %a.name,
                a_points = a_points,
                b = %b.name,
                b_points = b_points,
                "Recording match result"
            );
            if let Err(e) = self
                .scoreboard
                .record(&a.name, &b.name, a_points, b_points)
                .await
            {
                error!(error = %e, "Couldn't save the scoreboard");
            }
        }

        self.event_bus
            .emit_to_match(current.id, MatchEvent::StateChanged)
            .await;
        Ok(())
    }

    /// `nickname`'s view of the game in match `match_id`.
    pub async fn view(&self, match_id: i64, nickname: &str) -> Result<PlayerView, AppError> {
        let guard = self.state.lock().await;
        let current = current_match(&guard, match_id)?;
        let game = current
            .game()
            .ok_or_else(|| AppError::BadRequest("The match hasn't started yet".to_string()))?;
        game.view_for(nickname)
            .map_err(|e| AppError::NotFound(e.to_string()))
    }

    /// Turn order and the pair's scorecard, once match `match_id` is dealt.
    pub async fn started_match(&self, match_id: i64) -> Result<StartedMatch, AppError> {
        let guard = self.state.lock().await;
        let current = current_match(&guard, match_id)?;
        let Some(game) = current.game() else {
            return Err(AppError::BadRequest(
                "The match hasn't started yet".to_string(),
            ));
        };

        let nicknames: Vec<String> = game.players().iter().map(|p| p.name.clone()).collect();
        let scorecard = self.scoreboard.scores(&nicknames[0], &nicknames[1]).await;
        Ok(StartedMatch {
            nicknames,
            scorecard,
        })
    }

    pub async fn match_id(&self) -> i64 {
        self.state.lock().await.current.id
    }

    /// Replaces the current match only if it is still `old_match_id`. Returns the id of
    /// the match that is current afterwards.
    #[instrument(skip(self))]
    pub async fn new_match(&self, old_match_id: i64) -> i64 {
        let mut guard = self.state.lock().await;
        if guard.current.id != old_match_id {
            debug!(
                current = guard.current.id,
                old_match_id = old_match_id,
                "Match was already replaced"
            );
            return guard.current.id;
        }
        self.replace_match(&mut guard).await
    }

    /// Throws the current match away no matter who is playing it.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> i64 {
        let mut guard = self.state.lock().await;
        warn!(match_id = guard.current.id, "Resetting match");
        self.replace_match(&mut guard).await
    }

    async fn replace_match(&self, state: &mut MatchState) -> i64 {
        let old_id = state.current.id;
        // Ids are seconds, two resets in the same second still need distinct ids.
        let new_id = unix_now().max(old_id + 1);
        state.current = Match::new(new_id);

        self.event_bus
            .emit_to_match(old_id, MatchEvent::MatchReset { new_match_id: new_id })
            .await;
        self.event_bus.close_match(old_id).await;

        info!(old_match_id = old_id, match_id = new_id, "New match");
        new_id
    }

    /// Plain text dump of the current match for reproducing bugs.
    pub async fn debug(&self) -> String {
        let mut out = match build_version() {
            "" => "Built with an unknown git version (GIT_COMMIT was not set)\n".to_string(),
            commit => format!("Version: git checkout {}\n", commit),
        };

        let guard = self.state.lock().await;
        out.push_str(&format!("MatchID: {}\n", guard.current.id));
        out.push_str(&format!("Players: {:?}\n", guard.current.seats()));
        for line in guard.current.logs() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

fn current_match(state: &MatchState, match_id: i64) -> Result<&Match, AppError> {
    if state.current.id == match_id {
        Ok(&state.current)
    } else {
        Err(AppError::NotFound(format!("match {} is over", match_id)))
    }
}

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
