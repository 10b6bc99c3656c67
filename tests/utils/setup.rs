use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use scopa::game::{Move, PlayerView};
use scopa::stats::{InMemoryScoreboardRepository, ScoreboardRepository};
use scopa::{router, AppState, EventBus, MatchService};

use super::bot::choose;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub service: Arc<MatchService>,
    pub scoreboard: Arc<dyn ScoreboardRepository>,
    pub app: Router,
}

pub struct TestSetupBuilder {
    seed: u64,
    scoreboard: Option<Arc<dyn ScoreboardRepository>>,
    static_dir: PathBuf,
}

#[allow(dead_code)]
impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            seed: 1,
            scoreboard: None,
            static_dir: PathBuf::from("web"),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_scoreboard(mut self, scoreboard: Arc<dyn ScoreboardRepository>) -> Self {
        self.scoreboard = Some(scoreboard);
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    pub fn build(self) -> TestSetup {
        let scoreboard = self
            .scoreboard
            .unwrap_or_else(|| Arc::new(InMemoryScoreboardRepository::new()));
        let service = Arc::new(MatchService::new(
            Arc::clone(&scoreboard),
            EventBus::default(),
            StdRng::seed_from_u64(self.seed),
        ));
        let app = router(AppState::new(Arc::clone(&service)), &self.static_dir);

        TestSetup {
            service,
            scoreboard,
            app,
        }
    }
}

#[allow(dead_code)]
impl TestSetup {
    /// Seats both players and returns the match id.
    pub async fn start(&self, a: &str, b: &str) -> i64 {
        let joined = self.service.join(None, a).await.unwrap();
        self.service.join(None, b).await.unwrap();
        joined.match_id
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    /// Posts `mv` to `/take` or `/drop`.
    pub async fn post_move(&self, mv: &Move) -> (StatusCode, String) {
        match mv {
            Move::Take {
                player,
                card,
                table,
            } => {
                self.post_json(
                    "/take",
                    serde_json::json!({ "player": player, "card": card, "table": table }),
                )
                .await
            }
            Move::Drop { player, card } => {
                self.post_json("/drop", serde_json::json!({ "player": player, "card": card }))
                    .await
            }
        }
    }

    /// The view of whoever is to act.
    pub async fn current_view(&self, match_id: i64, anyone: &str) -> PlayerView {
        let next = self.service.view(match_id, anyone).await.unwrap().next_player;
        self.service.view(match_id, &next).await.unwrap()
    }

    /// Plays the match out over HTTP with the legal-move bot. Returns the number of moves.
    pub async fn play_out(&self, match_id: i64, anyone: &str) -> usize {
        let mut moves = 0;
        loop {
            let view = self.current_view(match_id, anyone).await;
            if view.ended {
                return moves;
            }
            let mv = choose(&view.player.name, &view.player.hand, &view.table);
            let (status, body) = self.post_move(&mv).await;
            assert_eq!(status, StatusCode::OK, "{:?} was refused: {}", mv, body);
            moves += 1;
        }
    }
}
