use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument};

use super::types::{DropRequest, MatchIdResponse, NewMatchRequest, TakeRequest};
use crate::shared::{AppError, AppState};

/// HTTP handler for the id of the match being played
///
/// GET /matchID
#[instrument(name = "match_id", skip(state))]
pub async fn match_id(State(state): State<AppState>) -> Json<MatchIdResponse> {
    let match_id = state.match_service.match_id().await;
    Json(MatchIdResponse { match_id })
}

/// HTTP handler for starting the next match
///
/// POST /newMatch
/// Creates a new match only if `old_match_id` is still the current one
#[instrument(name = "new_match", skip(state))]
pub async fn new_match(
    State(state): State<AppState>,
    Json(request): Json<NewMatchRequest>,
) -> Json<MatchIdResponse> {
    let match_id = state.match_service.new_match(request.old_match_id).await;
    Json(MatchIdResponse { match_id })
}

/// HTTP handler for throwing away the current match, no questions asked
///
/// POST /reset
#[instrument(name = "reset", skip(state))]
pub async fn reset(State(state): State<AppState>) -> Json<MatchIdResponse> {
    let match_id = state.match_service.reset().await;
    Json(MatchIdResponse { match_id })
}

/// HTTP handler for capturing cards
///
/// POST /take
#[instrument(name = "take", skip(state))]
pub async fn take_cards(
    State(state): State<AppState>,
    Json(request): Json<TakeRequest>,
) -> Result<StatusCode, AppError> {
    state
        .match_service
        .take_cards(&request.player, request.card, request.table)
        .await?;

    info!(player = %request.player, "Take applied");
    Ok(StatusCode::OK)
}

/// HTTP handler for dropping a card on the table
///
/// POST /drop
#[instrument(name = "drop", skip(state))]
pub async fn drop_card(
    State(state): State<AppState>,
    Json(request): Json<DropRequest>,
) -> Result<StatusCode, AppError> {
    state
        .match_service
        .drop_card(&request.player, request.card)
        .await?;

    info!(player = %request.player, "Drop applied");
    Ok(StatusCode::OK)
}

/// GET /debug
pub async fn debug(State(state): State<AppState>) -> String {
    state.match_service.debug().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use crate::shared::AppState;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/matchID", get(match_id))
            .route("/newMatch", post(new_match))
            .route("/reset", post(reset))
            .route("/take", post(take_cards))
            .route("/drop", post(drop_card))
            .route("/debug", get(debug))
            .with_state(state)
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn started_state() -> AppState {
        let state = AppStateBuilder::new().build();
        state.match_service.join(None, "alice").await.unwrap();
        state.match_service.join(None, "bob").await.unwrap();
        state
    }

    #[tokio::test]
    async fn test_match_id_handler() {
        let state = AppStateBuilder::new().build();
        let expected = state.match_service.match_id().await;

        let request = Request::builder()
            .uri("/matchID")
            .body(Body::empty())
            .unwrap();
        let response = app(state).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["match_id"], expected);
    }

    #[tokio::test]
    async fn test_new_match_handler_is_idempotent() {
        let state = AppStateBuilder::new().build();
        let old = state.match_service.match_id().await;
        let body = format!(r#"{{"old_match_id": {}}}"#, old);

        let first = app(state.clone())
            .oneshot(post_json("/newMatch", body.clone()))
            .await
            .unwrap();
        let first_id = body_json(first).await["match_id"].as_i64().unwrap();
        assert_ne!(first_id, old);

        let second = app(state)
            .oneshot(post_json("/newMatch", body))
            .await
            .unwrap();
        assert_eq!(body_json(second).await["match_id"], first_id);
    }

    #[tokio::test]
    async fn test_drop_handler() {
        let state = started_state().await;
        let match_id = state.match_service.match_id().await;
        let card = state.match_service.view(match_id, "alice").await.unwrap().player.hand[0];

        let body = serde_json::json!({ "player": "alice", "card": card }).to_string();
        let response = app(state.clone())
            .oneshot(post_json("/drop", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let view = state.match_service.view(match_id, "alice").await.unwrap();
        assert!(view.table.contains(&card));
        assert_eq!(view.next_player, "bob");
    }

    #[tokio::test]
    async fn test_drop_handler_not_your_turn() {
        let state = started_state().await;
        let match_id = state.match_service.match_id().await;
        let card = state.match_service.view(match_id, "bob").await.unwrap().player.hand[0];

        let body = serde_json::json!({ "player": "bob", "card": card }).to_string();
        let response = app(state).oneshot(post_json("/drop", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Not your turn!");
    }

    #[tokio::test]
    async fn test_take_handler_bad_math() {
        let state = started_state().await;
        let match_id = state.match_service.match_id().await;
        let card = state.match_service.view(match_id, "alice").await.unwrap().player.hand[0];

        let body =
            serde_json::json!({ "player": "alice", "card": card, "table": [] }).to_string();
        let response = app(state).oneshot(post_json("/take", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = body_json(response).await["error"].as_str().unwrap().to_string();
        assert_eq!(error, format!("{} can't take []", card));
    }

    #[tokio::test]
    async fn test_take_handler_rejects_unknown_card_values() {
        let state = started_state().await;

        let body = r#"{"player": "alice", "card": {"suit": "Coppe", "value": 11}, "table": []}"#;
        let response = app(state)
            .oneshot(post_json("/take", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_take_handler_malformed_json() {
        let state = started_state().await;
        let response = app(state)
            .oneshot(post_json("/take", r#"{"player": "alice""#.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_debug_handler() {
        let state = started_state().await;
        let request = Request::builder().uri("/debug").body(Body::empty()).unwrap();
        let response = app(state).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("alice"));
    }
}
