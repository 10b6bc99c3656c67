use axum::{
    extract::{Query, State, WebSocketUpgrade},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, instrument, warn};

use crate::event::MatchEvent;
use crate::room::{JoinedMatch, MatchService};
use crate::shared::AppState;

use super::messages::WebSocketMessage;
use super::socket::{SocketError, SocketWrapper};

/// Query string of `/join`. Browsers send `null` or `undefined` for a match id they
/// don't have yet.
#[derive(Debug, Default, Deserialize)]
pub struct JoinParams {
    pub match_id: Option<String>,
    pub nickname: Option<String>,
}

impl JoinParams {
    fn match_id(&self) -> Result<Option<i64>, String> {
        match self.match_id.as_deref() {
            None | Some("") | Some("null") | Some("undefined") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|e| format!("match_id has an invalid value: {}", e)),
        }
    }
}

/// WebSocket endpoint players join a match through
///
/// GET /join?match_id=&nickname=
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<JoinParams>,
    State(app_state): State<AppState>,
) -> Response {
    info!(
        nickname = ?params.nickname,
        match_id = ?params.match_id,
        "WebSocket connection requested"
    );

    let service = Arc::clone(&app_state.match_service);
    ws.on_upgrade(move |mut socket| async move {
        let nickname = params.nickname.clone().unwrap_or_default();
        match run_session(&mut socket, service, params).await {
            Ok(()) => info!(nickname = %nickname, "WebSocket connection closed cleanly"),
            Err(e) => warn!(nickname = %nickname, error = %e, "WebSocket connection error"),
        }
    })
}

/// Drives one player's connection: join, wait for the deal, then push that player's view
/// after every change until the match is reset or the client goes away.
#[instrument(skip(socket, service))]
pub async fn run_session<S>(
    socket: &mut S,
    service: Arc<MatchService>,
    params: JoinParams,
) -> Result<(), SocketError>
where
    S: SocketWrapper + ?Sized,
{
    let match_id = match params.match_id() {
        Ok(id) => id,
        Err(message) => return reject(socket, message).await,
    };
    let nickname = params.nickname.unwrap_or_default();

    let mut joined = match service.join(match_id, &nickname).await {
        Ok(joined) => joined,
        Err(e) => return reject(socket, e.to_string()).await,
    };
    let match_id = joined.match_id;
    send(socket, WebSocketMessage::match_joined(match_id)).await?;

    if let Some(new_match_id) = wait_for_start(socket, &mut joined).await? {
        return reset(socket, new_match_id).await;
    }

    let started = match service.started_match(match_id).await {
        Ok(started) => started,
        Err(e) => return reject(socket, e.to_string()).await,
    };
    send(
        socket,
        WebSocketMessage::game_started(started.nicknames, started.scorecard),
    )
    .await?;

    let mut push_state = true;
    loop {
        if push_state {
            match service.view(match_id, &nickname).await {
                Ok(view) => send(socket, WebSocketMessage::state(&view)).await?,
                Err(e) => return reject(socket, e.to_string()).await,
            }
        }

        tokio::select! {
            event = joined.events.recv() => {
                match event {
                    Ok(MatchEvent::MatchReset { new_match_id }) => {
                        return reset(socket, new_match_id).await;
                    }
                    // Already reflected in the first state push.
                    Ok(MatchEvent::GameStarted) => push_state = false,
                    Ok(MatchEvent::StateChanged) => push_state = true,
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped = skipped, "Session lagged behind match events");
                        push_state = true;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            msg = socket.receive_message() => {
                match msg? {
                    Some(text) => {
                        debug!(nickname = %nickname, message = %text, "Ignoring client message");
                        push_state = false;
                    }
                    None => return Ok(()),
                }
            }
        }
    }

    if let Err(e) = socket.close().await {
        debug!(nickname = %nickname, error = %e, "Couldn't close the socket");
    }
    Ok(())
}

/// Blocks until the match is dealt. Returns the new match id if the match was reset while
/// waiting, `None` once the game has started.
async fn wait_for_start<S>(
    socket: &mut S,
    joined: &mut JoinedMatch,
) -> Result<Option<i64>, SocketError>
where
    S: SocketWrapper + ?Sized,
{
    loop {
        let started = *joined.started.borrow_and_update();
        if started {
            return Ok(None);
        }

        tokio::select! {
            changed = joined.started.changed() => {
                if changed.is_err() {
                    // The match was replaced, its reset event says by what.
                    return match joined.events.recv().await {
                        Ok(MatchEvent::MatchReset { new_match_id }) => Ok(Some(new_match_id)),
                        _ => Err(SocketError::ConnectionClosed),
                    };
                }
            }
            event = joined.events.recv() => {
                if let Ok(MatchEvent::MatchReset { new_match_id }) = event {
                    return Ok(Some(new_match_id));
                }
            }
            msg = socket.receive_message() => {
                if msg?.is_none() {
                    return Err(SocketError::ConnectionClosed);
                }
            }
        }
    }
}

async fn send<S>(
    socket: &mut S,
    message: serde_json::Result<WebSocketMessage>,
) -> Result<(), SocketError>
where
    S: SocketWrapper + ?Sized,
{
    let json = message
        .and_then(|m| m.to_json())
        .map_err(|e| SocketError::SendFailed(e.to_string()))?;
    socket.send_message(json).await
}

async fn reject<S>(socket: &mut S, message: String) -> Result<(), SocketError>
where
    S: SocketWrapper + ?Sized,
{
    warn!(error = %message, "Rejecting player");
    send(socket, WebSocketMessage::error(message)).await?;
    socket.close().await
}

async fn reset<S>(socket: &mut S, new_match_id: i64) -> Result<(), SocketError>
where
    S: SocketWrapper + ?Sized,
{
    send(socket, WebSocketMessage::match_reset(new_match_id)).await?;
    socket.close().await
}
