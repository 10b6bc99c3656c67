use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use super::events::MatchEvent;

/// Event bus for distributing match events to connected players
#[derive(Debug, Clone)]
pub struct EventBus {
    /// Match-specific event channels: match_id -> sender
    match_channels: Arc<RwLock<HashMap<i64, broadcast::Sender<MatchEvent>>>>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}

impl EventBus {
    /// Creates a new event bus whose per-match channels hold `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            match_channels: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Emits an event to all subscribers of a specific match
    pub async fn emit_to_match(&self, match_id: i64, event: MatchEvent) {
        let match_channels = self.match_channels.read().await;

        match match_channels.get(&match_id) {
            Some(sender) => match sender.send(event.clone()) {
                Ok(receiver_count) => {
                    debug!(
                        match_id = match_id,
                        event = event.event_type(),
                        receivers = receiver_count,
                        "Match event emitted"
                    );
                }
                Err(_) => {
                    debug!(match_id = match_id, "Match event emitted with no receivers");
                }
            },
            None => {
                // Nobody has subscribed yet, so nobody can miss it.
                debug!(match_id = match_id, "No match channel found - dropping event");
            }
        }
    }

    /// Subscribe to events for a specific match
    pub async fn subscribe_to_match(&self, match_id: i64) -> broadcast::Receiver<MatchEvent> {
        let mut match_channels = self.match_channels.write().await;
        match_channels
            .entry(match_id)
            .or_insert_with(|| {
                debug!(match_id = match_id, "Creating new match channel for subscription");
                broadcast::channel(self.capacity).0
            })
            .subscribe()
    }

    /// Drops the channel of a match that no longer exists. Subscribers see the channel close.
    pub async fn close_match(&self, match_id: i64) {
        let mut match_channels = self.match_channels.write().await;
        if match_channels.remove(&match_id).is_some() {
            debug!(match_id = match_id, "Closed match channel");
        }
    }
}
