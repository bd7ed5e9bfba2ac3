//! Connection keys and viewer messages
//!
//! This module defines the key identifying a live session and the messages
//! the registry hands to the viewer relay.

use serde::Serialize;
use serde_json::json;

use crate::session::{PlayerSnapshot, RunState, SharedSnapshot};

/// Unique identifier for a client connection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionKey(String);

impl ConnectionKey {
    /// Create a new connection key
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConnectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConnectionKey {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Event name carried by run-state updates
pub const SUBMIT_EVENT: &str = "submit";

/// A message for the viewer relay
///
/// Register and unregister carry the live snapshot handle itself, so the
/// relay always reads the session's current state.
#[derive(Debug, Clone)]
pub enum ViewerMessage {
    /// A player logged in
    Register(SharedSnapshot),
    /// A player disconnected
    Unregister(SharedSnapshot),
    /// A run-state update for viewers of one player's room
    StateUpdate {
        /// Room key, the player id as a string
        room: String,
        /// Event name
        event: &'static str,
        /// Run telemetry
        payload: RunState,
    },
}

#[derive(Serialize)]
struct StateUpdateWire<'a> {
    room: &'a str,
    event: &'a str,
    payload: &'a RunState,
}

impl ViewerMessage {
    /// Build a run-state update keyed by player id
    pub fn state_update(player_id: u64, payload: RunState) -> Self {
        ViewerMessage::StateUpdate {
            room: player_id.to_string(),
            event: SUBMIT_EVENT,
            payload,
        }
    }

    /// Serialize to the relay's JSON wire form
    ///
    /// Reads the snapshot lock for register/unregister.
    pub async fn to_json(&self) -> serde_json::Result<String> {
        match self {
            ViewerMessage::Register(snapshot) => {
                let snapshot: PlayerSnapshot = snapshot.read().await.clone();
                serde_json::to_string(&json!({
                    "event": "player_logged_in",
                    "payload": snapshot,
                }))
            }
            ViewerMessage::Unregister(snapshot) => {
                let snapshot: PlayerSnapshot = snapshot.read().await.clone();
                serde_json::to_string(&json!({
                    "event": "player_logged_out",
                    "payload": snapshot,
                }))
            }
            ViewerMessage::StateUpdate {
                room,
                event,
                payload,
            } => serde_json::to_string(&StateUpdateWire {
                room,
                event,
                payload,
            }),
        }
    }
}
