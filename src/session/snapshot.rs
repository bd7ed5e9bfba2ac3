//! Viewer-facing player snapshot
//!
//! The part of a live session that viewers see. It sits behind its own lock
//! because the viewer relay reads it while the owning session keeps
//! mutating; see [`LiveSession`](super::LiveSession) for the lock order.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use super::status::Status;

/// Snapshot shared between a session and the viewer relay
pub type SharedSnapshot = Arc<RwLock<PlayerSnapshot>>;

/// What viewers know about a connected player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    /// Upstream player id
    pub id: u64,

    /// Player name
    pub name: String,

    /// Display status label
    pub status: &'static str,

    /// Elapsed time of the current run, in seconds
    pub game_time: f64,
}

impl PlayerSnapshot {
    /// Snapshot for a player who just logged in
    pub fn logged_in(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: Status::InMenu.as_str(),
            game_time: 0.0,
        }
    }

    /// Wrap in a shared, independently lockable handle
    pub fn shared(self) -> SharedSnapshot {
        Arc::new(RwLock::new(self))
    }
}
