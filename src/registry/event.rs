//! Inbound client events

use crate::session::RunState;

/// An event received from a game client connection
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// Client identified itself; -1 means the client failed to resolve its id
    Login { player_id: i64 },

    /// Periodic run telemetry
    Submit(RunState),

    /// Explicit coarse status code
    StatusUpdate { player_id: i64, status_code: i64 },

    /// A finished game was persisted
    GameSubmitted {
        game_id: i64,
        notify_player_best: bool,
        notify_above_1000: bool,
    },

    /// Connection went away
    Disconnect,
}

impl InboundEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            InboundEvent::Login { .. } => "login",
            InboundEvent::Submit(_) => "submit",
            InboundEvent::StatusUpdate { .. } => "status_update",
            InboundEvent::GameSubmitted { .. } => "game_submitted",
            InboundEvent::Disconnect => "disconnect",
        }
    }
}
