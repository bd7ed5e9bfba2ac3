//! Play-status derivation
//!
//! Two vocabularies exist. [`Status`] is projected from the latest
//! `(death_type, is_replay)` pair on every submit and carries no history.
//! [`ConnectionStatus`] is the coarser code a client reports explicitly on
//! a status-update event.

use serde::Serialize;

/// Death-type value a client reports while sitting in the menu
pub const DEATH_TYPE_IN_MENU: i32 = -2;
/// Death-type value a client reports while a run is in progress
pub const DEATH_TYPE_ALIVE: i32 = -1;

/// Fine-grained play status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    /// Any non-negative death type
    Dead,
    /// Death type -2
    InMenu,
    /// Death type -1 during replay playback
    WatchingReplay,
    /// Everything else
    Alive,
}

impl Status {
    /// Display label published to viewers
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Dead => "Dead",
            Status::InMenu => "In Menu",
            Status::WatchingReplay => "Watching a Replay",
            Status::Alive => "Alive",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project a status from raw run telemetry
pub fn derive_status(death_type: i32, is_replay: bool) -> Status {
    match death_type {
        d if d >= 0 => Status::Dead,
        DEATH_TYPE_IN_MENU => Status::InMenu,
        DEATH_TYPE_ALIVE if is_replay => Status::WatchingReplay,
        _ => Status::Alive,
    }
}

/// Client-reported connection status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionStatus {
    NotConnected,
    Connecting,
    Alive,
    WatchingReplay,
    InMainMenu,
    InDaggerLobby,
    Dead,
}

impl ConnectionStatus {
    /// Map a wire status code; unknown codes yield `None`
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ConnectionStatus::NotConnected),
            1 => Some(ConnectionStatus::Connecting),
            2 => Some(ConnectionStatus::Alive),
            3 => Some(ConnectionStatus::WatchingReplay),
            4 => Some(ConnectionStatus::InMainMenu),
            5 => Some(ConnectionStatus::InDaggerLobby),
            6 => Some(ConnectionStatus::Dead),
            _ => None,
        }
    }

    /// Display label published to viewers
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::NotConnected => "Not Connected",
            ConnectionStatus::Connecting => "Connecting",
            ConnectionStatus::Alive => "Alive",
            ConnectionStatus::WatchingReplay => "Watching a Replay",
            ConnectionStatus::InMainMenu => "In Main Menu",
            ConnectionStatus::InDaggerLobby => "In Dagger Lobby",
            ConnectionStatus::Dead => "Dead",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
