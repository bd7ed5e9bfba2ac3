//! In-progress run telemetry

use serde::{Deserialize, Serialize};

/// One submit event's worth of run telemetry
///
/// Forwarded verbatim to viewers as the payload of a state update, then
/// dropped; nothing here is retained by the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Upstream player id the client claims; values below 1 are ignored
    pub player_id: i64,
    /// Elapsed run time in seconds
    pub game_time: f64,
    pub gems: i32,
    pub homing_daggers: i32,
    pub enemies_alive: i32,
    pub enemies_killed: i32,
    pub daggers_hit: i32,
    pub daggers_fired: i32,
    pub level_two_time: f64,
    pub level_three_time: f64,
    pub level_four_time: f64,
    /// -2 in menu, -1 alive, otherwise an index into the death-type table
    pub death_type: i32,
    pub is_replay: bool,
    /// Client wants a milestone when the run passes its best
    pub notify_player_best: bool,
    /// Client wants a milestone when the run passes the long-run threshold
    pub notify_above_1000: bool,
}

impl RunState {
    /// Whether the embedded player id refers to a real player
    pub fn has_player(&self) -> bool {
        self.player_id >= 1
    }
}
