//! Decoded leaderboard value types

use serde::{Deserialize, Serialize};

/// A single player's leaderboard snapshot
///
/// Accuracy fields are derived from the dagger counters during decoding and
/// are always within `0.0..=100.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_name: String,
    /// Upstream player id (never 0 for a decoded player)
    pub player_id: u64,
    pub rank: i32,
    /// Best time in seconds
    pub time: f64,
    pub kills: i32,
    pub gems: i32,
    pub daggers_hit: i32,
    pub daggers_fired: i32,
    /// Percentage, two decimals
    pub accuracy: f64,
    /// Death-type tag of the best run
    pub death_type: String,
    pub overall_time: f64,
    pub overall_kills: u64,
    pub overall_gems: u64,
    pub overall_deaths: u64,
    pub overall_daggers_hit: u64,
    pub overall_daggers_fired: u64,
    pub overall_accuracy: f64,
}

/// A page of the global leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub global_deaths: u64,
    pub global_kills: u64,
    /// Seconds
    pub global_time: f64,
    pub global_gems: u64,
    pub global_daggers_fired: u64,
    pub global_daggers_hit: u64,
    /// Ratio of daggers hit to daggers fired
    pub global_accuracy: f64,
    pub global_player_count: i32,
    /// Number of players decoded into `players`
    pub player_count: usize,
    pub players: Vec<Player>,
}

/// Round half away from zero to `places` decimals
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let multiplier = 10f64.powi(places);
    (value * multiplier).round() / multiplier
}

/// Hit/fired as a percentage clamped to `0.0..=100.0`, 0 when nothing was fired
pub(crate) fn accuracy_percent(hit: f64, fired: f64) -> f64 {
    if fired > 0.0 {
        round_to(hit / fired * 100.0, super::constants::ACCURACY_PRECISION).clamp(0.0, 100.0)
    } else {
        0.0
    }
}
