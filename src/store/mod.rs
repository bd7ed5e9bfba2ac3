//! Persistence collaborator
//!
//! Finished games and player profiles live in an external store. The live
//! core only needs to upsert a profile at login and read back a finished
//! game when the client reports a submission.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::protocol::{death_type_name, Player};

/// A finished, persisted game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub player_id: i64,
    /// Final run time in seconds
    pub game_time: f64,
    pub death_type: i32,
    pub gems: u32,
    pub homing_daggers: u32,
    pub daggers_fired: u32,
    pub daggers_hit: u32,
    pub enemies_alive: u32,
    pub enemies_killed: u32,
    pub level_two_time: f64,
    pub level_three_time: f64,
    pub level_four_time: f64,
}

impl Game {
    /// Death-type tag, if the stored index is in the table
    pub fn death_type_name(&self) -> Option<&'static str> {
        death_type_name(self.death_type as i64)
    }
}

/// Persistence operations the live core depends on
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Insert or refresh a player's profile; must be idempotent
    async fn upsert_player_profile(&self, player: &Player) -> Result<(), StoreError>;

    /// Fetch a finished game by id
    async fn get_finished_game(&self, id: i64) -> Result<Game, StoreError>;
}
