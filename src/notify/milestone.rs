//! Milestone messages
//!
//! The four shapes the messaging integration understands. Rendering them for
//! a chat service is the consumer's job.

use serde::Serialize;

use crate::protocol::death_type_name;

/// A notable, at-most-once-per-run event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Milestone {
    /// A finished game beat the player's best from login
    BestSubmitted {
        player_name: String,
        game_id: i64,
        game_time: f64,
        previous_game_time: f64,
    },
    /// A live run crossed the player's best
    BestReached {
        player_id: u64,
        player_name: String,
        previous_game_time: f64,
    },
    /// A live run crossed the long-run threshold
    LongRunReached { player_id: u64, player_name: String },
    /// A long run ended
    Died {
        player_name: String,
        game_id: i64,
        game_time: f64,
        death_type: i32,
    },
}

impl Milestone {
    /// Name of the player the milestone is about
    pub fn player_name(&self) -> &str {
        match self {
            Milestone::BestSubmitted { player_name, .. }
            | Milestone::BestReached { player_name, .. }
            | Milestone::LongRunReached { player_name, .. }
            | Milestone::Died { player_name, .. } => player_name,
        }
    }

    /// Short kind label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Milestone::BestSubmitted { .. } => "best_submitted",
            Milestone::BestReached { .. } => "best_reached",
            Milestone::LongRunReached { .. } => "long_run_reached",
            Milestone::Died { .. } => "died",
        }
    }

    /// Death-type tag for [`Milestone::Died`]
    pub fn death_type_name(&self) -> Option<&'static str> {
        match self {
            Milestone::Died { death_type, .. } => death_type_name(*death_type as i64),
            _ => None,
        }
    }
}
