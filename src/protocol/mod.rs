//! Upstream leaderboard wire protocol
//!
//! The upstream leaderboard service answers every query with an opaque
//! little-endian binary blob. This module owns that format:
//!
//! - [`constants`]: byte offsets, record sizes and the death-type table
//! - [`decoder`]: buffer → [`Leaderboard`] / [`Player`]
//! - [`encoder`]: [`Leaderboard`]-shaped fixtures in the same layout
//!
//! ```text
//! ┌────────── header ──────────┬──────── record ────────┬──────── record ──...
//! │ counters @11..83           │ u16 len │ name │ 90 B  │ u16 len │ name │ ...
//! └────────────────────────────┴────────────────────────┴─────────────────...
//! ```

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod types;

pub use constants::{death_type_name, DEATH_TYPES};
pub use decoder::{decode_leaderboard, decode_player, decode_search_results};
pub use encoder::{LeaderboardEncoder, RawHeader, RawPlayer};
pub use types::{Leaderboard, Player};
