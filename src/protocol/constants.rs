//! Leaderboard wire-format constants
//!
//! Every offset, width and lookup table of the upstream binary format lives
//! here. The upstream service is unversioned, so protocol drift should only
//! ever require edits to this file.
//!
//! Leaderboard page layout (all integers little-endian):
//! ```text
//! offset  width  field
//!   11     u64   global deaths
//!   19     u64   global kills
//!   27     u64   global daggers fired
//!   35     u64   global time (milliseconds)
//!   43     u64   global gems
//!   51     u64   global daggers hit
//!   59     i16   player records in this page
//!   75     i32   global player count
//!   83     ...   player records
//! ```
//!
//! Player record layout:
//! ```text
//! +0      u16    name length (N)
//! +2      N      name bytes
//! +2+N    90     fixed tail (offsets below are relative to the tail)
//! ```

/// Leaderboard header: total deaths
pub const GLOBAL_DEATHS_OFFSET: usize = 11;
/// Leaderboard header: total kills
pub const GLOBAL_KILLS_OFFSET: usize = 19;
/// Leaderboard header: total daggers fired
pub const GLOBAL_DAGGERS_FIRED_OFFSET: usize = 27;
/// Leaderboard header: total time in milliseconds
pub const GLOBAL_TIME_OFFSET: usize = 35;
/// Leaderboard header: total gems
pub const GLOBAL_GEMS_OFFSET: usize = 43;
/// Leaderboard header: total daggers hit
pub const GLOBAL_DAGGERS_HIT_OFFSET: usize = 51;
/// Leaderboard header: number of player records in the page
pub const PLAYER_COUNT_OFFSET: usize = 59;
/// Leaderboard header: global player count
pub const GLOBAL_PLAYER_COUNT_OFFSET: usize = 75;
/// First player record of a leaderboard page
pub const LEADERBOARD_RECORDS_OFFSET: usize = 83;

/// Search response: number of player records
pub const SEARCH_COUNT_OFFSET: usize = 11;
/// First player record of a search response
pub const SEARCH_RECORDS_OFFSET: usize = 19;
/// The single player record of a lookup-by-id response
pub const USER_RECORD_OFFSET: usize = 19;

/// Width of the name-length prefix
pub const NAME_LENGTH_SIZE: usize = 2;
/// Size of the fixed numeric tail that follows the name
pub const RECORD_TAIL_SIZE: usize = 90;

// Record tail offsets, relative to the first byte after the name
pub const RANK_OFFSET: usize = 0;
pub const PLAYER_ID_OFFSET: usize = 4;
pub const TIME_OFFSET: usize = 12;
pub const KILLS_OFFSET: usize = 16;
pub const DAGGERS_FIRED_OFFSET: usize = 20;
pub const DAGGERS_HIT_OFFSET: usize = 24;
pub const GEMS_OFFSET: usize = 28;
pub const DEATH_TYPE_OFFSET: usize = 32;
pub const OVERALL_DEATHS_OFFSET: usize = 36;
pub const OVERALL_KILLS_OFFSET: usize = 44;
pub const OVERALL_DAGGERS_FIRED_OFFSET: usize = 52;
pub const OVERALL_TIME_OFFSET: usize = 60;
pub const OVERALL_GEMS_OFFSET: usize = 68;
pub const OVERALL_DAGGERS_HIT_OFFSET: usize = 76;

/// Divisor turning the header's millisecond total into seconds
pub const GLOBAL_TIME_DIVISOR: f64 = 1_000.0;
/// Divisor turning record times (tenths of milliseconds) into seconds
pub const RECORD_TIME_DIVISOR: f64 = 10_000.0;

/// Decimal places kept for times
pub const TIME_PRECISION: i32 = 4;
/// Decimal places kept for accuracy percentages
pub const ACCURACY_PRECISION: i32 = 2;

/// Death-type tags, indexed by the record's 16-bit death-type field
pub const DEATH_TYPES: [&str; 16] = [
    "FALLEN",
    "SWARMED",
    "IMPALED",
    "GORED",
    "INFESTED",
    "OPENED",
    "PURGED",
    "DESECRATED",
    "SACRIFICED",
    "EVISCERATED",
    "ANNIHILATED",
    "INTOXICATED",
    "ENVENMONATED",
    "INCARNATED",
    "DISCARNATED",
    "BARBED",
];

/// Look up a death-type tag by index
pub fn death_type_name(index: i64) -> Option<&'static str> {
    usize::try_from(index)
        .ok()
        .and_then(|i| DEATH_TYPES.get(i).copied())
}
