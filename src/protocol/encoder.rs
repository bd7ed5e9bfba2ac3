//! Leaderboard buffer encoder
//!
//! Produces buffers in the exact upstream layout. The service never receives
//! these; they exist so fakes and fixtures can speak the same format the
//! decoder reads.

use bytes::{BufMut, Bytes, BytesMut};

use super::constants::*;

/// Raw leaderboard header fields, before any unit conversion
#[derive(Debug, Clone, Default)]
pub struct RawHeader {
    pub deaths: u64,
    pub kills: u64,
    pub daggers_fired: u64,
    /// Milliseconds
    pub time_ms: u64,
    pub gems: u64,
    pub daggers_hit: u64,
    pub player_count: i16,
    pub global_player_count: i32,
}

/// Raw player record fields, before any unit conversion
#[derive(Debug, Clone, Default)]
pub struct RawPlayer {
    pub name: String,
    pub rank: i32,
    pub player_id: u64,
    /// Tenths of milliseconds
    pub time: i32,
    pub kills: i32,
    pub daggers_fired: i32,
    pub daggers_hit: i32,
    pub gems: i32,
    pub death_type: i16,
    pub overall_deaths: u64,
    pub overall_kills: u64,
    pub overall_daggers_fired: u64,
    /// Tenths of milliseconds
    pub overall_time: u64,
    pub overall_gems: u64,
    pub overall_daggers_hit: u64,
}

/// Leaderboard buffer encoder
pub struct LeaderboardEncoder {
    buf: BytesMut,
}

impl LeaderboardEncoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(512),
        }
    }

    /// Get the encoded bytes and reset encoder
    pub fn finish(&mut self) -> Bytes {
        self.buf.split().freeze()
    }

    /// Get current encoded length
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if encoder is empty
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write a leaderboard page header; records follow directly after it
    pub fn leaderboard_header(&mut self, header: &RawHeader) {
        let start = self.buf.len();
        self.buf.put_bytes(0, LEADERBOARD_RECORDS_OFFSET);
        let out = &mut self.buf[start..];

        put_at(out, GLOBAL_DEATHS_OFFSET, &header.deaths.to_le_bytes());
        put_at(out, GLOBAL_KILLS_OFFSET, &header.kills.to_le_bytes());
        put_at(out, GLOBAL_DAGGERS_FIRED_OFFSET, &header.daggers_fired.to_le_bytes());
        put_at(out, GLOBAL_TIME_OFFSET, &header.time_ms.to_le_bytes());
        put_at(out, GLOBAL_GEMS_OFFSET, &header.gems.to_le_bytes());
        put_at(out, GLOBAL_DAGGERS_HIT_OFFSET, &header.daggers_hit.to_le_bytes());
        put_at(out, PLAYER_COUNT_OFFSET, &header.player_count.to_le_bytes());
        put_at(
            out,
            GLOBAL_PLAYER_COUNT_OFFSET,
            &header.global_player_count.to_le_bytes(),
        );
    }

    /// Write a search-response header; records follow directly after it
    pub fn search_header(&mut self, count: i16) {
        let start = self.buf.len();
        self.buf.put_bytes(0, SEARCH_RECORDS_OFFSET);
        put_at(
            &mut self.buf[start..],
            SEARCH_COUNT_OFFSET,
            &count.to_le_bytes(),
        );
    }

    /// Write a player record
    pub fn player(&mut self, player: &RawPlayer) {
        self.raw_player_name(player.name.as_bytes(), player);
    }

    /// Write a player record with arbitrary name bytes
    ///
    /// `player.name` is ignored in favour of `name`.
    pub fn raw_player_name(&mut self, name: &[u8], player: &RawPlayer) {
        self.buf.put_u16_le(name.len() as u16);
        self.buf.put_slice(name);

        let start = self.buf.len();
        self.buf.put_bytes(0, RECORD_TAIL_SIZE);
        let tail = &mut self.buf[start..];

        put_at(tail, RANK_OFFSET, &player.rank.to_le_bytes());
        put_at(tail, PLAYER_ID_OFFSET, &player.player_id.to_le_bytes());
        put_at(tail, TIME_OFFSET, &player.time.to_le_bytes());
        put_at(tail, KILLS_OFFSET, &player.kills.to_le_bytes());
        put_at(tail, DAGGERS_FIRED_OFFSET, &player.daggers_fired.to_le_bytes());
        put_at(tail, DAGGERS_HIT_OFFSET, &player.daggers_hit.to_le_bytes());
        put_at(tail, GEMS_OFFSET, &player.gems.to_le_bytes());
        put_at(tail, DEATH_TYPE_OFFSET, &player.death_type.to_le_bytes());
        put_at(tail, OVERALL_DEATHS_OFFSET, &player.overall_deaths.to_le_bytes());
        put_at(tail, OVERALL_KILLS_OFFSET, &player.overall_kills.to_le_bytes());
        put_at(
            tail,
            OVERALL_DAGGERS_FIRED_OFFSET,
            &player.overall_daggers_fired.to_le_bytes(),
        );
        put_at(tail, OVERALL_TIME_OFFSET, &player.overall_time.to_le_bytes());
        put_at(tail, OVERALL_GEMS_OFFSET, &player.overall_gems.to_le_bytes());
        put_at(
            tail,
            OVERALL_DAGGERS_HIT_OFFSET,
            &player.overall_daggers_hit.to_le_bytes(),
        );
    }

    /// Write a complete lookup-by-id response for one player
    pub fn user_response(&mut self, player: &RawPlayer) {
        self.buf.put_bytes(0, USER_RECORD_OFFSET);
        self.player(player);
    }
}

impl Default for LeaderboardEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn put_at(out: &mut [u8], offset: usize, bytes: &[u8]) {
    out[offset..offset + bytes.len()].copy_from_slice(bytes);
}
