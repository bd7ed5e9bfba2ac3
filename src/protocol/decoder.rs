//! Leaderboard buffer decoder
//!
//! Turns the upstream service's binary responses into [`Leaderboard`] and
//! [`Player`] values. Decoding is fail-fast: the first bad record aborts the
//! whole call and nothing decoded before it is returned.
//!
//! Every read is bounds-checked; a short buffer yields
//! [`DecodeError::UnexpectedEof`] rather than a panic.

use bytes::Buf;

use super::constants::*;
use super::types::{accuracy_percent, round_to, Leaderboard, Player};
use crate::error::DecodeError;

/// Fixed-offset little-endian reader over a borrowed buffer
#[derive(Debug, Clone, Copy)]
struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn span(&self, offset: usize, needed: usize) -> Result<&'a [u8], DecodeError> {
        offset
            .checked_add(needed)
            .and_then(|end| self.buf.get(offset..end))
            .ok_or(DecodeError::UnexpectedEof {
                offset,
                needed,
                len: self.buf.len(),
            })
    }

    fn u64_at(&self, offset: usize) -> Result<u64, DecodeError> {
        Ok(self.span(offset, 8)?.get_u64_le())
    }

    fn i32_at(&self, offset: usize) -> Result<i32, DecodeError> {
        Ok(self.span(offset, 4)?.get_i32_le())
    }

    fn i16_at(&self, offset: usize) -> Result<i16, DecodeError> {
        Ok(self.span(offset, 2)?.get_i16_le())
    }

    fn u16_at(&self, offset: usize) -> Result<u16, DecodeError> {
        Ok(self.span(offset, 2)?.get_u16_le())
    }
}

/// Decode a leaderboard page, keeping at most `limit` players
///
/// The header's declared record count is honoured when it is smaller than
/// `limit`; a negative declared count yields no players.
pub fn decode_leaderboard(buf: &[u8], limit: usize) -> Result<Leaderboard, DecodeError> {
    let r = Reader::new(buf);

    let global_daggers_fired = r.u64_at(GLOBAL_DAGGERS_FIRED_OFFSET)?;
    let global_daggers_hit = r.u64_at(GLOBAL_DAGGERS_HIT_OFFSET)?;
    let global_accuracy = if global_daggers_fired > 0 {
        global_daggers_hit as f64 / global_daggers_fired as f64
    } else {
        0.0
    };

    let declared = usize::try_from(r.i16_at(PLAYER_COUNT_OFFSET)?).unwrap_or(0);
    let player_count = declared.min(limit);

    let mut players = Vec::with_capacity(player_count);
    let mut offset = LEADERBOARD_RECORDS_OFFSET;
    for _ in 0..player_count {
        let (player, size) = decode_record(&r, offset)?;
        offset += size;
        players.push(player);
    }

    Ok(Leaderboard {
        global_deaths: r.u64_at(GLOBAL_DEATHS_OFFSET)?,
        global_kills: r.u64_at(GLOBAL_KILLS_OFFSET)?,
        global_time: round_to(
            r.u64_at(GLOBAL_TIME_OFFSET)? as f64 / GLOBAL_TIME_DIVISOR,
            TIME_PRECISION,
        ),
        global_gems: r.u64_at(GLOBAL_GEMS_OFFSET)?,
        global_daggers_fired,
        global_daggers_hit,
        global_accuracy,
        global_player_count: r.i32_at(GLOBAL_PLAYER_COUNT_OFFSET)?,
        player_count,
        players,
    })
}

/// Decode the single player record starting at `offset`
pub fn decode_player(buf: &[u8], offset: usize) -> Result<Player, DecodeError> {
    decode_record(&Reader::new(buf), offset).map(|(player, _)| player)
}

/// Decode a user-search response
///
/// A declared count of zero or less is [`DecodeError::NoPlayersFound`].
pub fn decode_search_results(buf: &[u8]) -> Result<Vec<Player>, DecodeError> {
    let r = Reader::new(buf);

    let declared = r.i16_at(SEARCH_COUNT_OFFSET)?;
    if declared < 1 {
        return Err(DecodeError::NoPlayersFound);
    }

    let mut players = Vec::with_capacity(declared as usize);
    let mut offset = SEARCH_RECORDS_OFFSET;
    for _ in 0..declared {
        let (player, size) = decode_record(&r, offset)?;
        offset += size;
        players.push(player);
    }

    Ok(players)
}

/// Decode one record, returning it with its total encoded size
fn decode_record(r: &Reader<'_>, offset: usize) -> Result<(Player, usize), DecodeError> {
    let name_len = r.u16_at(offset)? as usize;
    let name_bytes = r.span(offset + NAME_LENGTH_SIZE, name_len)?;
    let tail = offset + NAME_LENGTH_SIZE + name_len;

    // The whole tail must be present, not just the fields we read
    r.span(tail, RECORD_TAIL_SIZE)?;

    let player_id = r.u64_at(tail + PLAYER_ID_OFFSET)?;
    if player_id == 0 {
        return Err(DecodeError::PlayerNotFound);
    }

    let death_index = r.i16_at(tail + DEATH_TYPE_OFFSET)?;
    let death_type = death_type_name(death_index as i64)
        .ok_or(DecodeError::InvalidDeathType(death_index))?;

    let daggers_fired = r.i32_at(tail + DAGGERS_FIRED_OFFSET)?;
    let daggers_hit = r.i32_at(tail + DAGGERS_HIT_OFFSET)?;
    let overall_daggers_fired = r.u64_at(tail + OVERALL_DAGGERS_FIRED_OFFSET)?;
    let overall_daggers_hit = r.u64_at(tail + OVERALL_DAGGERS_HIT_OFFSET)?;

    let player = Player {
        player_name: String::from_utf8_lossy(name_bytes).into_owned(),
        player_id,
        rank: r.i32_at(tail + RANK_OFFSET)?,
        time: round_to(
            r.i32_at(tail + TIME_OFFSET)? as f64 / RECORD_TIME_DIVISOR,
            TIME_PRECISION,
        ),
        kills: r.i32_at(tail + KILLS_OFFSET)?,
        gems: r.i32_at(tail + GEMS_OFFSET)?,
        daggers_hit,
        daggers_fired,
        accuracy: accuracy_percent(daggers_hit as f64, daggers_fired as f64),
        death_type: death_type.to_string(),
        overall_time: round_to(
            r.u64_at(tail + OVERALL_TIME_OFFSET)? as f64 / RECORD_TIME_DIVISOR,
            TIME_PRECISION,
        ),
        overall_kills: r.u64_at(tail + OVERALL_KILLS_OFFSET)?,
        overall_gems: r.u64_at(tail + OVERALL_GEMS_OFFSET)?,
        overall_deaths: r.u64_at(tail + OVERALL_DEATHS_OFFSET)?,
        overall_daggers_hit,
        overall_daggers_fired,
        overall_accuracy: accuracy_percent(
            overall_daggers_hit as f64,
            overall_daggers_fired as f64,
        ),
    };

    Ok((player, NAME_LENGTH_SIZE + name_len + RECORD_TAIL_SIZE))
}
