//! Upstream leaderboard service
//!
//! The core only needs raw response buffers; [`UpstreamClient`] provides
//! them and its provided methods decode them through [`crate::protocol`].

pub mod config;
pub mod http;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::UpstreamError;
use crate::protocol::constants::USER_RECORD_OFFSET;
use crate::protocol::{
    decode_leaderboard, decode_player, decode_search_results, Leaderboard, Player,
};

pub use config::UpstreamConfig;
pub use http::HttpUpstream;

/// Source of raw leaderboard buffers
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Raw lookup-by-id response
    async fn fetch_player_by_id(&self, id: u64) -> Result<Bytes, UpstreamError>;

    /// Raw user-search response
    async fn search_players(&self, query: &str) -> Result<Bytes, UpstreamError>;

    /// Raw leaderboard page starting at rank `offset`
    async fn fetch_scores(&self, offset: u32) -> Result<Bytes, UpstreamError>;

    /// Resolve a player by id
    async fn player_by_id(&self, id: u64) -> Result<Player, UpstreamError> {
        let buf = self.fetch_player_by_id(id).await?;
        Ok(decode_player(&buf, USER_RECORD_OFFSET)?)
    }

    /// Search players by name
    async fn search(&self, query: &str) -> Result<Vec<Player>, UpstreamError> {
        let buf = self.search_players(query).await?;
        Ok(decode_search_results(&buf)?)
    }

    /// Fetch a leaderboard page, keeping at most `limit` players
    async fn leaderboard(&self, offset: u32, limit: usize) -> Result<Leaderboard, UpstreamError> {
        let buf = self.fetch_scores(offset).await?;
        Ok(decode_leaderboard(&buf, limit)?)
    }
}
