//! # ddlive
//!
//! Leaderboard protocol decoding and live game-session fan-out.
//!
//! Two pieces do the heavy lifting:
//!
//! - [`protocol`] decodes the upstream leaderboard service's binary
//!   responses into [`Leaderboard`] and [`Player`] values.
//! - [`registry`] tracks connected game clients, derives their play status
//!   from streamed run telemetry, fans updates out to viewers and emits
//!   personal-best / long-run milestones at most once per run.
//!
//! Persistence ([`store::PlayerStore`]) and the upstream service
//! ([`upstream::UpstreamClient`]) are collaborators behind traits.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ddlive::registry::{ConnectionKey, InboundEvent};
//! use ddlive::upstream::{HttpUpstream, UpstreamConfig};
//! use ddlive::SessionRegistry;
//! # use ddlive::store::{Game, PlayerStore};
//! # use ddlive::error::StoreError;
//! # struct Db;
//! # #[async_trait::async_trait]
//! # impl PlayerStore for Db {
//! #     async fn upsert_player_profile(&self, _: &ddlive::Player) -> Result<(), StoreError> { Ok(()) }
//! #     async fn get_finished_game(&self, _: i64) -> Result<Game, StoreError> { Err(StoreError::NoRecord) }
//! # }
//!
//! # async fn example() -> ddlive::Result<()> {
//! let upstream = Arc::new(HttpUpstream::new(UpstreamConfig::default())?);
//! let (registry, mut outbound) = SessionRegistry::new(upstream, Arc::new(Db));
//!
//! tokio::spawn(async move {
//!     while let Some(milestone) = outbound.milestones.recv().await {
//!         println!("{:?}", milestone);
//!     }
//! });
//!
//! let key = ConnectionKey::new("socket-1");
//! registry.handle_event(&key, InboundEvent::Login { player_id: 21854 }).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod notify;
pub mod protocol;
pub mod registry;
pub mod session;
pub mod store;
pub mod upstream;

pub use error::{Error, Result};
pub use protocol::{Leaderboard, Player};
pub use registry::SessionRegistry;
