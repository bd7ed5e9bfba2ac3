//! Live feed demo
//!
//! Run with: cargo run --example live_feed
//!
//! Wires a `SessionRegistry` to an in-memory player store and a canned
//! upstream, then plays one client's session through it: login, a run that
//! passes 1000 seconds, a game submission and a disconnect. Viewer messages
//! and milestones are printed as the relay and the messaging integration
//! would receive them.
//!
//! Set `RUST_LOG=ddlive=trace` to see every registry event.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use ddlive::error::{StoreError, UpstreamError};
use ddlive::protocol::{LeaderboardEncoder, RawHeader, RawPlayer};
use ddlive::registry::{ConnectionKey, InboundEvent, RegistryConfig};
use ddlive::session::RunState;
use ddlive::store::{Game, PlayerStore};
use ddlive::upstream::UpstreamClient;
use ddlive::{Player, SessionRegistry};

const PLAYER_ID: i64 = 118832;

/// Upstream that serves a fixed set of players
struct CannedUpstream {
    players: Vec<RawPlayer>,
}

impl CannedUpstream {
    fn new() -> Self {
        Self {
            players: vec![RawPlayer {
                name: "dagger_demo".into(),
                rank: 42,
                player_id: PLAYER_ID as u64,
                time: 10_123_456,
                kills: 1500,
                daggers_fired: 9000,
                daggers_hit: 2700,
                gems: 320,
                death_type: 1,
                overall_deaths: 8000,
                overall_kills: 2_000_000,
                overall_daggers_fired: 40_000_000,
                overall_time: 3_600_000_000,
                overall_gems: 600_000,
                overall_daggers_hit: 10_000_000,
            }],
        }
    }
}

#[async_trait]
impl UpstreamClient for CannedUpstream {
    async fn fetch_player_by_id(&self, id: u64) -> Result<Bytes, UpstreamError> {
        let mut enc = LeaderboardEncoder::new();
        let default = RawPlayer::default();
        let raw = self
            .players
            .iter()
            .find(|p| p.player_id == id)
            .unwrap_or(&default);
        enc.user_response(raw);
        Ok(enc.finish())
    }

    async fn search_players(&self, query: &str) -> Result<Bytes, UpstreamError> {
        let hits: Vec<_> = self
            .players
            .iter()
            .filter(|p| p.name.contains(query))
            .collect();
        let mut enc = LeaderboardEncoder::new();
        enc.search_header(hits.len() as i16);
        for p in hits {
            enc.player(p);
        }
        Ok(enc.finish())
    }

    async fn fetch_scores(&self, _offset: u32) -> Result<Bytes, UpstreamError> {
        let mut enc = LeaderboardEncoder::new();
        enc.leaderboard_header(&RawHeader {
            deaths: 8000,
            kills: 2_000_000,
            daggers_fired: 40_000_000,
            time_ms: 360_000_000,
            gems: 600_000,
            daggers_hit: 10_000_000,
            player_count: self.players.len() as i16,
            global_player_count: 1,
        });
        for p in &self.players {
            enc.player(p);
        }
        Ok(enc.finish())
    }
}

/// Player store kept in memory
#[derive(Default)]
struct MemoryStore {
    profiles: Mutex<HashMap<u64, Player>>,
    games: Mutex<HashMap<i64, Game>>,
}

#[async_trait]
impl PlayerStore for MemoryStore {
    async fn upsert_player_profile(&self, player: &Player) -> Result<(), StoreError> {
        self.profiles
            .lock()
            .await
            .insert(player.player_id, player.clone());
        Ok(())
    }

    async fn get_finished_game(&self, id: i64) -> Result<Game, StoreError> {
        self.games
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NoRecord)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("ddlive=info".parse()?),
        )
        .init();

    let upstream = Arc::new(CannedUpstream::new());

    let leaderboard = upstream.leaderboard(0, 100).await?;
    println!(
        "Leaderboard: {} players, global accuracy {:.4}",
        leaderboard.global_player_count, leaderboard.global_accuracy
    );
    for player in upstream.search("dagger").await? {
        println!(
            "  #{} {} {:.4}s ({}, {:.2}% accuracy)",
            player.rank, player.player_name, player.time, player.death_type, player.accuracy
        );
    }

    let store = Arc::new(MemoryStore::default());
    let config = RegistryConfig::default().viewer_queue_capacity(16);
    let (registry, mut outbound) =
        SessionRegistry::with_config(upstream, store.clone(), config);

    let viewers = tokio::spawn(async move {
        while let Some(message) = outbound.viewers.recv().await {
            match message.to_json().await {
                Ok(json) => println!("viewer    <- {}", json),
                Err(e) => eprintln!("viewer serialization failed: {}", e),
            }
        }
    });
    let milestones = tokio::spawn(async move {
        while let Some(milestone) = outbound.milestones.recv().await {
            println!("milestone <- {}", serde_json::to_string(&milestone).unwrap_or_default());
        }
    });

    let key = ConnectionKey::new("socket-demo");
    registry
        .handle_event(&key, InboundEvent::Login { player_id: PLAYER_ID })
        .await?;

    registry
        .handle_event(
            &key,
            InboundEvent::StatusUpdate {
                player_id: PLAYER_ID,
                status_code: 2,
            },
        )
        .await?;

    for game_time in [250.0, 999.5, 1000.25, 1012.0] {
        let run = RunState {
            player_id: PLAYER_ID,
            game_time,
            gems: (game_time / 4.0) as i32,
            death_type: -1,
            notify_player_best: true,
            notify_above_1000: true,
            ..Default::default()
        };
        registry.handle_event(&key, InboundEvent::Submit(run)).await?;
    }

    store.games.lock().await.insert(
        1,
        Game {
            id: 1,
            player_id: PLAYER_ID,
            game_time: 1013.7,
            death_type: 3,
            ..Default::default()
        },
    );
    registry
        .handle_event(
            &key,
            InboundEvent::GameSubmitted {
                game_id: 1,
                notify_player_best: true,
                notify_above_1000: true,
            },
        )
        .await?;

    println!("Live players: {:?}", registry.live_players().await);

    registry.handle_event(&key, InboundEvent::Disconnect).await?;

    drop(registry);
    viewers.await?;
    milestones.await?;

    Ok(())
}
