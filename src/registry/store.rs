//! Session registry implementation
//!
//! The central registry that tracks every logged-in game client and turns
//! its events into viewer updates and milestones.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;

use super::config::RegistryConfig;
use super::error::RegistryError;
use super::event::InboundEvent;
use super::message::{ConnectionKey, ViewerMessage};
use super::outbound::{self, Outbound, OutboundReceivers};
use crate::notify::MilestoneDispatcher;
use crate::session::{ConnectionStatus, LiveSession, PlayerSnapshot, RunState};
use crate::store::PlayerStore;
use crate::upstream::UpstreamClient;

/// Central registry for all live sessions
///
/// The map lock is only held long enough to insert, remove or clone out a
/// session handle. All per-session work happens under that session's own
/// locks, so unrelated connections never serialize on each other.
pub struct SessionRegistry {
    /// Map of connection key to live session
    sessions: RwLock<HashMap<ConnectionKey, Arc<LiveSession>>>,

    upstream: Arc<dyn UpstreamClient>,
    store: Arc<dyn PlayerStore>,
    outbound: Outbound,
    dispatcher: MilestoneDispatcher,

    /// Configuration
    config: RegistryConfig,
}

impl SessionRegistry {
    /// Create a registry with default configuration
    ///
    /// Returns the registry and the receiving ends of its outbound queues.
    pub fn new(
        upstream: Arc<dyn UpstreamClient>,
        store: Arc<dyn PlayerStore>,
    ) -> (Self, OutboundReceivers) {
        Self::with_config(upstream, store, RegistryConfig::default())
    }

    /// Create a registry with custom configuration
    pub fn with_config(
        upstream: Arc<dyn UpstreamClient>,
        store: Arc<dyn PlayerStore>,
        config: RegistryConfig,
    ) -> (Self, OutboundReceivers) {
        let (outbound, receivers) = outbound::channel(&config);

        let registry = Self {
            sessions: RwLock::new(HashMap::new()),
            upstream,
            store,
            outbound,
            dispatcher: MilestoneDispatcher::new(config.long_run_threshold),
            config,
        };

        (registry, receivers)
    }

    /// Get the registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Route an inbound event to its handler
    ///
    /// An error means the connection must be closed.
    pub async fn handle_event(
        &self,
        key: &ConnectionKey,
        event: InboundEvent,
    ) -> Result<(), RegistryError> {
        tracing::trace!(connection = %key, event = event.name(), "Inbound event");

        match event {
            InboundEvent::Login { player_id } => self.on_login(key, player_id).await,
            InboundEvent::Submit(run) => {
                self.on_submit_run_state(key, run).await;
                Ok(())
            }
            InboundEvent::StatusUpdate { status_code, .. } => {
                self.on_status_update(key, status_code).await;
                Ok(())
            }
            InboundEvent::GameSubmitted {
                game_id,
                notify_player_best,
                notify_above_1000,
            } => {
                self.on_game_submitted(key, game_id, notify_player_best, notify_above_1000)
                    .await;
                Ok(())
            }
            InboundEvent::Disconnect => {
                self.on_disconnect(key).await;
                Ok(())
            }
        }
    }

    /// Register a client that identified itself as `player_id`
    ///
    /// Resolves the player upstream, upserts the profile, then creates the
    /// session and announces it to viewers. Any failure leaves no session
    /// behind and the connection must be closed.
    pub async fn on_login(&self, key: &ConnectionKey, player_id: i64) -> Result<(), RegistryError> {
        let start = Instant::now();

        let id = match u64::try_from(player_id) {
            Ok(id) if id > 0 => id,
            _ => {
                tracing::warn!(connection = %key, player_id, "Login rejected: no player");
                return Err(RegistryError::InvalidPlayerId(player_id));
            }
        };

        let player = self.upstream.player_by_id(id).await.map_err(|e| {
            tracing::error!(connection = %key, player_id, error = %e, "Login player lookup failed");
            RegistryError::PlayerLookup(e)
        })?;

        self.store.upsert_player_profile(&player).await.map_err(|e| {
            tracing::error!(
                connection = %key,
                player_id,
                error = %e,
                "Login profile upsert failed"
            );
            RegistryError::Persistence(e)
        })?;

        let session = Arc::new(LiveSession::new(
            key.clone(),
            player.player_id,
            player.player_name.clone(),
            player.time,
        ));
        let snapshot = session.snapshot();

        let replaced = self.sessions.write().await.insert(key.clone(), session);
        if let Some(old) = replaced {
            tracing::warn!(
                connection = %key,
                previous_player = old.player_id(),
                "Login replaced an existing session"
            );
            self.outbound
                .publish_viewer(ViewerMessage::Unregister(old.snapshot()))
                .await?;
        }

        self.outbound
            .publish_viewer(ViewerMessage::Register(snapshot))
            .await?;

        tracing::info!(
            connection = %key,
            player_id = player.player_id,
            player = %player.player_name,
            best_time = player.time,
            duration_ms = start.elapsed().as_millis() as u64,
            "Player logged in"
        );

        Ok(())
    }

    /// Remove the session for a closed connection
    pub async fn on_disconnect(&self, key: &ConnectionKey) {
        let removed = self.sessions.write().await.remove(key);

        let Some(session) = removed else {
            tracing::warn!(connection = %key, "Disconnect for unknown session");
            return;
        };

        if let Err(e) = self
            .outbound
            .publish_viewer(ViewerMessage::Unregister(session.snapshot()))
            .await
        {
            tracing::error!(connection = %key, error = %e, "Failed to publish unregister");
        }

        tracing::info!(
            connection = %key,
            player_id = session.player_id(),
            session_secs = session.duration().as_secs(),
            "Player disconnected"
        );
    }

    /// Apply a client-reported status code
    ///
    /// Codes outside 0..=6 are logged and leave the current status untouched.
    pub async fn on_status_update(&self, key: &ConnectionKey, status_code: i64) {
        let Some(session) = self.lookup(key, "status_update").await else {
            return;
        };

        let Some(status) = ConnectionStatus::from_code(status_code) else {
            tracing::warn!(connection = %key, status_code, "Unknown status code");
            return;
        };

        session.apply_connection_status(status).await;

        tracing::debug!(
            connection = %key,
            player_id = session.player_id(),
            status = %status,
            "Status updated"
        );
    }

    /// Apply live run telemetry
    ///
    /// Viewers get the full run state first, then any milestones the update
    /// triggered go to the milestone queue. A closed viewer queue does not
    /// stop milestones, since their latches are already set.
    pub async fn on_submit_run_state(&self, key: &ConnectionKey, run: RunState) {
        if !run.has_player() {
            tracing::trace!(
                connection = %key,
                player_id = run.player_id,
                "Submit without player ignored"
            );
            return;
        }

        let Some(session) = self.lookup(key, "submit").await else {
            return;
        };

        let (status, milestones) = session.apply_run_state(&run, &self.dispatcher).await;

        tracing::trace!(
            connection = %key,
            player_id = session.player_id(),
            game_time = run.game_time,
            status = %status,
            "Run state applied"
        );

        let message = ViewerMessage::state_update(session.player_id(), run);
        if let Err(e) = self.outbound.publish_viewer(message).await {
            tracing::error!(connection = %key, error = %e, "Failed to publish run state");
        }

        for milestone in milestones {
            if let Err(e) = self.outbound.publish_milestone(milestone).await {
                tracing::error!(connection = %key, error = %e, "Failed to publish milestone");
            }
        }
    }

    /// Evaluate a persisted game and re-arm the session's latches
    pub async fn on_game_submitted(
        &self,
        key: &ConnectionKey,
        game_id: i64,
        notify_player_best: bool,
        notify_above_1000: bool,
    ) {
        let Some(session) = self.lookup(key, "game_submitted").await else {
            return;
        };

        let game = match self.store.get_finished_game(game_id).await {
            Ok(game) => Some(game),
            Err(e) => {
                tracing::error!(
                    connection = %key,
                    game_id,
                    error = %e,
                    "Finished game lookup failed"
                );
                None
            }
        };

        let milestones = session
            .complete_game(
                &self.dispatcher,
                game_id,
                game.as_ref(),
                notify_player_best,
                notify_above_1000,
            )
            .await;

        tracing::debug!(
            connection = %key,
            player_id = session.player_id(),
            game_id,
            milestones = milestones.len(),
            "Game submitted"
        );

        for milestone in milestones {
            if let Err(e) = self.outbound.publish_milestone(milestone).await {
                tracing::error!(connection = %key, error = %e, "Failed to publish milestone");
            }
        }
    }

    /// Get the session for a connection
    pub async fn session(&self, key: &ConnectionKey) -> Option<Arc<LiveSession>> {
        self.sessions.read().await.get(key).cloned()
    }

    /// Current viewer-facing snapshot of one connection's player
    pub async fn snapshot(&self, key: &ConnectionKey) -> Option<PlayerSnapshot> {
        let session = self.session(key).await?;
        let snapshot = session.snapshot().read().await.clone();
        Some(snapshot)
    }

    /// Get total number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Snapshot of every live player, for a viewer that just connected
    pub async fn live_players(&self) -> Vec<PlayerSnapshot> {
        let sessions: Vec<Arc<LiveSession>> =
            self.sessions.read().await.values().cloned().collect();

        let mut players = Vec::with_capacity(sessions.len());
        for session in sessions {
            players.push(session.snapshot().read().await.clone());
        }
        players
    }

    async fn lookup(&self, key: &ConnectionKey, op: &'static str) -> Option<Arc<LiveSession>> {
        let session = self.session(key).await;
        if session.is_none() {
            tracing::warn!(connection = %key, op, "Event for unknown session");
        }
        session
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use bytes::Bytes;
    use tokio::sync::mpsc::error::TryRecvError;

    use super::*;
    use crate::error::{StoreError, UpstreamError};
    use crate::notify::Milestone;
    use crate::protocol::{LeaderboardEncoder, Player, RawPlayer};
    use crate::store::Game;

    struct FakeUpstream {
        players: HashMap<u64, RawPlayer>,
    }

    impl FakeUpstream {
        fn with_player(id: u64, name: &str, best_time: f64) -> Self {
            let mut players = HashMap::new();
            players.insert(
                id,
                RawPlayer {
                    name: name.to_string(),
                    player_id: id,
                    time: (best_time * 10_000.0).round() as i32,
                    ..Default::default()
                },
            );
            Self { players }
        }
    }

    #[async_trait]
    impl UpstreamClient for FakeUpstream {
        async fn fetch_player_by_id(&self, id: u64) -> Result<Bytes, UpstreamError> {
            let mut enc = LeaderboardEncoder::new();
            match self.players.get(&id) {
                Some(raw) => enc.user_response(raw),
                // The service answers unknown ids with an all-zero record
                None => enc.user_response(&RawPlayer::default()),
            }
            Ok(enc.finish())
        }

        async fn search_players(&self, _query: &str) -> Result<Bytes, UpstreamError> {
            Err(UpstreamError::Status(404))
        }

        async fn fetch_scores(&self, _offset: u32) -> Result<Bytes, UpstreamError> {
            Err(UpstreamError::Status(404))
        }
    }

    #[derive(Default)]
    struct FakeStore {
        games: Mutex<HashMap<i64, Game>>,
        upserts: Mutex<Vec<u64>>,
        fail_upsert: bool,
    }

    impl FakeStore {
        fn with_game(self, game: Game) -> Self {
            self.games.lock().unwrap().insert(game.id, game);
            self
        }
    }

    #[async_trait]
    impl PlayerStore for FakeStore {
        async fn upsert_player_profile(&self, player: &Player) -> Result<(), StoreError> {
            if self.fail_upsert {
                return Err(StoreError::Backend("connection refused".into()));
            }
            self.upserts.lock().unwrap().push(player.player_id);
            Ok(())
        }

        async fn get_finished_game(&self, id: i64) -> Result<Game, StoreError> {
            self.games
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or(StoreError::NoRecord)
        }
    }

    const PLAYER: u64 = 21854;

    fn setup(
        store: FakeStore,
        config: RegistryConfig,
    ) -> (SessionRegistry, OutboundReceivers, Arc<FakeStore>) {
        let store = Arc::new(store);
        let upstream = Arc::new(FakeUpstream::with_player(PLAYER, "xvlv", 1169.8234));
        let (registry, rx) = SessionRegistry::with_config(upstream, store.clone(), config);
        (registry, rx, store)
    }

    fn run(game_time: f64, best: bool, long: bool) -> RunState {
        RunState {
            player_id: PLAYER as i64,
            game_time,
            death_type: -1,
            notify_player_best: best,
            notify_above_1000: long,
            ..Default::default()
        }
    }

    async fn logged_in(store: FakeStore) -> (SessionRegistry, OutboundReceivers, ConnectionKey) {
        let (registry, mut rx, _) = setup(store, RegistryConfig::default());
        let key = ConnectionKey::new("conn-1");
        registry.on_login(&key, PLAYER as i64).await.unwrap();
        assert!(matches!(rx.viewers.recv().await, Some(ViewerMessage::Register(_))));
        (registry, rx, key)
    }

    #[tokio::test]
    async fn test_login_creates_session() {
        let (registry, mut rx, store) = setup(FakeStore::default(), RegistryConfig::default());
        let key = ConnectionKey::new("conn-1");

        registry.on_login(&key, PLAYER as i64).await.unwrap();

        assert_eq!(registry.session_count().await, 1);
        let session = registry.session(&key).await.unwrap();
        assert_eq!(session.player_name(), "xvlv");
        assert_eq!(session.progress().await.best_game_time, 1169.8234);
        assert_eq!(*store.upserts.lock().unwrap(), vec![PLAYER]);

        match rx.viewers.recv().await.unwrap() {
            ViewerMessage::Register(snapshot) => {
                let snapshot = snapshot.read().await;
                assert_eq!(snapshot.id, PLAYER);
                assert_eq!(snapshot.status, "In Menu");
            }
            other => panic!("Expected Register, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_sentinel_rejected() {
        let (registry, mut rx, store) = setup(FakeStore::default(), RegistryConfig::default());
        let key = ConnectionKey::new("conn-1");

        for id in [-1, 0] {
            let result = registry.on_login(&key, id).await;
            assert!(matches!(result, Err(RegistryError::InvalidPlayerId(_))));
        }

        assert_eq!(registry.session_count().await, 0);
        assert!(store.upserts.lock().unwrap().is_empty());
        assert!(matches!(rx.viewers.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_login_unknown_player() {
        let (registry, _rx, _) = setup(FakeStore::default(), RegistryConfig::default());
        let key = ConnectionKey::new("conn-1");

        let result = registry.on_login(&key, 999).await;
        assert!(matches!(
            result,
            Err(RegistryError::PlayerLookup(UpstreamError::Decode(
                crate::error::DecodeError::PlayerNotFound
            )))
        ));
        assert!(registry.session(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_login_persistence_failure() {
        let store = FakeStore {
            fail_upsert: true,
            ..Default::default()
        };
        let (registry, mut rx, _) = setup(store, RegistryConfig::default());
        let key = ConnectionKey::new("conn-1");

        let result = registry.on_login(&key, PLAYER as i64).await;
        assert!(matches!(result, Err(RegistryError::Persistence(_))));
        assert_eq!(registry.session_count().await, 0);
        assert!(matches!(rx.viewers.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_disconnect_removes_and_unregisters() {
        let (registry, mut rx, key) = logged_in(FakeStore::default()).await;

        registry.handle_event(&key, InboundEvent::Disconnect).await.unwrap();

        assert_eq!(registry.session_count().await, 0);
        assert!(matches!(rx.viewers.recv().await, Some(ViewerMessage::Unregister(_))));
    }

    #[tokio::test]
    async fn test_unknown_session_events_are_noops() {
        let (registry, mut rx, _) = setup(FakeStore::default(), RegistryConfig::default());
        let key = ConnectionKey::new("ghost");

        registry.on_disconnect(&key).await;
        registry.on_status_update(&key, 2).await;
        registry.on_submit_run_state(&key, run(5.0, true, true)).await;
        registry.on_game_submitted(&key, 1, true, true).await;

        assert!(matches!(rx.viewers.try_recv(), Err(TryRecvError::Empty)));
        assert!(matches!(rx.milestones.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_status_update() {
        let (registry, _rx, key) = logged_in(FakeStore::default()).await;

        registry
            .handle_event(
                &key,
                InboundEvent::StatusUpdate {
                    player_id: PLAYER as i64,
                    status_code: 5,
                },
            )
            .await
            .unwrap();

        let players = registry.live_players().await;
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].status, "In Dagger Lobby");

        // Unknown codes leave the status alone
        registry.on_status_update(&key, 42).await;
        assert_eq!(registry.live_players().await[0].status, "In Dagger Lobby");

        let snapshot = registry.snapshot(&key).await.unwrap();
        assert_eq!(snapshot.id, PLAYER);
        assert_eq!(snapshot.status, "In Dagger Lobby");
        assert!(registry.snapshot(&ConnectionKey::new("other")).await.is_none());
    }

    #[tokio::test]
    async fn test_submit_publishes_state_update() {
        let (registry, mut rx, key) = logged_in(FakeStore::default()).await;

        let mut state = run(42.5, false, false);
        state.gems = 17;
        registry
            .handle_event(&key, InboundEvent::Submit(state.clone()))
            .await
            .unwrap();

        match rx.viewers.recv().await.unwrap() {
            ViewerMessage::StateUpdate {
                room,
                event,
                payload,
            } => {
                assert_eq!(room, PLAYER.to_string());
                assert_eq!(event, "submit");
                assert_eq!(payload, state);
            }
            other => panic!("Expected StateUpdate, got {:?}", other),
        }

        let snapshot = registry.live_players().await.remove(0);
        assert_eq!(snapshot.status, "Alive");
        assert_eq!(snapshot.game_time, 42.5);
        assert!(matches!(rx.milestones.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_submit_without_player_ignored() {
        let (registry, mut rx, key) = logged_in(FakeStore::default()).await;

        let mut state = run(42.5, true, true);
        state.player_id = 0;
        registry.on_submit_run_state(&key, state).await;

        assert!(matches!(rx.viewers.try_recv(), Err(TryRecvError::Empty)));
        let session = registry.session(&key).await.unwrap();
        assert_eq!(session.progress().await.game_time, 0.0);
    }

    #[tokio::test]
    async fn test_best_reached_latch_until_game_submitted() {
        let store = FakeStore::default().with_game(Game {
            id: 1,
            game_time: 20.0,
            death_type: 0,
            ..Default::default()
        });
        let (registry, mut rx, key) = logged_in(store).await;

        for t in [1.0, 2.0, 3.0] {
            registry.on_submit_run_state(&key, run(t, true, false)).await;
        }

        assert!(matches!(
            rx.milestones.recv().await,
            Some(Milestone::BestReached { player_id: PLAYER, .. })
        ));
        assert!(matches!(rx.milestones.try_recv(), Err(TryRecvError::Empty)));

        registry.on_game_submitted(&key, 1, false, false).await;
        assert!(matches!(rx.milestones.try_recv(), Err(TryRecvError::Empty)));

        registry.on_submit_run_state(&key, run(4.0, true, false)).await;
        assert!(matches!(
            rx.milestones.recv().await,
            Some(Milestone::BestReached { .. })
        ));
    }

    #[tokio::test]
    async fn test_long_run_milestone_once() {
        let (registry, mut rx, key) = logged_in(FakeStore::default()).await;

        registry.on_submit_run_state(&key, run(1050.0, false, true)).await;
        registry.on_submit_run_state(&key, run(1100.0, false, true)).await;

        assert_eq!(
            rx.milestones.recv().await,
            Some(Milestone::LongRunReached {
                player_id: PLAYER,
                player_name: "xvlv".into(),
            })
        );
        assert!(matches!(rx.milestones.try_recv(), Err(TryRecvError::Empty)));

        // Both state updates still reached viewers
        for _ in 0..2 {
            assert!(matches!(
                rx.viewers.recv().await,
                Some(ViewerMessage::StateUpdate { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_game_submitted_milestones() {
        let store = FakeStore::default().with_game(Game {
            id: 300,
            game_time: 1201.5,
            death_type: 7,
            ..Default::default()
        });
        let (registry, mut rx, key) = logged_in(store).await;

        registry
            .handle_event(
                &key,
                InboundEvent::GameSubmitted {
                    game_id: 300,
                    notify_player_best: true,
                    notify_above_1000: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(
            rx.milestones.recv().await,
            Some(Milestone::BestSubmitted {
                player_name: "xvlv".into(),
                game_id: 300,
                game_time: 1201.5,
                previous_game_time: 1169.8234,
            })
        );
        assert_eq!(
            rx.milestones.recv().await,
            Some(Milestone::Died {
                player_name: "xvlv".into(),
                game_id: 300,
                game_time: 1201.5,
                death_type: 7,
            })
        );
    }

    #[tokio::test]
    async fn test_game_lookup_failure_resets_latches() {
        let (registry, mut rx, key) = logged_in(FakeStore::default()).await;

        registry.on_submit_run_state(&key, run(1000.0, false, true)).await;
        assert!(rx.milestones.recv().await.is_some());

        registry.on_game_submitted(&key, 404, true, true).await;
        assert!(matches!(rx.milestones.try_recv(), Err(TryRecvError::Empty)));

        let session = registry.session(&key).await.unwrap();
        assert!(!session.progress().await.latches.long_run_notified);
    }

    #[tokio::test]
    async fn test_closed_viewer_queue_keeps_milestones() {
        let (registry, mut rx, key) = logged_in(FakeStore::default()).await;
        drop(rx.viewers);

        registry.on_submit_run_state(&key, run(1050.0, false, true)).await;

        let progress = registry.session(&key).await.unwrap().progress().await;
        assert!(progress.latches.long_run_notified);
        assert_eq!(
            rx.milestones.recv().await,
            Some(Milestone::LongRunReached {
                player_id: PLAYER,
                player_name: "xvlv".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_full_viewer_queue_blocks_submit() {
        let config = RegistryConfig::default().viewer_queue_capacity(1);
        let (registry, mut rx, _) = setup(FakeStore::default(), config);
        let key = ConnectionKey::new("conn-1");

        // Register occupies the only slot
        registry.on_login(&key, PLAYER as i64).await.unwrap();

        let blocked = tokio::time::timeout(
            Duration::from_millis(50),
            registry.on_submit_run_state(&key, run(1.0, false, false)),
        )
        .await;
        assert!(blocked.is_err());

        // Other connections' map operations are not held up
        assert_eq!(registry.session_count().await, 1);

        assert!(matches!(rx.viewers.recv().await, Some(ViewerMessage::Register(_))));
        registry.on_submit_run_state(&key, run(2.0, false, false)).await;
        assert!(matches!(
            rx.viewers.recv().await,
            Some(ViewerMessage::StateUpdate { .. })
        ));
    }

    #[tokio::test]
    async fn test_relogin_replaces_session() {
        let (registry, mut rx, key) = logged_in(FakeStore::default()).await;

        registry.on_login(&key, PLAYER as i64).await.unwrap();

        assert_eq!(registry.session_count().await, 1);
        assert!(matches!(rx.viewers.recv().await, Some(ViewerMessage::Unregister(_))));
        assert!(matches!(rx.viewers.recv().await, Some(ViewerMessage::Register(_))));
    }

    #[tokio::test]
    async fn test_concurrent_connections() {
        let config = RegistryConfig::default().viewer_queue_capacity(1024);
        let (registry, mut rx, _) = setup(FakeStore::default(), config);
        let registry = Arc::new(registry);

        let mut handles = Vec::new();
        for i in 0..32 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                let key = ConnectionKey::new(format!("conn-{}", i));
                registry.on_login(&key, PLAYER as i64).await.unwrap();
                for t in 0..10 {
                    registry
                        .on_submit_run_state(&key, run(t as f64, false, false))
                        .await;
                }
                if i % 2 == 0 {
                    registry.on_disconnect(&key).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(registry.session_count().await, 16);
        for player in registry.live_players().await {
            assert_eq!(player.game_time, 9.0);
        }

        let mut received = 0;
        while rx.viewers.try_recv().is_ok() {
            received += 1;
        }
        // 32 registers, 320 updates, 16 unregisters
        assert_eq!(received, 32 + 320 + 16);
    }
}
