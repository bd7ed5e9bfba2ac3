//! Live session state
//!
//! One [`LiveSession`] exists per logged-in game client. Its mutable run
//! progress and its viewer snapshot are two independently lockable
//! resources. Lock order is always session first, snapshot second; no code
//! path acquires them the other way round, and neither is ever held across
//! an outbound publish.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::run::RunState;
use super::snapshot::{PlayerSnapshot, SharedSnapshot};
use super::status::{derive_status, ConnectionStatus, Status, DEATH_TYPE_IN_MENU};
use crate::notify::{Latches, Milestone, MilestoneDispatcher, MilestoneSubject};
use crate::registry::ConnectionKey;
use crate::store::Game;

/// Mutable per-run state, guarded by the session lock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunProgress {
    /// Best time at login; the milestone baseline
    pub best_game_time: f64,

    /// Elapsed time of the current run
    pub game_time: f64,

    /// Latest reported death type
    pub death_type: i32,

    /// Latest reported replay flag
    pub is_replay: bool,

    /// Milestone latches
    pub latches: Latches,
}

impl RunProgress {
    fn new(best_game_time: f64) -> Self {
        Self {
            best_game_time,
            game_time: 0.0,
            death_type: DEATH_TYPE_IN_MENU,
            is_replay: false,
            latches: Latches::default(),
        }
    }

    /// Current fine-grained status
    pub fn status(&self) -> Status {
        derive_status(self.death_type, self.is_replay)
    }
}

/// A connected game client
#[derive(Debug)]
pub struct LiveSession {
    key: ConnectionKey,
    player_id: u64,
    player_name: String,
    logged_in_at: Instant,
    progress: Mutex<RunProgress>,
    snapshot: SharedSnapshot,
}

impl LiveSession {
    /// Create a session for a freshly resolved player
    pub fn new(
        key: ConnectionKey,
        player_id: u64,
        player_name: impl Into<String>,
        best_game_time: f64,
    ) -> Self {
        let player_name = player_name.into();
        let snapshot = PlayerSnapshot::logged_in(player_id, player_name.clone()).shared();

        Self {
            key,
            player_id,
            player_name,
            logged_in_at: Instant::now(),
            progress: Mutex::new(RunProgress::new(best_game_time)),
            snapshot,
        }
    }

    /// Connection this session belongs to
    pub fn key(&self) -> &ConnectionKey {
        &self.key
    }

    pub fn player_id(&self) -> u64 {
        self.player_id
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Time since login
    pub fn duration(&self) -> Duration {
        self.logged_in_at.elapsed()
    }

    /// Handle on the viewer snapshot
    pub fn snapshot(&self) -> SharedSnapshot {
        self.snapshot.clone()
    }

    /// Copy of the current run progress
    pub async fn progress(&self) -> RunProgress {
        *self.progress.lock().await
    }

    /// Apply a submit event
    ///
    /// Updates run progress, republishes status and time into the snapshot,
    /// then evaluates milestone latches. Returns the derived status and any
    /// milestones to publish once the locks are released.
    pub async fn apply_run_state(
        &self,
        run: &RunState,
        dispatcher: &MilestoneDispatcher,
    ) -> (Status, Vec<Milestone>) {
        let mut progress = self.progress.lock().await;
        progress.game_time = run.game_time;
        progress.death_type = run.death_type;
        progress.is_replay = run.is_replay;
        let status = progress.status();

        {
            let mut snapshot = self.snapshot.write().await;
            snapshot.game_time = run.game_time;
            snapshot.status = status.as_str();
        }

        let subject = self.subject(progress.best_game_time);
        let milestones = dispatcher.on_run_state(&mut progress.latches, subject, run);

        (status, milestones)
    }

    /// Apply an explicit client status code
    pub async fn apply_connection_status(&self, status: ConnectionStatus) {
        let _progress = self.progress.lock().await;
        let mut snapshot = self.snapshot.write().await;
        snapshot.status = status.as_str();
    }

    /// Apply a game submission, re-arming the latches
    pub async fn complete_game(
        &self,
        dispatcher: &MilestoneDispatcher,
        game_id: i64,
        game: Option<&Game>,
        notify_best: bool,
        notify_long_run: bool,
    ) -> Vec<Milestone> {
        let mut progress = self.progress.lock().await;
        let subject = self.subject(progress.best_game_time);
        dispatcher.on_game_submitted(
            &mut progress.latches,
            subject,
            game_id,
            game,
            notify_best,
            notify_long_run,
        )
    }

    fn subject(&self, best_time: f64) -> MilestoneSubject<'_> {
        MilestoneSubject {
            player_id: self.player_id,
            player_name: &self.player_name,
            best_time,
        }
    }
}
