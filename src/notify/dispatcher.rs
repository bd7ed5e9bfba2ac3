//! Milestone latch evaluation
//!
//! Decides which milestones an event produces. Each session owns a
//! [`Latches`] pair; once a latch is set its milestone is suppressed until a
//! game submission resets it. Evaluation is pure: the caller holds the
//! session lock while calling in and publishes the result after releasing it.

use crate::session::RunState;
use crate::store::Game;

use super::milestone::Milestone;

/// Default long-run threshold in seconds
pub const DEFAULT_LONG_RUN_THRESHOLD: f64 = 1000.0;

/// One-shot notification latches for a single session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latches {
    /// A best-reached milestone went out for the current run
    pub best_time_notified: bool,
    /// A long-run milestone went out for the current run
    pub long_run_notified: bool,
}

impl Latches {
    /// Re-arm both latches
    pub fn reset(&mut self) {
        *self = Latches::default();
    }
}

/// Who a milestone is about
#[derive(Debug, Clone, Copy)]
pub struct MilestoneSubject<'a> {
    pub player_id: u64,
    pub player_name: &'a str,
    /// Best time known at login
    pub best_time: f64,
}

/// Milestone decision logic
#[derive(Debug, Clone)]
pub struct MilestoneDispatcher {
    long_run_threshold: f64,
}

impl MilestoneDispatcher {
    /// Create a dispatcher with the given long-run threshold
    pub fn new(long_run_threshold: f64) -> Self {
        Self { long_run_threshold }
    }

    /// Long-run threshold in seconds
    pub fn long_run_threshold(&self) -> f64 {
        self.long_run_threshold
    }

    /// Evaluate a live run update, setting latches for anything emitted
    pub fn on_run_state(
        &self,
        latches: &mut Latches,
        subject: MilestoneSubject<'_>,
        run: &RunState,
    ) -> Vec<Milestone> {
        let mut out = Vec::new();

        if run.notify_player_best
            && !latches.best_time_notified
            && run.game_time < subject.best_time
        {
            out.push(Milestone::BestReached {
                player_id: subject.player_id,
                player_name: subject.player_name.to_string(),
                previous_game_time: subject.best_time,
            });
            latches.best_time_notified = true;
        }

        if run.notify_above_1000
            && !latches.long_run_notified
            && run.game_time >= self.long_run_threshold
        {
            out.push(Milestone::LongRunReached {
                player_id: subject.player_id,
                player_name: subject.player_name.to_string(),
            });
            latches.long_run_notified = true;
        }

        out
    }

    /// Evaluate a finished game and re-arm both latches
    ///
    /// `game` is `None` when the store could not produce the record; no
    /// milestones are emitted then, but the latches are still reset.
    pub fn on_game_submitted(
        &self,
        latches: &mut Latches,
        subject: MilestoneSubject<'_>,
        game_id: i64,
        game: Option<&Game>,
        notify_best: bool,
        notify_long_run: bool,
    ) -> Vec<Milestone> {
        let mut out = Vec::new();

        if let Some(game) = game {
            if notify_best && game.game_time > subject.best_time {
                out.push(Milestone::BestSubmitted {
                    player_name: subject.player_name.to_string(),
                    game_id,
                    game_time: game.game_time,
                    previous_game_time: subject.best_time,
                });
            }
            if notify_long_run && game.game_time > self.long_run_threshold {
                out.push(Milestone::Died {
                    player_name: subject.player_name.to_string(),
                    game_id,
                    game_time: game.game_time,
                    death_type: game.death_type,
                });
            }
        }

        latches.reset();
        out
    }
}

impl Default for MilestoneDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_LONG_RUN_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(best_time: f64) -> MilestoneSubject<'static> {
        MilestoneSubject {
            player_id: 1,
            player_name: "sorath",
            best_time,
        }
    }

    fn run(game_time: f64, best: bool, long: bool) -> RunState {
        RunState {
            player_id: 1,
            game_time,
            death_type: -1,
            notify_player_best: best,
            notify_above_1000: long,
            ..Default::default()
        }
    }

    #[test]
    fn test_best_reached_once() {
        let dispatcher = MilestoneDispatcher::default();
        let mut latches = Latches::default();

        let first = dispatcher.on_run_state(&mut latches, subject(500.0), &run(10.0, true, false));
        assert_eq!(first.len(), 1);
        assert!(matches!(first[0], Milestone::BestReached { .. }));
        assert!(latches.best_time_notified);

        for t in [11.0, 12.0, 400.0] {
            let again = dispatcher.on_run_state(&mut latches, subject(500.0), &run(t, true, false));
            assert!(again.is_empty());
        }
    }

    #[test]
    fn test_best_requires_request_and_strictly_less() {
        let dispatcher = MilestoneDispatcher::default();
        let mut latches = Latches::default();

        assert!(dispatcher
            .on_run_state(&mut latches, subject(500.0), &run(10.0, false, false))
            .is_empty());
        assert!(dispatcher
            .on_run_state(&mut latches, subject(500.0), &run(500.0, true, false))
            .is_empty());
        assert!(!latches.best_time_notified);
    }

    #[test]
    fn test_long_run_threshold_inclusive_once() {
        let dispatcher = MilestoneDispatcher::default();
        let mut latches = Latches::default();

        assert!(dispatcher
            .on_run_state(&mut latches, subject(0.0), &run(999.9999, false, true))
            .is_empty());

        let hit = dispatcher.on_run_state(&mut latches, subject(0.0), &run(1000.0, false, true));
        assert_eq!(hit.len(), 1);
        assert!(matches!(hit[0], Milestone::LongRunReached { player_id: 1, .. }));

        assert!(dispatcher
            .on_run_state(&mut latches, subject(0.0), &run(1100.0, false, true))
            .is_empty());
    }

    #[test]
    fn test_game_submitted_resets_and_emits() {
        let dispatcher = MilestoneDispatcher::default();
        let mut latches = Latches {
            best_time_notified: true,
            long_run_notified: true,
        };
        let game = Game {
            id: 77,
            game_time: 1200.5,
            death_type: 4,
            ..Default::default()
        };

        let out = dispatcher.on_game_submitted(
            &mut latches,
            subject(900.0),
            77,
            Some(&game),
            true,
            true,
        );

        assert_eq!(latches, Latches::default());
        assert_eq!(
            out,
            vec![
                Milestone::BestSubmitted {
                    player_name: "sorath".into(),
                    game_id: 77,
                    game_time: 1200.5,
                    previous_game_time: 900.0,
                },
                Milestone::Died {
                    player_name: "sorath".into(),
                    game_id: 77,
                    game_time: 1200.5,
                    death_type: 4,
                },
            ]
        );
    }

    #[test]
    fn test_game_submitted_threshold_is_strict() {
        let dispatcher = MilestoneDispatcher::default();
        let mut latches = Latches::default();
        let game = Game {
            game_time: 1000.0,
            ..Default::default()
        };

        let out =
            dispatcher.on_game_submitted(&mut latches, subject(2000.0), 1, Some(&game), true, true);
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_game_still_resets() {
        let dispatcher = MilestoneDispatcher::default();
        let mut latches = Latches {
            best_time_notified: true,
            long_run_notified: false,
        };

        let out = dispatcher.on_game_submitted(&mut latches, subject(1.0), 5, None, true, true);
        assert!(out.is_empty());
        assert!(!latches.best_time_notified);
    }
}
