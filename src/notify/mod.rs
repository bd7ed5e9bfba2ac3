//! Milestone notifications
//!
//! [`MilestoneDispatcher`] decides, per event, whether a personal-best or
//! long-run milestone should go out; per-session [`Latches`] keep each one
//! to at most once per run.

pub mod dispatcher;
pub mod milestone;

pub use dispatcher::{Latches, MilestoneDispatcher, MilestoneSubject, DEFAULT_LONG_RUN_THRESHOLD};
pub use milestone::Milestone;
