//! Live game sessions
//!
//! - [`status`]: status derivation from run telemetry and client codes
//! - [`run`]: the per-submit [`RunState`] payload
//! - [`snapshot`]: the viewer-facing [`PlayerSnapshot`]
//! - [`state`]: [`LiveSession`], tying the above together under locks

pub mod run;
pub mod snapshot;
pub mod state;
pub mod status;

pub use run::RunState;
pub use snapshot::{PlayerSnapshot, SharedSnapshot};
pub use state::{LiveSession, RunProgress};
pub use status::{derive_status, ConnectionStatus, Status};
