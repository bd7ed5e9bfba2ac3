//! Live session registry
//!
//! The registry tracks every logged-in game client and routes its events to
//! viewers and to the milestone integration.
//!
//! # Architecture
//!
//! ```text
//!                        Arc<SessionRegistry>
//!                  ┌──────────────────────────────┐
//!                  │ sessions: HashMap<Key,       │
//!                  │   Arc<LiveSession {          │
//!                  │     progress: Mutex,         │
//!                  │     snapshot: Arc<RwLock>,   │
//!                  │   }>                         │
//!                  │ >                            │
//!                  └──────────────┬───────────────┘
//!                                 │
//!        ┌────────────────────────┼────────────────────────┐
//!        │                        │                        │
//!        ▼                        ▼                        ▼
//!   [Connection]             [Connection]          viewers ◄── mpsc (bounded)
//!   handle_event()           handle_event()        milestones ◄── mpsc (bounded)
//! ```
//!
//! # Locking
//!
//! The map lock is held only to insert, remove or clone an `Arc` out. A
//! session's progress lock is taken before its snapshot lock, and both are
//! released before anything is published.

pub mod config;
pub mod error;
pub mod event;
pub mod message;
pub mod outbound;
pub mod store;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use event::InboundEvent;
pub use message::{ConnectionKey, ViewerMessage};
pub use outbound::{Outbound, OutboundReceivers};
pub use store::SessionRegistry;
