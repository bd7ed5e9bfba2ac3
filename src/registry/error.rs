//! Registry error types
//!
//! Every variant here is fatal to the single connection that caused it: the
//! transport closes that connection. Nothing is retried.

use crate::error::{StoreError, UpstreamError};

/// Error type for registry operations
#[derive(Debug)]
pub enum RegistryError {
    /// Login carried the "no player" sentinel
    InvalidPlayerId(i64),
    /// Upstream lookup or decode of the player failed
    PlayerLookup(UpstreamError),
    /// Profile upsert failed
    Persistence(StoreError),
    /// An outbound queue's consumer has gone away
    OutboundClosed(&'static str),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::InvalidPlayerId(id) => write!(f, "Invalid player id: {}", id),
            RegistryError::PlayerLookup(e) => write!(f, "Player lookup failed: {}", e),
            RegistryError::Persistence(e) => write!(f, "Profile upsert failed: {}", e),
            RegistryError::OutboundClosed(queue) => {
                write!(f, "Outbound {} queue closed", queue)
            }
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::PlayerLookup(e) => Some(e),
            RegistryError::Persistence(e) => Some(e),
            _ => None,
        }
    }
}
