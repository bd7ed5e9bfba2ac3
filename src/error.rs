//! Error types
//!
//! Each collaborator boundary has its own error enum; [`Error`] wraps them
//! for callers that drive the whole crate.

use crate::registry::RegistryError;

/// Result alias using the crate-level [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-level error
#[derive(Debug)]
pub enum Error {
    /// Binary leaderboard buffer could not be decoded
    Decode(DecodeError),
    /// Upstream leaderboard service failure
    Upstream(UpstreamError),
    /// Persistence collaborator failure
    Store(StoreError),
    /// Session registry failure
    Registry(RegistryError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Decode(e) => write!(f, "Decode error: {}", e),
            Error::Upstream(e) => write!(f, "Upstream error: {}", e),
            Error::Store(e) => write!(f, "Store error: {}", e),
            Error::Registry(e) => write!(f, "Registry error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Decode(e) => Some(e),
            Error::Upstream(e) => Some(e),
            Error::Store(e) => Some(e),
            Error::Registry(e) => Some(e),
        }
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}

impl From<UpstreamError> for Error {
    fn from(e: UpstreamError) -> Self {
        Error::Upstream(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Store(e)
    }
}

impl From<RegistryError> for Error {
    fn from(e: RegistryError) -> Self {
        Error::Registry(e)
    }
}

/// Binary decode failures
///
/// None of these are retryable: the same buffer always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer ends before a field's span
    UnexpectedEof {
        /// Offset of the field that could not be read
        offset: usize,
        /// Bytes the field needs
        needed: usize,
        /// Total buffer length
        len: usize,
    },
    /// A record carried the sentinel player id 0
    PlayerNotFound,
    /// A search response declared no players
    NoPlayersFound,
    /// Death-type index outside the tag table
    InvalidDeathType(i16),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::UnexpectedEof {
                offset,
                needed,
                len,
            } => write!(
                f,
                "Buffer too short: need {} bytes at offset {}, have {}",
                needed, offset, len
            ),
            DecodeError::PlayerNotFound => write!(f, "player not found"),
            DecodeError::NoPlayersFound => write!(f, "no players found"),
            DecodeError::InvalidDeathType(index) => {
                write!(f, "Invalid death type index: {}", index)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Upstream leaderboard service failures
#[derive(Debug)]
pub enum UpstreamError {
    /// Transport-level HTTP failure
    Http(reqwest::Error),
    /// Service answered with a non-success status
    Status(u16),
    /// Response body could not be decoded
    Decode(DecodeError),
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamError::Http(e) => write!(f, "HTTP request failed: {}", e),
            UpstreamError::Status(code) => write!(f, "Unexpected HTTP status: {}", code),
            UpstreamError::Decode(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::Http(e) => Some(e),
            UpstreamError::Status(_) => None,
            UpstreamError::Decode(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        UpstreamError::Http(e)
    }
}

impl From<DecodeError> for UpstreamError {
    fn from(e: DecodeError) -> Self {
        UpstreamError::Decode(e)
    }
}

/// Persistence collaborator failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with the requested id
    NoRecord,
    /// Backend failure, described by the backend
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NoRecord => write!(f, "no record found"),
            StoreError::Backend(msg) => write!(f, "Store backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}
