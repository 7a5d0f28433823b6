//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::RoomId;

/// Domain errors represent violations while assembling or querying a mansion.
/// Everything that can go wrong during traversal is recoverable and never
/// surfaces here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown room handle: {0}")]
    UnknownRoom(RoomId),

    #[error("no room named '{0}' in the mansion")]
    RoomNotFound(String),

    #[error("mansion has no entrance room")]
    NoEntrance,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
