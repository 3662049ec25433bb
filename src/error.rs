//! Crate-wide error taxonomy.
//!
//! Store errors always propagate to the caller unchanged. Orchestrator errors
//! propagate for the four primary enrichment operations; connection discovery
//! and the configuration/connectivity probes degrade instead of erroring.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Empty or otherwise invalid input (e.g. blank idea content).
    #[error("validation error: {0}")]
    Validation(String),

    /// An operation referenced an id that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Combine was called with fewer than two ideas.
    #[error("at least 2 ideas are required to combine, got {0}")]
    InsufficientInput(usize),

    /// Network or service failure, or an empty completion.
    #[error("remote service error: {0}")]
    RemoteService(String),

    /// Malformed free-text reply from the remote service.
    #[error("parse error: {0}")]
    Parse(String),

    /// An enrichment of this kind is already running for this idea.
    #[error("enrichment {kind} already in flight for idea {idea_id}")]
    InFlight { idea_id: String, kind: String },

    /// A stored row could not be decoded (bad timestamp or JSON column).
    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::RemoteService(err.to_string())
    }
}
