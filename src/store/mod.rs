//! Durable storage for ideas and their enrichments.
//!
//! [`IdeaStore`] owns a single SQLite connection and is the single source of
//! truth: every mutating operation commits before returning, and callers
//! never cache durable state beyond a request/response cycle. Construct one
//! instance at the application entry point and pass it down.

mod enrichments;
mod ideas;
pub mod types;

use std::path::Path;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::Connection;

use crate::db;
use crate::error::{Error, Result};

/// Handle over the ideapile database.
pub struct IdeaStore {
    conn: Connection,
}

impl IdeaStore {
    /// Open (or create) the store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            conn: db::open_database(path)?,
        })
    }

    /// Open an in-memory store, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: db::open_memory_database()?,
        })
    }
}

/// Capture instant, truncated to the stored microsecond precision so the
/// value handed back to the caller equals the value a later read returns.
fn now_stamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Encode a timestamp as fixed-width RFC 3339 UTC text. Fixed-width
/// microseconds keep lexicographic order aligned with chronological order,
/// which the `ORDER BY timestamp DESC` queries rely on.
fn encode_stamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_stamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Corrupt(format!("bad timestamp {raw:?}: {e}")))
}

/// JSON column encoding for tag/connection/related-idea lists. Private to
/// the store layer; the API boundary only ever exposes `Vec<String>`.
fn encode_list(list: &[String]) -> Result<String> {
    serde_json::to_string(list).map_err(|e| Error::Corrupt(format!("encoding list: {e}")))
}

fn decode_list(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| Error::Corrupt(format!("bad list column {raw:?}: {e}")))
}
