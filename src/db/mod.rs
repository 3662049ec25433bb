pub mod migrations;
pub mod schema;

use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

/// Open (or create) the ideapile database at the given path, with schema
/// initialized and migrations applied.
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;

    // WAL for better concurrent read performance
    conn.pragma_update(None, "journal_mode", "WAL")?;
    // Enrichments cascade on idea delete via FK
    conn.pragma_update(None, "foreign_keys", "ON")?;

    schema::init_schema(&conn)?;
    migrations::run_migrations(&conn)?;

    tracing::info!(path = %path.display(), "database initialized");
    Ok(conn)
}

/// Open an in-memory database for testing.
pub fn open_memory_database() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    schema::init_schema(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}
