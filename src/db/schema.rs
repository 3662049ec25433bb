//! SQL DDL for all ideapile tables.
//!
//! Defines the `ideas`, `enrichments`, and `schema_meta` tables. All DDL uses
//! `IF NOT EXISTS` for idempotent initialization.

use rusqlite::Connection;

/// All schema DDL statements for the core tables.
///
/// `tags`, `connections`, and `related_ideas` are JSON-encoded text columns;
/// the encoding is private to the store layer, callers only ever see typed
/// collections.
const SCHEMA_SQL: &str = r#"
-- Captured ideas
CREATE TABLE IF NOT EXISTS ideas (
    id TEXT PRIMARY KEY,
    content TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    tags TEXT NOT NULL DEFAULT '[]',
    is_favorite INTEGER NOT NULL DEFAULT 0 CHECK(is_favorite IN (0, 1)),
    connections TEXT NOT NULL DEFAULT '[]'
);

CREATE INDEX IF NOT EXISTS idx_ideas_timestamp ON ideas(timestamp DESC);

-- AI enrichments, one row per completed enrichment call
CREATE TABLE IF NOT EXISTS enrichments (
    id TEXT PRIMARY KEY,
    idea_id TEXT NOT NULL REFERENCES ideas(id) ON DELETE CASCADE,
    kind TEXT NOT NULL CHECK(kind IN ('expand','combine','suggest','inspire')),
    content TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    related_ideas TEXT NOT NULL DEFAULT '[]'
);

CREATE INDEX IF NOT EXISTS idx_enrichments_idea ON enrichments(idea_id);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    // Set initial schema version if not already present
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}
