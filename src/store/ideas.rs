//! Idea CRUD, search, and the symmetric connection operation.

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::text;

use super::types::{Idea, PileStats};
use super::{decode_list, decode_stamp, encode_list, encode_stamp, IdeaStore};

/// Raw `ideas` row before column decoding.
struct IdeaRow {
    id: String,
    content: String,
    timestamp: String,
    tags: String,
    is_favorite: bool,
    connections: String,
}

const IDEA_COLUMNS: &str = "id, content, timestamp, tags, is_favorite, connections";

impl IdeaRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            content: row.get(1)?,
            timestamp: row.get(2)?,
            tags: row.get(3)?,
            is_favorite: row.get(4)?,
            connections: row.get(5)?,
        })
    }

    fn into_idea(self, enrichments: Vec<super::types::Enrichment>) -> Result<Idea> {
        Ok(Idea {
            id: self.id,
            content: self.content,
            timestamp: decode_stamp(&self.timestamp)?,
            tags: decode_list(&self.tags)?,
            is_favorite: self.is_favorite,
            connections: decode_list(&self.connections)?,
            enrichments,
        })
    }
}

impl IdeaStore {
    /// Create a new idea from sanitized content and normalized tags.
    ///
    /// Tags are stored verbatim apart from case normalization and
    /// deduplication; inline hashtag extraction is the capture path's job.
    pub fn create(&mut self, content: &str, tags: &[String]) -> Result<Idea> {
        let content = text::sanitize_content(content);
        if content.is_empty() {
            return Err(Error::Validation("idea content is empty".into()));
        }
        let tags = text::normalize_tags(tags);

        let id = Uuid::now_v7().to_string();
        let timestamp = super::now_stamp();

        self.conn.execute(
            "INSERT INTO ideas (id, content, timestamp, tags, is_favorite, connections) \
             VALUES (?1, ?2, ?3, ?4, 0, '[]')",
            params![id, content, encode_stamp(&timestamp), encode_list(&tags)?],
        )?;
        tracing::debug!(id, "idea created");

        Ok(Idea {
            id,
            content,
            timestamp,
            tags,
            is_favorite: false,
            connections: Vec::new(),
            enrichments: Vec::new(),
        })
    }

    /// Fetch one idea with its enrichments inlined, most-recent-first.
    pub fn get(&self, id: &str) -> Result<Idea> {
        let row = fetch_idea_row(&self.conn, id)?
            .ok_or_else(|| Error::NotFound(format!("idea {id}")))?;
        let enrichments = self.enrichments_for(id)?;
        row.into_idea(enrichments)
    }

    /// All ideas ordered by capture time descending, enrichments inlined.
    pub fn list_all(&self) -> Result<Vec<Idea>> {
        let sql = format!("SELECT {IDEA_COLUMNS} FROM ideas ORDER BY timestamp DESC, id DESC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], IdeaRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        self.hydrate(rows)
    }

    /// Case-insensitive substring search over content or tags, in recency
    /// order. A blank query returns the full listing.
    pub fn search(&self, query: &str) -> Result<Vec<Idea>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_all();
        }

        let pattern = format!("%{}%", escape_like(query));
        let sql = format!(
            "SELECT {IDEA_COLUMNS} FROM ideas \
             WHERE content LIKE ?1 ESCAPE '\\' OR tags LIKE ?1 ESCAPE '\\' \
             ORDER BY timestamp DESC, id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![pattern], IdeaRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        self.hydrate(rows)
    }

    /// Full replace of content, tags, favorite flag, and connections.
    /// `id` and `timestamp` are never altered.
    pub fn update(&mut self, idea: &Idea) -> Result<()> {
        let content = text::sanitize_content(&idea.content);
        if content.is_empty() {
            return Err(Error::Validation("idea content is empty".into()));
        }
        let tags = text::normalize_tags(&idea.tags);

        let rows = self.conn.execute(
            "UPDATE ideas SET content = ?1, tags = ?2, is_favorite = ?3, connections = ?4 \
             WHERE id = ?5",
            params![
                content,
                encode_list(&tags)?,
                idea.is_favorite,
                encode_list(&idea.connections)?,
                idea.id,
            ],
        )?;
        if rows == 0 {
            return Err(Error::NotFound(format!("idea {}", idea.id)));
        }
        tracing::debug!(id = %idea.id, "idea updated");
        Ok(())
    }

    /// Delete an idea. Enrichments cascade via the foreign key; peers'
    /// `connections` lists are left untouched and readers treat unknown
    /// ids as absent.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM ideas WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(Error::NotFound(format!("idea {id}")));
        }
        tracing::debug!(id, "idea deleted");
        Ok(())
    }

    /// Flip the favorite flag and return the updated idea.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<Idea> {
        let rows = self.conn.execute(
            "UPDATE ideas SET is_favorite = 1 - is_favorite WHERE id = ?1",
            params![id],
        )?;
        if rows == 0 {
            return Err(Error::NotFound(format!("idea {id}")));
        }
        self.get(id)
    }

    /// Record a symmetric connection between two ideas. Idempotent; both
    /// sides are written in one transaction.
    pub fn connect(&mut self, id_a: &str, id_b: &str) -> Result<()> {
        if id_a == id_b {
            return Err(Error::Validation(
                "cannot connect an idea to itself".into(),
            ));
        }

        let tx = self.conn.transaction()?;

        let mut a = connection_list(&tx, id_a)?
            .ok_or_else(|| Error::NotFound(format!("idea {id_a}")))?;
        let mut b = connection_list(&tx, id_b)?
            .ok_or_else(|| Error::NotFound(format!("idea {id_b}")))?;

        if !a.iter().any(|c| c == id_b) {
            a.push(id_b.to_string());
            write_connections(&tx, id_a, &a)?;
        }
        if !b.iter().any(|c| c == id_a) {
            b.push(id_a.to_string());
            write_connections(&tx, id_b, &b)?;
        }

        tx.commit()?;
        tracing::debug!(id_a, id_b, "ideas connected");
        Ok(())
    }

    /// Aggregate counters over the whole pile. Connections are symmetric,
    /// so each pair counts once.
    pub fn stats(&self) -> Result<PileStats> {
        let (total_ideas, favorite_ideas): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(is_favorite), 0) FROM ideas",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let (total_ideas, favorite_ideas) = (total_ideas as usize, favorite_ideas as usize);
        let enrichments: usize = self
            .conn
            .query_row("SELECT COUNT(*) FROM enrichments", [], |row| {
                row.get::<_, i64>(0)
            })? as usize;

        let mut stmt = self.conn.prepare("SELECT connections FROM ideas")?;
        let lists = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let mut endpoints = 0usize;
        for raw in &lists {
            endpoints += decode_list(raw)?.len();
        }

        Ok(PileStats {
            total_ideas,
            favorite_ideas,
            enrichments,
            connections: endpoints / 2,
        })
    }

    /// Attach enrichments to a batch of fetched rows with one query.
    fn hydrate(&self, rows: Vec<IdeaRow>) -> Result<Vec<Idea>> {
        let mut by_idea = self.enrichments_by_idea()?;
        rows.into_iter()
            .map(|row| {
                let enrichments = by_idea.remove(&row.id).unwrap_or_default();
                row.into_idea(enrichments)
            })
            .collect()
    }
}

fn fetch_idea_row(conn: &Connection, id: &str) -> Result<Option<IdeaRow>> {
    let sql = format!("SELECT {IDEA_COLUMNS} FROM ideas WHERE id = ?1");
    Ok(conn
        .query_row(&sql, params![id], IdeaRow::from_row)
        .optional()?)
}

fn connection_list(conn: &Connection, id: &str) -> Result<Option<Vec<String>>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT connections FROM ideas WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()?;
    raw.map(|r| decode_list(&r)).transpose()
}

fn write_connections(conn: &Connection, id: &str, connections: &[String]) -> Result<()> {
    conn.execute(
        "UPDATE ideas SET connections = ?1 WHERE id = ?2",
        params![encode_list(connections)?, id],
    )?;
    Ok(())
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
