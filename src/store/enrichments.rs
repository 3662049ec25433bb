//! Enrichment persistence and per-idea retrieval.

use std::collections::HashMap;

use rusqlite::params;
use uuid::Uuid;

use crate::error::{Error, Result};

use super::types::{Enrichment, EnrichmentKind};
use super::{decode_list, decode_stamp, encode_list, encode_stamp, IdeaStore};

impl IdeaStore {
    /// Persist one enrichment under an existing idea.
    pub fn add_enrichment(
        &mut self,
        idea_id: &str,
        kind: EnrichmentKind,
        content: &str,
        related_ideas: &[String],
    ) -> Result<Enrichment> {
        let exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM ideas WHERE id = ?1",
            params![idea_id],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(Error::NotFound(format!("idea {idea_id}")));
        }

        let id = Uuid::now_v7().to_string();
        let timestamp = super::now_stamp();
        let content = content.trim().to_string();
        let related: Vec<String> = related_ideas.to_vec();

        self.conn.execute(
            "INSERT INTO enrichments (id, idea_id, kind, content, timestamp, related_ideas) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                idea_id,
                kind.as_str(),
                content,
                encode_stamp(&timestamp),
                encode_list(&related)?,
            ],
        )?;
        tracing::debug!(id, idea_id, kind = %kind, "enrichment stored");

        Ok(Enrichment {
            id,
            idea_id: idea_id.to_string(),
            kind,
            content,
            timestamp,
            related_ideas: related,
        })
    }

    /// Enrichments for one idea, most-recent-first.
    pub(super) fn enrichments_for(&self, idea_id: &str) -> Result<Vec<Enrichment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, idea_id, kind, content, timestamp, related_ideas \
             FROM enrichments WHERE idea_id = ?1 ORDER BY timestamp DESC, id DESC",
        )?;
        let rows = stmt
            .query_map(params![idea_id], EnrichmentRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(EnrichmentRow::into_enrichment).collect()
    }

    /// All enrichments grouped by owning idea, most-recent-first per idea.
    pub(super) fn enrichments_by_idea(&self) -> Result<HashMap<String, Vec<Enrichment>>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, idea_id, kind, content, timestamp, related_ideas \
             FROM enrichments ORDER BY timestamp DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], EnrichmentRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut by_idea: HashMap<String, Vec<Enrichment>> = HashMap::new();
        for row in rows {
            let enrichment = row.into_enrichment()?;
            by_idea
                .entry(enrichment.idea_id.clone())
                .or_default()
                .push(enrichment);
        }
        Ok(by_idea)
    }
}

/// Raw `enrichments` row before column decoding.
struct EnrichmentRow {
    id: String,
    idea_id: String,
    kind: String,
    content: String,
    timestamp: String,
    related_ideas: String,
}

impl EnrichmentRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            idea_id: row.get(1)?,
            kind: row.get(2)?,
            content: row.get(3)?,
            timestamp: row.get(4)?,
            related_ideas: row.get(5)?,
        })
    }

    fn into_enrichment(self) -> Result<Enrichment> {
        let kind = self
            .kind
            .parse::<EnrichmentKind>()
            .map_err(Error::Corrupt)?;
        Ok(Enrichment {
            id: self.id,
            idea_id: self.idea_id,
            kind,
            content: self.content,
            timestamp: decode_stamp(&self.timestamp)?,
            related_ideas: decode_list(&self.related_ideas)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> IdeaStore {
        IdeaStore::open_in_memory().unwrap()
    }

    #[test]
    fn add_enrichment_requires_live_idea() {
        let mut store = test_store();
        let err = store
            .add_enrichment("missing", EnrichmentKind::Expand, "text", &[])
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn enrichments_come_back_most_recent_first() {
        let mut store = test_store();
        let idea = store.create("seed", &[]).unwrap();

        let first = store
            .add_enrichment(&idea.id, EnrichmentKind::Expand, "older", &[])
            .unwrap();
        let second = store
            .add_enrichment(&idea.id, EnrichmentKind::Suggest, "newer", &[])
            .unwrap();

        let stored = store.get(&idea.id).unwrap();
        assert_eq!(stored.enrichments.len(), 2);
        assert_eq!(stored.enrichments[0].id, second.id);
        assert_eq!(stored.enrichments[1].id, first.id);
    }

    #[test]
    fn combine_related_ideas_survive_storage() {
        let mut store = test_store();
        let a = store.create("idea a", &[]).unwrap();
        let b = store.create("idea b", &[]).unwrap();

        let enrichment = store
            .add_enrichment(
                &a.id,
                EnrichmentKind::Combine,
                "a and b together",
                &[a.id.clone(), b.id.clone()],
            )
            .unwrap();
        assert_eq!(enrichment.related_ideas, vec![a.id.clone(), b.id.clone()]);

        let stored = store.get(&a.id).unwrap();
        assert_eq!(stored.enrichments[0].related_ideas, vec![a.id, b.id]);
    }

    #[test]
    fn content_is_trimmed_before_storage() {
        let mut store = test_store();
        let idea = store.create("seed", &[]).unwrap();
        let enrichment = store
            .add_enrichment(&idea.id, EnrichmentKind::Inspire, "  padded  \n", &[])
            .unwrap();
        assert_eq!(enrichment.content, "padded");
    }
}
