//! Core record type definitions.
//!
//! Defines [`Idea`] (the atomic captured note), [`Enrichment`] (an
//! AI-produced elaboration owned by one idea), and [`EnrichmentKind`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four persisted enrichment kinds. Tag generation and connection
/// discovery are orchestration operations, not stored kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentKind {
    /// Elaborate one idea with details and implementation paths.
    Expand,
    /// Merge two or more ideas into a new concept.
    Combine,
    /// Enumerate 3–5 related ideas.
    Suggest,
    /// Reframe one idea from an unexpected angle, high sampling temperature.
    Inspire,
}

impl EnrichmentKind {
    /// SQL-compatible string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expand => "expand",
            Self::Combine => "combine",
            Self::Suggest => "suggest",
            Self::Inspire => "inspire",
        }
    }
}

impl std::fmt::Display for EnrichmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EnrichmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expand" => Ok(Self::Expand),
            "combine" => Ok(Self::Combine),
            "suggest" => Ok(Self::Suggest),
            "inspire" => Ok(Self::Inspire),
            _ => Err(format!("unknown enrichment kind: {s}")),
        }
    }
}

/// A captured idea, matching the `ideas` table schema.
///
/// `tags` and `connections` are typed collections at this boundary; their
/// JSON column encoding is private to the store layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Idea {
    /// UUID v7 (time-sortable) primary key. Never changes.
    pub id: String,
    /// Sanitized, non-empty text content.
    pub content: String,
    /// Capture instant. Immutable once created.
    pub timestamp: DateTime<Utc>,
    /// Lowercase, deduplicated tags in first-seen order.
    pub tags: Vec<String>,
    /// Favorite toggle.
    pub is_favorite: bool,
    /// Ids of connected ideas. The relation is symmetric.
    pub connections: Vec<String>,
    /// Enrichments owned by this idea, most-recent-first.
    pub enrichments: Vec<Enrichment>,
}

/// An AI enrichment record, matching the `enrichments` table schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrichment {
    /// UUID v7 primary key.
    pub id: String,
    /// Owning idea. Rows cascade when the idea is deleted.
    pub idea_id: String,
    /// Which operation produced this record.
    pub kind: EnrichmentKind,
    /// Free-form completion text, stored as returned (trimmed).
    pub content: String,
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
    /// For combine results, the ids of all input ideas.
    pub related_ideas: Vec<String>,
}

/// Aggregate counters over the whole pile.
#[derive(Debug, Clone, Serialize)]
pub struct PileStats {
    pub total_ideas: usize,
    pub favorite_ideas: usize,
    pub enrichments: usize,
    /// Symmetric pairs counted once.
    pub connections: usize,
}
