//! Application facade wiring the store and the orchestrator.
//!
//! [`IdeaPile`] is constructed once by the entry point and passed down.
//! It owns the capture path (hashtag extraction, optional auto-tagging) and
//! the enrich-then-persist pipeline; everything else is reachable directly
//! on [`IdeaPile::store`].

use tracing::warn;

use crate::config::PileConfig;
use crate::enrich::Enricher;
use crate::error::{Error, Result};
use crate::store::types::{Enrichment, EnrichmentKind, Idea, PileStats};
use crate::store::IdeaStore;
use crate::text;

pub struct IdeaPile {
    pub store: IdeaStore,
    pub enricher: Enricher,
    auto_tagging: bool,
}

impl IdeaPile {
    /// Open the pile described by `config`.
    pub fn open(config: &PileConfig) -> Result<Self> {
        let store = IdeaStore::open(config.resolved_db_path())?;
        let enricher = Enricher::new(config.service.clone())?;
        Ok(Self {
            store,
            enricher,
            auto_tagging: config.capture.auto_tagging,
        })
    }

    /// In-memory pile for tests.
    pub fn open_in_memory(config: &PileConfig) -> Result<Self> {
        let store = IdeaStore::open_in_memory()?;
        let enricher = Enricher::new(config.service.clone())?;
        Ok(Self {
            store,
            enricher,
            auto_tagging: config.capture.auto_tagging,
        })
    }

    /// Capture an idea. Inline `#hashtag`s are extracted from the content
    /// and merged with the explicit tags; the literal text is stored
    /// unchanged apart from sanitization.
    pub fn capture(&mut self, content: &str, tags: &[String]) -> Result<Idea> {
        let mut all = tags.to_vec();
        all.extend(text::extract_hashtags(content));
        self.store.create(content, &all)
    }

    /// Capture with service-derived tags when auto-tagging is enabled.
    /// Any enrichment failure falls back to a plain capture.
    pub async fn capture_auto_tagged(&mut self, content: &str, tags: &[String]) -> Result<Idea> {
        if !self.auto_tagging || !self.enricher.is_configured() {
            return self.capture(content, tags);
        }

        match self.enricher.generate_tags(content).await {
            Ok(generated) => {
                let mut all = tags.to_vec();
                all.extend(generated);
                self.capture(content, &all)
            }
            Err(err) => {
                warn!(%err, "auto-tagging failed, capturing without generated tags");
                self.capture(content, tags)
            }
        }
    }

    /// Run one single-idea enrichment and persist the result. A failed call
    /// writes nothing, so the operation is retryable.
    pub async fn enrich(&mut self, idea_id: &str, kind: EnrichmentKind) -> Result<Enrichment> {
        let idea = self.store.get(idea_id)?;
        let draft = match kind {
            EnrichmentKind::Expand => self.enricher.expand(&idea).await?,
            EnrichmentKind::Suggest => self.enricher.suggest_related(&idea).await?,
            EnrichmentKind::Inspire => self.enricher.inspire(&idea).await?,
            EnrichmentKind::Combine => return Err(Error::InsufficientInput(1)),
        };
        self.store
            .add_enrichment(idea_id, draft.kind, &draft.content, &draft.related_ideas)
    }

    /// Combine several ideas and persist the result under the first input.
    pub async fn combine(&mut self, idea_ids: &[String]) -> Result<Enrichment> {
        let ideas: Vec<Idea> = idea_ids
            .iter()
            .map(|id| self.store.get(id))
            .collect::<Result<_>>()?;
        let draft = self.enricher.combine(&ideas).await?;
        self.store
            .add_enrichment(&ideas[0].id, draft.kind, &draft.content, &draft.related_ideas)
    }

    /// Discover connections for one idea across the whole corpus and record
    /// each as a symmetric connection. Returns the connected ids.
    pub async fn discover_connections(&mut self, idea_id: &str) -> Result<Vec<String>> {
        let idea = self.store.get(idea_id)?;
        let corpus = self.store.list_all()?;
        let found = self.enricher.find_connections(&idea, &corpus).await;
        for other in &found {
            self.store.connect(idea_id, other)?;
        }
        Ok(found)
    }

    pub fn stats(&self) -> Result<PileStats> {
        self.store.stats()
    }
}
