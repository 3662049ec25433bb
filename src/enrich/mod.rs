//! Enrichment orchestration.
//!
//! [`Enricher`] turns ideas into prompts, calls the remote completion
//! service, and parses replies into typed drafts. The four primary
//! operations (expand, combine, suggest, inspire) surface failures untouched
//! so the caller can show an error and retry; connection discovery and the
//! configuration probes degrade instead.

mod client;
pub mod parse;
pub mod prompts;

use std::collections::HashSet;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::store::types::{EnrichmentKind, Idea};

pub use client::CompletionClient;

/// High sampling temperature for the inspire operation.
const INSPIRE_TEMPERATURE: f32 = 0.9;
/// Low temperature for connection analysis.
const CONNECTIONS_TEMPERATURE: f32 = 0.3;
const CONNECTIONS_MAX_TOKENS: u32 = 100;
const TAGS_MAX_TOKENS: u32 = 60;
const PROBE_MAX_TOKENS: u32 = 10;
/// Tag-generation cap.
const MAX_GENERATED_TAGS: usize = 5;
/// How many peers the degraded connection fallback returns.
const FALLBACK_CONNECTIONS: usize = 2;

/// An enrichment produced by the orchestrator, not yet persisted.
#[derive(Debug, Clone)]
pub struct EnrichmentDraft {
    pub kind: EnrichmentKind,
    pub content: String,
    pub related_ideas: Vec<String>,
}

/// The enrichment orchestrator. Holds the service client and the in-flight
/// set that rejects duplicate concurrent requests per `(idea, kind)`.
pub struct Enricher {
    client: CompletionClient,
    inflight: Mutex<HashSet<(String, EnrichmentKind)>>,
}

impl Enricher {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Ok(Self {
            client: CompletionClient::new(config)?,
            inflight: Mutex::new(HashSet::new()),
        })
    }

    /// True iff a credential for the remote service is configured.
    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// Minimal round trip against the service. Never errors.
    pub async fn test_connection(&self) -> bool {
        match self
            .client
            .complete(
                prompts::probe(),
                PROBE_MAX_TOKENS,
                self.client.default_temperature(),
            )
            .await
        {
            Ok(reply) => reply.contains("OK"),
            Err(err) => {
                debug!(%err, "connectivity probe failed");
                false
            }
        }
    }

    /// Elaborate one idea. Standard temperature; failures propagate.
    pub async fn expand(&self, idea: &Idea) -> Result<EnrichmentDraft> {
        let _guard = self.acquire(&[idea.id.clone()], EnrichmentKind::Expand)?;
        let content = self
            .client
            .complete(
                &prompts::expand(idea),
                self.client.default_max_tokens(),
                self.client.default_temperature(),
            )
            .await?;
        debug!(idea_id = %idea.id, "idea expanded");
        Ok(EnrichmentDraft {
            kind: EnrichmentKind::Expand,
            content,
            related_ideas: Vec::new(),
        })
    }

    /// Merge two or more ideas into a new concept. `related_ideas` carries
    /// the ids of every input.
    pub async fn combine(&self, ideas: &[Idea]) -> Result<EnrichmentDraft> {
        if ideas.len() < 2 {
            return Err(Error::InsufficientInput(ideas.len()));
        }
        let ids: Vec<String> = ideas.iter().map(|i| i.id.clone()).collect();
        let _guard = self.acquire(&ids, EnrichmentKind::Combine)?;

        let content = self
            .client
            .complete(
                &prompts::combine(ideas),
                self.client.default_max_tokens(),
                self.client.default_temperature(),
            )
            .await?;
        debug!(count = ideas.len(), "ideas combined");
        Ok(EnrichmentDraft {
            kind: EnrichmentKind::Combine,
            content,
            related_ideas: ids,
        })
    }

    /// Ask for 3-5 related ideas as a plain numbered list, stored as
    /// returned.
    pub async fn suggest_related(&self, idea: &Idea) -> Result<EnrichmentDraft> {
        let _guard = self.acquire(&[idea.id.clone()], EnrichmentKind::Suggest)?;
        let content = self
            .client
            .complete(
                &prompts::suggest(idea),
                self.client.default_max_tokens(),
                self.client.default_temperature(),
            )
            .await?;
        debug!(idea_id = %idea.id, "related ideas suggested");
        Ok(EnrichmentDraft {
            kind: EnrichmentKind::Suggest,
            content,
            related_ideas: Vec::new(),
        })
    }

    /// Reframe one idea from an unexpected angle, at high temperature.
    pub async fn inspire(&self, idea: &Idea) -> Result<EnrichmentDraft> {
        let _guard = self.acquire(&[idea.id.clone()], EnrichmentKind::Inspire)?;
        let content = self
            .client
            .complete(
                &prompts::inspire(idea),
                self.client.default_max_tokens(),
                INSPIRE_TEMPERATURE,
            )
            .await?;
        debug!(idea_id = %idea.id, "idea inspired");
        Ok(EnrichmentDraft {
            kind: EnrichmentKind::Inspire,
            content,
            related_ideas: Vec::new(),
        })
    }

    /// Ask which corpus ideas connect meaningfully to `idea`, by number,
    /// and map the reply back to ids.
    ///
    /// Degraded mode by design: any call or parse failure returns the first
    /// `min(2, peers)` other ideas instead of an error.
    pub async fn find_connections(&self, idea: &Idea, corpus: &[Idea]) -> Vec<String> {
        let others: Vec<&Idea> = corpus.iter().filter(|i| i.id != idea.id).collect();
        if others.is_empty() {
            return Vec::new();
        }

        match self.try_find_connections(idea, &others).await {
            Ok(ids) => ids,
            Err(err) => {
                warn!(idea_id = %idea.id, %err, "connection discovery failed, using fallback");
                others
                    .iter()
                    .take(FALLBACK_CONNECTIONS)
                    .map(|i| i.id.clone())
                    .collect()
            }
        }
    }

    async fn try_find_connections(&self, idea: &Idea, others: &[&Idea]) -> Result<Vec<String>> {
        let prompt = prompts::connections(idea, others.iter().copied());
        let reply = self
            .client
            .complete(&prompt, CONNECTIONS_MAX_TOKENS, CONNECTIONS_TEMPERATURE)
            .await?;
        let indices = parse::connection_indices(&reply, others.len())?;
        Ok(indices.into_iter().map(|i| others[i].id.clone()).collect())
    }

    /// Derive a small tag set from free text. Call failures propagate; the
    /// reply parse degrades to whatever valid tags it can extract.
    pub async fn generate_tags(&self, text: &str) -> Result<Vec<String>> {
        let reply = self
            .client
            .complete(
                &prompts::tags(text),
                TAGS_MAX_TOKENS,
                self.client.default_temperature(),
            )
            .await?;
        Ok(parse::tag_list(&reply, MAX_GENERATED_TAGS))
    }

    /// Reserve `(id, kind)` slots, rejecting any that are already running.
    fn acquire(&self, idea_ids: &[String], kind: EnrichmentKind) -> Result<InflightGuard<'_>> {
        let mut set = self
            .inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        for id in idea_ids {
            if set.contains(&(id.clone(), kind)) {
                return Err(Error::InFlight {
                    idea_id: id.clone(),
                    kind: kind.to_string(),
                });
            }
        }

        let keys: Vec<(String, EnrichmentKind)> =
            idea_ids.iter().map(|id| (id.clone(), kind)).collect();
        for key in &keys {
            set.insert(key.clone());
        }
        drop(set);

        Ok(InflightGuard {
            inflight: &self.inflight,
            keys,
        })
    }
}

/// Releases reserved in-flight slots when the operation finishes, whether it
/// succeeded or failed.
#[derive(Debug)]
struct InflightGuard<'a> {
    inflight: &'a Mutex<HashSet<(String, EnrichmentKind)>>,
    keys: Vec<(String, EnrichmentKind)>,
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut set) = self.inflight.lock() {
            for key in &self.keys {
                set.remove(key);
            }
        }
    }
}
