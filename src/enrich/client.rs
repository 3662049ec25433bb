//! HTTP boundary to the remote completion service.
//!
//! Text in, text out: one POST per call against an OpenAI-style
//! `/v1/chat/completions` endpoint. No streaming, no retries.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::ServiceConfig;
use crate::error::{Error, Result};

pub struct CompletionClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

impl CompletionClient {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// True iff an API credential is present.
    pub fn is_configured(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    pub fn default_max_tokens(&self) -> u32 {
        self.config.max_tokens
    }

    pub fn default_temperature(&self) -> f32 {
        self.config.temperature
    }

    /// Issue one completion request and return the trimmed reply text.
    ///
    /// Transport failures, non-2xx statuses, and empty completions all map
    /// to [`Error::RemoteService`].
    pub async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::RemoteService("no API credential configured".into()))?;

        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let body = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": max_tokens,
            "temperature": temperature,
        });

        debug!(%url, model = %self.config.model, max_tokens, temperature, "completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::RemoteService(format!(
                "completion request failed with {status}: {detail}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::RemoteService(format!("undecodable completion response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(Error::RemoteService("empty completion".into()));
        }
        Ok(content)
    }
}
