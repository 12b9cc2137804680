use crate::config::config::LlmCfg;
use crate::llm::client::{Generation, GenerativeClient, GroundingChunk};
use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

impl GenerateContentResponse {
    /// Text of the first candidate (all text parts joined) plus its citations.
    fn into_generation(self) -> Result<Generation> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .context("No candidates in Gemini response")?;

        // answers can be split over several parts
        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        let grounding_chunks = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default();

        Ok(Generation {
            text: text.trim().to_string(),
            grounding_chunks,
        })
    }
}

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    cfg: LlmCfg,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl GeminiClient {
    pub fn new(cfg: LlmCfg, client: Client) -> Self {
        // a zero quota would block forever
        let rpm = NonZeroU32::new(cfg.rate_limit_rpm).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_minute(rpm)));

        Self {
            client,
            cfg,
            limiter,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.cfg.base_url.trim_end_matches('/'),
            self.cfg.model
        )
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        let mut body = json!({
            "contents": [
                { "role": "user", "parts": [ { "text": prompt } ] }
            ]
        });
        // search tool is what fills groundingMetadata
        if self.cfg.grounding_search {
            body["tools"] = json!([{ "google_search": {} }]);
        }
        body
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    fn model(&self) -> &str {
        &self.cfg.model
    }

    async fn generate(&self, prompt: &str) -> Result<Generation> {
        self.limiter.until_ready().await; // delays, never rejects

        let url = self.endpoint();
        info!("Calling LLM at {} with model {}", url, self.cfg.model);

        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.cfg.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .context("LLM request failed")?;

        // no retry on 429 / 5xx
        let status = res.status();
        if !status.is_success() {
            let err_text = res.text().await.unwrap_or_default();
            anyhow::bail!("LLM API error {}: {}", status, err_text);
        }

        let body: GenerateContentResponse =
            res.json().await.context("parsing LLM response")?;
        let generation = body.into_generation()?;
        debug!(
            chars = generation.text.len(),
            chunks = generation.grounding_chunks.len(),
            "LLM response received"
        );
        Ok(generation)
    }
}
