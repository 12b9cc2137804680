use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Handle on a text generation service. Injected wherever a model is called
/// so tests can substitute a canned implementation.
#[async_trait]
pub trait GenerativeClient: Send + Sync + 'static {
    fn model(&self) -> &str;

    /// Sends one prompt, no retry.
    async fn generate(&self, prompt: &str) -> Result<Generation>;
}

#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub text: String,
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// Citation attached by the service. Only web chunks are of interest, other
/// kinds deserialize with `web: None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WebChunk {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}
