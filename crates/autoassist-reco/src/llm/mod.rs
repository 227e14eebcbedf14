//! Minimal external-LLM provider layer.
//!
//! The pipeline uses a language model for exactly one thing: structured
//! requirement extraction. Any provider failure is absorbed by the caller's
//! deterministic fallback, so this layer only needs to return text or an
//! error within a bounded wait.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod external;

pub use external::ExternalProvider;

/// External API providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ApiProvider {
    OpenAI,
    Groq,
    Google,
    Ollama,
    Custom { endpoint: String },
}

/// Generation parameters for one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub max_tokens: usize,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.3,
            top_p: 0.95,
        }
    }
}

/// Core trait for LLM providers.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for a single prompt.
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String>;

    /// Provider name and model, for logging.
    fn describe(&self) -> String;
}
