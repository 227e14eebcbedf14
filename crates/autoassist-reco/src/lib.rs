pub mod config;
pub mod filter;
pub mod llm;
pub mod pipeline;
pub mod query;
pub mod scoring;
pub mod store;
pub mod types;

// Re-export primary types for convenience
pub use config::RecoConfig;
pub use pipeline::{RecoPipeline, RecoResponse};
pub use query::{Extraction, RequirementExtractor};
pub use scoring::ScoringWeights;
pub use store::CatalogStore;
pub use types::{Filters, Priority, QueryContext, Recommendation, UseCase, Vehicle};

// Re-export LLM types
pub use llm::{ApiProvider, ExternalProvider, GenerationConfig, LlmProvider};

// Re-export common types
pub use anyhow::{Error, Result};
