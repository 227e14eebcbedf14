use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::llm::ApiProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoConfig {
    pub data_dir: PathBuf,
    pub catalog: CatalogConfig,
    pub extraction: ExtractionConfig,
    pub results: ResultConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON snapshot of raw store documents.
    pub snapshot_path: PathBuf,
}

/// Language-model settings for the primary extraction path. Extraction works
/// without any of this configured; `api_key = None` means fallback-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub provider: ApiProvider,
    pub model: String,
    pub api_key: Option<String>,
    /// Whole-request budget; a slow model call degrades to the fallback
    /// extractor rather than stalling the query.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultConfig {
    /// Ranked recommendations returned per query.
    pub max_results: usize,
    /// Minimum candidate-set size before the caller should consider
    /// relaxing filters.
    pub min_candidates: usize,
}

impl RecoConfig {
    /// Validate config values, returning errors for clearly broken configurations.
    pub fn validate(&self) -> Result<(), String> {
        if self.extraction.timeout_secs == 0 {
            return Err("extraction.timeout_secs must be > 0".into());
        }
        if self.extraction.model.is_empty() {
            return Err("extraction.model must not be empty".into());
        }
        if self.results.max_results == 0 {
            return Err("results.max_results must be > 0".into());
        }
        if let ApiProvider::Custom { endpoint } = &self.extraction.provider {
            if endpoint.is_empty() {
                return Err("extraction.provider custom endpoint must not be empty".into());
            }
        }
        Ok(())
    }

    /// Load config from a JSON file, falling back to defaults for missing fields.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for RecoConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("autoassist-reco");

        let api_key = std::env::var("GROQ_API_KEY").ok();

        Self {
            catalog: CatalogConfig {
                snapshot_path: data_dir.join("catalog.json"),
            },
            extraction: ExtractionConfig {
                provider: ApiProvider::Groq,
                model: "llama-3.1-8b-instant".to_string(),
                api_key,
                timeout_secs: 10,
            },
            results: ResultConfig {
                max_results: 10,
                min_candidates: 3,
            },
            data_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RecoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = RecoConfig::default();
        config.extraction.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_custom_endpoint_rejected() {
        let mut config = RecoConfig::default();
        config.extraction.provider = ApiProvider::Custom {
            endpoint: String::new(),
        };
        assert!(config.validate().is_err());
    }
}
