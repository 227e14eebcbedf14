//! Requirement extraction: free-text query → structured constraints.
//!
//! Two paths produce the same shape. The primary path asks a language model
//! for a structured object; the fallback path runs fixed pattern matching.
//! Extraction is total — every irregularity on the primary path (no
//! credentials, transport error, timeout, malformed response) silently
//! degrades to the fallback, never to an error.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

use crate::llm::{GenerationConfig, LlmProvider};
use crate::types::{Filters, QueryContext, UseCase};

pub mod context;
pub mod fallback;

/// Extractor output: constraints, usage intent, the human-readable tokens
/// that fired, and a path-dependent confidence in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    pub filters: Filters,
    pub context: QueryContext,
    pub keywords: Vec<String>,
    pub confidence: f64,
}

const EXTRACTION_PROMPT: &str = r#"You are a query analyzer for a car recommendation system. Extract structured requirements from the user's query and respond with ONLY a JSON object of this exact shape:

{"filters":{"minPrice":null,"maxPrice":null,"brands":null,"bodyTypes":null,"minSeats":null,"maxSeats":null,"minMileage":null,"transmission":null,"driveTypes":null,"minAirbags":null,"minSafetyRating":null,"requiredFeatures":null,"segments":null},"context":{"useCase":"general","priority":null},"keywords":[]}

RULES:
- Prices are in lakhs. "under X lakhs" means maxPrice = X; "above X lakhs" means minPrice = X; "between X and Y lakhs" sets both.
- bodyTypes values: Hatchback, Sedan, SUV, MUV, MPV, Coupe, Convertible, Wagon.
- useCase is one of: family, daily_commute, highway, first_car, luxury, off_road, general.
- priority, when clearly stated, is one of: price, safety, efficiency, features, performance, comfort. Otherwise null.
- keywords: the short phrases from the query that drove your extraction.
- Leave every filter you cannot justify as null. Do not invent constraints.

Output ONLY the JSON object, nothing else."#;

fn build_extraction_prompt(query: &str) -> String {
    format!("{}\n\nUser query: \"{}\"\nJSON:", EXTRACTION_PROMPT, query)
}

/// Shape of the model's structured reply.
#[derive(Debug, Deserialize)]
struct LlmExtraction {
    #[serde(default)]
    filters: Filters,
    context: LlmContext,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmContext {
    use_case: UseCase,
    #[serde(default)]
    priority: Option<crate::types::Priority>,
}

/// Parse the model's reply, tolerating markdown fences and trailing prose.
fn parse_extraction_response(raw: &str) -> Result<Extraction> {
    let cleaned = raw
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let json_str = match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if end > start => &cleaned[start..=end],
        _ => cleaned,
    };

    let parsed: LlmExtraction =
        serde_json::from_str(json_str).context("extraction response is not valid JSON")?;

    Ok(Extraction {
        filters: parsed.filters,
        context: QueryContext {
            use_case: parsed.context.use_case,
            priority: parsed.context.priority,
        },
        keywords: parsed.keywords,
        confidence: 0.8,
    })
}

/// Merge use-case defaults under the extracted filters and canonicalize.
/// Shared tail of both extraction paths.
fn finalize(mut extraction: Extraction) -> Extraction {
    if extraction.context.use_case != UseCase::General {
        if let Some(config) = context::config_for(extraction.context.use_case) {
            extraction.filters = config.default_filters.merged_with(&extraction.filters);
        }
    }
    extraction.filters.normalize();
    extraction
}

/// Turns a free-text query into a `Filters` + `QueryContext` pair.
pub struct RequirementExtractor {
    llm: Option<Arc<dyn LlmProvider>>,
    generation: GenerationConfig,
}

impl RequirementExtractor {
    /// Extractor with no model configured: fallback path only.
    pub fn new() -> Self {
        Self {
            llm: None,
            generation: GenerationConfig::default(),
        }
    }

    pub fn with_llm(llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            llm: Some(llm),
            generation: GenerationConfig::default(),
        }
    }

    /// Extract requirements from a query. Always succeeds.
    pub async fn extract(&self, query: &str) -> Extraction {
        if let Some(llm) = &self.llm {
            match self.extract_with_llm(llm.as_ref(), query).await {
                Ok(extraction) => {
                    tracing::info!(
                        provider = %llm.describe(),
                        filters = ?extraction.filters,
                        use_case = ?extraction.context.use_case,
                        "extracted requirements via model"
                    );
                    return finalize(extraction);
                }
                Err(e) => {
                    tracing::warn!("model extraction failed ({e:#}), using pattern fallback");
                }
            }
        }
        // fallback::extract already runs the use-case merge + normalize.
        fallback::extract(query)
    }

    async fn extract_with_llm(&self, llm: &dyn LlmProvider, query: &str) -> Result<Extraction> {
        let prompt = build_extraction_prompt(query);
        let raw = llm.generate(&prompt, &self.generation).await?;
        parse_extraction_response(&raw)
    }
}

impl Default for RequirementExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    #[test]
    fn test_parse_clean_json() {
        let raw = r#"{"filters":{"maxPrice":15.0,"bodyTypes":["SUV"]},"context":{"useCase":"family","priority":"safety"},"keywords":["SUV","under 15 lakhs"]}"#;
        let ex = parse_extraction_response(raw).unwrap();
        assert_eq!(ex.filters.max_price, Some(15.0));
        assert_eq!(ex.context.use_case, UseCase::Family);
        assert_eq!(ex.context.priority, Some(Priority::Safety));
        assert_eq!(ex.confidence, 0.8);
    }

    #[test]
    fn test_parse_with_fences() {
        let raw = "```json\n{\"filters\":{},\"context\":{\"useCase\":\"general\"},\"keywords\":[]}\n```";
        let ex = parse_extraction_response(raw).unwrap();
        assert_eq!(ex.context.use_case, UseCase::General);
        assert!(ex.filters.is_empty());
    }

    #[test]
    fn test_parse_with_trailing_prose() {
        let raw = r#"Here you go: {"filters":{"minMileage":18.0},"context":{"useCase":"daily_commute"},"keywords":["fuel efficient"]} Hope that helps!"#;
        let ex = parse_extraction_response(raw).unwrap();
        assert_eq!(ex.filters.min_mileage, Some(18.0));
        assert_eq!(ex.context.use_case, UseCase::DailyCommute);
    }

    #[test]
    fn test_parse_garbage_is_error() {
        assert!(parse_extraction_response("I can't answer that").is_err());
        assert!(parse_extraction_response("{\"filters\":").is_err());
    }

    #[test]
    fn test_parse_unknown_use_case_is_error() {
        let raw = r#"{"filters":{},"context":{"useCase":"racing"},"keywords":[]}"#;
        assert!(parse_extraction_response(raw).is_err());
    }

    #[test]
    fn test_finalize_fills_gaps_from_use_case() {
        let ex = parse_extraction_response(
            r#"{"filters":{"maxPrice":20.0},"context":{"useCase":"family"},"keywords":[]}"#,
        )
        .unwrap();
        let ex = finalize(ex);
        // Family defaults fill minSeats; the extracted maxPrice is kept.
        assert_eq!(ex.filters.max_price, Some(20.0));
        assert_eq!(ex.filters.min_seats, Some(5));
    }

    #[tokio::test]
    async fn test_extract_without_model_uses_fallback() {
        let extractor = RequirementExtractor::new();
        let ex = extractor.extract("7-seater SUV under 15 lakhs").await;
        assert_eq!(ex.filters.max_price, Some(15.0));
        assert_eq!(ex.filters.min_seats, Some(7));
        assert_eq!(ex.context.use_case, UseCase::Family);
        assert_eq!(ex.confidence, 0.6);
    }

    struct BrokenProvider;

    #[async_trait::async_trait]
    impl LlmProvider for BrokenProvider {
        async fn generate(
            &self,
            _prompt: &str,
            _config: &GenerationConfig,
        ) -> Result<String> {
            anyhow::bail!("service unavailable")
        }

        fn describe(&self) -> String {
            "broken/test".to_string()
        }
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_fallback() {
        let extractor = RequirementExtractor::with_llm(Arc::new(BrokenProvider));
        let ex = extractor.extract("suv under 15 lakhs").await;
        assert_eq!(ex.filters.max_price, Some(15.0));
        assert_eq!(ex.confidence, 0.6);
    }

    struct CannedProvider(String);

    #[async_trait::async_trait]
    impl LlmProvider for CannedProvider {
        async fn generate(
            &self,
            _prompt: &str,
            _config: &GenerationConfig,
        ) -> Result<String> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "canned/test".to_string()
        }
    }

    #[tokio::test]
    async fn test_primary_path_confidence() {
        let raw = r#"{"filters":{"maxPrice":12.0},"context":{"useCase":"general"},"keywords":["under 12 lakhs"]}"#;
        let extractor = RequirementExtractor::with_llm(Arc::new(CannedProvider(raw.to_string())));
        let ex = extractor.extract("anything under 12 lakhs").await;
        assert_eq!(ex.confidence, 0.8);
        assert_eq!(ex.filters.max_price, Some(12.0));
    }
}
