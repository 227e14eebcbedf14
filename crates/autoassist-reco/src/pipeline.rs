//! End-to-end query pipeline: extract, filter, score.
//!
//! Data flows strictly forward and every stage is total, so a query always
//! yields a response. An empty recommendation list is a valid outcome; the
//! caller owns any filter-relaxation retry policy.

use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RecoConfig;
use crate::filter;
use crate::llm::ExternalProvider;
use crate::query::{Extraction, RequirementExtractor};
use crate::scoring;
use crate::types::{Filters, Recommendation, Vehicle};

/// Response payload for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoResponse {
    pub extraction: Extraction,
    /// Candidate count after filtering, before any result-size cap.
    pub candidate_count: usize,
    pub recommendations: Vec<Recommendation>,
}

pub struct RecoPipeline {
    extractor: RequirementExtractor,
    max_results: usize,
}

impl RecoPipeline {
    /// Build from config. A missing API key is not an error; the pipeline
    /// runs on the deterministic extraction path alone.
    pub fn new(config: &RecoConfig) -> Result<Self> {
        let extractor = match &config.extraction.api_key {
            Some(api_key) if !api_key.is_empty() => {
                let provider = ExternalProvider::new(
                    config.extraction.provider.clone(),
                    api_key.clone(),
                    config.extraction.model.clone(),
                    config.extraction.timeout_secs,
                )?;
                info!(
                    model = %config.extraction.model,
                    "query extraction using external model with pattern fallback"
                );
                RequirementExtractor::with_llm(Arc::new(provider))
            }
            _ => {
                info!("no extraction credentials configured, pattern extraction only");
                RequirementExtractor::new()
            }
        };

        Ok(Self {
            extractor,
            max_results: config.results.max_results,
        })
    }

    /// Run the full pipeline over an in-memory candidate set.
    ///
    /// `explicit` carries caller-supplied constraints; its set fields win
    /// over extracted ones per field.
    pub async fn recommend(
        &self,
        query: &str,
        vehicles: &[Vehicle],
        explicit: Option<&Filters>,
    ) -> RecoResponse {
        let mut extraction = self.extractor.extract(query).await;
        if let Some(explicit) = explicit {
            extraction.filters = extraction.filters.merged_with(explicit);
            extraction.filters.normalize();
        }

        let candidates = filter::apply(vehicles, &extraction.filters);
        debug!(
            total = vehicles.len(),
            candidates = candidates.len(),
            "filtered candidate set"
        );

        let mut recommendations =
            scoring::score(&candidates, &extraction.filters, &extraction.context);
        recommendations.truncate(self.max_results);

        info!(
            query = %query,
            use_case = ?extraction.context.use_case,
            results = recommendations.len(),
            "ranked recommendations"
        );

        RecoResponse {
            extraction,
            candidate_count: candidates.len(),
            recommendations,
        }
    }
}
