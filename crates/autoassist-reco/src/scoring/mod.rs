//! Multi-criteria weighted scoring and ranking.
//!
//! Final score per vehicle = Σ(sub-score × weight) over six sub-scores,
//! plus an additive use-case bonus, scaled by an optional priority
//! multiplier, clamped to [0, 100] and rounded. Per-vehicle evaluation is
//! independent; the final sort is stable so ties keep input order.

use serde::{Deserialize, Serialize};

use crate::query::context::config_for;
use crate::types::{Filters, QueryContext, Recommendation, UseCase, Vehicle};

pub mod bonus;
pub mod highlights;
pub mod subscores;

/// The six multiplicative weights. The use-case context component is always
/// additive, so it has no weight here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub price: f64,
    pub mileage: f64,
    pub safety: f64,
    pub features: f64,
    pub performance: f64,
    pub comfort: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            price: 0.25,
            mileage: 0.20,
            safety: 0.20,
            features: 0.15,
            performance: 0.10,
            comfort: 0.10,
        }
    }
}

/// Partial weight override from a `UseCaseConfig`. Only supplied components
/// replace the base weight.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightOverrides {
    pub price: Option<f64>,
    pub mileage: Option<f64>,
    pub safety: Option<f64>,
    pub features: Option<f64>,
    pub performance: Option<f64>,
    pub comfort: Option<f64>,
}

impl ScoringWeights {
    /// Pure merge: fields present on the override replace the base value.
    pub fn with_overrides(self, overrides: &WeightOverrides) -> ScoringWeights {
        ScoringWeights {
            price: overrides.price.unwrap_or(self.price),
            mileage: overrides.mileage.unwrap_or(self.mileage),
            safety: overrides.safety.unwrap_or(self.safety),
            features: overrides.features.unwrap_or(self.features),
            performance: overrides.performance.unwrap_or(self.performance),
            comfort: overrides.comfort.unwrap_or(self.comfort),
        }
    }
}

/// Effective weights for a context: global defaults, overridden per use case.
pub fn weights_for(context: &QueryContext) -> ScoringWeights {
    let base = ScoringWeights::default();
    if context.use_case == UseCase::General {
        return base;
    }
    match config_for(context.use_case) {
        Some(config) => base.with_overrides(&config.weights),
        None => base,
    }
}

/// Score and rank candidates, descending. Vehicles missing brand, model,
/// price or mileage cannot be meaningfully ranked and are excluded.
pub fn score(vehicles: &[Vehicle], filters: &Filters, context: &QueryContext) -> Vec<Recommendation> {
    let weights = weights_for(context);

    let mut ranked: Vec<Recommendation> = vehicles
        .iter()
        .filter(|v| v.is_scorable())
        .map(|v| score_one(v, filters, context, &weights))
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

fn score_one(
    vehicle: &Vehicle,
    filters: &Filters,
    context: &QueryContext,
    weights: &ScoringWeights,
) -> Recommendation {
    let price_sub = subscores::price_score(vehicle, filters);
    let mileage_sub = subscores::mileage_score(vehicle, filters);
    let safety_sub = subscores::safety_score(vehicle);
    let features_sub = subscores::features_score(vehicle);
    let performance_sub = subscores::performance_score(vehicle);
    let comfort_sub = subscores::comfort_score(vehicle);

    let mut total = price_sub * weights.price
        + mileage_sub * weights.mileage
        + safety_sub * weights.safety
        + features_sub * weights.features
        + performance_sub * weights.performance
        + comfort_sub * weights.comfort;

    total += bonus::context_bonus(vehicle, context.use_case);

    if let Some(priority) = context.priority {
        total *= bonus::priority_multiplier(vehicle, priority, price_sub, features_sub);
    }

    let score = total.clamp(0.0, 100.0).round() as u32;

    Recommendation {
        id: vehicle.id.clone(),
        brand: vehicle.brand.clone(),
        model: vehicle.model.clone(),
        variant: vehicle.variant.clone(),
        price_lakhs: vehicle.price_lakhs,
        mileage_arai: vehicle.mileage_arai,
        score,
        highlights: highlights::generate(vehicle, context),
    }
}
