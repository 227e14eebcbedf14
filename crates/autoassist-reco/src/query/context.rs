//! Use-case and priority detection, plus the static per-use-case
//! configuration tables (default filters, weight overrides, detection
//! keywords).

use std::sync::LazyLock;

use regex::Regex;

use crate::scoring::WeightOverrides;
use crate::types::{Filters, Priority, UseCase};

/// Canonical configuration for one non-general use case.
pub struct UseCaseConfig {
    pub use_case: UseCase,
    /// Gap-filling defaults — extracted/explicit filter fields always win.
    pub default_filters: Filters,
    /// Partial weight override; omitted components keep the global default.
    pub weights: WeightOverrides,
    /// Lower-case keywords counted during fallback detection.
    pub keywords: &'static [&'static str],
}

pub static USE_CASE_CONFIGS: LazyLock<Vec<UseCaseConfig>> = LazyLock::new(|| {
    vec![
        UseCaseConfig {
            use_case: UseCase::Family,
            default_filters: Filters {
                min_seats: Some(5),
                min_airbags: Some(2),
                ..Default::default()
            },
            weights: WeightOverrides {
                price: Some(0.20),
                mileage: Some(0.15),
                safety: Some(0.30),
                features: Some(0.15),
                performance: Some(0.05),
                comfort: Some(0.15),
            },
            keywords: &[
                "family", "kids", "children", "7-seater", "7 seater", "suv", "spacious",
                "parents",
            ],
        },
        UseCaseConfig {
            use_case: UseCase::DailyCommute,
            default_filters: Filters {
                min_mileage: Some(15.0),
                ..Default::default()
            },
            weights: WeightOverrides {
                price: Some(0.30),
                mileage: Some(0.35),
                safety: Some(0.10),
                features: Some(0.10),
                performance: Some(0.05),
                comfort: Some(0.10),
            },
            keywords: &[
                "commute", "commuting", "city", "daily", "office", "traffic", "errands",
            ],
        },
        UseCaseConfig {
            use_case: UseCase::Highway,
            default_filters: Filters::default(),
            weights: WeightOverrides {
                price: Some(0.10),
                mileage: Some(0.10),
                safety: Some(0.25),
                features: Some(0.10),
                performance: Some(0.25),
                comfort: Some(0.20),
            },
            keywords: &[
                "highway", "long drive", "long drives", "road trip", "touring", "cruising",
                "intercity",
            ],
        },
        UseCaseConfig {
            use_case: UseCase::FirstCar,
            default_filters: Filters {
                max_price: Some(10.0),
                ..Default::default()
            },
            weights: WeightOverrides {
                price: Some(0.35),
                mileage: Some(0.20),
                safety: Some(0.25),
                features: Some(0.10),
                performance: Some(0.05),
                comfort: Some(0.05),
            },
            keywords: &[
                "first car", "beginner", "new driver", "learning", "student", "just started driving",
            ],
        },
        UseCaseConfig {
            use_case: UseCase::Luxury,
            default_filters: Filters {
                min_price: Some(15.0),
                ..Default::default()
            },
            weights: WeightOverrides {
                price: Some(0.05),
                mileage: Some(0.10),
                safety: Some(0.15),
                features: Some(0.25),
                performance: Some(0.15),
                comfort: Some(0.30),
            },
            keywords: &[
                "luxury", "luxurious", "premium", "high-end", "flagship", "plush", "top of the line",
            ],
        },
        UseCaseConfig {
            use_case: UseCase::OffRoad,
            default_filters: Filters::default(),
            weights: WeightOverrides {
                price: Some(0.10),
                mileage: Some(0.10),
                safety: Some(0.20),
                features: Some(0.10),
                performance: Some(0.35),
                comfort: Some(0.15),
            },
            keywords: &[
                "off-road", "offroad", "off road", "adventure", "terrain", "mountains", "trails",
                "4x4",
            ],
        },
    ]
});

/// Look up the static config for a use case; `General` has none.
pub fn config_for(use_case: UseCase) -> Option<&'static UseCaseConfig> {
    USE_CASE_CONFIGS.iter().find(|c| c.use_case == use_case)
}

/// Count keyword hits per use case; the strictly highest count wins, ties
/// keep the first-declared case. Zero hits everywhere means `General`.
pub fn detect_use_case(query: &str) -> UseCase {
    let query_lower = query.to_lowercase();

    let mut best = UseCase::General;
    let mut best_count = 0usize;
    for config in USE_CASE_CONFIGS.iter() {
        let count = config
            .keywords
            .iter()
            .filter(|k| query_lower.contains(*k))
            .count();
        if count > best_count {
            best = config.use_case;
            best_count = count;
        }
    }
    best
}

static PRIORITY_PATTERNS: LazyLock<Vec<(Priority, Regex)>> = LazyLock::new(|| {
    vec![
        (
            Priority::Price,
            Regex::new(r"\b(cheap(est)?|budget|affordable|value for money|low(est)? price)\b")
                .expect("price priority regex is valid"),
        ),
        (
            Priority::Safety,
            Regex::new(r"\b(safe(st|ty)?|secure|crash|ncap|airbags?)\b")
                .expect("safety priority regex is valid"),
        ),
        (
            Priority::Efficiency,
            Regex::new(r"\b(mileage|fuel.efficien\w*|economical|kmpl|efficiency)\b")
                .expect("efficiency priority regex is valid"),
        ),
        (
            Priority::Features,
            Regex::new(r"\b(features?|feature.loaded|gadgets?|tech.laden|well.equipped)\b")
                .expect("features priority regex is valid"),
        ),
        (
            Priority::Performance,
            Regex::new(r"\b(fast(est)?|powerful|performance|speed|quick|sporty|bhp)\b")
                .expect("performance priority regex is valid"),
        ),
        (
            Priority::Comfort,
            Regex::new(r"\b(comfort(able)?|plush ride|smooth ride|relaxed)\b")
                .expect("comfort priority regex is valid"),
        ),
    ]
});

/// Test the six priority groups in declaration order; the first that matches
/// wins, so at most one priority is ever set.
pub fn detect_priority(query: &str) -> Option<Priority> {
    let query_lower = query.to_lowercase();
    PRIORITY_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(&query_lower))
        .map(|(p, _)| *p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_family_from_seater_and_suv() {
        assert_eq!(detect_use_case("7-seater SUV under 15 lakhs"), UseCase::Family);
    }

    #[test]
    fn test_detect_commute() {
        assert_eq!(
            detect_use_case("something for my daily city commute"),
            UseCase::DailyCommute
        );
    }

    #[test]
    fn test_no_keywords_is_general() {
        assert_eq!(detect_use_case("red car with good looks"), UseCase::General);
    }

    #[test]
    fn test_tie_keeps_first_declared() {
        // One family hit ("suv") and one off-road hit ("adventure"): family
        // is declared first and strict > means it keeps the win.
        assert_eq!(detect_use_case("suv for adventure"), UseCase::Family);
    }

    #[test]
    fn test_priority_first_match_wins() {
        // "cheap" (price) and "safety" both present; price is tested first.
        assert_eq!(
            detect_priority("cheap car with good safety"),
            Some(Priority::Price)
        );
        assert_eq!(detect_priority("most comfortable ride"), Some(Priority::Comfort));
        assert_eq!(detect_priority("a car"), None);
    }

    #[test]
    fn test_config_lookup() {
        assert!(config_for(UseCase::Family).is_some());
        assert!(config_for(UseCase::General).is_none());
        let luxury = config_for(UseCase::Luxury).unwrap();
        assert_eq!(luxury.default_filters.min_price, Some(15.0));
    }
}
