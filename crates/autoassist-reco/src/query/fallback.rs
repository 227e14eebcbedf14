//! Deterministic pattern-matching extractor.
//!
//! This is the full extraction path when no LLM is configured, and the
//! degradation target for every primary-path failure. Given the same query
//! string it always produces the same result.

use std::sync::LazyLock;

use regex::Regex;

use super::context::{config_for, detect_priority, detect_use_case};
use super::Extraction;
use crate::types::{Filters, QueryContext, UseCase};

/// Known brands, checked as case-insensitive substrings of the query.
/// Match output order follows this list, not query order.
const KNOWN_BRANDS: &[&str] = &[
    "Maruti",
    "Tata",
    "Mahindra",
    "Hyundai",
    "Kia",
    "Toyota",
    "Honda",
    "Volkswagen",
    "Skoda",
    "Renault",
    "Nissan",
    "Jeep",
    "Citroen",
    "BMW",
    "Mercedes",
    "Audi",
];

const BODY_TYPES: &[&str] = &[
    "Hatchback",
    "Sedan",
    "SUV",
    "MUV",
    "MPV",
    "Coupe",
    "Convertible",
    "Wagon",
];

static PRICE_UNDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:under|below|less than)\s+(?:₹\s*)?(\d+(?:\.\d+)?)\s*lakhs?")
        .expect("under-price regex is valid")
});
static PRICE_ABOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:above|over|more than)\s+(?:₹\s*)?(\d+(?:\.\d+)?)\s*lakhs?")
        .expect("above-price regex is valid")
});
static PRICE_PLAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*lakhs?").expect("plain-price regex is valid")
});
static PRICE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:to|-)\s*(\d+(?:\.\d+)?)\s*lakhs?")
        .expect("range-price regex is valid")
});
static SEATER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)[- ]?seater").expect("seater regex is valid"));
static MILEAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:kmpl|km/l)").expect("mileage regex is valid")
});

fn parse_f64(m: &str) -> Option<f64> {
    m.parse::<f64>().ok()
}

/// Extract filters, context and keywords from a query with fixed patterns.
/// Confidence is 0.6 when at least one pattern fired, 0.3 otherwise.
pub fn extract(query: &str) -> Extraction {
    let query_lower = query.to_lowercase();
    let mut filters = Filters::default();
    let mut keywords: Vec<String> = Vec::new();

    // Single-sided price. A bare "<n> lakh" quantity is read as a budget cap.
    if let Some(caps) = PRICE_UNDER_RE.captures(&query_lower) {
        if let Some(v) = parse_f64(&caps[1]) {
            filters.max_price = Some(v);
            keywords.push(format!("under {} lakh", &caps[1]));
        }
    } else if let Some(caps) = PRICE_ABOVE_RE.captures(&query_lower) {
        if let Some(v) = parse_f64(&caps[1]) {
            filters.min_price = Some(v);
            keywords.push(format!("above {} lakh", &caps[1]));
        }
    } else if let Some(caps) = PRICE_PLAIN_RE.captures(&query_lower) {
        if let Some(v) = parse_f64(&caps[1]) {
            filters.max_price = Some(v);
            keywords.push(format!("{} lakh", &caps[1]));
        }
    }

    // Price range. Always attempted after the single-sided match; it sets
    // both bounds last and therefore wins on field collision.
    if let Some(caps) = PRICE_RANGE_RE.captures(&query_lower) {
        if let (Some(lo), Some(hi)) = (parse_f64(&caps[1]), parse_f64(&caps[2])) {
            filters.min_price = Some(lo);
            filters.max_price = Some(hi);
            keywords.push(format!("{} to {} lakh", &caps[1], &caps[2]));
        }
    }

    // Brands, in known-list order.
    let brands: Vec<String> = KNOWN_BRANDS
        .iter()
        .filter(|b| query_lower.contains(&b.to_lowercase()))
        .map(|b| b.to_string())
        .collect();
    if !brands.is_empty() {
        keywords.extend(brands.iter().cloned());
        filters.brands = Some(brands);
    }

    // Body types, in fixed-list order.
    let body_types: Vec<String> = BODY_TYPES
        .iter()
        .filter(|t| query_lower.contains(&t.to_lowercase()))
        .map(|t| t.to_string())
        .collect();
    if !body_types.is_empty() {
        keywords.extend(body_types.iter().cloned());
        filters.body_types = Some(body_types);
    }

    // Seats.
    if let Some(caps) = SEATER_RE.captures(&query_lower) {
        if let Ok(n) = caps[1].parse::<u32>() {
            filters.min_seats = Some(n);
            keywords.push(format!("{}-seater", n));
        }
    }

    // Minimum mileage.
    if let Some(caps) = MILEAGE_RE.captures(&query_lower) {
        if let Some(v) = parse_f64(&caps[1]) {
            filters.min_mileage = Some(v);
            keywords.push(format!("{} kmpl", &caps[1]));
        }
    }

    // Transmission. The automatic check runs first, so a query naming both
    // resolves to the automatic set.
    if query_lower.contains("automatic") || query_lower.contains("auto") {
        filters.transmission = Some(vec![
            "Automatic".to_string(),
            "CVT".to_string(),
            "DCT".to_string(),
        ]);
        keywords.push("automatic".to_string());
    } else if query_lower.contains("manual") {
        filters.transmission = Some(vec!["Manual".to_string()]);
        keywords.push("manual".to_string());
    }

    let context = QueryContext {
        use_case: detect_use_case(query),
        priority: detect_priority(query),
    };

    // Use-case defaults fill gaps only; extracted fields take precedence.
    if context.use_case != UseCase::General {
        if let Some(config) = config_for(context.use_case) {
            filters = config.default_filters.merged_with(&filters);
        }
    }
    filters.normalize();

    let confidence = if keywords.is_empty() { 0.3 } else { 0.6 };

    Extraction {
        filters,
        context,
        keywords,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    #[test]
    fn test_under_price_sets_max() {
        let ex = extract("hatchback under 8 lakhs");
        assert_eq!(ex.filters.max_price, Some(8.0));
        assert_eq!(ex.filters.min_price, None);
        assert_eq!(ex.filters.body_types.as_deref(), Some(&["Hatchback".to_string()][..]));
    }

    #[test]
    fn test_above_price_sets_min() {
        let ex = extract("sedan above 20 lakhs");
        assert_eq!(ex.filters.min_price, Some(20.0));
        assert_eq!(ex.filters.max_price, None);
    }

    #[test]
    fn test_bare_price_reads_as_budget_cap() {
        let ex = extract("15 lakh suv");
        assert_eq!(ex.filters.max_price, Some(15.0));
    }

    #[test]
    fn test_range_overrides_single_sided_match() {
        let ex = extract("cars between 10 to 15 lakh");
        assert_eq!(ex.filters.min_price, Some(10.0));
        assert_eq!(ex.filters.max_price, Some(15.0));
    }

    #[test]
    fn test_hyphen_range() {
        let ex = extract("something in the 8-12 lakh bracket");
        assert_eq!(ex.filters.min_price, Some(8.0));
        assert_eq!(ex.filters.max_price, Some(12.0));
    }

    #[test]
    fn test_brands_in_list_order() {
        let ex = extract("kia or tata or hyundai");
        assert_eq!(
            ex.filters.brands.as_deref(),
            Some(&["Tata".to_string(), "Hyundai".to_string(), "Kia".to_string()][..])
        );
    }

    #[test]
    fn test_seater_and_mileage() {
        let ex = extract("7 seater with 20 kmpl");
        assert_eq!(ex.filters.min_seats, Some(7));
        assert_eq!(ex.filters.min_mileage, Some(20.0));
    }

    #[test]
    fn test_automatic_beats_manual() {
        let ex = extract("automatic or manual");
        assert_eq!(
            ex.filters.transmission.as_deref(),
            Some(&["Automatic".to_string(), "CVT".to_string(), "DCT".to_string()][..])
        );
        let ex = extract("manual gearbox");
        assert_eq!(ex.filters.transmission.as_deref(), Some(&["Manual".to_string()][..]));
    }

    #[test]
    fn test_deterministic_repeat() {
        let a = extract("7-seater SUV under 15 lakhs");
        let b = extract("7-seater SUV under 15 lakhs");
        assert_eq!(a.filters, b.filters);
        assert_eq!(a.keywords, b.keywords);
        assert_eq!(a.context.use_case, b.context.use_case);
        assert_eq!(a.confidence, b.confidence);
    }

    #[test]
    fn test_family_scenario_end_to_end() {
        let ex = extract("7-seater SUV under 15 lakhs");
        assert_eq!(ex.filters.max_price, Some(15.0));
        assert_eq!(ex.filters.body_types.as_deref(), Some(&["SUV".to_string()][..]));
        // Extracted seat count wins over the family default of 5.
        assert_eq!(ex.filters.min_seats, Some(7));
        assert_eq!(ex.context.use_case, crate::types::UseCase::Family);
        assert_eq!(ex.confidence, 0.6);
    }

    #[test]
    fn test_confidence_floor_without_matches() {
        let ex = extract("something nice");
        assert!(ex.keywords.is_empty());
        assert_eq!(ex.confidence, 0.3);
    }

    #[test]
    fn test_priority_detected() {
        let ex = extract("cheapest suv");
        assert_eq!(ex.context.priority, Some(Priority::Price));
    }
}
