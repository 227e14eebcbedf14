//! Candidate filtering: one predicate, two targets.
//!
//! `apply` evaluates a `Filters` value over an in-memory collection;
//! `to_store_query` expresses the same clause semantics as a document-store
//! query so pre-filtering at the store and local filtering stay
//! interchangeable.

use serde_json::{json, Map, Value};

use crate::types::{Filters, Vehicle};

/// Feature-name fragments mapped to the flag they gate. Matching is by
/// case-insensitive substring of the requested name, so "panoramic sunroof"
/// and "sunroof" both resolve to the same flag.
const FEATURE_FLAGS: &[(&str, fn(&Vehicle) -> bool)] = &[
    ("sunroof", |v| v.sunroof),
    ("adaptive cruise", |v| v.adaptive_cruise),
    ("cruise", |v| v.cruise_control),
    ("keyless", |v| v.keyless_entry),
    ("parking camera", |v| v.parking_camera),
    ("led", |v| v.led_lights),
    ("wireless charging", |v| v.wireless_charging),
    ("ventilated", |v| v.ventilated_seats),
    ("carplay", |v| v.carplay_android_auto),
    ("digital cluster", |v| v.digital_cluster),
    ("connected", |v| v.connected_tech),
    ("lane", |v| v.lane_keep_assist),
    ("collision", |v| v.collision_warning),
    ("blind spot", |v| v.blind_spot_monitor),
];

/// Filter a collection in input order. Every set clause must hold.
pub fn apply(vehicles: &[Vehicle], filters: &Filters) -> Vec<Vehicle> {
    vehicles
        .iter()
        .filter(|v| matches(v, filters))
        .cloned()
        .collect()
}

/// Whether one vehicle satisfies every set clause.
pub fn matches(vehicle: &Vehicle, filters: &Filters) -> bool {
    if let Some(min_price) = filters.min_price {
        if vehicle.price_lakhs < min_price {
            return false;
        }
    }
    if let Some(max_price) = filters.max_price {
        if vehicle.price_lakhs > max_price {
            return false;
        }
    }

    if let Some(brands) = &filters.brands {
        let brand_lower = vehicle.brand.to_lowercase();
        // Bidirectional substring: "Maruti" matches "Maruti Suzuki" and
        // vice versa.
        let hit = brands.iter().any(|b| {
            let b_lower = b.to_lowercase();
            brand_lower.contains(&b_lower) || b_lower.contains(&brand_lower)
        });
        if !hit {
            return false;
        }
    }

    if let Some(body_types) = &filters.body_types {
        let hit = body_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&vehicle.body_type));
        if !hit {
            return false;
        }
    }

    let seats = estimate_seats(vehicle);
    if let Some(min_seats) = filters.min_seats {
        if seats < min_seats {
            return false;
        }
    }
    if let Some(max_seats) = filters.max_seats {
        if seats > max_seats {
            return false;
        }
    }

    if let Some(min_mileage) = filters.min_mileage {
        if vehicle.mileage_arai < min_mileage {
            return false;
        }
    }

    if let Some(transmission) = &filters.transmission {
        let hit = transmission
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&vehicle.transmission));
        if !hit {
            return false;
        }
    }

    if let Some(drive_types) = &filters.drive_types {
        let hit = drive_types
            .iter()
            .any(|d| d.eq_ignore_ascii_case(&vehicle.drive_type));
        if !hit {
            return false;
        }
    }

    if let Some(min_airbags) = filters.min_airbags {
        if vehicle.airbags < min_airbags {
            return false;
        }
    }
    if let Some(min_safety_rating) = filters.min_safety_rating {
        if vehicle.crash_rating < min_safety_rating {
            return false;
        }
    }

    if let Some(segments) = &filters.segments {
        let hit = segments
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&vehicle.segment));
        if !hit {
            return false;
        }
    }

    if let Some(required) = &filters.required_features {
        for name in required {
            let name_lower = name.to_lowercase();
            // Unrecognized names impose no constraint.
            let flag = FEATURE_FLAGS
                .iter()
                .find(|(fragment, _)| name_lower.contains(fragment));
            if let Some((_, has_feature)) = flag {
                if !has_feature(vehicle) {
                    return false;
                }
            }
        }
    }

    true
}

/// No seat-count field exists on catalog records, so seats are estimated:
/// a literal 7/seven or 8/eight in the variant name wins, then body type
/// (SUV/MUV/MPV carry 7, Sedan/Hatchback 5, Coupe/Convertible 4), then 5.
/// A documented heuristic, not ground truth.
pub fn estimate_seats(vehicle: &Vehicle) -> u32 {
    let variant_lower = vehicle.variant.to_lowercase();
    if variant_lower.contains('7') || variant_lower.contains("seven") {
        return 7;
    }
    if variant_lower.contains('8') || variant_lower.contains("eight") {
        return 8;
    }
    match vehicle.body_type.as_str() {
        "SUV" | "MUV" | "MPV" => 7,
        "Sedan" | "Hatchback" => 5,
        "Coupe" | "Convertible" => 4,
        _ => 5,
    }
}

/// Case-insensitive exact-match alternation for a document-store query.
fn regex_any(values: &[String]) -> Value {
    let escaped: Vec<String> = values.iter().map(|v| regex::escape(v)).collect();
    json!({ "$regex": format!("^(?:{})$", escaped.join("|")), "$options": "i" })
}

/// Build a document-store query with the same clause semantics as `matches`.
/// Seat bounds and required features have no stored counterpart and stay
/// local-only; callers re-apply `apply` on the fetched set.
pub fn to_store_query(filters: &Filters) -> Value {
    let mut query = Map::new();

    let mut price = Map::new();
    if let Some(min_price) = filters.min_price {
        price.insert("$gte".to_string(), json!(min_price));
    }
    if let Some(max_price) = filters.max_price {
        price.insert("$lte".to_string(), json!(max_price));
    }
    if !price.is_empty() {
        query.insert("priceLakhs".to_string(), Value::Object(price));
    }

    if let Some(brands) = &filters.brands {
        // Bidirectional substring collapses to an unanchored pattern here.
        let escaped: Vec<String> = brands.iter().map(|b| regex::escape(b)).collect();
        query.insert(
            "brand".to_string(),
            json!({ "$regex": escaped.join("|"), "$options": "i" }),
        );
    }
    if let Some(body_types) = &filters.body_types {
        query.insert("bodyType".to_string(), regex_any(body_types));
    }
    if let Some(min_mileage) = filters.min_mileage {
        query.insert("mileageArai".to_string(), json!({ "$gte": min_mileage }));
    }
    if let Some(transmission) = &filters.transmission {
        query.insert("transmission".to_string(), json!({ "$in": transmission }));
    }
    if let Some(drive_types) = &filters.drive_types {
        query.insert("driveType".to_string(), json!({ "$in": drive_types }));
    }
    if let Some(min_airbags) = filters.min_airbags {
        query.insert("airbags".to_string(), json!({ "$gte": min_airbags }));
    }
    if let Some(min_safety_rating) = filters.min_safety_rating {
        query.insert(
            "crashRating".to_string(),
            json!({ "$gte": min_safety_rating }),
        );
    }
    if let Some(segments) = &filters.segments {
        query.insert("segment".to_string(), regex_any(segments));
    }

    Value::Object(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(brand: &str, body_type: &str, price: f64) -> Vehicle {
        Vehicle {
            brand: brand.to_string(),
            model: "M".to_string(),
            body_type: body_type.to_string(),
            price_lakhs: price,
            mileage_arai: 17.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_filters_is_identity() {
        let vehicles = vec![
            vehicle("Tata", "SUV", 9.0),
            vehicle("Kia", "Sedan", 12.0),
        ];
        let out = apply(&vehicles, &Filters::default());
        assert_eq!(out.len(), vehicles.len());
        assert_eq!(out[0].brand, "Tata");
        assert_eq!(out[1].brand, "Kia");
    }

    #[test]
    fn test_price_bounds() {
        let vehicles = vec![
            vehicle("Tata", "SUV", 7.0),
            vehicle("Kia", "SUV", 12.0),
            vehicle("BMW", "SUV", 45.0),
        ];
        let filters = Filters {
            min_price: Some(10.0),
            max_price: Some(20.0),
            ..Default::default()
        };
        let out = apply(&vehicles, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].brand, "Kia");
    }

    #[test]
    fn test_brand_bidirectional_substring() {
        let v = vehicle("Maruti Suzuki", "Hatchback", 6.0);
        let short = Filters {
            brands: Some(vec!["Maruti".to_string()]),
            ..Default::default()
        };
        assert!(matches(&v, &short));
        let long = Filters {
            brands: Some(vec!["maruti suzuki india".to_string()]),
            ..Default::default()
        };
        assert!(matches(&vehicle("Maruti", "Hatchback", 6.0), &long));
        let other = Filters {
            brands: Some(vec!["Hyundai".to_string()]),
            ..Default::default()
        };
        assert!(!matches(&v, &other));
    }

    #[test]
    fn test_suv_estimated_as_seven_seater() {
        let v = vehicle("Tata", "SUV", 15.0);
        assert_eq!(estimate_seats(&v), 7);
        let filters = Filters {
            min_seats: Some(7),
            ..Default::default()
        };
        assert!(matches(&v, &filters));
        assert!(!matches(&vehicle("Honda", "Sedan", 15.0), &filters));
    }

    #[test]
    fn test_variant_literal_overrides_body_type() {
        let mut v = vehicle("Mahindra", "Sedan", 15.0);
        v.variant = "XUV 7-Str".to_string();
        assert_eq!(estimate_seats(&v), 7);
        v.variant = "Eight Seat Edition".to_string();
        assert_eq!(estimate_seats(&v), 8);
    }

    #[test]
    fn test_required_feature_sunroof() {
        let filters = Filters {
            required_features: Some(vec!["sunroof".to_string()]),
            ..Default::default()
        };
        let mut v = vehicle("Kia", "SUV", 12.0);
        assert!(!matches(&v, &filters));
        v.sunroof = true;
        assert!(matches(&v, &filters));
    }

    #[test]
    fn test_unrecognized_feature_is_ignored() {
        let filters = Filters {
            required_features: Some(vec!["flux capacitor".to_string()]),
            ..Default::default()
        };
        assert!(matches(&vehicle("Kia", "SUV", 12.0), &filters));
    }

    #[test]
    fn test_adaptive_cruise_is_distinct_from_cruise() {
        let mut v = vehicle("Kia", "SUV", 12.0);
        v.cruise_control = true;
        let adaptive = Filters {
            required_features: Some(vec!["adaptive cruise".to_string()]),
            ..Default::default()
        };
        assert!(!matches(&v, &adaptive));
        v.adaptive_cruise = true;
        assert!(matches(&v, &adaptive));
    }

    #[test]
    fn test_store_query_shape() {
        let filters = Filters {
            min_price: Some(10.0),
            max_price: Some(15.0),
            brands: Some(vec!["Tata".to_string()]),
            body_types: Some(vec!["SUV".to_string()]),
            min_airbags: Some(2),
            transmission: Some(vec!["Automatic".to_string()]),
            ..Default::default()
        };
        let q = to_store_query(&filters);
        assert_eq!(q["priceLakhs"]["$gte"], 10.0);
        assert_eq!(q["priceLakhs"]["$lte"], 15.0);
        assert_eq!(q["brand"]["$options"], "i");
        assert_eq!(q["bodyType"]["$regex"], "^(?:SUV)$");
        assert_eq!(q["airbags"]["$gte"], 2);
        assert_eq!(q["transmission"]["$in"][0], "Automatic");
    }

    #[test]
    fn test_store_query_empty_filters() {
        assert_eq!(to_store_query(&Filters::default()), json!({}));
    }
}
