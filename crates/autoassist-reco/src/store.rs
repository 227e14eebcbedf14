//! Catalog store adapter.
//!
//! Source documents arrive with inconsistent field spellings: the upstream
//! collection uses spaced names ("Identification Brand", "Pricing Delhi Ex
//! Showroom Price" in rupees) while exported snapshots use camelCase with
//! prices already in lakhs. All of that is normalized here, once, into the
//! canonical `Vehicle` shape; downstream components never see the raw
//! spellings.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

use crate::filter;
use crate::types::{Filters, Vehicle};

fn get_str(doc: &Value, keys: &[&str], default: &str) -> String {
    for key in keys {
        if let Some(s) = doc.get(key).and_then(Value::as_str) {
            if !s.is_empty() {
                return s.to_string();
            }
        }
    }
    default.to_string()
}

fn get_f64(doc: &Value, keys: &[&str]) -> f64 {
    for key in keys {
        if let Some(v) = doc.get(key) {
            if let Some(n) = v.as_f64() {
                return n;
            }
            // Some numeric columns are stored as strings.
            if let Some(n) = v.as_str().and_then(|s| s.trim().parse::<f64>().ok()) {
                return n;
            }
        }
    }
    0.0
}

fn get_u32(doc: &Value, keys: &[&str]) -> u32 {
    get_f64(doc, keys).max(0.0) as u32
}

fn get_bool(doc: &Value, keys: &[&str]) -> bool {
    for key in keys {
        if let Some(v) = doc.get(key) {
            if let Some(b) = v.as_bool() {
                return b;
            }
            if let Some(s) = v.as_str() {
                return matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1");
            }
        }
    }
    false
}

/// Price in lakhs: the spaced spelling holds rupees, the camelCase one is
/// already in lakhs.
fn price_lakhs(doc: &Value) -> f64 {
    let rupees = get_f64(doc, &["Pricing Delhi Ex Showroom Price"]);
    if rupees > 0.0 {
        return rupees / 100_000.0;
    }
    get_f64(doc, &["priceLakhs", "price_lakhs"])
}

/// The spaced "Engine Type" column mixes fuel into the engine description;
/// infer the fuel type from it when no dedicated field exists.
fn fuel_type(doc: &Value) -> String {
    let direct = get_str(doc, &["fuelType", "fuel_type"], "");
    if !direct.is_empty() {
        return direct;
    }
    let engine_type = get_str(doc, &["Engine Type"], "");
    for fuel in ["Electric", "Diesel", "Petrol", "CNG", "Hybrid"] {
        if engine_type.contains(fuel) {
            return fuel.to_string();
        }
    }
    "Petrol".to_string()
}

/// Normalize one raw store document into the canonical shape. Total: any
/// missing or malformed field becomes its sentinel/zero/false default.
pub fn normalize_document(doc: &Value) -> Vehicle {
    Vehicle {
        id: get_str(doc, &["_id", "id"], ""),
        brand: get_str(doc, &["Identification Brand", "brand", "make"], "Unknown"),
        model: get_str(doc, &["Identification Model", "model"], "Unknown"),
        variant: get_str(doc, &["Identification Variant", "variant"], ""),
        year: get_u32(doc, &["Identification Year", "year"]),
        body_type: get_str(doc, &["Identification Body Type", "bodyType"], "Unknown"),
        segment: get_str(doc, &["Identification Segment", "segment"], "Unknown"),

        price_lakhs: price_lakhs(doc),

        length: get_f64(doc, &["Dimensions Length", "length"]),
        width: get_f64(doc, &["Dimensions Width", "width"]),
        height: get_f64(doc, &["Dimensions Height", "height"]),
        wheelbase: get_f64(doc, &["Dimensions Wheelbase", "wheelbase"]),
        ground_clearance: get_f64(doc, &["Dimensions Ground Clearance", "groundClearance"]),
        boot_space: get_f64(doc, &["Dimensions Boot Liters", "bootSpace"]),

        displacement: get_f64(doc, &["Engine Cc", "displacement"]),
        power_bhp: get_f64(doc, &["Engine Bhp", "powerBhp"]),
        torque_nm: get_f64(doc, &["Engine Torque", "torqueNm"]),
        turbo: get_bool(doc, &["Engine Turbo", "turbo"]),
        acceleration_0_to_100: get_f64(doc, &["Engine 0 100 Sec", "acceleration0To100"]),
        top_speed: get_f64(doc, &["Engine Top Speed", "topSpeed"]),
        transmission: get_str(doc, &["Engine Transmission", "transmission"], ""),
        drive_type: get_str(doc, &["Engine Drive", "driveType"], ""),

        mileage_arai: get_f64(
            doc,
            &[
                "Efficiency Mileage Arai",
                "Efficiency Mileage City",
                "Efficiency Mileage Highway",
                "mileageArai",
                "mileage",
            ],
        ),
        fuel_type: fuel_type(doc),
        emission_standard: get_str(
            doc,
            &["Efficiency Emission Standard", "emissionStandard"],
            "",
        ),

        airbags: get_u32(doc, &["Safety Airbags", "airbags"]),
        abs: get_bool(doc, &["Safety Abs", "abs"]),
        esc: get_bool(doc, &["Safety Esp", "esc"]),
        traction_control: get_bool(doc, &["Safety Traction Control", "tractionControl"]),
        hill_hold: get_bool(doc, &["Safety Hill Hold", "hillHold"]),
        ebd: get_bool(doc, &["Safety Ebd", "ebd"]),
        isofix: get_bool(doc, &["Safety Isofix", "isofix"]),
        crash_rating: get_u32(doc, &["Safety Ncap Stars", "crashRating"]),
        parking_camera: get_bool(
            doc,
            &["Features 360 Camera", "Features Parking Camera", "parkingCamera"],
        ),
        parking_sensors: get_bool(doc, &["Safety Parking Sensors", "parkingSensors"]),
        tpms: get_bool(doc, &["Safety Tpms", "tpms"]),

        air_conditioning: get_bool(doc, &["Features Air Conditioning", "airConditioning"]),
        sunroof: get_bool(doc, &["Features Sunroof", "sunroof"]),
        ventilated_seats: get_bool(doc, &["Features Ventilated Seats", "ventilatedSeats"]),
        heated_seats: get_bool(doc, &["Features Heated Seats", "heatedSeats"]),
        lumbar_support: get_bool(doc, &["Features Lumbar Support", "lumbarSupport"]),
        adjustable_headrest: get_bool(doc, &["Features Adjustable Headrest", "adjustableHeadrest"]),
        foldable_rear_seats: get_bool(doc, &["Features Foldable Rear Seats", "foldableRearSeats"]),
        rear_armrest: get_bool(doc, &["Features Rear Armrest", "rearArmrest"]),
        power_windows: get_bool(doc, &["Features Power Windows", "powerWindows"]),
        cruise_control: get_bool(doc, &["Features Cruise Control", "cruiseControl"]),
        keyless_entry: get_bool(doc, &["Features Keyless Entry", "keylessEntry"]),
        wireless_charging: get_bool(doc, &["Features Wireless Charging", "wirelessCharging"]),
        led_lights: get_bool(doc, &["Features Led Lights", "ledLights"]),
        alloy_wheels: get_bool(doc, &["Features Alloy Wheels", "alloyWheels"]),

        touchscreen_size: get_f64(doc, &["Features Touchscreen Inch", "touchscreenSize"]),
        carplay_android_auto: get_bool(doc, &["Features Carplay Android Auto", "carplayAndroidAuto"]),
        digital_cluster: get_bool(doc, &["Features Digital Cluster", "digitalCluster"]),
        connected_tech: get_bool(doc, &["Features Connected Tech", "connectedTech"]),
        speakers: get_u32(doc, &["Features Speakers", "speakers"]),

        adaptive_cruise: get_bool(doc, &["Safety Adaptive Cruise", "adaptiveCruise"]),
        lane_keep_assist: get_bool(doc, &["Safety Lane Keep Assist", "laneKeepAssist"]),
        collision_warning: get_bool(doc, &["Safety Collision Warning", "collisionWarning"]),
        blind_spot_monitor: get_bool(doc, &["Safety Blind Spot Monitor", "blindSpotMonitor"]),
        auto_emergency_braking: get_bool(
            doc,
            &["Safety Auto Emergency Braking", "autoEmergencyBraking"],
        ),

        warranty_years: get_u32(doc, &["Warranty Years", "warrantyYears"]),
        warranty_km: get_u32(doc, &["Warranty Km", "warrantyKm"]),
        service_interval_km: get_u32(doc, &["Warranty Service Km", "serviceIntervalKm"]),
    }
}

/// In-memory catalog built from normalized store documents.
pub struct CatalogStore {
    vehicles: Vec<Vehicle>,
}

impl CatalogStore {
    pub fn from_documents(documents: &[Value]) -> Self {
        let vehicles: Vec<Vehicle> = documents.iter().map(normalize_document).collect();
        let unscorable = vehicles.iter().filter(|v| !v.is_scorable()).count();
        if unscorable > 0 {
            warn!(
                "{} of {} catalog records lack identity or headline numbers and will be skipped at scoring",
                unscorable,
                vehicles.len()
            );
        }
        Self { vehicles }
    }

    /// Load a catalog snapshot: a JSON array of raw store documents.
    pub fn load_json(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let documents: Vec<Value> = serde_json::from_str(&raw)
            .with_context(|| format!("Catalog file {} is not a JSON array", path.display()))?;
        let store = Self::from_documents(&documents);
        info!("Loaded {} vehicles from {}", store.vehicles.len(), path.display());
        Ok(store)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Local equivalent of pushing `filter::to_store_query` to the backing
    /// store: the same clause semantics over the in-memory set.
    pub fn query(&self, filters: &Filters) -> Vec<Vehicle> {
        filter::apply(&self.vehicles, filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_spaced_document() {
        let doc = json!({
            "_id": "abc123",
            "Identification Brand": "Tata",
            "Identification Model": "Nexon",
            "Identification Body Type": "SUV",
            "Pricing Delhi Ex Showroom Price": 950000,
            "Efficiency Mileage Arai": 17.4,
            "Engine Bhp": 118,
            "Engine Turbo": true,
            "Engine Type": "1.2L Turbo Petrol",
            "Safety Airbags": 6,
            "Safety Abs": true,
            "Safety Esp": true,
            "Safety Ncap Stars": 5,
            "Features Sunroof": true,
            "Dimensions Boot Liters": 350
        });
        let v = normalize_document(&doc);
        assert_eq!(v.id, "abc123");
        assert_eq!(v.brand, "Tata");
        assert_eq!(v.price_lakhs, 9.5);
        assert_eq!(v.mileage_arai, 17.4);
        assert!(v.turbo);
        assert!(v.esc);
        assert_eq!(v.fuel_type, "Petrol");
        assert_eq!(v.crash_rating, 5);
        assert!(v.sunroof);
        assert_eq!(v.boot_space, 350.0);
        assert!(v.is_scorable());
    }

    #[test]
    fn test_normalize_camel_case_document() {
        let doc = json!({
            "id": "x1",
            "brand": "Hyundai",
            "model": "i20",
            "bodyType": "Hatchback",
            "priceLakhs": 8.2,
            "mileageArai": 20.0,
            "fuelType": "Petrol",
            "cruiseControl": true
        });
        let v = normalize_document(&doc);
        assert_eq!(v.brand, "Hyundai");
        assert_eq!(v.price_lakhs, 8.2);
        assert!(v.cruise_control);
    }

    #[test]
    fn test_normalize_empty_document_yields_sentinels() {
        let v = normalize_document(&json!({}));
        assert_eq!(v.brand, "Unknown");
        assert_eq!(v.price_lakhs, 0.0);
        assert_eq!(v.fuel_type, "Petrol");
        assert!(!v.is_scorable());
    }

    #[test]
    fn test_mileage_fallback_chain() {
        let doc = json!({
            "Identification Brand": "Kia",
            "Identification Model": "Sonet",
            "Efficiency Mileage City": 16.5,
            "Pricing Delhi Ex Showroom Price": 800000
        });
        let v = normalize_document(&doc);
        assert_eq!(v.mileage_arai, 16.5);
    }

    #[test]
    fn test_store_query_matches_in_memory_filter() {
        let docs = vec![
            json!({"brand": "Tata", "model": "Nexon", "bodyType": "SUV", "priceLakhs": 9.5, "mileageArai": 17.0}),
            json!({"brand": "Honda", "model": "City", "bodyType": "Sedan", "priceLakhs": 12.0, "mileageArai": 18.0}),
        ];
        let store = CatalogStore::from_documents(&docs);
        let filters = Filters {
            body_types: Some(vec!["SUV".to_string()]),
            ..Default::default()
        };
        let hits = store.query(&filters);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].brand, "Tata");
    }
}
