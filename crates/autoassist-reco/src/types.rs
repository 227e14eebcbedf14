use serde::{Deserialize, Serialize};

fn unknown() -> String {
    "Unknown".to_string()
}

/// One catalog record. Immutable input owned by the external document store;
/// missing numeric/boolean source fields deserialize to 0/false, missing
/// identity strings to the "Unknown" sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vehicle {
    // Identity
    pub id: String,
    #[serde(alias = "make")]
    pub brand: String,
    pub model: String,
    pub variant: String,
    pub year: u32,
    pub body_type: String,
    pub segment: String,

    // Pricing (lakhs)
    pub price_lakhs: f64,

    // Dimensions (mm / liters / kg)
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub wheelbase: f64,
    pub ground_clearance: f64,
    pub boot_space: f64,

    // Engine & performance
    pub displacement: f64,
    pub power_bhp: f64,
    pub torque_nm: f64,
    pub turbo: bool,
    pub acceleration_0_to_100: f64,
    pub top_speed: f64,
    pub transmission: String,
    pub drive_type: String,

    // Fuel & emissions
    #[serde(alias = "mileage")]
    pub mileage_arai: f64,
    pub fuel_type: String,
    pub emission_standard: String,

    // Safety
    pub airbags: u32,
    pub abs: bool,
    pub esc: bool,
    pub traction_control: bool,
    pub hill_hold: bool,
    pub ebd: bool,
    pub isofix: bool,
    pub crash_rating: u32,
    pub parking_camera: bool,
    pub parking_sensors: bool,
    pub tpms: bool,

    // Comfort
    pub air_conditioning: bool,
    pub sunroof: bool,
    pub ventilated_seats: bool,
    pub heated_seats: bool,
    pub lumbar_support: bool,
    pub adjustable_headrest: bool,
    pub foldable_rear_seats: bool,
    pub rear_armrest: bool,
    pub power_windows: bool,
    pub cruise_control: bool,
    pub keyless_entry: bool,
    pub wireless_charging: bool,
    pub led_lights: bool,
    pub alloy_wheels: bool,

    // Infotainment
    pub touchscreen_size: f64,
    pub carplay_android_auto: bool,
    pub digital_cluster: bool,
    pub connected_tech: bool,
    pub speakers: u32,

    // ADAS
    pub adaptive_cruise: bool,
    pub lane_keep_assist: bool,
    pub collision_warning: bool,
    pub blind_spot_monitor: bool,
    pub auto_emergency_braking: bool,

    // Ownership
    pub warranty_years: u32,
    pub warranty_km: u32,
    pub service_interval_km: u32,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            id: String::new(),
            brand: unknown(),
            model: unknown(),
            variant: String::new(),
            year: 0,
            body_type: unknown(),
            segment: unknown(),
            price_lakhs: 0.0,
            length: 0.0,
            width: 0.0,
            height: 0.0,
            wheelbase: 0.0,
            ground_clearance: 0.0,
            boot_space: 0.0,
            displacement: 0.0,
            power_bhp: 0.0,
            torque_nm: 0.0,
            turbo: false,
            acceleration_0_to_100: 0.0,
            top_speed: 0.0,
            transmission: String::new(),
            drive_type: String::new(),
            mileage_arai: 0.0,
            fuel_type: String::new(),
            emission_standard: String::new(),
            airbags: 0,
            abs: false,
            esc: false,
            traction_control: false,
            hill_hold: false,
            ebd: false,
            isofix: false,
            crash_rating: 0,
            parking_camera: false,
            parking_sensors: false,
            tpms: false,
            air_conditioning: false,
            sunroof: false,
            ventilated_seats: false,
            heated_seats: false,
            lumbar_support: false,
            adjustable_headrest: false,
            foldable_rear_seats: false,
            rear_armrest: false,
            power_windows: false,
            cruise_control: false,
            keyless_entry: false,
            wireless_charging: false,
            led_lights: false,
            alloy_wheels: false,
            touchscreen_size: 0.0,
            carplay_android_auto: false,
            digital_cluster: false,
            connected_tech: false,
            speakers: 0,
            adaptive_cruise: false,
            lane_keep_assist: false,
            collision_warning: false,
            blind_spot_monitor: false,
            auto_emergency_braking: false,
            warranty_years: 0,
            warranty_km: 0,
            service_interval_km: 0,
        }
    }
}

impl Vehicle {
    /// A vehicle can only be meaningfully ranked when its core identity and
    /// the two headline numbers are present.
    pub fn is_scorable(&self) -> bool {
        !self.brand.is_empty()
            && self.brand != "Unknown"
            && !self.model.is_empty()
            && self.model != "Unknown"
            && self.price_lakhs > 0.0
            && self.mileage_arai > 0.0
    }
}

/// Constraint set extracted from a query (or supplied explicitly by the
/// caller). Every field is independently optional; an absent field imposes
/// no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Filters {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub brands: Option<Vec<String>>,
    pub body_types: Option<Vec<String>>,
    pub min_seats: Option<u32>,
    pub max_seats: Option<u32>,
    pub min_mileage: Option<f64>,
    pub transmission: Option<Vec<String>>,
    pub drive_types: Option<Vec<String>>,
    pub min_airbags: Option<u32>,
    pub min_safety_rating: Option<u32>,
    pub required_features: Option<Vec<String>>,
    pub segments: Option<Vec<String>>,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        *self == Filters::default()
    }

    /// Per-field merge: any field set on `overlay` wins over `self`.
    /// Used both for explicit-over-extracted and extracted-over-use-case-default.
    pub fn merged_with(&self, overlay: &Filters) -> Filters {
        Filters {
            min_price: overlay.min_price.or(self.min_price),
            max_price: overlay.max_price.or(self.max_price),
            brands: overlay.brands.clone().or_else(|| self.brands.clone()),
            body_types: overlay
                .body_types
                .clone()
                .or_else(|| self.body_types.clone()),
            min_seats: overlay.min_seats.or(self.min_seats),
            max_seats: overlay.max_seats.or(self.max_seats),
            min_mileage: overlay.min_mileage.or(self.min_mileage),
            transmission: overlay
                .transmission
                .clone()
                .or_else(|| self.transmission.clone()),
            drive_types: overlay
                .drive_types
                .clone()
                .or_else(|| self.drive_types.clone()),
            min_airbags: overlay.min_airbags.or(self.min_airbags),
            min_safety_rating: overlay.min_safety_rating.or(self.min_safety_rating),
            required_features: overlay
                .required_features
                .clone()
                .or_else(|| self.required_features.clone()),
            segments: overlay.segments.clone().or_else(|| self.segments.clone()),
        }
    }

    /// Canonicalize: list fields holding an empty vec impose no constraint
    /// and are dropped, so downstream components see one shape.
    pub fn normalize(&mut self) {
        fn drop_empty(field: &mut Option<Vec<String>>) {
            if field.as_ref().is_some_and(|v| v.is_empty()) {
                *field = None;
            }
        }
        drop_empty(&mut self.brands);
        drop_empty(&mut self.body_types);
        drop_empty(&mut self.transmission);
        drop_empty(&mut self.drive_types);
        drop_empty(&mut self.required_features);
        drop_empty(&mut self.segments);
    }
}

/// Coarse usage intent. Declaration order doubles as the tie-break order
/// during keyword-count detection (first declared wins on an exact tie).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseCase {
    Family,
    DailyCommute,
    Highway,
    FirstCar,
    Luxury,
    OffRoad,
    General,
}

impl UseCase {
    /// Non-general cases, in declaration order.
    pub const DETECTABLE: [UseCase; 6] = [
        UseCase::Family,
        UseCase::DailyCommute,
        UseCase::Highway,
        UseCase::FirstCar,
        UseCase::Luxury,
        UseCase::OffRoad,
    ];
}

/// Single user-stated optimization axis. Declaration order is the detection
/// order; at most one priority is ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Price,
    Safety,
    Efficiency,
    Features,
    Performance,
    Comfort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryContext {
    pub use_case: UseCase,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl Default for QueryContext {
    fn default() -> Self {
        Self {
            use_case: UseCase::General,
            priority: None,
        }
    }
}

/// Ranked output for one vehicle. Never persisted; recomputed per query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub variant: String,
    pub price_lakhs: f64,
    pub mileage_arai: f64,
    /// Final score in [0, 100].
    pub score: u32,
    /// At most 7 entries, fixed precedence order.
    pub highlights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filters_is_empty() {
        assert!(Filters::default().is_empty());
        let f = Filters {
            max_price: Some(10.0),
            ..Default::default()
        };
        assert!(!f.is_empty());
    }

    #[test]
    fn test_merge_overlay_wins_per_field() {
        let base = Filters {
            max_price: Some(10.0),
            min_seats: Some(5),
            ..Default::default()
        };
        let overlay = Filters {
            min_seats: Some(7),
            ..Default::default()
        };
        let merged = base.merged_with(&overlay);
        assert_eq!(merged.max_price, Some(10.0));
        assert_eq!(merged.min_seats, Some(7));
    }

    #[test]
    fn test_normalize_drops_empty_lists() {
        let mut f = Filters {
            brands: Some(vec![]),
            body_types: Some(vec!["SUV".to_string()]),
            ..Default::default()
        };
        f.normalize();
        assert!(f.brands.is_none());
        assert_eq!(f.body_types.as_deref(), Some(&["SUV".to_string()][..]));
    }

    #[test]
    fn test_vehicle_defaults_tolerate_sparse_documents() {
        let v: Vehicle = serde_json::from_str(r#"{"brand":"Tata","model":"Nexon"}"#).unwrap();
        assert_eq!(v.brand, "Tata");
        assert_eq!(v.airbags, 0);
        assert!(!v.sunroof);
        assert_eq!(v.body_type, "Unknown");
    }

    #[test]
    fn test_scorable_requires_identity_and_numbers() {
        let mut v = Vehicle {
            brand: "Tata".to_string(),
            model: "Nexon".to_string(),
            price_lakhs: 9.5,
            mileage_arai: 17.0,
            ..Default::default()
        };
        assert!(v.is_scorable());
        v.price_lakhs = 0.0;
        assert!(!v.is_scorable());
        v.price_lakhs = 9.5;
        v.model = "Unknown".to_string();
        assert!(!v.is_scorable());
    }
}
