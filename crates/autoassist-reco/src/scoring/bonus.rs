//! Use-case context bonus (additive) and priority multiplier.

use crate::types::{Priority, UseCase, Vehicle};

/// Additive bonus for how well a vehicle fits the detected use case.
/// Zero for `General`. Point values are part of the ranking contract.
pub fn context_bonus(vehicle: &Vehicle, use_case: UseCase) -> f64 {
    let mut bonus = 0.0;
    match use_case {
        UseCase::Family => {
            if matches!(vehicle.body_type.as_str(), "SUV" | "MUV" | "MPV") {
                bonus += 10.0;
            }
            if vehicle.airbags >= 6 {
                bonus += 5.0;
            }
            if vehicle.isofix {
                bonus += 3.0;
            }
            if vehicle.boot_space >= 400.0 {
                bonus += 2.0;
            }
        }
        UseCase::DailyCommute => {
            if vehicle.mileage_arai >= 20.0 {
                bonus += 10.0;
                if vehicle.mileage_arai >= 25.0 {
                    bonus += 5.0;
                }
            }
            if matches!(vehicle.body_type.as_str(), "Hatchback" | "Sedan") {
                bonus += 3.0;
            }
        }
        UseCase::Highway => {
            if vehicle.cruise_control {
                bonus += 8.0;
            }
            if vehicle.power_bhp >= 100.0 {
                bonus += 5.0;
            }
            if vehicle.ventilated_seats {
                bonus += 4.0;
            }
            if vehicle.boot_space >= 400.0 {
                bonus += 3.0;
            }
        }
        UseCase::FirstCar => {
            if vehicle.parking_camera {
                bonus += 8.0;
            }
            if vehicle.parking_sensors {
                bonus += 5.0;
            }
            if vehicle.price_lakhs <= 8.0 {
                bonus += 7.0;
            }
        }
        UseCase::Luxury => {
            if vehicle.ventilated_seats {
                bonus += 5.0;
            }
            if vehicle.sunroof {
                bonus += 4.0;
            }
            if vehicle.digital_cluster {
                bonus += 3.0;
            }
            if vehicle.adaptive_cruise {
                bonus += 5.0;
            }
            if vehicle.connected_tech {
                bonus += 3.0;
            }
        }
        UseCase::OffRoad => {
            if matches!(vehicle.drive_type.as_str(), "4WD" | "AWD") {
                bonus += 12.0;
            }
            if vehicle.ground_clearance >= 200.0 {
                bonus += 5.0;
            }
            if vehicle.body_type == "SUV" {
                bonus += 3.0;
            }
        }
        UseCase::General => {}
    }
    bonus
}

/// Multiplier applied when the user stated a single optimization axis and
/// the vehicle clearly delivers on it. At most one case fires per vehicle.
/// `price_sub` and `features_sub` are the already-computed sub-scores.
pub fn priority_multiplier(
    vehicle: &Vehicle,
    priority: Priority,
    price_sub: f64,
    features_sub: f64,
) -> f64 {
    match priority {
        Priority::Price if price_sub >= 80.0 => 1.10,
        Priority::Safety if vehicle.airbags >= 6 && vehicle.crash_rating >= 4 => 1.15,
        Priority::Efficiency if vehicle.mileage_arai >= 20.0 => 1.12,
        Priority::Features if features_sub >= 70.0 => 1.10,
        Priority::Performance if vehicle.power_bhp >= 150.0 || vehicle.turbo => 1.10,
        Priority::Comfort if vehicle.ventilated_seats && vehicle.sunroof => 1.10,
        _ => 1.0,
    }
}
