//! Human-readable highlight strings for one ranked vehicle.
//!
//! Candidates are tried in a fixed precedence order and the first 7 that
//! qualify are kept. The order is precedence, not importance: later
//! candidates are dropped when the cap is reached, never reordered in.

use crate::types::{QueryContext, UseCase, Vehicle};

const MAX_HIGHLIGHTS: usize = 7;

pub fn generate(vehicle: &Vehicle, context: &QueryContext) -> Vec<String> {
    let mut highlights: Vec<String> = Vec::new();

    let push = |highlights: &mut Vec<String>, text: String| {
        if highlights.len() < MAX_HIGHLIGHTS && !highlights.contains(&text) {
            highlights.push(text);
        }
    };

    if vehicle.price_lakhs > 0.0 {
        push(
            &mut highlights,
            format!("₹{:.2} Lakhs", vehicle.price_lakhs),
        );
    }
    if vehicle.mileage_arai > 0.0 {
        push(&mut highlights, format!("{} kmpl", vehicle.mileage_arai));
    }
    if vehicle.airbags >= 4 {
        push(&mut highlights, format!("{} airbags", vehicle.airbags));
    }
    if !vehicle.transmission.is_empty() {
        push(&mut highlights, format!("{} transmission", vehicle.transmission));
    }
    if !vehicle.body_type.is_empty() && vehicle.body_type != "Unknown" {
        push(&mut highlights, vehicle.body_type.clone());
    }

    match context.use_case {
        UseCase::Family => {
            if vehicle.isofix {
                push(&mut highlights, "ISOFIX child seat mounts".to_string());
            } else if vehicle.boot_space >= 400.0 {
                push(
                    &mut highlights,
                    format!("{}L boot space", vehicle.boot_space as u32),
                );
            }
        }
        UseCase::DailyCommute => {
            if vehicle.keyless_entry {
                push(&mut highlights, "Keyless entry".to_string());
            }
        }
        UseCase::Highway => {
            if vehicle.cruise_control {
                push(&mut highlights, "Cruise control".to_string());
            }
        }
        UseCase::Luxury => {
            if vehicle.sunroof {
                push(&mut highlights, "Sunroof".to_string());
            }
            if vehicle.ventilated_seats {
                push(&mut highlights, "Ventilated seats".to_string());
            }
        }
        UseCase::FirstCar | UseCase::OffRoad | UseCase::General => {}
    }

    if vehicle.carplay_android_auto {
        push(&mut highlights, "CarPlay/Android Auto".to_string());
    }
    if vehicle.sunroof {
        // No-op when the luxury branch already listed it.
        push(&mut highlights, "Sunroof".to_string());
    }
    if vehicle.adaptive_cruise {
        push(&mut highlights, "Adaptive cruise control".to_string());
    }
    if vehicle.power_bhp >= 150.0 {
        push(&mut highlights, format!("{} bhp", vehicle.power_bhp as u32));
    }
    if vehicle.crash_rating >= 4 {
        push(
            &mut highlights,
            format!("{}-star crash rating", vehicle.crash_rating),
        );
    }

    highlights
}
