//! The six independent sub-scores, each in [0, 100].
//!
//! Band boundaries are calibrated for the Indian market catalog (prices in
//! lakhs, ARAI mileage in kmpl, power in bhp, torque in Nm).

use crate::types::{Filters, Vehicle};

/// Budget-fit score. Base 50 when no price bounds are set.
///
/// The 0.85-0.95 usage band scores above the "well under budget" band on
/// purpose: spending most of a stated budget usually buys a better-equipped
/// variant, and the band order rewards that.
pub fn price_score(vehicle: &Vehicle, filters: &Filters) -> f64 {
    let mut score = 50.0;

    if let Some(max_price) = filters.max_price {
        if max_price > 0.0 {
            let usage = vehicle.price_lakhs / max_price;
            score = if usage <= 0.70 {
                90.0
            } else if usage <= 0.85 {
                80.0
            } else if usage <= 0.95 {
                100.0
            } else if usage <= 1.0 {
                70.0
            } else {
                30.0
            };
        }
    }

    if let Some(min_price) = filters.min_price {
        if vehicle.price_lakhs >= min_price && score < 80.0 {
            score = 80.0;
        }
    }

    score
}

/// Fuel-efficiency score banded on the ARAI figure, with a +15 margin bonus
/// when the vehicle clears the asked-for minimum by more than 5 kmpl.
pub fn mileage_score(vehicle: &Vehicle, filters: &Filters) -> f64 {
    let m = vehicle.mileage_arai;
    let mut score: f64 = if m >= 25.0 {
        100.0
    } else if m >= 20.0 {
        85.0
    } else if m >= 18.0 {
        70.0
    } else if m >= 15.0 {
        55.0
    } else if m >= 12.0 {
        40.0
    } else {
        25.0
    };

    if let Some(min_mileage) = filters.min_mileage {
        if m > min_mileage + 5.0 {
            score = (score + 15.0).min(100.0);
        }
    }

    score
}

/// Airbag count up to 40, six active/passive safety flags up to 40,
/// crash-test rating up to 20.
pub fn safety_score(vehicle: &Vehicle) -> f64 {
    let airbag_points = if vehicle.airbags >= 6 {
        40.0
    } else if vehicle.airbags >= 4 {
        30.0
    } else if vehicle.airbags >= 2 {
        20.0
    } else if vehicle.airbags >= 1 {
        10.0
    } else {
        0.0
    };

    let flags = [
        vehicle.abs,
        vehicle.esc,
        vehicle.traction_control,
        vehicle.hill_hold,
        vehicle.ebd,
        vehicle.isofix,
    ];
    let flag_count = flags.iter().filter(|f| **f).count() as f64;
    let flag_points = (flag_count / 6.0) * 40.0;

    let crash_points = if vehicle.crash_rating >= 5 {
        20.0
    } else if vehicle.crash_rating >= 4 {
        15.0
    } else if vehicle.crash_rating >= 3 {
        10.0
    } else if vehicle.crash_rating > 0 {
        5.0
    } else {
        0.0
    };

    airbag_points + flag_points + crash_points
}

/// Infotainment up to 30, comfort-tech up to 30, driver assistance up to 40.
pub fn features_score(vehicle: &Vehicle) -> f64 {
    let screen_points = if vehicle.touchscreen_size >= 10.0 {
        15.0
    } else if vehicle.touchscreen_size >= 7.0 {
        10.0
    } else if vehicle.touchscreen_size > 0.0 {
        5.0
    } else {
        0.0
    };
    let mut infotainment = screen_points;
    if vehicle.carplay_android_auto {
        infotainment += 8.0;
    }
    if vehicle.digital_cluster {
        infotainment += 7.0;
    }

    let mut comfort_tech = 0.0;
    if vehicle.sunroof {
        comfort_tech += 10.0;
    }
    if vehicle.keyless_entry {
        comfort_tech += 5.0;
    }
    if vehicle.cruise_control {
        comfort_tech += 5.0;
    }
    if vehicle.ventilated_seats {
        comfort_tech += 5.0;
    }
    if vehicle.wireless_charging {
        comfort_tech += 5.0;
    }

    let adas_flags = [
        vehicle.adaptive_cruise,
        vehicle.lane_keep_assist,
        vehicle.collision_warning,
        vehicle.blind_spot_monitor,
        vehicle.auto_emergency_braking,
    ];
    let adas_count = adas_flags.iter().filter(|f| **f).count() as f64;
    let adas_points = (adas_count / 5.0) * 40.0;

    infotainment + comfort_tech + adas_points
}

/// Power up to 40, torque up to 30, turbo flat 15, 0-100 time up to 15.
pub fn performance_score(vehicle: &Vehicle) -> f64 {
    let power_points = if vehicle.power_bhp >= 200.0 {
        40.0
    } else if vehicle.power_bhp >= 150.0 {
        30.0
    } else if vehicle.power_bhp >= 100.0 {
        20.0
    } else if vehicle.power_bhp > 0.0 {
        10.0
    } else {
        0.0
    };

    let torque_points = if vehicle.torque_nm >= 350.0 {
        30.0
    } else if vehicle.torque_nm >= 250.0 {
        20.0
    } else if vehicle.torque_nm >= 150.0 {
        10.0
    } else if vehicle.torque_nm > 0.0 {
        5.0
    } else {
        0.0
    };

    let turbo_points = if vehicle.turbo { 15.0 } else { 0.0 };

    // A zero acceleration figure means "not measured", not "instant".
    let accel = vehicle.acceleration_0_to_100;
    let accel_points = if accel > 0.0 && accel <= 8.0 {
        15.0
    } else if accel > 0.0 && accel <= 10.0 {
        10.0
    } else if accel > 0.0 && accel <= 12.0 {
        5.0
    } else {
        0.0
    };

    power_points + torque_points + turbo_points + accel_points
}

/// Seat comfort up to 40, practicality up to 30, climate/convenience up to 30.
pub fn comfort_score(vehicle: &Vehicle) -> f64 {
    let mut seats = 0.0;
    if vehicle.ventilated_seats {
        seats += 15.0;
    }
    if vehicle.heated_seats {
        seats += 10.0;
    }
    if vehicle.lumbar_support {
        seats += 8.0;
    }
    if vehicle.adjustable_headrest {
        seats += 7.0;
    }

    let boot_points = if vehicle.boot_space >= 500.0 {
        15.0
    } else if vehicle.boot_space >= 400.0 {
        12.0
    } else if vehicle.boot_space >= 300.0 {
        8.0
    } else if vehicle.boot_space > 0.0 {
        4.0
    } else {
        0.0
    };
    let mut practicality = boot_points;
    if vehicle.foldable_rear_seats {
        practicality += 10.0;
    }
    if vehicle.rear_armrest {
        practicality += 5.0;
    }

    let mut climate = 0.0;
    if vehicle.air_conditioning {
        climate += 15.0;
    }
    if vehicle.sunroof {
        climate += 10.0;
    }
    if vehicle.power_windows {
        climate += 5.0;
    }

    seats + practicality + climate
}
