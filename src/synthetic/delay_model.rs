//! Section-level scheduled-versus-actual delay (§4.5).

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::models::{PrecipitationType, StationId, Train, TrainType};
use crate::rng::RngSubstrate;

use super::weather_sampler::Weather;

#[allow(clippy::too_many_arguments)]
pub fn delay_minutes(
    rng: &mut RngSubstrate,
    dep_station: StationId,
    arr_station: StationId,
    hotspots: &std::collections::HashSet<StationId>,
    train: &Train,
    driver_employment_year: i32,
    weather: &Weather,
    scheduled_departure: NaiveDateTime,
) -> f64 {
    let is_hotspot = hotspots.contains(&dep_station) || hotspots.contains(&arr_station);
    let mut delay = rng.gauss(0.0, 1.5);
    if is_hotspot {
        delay += rng.uniform_real(2.0, 4.0);
    }

    let hour = scheduled_departure.hour();
    if (7..=9).contains(&hour) || (16..=18).contains(&hour) {
        delay += rng.uniform_real(0.5, 2.5);
    }

    if scheduled_departure.weekday().num_days_from_monday() == 4 {
        delay += rng.uniform_real(0.3, 1.8);
    }

    let experience = scheduled_departure.year() - driver_employment_year;
    if experience < 3 {
        delay *= rng.uniform_real(1.12, 1.28);
    } else if experience > 5 {
        delay *= rng.uniform_real(0.82, 0.92);
    }

    match train.operator_name.as_str() {
        "POLREGIO" => delay += rng.uniform_real(0.5, 2.0),
        "PKP Cargo" | "DB Cargo Polska" => delay += rng.uniform_real(-0.5, 1.0),
        _ => {}
    }

    match weather.precipitation_type {
        PrecipitationType::Snow => delay += rng.uniform_real(1.5, 4.0),
        PrecipitationType::Rain if weather.precipitation_amount >= 8.0 => {
            delay += rng.uniform_real(1.0, 3.0)
        }
        PrecipitationType::Hail => delay += rng.uniform_real(0.5, 2.0),
        _ => {}
    }

    delay
}

pub fn base_speed(train_type: TrainType) -> f64 {
    match train_type {
        TrainType::Passenger => 110.0,
        TrainType::Cargo => 90.0,
    }
}

