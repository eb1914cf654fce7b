//! Per-section synthetic weather (§4.4), conditioned on month and region.
//!
//! Anchored on the section's *arrival* station. The business specification's
//! own prose (§4.7 step 5) says "departure station", but its Design Notes
//! flag the discrepancy explicitly and say to follow the observed source
//! rather than guess: the reference implementation always calls the sampler
//! with the arrival station id.

use chrono::{Datelike, NaiveDateTime};

use crate::models::{PrecipitationType, Region, Station};
use crate::rng::RngSubstrate;

pub struct Weather {
    pub temperature: f64,
    pub precipitation_amount: f64,
    pub precipitation_type: PrecipitationType,
    pub region: Region,
}

fn month_mean_temp(month: u32) -> f64 {
    match month {
        1 => -2.0,
        2 => 0.0,
        3 => 4.0,
        4 => 10.0,
        5 => 16.0,
        6 => 19.0,
        7 => 21.0,
        8 => 20.0,
        9 => 15.0,
        10 => 9.0,
        11 => 3.0,
        12 => -1.0,
        _ => unreachable!("chrono month is always 1..=12"),
    }
}

fn region_offset(region: Region) -> f64 {
    match region {
        Region::Coastal => 1.5,
        Region::Mountain => -3.0,
        Region::Central => 0.0,
    }
}

pub fn sample_weather(rng: &mut RngSubstrate, timestamp: NaiveDateTime, anchor: &Station) -> Weather {
    let month = timestamp.month();
    let mean_temp = month_mean_temp(month) + region_offset(anchor.region);
    let temperature = rng.gauss(mean_temp, 4.0).clamp(-30.0, 40.0);

    let precipitation_amount = precipitation_amount(rng, month, anchor.region);
    let precipitation_type = precipitation_type(rng, month, precipitation_amount);

    Weather {
        temperature,
        precipitation_amount,
        precipitation_type,
        region: anchor.region,
    }
}

fn precipitation_amount(rng: &mut RngSubstrate, month: u32, region: Region) -> f64 {
    let summer_boost = if matches!(month, 6 | 7 | 8) { 1.2 } else { 1.0 };
    let winter_snow = if matches!(month, 12 | 1 | 2) { 0.8 } else { 1.0 };
    let mut amount = rng.gamma(2.0, 2.0) * summer_boost * winter_snow;

    if region == Region::Mountain {
        amount *= 1.2;
    }
    if region == Region::Coastal && matches!(month, 10 | 11 | 12 | 1 | 2) {
        amount *= 1.15;
    }

    (amount.min(25.0) * 10.0).round() / 10.0
}

fn precipitation_type(rng: &mut RngSubstrate, month: u32, amount: f64) -> PrecipitationType {
    if matches!(month, 12 | 1 | 2) {
        if amount < 1.0 {
            return PrecipitationType::None;
        }
        if amount < 6.0 {
            return PrecipitationType::Snow;
        }
        return if rng.bernoulli(0.2) {
            PrecipitationType::Snow
        } else {
            PrecipitationType::Rain
        };
    }

    if amount >= 10.0 && rng.bernoulli(0.05) {
        return PrecipitationType::Hail;
    }
    if amount < 1.0 {
        return PrecipitationType::None;
    }
    if matches!(month, 3 | 4 | 10 | 11) && rng.bernoulli(0.2) {
        return PrecipitationType::Snow;
    }
    PrecipitationType::Rain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_winter_is_never_rain() {
        let mut rng = RngSubstrate::seeded(1);
        for _ in 0..200 {
            let kind = precipitation_type(&mut rng, 1, 0.5);
            assert_eq!(kind, PrecipitationType::None);
        }
    }

    #[test]
    fn heavy_summer_precipitation_is_never_snow() {
        let mut rng = RngSubstrate::seeded(1);
        for _ in 0..200 {
            let kind = precipitation_type(&mut rng, 7, 15.0);
            assert_ne!(kind, PrecipitationType::Snow);
        }
    }

    #[test]
    fn amount_is_clipped_and_rounded_to_one_decimal() {
        let mut rng = RngSubstrate::seeded(4);
        for _ in 0..1000 {
            let amount = precipitation_amount(&mut rng, 7, Region::Mountain);
            assert!(amount <= 25.0);
            assert_eq!((amount * 10.0).round(), amount * 10.0);
        }
    }
}
