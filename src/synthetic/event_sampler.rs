//! Probabilistic in-section event emission (§4.6).

use chrono::{Datelike, NaiveDateTime};
use indexmap::IndexMap;

use crate::config::Calendar;
use crate::models::{Crossing, CrossingId, EventKind, EventTypeId, PrecipitationType, Train};
use crate::rng::RngSubstrate;

use super::weather_sampler::Weather;
use super::world::World;

pub struct GeneratedEvent {
    pub crossing_id: Option<CrossingId>,
    pub event_id: EventTypeId,
    pub caused_delay: f64,
    pub injured_count: u32,
    pub death_count: u32,
    pub repair_cost: f64,
    pub emergency_intervention: bool,
    pub event_date: NaiveDateTime,
    pub train_speed: f64,
}

#[allow(clippy::too_many_arguments)]
pub fn maybe_create_event(
    rng: &mut RngSubstrate,
    world: &World,
    base_event_rate: f64,
    crossing_id: Option<CrossingId>,
    train: &Train,
    driver_employment_year: i32,
    weather: &Weather,
    scheduled_departure: NaiveDateTime,
    snapshot_end: NaiveDateTime,
) -> Option<GeneratedEvent> {
    let crossing = crossing_id.and_then(|id| world.crossing(id));
    let mut probability = base_event_rate;

    if crossing.map(|c| c.is_old).unwrap_or(false) {
        probability *= 1.45;
    }
    if crossing.map(|c| c.upgrade_target.is_some()).unwrap_or(false)
        && scheduled_departure >= Calendar::upgrade_date()
    {
        probability *= 0.8;
    }

    if matches!(
        weather.precipitation_type,
        PrecipitationType::Rain | PrecipitationType::Snow
    ) {
        probability *= 1.2;
    }
    if weather.precipitation_amount >= 8.0 {
        probability *= 1.3;
    }

    let experience = scheduled_departure.year() - driver_employment_year;
    if experience < 3 {
        probability *= 1.2;
    } else if experience > 5 {
        probability *= 0.92;
    }

    let year_2025_start = parse_2025_start();
    if scheduled_departure >= year_2025_start && scheduled_departure <= snapshot_end {
        probability *= 0.95;
    }

    match train.operator_name.as_str() {
        "POLREGIO" => probability *= 1.1,
        "DB Cargo Polska" | "PKP Cargo" => probability *= 0.95,
        _ => {}
    }

    let probability = probability.min(0.35);
    if !rng.bernoulli(probability) {
        return None;
    }

    let (event_id, event_type) = pick_event_type(rng, world, weather, train, crossing);
    let caused_delay = event_delay_minutes(rng, event_type);
    let (injured_count, death_count) = event_casualties(rng, event_type);
    let repair_cost = event_repair_cost(rng, event_type);
    let emergency_intervention = matches!(event_type, EventKind::Wypadek | EventKind::Awaria);
    let event_date =
        scheduled_departure + chrono::Duration::milliseconds((rng.uniform_real(2.0, 10.0) * 60_000.0) as i64);
    let train_speed = event_speed(rng, train, crossing);

    Some(GeneratedEvent {
        crossing_id,
        event_id,
        caused_delay,
        injured_count,
        death_count,
        repair_cost,
        emergency_intervention,
        event_date,
        train_speed,
    })
}

fn parse_2025_start() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2025-01-01 00:00:00", "%Y-%m-%d %H:%M:%S")
        .expect("fixed calendar constant")
}

fn pick_event_type(
    rng: &mut RngSubstrate,
    world: &World,
    weather: &Weather,
    train: &Train,
    crossing: Option<&Crossing>,
) -> (EventTypeId, EventKind) {
    let mut weights: IndexMap<EventKind, f64> = IndexMap::new();
    weights.insert(EventKind::Wypadek, 0.06);
    weights.insert(EventKind::Incydent, 0.5);
    weights.insert(EventKind::Awaria, 0.22);
    weights.insert(EventKind::ZdarzenieTechniczne, 0.22);

    if crossing.map(|c| c.is_old).unwrap_or(false) {
        *weights.get_mut(&EventKind::Wypadek).unwrap() += 0.04;
        *weights.get_mut(&EventKind::Awaria).unwrap() += 0.03;
    }
    if weather.precipitation_type == PrecipitationType::Snow {
        *weights.get_mut(&EventKind::Incydent).unwrap() += 0.05;
        *weights.get_mut(&EventKind::Awaria).unwrap() += 0.04;
    }
    if matches!(train.operator_name.as_str(), "PKP Cargo" | "DB Cargo Polska") {
        *weights.get_mut(&EventKind::Awaria).unwrap() += 0.04;
        *weights.get_mut(&EventKind::Incydent).unwrap() -= 0.02;
    }

    let event_type = *rng
        .weighted_choice(&weights, "event type")
        .expect("weight map is hand-built above and never empty");

    let candidates = &world.events_by_kind[&event_type];
    let event_id = *rng.choose(candidates);
    (event_id, event_type)
}

fn event_delay_minutes(rng: &mut RngSubstrate, event_type: EventKind) -> f64 {
    match event_type {
        EventKind::Wypadek => rng.uniform_real(25.0, 90.0),
        EventKind::Awaria => rng.uniform_real(10.0, 45.0),
        EventKind::Incydent => rng.uniform_real(5.0, 25.0),
        EventKind::ZdarzenieTechniczne => rng.uniform_real(2.0, 12.0),
    }
}

fn event_casualties(rng: &mut RngSubstrate, event_type: EventKind) -> (u32, u32) {
    match event_type {
        EventKind::Wypadek => {
            let pool = [0u32, 1, 2, 3, 4, 5];
            let injured = *rng.choose(&pool);
            let deaths = if rng.bernoulli(0.05) { 1 } else { 0 };
            (injured, deaths)
        }
        EventKind::Awaria => (if rng.bernoulli(0.05) { 1 } else { 0 }, 0),
        _ => (0, 0),
    }
}

fn event_repair_cost(rng: &mut RngSubstrate, event_type: EventKind) -> f64 {
    match event_type {
        EventKind::Wypadek => rng.uniform_real(40_000.0, 180_000.0),
        EventKind::Awaria => rng.uniform_real(10_000.0, 40_000.0),
        EventKind::Incydent => rng.uniform_real(1_000.0, 6_000.0),
        EventKind::ZdarzenieTechniczne => rng.uniform_real(500.0, 3_000.0),
    }
}

fn event_speed(rng: &mut RngSubstrate, train: &Train, crossing: Option<&Crossing>) -> f64 {
    let mut speed = super::delay_model::base_speed(train.train_type);
    if let Some(crossing) = crossing {
        speed = speed.min(crossing.speed_limit as f64 + rng.uniform_int(-10, 5) as f64);
    }
    speed.clamp(30.0, 160.0)
}
