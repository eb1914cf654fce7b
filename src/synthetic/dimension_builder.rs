//! T1 dimension construction (§4.2): stations, crossings, trains, drivers,
//! the fixed event table, and route templates.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::error::{GenError, Result};
use crate::locale;
use crate::models::{
    Crossing, CrossingId, Driver, DriverId, EventKind, EventTypeId, EventTypeRow, Gender, Region,
    RouteTemplate, Station, StationId, Train, TrainId, TrainType,
};
use crate::rng::RngSubstrate;

use super::world::World;

const UNIQUE_CITY_ATTEMPTS: u32 = 10_000;

pub fn build_t1(rng: &mut RngSubstrate) -> Result<World> {
    let stations = build_stations(rng)?;
    let hotspots = sample_hotspots(rng, &stations);

    let (crossings, crossings_by_region, pending_crossing_upgrades, next_crossing_id) =
        build_crossings(rng, &stations)?;

    let (trains, pkp_cargo_trains, next_train_id) = build_trains(rng);
    let drivers = build_drivers(rng, 4_500, 5_800, 1990);
    let next_driver_id = drivers.len() as u32 + 1;

    let (events, events_by_kind) = build_events();
    let routes = build_routes(rng, &stations)?;

    Ok(World {
        stations,
        hotspots,
        crossings,
        crossings_by_region,
        pending_crossing_upgrades,
        next_crossing_id,
        trains,
        pkp_cargo_trains,
        train_switch_pairs: HashMap::new(),
        train_switch_reverse: HashMap::new(),
        db_successor_trains: HashSet::new(),
        next_train_id,
        drivers,
        next_driver_id,
        events,
        events_by_kind,
        routes,
    })
}

fn build_stations(rng: &mut RngSubstrate) -> Result<Vec<Station>> {
    let target_count = rng.uniform_int(420, 560) as usize;
    let mut used_pairs: HashSet<(String, String)> = HashSet::new();
    let mut used_names: HashSet<String> = HashSet::new();
    let mut stations = Vec::with_capacity(target_count);

    for i in 0..target_count {
        let (city, voivodeship) = unique_city(rng, &mut used_pairs)?;
        let region = Region::classify(&voivodeship);
        let mut name = format!("Stacja {city}");
        if used_names.contains(&name) {
            let suffix = rng.uniform_int(1, 9);
            name = format!("Stacja {city} {suffix}");
        }
        used_names.insert(name.clone());

        stations.push(Station {
            id: StationId::new(i as u32 + 1),
            name,
            city,
            voivodeship,
            region,
        });
    }

    Ok(stations)
}

fn unique_city(
    rng: &mut RngSubstrate,
    used_pairs: &mut HashSet<(String, String)>,
) -> Result<(String, String)> {
    for _ in 0..UNIQUE_CITY_ATTEMPTS {
        let city = locale::random_city(rng);
        let voivodeship = locale::random_voivodeship(rng);
        let key = (city.clone(), voivodeship.clone());
        if used_pairs.insert(key) {
            return Ok((city, voivodeship));
        }
    }
    Err(GenError::UniqueValueExhausted {
        namespace: "station city/voivodeship pair",
        attempts: UNIQUE_CITY_ATTEMPTS,
    })
}

fn sample_hotspots(rng: &mut RngSubstrate, stations: &[Station]) -> HashSet<StationId> {
    let hotspot_count = rng.uniform_int(12, 18) as usize;
    rng.sample_indices("hotspot stations", stations.len(), hotspot_count)
        .expect("hotspot_count is always <= station count")
        .into_iter()
        .map(|idx| stations[idx].id)
        .collect()
}

type CrossingBuild = (
    HashMap<CrossingId, Crossing>,
    HashMap<Region, Vec<CrossingId>>,
    Vec<CrossingId>,
    u32,
);

fn build_crossings(rng: &mut RngSubstrate, stations: &[Station]) -> Result<CrossingBuild> {
    let crossing_count = rng.uniform_int(9_000, 11_500) as usize;
    let mut crossings = HashMap::with_capacity(crossing_count);
    let mut crossings_by_region: HashMap<Region, Vec<CrossingId>> = HashMap::new();
    let mut eligible_for_upgrade = Vec::new();

    let mut next_id = 1u32;
    for _ in 0..crossing_count {
        let is_old = rng.bernoulli(0.55);
        let (has_barriers, has_light_signals, is_lit) = if is_old {
            (false, false, false)
        } else {
            (
                rng.bernoulli(0.75),
                rng.bernoulli(0.85),
                rng.bernoulli(0.9),
            )
        };
        let speed_limit = rng.uniform_int(30, 100) as u32;
        let region = rng.choose(stations).region;

        let id = CrossingId::new(next_id);
        crossings.insert(
            id,
            Crossing {
                id,
                has_barriers,
                has_light_signals,
                is_lit,
                speed_limit,
                region,
                is_old,
                upgrade_target: None,
            },
        );
        crossings_by_region.entry(region).or_default().push(id);
        if is_old {
            eligible_for_upgrade.push(id);
        }
        next_id += 1;
    }

    let upgrade_count = rng.uniform_int(320, 520) as usize;
    let pending_crossing_upgrades = rng
        .sample_indices("crossings eligible for upgrade", eligible_for_upgrade.len(), upgrade_count)?
        .into_iter()
        .map(|idx| eligible_for_upgrade[idx])
        .collect();

    Ok((crossings, crossings_by_region, pending_crossing_upgrades, next_id))
}

const OPERATORS: [(&str, f64); 7] = [
    ("PKP Intercity", 0.22),
    ("POLREGIO", 0.24),
    ("PKP Cargo", 0.18),
    ("DB Cargo Polska", 0.10),
    ("Koleje Mazowieckie", 0.10),
    ("Koleje Śląskie", 0.08),
    ("Koleje Dolnośląskie", 0.08),
];

fn operator_weights() -> IndexMap<&'static str, f64> {
    OPERATORS.iter().copied().collect()
}

fn train_name(rng: &mut RngSubstrate, operator: &str) -> String {
    match operator {
        "PKP Intercity" => format!("IC {}", rng.uniform_int(1000, 9999)),
        "POLREGIO" => format!("PR {}", rng.uniform_int(10_000, 99_999)),
        "PKP Cargo" => format!("ET {}", rng.uniform_int(500, 9999)),
        "DB Cargo Polska" => format!("DB {}", rng.uniform_int(7000, 9999)),
        "Koleje Mazowieckie" => format!("KM {}", rng.uniform_int(100, 9999)),
        "Koleje Śląskie" => format!("KS {}", rng.uniform_int(100, 9999)),
        "Koleje Dolnośląskie" => format!("KD {}", rng.uniform_int(100, 9999)),
        _ => format!("TR {}", rng.uniform_int(1000, 99_999)),
    }
}

fn build_trains(rng: &mut RngSubstrate) -> (HashMap<TrainId, Train>, Vec<TrainId>, u32) {
    let base_count = rng.uniform_int(1_300, 1_650) as usize;
    let weights = operator_weights();
    let mut trains = HashMap::with_capacity(base_count);
    let mut pkp_cargo_trains = Vec::new();

    let mut next_id = 1u32;
    for _ in 0..base_count {
        let operator = *rng
            .weighted_choice(&weights, "train operator")
            .expect("operator weight map is static and non-empty");
        let train_type = if operator.contains("Cargo") {
            TrainType::Cargo
        } else {
            TrainType::Passenger
        };
        let name = train_name(rng, operator);

        let id = TrainId::new(next_id);
        trains.insert(
            id,
            Train {
                id,
                name,
                train_type,
                operator_name: operator.to_string(),
            },
        );
        if operator == "PKP Cargo" {
            pkp_cargo_trains.push(id);
        }
        next_id += 1;
    }

    (trains, pkp_cargo_trains, next_id)
}

/// Shared by the T1 base population and the T2 new-hire batch; `min_year`
/// floors `employment_year` (1990 for T1, 2023 for T2 hires). When an older
/// age would otherwise force `employment_year` below `min_year`, the upper
/// bound is raised to match it rather than producing an empty range.
fn build_drivers(rng: &mut RngSubstrate, low: i64, high: i64, min_year: i32) -> Vec<Driver> {
    let count = rng.uniform_int(low, high) as usize;
    let mut drivers = Vec::with_capacity(count);
    for i in 0..count {
        drivers.push(make_driver(rng, i as u32 + 1, min_year));
    }
    drivers
}

fn make_driver(rng: &mut RngSubstrate, id: u32, min_employment_year: i32) -> Driver {
    let gender = if rng.bernoulli(0.82) {
        Gender::Man
    } else {
        Gender::Woman
    };
    let first_name = match gender {
        Gender::Man => locale::random_first_name_male(rng),
        Gender::Woman => locale::random_first_name_female(rng),
    };
    let last_name = locale::random_last_name(rng);
    let age = rng.uniform_int(23, 62) as u32;

    const CURRENT_YEAR: i32 = 2025;
    let max_year = (CURRENT_YEAR - (age as i32 - 21)).min(CURRENT_YEAR);
    let max_year = max_year.max(min_employment_year);
    let employment_year = rng.uniform_int(min_employment_year as i64, max_year as i64) as i32;

    Driver {
        id: DriverId::new(id),
        first_name,
        last_name,
        gender,
        age,
        employment_year,
    }
}

/// Appends a batch of T2 hires to an already-built driver roster, returning
/// the updated `next_driver_id`.
pub fn add_drivers_for_t2(rng: &mut RngSubstrate, drivers: &mut Vec<Driver>, next_driver_id: &mut u32) {
    let hires = rng.uniform_int(250, 400) as usize;
    for _ in 0..hires {
        drivers.push(make_driver(rng, *next_driver_id, 2023));
        *next_driver_id += 1;
    }
}

const EVENT_DEFINITIONS: [(EventKind, &str, u32); 13] = [
    (EventKind::Wypadek, "potrącenie pieszego", 9),
    (EventKind::Wypadek, "zderzenie z samochodem", 8),
    (EventKind::Wypadek, "wykolejenie", 10),
    (EventKind::Wypadek, "zderzenie z innym pociągiem", 10),
    (EventKind::Incydent, "opóźnienie organizacyjne", 4),
    (EventKind::Incydent, "przekroczenie limitu prędkości", 5),
    (EventKind::Incydent, "problem z pasażerem", 3),
    (EventKind::Awaria, "usterka hamulców", 7),
    (EventKind::Awaria, "usterka sygnalizacji", 6),
    (EventKind::Awaria, "awaria lokomotywy", 7),
    (EventKind::ZdarzenieTechniczne, "planowy postój", 2),
    (EventKind::ZdarzenieTechniczne, "test systemu", 2),
    (EventKind::ZdarzenieTechniczne, "brak maszynisty", 3),
];

fn build_events() -> (Vec<EventTypeRow>, HashMap<EventKind, Vec<EventTypeId>>) {
    let mut events = Vec::with_capacity(EVENT_DEFINITIONS.len());
    let mut by_kind: HashMap<EventKind, Vec<EventTypeId>> = HashMap::new();
    for (i, (kind, category, danger_scale)) in EVENT_DEFINITIONS.into_iter().enumerate() {
        let id = EventTypeId::new(i as u32 + 1);
        events.push(EventTypeRow {
            id,
            event_type: kind,
            category,
            danger_scale,
        });
        by_kind.entry(kind).or_default().push(id);
    }
    (events, by_kind)
}

fn build_routes(rng: &mut RngSubstrate, stations: &[Station]) -> Result<Vec<RouteTemplate>> {
    let route_count = rng.uniform_int(240, 340) as usize;
    let mut routes = Vec::with_capacity(route_count);
    let mut used_endpoint_pairs: HashSet<(StationId, StationId)> = HashSet::new();

    for _ in 0..route_count {
        let stops = (rng.triangular(3.0, 20.0, 10.0).round() as i64).max(3);
        let stop_count = stops as usize + 1;
        let indices = rng.sample_indices("route station sequence", stations.len(), stop_count)?;
        let station_ids: Vec<StationId> = indices.into_iter().map(|idx| stations[idx].id).collect();

        let first = station_ids[0];
        let last = *station_ids.last().unwrap();
        let name = if used_endpoint_pairs.contains(&(first, last)) {
            format!("Linia {first}-{last} {}", rng.uniform_int(1, 99))
        } else {
            used_endpoint_pairs.insert((first, last));
            format!("Linia {first}-{last}")
        };

        let section_minutes = (0..stops)
            .map(|_| rng.uniform_int(12, 45) as u32)
            .collect();

        routes.push(RouteTemplate {
            name,
            station_ids,
            section_minutes,
        });
    }

    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn old_driver_employment_year_is_clamped_to_min_year_not_empty_range() {
        let mut rng = RngSubstrate::seeded(6);
        // age 62 forces the theoretical max_year below 2023; the clamp
        // should collapse the range rather than panic on low > high.
        for _ in 0..100 {
            let driver = make_driver(&mut rng, 1, 2023);
            assert!(driver.employment_year >= 2023);
        }
    }

    #[test]
    fn build_stations_produces_unique_city_voivodeship_pairs() {
        let mut rng = RngSubstrate::seeded(10);
        let stations = build_stations(&mut rng).unwrap();
        let mut seen = HashSet::new();
        for station in &stations {
            assert!(seen.insert((station.city.clone(), station.voivodeship.clone())));
        }
        assert!((420..=560).contains(&stations.len()));
    }

    #[test]
    fn build_trains_type_matches_operator_name() {
        let mut rng = RngSubstrate::seeded(12);
        let (trains, _, _) = build_trains(&mut rng);
        for train in trains.values() {
            let is_cargo = train.operator_name.contains("Cargo");
            assert_eq!(train.train_type == TrainType::Cargo, is_cargo);
        }
    }
}
