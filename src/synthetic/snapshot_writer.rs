//! Dimension CSV emission and the per-ride fact generation loop (§4.7).

use std::fs::{File, OpenOptions};
use std::path::Path;

use chrono::{Datelike, NaiveDateTime};

use crate::error::{GenError, Result};
use crate::models::{
    CrossingId, Driver, DriverId, EventOnRoute, EventOnRouteId, Ride, RideId, RideSection,
    RideSectionId, Train, TrainId, WeatherObservation,
};
use crate::rng::RngSubstrate;

use super::crossing_selector::select_crossing;
use super::delay_model::delay_minutes;
use super::event_sampler::maybe_create_event;
use super::weather_sampler::sample_weather;
use super::world::World;

pub struct SnapshotConfig {
    pub name: &'static str,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub ride_count: usize,
    pub base_event_rate: f64,
}

#[derive(Default)]
pub struct FactCounters {
    pub next_ride_id: u32,
    pub next_section_id: u32,
    pub next_event_on_route_id: u32,
}

impl FactCounters {
    pub fn new() -> Self {
        Self {
            next_ride_id: 1,
            next_section_id: 1,
            next_event_on_route_id: 1,
        }
    }
}

fn io_err(path: &Path, source: std::io::Error) -> GenError {
    GenError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn csv_err(path: &Path, source: csv::Error) -> GenError {
    GenError::Csv {
        path: path.display().to_string(),
        source,
    }
}

fn open_csv_writer(path: &Path, append: bool) -> Result<csv::Writer<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(|e| io_err(path, e))?;
    Ok(csv::WriterBuilder::new().has_headers(false).from_writer(file))
}

fn fmt_timestamp(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn write_ride_row(writer: &mut csv::Writer<File>, path: &Path, ride: &Ride) -> Result<()> {
    writer
        .write_record([
            ride.id.to_string(),
            ride.route_name.clone(),
            ride.time_difference.to_string(),
            fmt_timestamp(ride.scheduled_departure),
            fmt_timestamp(ride.scheduled_arrival),
            ride.train_id.to_string(),
            ride.driver_id.to_string(),
        ])
        .map_err(|e| csv_err(path, e))
}

fn write_section_row(writer: &mut csv::Writer<File>, path: &Path, section: &RideSection) -> Result<()> {
    writer
        .write_record([
            section.id.to_string(),
            section.ride_id.to_string(),
            section.section_number.to_string(),
            section.departure_station_id.to_string(),
            section.arrival_station_id.to_string(),
            section.time_difference.to_string(),
            fmt_timestamp(section.scheduled_arrival),
            fmt_timestamp(section.scheduled_departure),
        ])
        .map_err(|e| csv_err(path, e))
}

fn write_event_row(writer: &mut csv::Writer<File>, path: &Path, event: &EventOnRoute) -> Result<()> {
    writer
        .write_record([
            event.id.to_string(),
            event.ride_section_id.to_string(),
            event.crossing_id.map(|c| c.to_string()).unwrap_or_default(),
            event.event_id.to_string(),
            event.caused_delay.to_string(),
            event.injured_count.to_string(),
            event.death_count.to_string(),
            format!("{:.2}", event.repair_cost),
            (event.emergency_intervention as u8).to_string(),
            fmt_timestamp(event.event_date),
            (event.train_speed.round() as i64).to_string(),
        ])
        .map_err(|e| csv_err(path, e))
}

fn write_weather_row(writer: &mut csv::Writer<File>, path: &Path, weather: &WeatherObservation) -> Result<()> {
    writer
        .write_record([
            weather.id_odcinka.to_string(),
            fmt_timestamp(weather.data_pomiaru),
            format!("{:.1}", weather.temperatura),
            format!("{:.1}", weather.ilosc_opadow),
            weather.typ_opadow.to_string(),
        ])
        .map_err(|e| csv_err(path, e))
}

pub fn write_dimension_csvs(world: &World, dir: &Path) -> Result<()> {
    write_station_csv(world, dir)?;
    write_crossing_csv(world, dir)?;
    write_train_csv(world, dir)?;
    write_driver_csv(world, dir)?;
    write_event_csv(world, dir)?;
    Ok(())
}

fn write_station_csv(world: &World, dir: &Path) -> Result<()> {
    let path = dir.join("Station.csv");
    let mut writer = open_csv_writer(&path, false)?;
    writer
        .write_record(["id", "name", "city"])
        .map_err(|e| csv_err(&path, e))?;
    for station in &world.stations {
        writer
            .write_record([station.id.to_string(), station.name.clone(), station.city.clone()])
            .map_err(|e| csv_err(&path, e))?;
    }
    writer.flush().map_err(|e| io_err(&path, e))
}

fn write_crossing_csv(world: &World, dir: &Path) -> Result<()> {
    let path = dir.join("Crossing.csv");
    let mut writer = open_csv_writer(&path, false)?;
    writer
        .write_record(["id", "has_barriers", "has_light_signals", "is_lit", "speed_limit"])
        .map_err(|e| csv_err(&path, e))?;

    let mut ids: Vec<CrossingId> = world.crossings.keys().copied().collect();
    ids.sort();
    for id in ids {
        let c = &world.crossings[&id];
        writer
            .write_record([
                c.id.to_string(),
                (c.has_barriers as u8).to_string(),
                (c.has_light_signals as u8).to_string(),
                (c.is_lit as u8).to_string(),
                c.speed_limit.to_string(),
            ])
            .map_err(|e| csv_err(&path, e))?;
    }
    writer.flush().map_err(|e| io_err(&path, e))
}

fn write_train_csv(world: &World, dir: &Path) -> Result<()> {
    let path = dir.join("Train.csv");
    let mut writer = open_csv_writer(&path, false)?;
    writer
        .write_record(["id", "name", "train_type", "operator_name"])
        .map_err(|e| csv_err(&path, e))?;

    for id in world.train_ids() {
        let t = &world.trains[&id];
        writer
            .write_record([t.id.to_string(), t.name.clone(), t.train_type.to_string(), t.operator_name.clone()])
            .map_err(|e| csv_err(&path, e))?;
    }
    writer.flush().map_err(|e| io_err(&path, e))
}

fn write_driver_csv(world: &World, dir: &Path) -> Result<()> {
    let path = dir.join("Driver.csv");
    let mut writer = open_csv_writer(&path, false)?;
    writer
        .write_record(["id", "first_name", "last_name", "gender", "age", "employment_year"])
        .map_err(|e| csv_err(&path, e))?;

    for driver in &world.drivers {
        writer
            .write_record([
                driver.id.to_string(),
                driver.first_name.clone(),
                driver.last_name.clone(),
                driver.gender.to_string(),
                driver.age.to_string(),
                driver.employment_year.to_string(),
            ])
            .map_err(|e| csv_err(&path, e))?;
    }
    writer.flush().map_err(|e| io_err(&path, e))
}

fn write_event_csv(world: &World, dir: &Path) -> Result<()> {
    let path = dir.join("Event.csv");
    let mut writer = open_csv_writer(&path, false)?;
    writer
        .write_record(["id", "event_type", "category", "danger_scale"])
        .map_err(|e| csv_err(&path, e))?;

    for event in &world.events {
        writer
            .write_record([
                event.id.to_string(),
                event.event_type.to_string(),
                event.category.to_string(),
                event.danger_scale.to_string(),
            ])
            .map_err(|e| csv_err(&path, e))?;
    }
    writer.flush().map_err(|e| io_err(&path, e))
}

/// Copies the four T1 fact CSVs into the T2 directory byte-for-byte. Must
/// run after the T1 writers are closed and before T2 facts are appended.
pub fn copy_t1_facts_to_t2(t1_dir: &Path, t2_dir: &Path) -> Result<()> {
    for filename in ["Ride.csv", "Ride_Section.csv", "Event_On_Route.csv", "weather.csv"] {
        let src = t1_dir.join(filename);
        let dst = t2_dir.join(filename);
        std::fs::copy(&src, &dst).map_err(|e| io_err(&dst, e))?;
    }
    Ok(())
}

fn select_train_for_snapshot(
    rng: &mut RngSubstrate,
    world: &World,
    snapshot_name: &str,
    schedule_start: NaiveDateTime,
    trains_pool: &[TrainId],
    switch_date: NaiveDateTime,
) -> TrainId {
    let candidate = *rng.choose(trains_pool);
    if snapshot_name != "T2" {
        return candidate;
    }

    if schedule_start < switch_date {
        if world.db_successor_trains.contains(&candidate) {
            return *world.train_switch_reverse.get(&candidate).unwrap_or(&candidate);
        }
        return candidate;
    }

    if let Some(&successor) = world.train_switch_pairs.get(&candidate) {
        return successor;
    }
    candidate
}

fn select_driver_for_snapshot(
    rng: &mut RngSubstrate,
    world: &World,
    schedule_start: NaiveDateTime,
    drivers_pool: &[DriverId],
) -> DriverId {
    loop {
        let candidate = *rng.choose(drivers_pool);
        if world.driver(candidate).employment_year <= schedule_start.year() {
            return candidate;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn build_sections_for_ride(
    rng: &mut RngSubstrate,
    world: &World,
    route: &crate::models::RouteTemplate,
    ride_id: u32,
    train: &Train,
    driver: &Driver,
    schedule_start: NaiveDateTime,
    base_event_rate: f64,
    snapshot_end: NaiveDateTime,
    counters: &mut FactCounters,
    section_writer: &mut csv::Writer<File>,
    event_writer: &mut csv::Writer<File>,
    weather_writer: &mut csv::Writer<File>,
    section_path: &Path,
    event_path: &Path,
    weather_path: &Path,
) -> Result<(f64, NaiveDateTime)> {
    let mut cursor = schedule_start;
    let mut total_delay = 0.0;
    let mut last_arrival = schedule_start;

    for idx in 0..route.section_count() {
        let dep = route.station_ids[idx];
        let arr = route.station_ids[idx + 1];
        let minutes = route.section_minutes[idx];

        let scheduled_departure = cursor;
        let scheduled_arrival = scheduled_departure + chrono::Duration::minutes(minutes as i64);

        let weather = sample_weather(rng, scheduled_departure, world.station(arr));
        let mut delay = delay_minutes(
            rng,
            dep,
            arr,
            &world.hotspots,
            train,
            driver.employment_year,
            &weather,
            scheduled_departure,
        );

        let crossing_choice = select_crossing(rng, world, weather.region, scheduled_departure);
        let event = maybe_create_event(
            rng,
            world,
            base_event_rate,
            crossing_choice,
            train,
            driver.employment_year,
            &weather,
            scheduled_departure,
            snapshot_end,
        );

        let section_id = RideSectionId::new(counters.next_section_id);

        if let Some(event) = &event {
            delay += event.caused_delay;
            delay = delay.clamp(-5.0, 240.0);

            let event_row = EventOnRoute {
                id: EventOnRouteId::new(counters.next_event_on_route_id),
                ride_section_id: section_id,
                crossing_id: event.crossing_id,
                event_id: event.event_id,
                caused_delay: event.caused_delay,
                injured_count: event.injured_count,
                death_count: event.death_count,
                repair_cost: event.repair_cost,
                emergency_intervention: event.emergency_intervention,
                event_date: event.event_date,
                train_speed: event.train_speed,
            };
            write_event_row(event_writer, event_path, &event_row)?;
            counters.next_event_on_route_id += 1;
        }

        let section_row = RideSection {
            id: section_id,
            ride_id: RideId::new(ride_id),
            section_number: (idx + 1) as u32,
            departure_station_id: dep,
            arrival_station_id: arr,
            time_difference: delay.round() as i32,
            scheduled_departure,
            scheduled_arrival,
        };
        write_section_row(section_writer, section_path, &section_row)?;

        let weather_row = WeatherObservation {
            id_odcinka: section_id,
            data_pomiaru: scheduled_departure,
            temperatura: weather.temperature,
            ilosc_opadow: weather.precipitation_amount,
            typ_opadow: weather.precipitation_type,
        };
        write_weather_row(weather_writer, weather_path, &weather_row)?;

        total_delay += delay;
        last_arrival = scheduled_arrival;
        counters.next_section_id += 1;
        cursor = scheduled_arrival;
    }

    Ok((total_delay, last_arrival))
}

pub fn generate_facts(
    rng: &mut RngSubstrate,
    world: &World,
    counters: &mut FactCounters,
    config: &SnapshotConfig,
    switch_date: NaiveDateTime,
    dir: &Path,
    append: bool,
) -> Result<()> {
    let ride_path = dir.join("Ride.csv");
    let section_path = dir.join("Ride_Section.csv");
    let event_path = dir.join("Event_On_Route.csv");
    let weather_path = dir.join("weather.csv");

    let mut ride_writer = open_csv_writer(&ride_path, append)?;
    let mut section_writer = open_csv_writer(&section_path, append)?;
    let mut event_writer = open_csv_writer(&event_path, append)?;
    let mut weather_writer = open_csv_writer(&weather_path, append)?;

    if !append {
        ride_writer
            .write_record([
                "id",
                "route_name",
                "time_difference",
                "scheduled_departure",
                "scheduled_arrival",
                "train_id",
                "driver_id",
            ])
            .map_err(|e| csv_err(&ride_path, e))?;
        section_writer
            .write_record([
                "id",
                "ride_id",
                "section_number",
                "departure_station_id",
                "arrival_station_id",
                "time_difference",
                "scheduled_arrival",
                "scheduled_departure",
            ])
            .map_err(|e| csv_err(&section_path, e))?;
        event_writer
            .write_record([
                "id",
                "ride_section_id",
                "crossing_id",
                "event_id",
                "caused_delay",
                "injured_count",
                "death_count",
                "repair_cost",
                "emergency_intervention",
                "event_date",
                "train_speed",
            ])
            .map_err(|e| csv_err(&event_path, e))?;
        weather_writer
            .write_record(["id_odcinka", "data_pomiaru", "temperatura", "ilosc_opadow", "typ_opadow"])
            .map_err(|e| csv_err(&weather_path, e))?;
    }

    let trains_pool = world.train_ids();
    let drivers_pool = world.driver_ids();

    for _ in 0..config.ride_count {
        let route = rng.choose(&world.routes);
        let schedule_start = rng.uniform_datetime(config.start, config.end);
        let train_id = select_train_for_snapshot(rng, world, config.name, schedule_start, &trains_pool, switch_date);
        let driver_id = select_driver_for_snapshot(rng, world, schedule_start, &drivers_pool);

        let train = world.train(train_id).expect("selected train always exists");
        let driver = world.driver(driver_id);

        let (ride_total_delay, scheduled_arrival) = build_sections_for_ride(
            rng,
            world,
            route,
            counters.next_ride_id,
            train,
            driver,
            schedule_start,
            config.base_event_rate,
            config.end,
            counters,
            &mut section_writer,
            &mut event_writer,
            &mut weather_writer,
            &section_path,
            &event_path,
            &weather_path,
        )?;

        let ride_total_delay = ride_total_delay.clamp(-20.0, 360.0);

        let ride_row = Ride {
            id: RideId::new(counters.next_ride_id),
            route_name: route.name.clone(),
            time_difference: ride_total_delay.round() as i32,
            scheduled_departure: schedule_start,
            scheduled_arrival,
            train_id,
            driver_id,
        };
        write_ride_row(&mut ride_writer, &ride_path, &ride_row)?;

        counters.next_ride_id += 1;
    }

    ride_writer.flush().map_err(|e| io_err(&ride_path, e))?;
    section_writer.flush().map_err(|e| io_err(&section_path, e))?;
    event_writer.flush().map_err(|e| io_err(&event_path, e))?;
    weather_writer.flush().map_err(|e| io_err(&weather_path, e))?;
    Ok(())
}
