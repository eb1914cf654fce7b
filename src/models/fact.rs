use std::fmt;

use chrono::NaiveDateTime;

use crate::ids::Id;
use crate::models::dimension::{CrossingId, DriverId, EventTypeId, StationId, TrainId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipitationType {
    None,
    Rain,
    Snow,
    Hail,
}

impl fmt::Display for PrecipitationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrecipitationType::None => "brak",
            PrecipitationType::Rain => "deszcz",
            PrecipitationType::Snow => "snieg",
            PrecipitationType::Hail => "grad",
        })
    }
}

pub struct Ride {
    pub id: RideId,
    pub route_name: String,
    pub time_difference: i32,
    pub scheduled_departure: NaiveDateTime,
    pub scheduled_arrival: NaiveDateTime,
    pub train_id: TrainId,
    pub driver_id: DriverId,
}

pub type RideId = Id<Ride>;

pub struct RideSection {
    pub id: RideSectionId,
    pub ride_id: RideId,
    pub section_number: u32,
    pub departure_station_id: StationId,
    pub arrival_station_id: StationId,
    pub time_difference: i32,
    pub scheduled_departure: NaiveDateTime,
    pub scheduled_arrival: NaiveDateTime,
}

pub type RideSectionId = Id<RideSection>;

pub struct EventOnRoute {
    pub id: EventOnRouteId,
    pub ride_section_id: RideSectionId,
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

pub type EventOnRouteId = Id<EventOnRoute>;

/// One row per section, keyed 1:1 on the section id (`id_odcinka`, "section
/// id" in Polish — the Python source's own column name, kept verbatim since
/// it is a wire-format constant rather than an internal identifier).
pub struct WeatherObservation {
    pub id_odcinka: RideSectionId,
    pub data_pomiaru: NaiveDateTime,
    pub temperatura: f64,
    pub ilosc_opadow: f64,
    pub typ_opadow: PrecipitationType,
}
