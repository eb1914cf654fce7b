use std::fmt;

use crate::ids::Id;

/// Coarse climatic class a station/crossing is assigned to, derived from
/// voivodeship. Drives both weather means and event-rate seasonality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Coastal,
    Mountain,
    Central,
}

impl Region {
    pub fn classify(voivodeship: &str) -> Region {
        if crate::locale::COASTAL.contains(&voivodeship) {
            Region::Coastal
        } else if crate::locale::MOUNTAIN.contains(&voivodeship) {
            Region::Mountain
        } else {
            Region::Central
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Man,
    Woman,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Man => "man",
            Gender::Woman => "woman",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainType {
    Cargo,
    Passenger,
}

impl fmt::Display for TrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrainType::Cargo => "cargo",
            TrainType::Passenger => "passenger",
        })
    }
}

/// One of the four event categories named in the business specification.
/// The Display impl is the exact Polish string written to `Event.csv` and
/// referenced by downstream weighting logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Wypadek,
    Incydent,
    Awaria,
    ZdarzenieTechniczne,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventKind::Wypadek => "wypadek",
            EventKind::Incydent => "incydent",
            EventKind::Awaria => "awaria",
            EventKind::ZdarzenieTechniczne => "zdarzenie techniczne",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub city: String,
    pub voivodeship: String,
    pub region: Region,
}

pub type StationId = Id<Station>;

#[derive(Debug, Clone)]
pub struct Crossing {
    pub id: CrossingId,
    pub has_barriers: bool,
    pub has_light_signals: bool,
    pub is_lit: bool,
    pub speed_limit: u32,
    pub region: Region,
    pub is_old: bool,
    pub upgrade_target: Option<CrossingId>,
}

pub type CrossingId = Id<Crossing>;

#[derive(Debug, Clone)]
pub struct Train {
    pub id: TrainId,
    pub name: String,
    pub train_type: TrainType,
    pub operator_name: String,
}

pub type TrainId = Id<Train>;

#[derive(Debug, Clone)]
pub struct Driver {
    pub id: DriverId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub age: u32,
    pub employment_year: i32,
}

pub type DriverId = Id<Driver>;

#[derive(Debug, Clone)]
pub struct EventTypeRow {
    pub id: EventTypeId,
    pub event_type: EventKind,
    pub category: &'static str,
    pub danger_scale: u32,
}

pub type EventTypeId = Id<EventTypeRow>;

/// A static named path through a sequence of stations, with one scheduled
/// travel time per hop. Shared unchanged by both snapshots.
#[derive(Debug, Clone)]
pub struct RouteTemplate {
    pub name: String,
    pub station_ids: Vec<StationId>,
    pub section_minutes: Vec<u32>,
}

impl RouteTemplate {
    pub fn section_count(&self) -> usize {
        self.section_minutes.len()
    }
}
