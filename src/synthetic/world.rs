use std::collections::{HashMap, HashSet};

use crate::models::{
    Crossing, CrossingId, Driver, DriverId, EventKind, EventTypeId, EventTypeRow, Region,
    RouteTemplate, Station, StationId, Train, TrainId,
};

/// Everything the dimension builder produces and the evolver mutates.
///
/// Stations and route templates are dense and never reallocated past their
/// initial range, so they live in plain `Vec`s indexed by `id - 1`.
/// Crossings and trains gain new rows during T2 evolution whose ids sit
/// alongside (not past, since allocation is simply sequential, but logically
/// distinct from) the originals, and old rows are mutated in place
/// (`upgrade_target`), so they live in `HashMap`s keyed by id.
pub struct World {
    pub stations: Vec<Station>,
    pub hotspots: HashSet<StationId>,

    pub crossings: HashMap<CrossingId, Crossing>,
    pub crossings_by_region: HashMap<Region, Vec<CrossingId>>,
    pub pending_crossing_upgrades: Vec<CrossingId>,
    pub next_crossing_id: u32,

    pub trains: HashMap<TrainId, Train>,
    pub pkp_cargo_trains: Vec<TrainId>,
    pub train_switch_pairs: HashMap<TrainId, TrainId>,
    pub train_switch_reverse: HashMap<TrainId, TrainId>,
    pub db_successor_trains: HashSet<TrainId>,
    pub next_train_id: u32,

    pub drivers: Vec<Driver>,
    pub next_driver_id: u32,

    pub events: Vec<EventTypeRow>,
    pub events_by_kind: HashMap<EventKind, Vec<EventTypeId>>,

    pub routes: Vec<RouteTemplate>,
}

impl World {
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[(id.get() - 1) as usize]
    }

    pub fn driver(&self, id: DriverId) -> &Driver {
        &self.drivers[(id.get() - 1) as usize]
    }

    pub fn crossing(&self, id: CrossingId) -> Option<&Crossing> {
        self.crossings.get(&id)
    }

    pub fn train(&self, id: TrainId) -> Option<&Train> {
        self.trains.get(&id)
    }

    /// Sorted rather than hash-iteration order: `HashMap` iteration order is
    /// randomized per process, which would make the RNG-driven ride loop
    /// (which indexes into this pool by draw, not by id) non-reproducible
    /// across runs of the same seed.
    pub fn train_ids(&self) -> Vec<TrainId> {
        let mut ids: Vec<TrainId> = self.trains.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn driver_ids(&self) -> Vec<DriverId> {
        (1..=self.drivers.len() as u32).map(DriverId::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_ids_are_returned_in_sorted_order() {
        let mut trains = HashMap::new();
        for raw in [40u32, 1, 23] {
            let id = TrainId::new(raw);
            trains.insert(
                id,
                Train {
                    id,
                    name: format!("T{raw}"),
                    train_type: crate::models::TrainType::Passenger,
                    operator_name: "PKP Intercity".to_string(),
                },
            );
        }
        let world = World {
            stations: Vec::new(),
            hotspots: HashSet::new(),
            crossings: HashMap::new(),
            crossings_by_region: HashMap::new(),
            pending_crossing_upgrades: Vec::new(),
            next_crossing_id: 1,
            trains,
            pkp_cargo_trains: Vec::new(),
            train_switch_pairs: HashMap::new(),
            train_switch_reverse: HashMap::new(),
            db_successor_trains: HashSet::new(),
            next_train_id: 41,
            drivers: Vec::new(),
            next_driver_id: 1,
            events: Vec::new(),
            events_by_kind: HashMap::new(),
            routes: Vec::new(),
        };

        let ids: Vec<u32> = world.train_ids().into_iter().map(|id| id.get()).collect();
        assert_eq!(ids, vec![1, 23, 40]);
    }
}
