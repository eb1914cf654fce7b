//! T2 dimension evolution (§4.3): crossing upgrades, train operator
//! switches, and new driver hires. Run once, after T1 facts are generated
//! and before T2 dimensions are written.

use crate::models::{Crossing, CrossingId, Train, TrainId};
use crate::rng::RngSubstrate;

use super::dimension_builder::add_drivers_for_t2;
use super::world::World;

pub fn evolve_for_t2(rng: &mut RngSubstrate, world: &mut World) {
    apply_crossing_upgrades(rng, world);
    apply_train_switches(rng, world);
    add_drivers_for_t2(rng, &mut world.drivers, &mut world.next_driver_id);
}

fn apply_crossing_upgrades(rng: &mut RngSubstrate, world: &mut World) {
    let pending = std::mem::take(&mut world.pending_crossing_upgrades);
    for old_id in pending {
        let (speed_limit, region) = {
            let old = world.crossings.get(&old_id).expect("pending id was built");
            (old.speed_limit, old.region)
        };

        let new_id = CrossingId::new(world.next_crossing_id);
        world.next_crossing_id += 1;

        world.crossings.insert(
            new_id,
            Crossing {
                id: new_id,
                has_barriers: true,
                has_light_signals: true,
                is_lit: true,
                speed_limit: (speed_limit + rng.uniform_int(0, 5) as u32).min(100),
                region,
                is_old: false,
                upgrade_target: None,
            },
        );
        world.crossings_by_region.entry(region).or_default().push(new_id);

        world
            .crossings
            .get_mut(&old_id)
            .expect("pending id was built")
            .upgrade_target = Some(new_id);
    }
}

fn apply_train_switches(rng: &mut RngSubstrate, world: &mut World) {
    let switch_count = (world.pkp_cargo_trains.len()).min(rng.uniform_int(32, 58) as usize);
    let chosen = rng
        .sample_indices("PKP Cargo trains eligible for switch", world.pkp_cargo_trains.len(), switch_count)
        .expect("switch_count <= pkp_cargo_trains.len()")
        .into_iter()
        .map(|idx| world.pkp_cargo_trains[idx])
        .collect::<Vec<TrainId>>();

    for old_id in chosen {
        let old_name = world.trains.get(&old_id).expect("switch candidate exists").name.clone();
        let train_type = world.trains.get(&old_id).unwrap().train_type;

        let new_id = TrainId::new(world.next_train_id);
        world.next_train_id += 1;

        world.trains.insert(
            new_id,
            Train {
                id: new_id,
                name: format!("{old_name}-DB"),
                train_type,
                operator_name: "DB Cargo Polska".to_string(),
            },
        );
        world.train_switch_pairs.insert(old_id, new_id);
        world.train_switch_reverse.insert(new_id, old_id);
        world.db_successor_trains.insert(new_id);
    }
}
