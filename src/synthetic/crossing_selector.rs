//! Crossing selection for a section, given the section's weather region
//! (§4.8).

use chrono::NaiveDateTime;

use crate::config::Calendar;
use crate::models::CrossingId;
use crate::rng::RngSubstrate;

use super::world::World;

pub fn select_crossing(
    rng: &mut RngSubstrate,
    world: &World,
    region: crate::models::Region,
    scheduled_departure: NaiveDateTime,
) -> Option<CrossingId> {
    let candidates = world.crossings_by_region.get(&region)?;
    let crossing_id = *rng.choose(candidates);
    let crossing = world.crossing(crossing_id).expect("crossing_id came from crossings_by_region");

    if crossing.is_old && crossing.upgrade_target.is_some() && scheduled_departure >= Calendar::upgrade_date() {
        crossing.upgrade_target
    } else {
        Some(crossing_id)
    }
}
