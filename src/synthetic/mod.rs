//! The generator engine: build T1 dimensions, emit T1 facts, evolve
//! dimensions for T2, emit T2 facts as a superset of T1's (§2 control flow).

pub mod crossing_selector;
pub mod delay_model;
pub mod dimension_builder;
pub mod dimension_evolver;
pub mod event_sampler;
pub mod snapshot_writer;
pub mod weather_sampler;
pub mod world;

use std::path::PathBuf;

use crate::config::{Calendar, GeneratorConfig, T1_BASE_EVENT_RATE, T2_BASE_EVENT_RATE};
use crate::error::Result;
use crate::rng::RngSubstrate;

use snapshot_writer::{FactCounters, SnapshotConfig};

/// Resolves `RAILGEN_OUTPUT_DIR` against the running executable's own
/// directory when it's relative, mirroring the original generator's
/// `Path(__file__).resolve().parent / output_path` (§6, §9). Falls back to
/// the bare relative path if the executable's location can't be determined.
fn resolve_output_root(output_dir: &str) -> PathBuf {
    let path = PathBuf::from(output_dir);
    if path.is_absolute() {
        return path;
    }
    match std::env::current_exe() {
        Ok(exe) => match exe.parent() {
            Some(dir) => dir.join(path),
            None => path,
        },
        Err(_) => path,
    }
}

pub struct RailwayDataGenerator {
    output_root: PathBuf,
    rng: RngSubstrate,
    t1_rides: usize,
    t2_rides: usize,
}

impl RailwayDataGenerator {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            output_root: resolve_output_root(&config.output_dir),
            rng: RngSubstrate::seeded(config.seed),
            t1_rides: config.t1_rides,
            t2_rides: config.t2_rides,
        }
    }

    pub fn generate(&mut self) -> Result<()> {
        let t1_dir = self.output_root.join("T1");
        let t2_dir = self.output_root.join("T2");
        self.prepare_output_dirs(&t1_dir, &t2_dir)?;

        tracing::info!("building T1 dimensions");
        let mut world = dimension_builder::build_t1(&mut self.rng)?;
        tracing::info!(
            stations = world.stations.len(),
            crossings = world.crossings.len(),
            trains = world.trains.len(),
            drivers = world.drivers.len(),
            routes = world.routes.len(),
            "T1 dimensions built"
        );

        snapshot_writer::write_dimension_csvs(&world, &t1_dir)?;

        let mut counters = FactCounters::new();
        let switch_date = Calendar::switch_date();

        tracing::info!(rides = self.t1_rides, "generating T1 facts");
        snapshot_writer::generate_facts(
            &mut self.rng,
            &world,
            &mut counters,
            &SnapshotConfig {
                name: "T1",
                start: Calendar::t1_start(),
                end: Calendar::t1_end(),
                ride_count: self.t1_rides,
                base_event_rate: T1_BASE_EVENT_RATE,
            },
            switch_date,
            &t1_dir,
            false,
        )?;

        tracing::info!("evolving dimensions for T2");
        dimension_evolver::evolve_for_t2(&mut self.rng, &mut world);
        tracing::info!(
            crossings = world.crossings.len(),
            trains = world.trains.len(),
            drivers = world.drivers.len(),
            "T2 dimensions evolved"
        );

        snapshot_writer::write_dimension_csvs(&world, &t2_dir)?;

        tracing::info!("copying T1 facts forward into T2");
        snapshot_writer::copy_t1_facts_to_t2(&t1_dir, &t2_dir)?;

        tracing::info!(rides = self.t2_rides, "generating T2 facts");
        snapshot_writer::generate_facts(
            &mut self.rng,
            &world,
            &mut counters,
            &SnapshotConfig {
                name: "T2",
                start: Calendar::t2_start(),
                end: Calendar::t2_end(),
                ride_count: self.t2_rides,
                base_event_rate: T2_BASE_EVENT_RATE,
            },
            switch_date,
            &t2_dir,
            true,
        )?;

        tracing::info!("generation complete");
        Ok(())
    }

    fn prepare_output_dirs(&self, t1_dir: &std::path::Path, t2_dir: &std::path::Path) -> Result<()> {
        for dir in [t1_dir, t2_dir] {
            std::fs::create_dir_all(dir).map_err(|source| crate::error::GenError::Io {
                path: dir.display().to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_output_root_leaves_absolute_paths_untouched() {
        let abs = PathBuf::from("/tmp/railgen-out");
        assert_eq!(resolve_output_root("/tmp/railgen-out"), abs);
    }

    #[test]
    fn resolve_output_root_anchors_relative_paths_to_the_executable_dir() {
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(resolve_output_root("output"), exe_dir.join("output"));
    }
}
