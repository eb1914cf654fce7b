use chrono::NaiveDateTime;

/// Runtime configuration, loaded from a handful of environment variables.
/// Every field has a hard-coded default; invalid values fall back silently
/// rather than aborting (the only named knobs are these four).
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub output_dir: String,
    pub seed: u64,
    pub t1_rides: usize,
    pub t2_rides: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: "output".to_string(),
            seed: 42,
            t1_rides: 100_000,
            t2_rides: 100_000,
        }
    }
}

impl GeneratorConfig {
    /// Load from `RAILGEN_*` environment variables, falling back to
    /// defaults for anything missing or unparsable.
    pub fn from_env() -> Self {
        let mut config = GeneratorConfig::default();

        if let Ok(dir) = std::env::var("RAILGEN_OUTPUT_DIR") {
            if !dir.is_empty() {
                config.output_dir = dir;
            }
        }

        if let Ok(seed) = std::env::var("RAILGEN_SEED") {
            if let Ok(seed) = seed.parse::<u64>() {
                config.seed = seed;
            }
        }

        if let Ok(t1) = std::env::var("RAILGEN_T1_RIDES") {
            if let Ok(t1) = t1.parse::<i64>() {
                if t1 > 0 {
                    config.t1_rides = t1 as usize;
                }
            }
        }

        // Unlike T1_RIDES, a literal 0 is honored rather than falling back to
        // the default — needed so RAILGEN_T2_RIDES=0 can produce a T2 run
        // with zero rides.
        if let Ok(t2) = std::env::var("RAILGEN_T2_RIDES") {
            if let Ok(t2) = t2.parse::<i64>() {
                if t2 >= 0 {
                    config.t2_rides = t2 as usize;
                }
            }
        }

        config
    }

    /// There is nothing left for this to reject once `from_env` has
    /// already discarded bad input, but it mirrors the shape of the
    /// ambient config-validation step other services in this codebase run
    /// right after load.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.output_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("output_dir cannot be empty"));
        }
        Ok(())
    }
}

/// Fixed calendar boundaries for the two snapshots. Not configurable.
pub struct Calendar;

impl Calendar {
    pub fn t1_start() -> NaiveDateTime {
        parse("2023-01-01 00:00:00")
    }

    pub fn t1_end() -> NaiveDateTime {
        parse("2024-06-30 23:59:59")
    }

    pub fn t2_start() -> NaiveDateTime {
        parse("2024-07-01 00:00:00")
    }

    pub fn t2_end() -> NaiveDateTime {
        parse("2025-10-31 23:59:59")
    }

    pub fn upgrade_date() -> NaiveDateTime {
        parse("2025-02-01 00:00:00")
    }

    pub fn switch_date() -> NaiveDateTime {
        parse("2025-03-01 00:00:00")
    }
}

fn parse(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("fixed calendar constant")
}

pub const T1_BASE_EVENT_RATE: f64 = 0.035;
pub const T2_BASE_EVENT_RATE: f64 = 0.033;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = GeneratorConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.t1_rides, 100_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_env_ignores_non_positive_ride_counts() {
        std::env::set_var("RAILGEN_T1_RIDES", "-5");
        std::env::set_var("RAILGEN_T2_RIDES", "not_a_number");
        let config = GeneratorConfig::from_env();
        assert_eq!(config.t1_rides, 100_000);
        assert_eq!(config.t2_rides, 100_000);
        std::env::remove_var("RAILGEN_T1_RIDES");
        std::env::remove_var("RAILGEN_T2_RIDES");
    }

    #[test]
    fn calendar_windows_are_ordered() {
        assert!(Calendar::t1_start() < Calendar::t1_end());
        assert!(Calendar::t1_end() < Calendar::t2_start());
        assert!(Calendar::upgrade_date() < Calendar::switch_date());
        assert!(Calendar::switch_date() < Calendar::t2_end());
    }
}
