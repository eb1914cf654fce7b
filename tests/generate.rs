use std::collections::HashSet;
use std::fs;

use chrono::Datelike;
use railgen::config::GeneratorConfig;
use railgen::synthetic::RailwayDataGenerator;

fn run(seed: u64, t1_rides: usize, t2_rides: usize) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig {
        output_dir: dir.path().to_string_lossy().to_string(),
        seed,
        t1_rides,
        t2_rides,
    };
    let mut generator = RailwayDataGenerator::new(&config);
    generator.generate().unwrap();
    dir
}

fn read_csv(path: &std::path::Path) -> Vec<csv::StringRecord> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .unwrap()
        .into_records()
        .map(|r| r.unwrap())
        .collect()
}

#[test]
fn single_t1_ride_leaves_t2_facts_identical_to_t1() {
    let dir = run(42, 1, 0);

    let t1_rides = read_csv(&dir.path().join("T1/Ride.csv"));
    assert_eq!(t1_rides.len(), 1);

    for name in ["Ride.csv", "Ride_Section.csv", "Event_On_Route.csv", "weather.csv"] {
        let t1_bytes = fs::read(dir.path().join("T1").join(name)).unwrap();
        let t2_bytes = fs::read(dir.path().join("T2").join(name)).unwrap();
        assert_eq!(t1_bytes, t2_bytes, "{name} must match byte-for-byte with zero T2 rides added");
    }
}

#[test]
fn t2_dimensions_grow_by_the_documented_ranges() {
    let dir = run(1, 100, 100);

    let t1_crossings = read_csv(&dir.path().join("T1/Crossing.csv")).len();
    let t2_crossings = read_csv(&dir.path().join("T2/Crossing.csv")).len();
    let crossing_growth = t2_crossings - t1_crossings;
    assert!(
        (320..=520).contains(&crossing_growth),
        "crossing growth {crossing_growth} out of range"
    );

    let t1_trains = read_csv(&dir.path().join("T1/Train.csv")).len();
    let t2_trains = read_csv(&dir.path().join("T2/Train.csv")).len();
    let train_growth = t2_trains - t1_trains;
    assert!((32..=58).contains(&train_growth), "train growth {train_growth} out of range");

    let t1_drivers = read_csv(&dir.path().join("T1/Driver.csv")).len();
    let t2_drivers = read_csv(&dir.path().join("T2/Driver.csv")).len();
    let driver_growth = t2_drivers - t1_drivers;
    assert!((250..=400).contains(&driver_growth), "driver growth {driver_growth} out of range");
}

#[test]
fn t2_facts_are_a_strict_prefix_of_t1_facts() {
    let dir = run(7, 50, 50);

    for name in ["Ride.csv", "Ride_Section.csv", "weather.csv"] {
        let t1_bytes = fs::read(dir.path().join("T1").join(name)).unwrap();
        let t2_bytes = fs::read(dir.path().join("T2").join(name)).unwrap();
        assert!(t2_bytes.len() >= t1_bytes.len());
        assert_eq!(&t2_bytes[..t1_bytes.len()], &t1_bytes[..], "{name} prefix mismatch");
    }
}

#[test]
fn ride_sections_are_consecutive_and_span_distinct_stations() {
    let dir = run(3, 30, 0);

    let rides = read_csv(&dir.path().join("T1/Ride.csv"));
    let sections = read_csv(&dir.path().join("T1/Ride_Section.csv"));

    for ride in &rides {
        let ride_id = &ride[0];
        let mut numbers: Vec<u32> = sections
            .iter()
            .filter(|s| &s[1] == ride_id)
            .map(|s| s[2].parse().unwrap())
            .collect();
        numbers.sort();
        let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
        assert_eq!(numbers, expected, "ride {ride_id} has non-consecutive section numbers");
    }

    for section in &sections {
        assert_ne!(&section[3], &section[4], "a section must not depart and arrive at the same station");
    }
}

#[test]
fn driver_employment_year_never_postdates_the_ride() {
    let dir = run(9, 200, 0);

    let drivers = read_csv(&dir.path().join("T1/Driver.csv"));
    let rides = read_csv(&dir.path().join("T1/Ride.csv"));

    let employment_year: std::collections::HashMap<String, i32> = drivers
        .iter()
        .map(|d| (d[0].to_string(), d[5].parse().unwrap()))
        .collect();

    for ride in &rides {
        let departure = chrono::NaiveDateTime::parse_from_str(&ride[3], "%Y-%m-%d %H:%M:%S").unwrap();
        let driver_id = &ride[6];
        let year = employment_year[driver_id];
        assert!(year <= departure.year(), "driver {driver_id} hired after ride departure");
    }
}

#[test]
fn event_outcomes_respect_type_specific_rules() {
    let dir = run(11, 400, 0);

    let events = read_csv(&dir.path().join("T1/Event_On_Route.csv"));
    let event_types = read_csv(&dir.path().join("T1/Event.csv"));
    let kind_by_id: std::collections::HashMap<String, String> =
        event_types.iter().map(|e| (e[0].to_string(), e[1].to_string())).collect();

    let mut saw_any = false;
    for event in &events {
        saw_any = true;
        let kind = &kind_by_id[&event[3]];
        let emergency: u8 = event[8].parse().unwrap();
        let deaths: u32 = event[6].parse().unwrap();
        let speed: f64 = event[10].parse().unwrap();

        assert_eq!(
            emergency == 1,
            matches!(kind.as_str(), "wypadek" | "awaria"),
            "emergency_intervention must match event type {kind}"
        );
        if kind != "wypadek" {
            assert_eq!(deaths, 0, "only wypadek events may report deaths");
        }
        assert!((30.0..=160.0).contains(&speed), "train_speed {speed} out of bounds");
    }
    assert!(saw_any, "400 rides at base rate should produce at least one event");
}

#[test]
fn ids_are_dense_and_start_at_one() {
    let dir = run(5, 10, 0);

    for (file, col) in [("T1/Station.csv", 0), ("T1/Driver.csv", 0), ("T1/Ride.csv", 0)] {
        let rows = read_csv(&dir.path().join(file));
        let mut ids: Vec<u32> = rows.iter().map(|r| r[col].parse().unwrap()).collect();
        ids.sort();
        let unique: HashSet<u32> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len(), "{file} has duplicate ids");
        assert_eq!(ids, (1..=ids.len() as u32).collect::<Vec<_>>(), "{file} ids are not dense starting at 1");
    }
}

#[test]
fn same_seed_produces_byte_identical_output() {
    let dir_a = run(123, 20, 20);
    let dir_b = run(123, 20, 20);

    for snapshot in ["T1", "T2"] {
        for file in ["Ride.csv", "Ride_Section.csv", "Event_On_Route.csv", "weather.csv", "Crossing.csv"] {
            let a = fs::read(dir_a.path().join(snapshot).join(file)).unwrap();
            let b = fs::read(dir_b.path().join(snapshot).join(file)).unwrap();
            assert_eq!(a, b, "{snapshot}/{file} differs between two runs with the same seed");
        }
    }
}
