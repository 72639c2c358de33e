//! Shared fixtures for integration tests

#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;
use vitaltrend::{GroupAttribute, Record, RecordStore};

/// Route pass logs to the test output, filtered by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn record(signal: &str, norm_time: f64, value: f64, group: &str) -> Record {
    Record::new(signal, Some(value), norm_time).with_attribute(GroupAttribute::ProcedureType, group)
}

/// Seeded store of "map" and "hr" readings spread over the given groups
pub fn synthetic_store(seed: u64, per_group: usize, groups: &[&str]) -> RecordStore {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(per_group * groups.len() * 2);

    for _ in 0..per_group {
        for (i, group) in groups.iter().enumerate() {
            let t: f64 = rng.gen_range(0.0..=1.0);
            let emop = if rng.gen_bool(0.2) { "1" } else { "0" };
            let map = 75.0 + 5.0 * i as f64 + rng.gen_range(-10.0..10.0);
            let hr = 65.0 + rng.gen_range(-15.0..15.0);
            for (signal, value) in [("map", map), ("hr", hr)] {
                records.push(
                    Record::new(signal, Some(value), t)
                        .with_attribute(GroupAttribute::ProcedureType, *group)
                        .with_attribute(GroupAttribute::EmergencyFlag, emop),
                );
            }
        }
    }

    RecordStore::new(records)
}
