use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use vitaltrend::prelude::*;

const GROUPS: [&str; 6] = ["Vascular", "Colorectal", "Ortho", "Urology", "Gynae", "Hepatobiliary"];

/// Generate a store of "map" readings spread over all groups
fn generate_store(size: usize, seed: u64) -> RecordStore {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..size)
        .map(|i| {
            let group = GROUPS[i % GROUPS.len()];
            let value = if rng.gen_bool(0.02) { None } else { Some(rng.gen_range(50.0..120.0)) };
            Record::new("map", value, rng.gen_range(0.0..=1.0)).with_attribute(GroupAttribute::ProcedureType, group)
        })
        .collect()
}

fn bench_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let selection = SelectionState::new("map", GroupAttribute::ProcedureType);

    for &size in &[1_000, 10_000, 100_000] {
        let store = generate_store(size, 42);

        for (name, policy) in [
            ("fixed_width", BinningPolicy::fixed_width(0.01).unwrap()),
            ("fixed_count", BinningPolicy::fixed_count(100).unwrap()),
        ] {
            let aggregator = Aggregator::new(AggregationConfig::new(policy, SpreadNormalization::Sample)).unwrap();
            group.bench_with_input(BenchmarkId::new(name, size), &store, |b, store| {
                b.iter(|| aggregator.aggregate(black_box(store), &selection))
            });
        }
    }

    group.finish();
}

fn bench_toggle(c: &mut Criterion) {
    let store = generate_store(50_000, 7);
    let selection = SelectionState::new("map", GroupAttribute::ProcedureType);
    let mut view = TrendView::new(store, Aggregator::default(), selection).unwrap();

    c.bench_function("toggle_group", |b| {
        b.iter(|| {
            view.toggle_group(black_box("Ortho")).unwrap();
        })
    });
}

criterion_group!(benches, bench_policies, bench_toggle);
criterion_main!(benches);
