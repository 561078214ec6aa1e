use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use itertools::Itertools;
use rand::prelude::SmallRng;
use rand::{Rng, SeedableRng};

use bleu::bounds::compute_bounds;
use bleu::bounds::lp::DenseSimplex;
use bleu::entities::Instance;
use bleu::io::ext_repr::ExtInstance;
use bleu::prep::preprocess;
use bleu::solver::Bleu;
use bleu::util::BleuConfig;

criterion_main!(benches);
criterion_group!(benches, minimize_bench, bounds_bench);

const ASSETS: [&str; 3] = [
    "../assets/three_items.json",
    "../assets/four_squares.json",
    "../assets/mixed.json",
];

const N_RANDOM_INSTANCES: usize = 10;

fn read_instance(path: &str) -> Instance {
    let file = File::open(Path::new(path)).unwrap();
    let ext_instance: ExtInstance = serde_json::from_reader(BufReader::new(file)).unwrap();
    bleu::io::import(&ext_instance).unwrap()
}

fn random_instances(n_items: usize, strip_width: usize) -> Vec<Instance> {
    let mut rng = SmallRng::seed_from_u64(0);
    (0..N_RANDOM_INSTANCES)
        .map(|_| {
            let dims = (0..n_items)
                .map(|_| {
                    (
                        rng.random_range(1..=strip_width / 2),
                        rng.random_range(1..=strip_width / 2),
                    )
                })
                .collect_vec();
            Instance::from_dims(strip_width, dims).unwrap()
        })
        .collect()
}

/// Searches the minimum height of small instances, from the lower bound upwards
fn minimize_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize_bench");
    for path in ASSETS {
        let instance = read_instance(path);
        group.bench_function(BenchmarkId::new("asset", path), |b| {
            b.iter(|| Bleu::new(instance.clone(), BleuConfig::default()).minimize())
        });
    }
    for n_items in [6, 8, 10] {
        let instances = random_instances(n_items, 12);
        group.bench_function(BenchmarkId::new("random", n_items), |b| {
            b.iter(|| {
                instances
                    .iter()
                    .map(|i| Bleu::new(i.clone(), BleuConfig::default()).minimize().n_evaluations)
                    .sum::<usize>()
            })
        });
    }
    group.finish();
}

/// Computes the full lower bound suite, LP-based bounds included
fn bounds_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounds_bench");
    let solver = DenseSimplex::default();
    for n_items in [10, 20] {
        let preprocessed = random_instances(n_items, 20).iter().map(preprocess).collect_vec();
        group.bench_function(BenchmarkId::from_parameter(n_items), |b| {
            b.iter(|| {
                preprocessed
                    .iter()
                    .map(|p| compute_bounds(p, &BleuConfig::default(), Some(&solver)).best())
                    .sum::<usize>()
            })
        });
    }
    group.finish();
}
