use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use echonet::algo::augment::augment_edges;
use echonet::algo::crossing::{ProtectedEdges, repair_crossings};
use echonet::algo::placement::place_nodes;
use echonet::algo::relax::relax_layout;
use echonet::algo::spanning::{candidate_pairs, connect_spanning_tree};
use echonet::{GeneratorConfig, Graph, XorShift64Star, generate_seeded};
use std::hint::black_box;
use std::time::Duration;

/// Placed, tree-connected and augmented graph, ready for the layout stages.
fn prepared(config: &GeneratorConfig, count: usize, seed: u64) -> Graph {
    let mut rng = XorShift64Star::new(seed);
    let (mut g, _) = place_nodes(config.width, config.height, count, &config.placement, &mut rng);
    let pairs = candidate_pairs(&g);
    connect_spanning_tree(&mut g, &pairs, 3);
    augment_edges(&mut g, &pairs, &config.augment);
    g
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.measurement_time(Duration::from_secs(10));

    let config = GeneratorConfig::default();
    for seed in [1u64, 7, 42] {
        group.bench_with_input(BenchmarkId::new("generate_seeded", seed), &seed, |b, &seed| {
            b.iter(|| {
                let generated = generate_seeded(black_box(&config), seed).unwrap();
                black_box(generated.graph.edge_count());
            })
        });
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");

    let mut config = GeneratorConfig::with_bounds(2400.0, 1600.0);
    config.placement.min_separation = 30.0;
    for count in [35usize, 120, 300] {
        let base = prepared(&config, count, 11);
        group.bench_with_input(BenchmarkId::new("relax_layout", count), &base, |b, base| {
            b.iter_batched(
                || base.clone(),
                |mut g| black_box(relax_layout(&mut g, &config.relax)),
                BatchSize::LargeInput,
            )
        });

        let mut relaxed = base.clone();
        relax_layout(&mut relaxed, &config.relax);
        group.bench_with_input(
            BenchmarkId::new("repair_crossings", count),
            &relaxed,
            |b, relaxed| {
                b.iter_batched(
                    || (relaxed.clone(), XorShift64Star::new(3)),
                    |(mut g, mut rng)| {
                        let mut protected = ProtectedEdges::default();
                        black_box(repair_crossings(
                            &mut g,
                            &config.repair,
                            config.augment.max_degree,
                            &mut protected,
                            &mut rng,
                        ))
                    },
                    BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_stages);
criterion_main!(benches);
