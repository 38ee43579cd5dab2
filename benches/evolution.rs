//! Benchmarks for rendering, scoring and a full generation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use fractal_automata::{
    EvolutionConfig, EvolutionEngine, FractalRng,
    compute::{LocalMeans, evolution::random_table, render, render_parallel},
};

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let mut rng = FractalRng::new(42);
    let table = random_table(8, &mut rng);

    for resolution in [27, 81, 243, 729] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", resolution, resolution)),
            &resolution,
            |b, &resolution| {
                b.iter(|| render(black_box(&table), resolution));
            },
        );
    }

    group.bench_function("parallel_729x729", |b| {
        b.iter(|| render_parallel(black_box(&table), 729));
    });

    group.finish();
}

fn bench_score(c: &mut Criterion) {
    let mut rng = FractalRng::new(7);
    let target = render(&random_table(4, &mut rng), 81);
    let candidate = render(&random_table(4, &mut rng), 81);
    let means = LocalMeans::of(&target);

    c.bench_function("score_81x81", |b| {
        b.iter(|| means.score(black_box(&candidate)));
    });
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    group.sample_size(20);

    for ncolors in [2, 8, 32] {
        let mut rng = FractalRng::new(ncolors as u64);
        let target = render(&random_table(ncolors, &mut rng), 81);
        let config = EvolutionConfig {
            random_seed: Some(1),
            ..Default::default()
        };
        let mut engine = EvolutionEngine::new(config, &target, ncolors).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_colors", ncolors)),
            &ncolors,
            |b, _| {
                b.iter(|| engine.step_generation());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_score, bench_generation);
criterion_main!(benches);
