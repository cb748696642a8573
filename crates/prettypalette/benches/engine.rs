use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use prettypalette::fit::{fit_with, FitOptions, GradientMethod};
use prettypalette::{
    evaluate_cosine_gradient, generate_harmonious_palette, CosineCoefficients, GenerationOptions,
    HarmonyCategory,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const TARGETS: [&str; 5] = ["#cc6633", "#b88a47", "#8f9c5c", "#5c9c8f", "#476bb8"];

pub fn run_benchmarks(c: &mut Criterion) {
    let rainbow = CosineCoefficients::default();

    let mut group = c.benchmark_group("evaluate");
    group.bench_function("8-stops", |b| b.iter(|| evaluate_cosine_gradient(8, &rainbow)));
    group.bench_function("256-stops", |b| {
        b.iter(|| evaluate_cosine_gradient(256, &rainbow))
    });
    group.finish();

    let mut group = c.benchmark_group("generate");
    let options = GenerationOptions::default();
    for category in [
        HarmonyCategory::Analogous,
        HarmonyCategory::Pastel,
        HarmonyCategory::Earthy,
    ] {
        group.bench_function(category.name(), |b| {
            b.iter_batched(
                || StdRng::seed_from_u64(665),
                |mut rng| generate_harmonious_palette(category, &options, &mut rng),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();

    // Compare the gradient methods for the same number of iterations.
    let mut group = c.benchmark_group("fit");
    group.sample_size(10);
    for (name, method) in [
        ("central-difference", GradientMethod::CentralDifference),
        ("analytic", GradientMethod::Analytic),
    ] {
        let options = FitOptions::builder()
            .max_iterations(500)
            .method(method)
            .build();
        group.bench_function(name, |b| b.iter(|| fit_with(&TARGETS, &options)));
    }
    group.finish();
}

criterion_group!(benches, run_benchmarks);
criterion_main!(benches);
