use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pkgdiff::catalog::Field;
use pkgdiff::diff;
use pkgdiff::engine;
use pkgdiff::lines::tokenize;
use pkgdiff::provider::MemoryProvider;
use pkgdiff::report::UnifiedReporter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::path::Path;

// File-list style text: one path per line, sorted.
fn gen_listing(lines: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::with_capacity(lines * 48);
    for i in 0..lines {
        let dir = rng.random_range(0..64u32);
        let sum: u64 = rng.random();
        out.push_str(&format!("/usr/local/share/d{dir:02}/file{i:06} :: 1${sum:016x}\n"));
    }
    out
}

// Replace roughly one line in `stride` with a fresh one.
fn mutate(base: &str, stride: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::with_capacity(base.len());
    for line in base.lines() {
        if rng.random_range(0..stride.max(1)) == 0 {
            let sum: u64 = rng.random();
            out.push_str(&format!("/usr/local/lib/changed :: 1${sum:016x}\n"));
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

fn bench_tokenize(c: &mut Criterion) {
    let mut g = c.benchmark_group("tokenize");
    for lines in [1_000usize, 10_000, 100_000] {
        let text = gen_listing(lines, 1);
        g.throughput(Throughput::Bytes(text.len() as u64));
        g.bench_with_input(BenchmarkId::from_parameter(lines), &text, |b, text| {
            b.iter(|| black_box(tokenize(black_box(text))));
        });
    }
    g.finish();
}

fn bench_diff_vs_distance(c: &mut Criterion) {
    let mut g = c.benchmark_group("diff_lines_vs_edit_density");
    let base = gen_listing(10_000, 2);
    for stride in [1_000usize, 100, 10] {
        let changed = mutate(&base, stride, stride as u64);
        let left = tokenize(&base);
        let right = tokenize(&changed);
        g.bench_with_input(BenchmarkId::from_parameter(stride), &stride, |b, _| {
            b.iter(|| {
                let script = diff::diff(black_box(&left), black_box(&right)).unwrap();
                black_box(script.distance());
            });
        });
    }
    g.finish();
}

fn bench_diff_identical(c: &mut Criterion) {
    let text = gen_listing(100_000, 3);
    let lines = tokenize(&text);
    c.bench_function("diff_identical_100k_lines", |b| {
        b.iter(|| black_box(diff::diff(black_box(&lines), black_box(&lines)).unwrap()));
    });
}

// Every checksum changes between versions: distance equals N + M.
fn bench_diff_fully_changed(c: &mut Criterion) {
    let mut g = c.benchmark_group("diff_fully_changed_listing");
    g.sample_size(10);
    for lines in [1_000usize, 4_000] {
        let old = gen_listing(lines, 6);
        let new = gen_listing(lines, 7);
        let left = tokenize(&old);
        let right = tokenize(&new);
        g.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, _| {
            b.iter(|| {
                let script = diff::diff(black_box(&left), black_box(&right)).unwrap();
                black_box(script.distance());
            });
        });
    }
    g.finish();
}

fn bench_compare(c: &mut Criterion) {
    let mut g = c.benchmark_group("compare");
    let files = gen_listing(20_000, 4);
    let changed = mutate(&files, 200, 5);
    let provider = MemoryProvider::new()
        .with(
            "old",
            [
                (Field::Name, "curl".to_string()),
                (Field::Version, "8.4.0".to_string()),
                (Field::Files, files.clone()),
            ],
        )
        .with(
            "new",
            [
                (Field::Name, "curl".to_string()),
                (Field::Version, "8.5.0".to_string()),
                (Field::Files, changed),
            ],
        );
    let none = HashSet::new();

    g.bench_function("quiet", |b| {
        b.iter(|| {
            let outcome =
                engine::compare(&provider, Path::new("old"), Path::new("new"), &none, None);
            black_box(outcome.unwrap());
        });
    });

    g.bench_function("detailed", |b| {
        b.iter(|| {
            let mut reporter = UnifiedReporter::new(Vec::with_capacity(64 * 1024));
            let outcome = engine::compare(
                &provider,
                Path::new("old"),
                Path::new("new"),
                &none,
                Some(&mut reporter),
            );
            black_box(outcome.unwrap());
            black_box(reporter.into_inner().len());
        });
    });
    g.finish();
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_diff_vs_distance,
    bench_diff_identical,
    bench_diff_fully_changed,
    bench_compare
);
criterion_main!(benches);
