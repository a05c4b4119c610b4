use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use k2cache::ExprCache;
use tempfile::TempDir;

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("lookup_hit", |b| {
        let dir = TempDir::new().unwrap();
        let cache = ExprCache::open(dir.path()).unwrap();

        // Pre-populate with distinct expressions
        let exprs: Vec<String> = (0..100).map(|i| format!("print {i} + {i};")).collect();
        for (i, expr) in exprs.iter().enumerate() {
            cache.store(expr, (i * 2) as i64).unwrap();
        }

        let mut counter = 0;
        b.iter(|| {
            black_box(cache.lookup(&exprs[counter % 100]));
            counter += 1;
        });
    });

    group.bench_function("lookup_miss", |b| {
        let dir = TempDir::new().unwrap();
        let cache = ExprCache::open(dir.path()).unwrap();

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.lookup(&format!("never stored {counter}")));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("store_overwrite", |b| {
        let dir = TempDir::new().unwrap();
        let cache = ExprCache::open(dir.path()).unwrap();

        b.iter(|| {
            cache.store(black_box("print 3 + 4;"), black_box(7)).unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_lookup, bench_store);
criterion_main!(benches);
