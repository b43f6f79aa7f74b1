use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ringstore::CircularStore;

fn bench_write_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_read");

    for size in [16, 256, 4096].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("presized", size), size, |b, &size| {
            let mut store = CircularStore::new_unbounded(size + 1);
            b.iter(|| {
                for i in 0..size {
                    store.write(black_box(i));
                }
                while let Ok(v) = store.read() {
                    black_box(v);
                }
            });
        });
    }
    group.finish();
}

fn bench_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth");

    for size in [256, 4096, 65536].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("from_floor", size), size, |b, &size| {
            b.iter(|| {
                let mut store = CircularStore::new_unbounded(2);
                for i in 0..size {
                    store.write(i);
                }
                black_box(store.capacity())
            });
        });
    }
    group.finish();
}

fn bench_bounded(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded");
    let size = 4096;
    group.throughput(Throughput::Elements(size as u64));

    group.bench_function("overwrite", |b| {
        let mut store = CircularStore::new_fixed(128);
        b.iter(|| {
            for i in 0..size {
                black_box(store.overwrite(i));
            }
        });
    });

    group.bench_function("write_discarding", |b| {
        let mut store = CircularStore::new_fixed(128);
        store.set_on_discard(|v: usize| {
            black_box(v);
        });
        b.iter(|| {
            for i in 0..size {
                store.write(i);
            }
        });
    });
    group.finish();
}

fn bench_peek(c: &mut Criterion) {
    let mut group = c.benchmark_group("peek");

    for size in [128, 4096].iter() {
        let mut store = CircularStore::new_unbounded(*size);
        // leave the contents wrapped around the end of the storage
        for i in 0..size / 2 {
            store.write(i);
            let _ = store.read();
        }
        for i in 0..size - 1 {
            store.write(i);
        }

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("peek_all", size), &store, |b, store| {
            b.iter(|| black_box(store.peek_all()));
        });
        group.bench_with_input(BenchmarkId::new("peek_last_n", size), &store, |b, store| {
            b.iter(|| black_box(store.peek_last_n(16)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_write_read, bench_growth, bench_bounded, bench_peek);
criterion_main!(benches);
