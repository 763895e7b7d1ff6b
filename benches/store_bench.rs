//! Benchmarks for oidstore operations

use criterion::{criterion_group, criterion_main, Criterion};
use oidstore::{Config, Store};
use tempfile::TempDir;

fn setup_store() -> (TempDir, Store) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("db");
    Store::initialize(&path, &Config::default()).unwrap();
    let store = Store::open(&path).unwrap();
    store.create_cluster("bench").unwrap();
    (temp, store)
}

fn store_benchmarks(c: &mut Criterion) {
    let payload = vec![0xABu8; 1024];

    c.bench_function("store_object_1kb", |b| {
        let (_temp, store) = setup_store();
        b.iter(|| store.store_object("bench", &payload).unwrap());
    });

    c.bench_function("get_object_1kb", |b| {
        let (_temp, store) = setup_store();
        let oid = store.store_object("bench", &payload).unwrap();
        b.iter(|| store.get_object("bench", oid).unwrap());
    });

    c.bench_function("cluster_exists", |b| {
        let (_temp, store) = setup_store();
        b.iter(|| store.cluster_exists("bench"));
    });
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
