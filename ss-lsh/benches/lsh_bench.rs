use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ss_core::ids::TenantId;
use ss_lsh::{hash_vector, PlaneSet};

fn hash_vector_benchmark(c: &mut Criterion) {
    let tenant: TenantId = "bench-tenant".into();
    let planes = PlaneSet::generate(&tenant, 20, 16, 384).unwrap();
    let v: Vec<f64> = (0..384).map(|i| (i as f64).sin()).collect();

    c.bench_function("hash_vector T=20 B=16 D=384", |b| {
        b.iter(|| hash_vector(black_box(&planes), black_box(&v)).unwrap())
    });
}

criterion_group!(benches, hash_vector_benchmark);
criterion_main!(benches);
