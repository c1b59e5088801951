//! Capacity pipeline and damage resolution throughput

use arc_anatomy::anatomy::Body;
use arc_anatomy::capacity::Influences;
use arc_anatomy::damage::{DamageInfo, DamageType};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_capacities(c: &mut Criterion) {
    let mut body = Body::human();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for _ in 0..5 {
        body.apply_damage(&DamageInfo::new(1.5, DamageType::Sharp), &mut rng);
    }

    c.bench_function("capacities_wounded_human", |b| {
        b.iter(|| black_box(&body).capacities(&Influences::none()))
    });

    c.bench_function("abilities_wounded_human", |b| {
        b.iter(|| black_box(&body).abilities(&Influences::none()))
    });
}

fn bench_damage(c: &mut Criterion) {
    let info = DamageInfo::new(3.0, DamageType::Pierce);
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    c.bench_function("apply_damage_random", |b| {
        b.iter_batched(
            Body::human,
            |mut body| body.apply_damage(black_box(&info), &mut rng),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_capacities, bench_damage);
criterion_main!(benches);
