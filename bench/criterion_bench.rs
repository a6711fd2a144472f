use criterion::*;
use lambdaworks_msm::math::elliptic_curve::short_weierstrass::curves::test_curve_1::TestCurve1;
use lambdaworks_msm::math::elliptic_curve::traits::IsEllipticCurve;
use lambdaworks_msm::{msm, G1Point, MsmMethod};
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const METHODS: [MsmMethod; 4] = [
    MsmMethod::Naive,
    MsmMethod::BosCoster,
    MsmMethod::Pippenger,
    MsmMethod::Auto,
];

fn instance(n: usize) -> (Vec<G1Point>, Vec<BigUint>) {
    let mut rng = StdRng::seed_from_u64(n as u64);
    let bases = (0..n).map(|_| TestCurve1::random_point(&mut rng)).collect();
    let scalars = (0..n)
        .map(|_| {
            let limbs: [u32; 8] = rng.gen();
            BigUint::from_slice(&limbs) >> 1u32
        })
        .collect();
    (bases, scalars)
}

fn bench_msm(c: &mut Criterion) {
    let mut group = c.benchmark_group("msm");
    for n in [16, 128, 1024] {
        let (bases, scalars) = instance(n);
        for method in METHODS {
            group.bench_with_input(
                BenchmarkId::new(format!("{method:?}"), n),
                &(&bases, &scalars),
                |b, (bases, scalars)| b.iter(|| black_box(msm(method, bases, scalars))),
            );
        }
    }
    group.finish();
}

criterion_group!(lambdaworks, bench_msm);
criterion_main!(lambdaworks);
