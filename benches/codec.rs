use cascade::JointArmCodec;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("joint_codec");
    for &(players, radix) in &[(2usize, 3usize), (4, 8), (8, 4)] {
        let codec = JointArmCodec::new(players, radix).unwrap();
        let label = format!("{players}x{radix}");

        group.bench_with_input(BenchmarkId::new("decode", &label), &codec, |b, codec| {
            b.iter(|| {
                for index in (0..codec.size()).step_by(7) {
                    black_box(codec.decode(black_box(index)).unwrap());
                }
            })
        });

        let digits: Vec<Vec<usize>> = (0..codec.size())
            .step_by(7)
            .map(|i| codec.decode(i).unwrap())
            .collect();
        group.bench_with_input(BenchmarkId::new("encode", &label), &digits, |b, digits| {
            b.iter(|| {
                for d in digits {
                    black_box(codec.encode(black_box(d)).unwrap());
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
