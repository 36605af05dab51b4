// benches/align_perf.rs
// Criterion benchmarks for exact and adaptive wavefront alignment.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};

use wavefront_align::{AdaptiveReduction, Aligner, Options, Penalties};

fn random_seq(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| b"ACGT"[rng.gen_range(0..4)]).collect()
}

/// Substitutions plus occasional single-base indels.
fn mutate(rng: &mut StdRng, seq: &[u8], rate: f64) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len() + 16);
    for &b in seq {
        if rng.gen_bool(rate) {
            match rng.gen_range(0..3) {
                0 => out.push(b"ACGT"[rng.gen_range(0..4)]),
                1 => {
                    out.push(b"ACGT"[rng.gen_range(0..4)]);
                    out.push(b);
                }
                _ => {}
            }
        } else {
            out.push(b);
        }
    }
    out
}

fn make_pairs(len: usize, rate: f64, count: usize) -> Vec<(Vec<u8>, Vec<u8>)> {
    let mut rng = StdRng::seed_from_u64(0xBADC0FFEE);
    (0..count)
        .map(|_| {
            let q = random_seq(&mut rng, len);
            let t = mutate(&mut rng, &q, rate);
            (q, t)
        })
        .collect()
}

fn bench_global(c: &mut Criterion) {
    let mut group = c.benchmark_group("global");
    for (len, rate) in [(100usize, 0.05), (1000, 0.05), (5000, 0.02)] {
        let pairs = make_pairs(len, rate, 8);
        group.throughput(Throughput::Bytes((len * pairs.len()) as u64));

        group.bench_function(format!("exact/{}bp", len), |b| {
            let mut aligner = Aligner::new(Penalties::default(), Options::default());
            b.iter(|| {
                for (q, t) in &pairs {
                    black_box(aligner.align(q, t).unwrap().score);
                }
            });
        });

        group.bench_function(format!("adaptive/{}bp", len), |b| {
            let mut aligner = Aligner::new(Penalties::default(), Options::default());
            aligner.set_adaptive(AdaptiveReduction::default()).unwrap();
            b.iter(|| {
                for (q, t) in &pairs {
                    black_box(aligner.align(q, t).unwrap().score);
                }
            });
        });
    }
    group.finish();
}

fn bench_semi_global(c: &mut Criterion) {
    let mut group = c.benchmark_group("semi_global");
    let mut rng = StdRng::seed_from_u64(0xFEEDFACE);
    let q = random_seq(&mut rng, 500);
    let mut t = random_seq(&mut rng, 1000);
    t.extend_from_slice(&mutate(&mut rng, &q, 0.05));
    t.extend_from_slice(&random_seq(&mut rng, 1000));

    group.throughput(Throughput::Bytes(t.len() as u64));
    group.bench_function("embedded/500bp_in_2500bp", |b| {
        let mut aligner = Aligner::new(
            Penalties::default(),
            Options {
                global_alignment: false,
            },
        );
        aligner.set_adaptive(AdaptiveReduction::default()).unwrap();
        b.iter(|| {
            black_box(aligner.align(&q, &t).unwrap().score);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_global, bench_semi_global);
criterion_main!(benches);
