// Pair scoring benchmarks
use addrmatch_core::{AddressNormalizer, FrequencyVector, RuleTagger};
use addrmatch_similarity::{AddressPair, PairScorer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

const ADDRESSES: [&str; 6] = [
    "137-139 Gloucester Terrace Bayswater London W2 6DX",
    "FLAT 9 137-139 GLOUCESTER TERRACE LONDON W2 6DX",
    "10 Downing Street London SW1A 2AA",
    "10 Downing St, Westminster, London SW1A 2AA",
    "Garden Flat 1 X Street",
    "Ground Floor Flat 1 X Street",
];

fn generate_pairs(count: usize) -> Vec<AddressPair> {
    (0..count)
        .map(|i| {
            AddressPair::new(
                ADDRESSES[i % ADDRESSES.len()],
                ADDRESSES[(i * 7 + 1) % ADDRESSES.len()],
            )
        })
        .collect()
}

fn benchmark_normalize(c: &mut Criterion) {
    let normalizer = AddressNormalizer::new(Arc::new(RuleTagger::new()));

    c.bench_function("normalize", |b| {
        b.iter(|| {
            for address in ADDRESSES.iter() {
                black_box(normalizer.normalize_str(address).unwrap());
            }
        });
    });
}

fn benchmark_cosine(c: &mut Criterion) {
    let a = FrequencyVector::from_text("9 137-139 gloucester terrace w2 6dx");
    let b = FrequencyVector::from_text("137-139 gloucester terrace w2 6dx");

    c.bench_function("cosine", |bench| {
        bench.iter(|| black_box(a.cosine_similarity(&b)));
    });
}

fn benchmark_score_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_pairs");
    let scorer = PairScorer::new(Arc::new(RuleTagger::new()));

    for size in [10, 100, 1000].iter() {
        let pairs = generate_pairs(*size);
        group.bench_with_input(BenchmarkId::new("rule_tagger", size), &pairs, |b, pairs| {
            b.iter(|| black_box(scorer.score_pairs(pairs).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_normalize, benchmark_cosine, benchmark_score_pairs);
criterion_main!(benches);
