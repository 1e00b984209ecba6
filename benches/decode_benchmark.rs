use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hmmtag::{AccuracyEvaluator, Dataset, DecodeOptions, HmmTagger, Tagger};

mod common;

fn predict(tagger: &HmmTagger, dataset: &Dataset) {
    for seq in &dataset.seqs {
        // sequences the model cannot explain are part of the workload
        black_box(tagger.tag(&seq.words)).ok();
    }
}

fn decode_benchmark(c: &mut Criterion) {
    let tagger = HmmTagger::train(&common::corpus(2000, 20, 7), &DecodeOptions::default())
        .expect("failed to train");
    let dataset = Dataset::from(common::corpus(200, 30, 11));
    c.bench_function("decode", |b| {
        b.iter(|| predict(black_box(&tagger), black_box(&dataset)))
    });

    let (xs, ys) = dataset.split_xy();
    let evaluator = AccuracyEvaluator::new(&tagger);
    c.bench_function("evaluate", |b| {
        b.iter(|| evaluator.evaluate(black_box(&xs), black_box(&ys)).expect("failed to evaluate"))
    });
}

criterion_group!(benchmarks, decode_benchmark);
criterion_main!(benchmarks);
