//! Text pipeline benchmarks
//!
//! Measures the CPU-side work around a classifier call: normalization,
//! aspect extraction, and aspect composition with the lexicon backend.
//!
//! Run with: cargo bench -p sentiscope-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use tokio::runtime::Runtime;

use sentiscope_classifiers::{
    AspectComposer, AspectVocabulary, ClassificationAdapter, LabelMap, LexiconClassifier,
};
use sentiscope_core::text::normalize;

const REVIEWS: [(&str, &str); 3] = [
    ("short", "Great food!!!"),
    (
        "medium",
        "The food was great but the service was slow... Check https://example.com for the menu.",
    ),
    (
        "long",
        "We came for the ambiance and stayed for the menu. The staff were friendly and the \
         food was delicious. The price was a bit high for the quality, and delivery took \
         forever. Packaging was broken. Customer service never answered!!! Overall the \
         experience was good, but the value is poor.",
    ),
];

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Normalize");

    for (name, text) in REVIEWS {
        group.bench_with_input(BenchmarkId::new("normalize", name), &text, |b, text| {
            b.iter(|| normalize(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_extract(c: &mut Criterion) {
    let vocabulary = AspectVocabulary::default();
    let mut group = c.benchmark_group("Aspect_Extraction");

    for (name, text) in REVIEWS {
        group.bench_with_input(BenchmarkId::new("extract", name), &text, |b, text| {
            b.iter(|| vocabulary.extract(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_compose(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let classifier = Arc::new(LexiconClassifier::sentiment().expect("Failed to build lexicon"));
    let adapter = ClassificationAdapter::with_classifier("sentiment", classifier, LabelMap::sentiment());
    let composer = AspectComposer::new(Arc::new(adapter), AspectVocabulary::default(), 5000);

    let mut group = c.benchmark_group("Aspect_Composition");
    group.sample_size(50);

    for (name, text) in REVIEWS {
        group.bench_with_input(BenchmarkId::new("compose", name), &text, |b, text| {
            b.iter(|| rt.block_on(async { composer.compose(black_box(text)).await.unwrap() }))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_normalize,
    benchmark_extract,
    benchmark_compose
);
criterion_main!(benches);
