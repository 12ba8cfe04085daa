//! Criterion benchmarks for textcluster.
//!
//! Covers the CPU-bound stages of the pipeline:
//! - Text normalization (Porter stemming)
//! - Vocabulary and matrix construction
//! - K-means, sequential and parallel assignment
//! - The full pipeline

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use textcluster::analysis::PipelineAnalyzer;
use textcluster::analysis::normalizer::TextNormalizer;
use textcluster::clustering::{KMeans, KMeansConfig};
use textcluster::document::{Dataset, Document};
use textcluster::pipeline::{ClusteringPipeline, PipelineConfig};
use textcluster::vectorizer::build_vocabulary_and_matrix;

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let words = [
        "search", "engines", "running", "indexed", "queries", "documents", "fields", "terms",
        "phrases", "vectors", "similarity", "relevance", "scoring", "analysis", "tokenization",
        "stemming", "normalization", "clustering", "machines", "learning", "algorithms", "data",
        "structures", "performance", "optimization", "memory", "storage", "retrieval", "ranking",
        "filtering", "gardens", "tomatoes",
    ];

    (0..count)
        .map(|i| {
            let doc_length = 10 + (i % 40);
            (0..doc_length)
                .map(|j| words[(i * 7 + j * 13) % words.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");
    let normalizer = TextNormalizer::new();
    let texts = generate_test_documents(100);

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("normalize_batch", |b| {
        b.iter(|| {
            for text in &texts {
                let _ = black_box(normalizer.normalize(black_box(text)));
            }
        })
    });

    group.finish();
}

fn bench_vectorization(c: &mut Criterion) {
    let mut group = c.benchmark_group("vectorization");
    let analyzer = PipelineAnalyzer::terms(Default::default(), 2, &Default::default());

    for count in [100, 1000] {
        let texts = generate_test_documents(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &texts, |b, texts| {
            b.iter(|| black_box(build_vocabulary_and_matrix(black_box(texts), &analyzer)))
        });
    }

    group.finish();
}

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans");
    group.sample_size(20);

    let analyzer = PipelineAnalyzer::terms(Default::default(), 2, &Default::default());
    let texts = generate_test_documents(2000);
    let Ok((_, matrix)) = build_vocabulary_and_matrix(&texts, &analyzer) else {
        return;
    };

    for (name, threshold) in [("sequential", usize::MAX), ("parallel", 0)] {
        let config = KMeansConfig::new(8).with_seed(42).with_parallel_threshold(threshold);
        let kmeans = KMeans::new(config);
        group.bench_function(name, |b| b.iter(|| black_box(kmeans.fit(black_box(&matrix)))));
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(20);

    let docs = generate_test_documents(500)
        .into_iter()
        .map(|text| Document::builder().add_text("text", text).build())
        .collect();
    let dataset = Dataset::new(vec!["text".into()], docs);
    let Ok(pipeline) = ClusteringPipeline::new(PipelineConfig::new("text", 5).with_seed(Some(1)))
    else {
        return;
    };

    group.throughput(Throughput::Elements(dataset.len() as u64));
    group.bench_function("cluster_500_rows", |b| b.iter(|| black_box(pipeline.run(black_box(&dataset)))));

    group.finish();
}

criterion_group!(
    benches,
    bench_normalization,
    bench_vectorization,
    bench_kmeans,
    bench_pipeline
);
criterion_main!(benches);
