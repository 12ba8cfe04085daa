use std::collections::BTreeSet;

use textcluster::analysis::normalizer::TextNormalizer;
use textcluster::analysis::token_filter::stop::StopFilter;
use textcluster::analysis::{Analyzer, PipelineAnalyzer};
use textcluster::document::{Dataset, Document, FieldValue};
use textcluster::error::Result;
use textcluster::pipeline::{ClusteringPipeline, PipelineConfig, cluster};
use textcluster::prelude::{KeywordRanker, Vocabulary, build_vocabulary_and_matrix, cluster_matrix};

fn text_dataset(texts: &[&str]) -> Dataset {
    let docs = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            Document::builder()
                .add_integer("id", i as i64 + 1)
                .add_text("text", *text)
                .build()
        })
        .collect();
    Dataset::new(vec!["id".into(), "text".into()], docs)
}

fn two_topics() -> Dataset {
    text_dataset(&[
        "Rust compiler borrow",
        "garden tomato soil",
        "borrow rust compiler",
        "soil gardens tomatoes",
        "compiler borrows Rust",
        "tomato garden soil",
    ])
}

#[test]
fn two_topics_split_along_vocabulary() -> Result<()> {
    for seed in 0..10 {
        let report = cluster(&two_topics(), "text", 2, 10, Some(seed))?;
        let labels = report.labels();

        assert_eq!(labels[0], labels[2]);
        assert_eq!(labels[2], labels[4]);
        assert_eq!(labels[1], labels[3]);
        assert_eq!(labels[3], labels[5]);
        assert_ne!(labels[0], labels[1]);

        let rust_cluster = labels[0];
        let keywords = report.keywords(rust_cluster).unwrap();
        assert_eq!(&keywords[..3], &["borrow", "compil", "rust"]);
        assert_eq!(report.size(rust_cluster), Some(3));
    }
    Ok(())
}

#[test]
fn every_label_is_present_for_every_k() -> Result<()> {
    let dataset = two_topics();
    for k in 1..=dataset.len() {
        let report = cluster(&dataset, "text", k, 10, Some(7))?;
        let labels: BTreeSet<usize> = report.labels().into_iter().collect();

        assert_eq!(labels, (0..k).collect());
        assert_eq!(report.sizes_by_cluster.len(), k);
        assert!(report.sizes_by_cluster.iter().all(|s| s.size > 0));
        assert_eq!(report.keywords_by_cluster.len(), k);
    }
    Ok(())
}

#[test]
fn k_equal_to_document_count_gives_singletons() -> Result<()> {
    let dataset = text_dataset(&["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"]);
    let report = cluster(&dataset, "text", 6, 10, Some(1))?;

    let labels: BTreeSet<usize> = report.labels().into_iter().collect();
    assert_eq!(labels.len(), 6);
    assert!(report.sizes_by_cluster.iter().all(|s| s.size == 1));
    Ok(())
}

#[test]
fn single_cluster_centroid_is_corpus_average() -> Result<()> {
    let normalizer = TextNormalizer::new();
    let texts = ["rust rust code", "garden code", "tomato"];
    let normalized = texts
        .iter()
        .map(|t| normalizer.normalize(t))
        .collect::<Result<Vec<_>>>()?;

    let analyzer = PipelineAnalyzer::terms(Default::default(), 2, &Default::default());
    let (vocabulary, matrix) = build_vocabulary_and_matrix(&normalized, &analyzer)?;
    let (labels, centroids) = cluster_matrix(&matrix, 1, Some(5))?;

    assert!(labels.iter().all(|label| label == 0));
    let code = vocabulary.index_of("code").unwrap();
    let rust = vocabulary.index_of("rust").unwrap();
    let centroid = centroids.get(0).unwrap();
    assert!((centroid[code] - 2.0 / 3.0).abs() < 1e-12);
    assert!((centroid[rust] - 2.0 / 3.0).abs() < 1e-12);
    Ok(())
}

#[test]
fn same_seed_gives_identical_results() -> Result<()> {
    let dataset = text_dataset(&[
        "market stocks fell sharply",
        "stocks rallied in the market",
        "violin concerto performance",
        "piano and violin recital",
        "market traders sold stocks",
        "orchestra piano concerto",
        "bond market yields",
    ]);

    let first = cluster(&dataset, "text", 3, 5, Some(2024))?;
    let second = cluster(&dataset, "text", 3, 5, Some(2024))?;

    assert_eq!(first.labels(), second.labels());
    assert_eq!(first.keywords_by_cluster, second.keywords_by_cluster);
    assert_eq!(first.sizes_by_cluster, second.sizes_by_cluster);
    assert_eq!(first.inertia, second.inertia);
    Ok(())
}

#[test]
fn seeded_reports_serialize_identically() -> Result<()> {
    let first = cluster(&two_topics(), "text", 3, 10, Some(17))?;
    let second = cluster(&two_topics(), "text", 3, 10, Some(17))?;

    assert_eq!(serde_json::to_string(&first)?, serde_json::to_string(&second)?);
    Ok(())
}

#[test]
fn report_preserves_rows_and_values() -> Result<()> {
    let docs = vec![
        Document::builder().add_text("text", "rust compiler").add_float("score", 0.5).build(),
        Document::builder().add_float("score", 1.5).build(),
        Document::builder().add_text("text", "garden soil").add_boolean("flag", true).build(),
    ];
    let dataset = Dataset::new(vec!["score".into(), "text".into(), "flag".into()], docs);

    let report = cluster(&dataset, "text", 2, 10, Some(3))?;

    assert_eq!(report.output_columns(), vec!["score", "text", "flag", "cluster_num"]);
    let rows: Vec<usize> = report.assignments.iter().map(|a| a.row).collect();
    assert_eq!(rows, vec![0, 1, 2]);
    assert_eq!(
        report.assignments[0].values,
        vec![
            Some(FieldValue::Float(0.5)),
            Some(FieldValue::Text("rust compiler".into())),
            None
        ]
    );
    assert_eq!(report.assignments[1].values, vec![Some(FieldValue::Float(1.5)), None, None]);
    assert_eq!(report.assignments[2].values[2], Some(FieldValue::Boolean(true)));
    Ok(())
}

#[test]
fn keyword_ranker_breaks_ties_by_vocabulary_order() {
    let vocabulary = Vocabulary::from_terms(["a", "b", "c", "d"]);
    let top = KeywordRanker::new(2).rank(&[5.0, 3.0, 3.0, 1.0], &vocabulary);
    assert_eq!(top, vec!["a", "b"]);
}

#[test]
fn vocabulary_has_no_stop_words_and_matrix_matches() -> Result<()> {
    let pipeline = ClusteringPipeline::new(PipelineConfig::new("text", 2))?;
    let dataset = text_dataset(&["The cat and the hat", "which of these is it", "a cat sat"]);

    let (vocabulary, matrix) = pipeline.vectorize(&dataset)?;
    let stop = StopFilter::new();

    assert!(vocabulary.iter().all(|term| !stop.is_stop_word(term)));
    assert_eq!(matrix.shape(), (dataset.len(), vocabulary.len()));
    assert!(matrix.row(1).is_empty());
    Ok(())
}

#[test]
fn normalizer_is_idempotent_and_keeps_empty_input() -> Result<()> {
    let normalizer = TextNormalizer::new();
    for text in ["Generalizations of relational operators", "  hopping\tfiling  ", "NULL"] {
        let once = normalizer.normalize(text)?;
        assert_eq!(normalizer.normalize(&once)?, once);
    }
    assert_eq!(normalizer.normalize("")?, "");
    assert_eq!(normalizer.normalize_opt(None)?, None);
    Ok(())
}

#[test]
fn analyzer_terms_are_lowercase() -> Result<()> {
    let analyzer = PipelineAnalyzer::terms(Default::default(), 2, &Default::default());
    let terms: Vec<String> = analyzer.analyze("Rust RUSTACEANS")?.map(|t| t.text).collect();
    assert_eq!(terms, vec!["rust", "rustaceans"]);
    Ok(())
}
