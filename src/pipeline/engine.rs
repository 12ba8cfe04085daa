//! The clustering pipeline.

use std::sync::Arc;

use log::{debug, info};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::normalizer::TextNormalizer;
use crate::clustering::KMeans;
use crate::document::Dataset;
use crate::error::{Result, TextClusterError};
use crate::pipeline::config::PipelineConfig;
use crate::report::{ClusterReport, KeywordRanker, ReportAssembler};
use crate::vectorizer::{SparseMatrix, Vocabulary, build_vocabulary_and_matrix};

/// Runs normalization, vectorization, k-means and report assembly over a
/// dataset.
///
/// A pipeline holds no per-run state, so one instance can serve any number
/// of datasets, from any number of threads.
#[derive(Clone)]
pub struct ClusteringPipeline {
    config: PipelineConfig,
    normalizer: TextNormalizer,
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for ClusteringPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusteringPipeline")
            .field("config", &self.config)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl ClusteringPipeline {
    /// Create a pipeline. Fails with a config error on invalid settings.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = PipelineAnalyzer::terms(
            config.tokenizer,
            config.min_token_length,
            &config.stop_words,
        );

        Ok(ClusteringPipeline {
            config,
            normalizer: TextNormalizer::new(),
            analyzer: Arc::new(analyzer),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Cluster the dataset and build the report.
    ///
    /// Request errors are reported before any computation: an unknown text
    /// column or an out-of-range cluster count is a config error, an empty
    /// dataset or a corpus without usable terms is a data error.
    pub fn run(&self, dataset: &Dataset) -> Result<ClusterReport> {
        let (vocabulary, matrix) = self.vectorize(dataset)?;

        let fit = KMeans::new(self.config.kmeans_config()).fit(&matrix)?;

        let keywords = KeywordRanker::new(self.config.top_k_keywords).rank_all(&fit.centroids, &vocabulary);

        let fill = self
            .config
            .fill_missing_in_output
            .then(|| self.config.missing_sentinel.clone());
        let report = ReportAssembler::new().with_missing_fill(fill).assemble(
            dataset,
            &fit.labels,
            keywords,
            fit.inertia,
            fit.iterations,
        )?;

        info!(
            "clustered {} documents into {} clusters over {} terms (inertia {:.4}, {} iterations)",
            dataset.len(),
            report.cluster_count(),
            vocabulary.len(),
            fit.inertia,
            fit.iterations
        );

        Ok(report)
    }

    /// Normalize the text column and build the vocabulary and count matrix.
    pub fn vectorize(&self, dataset: &Dataset) -> Result<(Vocabulary, SparseMatrix)> {
        self.check_request(dataset)?;
        let texts = self.normalized_texts(dataset)?;
        build_vocabulary_and_matrix(&texts, self.analyzer.as_ref())
    }

    /// Normalized text of every row; missing and null values become the
    /// sentinel before normalization.
    pub fn normalized_texts(&self, dataset: &Dataset) -> Result<Vec<String>> {
        let field = &self.config.text_field;
        let texts = dataset
            .documents()
            .iter()
            .map(|doc| {
                let raw = doc
                    .get_field(field)
                    .and_then(|value| value.to_text())
                    .unwrap_or_else(|| self.config.missing_sentinel.as_str().into());
                self.normalizer.normalize(&raw)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("normalized {} values of column '{field}'", texts.len());
        Ok(texts)
    }

    fn check_request(&self, dataset: &Dataset) -> Result<()> {
        self.config.validate()?;

        if !dataset.has_column(&self.config.text_field) {
            return Err(TextClusterError::config(format!(
                "text field '{}' is not a column of the dataset (columns: {})",
                self.config.text_field,
                dataset.columns().join(", ")
            )));
        }
        if dataset.is_empty() {
            return Err(TextClusterError::data("document set is empty"));
        }

        self.config.kmeans_config().validate(dataset.len())
    }
}

/// Cluster `documents` by their `text_field` into `cluster_count` groups.
///
/// Uses the default configuration for everything else.
pub fn cluster(
    documents: &Dataset,
    text_field: &str,
    cluster_count: usize,
    top_k_keywords: usize,
    seed: Option<u64>,
) -> Result<ClusterReport> {
    let config = PipelineConfig::new(text_field, cluster_count)
        .with_top_k_keywords(top_k_keywords)
        .with_seed(seed);
    ClusteringPipeline::new(config)?.run(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, FieldValue};

    fn dataset(texts: &[Option<&str>]) -> Dataset {
        let docs = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let builder = Document::builder().add_integer("id", i as i64);
                match text {
                    Some(t) => builder.add_text("text", *t).build(),
                    None => builder.build(),
                }
            })
            .collect();
        Dataset::new(vec!["id".into(), "text".into()], docs)
    }

    #[test]
    fn test_unknown_text_field() {
        let err = cluster(&dataset(&[Some("a b")]), "body", 1, 10, None).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("'body'"));
    }

    #[test]
    fn test_empty_dataset() {
        let err = cluster(&dataset(&[]), "text", 1, 10, None).unwrap_err();
        assert!(err.is_data());
        assert_eq!(err.to_string(), "Data error: document set is empty");
    }

    #[test]
    fn test_too_many_clusters() {
        let err = cluster(&dataset(&[Some("rust code"), Some("garden")]), "text", 3, 10, None)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Config error: invalid cluster count 3: must be between 1 and 2 documents"
        );
    }

    #[test]
    fn test_only_stop_words() {
        let err = cluster(&dataset(&[Some("the and"), Some("of a")]), "text", 1, 10, None)
            .unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn test_missing_text_uses_sentinel() {
        let pipeline = ClusteringPipeline::new(PipelineConfig::new("text", 2)).unwrap();
        let data = dataset(&[Some("Running dogs"), None]);

        let texts = pipeline.normalized_texts(&data).unwrap();
        assert_eq!(texts, vec!["run dog", "null"]);

        let report = pipeline.run(&data).unwrap();
        assert_eq!(report.assignments.len(), 2);
        assert_eq!(report.assignments[1].values[1], None);
        assert_ne!(report.assignments[0].cluster, report.assignments[1].cluster);
    }

    #[test]
    fn test_fill_missing_in_output() {
        let config = PipelineConfig::new("text", 1).with_fill_missing_in_output(true);
        let report = ClusteringPipeline::new(config)
            .unwrap()
            .run(&dataset(&[Some("rust"), None]))
            .unwrap();
        assert_eq!(report.assignments[1].values[1], Some(FieldValue::Text("NULL".into())));
    }

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let err = ClusteringPipeline::new(PipelineConfig::new("text", 0)).unwrap_err();
        assert!(err.is_config());
    }
}
