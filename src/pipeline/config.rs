//! Pipeline configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::stop::StopWordSet;
use crate::analysis::tokenizer::TokenizerKind;
use crate::clustering::KMeansConfig;
use crate::error::{Result, TextClusterError};

/// Configuration for a clustering run.
///
/// Every field has a default, so a JSON config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Column holding the free text.
    pub text_field: String,
    /// Number of clusters.
    pub cluster_count: usize,
    /// Keywords reported per cluster.
    pub top_k_keywords: usize,
    /// Seed for centroid initialization; entropy when absent.
    pub seed: Option<u64>,
    /// Iteration cap for k-means refinement.
    pub max_iterations: usize,
    /// Centroid shift at or below which k-means stops.
    pub tolerance: f64,
    /// Text used in place of a missing value before normalization.
    pub missing_sentinel: String,
    /// Also write the sentinel into the assignments for missing values.
    pub fill_missing_in_output: bool,
    /// Terms excluded from the vocabulary.
    pub stop_words: StopWordSet,
    /// Shortest term (in characters) kept in the vocabulary.
    pub min_token_length: usize,
    /// Word tokenizer for the vectorizer.
    pub tokenizer: TokenizerKind,
    /// Row count above which k-means assigns rows in parallel.
    pub parallel_threshold: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            text_field: "text".to_string(),
            cluster_count: 2,
            top_k_keywords: 10,
            seed: None,
            max_iterations: 300,
            tolerance: 1e-4,
            missing_sentinel: "NULL".to_string(),
            fill_missing_in_output: false,
            stop_words: StopWordSet::English,
            min_token_length: 2,
            tokenizer: TokenizerKind::Regex,
            parallel_threshold: 1024,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration for `cluster_count` clusters over `text_field`.
    pub fn new<S: Into<String>>(text_field: S, cluster_count: usize) -> Self {
        Self {
            text_field: text_field.into(),
            cluster_count,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: PipelineConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn with_text_field<S: Into<String>>(mut self, text_field: S) -> Self {
        self.text_field = text_field.into();
        self
    }

    pub fn with_cluster_count(mut self, cluster_count: usize) -> Self {
        self.cluster_count = cluster_count;
        self
    }

    pub fn with_top_k_keywords(mut self, top_k: usize) -> Self {
        self.top_k_keywords = top_k;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_missing_sentinel<S: Into<String>>(mut self, sentinel: S) -> Self {
        self.missing_sentinel = sentinel.into();
        self
    }

    pub fn with_fill_missing_in_output(mut self, fill: bool) -> Self {
        self.fill_missing_in_output = fill;
        self
    }

    pub fn with_stop_words(mut self, stop_words: StopWordSet) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn with_min_token_length(mut self, min_token_length: usize) -> Self {
        self.min_token_length = min_token_length;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: TokenizerKind) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Check the settings that do not depend on the dataset.
    pub fn validate(&self) -> Result<()> {
        if self.text_field.is_empty() {
            return Err(TextClusterError::config("text field name must not be empty"));
        }
        if self.cluster_count == 0 {
            return Err(TextClusterError::config(
                "invalid cluster count 0: must be at least 1",
            ));
        }
        if self.top_k_keywords == 0 {
            return Err(TextClusterError::config("top_k_keywords must be positive"));
        }
        if self.max_iterations == 0 {
            return Err(TextClusterError::config("max_iterations must be positive"));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(TextClusterError::config(format!(
                "invalid tolerance {}: must be a non-negative number",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// The k-means settings of this configuration.
    pub fn kmeans_config(&self) -> KMeansConfig {
        KMeansConfig {
            k: self.cluster_count,
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
            seed: self.seed,
            parallel_threshold: self.parallel_threshold,
        }
    }
}
