//! Joins cluster labels back onto the original rows.

use serde::Serialize;

use crate::clustering::Labels;
use crate::document::{Dataset, FieldValue};
use crate::error::{Result, TextClusterError};

/// Default name of the added label column.
pub const DEFAULT_LABEL_FIELD: &str = "cluster_num";

/// One input row with its cluster label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    /// Position of the row in the input.
    pub row: usize,
    pub cluster: usize,
    /// Original values aligned with [`ClusterReport::columns`]; `None` when
    /// the row had no value for the column.
    pub values: Vec<Option<FieldValue>>,
}

/// Top keywords of one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordList {
    pub cluster: usize,
    pub keywords: Vec<String>,
}

/// Member count of one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClusterSize {
    pub cluster: usize,
    pub size: usize,
}

/// The pipeline output: assignments, keywords per cluster and sizes per
/// cluster, all ordered by row or by label ascending.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    /// Original column order.
    pub columns: Vec<String>,
    /// Name of the added label column.
    pub label_field: String,
    pub assignments: Vec<Assignment>,
    pub keywords_by_cluster: Vec<KeywordList>,
    pub sizes_by_cluster: Vec<ClusterSize>,
    /// Sum of squared distances of rows to their centroids.
    pub inertia: f64,
    pub iterations: usize,
}

impl ClusterReport {
    /// Original columns followed by the label column.
    pub fn output_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.label_field.as_str()))
            .collect()
    }

    pub fn cluster_count(&self) -> usize {
        self.sizes_by_cluster.len()
    }

    /// Labels in row order.
    pub fn labels(&self) -> Vec<usize> {
        self.assignments.iter().map(|a| a.cluster).collect()
    }

    pub fn keywords(&self, cluster: usize) -> Option<&[String]> {
        self.keywords_by_cluster
            .iter()
            .find(|k| k.cluster == cluster)
            .map(|k| k.keywords.as_slice())
    }

    pub fn size(&self, cluster: usize) -> Option<usize> {
        self.sizes_by_cluster
            .iter()
            .find(|s| s.cluster == cluster)
            .map(|s| s.size)
    }

    /// Rows assigned to a cluster, in row order.
    pub fn members(&self, cluster: usize) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(move |a| a.cluster == cluster)
    }
}

/// Builds a [`ClusterReport`] from the dataset and the clustering result.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    label_field: String,
    missing_fill: Option<String>,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportAssembler {
    pub fn new() -> Self {
        ReportAssembler {
            label_field: DEFAULT_LABEL_FIELD.to_string(),
            missing_fill: None,
        }
    }

    pub fn with_label_field<S: Into<String>>(mut self, label_field: S) -> Self {
        self.label_field = label_field.into();
        self
    }

    /// Replace missing and null values in the assignments with `fill`.
    pub fn with_missing_fill(mut self, fill: Option<String>) -> Self {
        self.missing_fill = fill;
        self
    }

    /// Join `labels` onto `dataset` and count members per cluster.
    ///
    /// The number of clusters is the length of `keywords_by_cluster`.
    pub fn assemble(
        &self,
        dataset: &Dataset,
        labels: &Labels,
        keywords_by_cluster: Vec<KeywordList>,
        inertia: f64,
        iterations: usize,
    ) -> Result<ClusterReport> {
        if labels.len() != dataset.len() {
            return Err(TextClusterError::data(format!(
                "{} labels for {} documents",
                labels.len(),
                dataset.len()
            )));
        }

        let k = keywords_by_cluster.len();
        if let Some(label) = labels.iter().find(|&l| l >= k) {
            return Err(TextClusterError::data(format!(
                "label {label} out of range for {k} clusters"
            )));
        }

        let assignments = dataset
            .documents()
            .iter()
            .zip(labels.iter())
            .enumerate()
            .map(|(row, (doc, cluster))| Assignment {
                row,
                cluster,
                values: dataset
                    .columns()
                    .iter()
                    .map(|column| self.output_value(doc.get_field(column)))
                    .collect(),
            })
            .collect();

        let sizes_by_cluster = labels
            .counts(k)
            .into_iter()
            .enumerate()
            .filter(|&(_, size)| size > 0)
            .map(|(cluster, size)| ClusterSize { cluster, size })
            .collect();

        Ok(ClusterReport {
            columns: dataset.columns().to_vec(),
            label_field: self.unique_label_field(dataset),
            assignments,
            keywords_by_cluster,
            sizes_by_cluster,
            inertia,
            iterations,
        })
    }

    fn output_value(&self, value: Option<&FieldValue>) -> Option<FieldValue> {
        match (value, &self.missing_fill) {
            (None, Some(fill)) | (Some(FieldValue::Null), Some(fill)) => {
                Some(FieldValue::Text(fill.clone()))
            }
            (value, _) => value.cloned(),
        }
    }

    /// The label column name, suffixed when the dataset already uses it.
    fn unique_label_field(&self, dataset: &Dataset) -> String {
        if !dataset.has_column(&self.label_field) {
            return self.label_field.clone();
        }
        (1..)
            .map(|n| format!("{}_{n}", self.label_field))
            .find(|name| !dataset.has_column(name))
            .unwrap_or_else(|| self.label_field.clone())
    }
}
