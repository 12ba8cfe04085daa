//! Partitioning of document vectors into clusters.
//!
//! [`KMeans`] is the only algorithm; [`cluster_matrix`] is the shortcut the
//! pipeline uses. Results are plain values ([`Labels`], [`Centroids`]) that
//! the report stage reads without touching the clusterer again.

pub mod distance;
pub mod kmeans;

use serde::Serialize;

use crate::error::Result;
use crate::vectorizer::SparseMatrix;

pub use kmeans::{KMeans, KMeansConfig, KMeansFit, cluster_matrix};

/// Common interface for hard clustering algorithms (one label per document).
pub trait Clustering {
    /// Fit the model and return one cluster label per matrix row.
    fn fit_predict(&self, matrix: &SparseMatrix) -> Result<Labels>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}

/// One cluster label per document, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Labels(Vec<usize>);

impl Labels {
    pub fn new(labels: Vec<usize>) -> Self {
        Labels(labels)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn get(&self, doc: usize) -> Option<usize> {
        self.0.get(doc).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Member count per label `0..k`.
    pub fn counts(&self, k: usize) -> Vec<usize> {
        let mut counts = vec![0; k];
        for &label in &self.0 {
            if label < k {
                counts[label] += 1;
            }
        }
        counts
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

/// K dense centroid vectors, one weight per vocabulary term.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Centroids(Vec<Vec<f64>>);

impl Centroids {
    pub fn new(centroids: Vec<Vec<f64>>) -> Self {
        Centroids(centroids)
    }

    /// Centroid of one cluster.
    pub fn get(&self, cluster: usize) -> Option<&[f64]> {
        self.0.get(cluster).map(Vec::as_slice)
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Vector width (vocabulary size).
    pub fn dimension(&self) -> usize {
        self.0.first().map_or(0, Vec::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.0.iter().map(Vec::as_slice)
    }
}
