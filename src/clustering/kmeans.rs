//! K-means clustering over sparse term-count rows.
//!
//! Seeding is k-means++ driven by an injectable seed. Distance ties go to the
//! lowest cluster index, and a cluster that loses all of its members is
//! re-seeded from the document farthest from its own centroid, so every label
//! in `0..k` is present in the result.
//!
//! ```
//! use textcluster::clustering::{KMeans, KMeansConfig};
//! use textcluster::vectorizer::SparseMatrix;
//!
//! let matrix = SparseMatrix::from_rows(2, vec![
//!     vec![(0, 3.0)],
//!     vec![(0, 2.0)],
//!     vec![(1, 4.0)],
//!     vec![(1, 5.0)],
//! ]).unwrap();
//!
//! let fit = KMeans::new(KMeansConfig::new(2).with_seed(7)).fit(&matrix).unwrap();
//! let labels = fit.labels.as_slice();
//! assert_eq!(labels[0], labels[1]);
//! assert_eq!(labels[2], labels[3]);
//! assert_ne!(labels[0], labels[2]);
//! ```

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::clustering::distance::{sparse_squared_distance, squared_euclidean, squared_norm};
use crate::clustering::{Centroids, Clustering, Labels};
use crate::error::{Result, TextClusterError};
use crate::vectorizer::SparseMatrix;

/// Configuration for a k-means run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Number of clusters.
    pub k: usize,
    /// Iteration cap for the refinement loop.
    pub max_iterations: usize,
    /// Largest centroid movement that still counts as converged.
    ///
    /// With `0.0` the loop only stops once assignments stop changing or the
    /// iteration cap is reached.
    pub tolerance: f64,
    /// Seed for centroid initialization; entropy when absent.
    pub seed: Option<u64>,
    /// Row count above which the assignment step runs in parallel.
    pub parallel_threshold: usize,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 2,
            max_iterations: 300,
            tolerance: 1e-4,
            seed: None,
            parallel_threshold: 1024,
        }
    }
}

impl KMeansConfig {
    /// Create a configuration for `k` clusters with default settings.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Validate the configuration against a matrix with `n_documents` rows.
    pub fn validate(&self, n_documents: usize) -> Result<()> {
        if self.k == 0 || self.k > n_documents {
            return Err(TextClusterError::config(format!(
                "invalid cluster count {}: must be between 1 and {} documents",
                self.k, n_documents
            )));
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
}

/// Result of a k-means run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KMeansFit {
    /// Cluster label per document.
    pub labels: Labels,
    /// Mean vector of each cluster's members.
    pub centroids: Centroids,
    /// Sum of squared distances from each document to its centroid.
    pub inertia: f64,
    /// Refinement iterations run.
    pub iterations: usize,
    /// Whether the loop stopped before the iteration cap.
    pub converged: bool,
}

/// K-means clusterer.
#[derive(Debug, Clone)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    pub fn new(config: KMeansConfig) -> Self {
        KMeans { config }
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Cluster the rows of `matrix`.
    pub fn fit(&self, matrix: &SparseMatrix) -> Result<KMeansFit> {
        let n = matrix.rows();
        if n == 0 {
            return Err(TextClusterError::data("document set is empty"));
        }
        self.config.validate(n)?;

        let k = self.config.k;
        let row_norms: Vec<f64> = matrix.row_iter().map(|row| row.squared_norm()).collect();

        let mut centroids = self.init_centroids_kmeans_plus_plus(matrix, &row_norms);
        let mut labels = vec![usize::MAX; n];
        let mut iterations = 0;
        let mut converged = false;

        for iteration in 1..=self.config.max_iterations {
            iterations = iteration;

            let (assigned, mut distances) = self.assign_rows(matrix, &row_norms, &centroids);
            let changed = assigned.iter().zip(&labels).filter(|(a, b)| a != b).count();
            labels = assigned;

            let repaired = repair_empty_clusters(matrix, &mut labels, &mut distances, &mut centroids, k);
            let updated = update_centroids(matrix, &labels, &centroids);
            let shift = centroids
                .iter()
                .zip(&updated)
                .map(|(old, new)| squared_euclidean(old, new).sqrt())
                .fold(0.0, f64::max);
            centroids = updated;

            debug!(
                "k-means iteration {iteration}: {changed} reassignments, {repaired} re-seeded, max centroid shift {shift:.6}"
            );

            if changed == 0 || shift <= self.config.tolerance {
                converged = true;
                break;
            }
        }

        if converged {
            info!("k-means converged after {iterations} iterations (k={k}, n={n})");
        } else {
            warn!(
                "k-means reached the iteration cap of {} without converging (k={k}, n={n})",
                self.config.max_iterations
            );
        }

        // Final assignment against the final centroids, repaired once more.
        let (assigned, mut distances) = self.assign_rows(matrix, &row_norms, &centroids);
        if assigned != labels {
            labels = assigned;
            repair_empty_clusters(matrix, &mut labels, &mut distances, &mut centroids, k);
            centroids = update_centroids(matrix, &labels, &centroids);
        }

        let centroid_norms: Vec<f64> = centroids.iter().map(|c| squared_norm(c)).collect();
        let inertia: f64 = matrix
            .row_iter()
            .zip(&row_norms)
            .zip(&labels)
            .map(|((row, &norm), &label)| {
                sparse_squared_distance(&row, norm, &centroids[label], centroid_norms[label])
            })
            .sum();

        Ok(KMeansFit {
            labels: Labels::new(labels),
            centroids: Centroids::new(centroids),
            inertia,
            iterations,
            converged,
        })
    }

    /// Initialize centroids using the k-means++ algorithm.
    fn init_centroids_kmeans_plus_plus(&self, matrix: &SparseMatrix, row_norms: &[f64]) -> Vec<Vec<f64>> {
        let n = matrix.rows();
        let dim = matrix.cols();
        let mut rng: Box<dyn RngCore> = match self.config.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut chosen = vec![false; n];
        let mut centroids: Vec<Vec<f64>> = Vec::with_capacity(self.config.k);

        let first = rng.random_range(0..n);
        chosen[first] = true;
        centroids.push(matrix.row(first).to_dense(dim));

        // Squared distance from each row to its nearest chosen centroid.
        let first_norm = squared_norm(&centroids[0]);
        let mut min_distances: Vec<f64> = matrix
            .row_iter()
            .zip(row_norms)
            .map(|(row, &norm)| sparse_squared_distance(&row, norm, &centroids[0], first_norm))
            .collect();

        while centroids.len() < self.config.k {
            let total_weight: f64 = min_distances.iter().sum();

            let next = if total_weight > 0.0 {
                let target = rng.random::<f64>() * total_weight;
                let mut cumsum = 0.0;
                let mut pick = None;
                for (i, &weight) in min_distances.iter().enumerate() {
                    if weight <= 0.0 {
                        continue;
                    }
                    cumsum += weight;
                    pick = Some(i);
                    if cumsum >= target {
                        break;
                    }
                }
                pick
            } else {
                None
            };

            // Every remaining row coincides with a chosen centroid.
            let next = match next.or_else(|| chosen.iter().position(|&c| !c)) {
                Some(i) => i,
                None => break,
            };

            chosen[next] = true;
            let centroid = matrix.row(next).to_dense(dim);
            let centroid_norm = squared_norm(&centroid);
            for ((row, &norm), min_distance) in matrix.row_iter().zip(row_norms).zip(min_distances.iter_mut()) {
                let d = sparse_squared_distance(&row, norm, &centroid, centroid_norm);
                if d < *min_distance {
                    *min_distance = d;
                }
            }
            centroids.push(centroid);
        }

        centroids
    }

    /// Assign each row to its nearest centroid; returns labels and distances.
    fn assign_rows(
        &self,
        matrix: &SparseMatrix,
        row_norms: &[f64],
        centroids: &[Vec<f64>],
    ) -> (Vec<usize>, Vec<f64>) {
        let centroid_norms: Vec<f64> = centroids.iter().map(|c| squared_norm(c)).collect();
        let nearest = |i: usize| find_nearest_centroid(matrix, i, row_norms[i], centroids, &centroid_norms);

        let pairs: Vec<(usize, f64)> = if matrix.rows() > self.config.parallel_threshold {
            (0..matrix.rows()).into_par_iter().map(nearest).collect()
        } else {
            (0..matrix.rows()).map(nearest).collect()
        };

        pairs.into_iter().unzip()
    }
}

impl Clustering for KMeans {
    fn fit_predict(&self, matrix: &SparseMatrix) -> Result<Labels> {
        Ok(self.fit(matrix)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.config.k
    }
}

/// Cluster the rows of `matrix` into `k` groups with default settings.
pub fn cluster_matrix(matrix: &SparseMatrix, k: usize, seed: Option<u64>) -> Result<(Labels, Centroids)> {
    let config = KMeansConfig {
        seed,
        ..KMeansConfig::new(k)
    };
    let fit = KMeans::new(config).fit(matrix)?;
    Ok((fit.labels, fit.centroids))
}

/// Find the nearest centroid for one row. Ties go to the lowest index.
fn find_nearest_centroid(
    matrix: &SparseMatrix,
    row: usize,
    row_norm: f64,
    centroids: &[Vec<f64>],
    centroid_norms: &[f64],
) -> (usize, f64) {
    let row = matrix.row(row);
    let mut best_cluster = 0;
    let mut best_distance = f64::INFINITY;

    for (i, (centroid, &norm)) in centroids.iter().zip(centroid_norms).enumerate() {
        let distance = sparse_squared_distance(&row, row_norm, centroid, norm);
        if distance < best_distance {
            best_distance = distance;
            best_cluster = i;
        }
    }

    (best_cluster, best_distance)
}

/// Give every empty cluster a member.
///
/// Empty clusters are handled in ascending label order. Each takes the
/// document farthest from its assigned centroid among clusters with more than
/// one member (ties go to the lowest document index), and its centroid moves
/// onto that document. Returns the number of clusters re-seeded.
fn repair_empty_clusters(
    matrix: &SparseMatrix,
    labels: &mut [usize],
    distances: &mut [f64],
    centroids: &mut [Vec<f64>],
    k: usize,
) -> usize {
    let mut sizes = vec![0usize; k];
    for &label in labels.iter() {
        sizes[label] += 1;
    }

    let mut repaired = 0;
    for cluster in 0..k {
        if sizes[cluster] > 0 {
            continue;
        }

        let mut donor: Option<usize> = None;
        for (doc, &label) in labels.iter().enumerate() {
            if sizes[label] <= 1 {
                continue;
            }
            if donor.is_none_or(|best| distances[doc] > distances[best]) {
                donor = Some(doc);
            }
        }

        let Some(doc) = donor else {
            break;
        };

        warn!(
            "cluster {cluster} is empty, re-seeding it with document {doc} taken from cluster {}",
            labels[doc]
        );
        sizes[labels[doc]] -= 1;
        sizes[cluster] = 1;
        labels[doc] = cluster;
        distances[doc] = 0.0;
        centroids[cluster] = matrix.row(doc).to_dense(matrix.cols());
        repaired += 1;
    }

    repaired
}

/// Recompute each centroid as the mean of its members.
/// A cluster without members keeps its previous centroid.
fn update_centroids(matrix: &SparseMatrix, labels: &[usize], previous: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let k = previous.len();
    let mut sums = vec![vec![0.0; matrix.cols()]; k];
    let mut counts = vec![0usize; k];

    for (row, &label) in matrix.row_iter().zip(labels) {
        counts[label] += 1;
        for (col, value) in row.iter() {
            sums[label][col] += value;
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((sum, count), old)| {
            if count == 0 {
                old.clone()
            } else {
                sum.into_iter().map(|s| s / count as f64).collect()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_groups() -> SparseMatrix {
        SparseMatrix::from_rows(
            4,
            vec![
                vec![(0, 2.0), (1, 1.0)],
                vec![(0, 1.0), (1, 2.0)],
                vec![(0, 2.0), (1, 2.0)],
                vec![(2, 2.0), (3, 1.0)],
                vec![(2, 1.0), (3, 2.0)],
                vec![(2, 2.0), (3, 2.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_separates_two_groups() {
        let fit = KMeans::new(KMeansConfig::new(2).with_seed(42)).fit(&two_groups()).unwrap();
        let labels = fit.labels.as_slice();

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[4], labels[5]);
        assert_ne!(labels[0], labels[3]);
        assert!(fit.converged);
        assert!(fit.inertia > 0.0);
    }

    #[test]
    fn test_same_seed_same_result() {
        let matrix = two_groups();
        let a = KMeans::new(KMeansConfig::new(3).with_seed(9)).fit(&matrix).unwrap();
        let b = KMeans::new(KMeansConfig::new(3).with_seed(9)).fit(&matrix).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_cluster_is_corpus_mean() {
        let matrix = two_groups();
        let (labels, centroids) = cluster_matrix(&matrix, 1, Some(1)).unwrap();

        assert!(labels.iter().all(|l| l == 0));
        let mean = matrix.column_means();
        for (a, b) in centroids.get(0).unwrap().iter().zip(&mean) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_k_equals_n_gives_singletons() {
        let matrix = two_groups();
        let (labels, _) = cluster_matrix(&matrix, 6, Some(3)).unwrap();
        let mut sorted = labels.into_inner();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_duplicates_still_fill_every_cluster() {
        let matrix = SparseMatrix::from_rows(
            1,
            vec![vec![(0, 1.0)], vec![(0, 1.0)], vec![(0, 1.0)], vec![]],
        )
        .unwrap();
        let (labels, _) = cluster_matrix(&matrix, 3, Some(5)).unwrap();
        assert!(labels.counts(3).iter().all(|&c| c > 0));
    }

    #[test]
    fn test_invalid_k() {
        let matrix = two_groups();
        let err = cluster_matrix(&matrix, 7, None).unwrap_err();
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Config error: invalid cluster count 7: must be between 1 and 6 documents"
        );
        assert!(cluster_matrix(&matrix, 0, None).unwrap_err().is_config());
    }

    #[test]
    fn test_empty_matrix() {
        let err = cluster_matrix(&SparseMatrix::new(3), 1, None).unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn test_repair_takes_farthest_document() {
        let matrix =
            SparseMatrix::from_rows(1, vec![vec![(0, 1.0)], vec![(0, 5.0)], vec![(0, 2.0)]]).unwrap();
        let mut labels = vec![0, 0, 0];
        let mut distances = vec![1.0, 9.0, 0.0];
        let mut centroids = vec![vec![2.0], vec![100.0]];

        let repaired = repair_empty_clusters(&matrix, &mut labels, &mut distances, &mut centroids, 2);

        assert_eq!(repaired, 1);
        assert_eq!(labels, vec![0, 1, 0]);
        assert_eq!(centroids[1], vec![5.0]);
    }

    #[test]
    fn test_parallel_assignment_matches_sequential() {
        let matrix = two_groups();
        let sequential = KMeans::new(KMeansConfig::new(2).with_seed(11)).fit(&matrix).unwrap();
        let parallel = KMeans::new(KMeansConfig::new(2).with_seed(11).with_parallel_threshold(0))
            .fit(&matrix)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_zero_tolerance_stops_on_stable_assignments() {
        let matrix = two_groups();
        let fit = KMeans::new(KMeansConfig::new(2).with_seed(3).with_tolerance(0.0))
            .fit(&matrix)
            .unwrap();

        assert!(fit.converged);
        assert!(fit.iterations >= 2);
        let labels = fit.labels.as_slice();
        assert_eq!(labels[0], labels[2]);
        assert_eq!(labels[3], labels[5]);
        assert_ne!(labels[0], labels[3]);
        assert!(KMeansConfig::new(2).with_tolerance(0.0).validate(6).is_ok());
    }

    #[test]
    fn test_fit_predict() {
        let kmeans = KMeans::new(KMeansConfig::new(2).with_seed(1));
        assert_eq!(kmeans.n_clusters(), 2);
        assert_eq!(kmeans.fit_predict(&two_groups()).unwrap().len(), 6);
    }
}
