//! Squared Euclidean distances between dense vectors and sparse rows.

use crate::vectorizer::SparseRow;

#[inline]
pub fn squared_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum()
}

#[inline]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// `‖x - c‖²` expanded as `‖x‖² - 2·x·c + ‖c‖²`, touching only the row's
/// non-zeros. Both squared norms are precomputed by the caller.
#[inline]
pub fn sparse_squared_distance(
    row: &SparseRow<'_>,
    row_norm: f64,
    centroid: &[f64],
    centroid_norm: f64,
) -> f64 {
    (row_norm - 2.0 * row.dot(centroid) + centroid_norm).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::SparseMatrix;

    #[test]
    fn test_dense_distance() {
        assert_eq!(squared_euclidean(&[1.0, 2.0], &[4.0, 6.0]), 25.0);
        assert_eq!(squared_norm(&[3.0, 4.0]), 25.0);
    }

    #[test]
    fn test_sparse_matches_dense() {
        let matrix = SparseMatrix::from_rows(4, vec![vec![(0, 2.0), (3, 1.0)]]).unwrap();
        let row = matrix.row(0);
        let centroid = [0.5, 1.0, 0.0, 3.0];

        let sparse = sparse_squared_distance(&row, row.squared_norm(), &centroid, squared_norm(&centroid));
        let dense = squared_euclidean(&row.to_dense(4), &centroid);
        assert!((sparse - dense).abs() < 1e-12);
    }

    #[test]
    fn test_never_negative() {
        let matrix = SparseMatrix::from_rows(1, vec![vec![(0, 0.1)]]).unwrap();
        let row = matrix.row(0);
        let d = sparse_squared_distance(&row, row.squared_norm(), &[0.1], 0.1 * 0.1);
        assert!(d >= 0.0);
    }
}
