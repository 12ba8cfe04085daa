//! Compressed sparse row matrix of term counts.

use crate::error::{Result, TextClusterError};

/// A read-only view of one matrix row: sorted column indices and their values.
#[derive(Clone, Copy, Debug)]
pub struct SparseRow<'a> {
    pub indices: &'a [usize],
    pub values: &'a [f64],
}

impl<'a> SparseRow<'a> {
    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over `(column, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + 'a {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Sum of squared values.
    pub fn squared_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// Dot product with a dense vector.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.iter().map(|(col, value)| value * dense[col]).sum()
    }

    /// Expand into a dense vector of the given width.
    pub fn to_dense(&self, width: usize) -> Vec<f64> {
        let mut dense = vec![0.0; width];
        for (col, value) in self.iter() {
            dense[col] = value;
        }
        dense
    }
}

/// Document-term matrix in CSR layout.
///
/// Row `i` owns `indices[indptr[i]..indptr[i + 1]]`, with column indices
/// strictly increasing inside a row.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseMatrix {
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// An empty matrix with `n_cols` columns and no rows.
    pub fn new(n_cols: usize) -> Self {
        SparseMatrix {
            n_cols,
            indptr: vec![0],
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build a matrix from per-row `(column, value)` entries.
    ///
    /// Entries may come in any order; duplicates within a row are summed and
    /// zeros dropped.
    pub fn from_rows<I>(n_cols: usize, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<(usize, f64)>>,
    {
        let mut matrix = SparseMatrix::new(n_cols);
        for row in rows {
            matrix.push_row(row)?;
        }
        Ok(matrix)
    }

    /// Append one row.
    pub fn push_row(&mut self, mut entries: Vec<(usize, f64)>) -> Result<()> {
        if let Some(&(col, _)) = entries.iter().find(|(col, _)| *col >= self.n_cols) {
            return Err(TextClusterError::data(format!(
                "column {col} out of range for matrix with {} columns",
                self.n_cols
            )));
        }

        entries.sort_by_key(|&(col, _)| col);
        let mut last: Option<usize> = None;
        for (col, value) in entries {
            if last == Some(col) {
                if let Some(v) = self.values.last_mut() {
                    *v += value;
                }
            } else {
                self.indices.push(col);
                self.values.push(value);
                last = Some(col);
            }
        }

        let start = self.indptr[self.indptr.len() - 1];
        let mut write = start;
        for read in start..self.indices.len() {
            if self.values[read] != 0.0 {
                self.indices[write] = self.indices[read];
                self.values[write] = self.values[read];
                write += 1;
            }
        }
        self.indices.truncate(write);
        self.values.truncate(write);
        self.indptr.push(write);
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.indptr.len() - 1
    }

    pub fn cols(&self) -> usize {
        self.n_cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.n_cols)
    }

    /// Total number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Borrow row `i`. Panics if `i >= rows()`.
    pub fn row(&self, i: usize) -> SparseRow<'_> {
        let (start, end) = (self.indptr[i], self.indptr[i + 1]);
        SparseRow {
            indices: &self.indices[start..end],
            values: &self.values[start..end],
        }
    }

    pub fn row_iter(&self) -> impl Iterator<Item = SparseRow<'_>> {
        (0..self.rows()).map(move |i| self.row(i))
    }

    /// Value at `(row, col)`, zero when not stored.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        let r = self.row(row);
        match r.indices.binary_search(&col) {
            Ok(pos) => r.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Column sums divided by the row count.
    pub fn column_means(&self) -> Vec<f64> {
        let mut means = vec![0.0; self.n_cols];
        if self.rows() == 0 {
            return means;
        }
        for (col, value) in self.indices.iter().zip(&self.values) {
            means[*col] += value;
        }
        let n = self.rows() as f64;
        for m in &mut means {
            *m /= n;
        }
        means
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_sorts_and_merges() {
        let matrix =
            SparseMatrix::from_rows(4, vec![vec![(3, 1.0), (0, 2.0), (3, 1.0)], vec![], vec![(1, 0.0)]])
                .unwrap();

        assert_eq!(matrix.shape(), (3, 4));
        assert_eq!(matrix.nnz(), 2);
        assert_eq!(matrix.row(0).indices, &[0, 3]);
        assert_eq!(matrix.row(0).values, &[2.0, 2.0]);
        assert!(matrix.row(1).is_empty());
        assert!(matrix.row(2).is_empty());
        assert_eq!(matrix.get(0, 3), 2.0);
        assert_eq!(matrix.get(0, 1), 0.0);
    }

    #[test]
    fn test_out_of_range_column() {
        let result = SparseMatrix::from_rows(2, vec![vec![(2, 1.0)]]);
        assert!(result.unwrap_err().is_data());
    }

    #[test]
    fn test_row_math() {
        let matrix = SparseMatrix::from_rows(3, vec![vec![(0, 1.0), (2, 2.0)]]).unwrap();
        let row = matrix.row(0);
        assert_eq!(row.squared_norm(), 5.0);
        assert_eq!(row.dot(&[1.0, 10.0, 0.5]), 2.0);
        assert_eq!(row.to_dense(3), vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_column_means() {
        let matrix =
            SparseMatrix::from_rows(2, vec![vec![(0, 2.0)], vec![(0, 4.0), (1, 1.0)]]).unwrap();
        assert_eq!(matrix.column_means(), vec![3.0, 0.5]);
        assert_eq!(SparseMatrix::new(2).column_means(), vec![0.0, 0.0]);
    }
}
