//! Bag-of-words vectorization.
//!
//! Normalized documents are turned into a [`Vocabulary`] and a sparse
//! document-term count matrix ([`SparseMatrix`]). Both are immutable values:
//! the clustering stage consumes the matrix, the keyword ranker consumes the
//! vocabulary.

pub mod count;
pub mod matrix;
pub mod vocabulary;

pub use count::{CountVectorizer, build_vocabulary_and_matrix};
pub use matrix::{SparseMatrix, SparseRow};
pub use vocabulary::Vocabulary;
