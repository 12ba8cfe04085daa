//! Term count vectorizer.

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::error::{Result, TextClusterError};
use crate::vectorizer::matrix::SparseMatrix;
use crate::vectorizer::vocabulary::Vocabulary;

/// Builds a vocabulary and a document-term count matrix from a corpus.
///
/// ```
/// use textcluster::vectorizer::CountVectorizer;
///
/// let vectorizer = CountVectorizer::default();
/// let (vocab, matrix) = vectorizer.fit_transform(&["rust code", "rust and more rust"]).unwrap();
///
/// assert_eq!(vocab.terms(), &["code", "rust"]);
/// assert_eq!(matrix.shape(), (2, 2));
/// assert_eq!(matrix.get(1, 1), 2.0);
/// ```
#[derive(Clone)]
pub struct CountVectorizer {
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for CountVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountVectorizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new(Arc::new(PipelineAnalyzer::terms(
            Default::default(),
            2,
            &Default::default(),
        )))
    }
}

impl CountVectorizer {
    /// Create a vectorizer with the given term analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        CountVectorizer { analyzer }
    }

    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Build the vocabulary from the whole corpus and count every term.
    ///
    /// Fails with a data error when no document yields a single term.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<(Vocabulary, SparseMatrix)> {
        build_vocabulary_and_matrix(documents, self.analyzer.as_ref())
    }

    /// Count terms of new documents against an existing vocabulary.
    /// Unknown terms are ignored.
    pub fn transform<S: AsRef<str>>(
        &self,
        vocabulary: &Vocabulary,
        documents: &[S],
    ) -> Result<SparseMatrix> {
        let terms = tokenize_all(documents, self.analyzer.as_ref())?;
        count_matrix(vocabulary, &terms)
    }
}

/// Build the vocabulary and the document-term matrix in two passes with one
/// analyzer, so both passes see the same terms.
pub fn build_vocabulary_and_matrix<S: AsRef<str>>(
    documents: &[S],
    analyzer: &dyn Analyzer,
) -> Result<(Vocabulary, SparseMatrix)> {
    let terms = tokenize_all(documents, analyzer)?;

    let distinct: BTreeSet<&str> = terms.iter().flatten().map(String::as_str).collect();
    let vocabulary = Vocabulary::from_terms(distinct);
    if vocabulary.is_empty() {
        return Err(TextClusterError::data("no usable text content"));
    }

    let matrix = count_matrix(&vocabulary, &terms)?;
    debug!(
        "vectorized {} documents: vocabulary size {}, {} non-zero entries",
        matrix.rows(),
        vocabulary.len(),
        matrix.nnz()
    );

    Ok((vocabulary, matrix))
}

fn tokenize_all<S: AsRef<str>>(documents: &[S], analyzer: &dyn Analyzer) -> Result<Vec<Vec<String>>> {
    documents
        .iter()
        .map(|doc| -> Result<Vec<String>> {
            Ok(analyzer.analyze(doc.as_ref())?.map(|token| token.text).collect())
        })
        .collect()
}

fn count_matrix(vocabulary: &Vocabulary, terms: &[Vec<String>]) -> Result<SparseMatrix> {
    let mut matrix = SparseMatrix::new(vocabulary.len());
    for doc_terms in terms {
        let mut counts: AHashMap<usize, f64> = AHashMap::new();
        for term in doc_terms {
            if let Some(col) = vocabulary.index_of(term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }
        matrix.push_row(counts.into_iter().collect())?;
    }
    Ok(matrix)
}
