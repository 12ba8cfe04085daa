//! Keyword ranking over centroid weights.

use crate::clustering::Centroids;
use crate::report::assembler::KeywordList;
use crate::vectorizer::Vocabulary;

/// Ranks vocabulary terms by their weight in a centroid.
///
/// ```
/// use textcluster::report::KeywordRanker;
/// use textcluster::vectorizer::Vocabulary;
///
/// let vocab = Vocabulary::from_terms(["a", "b", "c", "d"]);
/// let ranker = KeywordRanker::new(2);
/// assert_eq!(ranker.rank(&[5.0, 3.0, 3.0, 1.0], &vocab), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRanker {
    top_n: usize,
}

impl Default for KeywordRanker {
    fn default() -> Self {
        Self::new(10)
    }
}

impl KeywordRanker {
    pub fn new(top_n: usize) -> Self {
        KeywordRanker { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Top terms by descending weight. Equal weights keep vocabulary order.
    /// Returns every term when the vocabulary is smaller than `top_n`.
    pub fn rank(&self, centroid: &[f64], vocabulary: &Vocabulary) -> Vec<String> {
        self.rank_with_weights(centroid, vocabulary)
            .into_iter()
            .map(|(term, _)| term)
            .collect()
    }

    /// Like [`rank`](Self::rank) but keeps each term's weight.
    pub fn rank_with_weights(&self, centroid: &[f64], vocabulary: &Vocabulary) -> Vec<(String, f64)> {
        let mut order: Vec<usize> = (0..vocabulary.len().min(centroid.len())).collect();
        // sort_by is stable, so ties stay in vocabulary order.
        order.sort_by(|&a, &b| centroid[b].total_cmp(&centroid[a]));

        order
            .into_iter()
            .take(self.top_n)
            .filter_map(|i| vocabulary.term(i).map(|t| (t.to_string(), centroid[i])))
            .collect()
    }

    /// Keyword lists for every centroid, by label ascending.
    pub fn rank_all(&self, centroids: &Centroids, vocabulary: &Vocabulary) -> Vec<KeywordList> {
        centroids
            .iter()
            .enumerate()
            .map(|(cluster, centroid)| KeywordList {
                cluster,
                keywords: self.rank(centroid, vocabulary),
            })
            .collect()
    }
}
