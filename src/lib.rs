//! # textcluster
//!
//! Groups the rows of a tabular dataset into clusters by a free-text column
//! and reports each row's cluster, the top keywords of every cluster and the
//! cluster sizes.
//!
//! ## Pipeline
//!
//! - Normalization: whitespace collapsing and Porter stemming
//! - Vectorization: bag-of-words counts over a stop-word filtered vocabulary
//! - Clustering: seeded k-means++ with deterministic empty-cluster repair
//! - Reporting: keyword ranking, assignments and sizes, CSV or JSON output
//!
//! ```
//! use textcluster::prelude::*;
//!
//! let rows = ["cats purr", "cats nap", "stocks fell", "stocks rallied"];
//! let docs = rows.iter().map(|t| Document::builder().add_text("text", *t).build()).collect();
//! let dataset = Dataset::new(vec!["text".into()], docs);
//!
//! let report = ClusteringPipeline::new(PipelineConfig::new("text", 2).with_seed(Some(3)))
//!     .unwrap()
//!     .run(&dataset)
//!     .unwrap();
//! assert_eq!(report.sizes_by_cluster.iter().map(|s| s.size).sum::<usize>(), 4);
//! ```

pub mod analysis;
pub mod cli;
pub mod clustering;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod vectorizer;

pub mod prelude {
    pub use crate::clustering::{Centroids, KMeans, KMeansConfig, Labels, cluster_matrix};
    pub use crate::document::converter::read_dataset;
    pub use crate::document::{Dataset, Document, FieldValue};
    pub use crate::error::{Result, TextClusterError};
    pub use crate::pipeline::{ClusteringPipeline, PipelineConfig, cluster};
    pub use crate::report::{ClusterReport, KeywordRanker, ReportWriter};
    pub use crate::vectorizer::{SparseMatrix, Vocabulary, build_vocabulary_and_matrix};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
