//! End-to-end clustering of a dataset's text column.
//!
//! Stages run in a fixed order, each producing an immutable value for the
//! next: normalized texts, then vocabulary and matrix, then labels and
//! centroids, then the report.
//!
//! ```
//! use textcluster::document::{Dataset, Document};
//! use textcluster::pipeline::cluster;
//!
//! let docs = ["rust compiler", "rust borrow checker", "garden tomato", "garden flower"]
//!     .iter()
//!     .map(|t| Document::builder().add_text("text", *t).build())
//!     .collect();
//! let dataset = Dataset::new(vec!["text".into()], docs);
//!
//! let report = cluster(&dataset, "text", 2, 3, Some(42)).unwrap();
//! assert_eq!(report.assignments.len(), 4);
//! assert_eq!(report.sizes_by_cluster.len(), 2);
//! ```

pub mod config;
pub mod engine;

pub use config::PipelineConfig;
pub use engine::{ClusteringPipeline, cluster};
