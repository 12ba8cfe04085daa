//! Cluster report: keywords, assignments and sizes.
//!
//! - [`keywords::KeywordRanker`] - top terms per centroid
//! - [`assembler::ReportAssembler`] - joins labels back onto the dataset
//! - [`writer::ReportWriter`] - CSV directory or JSON output

pub mod assembler;
pub mod keywords;
pub mod writer;

pub use assembler::{Assignment, ClusterReport, ClusterSize, KeywordList, ReportAssembler};
pub use keywords::KeywordRanker;
pub use writer::{ReportFormat, ReportWriter};
