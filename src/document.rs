//! Tabular input model.
//!
//! A [`Dataset`] is an ordered list of [`Document`] rows plus the ordered
//! column names they were read with. Rows are never mutated once read; the
//! clustering report refers back to them by index.
//!
//! - [`field_value::FieldValue`] - a single cell value
//! - [`document::Document`] - one row, a mapping from column name to value
//! - [`dataset::Dataset`] - rows plus column order
//! - [`converter`] - readers for CSV/TSV and JSONL files

#[allow(clippy::module_inception)]
pub mod document;
pub mod converter;
pub mod dataset;
pub mod field_value;

pub use dataset::Dataset;
pub use document::{Document, DocumentBuilder};
pub use field_value::FieldValue;
