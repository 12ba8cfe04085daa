//! Dataset readers for tabular files.
//!
//! The readers turn a delimited text file or a JSON Lines file into a
//! [`Dataset`]. [`read_dataset`] picks a reader from the file extension.
//!
//! ```no_run
//! use textcluster::document::converter::read_dataset;
//!
//! let dataset = read_dataset("reviews.csv").unwrap();
//! println!("{} rows, columns {:?}", dataset.len(), dataset.columns());
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::document::dataset::Dataset;
use crate::error::{Result, TextClusterError};

pub mod csv;
pub mod jsonl;

pub use self::csv::CsvDatasetReader;
pub use self::jsonl::JsonlDatasetReader;

/// A trait for reading a whole dataset from some serialized form.
pub trait DatasetReader {
    /// Read a dataset from any byte source.
    fn read<R: Read>(&self, reader: R) -> Result<Dataset>;

    /// Read a dataset from a file.
    fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let file = File::open(path.as_ref())?;
        self.read(BufReader::new(file))
    }
}

/// Read a dataset, choosing the format from the file extension:
/// `.csv`, `.tsv`/`.tab`, `.jsonl`/`.ndjson`.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    read_dataset_with(path, &CsvDatasetReader::new())
}

/// Like [`read_dataset`], reading delimited files with the settings of `delimited`.
/// Tab-separated files use the same settings with a tab delimiter.
pub fn read_dataset_with<P: AsRef<Path>>(path: P, delimited: &CsvDatasetReader) -> Result<Dataset> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => delimited.read_path(path),
        "tsv" | "tab" => delimited.clone().with_delimiter('\t').read_path(path),
        "jsonl" | "ndjson" => JsonlDatasetReader::new().read_path(path),
        other => Err(TextClusterError::config(format!(
            "unsupported input format '{other}' for {}: expected csv, tsv or jsonl",
            path.display()
        ))),
    }
}
