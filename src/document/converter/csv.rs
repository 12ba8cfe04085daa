//! CSV format dataset reader.
//!
//! The first row holds the column names; every following row becomes a
//! [`Document`]:
//! ```csv
//! id,text
//! 1,Rust programming
//! 2,Python basics
//! ```

use std::io::Read;

use ahash::AHashSet;
use csv::ReaderBuilder;

use crate::document::converter::DatasetReader;
use crate::document::dataset::Dataset;
use crate::document::document::Document;
use crate::document::field_value::FieldValue;
use crate::error::{Result, TextClusterError};

/// Cell texts that spreadsheet and dataframe exports use for "not available".
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A dataset reader for CSV (or other single-byte delimited) input.
///
/// Empty cells, and cells matching one of the configured NA values, are
/// missing values and are not stored on the row. Cell text is kept verbatim
/// unless type inference is switched on.
#[derive(Clone, Debug)]
pub struct CsvDatasetReader {
    /// CSV delimiter character (default: ',')
    delimiter: u8,
    /// Whether to trim whitespace from fields
    trim: bool,
    /// Whether to allow rows with a different field count than the header
    flexible: bool,
    /// Whether to infer booleans and numbers from cell text
    infer_types: bool,
    /// Cell texts read as missing besides the empty cell
    na_values: AHashSet<String>,
}

impl Default for CsvDatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvDatasetReader {
    /// Create a new CSV reader with comma delimiter.
    pub fn new() -> Self {
        CsvDatasetReader {
            delimiter: b',',
            trim: false,
            flexible: false,
            infer_types: false,
            na_values: AHashSet::new(),
        }
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter as u8;
        self
    }

    /// Set whether to trim whitespace from fields.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set whether to allow flexible field counts.
    pub fn with_flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }

    /// Set whether to infer booleans and numbers from cell text.
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }

    /// Read the given cell texts as missing values.
    pub fn with_na_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.na_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Read the common NA spellings in [`DEFAULT_NA_VALUES`] as missing values.
    pub fn with_default_na_values(self) -> Self {
        self.with_na_values(DEFAULT_NA_VALUES.iter().copied())
    }

    /// Whether a cell holds no value.
    pub fn is_missing(&self, value: &str) -> bool {
        value.is_empty() || self.na_values.contains(value)
    }

    fn field_value(&self, value: &str) -> FieldValue {
        if self.infer_types {
            FieldValue::infer(value)
        } else {
            FieldValue::Text(value.to_string())
        }
    }
}

impl DatasetReader for CsvDatasetReader {
    fn read<R: Read>(&self, input: R) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { csv::Trim::All } else { csv::Trim::None })
            .flexible(self.flexible)
            .from_reader(input);

        let headers = reader
            .headers()
            .map_err(|e| TextClusterError::parse(format!("Failed to read CSV headers: {e}")))?
            .clone();

        if headers.is_empty() {
            return Err(TextClusterError::parse("CSV header is empty"));
        }

        let mut documents = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                TextClusterError::parse(format!("Failed to read CSV record {}: {e}", row + 1))
            })?;

            let mut doc = Document::new();
            for (header, value) in headers.iter().zip(record.iter()) {
                if !self.is_missing(value) {
                    doc.add_field(header, self.field_value(value));
                }
            }
            documents.push(doc);
        }

        let columns = headers.iter().map(str::to_string).collect();
        Ok(Dataset::new(columns, documents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_basic_parsing() {
        let reader = CsvDatasetReader::new();
        let dataset = reader.read("id,text\n1,Rust programming\n2,Python".as_bytes()).unwrap();

        assert_eq!(dataset.columns(), &["id", "text"]);
        assert_eq!(dataset.len(), 2);
        let first = &dataset.documents()[0];
        assert_eq!(first.get_field("id"), Some(&FieldValue::Text("1".into())));
        assert_eq!(first.text("text").as_deref(), Some("Rust programming"));
    }

    #[test]
    fn test_csv_type_inference() {
        let reader = CsvDatasetReader::new().with_type_inference(true);
        let dataset = reader.read("title,year,price,active\nTest,2024,19.99,true".as_bytes()).unwrap();
        let doc = &dataset.documents()[0];

        assert!(matches!(doc.get_field("title"), Some(FieldValue::Text(_))));
        assert_eq!(doc.get_field("year"), Some(&FieldValue::Integer(2024)));
        assert!(matches!(doc.get_field("price"), Some(FieldValue::Float(_))));
        assert_eq!(doc.get_field("active"), Some(&FieldValue::Boolean(true)));
    }

    #[test]
    fn test_csv_quoted_fields() {
        let reader = CsvDatasetReader::new();
        let csv = "title,description\n\"Rust, Programming\",\"A book about \"\"Rust\"\"\"";
        let dataset = reader.read(csv.as_bytes()).unwrap();
        let doc = &dataset.documents()[0];

        assert_eq!(doc.text("title").as_deref(), Some("Rust, Programming"));
        assert_eq!(doc.text("description").as_deref(), Some("A book about \"Rust\""));
    }

    #[test]
    fn test_csv_empty_fields_are_missing() {
        let reader = CsvDatasetReader::new();
        let dataset = reader.read("title,text\nRust,\n".as_bytes()).unwrap();
        let doc = &dataset.documents()[0];

        assert!(doc.has_field("title"));
        assert!(!doc.has_field("text"));
        assert!(dataset.has_column("text"));
    }

    #[test]
    fn test_csv_na_values_are_missing() {
        let input = "id,text\n1,NA\n2,N/A\n3,NaN\n4,None\n5,Nana bread\n";

        let plain = CsvDatasetReader::new().read(input.as_bytes()).unwrap();
        assert_eq!(plain.documents()[0].text("text").as_deref(), Some("NA"));

        let dataset = CsvDatasetReader::new()
            .with_default_na_values()
            .read(input.as_bytes())
            .unwrap();
        for doc in &dataset.documents()[..4] {
            assert!(doc.has_field("id"));
            assert!(!doc.has_field("text"));
        }
        assert_eq!(dataset.documents()[4].text("text").as_deref(), Some("Nana bread"));
    }

    #[test]
    fn test_csv_custom_na_values() {
        let reader = CsvDatasetReader::new().with_na_values(["-"]);
        assert!(reader.is_missing("-"));
        assert!(reader.is_missing(""));
        assert!(!reader.is_missing("NA"));
    }

    #[test]
    fn test_csv_custom_delimiter_and_trim() {
        let reader = CsvDatasetReader::new().with_delimiter('\t').with_trim(true);
        let dataset = reader.read("title\ttext\n Rust \t  fast code ".as_bytes()).unwrap();
        assert_eq!(dataset.documents()[0].text("text").as_deref(), Some("fast code"));
    }

    #[test]
    fn test_csv_header_only_is_empty_dataset() {
        let dataset = CsvDatasetReader::new().read("title,text\n".as_bytes()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.columns().len(), 2);
    }

    #[test]
    fn test_csv_field_count_mismatch() {
        let result = CsvDatasetReader::new().read("title,year,price\nRust,2024".as_bytes());
        assert!(result.is_err());
    }
}
