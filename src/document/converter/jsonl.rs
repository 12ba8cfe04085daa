//! JSONL format dataset reader.
//!
//! Each non-blank line must hold one JSON object:
//! ```jsonl
//! {"id": 1, "text": "Rust programming"}
//! {"id": 2, "text": null}
//! ```

use std::io::{BufRead, BufReader, Read};

use serde_json::Value;

use crate::document::converter::DatasetReader;
use crate::document::dataset::Dataset;
use crate::document::document::Document;
use crate::document::field_value::FieldValue;
use crate::error::{Result, TextClusterError};

/// A dataset reader for JSON Lines input.
///
/// Columns are ordered by first appearance, keys in file order. Nested
/// arrays and objects are kept as their JSON text.
#[derive(Clone, Debug, Default)]
pub struct JsonlDatasetReader;

impl JsonlDatasetReader {
    /// Create a new JSONL reader.
    pub fn new() -> Self {
        JsonlDatasetReader
    }

    fn field_value(value: Value) -> FieldValue {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FieldValue::Text(s),
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl DatasetReader for JsonlDatasetReader {
    fn read<R: Read>(&self, input: R) -> Result<Dataset> {
        let mut columns: Vec<String> = Vec::new();
        let mut documents = Vec::new();

        for (line_num, line) in BufReader::new(input).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let value: Value = serde_json::from_str(&line).map_err(|e| {
                TextClusterError::parse(format!("line {}: {e}", line_num + 1))
            })?;
            let Value::Object(object) = value else {
                return Err(TextClusterError::parse(format!(
                    "line {}: expected a JSON object",
                    line_num + 1
                )));
            };

            let mut doc = Document::new();
            for (name, value) in object {
                if !columns.contains(&name) {
                    columns.push(name.clone());
                }
                doc.add_field(name, Self::field_value(value));
            }
            documents.push(doc);
        }

        Ok(Dataset::new(columns, documents))
    }
}
