//! Ordered row set with its column layout.

use serde::{Deserialize, Serialize};

use crate::document::document::Document;

/// Rows in input order plus the ordered list of column names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    documents: Vec<Document>,
}

impl Dataset {
    /// Create a dataset with an explicit column order.
    ///
    /// Fields present in documents but not named in `columns` are appended in
    /// lexicographic order so no value is silently dropped from the report.
    pub fn new(columns: Vec<String>, documents: Vec<Document>) -> Self {
        let mut columns = columns;
        let mut extra: Vec<String> = documents
            .iter()
            .flat_map(|doc| doc.field_names())
            .filter(|name| !columns.iter().any(|c| c == name))
            .map(str::to_string)
            .collect();
        extra.sort();
        extra.dedup();
        columns.extend(extra);

        Dataset { columns, documents }
    }

    /// Create a dataset whose columns are the union of the documents' fields,
    /// in lexicographic order.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self::new(Vec::new(), documents)
    }

    /// Column names in output order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether `name` is one of the columns.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Rows in input order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_columns_keep_order() {
        let docs = vec![Document::builder().add_text("b", "1").add_text("a", "2").build()];
        let dataset = Dataset::new(vec!["b".into(), "a".into()], docs);
        assert_eq!(dataset.columns(), &["b".to_string(), "a".to_string()]);
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_unlisted_fields_are_appended() {
        let docs = vec![
            Document::builder().add_text("text", "x").add_text("z", "1").build(),
            Document::builder().add_text("text", "y").add_text("m", "2").build(),
        ];
        let dataset = Dataset::new(vec!["text".into()], docs);
        assert_eq!(dataset.columns(), &["text", "m", "z"]);
        assert!(dataset.has_column("m"));
        assert!(!dataset.has_column("q"));
    }

    #[test]
    fn test_from_documents_sorted_union() {
        let docs = vec![
            Document::builder().add_text("title", "x").build(),
            Document::builder().add_text("body", "y").build(),
        ];
        let dataset = Dataset::from_documents(docs);
        assert_eq!(dataset.columns(), &["body", "title"]);
        assert!(!dataset.is_empty());
    }
}
