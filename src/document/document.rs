//! A single row of the input dataset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::document::field_value::FieldValue;

/// One input row: a mapping from column name to cell value.
///
/// A column absent from the map is a missing value, the same as an explicit
/// [`FieldValue::Null`].
///
/// ```
/// use textcluster::document::Document;
///
/// let doc = Document::builder()
///     .add_text("text", "Rust programming guide")
///     .add_integer("year", 2024)
///     .build();
///
/// assert_eq!(doc.len(), 2);
/// assert_eq!(doc.text("text").as_deref(), Some("Rust programming guide"));
/// assert!(doc.text("missing").is_none());
/// ```
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Document {
    fields: HashMap<String, FieldValue>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Document {
            fields: HashMap::new(),
        }
    }

    /// Start building a document.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    /// Set a field value.
    pub fn add_field<S: Into<String>>(&mut self, name: S, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Get a field value.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Whether the document has a value (possibly null) for `name`.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Render a field as text. Missing and null fields yield `None`.
    pub fn text(&self, name: &str) -> Option<std::borrow::Cow<'_, str>> {
        self.fields.get(name).and_then(FieldValue::to_text)
    }

    /// Field names in arbitrary order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// All fields.
    pub fn fields(&self) -> &HashMap<String, FieldValue> {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (name, value) in iter {
            doc.add_field(name, value.into());
        }
        doc
    }
}

/// Builder for [`Document`].
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        DocumentBuilder {
            document: Document::new(),
        }
    }

    pub fn add_text<S: Into<String>, T: Into<String>>(mut self, name: S, value: T) -> Self {
        self.document.add_field(name, FieldValue::Text(value.into()));
        self
    }

    pub fn add_integer<S: Into<String>>(mut self, name: S, value: i64) -> Self {
        self.document.add_field(name, FieldValue::Integer(value));
        self
    }

    pub fn add_float<S: Into<String>>(mut self, name: S, value: f64) -> Self {
        self.document.add_field(name, FieldValue::Float(value));
        self
    }

    pub fn add_boolean<S: Into<String>>(mut self, name: S, value: bool) -> Self {
        self.document.add_field(name, FieldValue::Boolean(value));
        self
    }

    pub fn add_null<S: Into<String>>(mut self, name: S) -> Self {
        self.document.add_field(name, FieldValue::Null);
        self
    }

    pub fn add_field<S: Into<String>>(mut self, name: S, value: FieldValue) -> Self {
        self.document.add_field(name, value);
        self
    }

    pub fn build(self) -> Document {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_accessors() {
        let doc = Document::builder()
            .add_text("title", "Guide")
            .add_float("price", 9.5)
            .add_boolean("active", true)
            .add_null("notes")
            .build();

        assert_eq!(doc.len(), 4);
        assert!(doc.has_field("notes"));
        assert!(doc.text("notes").is_none());
        assert_eq!(doc.text("price").as_deref(), Some("9.5"));
        assert_eq!(doc.get_field("title").and_then(|v| v.as_text()), Some("Guide"));
    }

    #[test]
    fn test_from_iter() {
        let doc: Document = [("a", "x"), ("b", "y")].into_iter().collect();
        let mut names: Vec<&str> = doc.field_names().collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }
}
