//! Structured documents and their YAML text form

use serde_yaml::{Mapping, Value};

use super::error::{StoreError, StoreResult};

/// A parsed document: a top-level mapping of arbitrarily nested values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Mapping,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Look up a top-level key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Insert a top-level key, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.root.insert(Value::String(key.into()), value.into());
    }

    /// Parse YAML text into a document.
    ///
    /// Syntax errors are `MalformedDocument`; well-formed input whose top
    /// level is not a mapping, including blank text, is a `Validation` error.
    pub fn parse(text: &str) -> StoreResult<Self> {
        if text.trim().is_empty() {
            return Err(StoreError::validation("document text is empty"));
        }

        let value: Value = serde_yaml::from_str(text).map_err(|e| StoreError::MalformedDocument {
            filename: String::new(),
            reason: e.to_string(),
        })?;

        match value {
            Value::Mapping(root) => Ok(Self { root }),
            other => Err(StoreError::validation(format!(
                "top level must be a mapping, found {}",
                kind_name(&other)
            ))),
        }
    }

    /// Render as block-style YAML with Unicode left unescaped
    pub fn to_yaml(&self) -> StoreResult<String> {
        serde_yaml::to_string(&self.root).map_err(|e| StoreError::MalformedDocument {
            filename: String::new(),
            reason: e.to_string(),
        })
    }

    /// Pretty JSON for the read-only data view.
    ///
    /// Falls back to YAML when a key cannot be represented in JSON.
    pub fn to_display_json(&self) -> String {
        serde_json::to_string_pretty(&self.root)
            .or_else(|_| serde_yaml::to_string(&self.root))
            .unwrap_or_default()
    }
}

/// Short name of a value's kind for error messages
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mapping() {
        let doc = Document::parse("name: アリス\nage: 17\ntags: [a, b]\n").unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.get("name").and_then(Value::as_str), Some("アリス"));
        assert_eq!(doc.get("age").and_then(Value::as_u64), Some(17));
    }

    #[test]
    fn test_blank_text_rejected() {
        for blank in ["", "  \n\n"] {
            let err = Document::parse(blank).unwrap_err();
            assert!(matches!(err, StoreError::Validation(ref m) if m.contains("empty")));
        }
    }

    #[test]
    fn test_scalar_top_level_rejected() {
        let err = Document::parse("just a string").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = Document::parse("- a\n- b\n").unwrap_err();
        assert!(matches!(err, StoreError::Validation(ref m) if m.contains("sequence")));
    }

    #[test]
    fn test_syntax_error_is_malformed() {
        let err = Document::parse("key: [unclosed").unwrap_err();
        assert!(matches!(err, StoreError::MalformedDocument { .. }));
    }

    #[test]
    fn test_yaml_keeps_unicode_unescaped() {
        let mut doc = Document::new();
        doc.insert("title", "異世界の旅");
        let text = doc.to_yaml().unwrap();
        assert!(text.contains("異世界の旅"));
        assert_eq!(Document::parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_empty_document_text_round_trips() {
        let text = Document::new().to_yaml().unwrap();
        assert_eq!(Document::parse(&text).unwrap(), Document::new());
    }

    #[test]
    fn test_display_json() {
        let mut doc = Document::new();
        doc.insert("title", "Plot");
        let json = doc.to_display_json();
        assert!(json.contains("\"title\": \"Plot\""));
    }
}
