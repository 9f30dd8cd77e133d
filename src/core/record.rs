//! Projection between documents and the flat field records edited by forms

use serde_yaml::{Mapping, Value};

use super::category::{Category, FormKind};
use super::document::Document;
use super::error::{StoreError, StoreResult};

/// Ordered key/value rows of a mapping field.
///
/// Rows may carry a blank key while being edited; such rows are dropped
/// when the document is rebuilt.
pub type FieldRows = Vec<(String, String)>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterRecord {
    pub name: String,
    pub species: String,
    pub age: String,
    pub physical_attributes: FieldRows,
    pub personality: FieldRows,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynopsisRecord {
    pub title: String,
    pub content: String,
}

/// Plans are edited as one entry per line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuturePlansRecord {
    pub plans_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NarouPostRecord {
    pub episode_title: String,
    pub posted_date: String,
    pub content: String,
}

/// Editable fields of a category with a specialized form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRecord {
    Character(CharacterRecord),
    Synopsis(SynopsisRecord),
    FuturePlans(FuturePlansRecord),
    NarouPost(NarouPostRecord),
}

impl FieldRecord {
    pub fn kind(&self) -> FormKind {
        match self {
            FieldRecord::Character(_) => FormKind::Character,
            FieldRecord::Synopsis(_) => FormKind::Synopsis,
            FieldRecord::FuturePlans(_) => FormKind::FuturePlans,
            FieldRecord::NarouPost(_) => FormKind::NarouPost,
        }
    }
}

/// Project a document onto its category's form.
///
/// Missing keys take defaults; keys the form does not know are dropped.
pub fn to_fields(category: Category, document: &Document) -> StoreResult<FieldRecord> {
    let kind = category.form().ok_or(StoreError::NoSpecializedForm(category))?;

    let record = match kind {
        FormKind::Character => FieldRecord::Character(CharacterRecord {
            name: string_field(document, "name"),
            species: string_field(document, "species"),
            age: string_field(document, "age"),
            physical_attributes: rows_field(document, "physical_attributes"),
            personality: rows_field(document, "personality"),
        }),
        FormKind::Synopsis => FieldRecord::Synopsis(SynopsisRecord {
            title: string_field(document, "title"),
            content: string_field(document, "content"),
        }),
        FormKind::FuturePlans => FieldRecord::FuturePlans(FuturePlansRecord {
            plans_text: plans_field(document, "plans").join("\n"),
        }),
        FormKind::NarouPost => FieldRecord::NarouPost(NarouPostRecord {
            episode_title: string_field(document, "episode_title"),
            posted_date: string_field(document, "posted_date"),
            content: string_field(document, "content"),
        }),
    };
    Ok(record)
}

/// Rebuild a whole document from form fields, using only the form's keys
pub fn from_fields(category: Category, record: &FieldRecord) -> StoreResult<Document> {
    let kind = category.form().ok_or(StoreError::NoSpecializedForm(category))?;
    if kind != record.kind() {
        return Err(StoreError::validation(format!(
            "{:?} fields cannot be saved as {}",
            record.kind(),
            category
        )));
    }

    let mut doc = Document::new();
    match record {
        FieldRecord::Character(r) => {
            doc.insert("name", r.name.as_str());
            doc.insert("species", r.species.as_str());
            doc.insert("age", r.age.as_str());
            doc.insert("physical_attributes", rows_to_mapping(&r.physical_attributes));
            doc.insert("personality", rows_to_mapping(&r.personality));
        }
        FieldRecord::Synopsis(r) => {
            doc.insert("title", r.title.as_str());
            doc.insert("content", r.content.as_str());
        }
        FieldRecord::FuturePlans(r) => {
            doc.insert("plans", split_plans(&r.plans_text));
        }
        FieldRecord::NarouPost(r) => {
            doc.insert("episode_title", r.episode_title.as_str());
            doc.insert("posted_date", r.posted_date.as_str());
            doc.insert("content", r.content.as_str());
        }
    }
    Ok(doc)
}

/// One plan per line; blank lines are discarded and order is kept.
///
/// Plans are edited as plain lines, so a stored entry that is empty or
/// spans several lines does not survive a form save: it is dropped or
/// split into one entry per line.
pub fn split_plans(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Convert mapping rows into a mapping, dropping blank keys
pub fn rows_to_mapping(rows: &[(String, String)]) -> Mapping {
    let mut mapping = Mapping::new();
    for (key, value) in rows {
        if key.trim().is_empty() {
            continue;
        }
        mapping.insert(Value::String(key.clone()), Value::String(value.clone()));
    }
    mapping
}

/// Convert a mapping into editable rows
pub fn mapping_to_rows(mapping: &Mapping) -> FieldRows {
    mapping
        .iter()
        .map(|(k, v)| (value_to_text(k), value_to_text(v)))
        .collect()
}

/// Render a value as the text shown in a single input field
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
            serde_yaml::to_string(value)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default()
        }
    }
}

fn string_field(document: &Document, key: &str) -> String {
    document.get(key).map(value_to_text).unwrap_or_default()
}

fn rows_field(document: &Document, key: &str) -> FieldRows {
    match document.get(key) {
        Some(Value::Mapping(mapping)) => mapping_to_rows(mapping),
        _ => Vec::new(),
    }
}

fn plans_field(document: &Document, key: &str) -> Vec<String> {
    match document.get(key) {
        Some(Value::Sequence(items)) => items.iter().map(value_to_text).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(&str, &str)]) -> FieldRows {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn character_doc() -> Document {
        Document::parse(
            "name: エルナ\nspecies: elf\nage: '120'\nphysical_attributes:\n  height: tall\n  hair: silver\npersonality:\n  temper: calm\n",
        )
        .unwrap()
    }

    #[test]
    fn test_character_projection() {
        let record = to_fields(Category::Character, &character_doc()).unwrap();
        let FieldRecord::Character(c) = record else {
            panic!("expected character record");
        };
        assert_eq!(c.name, "エルナ");
        assert_eq!(c.age, "120");
        assert_eq!(c.physical_attributes, rows(&[("height", "tall"), ("hair", "silver")]));
        assert_eq!(c.personality, rows(&[("temper", "calm")]));
    }

    #[test]
    fn test_defaults_for_missing_keys() {
        let record = to_fields(Category::Character, &Document::new()).unwrap();
        assert_eq!(record, FieldRecord::Character(CharacterRecord::default()));

        let record = to_fields(Category::FuturePlans, &Document::new()).unwrap();
        assert_eq!(record, FieldRecord::FuturePlans(FuturePlansRecord::default()));
    }

    #[test]
    fn test_numbers_render_as_text() {
        let doc = Document::parse("name: Bo\nage: 17\n").unwrap();
        let FieldRecord::Character(c) = to_fields(Category::Character, &doc).unwrap() else {
            panic!("expected character record");
        };
        assert_eq!(c.age, "17");
    }

    #[test]
    fn test_projection_idempotence() {
        let docs = [
            (Category::Character, character_doc()),
            (Category::Synopsis, Document::parse("title: 序章\ncontent: |\n  first line\n  second line\n").unwrap()),
            (Category::FuturePlans, Document::parse("plans:\n- go home\n- buy milk\n").unwrap()),
            (
                Category::NarouPost,
                Document::parse("episode_title: 第1話\nposted_date: '2025-04-23'\ncontent: 本文\n").unwrap(),
            ),
        ];

        for (category, doc) in docs {
            let record = to_fields(category, &doc).unwrap();
            assert_eq!(from_fields(category, &record).unwrap(), doc, "{}", category);
        }
    }

    #[test]
    fn test_unknown_keys_dropped() {
        let doc = Document::parse("title: T\ncontent: C\nnotes: extra\n").unwrap();
        let record = to_fields(Category::Synopsis, &doc).unwrap();
        let rebuilt = from_fields(Category::Synopsis, &record).unwrap();
        assert!(rebuilt.get("notes").is_none());
        assert_eq!(rebuilt.len(), 2);
    }

    #[test]
    fn test_blank_keys_dropped() {
        let record = FieldRecord::Character(CharacterRecord {
            physical_attributes: rows(&[("", "ignored"), ("height", "tall"), ("  ", "also ignored")]),
            ..Default::default()
        });
        let doc = from_fields(Category::Character, &record).unwrap();
        let attrs = doc.get("physical_attributes").and_then(Value::as_mapping).unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("height").and_then(Value::as_str), Some("tall"));
    }

    #[test]
    fn test_duplicate_keys_last_value_wins() {
        let mapping = rows_to_mapping(&rows(&[("a", "1"), ("b", "2"), ("a", "3")]));
        let keys: Vec<_> = mapping.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(mapping.get("a").and_then(Value::as_str), Some("3"));
    }

    #[test]
    fn test_plans_splitting() {
        assert_eq!(split_plans("go home\n\nbuy milk\n  \n"), vec!["go home", "buy milk"]);

        let record = FieldRecord::FuturePlans(FuturePlansRecord {
            plans_text: "go home\n\nbuy milk\n  \n".to_string(),
        });
        let doc = from_fields(Category::FuturePlans, &record).unwrap();
        assert_eq!(doc, Document::parse("plans: [go home, buy milk]").unwrap());
    }

    #[test]
    fn test_multiline_and_empty_plans_flattened_by_form() {
        let doc = Document::parse("plans:\n- \"first\\nsecond\"\n- ''\n- third\n").unwrap();
        let record = to_fields(Category::FuturePlans, &doc).unwrap();
        let rebuilt = from_fields(Category::FuturePlans, &record).unwrap();
        assert_eq!(rebuilt, Document::parse("plans: [first, second, third]").unwrap());
    }

    #[test]
    fn test_category_without_form() {
        let err = to_fields(Category::Economy, &Document::new()).unwrap_err();
        assert!(matches!(err, StoreError::NoSpecializedForm(Category::Economy)));
    }

    #[test]
    fn test_mismatched_record_rejected() {
        let record = FieldRecord::Synopsis(SynopsisRecord::default());
        let err = from_fields(Category::NarouPost, &record).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_nested_value_in_string_field() {
        let doc = Document::parse("title: [a, b]\n").unwrap();
        let FieldRecord::Synopsis(s) = to_fields(Category::Synopsis, &doc).unwrap() else {
            panic!("expected synopsis record");
        };
        assert_eq!(s.title, "- a\n- b");
    }
}
