//! Linear load, edit, save flow over a single document

use super::category::Category;
use super::document::Document;
use super::error::{StoreError, StoreResult};
use super::record::{self, FieldRecord};
use super::store::DocumentStore;

/// An open document with its raw text buffer and, when the category has
/// one, its form fields.
///
/// Edits stay local until one of the save methods succeeds.
#[derive(Debug, Clone)]
pub struct EditingSession {
    category: Category,
    filename: String,
    document: Document,
    saved_text: String,
    /// Raw YAML edit buffer
    pub raw_text: String,
    /// Form fields, present only for categories with a specialized form
    pub form: Option<FieldRecord>,
}

impl EditingSession {
    /// Load a document and prepare both editing views
    pub fn open(store: &DocumentStore, category: Category, filename: &str) -> StoreResult<Self> {
        let document = store.load(category, filename)?;
        Self::from_document(category, filename.to_string(), document)
    }

    fn from_document(category: Category, filename: String, document: Document) -> StoreResult<Self> {
        let saved_text = document.to_yaml()?;
        let form = match category.form() {
            Some(_) => Some(record::to_fields(category, &document)?),
            None => None,
        };

        Ok(Self {
            category,
            filename,
            document,
            raw_text: saved_text.clone(),
            saved_text,
            form,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The document as last loaded or saved
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Whether the raw buffer differs from the stored text
    pub fn is_dirty(&self) -> bool {
        self.raw_text != self.saved_text
    }

    /// Whether the form fields differ from the stored document
    pub fn form_is_dirty(&self) -> bool {
        match &self.form {
            Some(form) => record::to_fields(self.category, &self.document)
                .map(|stored| &stored != form)
                .unwrap_or(false),
            None => false,
        }
    }

    /// Replace the document with the parsed raw buffer.
    ///
    /// On a parse or validation error the stored file and this session's
    /// document are left untouched.
    pub fn save_raw(&mut self, store: &DocumentStore) -> StoreResult<()> {
        let document = Document::parse(&self.raw_text)?;
        self.commit(store, document)
    }

    /// Rebuild the document from the form fields and save it
    pub fn save_form(&mut self, store: &DocumentStore) -> StoreResult<()> {
        let Some(form) = &self.form else {
            return Err(StoreError::NoSpecializedForm(self.category));
        };
        let document = record::from_fields(self.category, form)?;
        self.commit(store, document)
    }

    /// Discard local edits and re-read the stored document
    pub fn reload(&mut self, store: &DocumentStore) -> StoreResult<()> {
        *self = Self::open(store, self.category, &self.filename)?;
        Ok(())
    }

    /// Reset both buffers to the last loaded document without touching disk
    pub fn revert(&mut self) -> StoreResult<()> {
        let document = self.document.clone();
        *self = Self::from_document(self.category, self.filename.clone(), document)?;
        Ok(())
    }

    fn commit(&mut self, store: &DocumentStore, document: Document) -> StoreResult<()> {
        store.save(self.category, &self.filename, &document)?;
        *self = Self::from_document(self.category, self.filename.clone(), document)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{CharacterRecord, FuturePlansRecord};
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, DocumentStore) {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        store.ensure_storage_layout().unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_missing() {
        let (_dir, store) = setup();
        let err = EditingSession::open(&store, Category::World, "none.yml").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_raw_edit_saves_whole_document() {
        let (_dir, store) = setup();
        store.create(Category::World, "kingdom").unwrap();

        let mut session = EditingSession::open(&store, Category::World, "kingdom.yml").unwrap();
        assert!(session.form.is_none());
        assert!(!session.is_dirty());

        session.raw_text = "name: 王国\nregions:\n  - north\n  - south\n".to_string();
        assert!(session.is_dirty());
        session.save_raw(&store).unwrap();
        assert!(!session.is_dirty());

        let stored = store.load(Category::World, "kingdom.yml").unwrap();
        assert_eq!(&stored, session.document());
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn test_invalid_raw_edit_does_not_mutate_storage() {
        let (_dir, store) = setup();
        let mut original = Document::new();
        original.insert("name", "keep");
        store.save(Category::Map, "m.yml", &original).unwrap();

        let mut session = EditingSession::open(&store, Category::Map, "m.yml").unwrap();
        for bad in ["name: [unclosed", "- just\n- a list\n", "42"] {
            session.raw_text = bad.to_string();
            assert!(session.save_raw(&store).is_err());
            assert_eq!(store.load(Category::Map, "m.yml").unwrap(), original);
            assert_eq!(session.document(), &original);
        }
    }

    #[test]
    fn test_blank_raw_edit_does_not_wipe_document() {
        let (_dir, store) = setup();
        let mut original = Document::new();
        original.insert("name", "keep");
        store.save(Category::Character, "hero.yml", &original).unwrap();

        let mut session = EditingSession::open(&store, Category::Character, "hero.yml").unwrap();
        for blank in ["", "  \n"] {
            session.raw_text = blank.to_string();
            assert!(session.is_dirty());
            let err = session.save_raw(&store).unwrap_err();
            assert!(matches!(err, StoreError::Validation(_)));
            assert_eq!(store.load(Category::Character, "hero.yml").unwrap(), original);
        }
    }

    #[test]
    fn test_form_edit_replaces_document() {
        let (_dir, store) = setup();
        let doc = Document::parse("name: Old\nnotes: dropped on form save\n").unwrap();
        store.save(Category::Character, "hero.yml", &doc).unwrap();

        let mut session = EditingSession::open(&store, Category::Character, "hero.yml").unwrap();
        let Some(FieldRecord::Character(c)) = session.form.as_mut() else {
            panic!("expected character form");
        };
        c.name = "New".to_string();
        c.personality.push(("temper".to_string(), "fiery".to_string()));
        c.personality.push((String::new(), "placeholder".to_string()));
        assert!(session.form_is_dirty());

        session.save_form(&store).unwrap();
        assert!(!session.form_is_dirty());

        let stored = store.load(Category::Character, "hero.yml").unwrap();
        assert!(stored.get("notes").is_none());
        assert_eq!(
            session.form,
            Some(FieldRecord::Character(CharacterRecord {
                name: "New".to_string(),
                personality: vec![("temper".to_string(), "fiery".to_string())],
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_plans_form() {
        let (_dir, store) = setup();
        store.create(Category::FuturePlans, "ideas").unwrap();
        let mut session = EditingSession::open(&store, Category::FuturePlans, "ideas.yml").unwrap();
        session.form = Some(FieldRecord::FuturePlans(FuturePlansRecord {
            plans_text: "go home\n\nbuy milk\n  \n".to_string(),
        }));
        session.save_form(&store).unwrap();

        let stored = store.load(Category::FuturePlans, "ideas.yml").unwrap();
        assert_eq!(stored, Document::parse("plans: [go home, buy milk]").unwrap());
    }

    #[test]
    fn test_revert_and_reload() {
        let (_dir, store) = setup();
        store.create(Category::Synopsis, "s").unwrap();
        let mut session = EditingSession::open(&store, Category::Synopsis, "s.yml").unwrap();

        session.raw_text = "title: draft".to_string();
        session.revert().unwrap();
        assert!(!session.is_dirty());

        let mut other = Document::new();
        other.insert("title", "from elsewhere");
        store.save(Category::Synopsis, "s.yml", &other).unwrap();
        session.reload(&store).unwrap();
        assert_eq!(session.document(), &other);
    }
}
