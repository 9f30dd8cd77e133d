//! Flat-file document store: one folder per category, one YAML file per document

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use walkdir::WalkDir;

use super::category::Category;
use super::document::Document;
use super::error::{StoreError, StoreResult};

/// Extensions recognized as documents
pub const DOCUMENT_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Extension appended to new filenames that lack one
pub const DEFAULT_EXTENSION: &str = "yml";

/// Document store rooted at a data directory.
///
/// Saves are atomic but unsynchronized: concurrent writers to the same
/// document resolve last-write-wins.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root and every category folder. Safe to call repeatedly.
    pub fn ensure_storage_layout(&self) -> StoreResult<()> {
        for category in Category::ALL {
            std::fs::create_dir_all(self.folder_for(category))?;
        }
        tracing::info!("Storage layout ready at {}", self.root.display());
        Ok(())
    }

    /// Folder holding a category's documents
    pub fn folder_for(&self, category: Category) -> PathBuf {
        self.root.join(category.folder_name())
    }

    /// Full path of a document. The filename is validated but not normalized.
    pub fn path_for(&self, category: Category, filename: &str) -> StoreResult<PathBuf> {
        validate_filename(filename)?;
        Ok(self.folder_for(category).join(filename))
    }

    /// Document filenames in a category, sorted lexically
    pub fn list_documents(&self, category: Category) -> Vec<String> {
        let folder = self.folder_for(category);
        let mut names: Vec<String> = WalkDir::new(&folder)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    let missing = e.depth() == 0
                        && e.io_error().map(|io| io.kind()) == Some(std::io::ErrorKind::NotFound);
                    if !missing {
                        tracing::warn!("Skipping unreadable entry in {}: {}", folder.display(), e);
                    }
                    None
                }
            })
            // follows symlinks, matching what `load` accepts
            .filter(|e| e.path().is_file())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|name| has_document_extension(name))
            .collect();
        names.sort();

        tracing::debug!("Listed {} documents in {}", names.len(), category);
        names
    }

    /// Read and parse one document
    pub fn load(&self, category: Category, filename: &str) -> StoreResult<Document> {
        let path = self.path_for(category, filename)?;
        if !path.is_file() {
            return Err(StoreError::NotFound {
                category,
                filename: filename.to_string(),
            });
        }

        let text = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound {
                category,
                filename: filename.to_string(),
            },
            std::io::ErrorKind::InvalidData => StoreError::MalformedDocument {
                filename: filename.to_string(),
                reason: "file is not valid UTF-8".to_string(),
            },
            _ => StoreError::Io(e),
        })?;

        if text.trim().is_empty() {
            tracing::debug!("Loaded blank document: {}", path.display());
            return Ok(Document::new());
        }

        let doc = Document::parse(&text).map_err(|e| match e {
            StoreError::MalformedDocument { reason, .. } => StoreError::MalformedDocument {
                filename: filename.to_string(),
                reason,
            },
            StoreError::Validation(reason) => StoreError::MalformedDocument {
                filename: filename.to_string(),
                reason,
            },
            other => other,
        })?;

        tracing::debug!("Loaded document: {}", path.display());
        Ok(doc)
    }

    /// Replace a document's whole content.
    ///
    /// The new content is written to a sibling temp file and renamed over
    /// the target, so readers see either the old or the new file.
    pub fn save(&self, category: Category, filename: &str, document: &Document) -> StoreResult<()> {
        self.write(category, filename, document, true)
    }

    /// Create an empty document, returning the normalized filename.
    ///
    /// Never overwrites: an existing document of the same name is an error.
    pub fn create(&self, category: Category, filename: &str) -> StoreResult<String> {
        let filename = normalize_filename(filename)?;

        if self.list_documents(category).contains(&filename) {
            return Err(StoreError::AlreadyExists { category, filename });
        }

        self.write(category, &filename, &Document::new(), false)?;
        tracing::info!("Created document {} in {}", filename, category);
        Ok(filename)
    }

    fn write(&self, category: Category, filename: &str, document: &Document, overwrite: bool) -> StoreResult<()> {
        let path = self.path_for(category, filename)?;
        let text = document.to_yaml().map_err(|e| match e {
            StoreError::MalformedDocument { reason, .. } => StoreError::MalformedDocument {
                filename: filename.to_string(),
                reason,
            },
            other => other,
        })?;

        let folder = self.folder_for(category);
        std::fs::create_dir_all(&folder)?;

        let mut tmp = NamedTempFile::new_in(&folder)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        let persisted = if overwrite {
            tmp.persist(&path)
        } else {
            tmp.persist_noclobber(&path)
        };
        persisted.map_err(|e| match e.error.kind() {
            std::io::ErrorKind::AlreadyExists if !overwrite => StoreError::AlreadyExists {
                category,
                filename: filename.to_string(),
            },
            _ => StoreError::Io(e.error),
        })?;

        tracing::info!("Saved document: {}", path.display());
        Ok(())
    }
}

/// Whether a filename carries a recognized document extension
pub fn has_document_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Trim, validate, and append the default extension if missing
pub fn normalize_filename(filename: &str) -> StoreResult<String> {
    let filename = filename.trim();
    if filename.is_empty() {
        return Err(StoreError::validation("filename must not be empty"));
    }
    let normalized = if has_document_extension(filename) {
        filename.to_string()
    } else {
        format!("{}.{}", filename, DEFAULT_EXTENSION)
    };
    validate_filename(&normalized)?;
    Ok(normalized)
}

/// Reject names that could escape the category folder or that lack a
/// document extension
fn validate_filename(filename: &str) -> StoreResult<()> {
    if filename.is_empty() {
        return Err(StoreError::validation("filename must not be empty"));
    }
    if filename.contains(|c: char| c == '/' || c == '\\') {
        return Err(StoreError::validation(format!(
            "filename must not contain path separators: {}",
            filename
        )));
    }
    if filename.starts_with('.') {
        return Err(StoreError::validation(format!(
            "filename must not start with '.': {}",
            filename
        )));
    }
    if !has_document_extension(filename) {
        return Err(StoreError::validation(format!(
            "filename must end in .{}: {}",
            DOCUMENT_EXTENSIONS.join(" or ."),
            filename
        )));
    }
    Ok(())
}
