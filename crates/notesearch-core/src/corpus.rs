use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::error::{NoteSearchError, Result};
use crate::parse::{DocumentMetadata, parse_markdown_metadata};

pub const ROOT_DIRECTORY: &str = "/";

/// Identity of one indexable document inside a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentHandle {
    /// Corpus-relative path with `/` separators, e.g. `Projects/plan.md`.
    pub path: String,
    /// File name including its extension.
    pub name: String,
    /// Parent folder path; `None` for documents at the corpus root.
    pub parent: Option<String>,
}

impl DocumentHandle {
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let (parent, name) = match path.rsplit_once('/') {
            Some((parent, name)) if !parent.is_empty() => {
                (Some(parent.to_string()), name.to_string())
            }
            Some((_, name)) => (None, name.to_string()),
            None => (None, path.clone()),
        };
        Self { path, name, parent }
    }

    #[must_use]
    pub fn directory(&self) -> &str {
        self.parent.as_deref().unwrap_or(ROOT_DIRECTORY)
    }

    /// File name without its extension; used as the link target.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.name,
        }
    }

    #[must_use]
    pub fn is_within_any(&self, prefixes: &[String]) -> bool {
        prefixes.iter().any(|prefix| self.path.starts_with(prefix.as_str()))
    }
}

/// Host-provided access to the documents under management.
pub trait Corpus {
    fn list_documents(&self) -> Result<Vec<DocumentHandle>>;

    fn read_text(&self, doc: &DocumentHandle) -> Result<String>;

    /// Structured metadata, or `None` when it is not available.
    fn metadata(&self, doc: &DocumentHandle) -> Option<DocumentMetadata>;

    fn contains(&self, path: &str) -> bool;

    fn write_text(&self, doc: &DocumentHandle, _content: &str) -> Result<()> {
        Err(NoteSearchError::Unsupported(format!(
            "corpus is read-only: {}",
            doc.path
        )))
    }
}

/// In-memory corpus keeping documents in insertion order.
#[derive(Debug, Default)]
pub struct MemoryCorpus {
    docs: RefCell<Vec<(DocumentHandle, String)>>,
}

impl MemoryCorpus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the document at `path`.
    pub fn insert(&self, path: &str, content: &str) {
        let mut docs = self.docs.borrow_mut();
        if let Some(slot) = docs.iter_mut().find(|(doc, _)| doc.path == path) {
            slot.1 = content.to_string();
            return;
        }
        docs.push((DocumentHandle::from_path(path), content.to_string()));
    }

    pub fn remove(&self, path: &str) {
        self.docs.borrow_mut().retain(|(doc, _)| doc.path != path);
    }
}

impl Corpus for MemoryCorpus {
    fn list_documents(&self) -> Result<Vec<DocumentHandle>> {
        Ok(self.docs.borrow().iter().map(|(doc, _)| doc.clone()).collect())
    }

    fn read_text(&self, doc: &DocumentHandle) -> Result<String> {
        self.docs
            .borrow()
            .iter()
            .find(|(candidate, _)| candidate.path == doc.path)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| NoteSearchError::NotFound(doc.path.clone()))
    }

    fn metadata(&self, doc: &DocumentHandle) -> Option<DocumentMetadata> {
        self.read_text(doc)
            .ok()
            .map(|content| parse_markdown_metadata(&content))
    }

    fn contains(&self, path: &str) -> bool {
        self.docs.borrow().iter().any(|(doc, _)| doc.path == path)
    }

    fn write_text(&self, doc: &DocumentHandle, content: &str) -> Result<()> {
        if !self.contains(&doc.path) {
            return Err(NoteSearchError::NotFound(doc.path.clone()));
        }
        self.insert(&doc.path, content);
        Ok(())
    }
}
