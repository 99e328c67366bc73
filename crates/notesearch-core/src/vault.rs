use std::fmt::Display;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::corpus::{Corpus, DocumentHandle};
use crate::error::{NoteSearchError, Result};
use crate::parse::{DocumentMetadata, parse_markdown_metadata};

/// Filesystem corpus: every markdown file below `root`, hidden entries skipped.
#[derive(Debug, Clone)]
pub struct LocalVault {
    root: PathBuf,
}

impl LocalVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let mut out = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(segment) => out.push(segment),
                Component::CurDir => {}
                _ => return Err(NoteSearchError::PathTraversal(relative.to_string())),
            }
        }
        Ok(out)
    }

    fn relative_path(&self, path: &Path) -> Result<String> {
        let relative = path.strip_prefix(&self.root).map_err(|_| {
            NoteSearchError::Validation(format!("path is outside vault: {}", path.display()))
        })?;
        Ok(relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(value) => Some(value.to_string_lossy().to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"))
    }

    /// Keeps markdown files from a directory walk. Entries the walk could not
    /// read are logged and skipped so one bad folder never hides the rest.
    fn collect_documents<E: Display>(
        &self,
        entries: impl IntoIterator<Item = std::result::Result<DirEntry, E>>,
    ) -> Vec<DocumentHandle> {
        let mut docs = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable vault entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_markdown(entry.path()) {
                continue;
            }
            match self.relative_path(entry.path()) {
                Ok(path) => docs.push(DocumentHandle::from_path(path)),
                Err(err) => {
                    warn!(path = %entry.path().display(), error = %err, "skipping vault entry");
                }
            }
        }
        docs
    }

    fn ensure_path_within_root(&self, path: &Path) -> Result<()> {
        let root = fs::canonicalize(&self.root)?;
        let canonical = fs::canonicalize(path)?;
        if !canonical.starts_with(&root) {
            return Err(NoteSearchError::PathTraversal(path.display().to_string()));
        }
        Ok(())
    }
}

impl Corpus for LocalVault {
    fn list_documents(&self) -> Result<Vec<DocumentHandle>> {
        if !self.root.is_dir() {
            return Err(NoteSearchError::NotFound(self.root.display().to_string()));
        }
        let entries = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));
        Ok(self.collect_documents(entries))
    }

    fn read_text(&self, doc: &DocumentHandle) -> Result<String> {
        let path = self.resolve(&doc.path)?;
        if !path.is_file() {
            return Err(NoteSearchError::NotFound(doc.path.clone()));
        }
        self.ensure_path_within_root(&path)?;
        Ok(fs::read_to_string(path)?)
    }

    fn metadata(&self, doc: &DocumentHandle) -> Option<DocumentMetadata> {
        self.read_text(doc)
            .ok()
            .map(|content| parse_markdown_metadata(&content))
    }

    fn contains(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|resolved| resolved.is_file())
    }

    fn write_text(&self, doc: &DocumentHandle, content: &str) -> Result<()> {
        let path = self.resolve(&doc.path)?;
        if !path.is_file() {
            return Err(NoteSearchError::NotFound(doc.path.clone()));
        }
        self.ensure_path_within_root(&path)?;
        fs::write(path, content)?;
        Ok(())
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "md" | "markdown"))
}
