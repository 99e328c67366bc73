use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod extract;
mod rebuild;
mod schedule;

pub use extract::{build_record, extract_quotes};
pub use rebuild::{RebuildReport, rebuild_index};
pub use schedule::ReindexSchedule;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    pub text: String,
    pub line: usize,
}

/// Headings bucketed by level; levels 4 to 6 share `h4`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingBuckets {
    pub h1: Vec<HeadingEntry>,
    pub h2: Vec<HeadingEntry>,
    pub h3: Vec<HeadingEntry>,
    pub h4: Vec<HeadingEntry>,
}

impl HeadingBuckets {
    pub fn push(&mut self, level: u8, entry: HeadingEntry) {
        match level {
            1 => self.h1.push(entry),
            2 => self.h2.push(entry),
            3 => self.h3.push(entry),
            4..=6 => self.h4.push(entry),
            _ => {}
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.h1.len() + self.h2.len() + self.h3.len() + self.h4.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub path: String,
    pub file_name: String,
    pub directory: String,
    pub content: String,
    pub tags: Vec<String>,
    pub headings: HeadingBuckets,
    pub quotes: Vec<String>,
}

/// Immutable path-keyed document map. Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    records: Vec<DocumentRecord>,
    by_path: HashMap<Arc<str>, usize>,
    indexed_at: Option<DateTime<Utc>>,
}

impl DocumentIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record; a record with the same path is replaced in place.
    pub fn insert(&mut self, record: DocumentRecord) {
        if let Some(slot) = self.by_path.get(record.path.as_str()) {
            self.records[*slot] = record;
            return;
        }
        self.by_path
            .insert(Arc::from(record.path.as_str()), self.records.len());
        self.records.push(record);
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&DocumentRecord> {
        self.by_path.get(path).map(|slot| &self.records[*slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub const fn indexed_at(&self) -> Option<DateTime<Utc>> {
        self.indexed_at
    }

    pub(crate) fn set_indexed_at(&mut self, at: DateTime<Utc>) {
        self.indexed_at = Some(at);
    }
}

/// Holder that publishes whole index snapshots. Readers keep the snapshot
/// they cloned even after a newer one is published.
#[derive(Debug, Clone, Default)]
pub struct SharedIndex {
    current: Arc<RwLock<Arc<DocumentIndex>>>,
}

impl SharedIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<DocumentIndex> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn publish(&self, index: DocumentIndex) {
        let next = Arc::new(index);
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}
