use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::corpus::Corpus;
use crate::error::Result;

use super::{DocumentIndex, build_record};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildReport {
    pub indexed: usize,
    pub excluded: usize,
    pub skipped: usize,
    pub elapsed_ms: u128,
    pub indexed_at: DateTime<Utc>,
}

/// Reads every non-excluded document into a fresh index.
///
/// Documents are read one at a time. A document that fails to read is
/// logged and skipped; only a failure to enumerate the corpus is an error.
pub fn rebuild_index(
    corpus: &dyn Corpus,
    excluded_prefixes: &[String],
) -> Result<(DocumentIndex, RebuildReport)> {
    let started = Instant::now();
    let indexed_at = Utc::now();
    info!(excluded = ?excluded_prefixes, "rebuilding search index");

    let mut index = DocumentIndex::new();
    let mut excluded = 0usize;
    let mut skipped = 0usize;
    for doc in corpus.list_documents()? {
        if doc.is_within_any(excluded_prefixes) {
            excluded += 1;
            continue;
        }
        let content = match corpus.read_text(&doc) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %doc.path, error = %err, "skipping unreadable document");
                skipped += 1;
                continue;
            }
        };
        let metadata = corpus.metadata(&doc);
        index.insert(build_record(&doc, content, metadata.as_ref()));
    }
    index.set_indexed_at(indexed_at);

    let report = RebuildReport {
        indexed: index.len(),
        excluded,
        skipped,
        elapsed_ms: started.elapsed().as_millis(),
        indexed_at,
    };
    info!(
        indexed = report.indexed,
        excluded = report.excluded,
        skipped = report.skipped,
        elapsed_ms = report.elapsed_ms,
        "search index rebuilt"
    );
    Ok((index, report))
}
