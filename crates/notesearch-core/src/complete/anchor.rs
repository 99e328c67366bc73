use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::corpus::{Corpus, DocumentHandle};
use crate::error::{NoteSearchError, Result};

use super::query::split_block_marker;

/// A block reference that must resolve inside its source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockAnchor {
    pub path: String,
    pub line: usize,
    pub block_id: String,
}

/// Appends ` ^<id>` to the anchored line unless it already carries that id.
///
/// Returns whether the document was rewritten.
pub fn apply_block_anchor(corpus: &dyn Corpus, anchor: &BlockAnchor) -> Result<bool> {
    let doc = DocumentHandle::from_path(anchor.path.as_str());
    let content = corpus.read_text(&doc)?;
    let mut lines = content.split('\n').map(ToString::to_string).collect::<Vec<_>>();
    let Some(line) = lines.get_mut(anchor.line) else {
        return Err(NoteSearchError::Validation(format!(
            "line {} does not exist in {}",
            anchor.line, anchor.path
        )));
    };

    let (body, carriage_return) = match line.strip_suffix('\r') {
        Some(body) => (body.to_string(), "\r"),
        None => (line.clone(), ""),
    };
    if split_block_marker(&body).1 == Some(anchor.block_id.as_str()) {
        debug!(path = %anchor.path, line = anchor.line, "block marker already present");
        return Ok(false);
    }
    *line = format!("{} ^{}{carriage_return}", body.trim_end(), anchor.block_id);
    corpus.write_text(&doc, &lines.join("\n"))?;
    Ok(true)
}
