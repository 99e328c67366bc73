//! Trigger-driven autocomplete: detect `@@` literals before the cursor, search
//! live documents for the query, and manage the suggestion list until the
//! user confirms or cancels.

mod anchor;
mod query;
mod session;
mod trigger;

use crate::corpus::Corpus;

pub use anchor::{BlockAnchor, apply_block_anchor};
pub use query::{
    MAX_SUGGESTIONS, PREVIEW_CHARS, Suggestion, SuggestionItem, SuggestionSource, block_id_for,
    search_blocks, search_content_lines, search_headings, split_block_marker,
};
pub use session::{Confirmation, QueryTicket, SuggestionSession};
pub use trigger::{Detection, QueryThresholds, TriggerEvent, TriggerKind, detect};

/// Runs the search that matches the trigger's kind.
#[must_use]
pub fn suggestions_for(
    corpus: &dyn Corpus,
    scope: &[String],
    event: &TriggerEvent,
) -> Vec<Suggestion> {
    match event.kind {
        TriggerKind::Block => search_blocks(corpus, scope, &event.query),
        TriggerKind::Heading => search_headings(corpus, scope, &event.query),
        TriggerKind::Content => search_content_lines(corpus, scope, &event.query),
    }
}
