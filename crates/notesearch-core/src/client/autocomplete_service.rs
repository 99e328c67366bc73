use tracing::{debug, warn};

use crate::complete::{
    Confirmation, Detection, QueryThresholds, QueryTicket, Suggestion, TriggerEvent,
    apply_block_anchor, detect, suggestions_for,
};
use crate::corpus::Corpus;
use crate::editor::Editor;
use crate::error::Result;

use super::NoteSearch;

/// A fired trigger whose search has not been delivered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub ticket: QueryTicket,
    pub event: TriggerEvent,
}

impl<C: Corpus> NoteSearch<C> {
    #[must_use]
    pub const fn query_thresholds(&self) -> QueryThresholds {
        QueryThresholds {
            min_chinese: self.settings.min_chinese_length,
            min_english: self.settings.min_english_length,
        }
    }

    /// Re-evaluates the text before the cursor after an edit.
    ///
    /// Returns the query to run when a trigger fired. Hosts that search in
    /// the background pass its results to [`NoteSearch::deliver`].
    pub fn on_edit(&mut self, editor: &dyn Editor) -> Option<PendingQuery> {
        let detection = if self.settings.autocomplete_enabled {
            detect(
                &editor.text_before_cursor(),
                editor.get_cursor(),
                self.query_thresholds(),
            )
        } else {
            Detection::None
        };
        match detection {
            Detection::Fire(event) => {
                let ticket = self.session.on_detection(Detection::Fire(event.clone()))?;
                Some(PendingQuery { ticket, event })
            }
            other => {
                self.session.on_detection(other);
                None
            }
        }
    }

    /// Searches live documents inside the autocomplete folder scope.
    #[must_use]
    pub fn run_query(&self, pending: &PendingQuery) -> Vec<Suggestion> {
        let scope = self.settings.autocomplete_prefixes();
        let found = suggestions_for(&self.corpus, &scope, &pending.event);
        debug!(
            kind = ?pending.event.kind,
            query = %pending.event.query,
            found = found.len(),
            "autocomplete query finished"
        );
        found
    }

    pub fn deliver(&mut self, ticket: QueryTicket, suggestions: Vec<Suggestion>) -> bool {
        self.session.deliver(ticket, suggestions)
    }

    /// Detects, searches and delivers in one step. Returns whether the
    /// session is open afterwards.
    pub fn autocomplete(&mut self, editor: &dyn Editor) -> bool {
        if let Some(pending) = self.on_edit(editor) {
            let found = self.run_query(&pending);
            self.deliver(pending.ticket, found);
        }
        self.session.is_open()
    }

    /// Inserts the selected suggestion and, for blocks, makes sure the source
    /// line carries the referenced id.
    pub fn confirm(&mut self, editor: &mut dyn Editor) -> Result<Option<Confirmation>> {
        let Some(confirmation) = self.session.confirm(editor)? else {
            return Ok(None);
        };
        if let Some(anchor) = &confirmation.anchor {
            if let Err(err) = apply_block_anchor(&self.corpus, anchor) {
                warn!(path = %anchor.path, error = %err, "could not write block marker");
            }
        }
        Ok(Some(confirmation))
    }
}
