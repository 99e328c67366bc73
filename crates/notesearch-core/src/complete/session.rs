use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::editor::Editor;
use crate::error::Result;

use super::anchor::BlockAnchor;
use super::query::{Suggestion, SuggestionItem};
use super::trigger::{Detection, TriggerEvent};

/// Identifies one fired trigger. Only the newest ticket may deliver results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryTicket {
    generation: u64,
}

impl QueryTicket {
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenSession {
    trigger: TriggerEvent,
    suggestions: Vec<Suggestion>,
    selected: usize,
}

/// Outcome of confirming the selected suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub inserted: String,
    /// Present for block suggestions; the source line must carry this id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<BlockAnchor>,
}

/// Suggestion list state. Closed until a fired trigger delivers at least one
/// suggestion; while open, `selected` always indexes into `suggestions`.
#[derive(Debug, Clone, Default)]
pub struct SuggestionSession {
    generation: u64,
    pending: Option<(u64, TriggerEvent)>,
    open: Option<OpenSession>,
}

impl SuggestionSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the detector's verdict for the latest edit.
    ///
    /// A firing trigger returns the ticket its search results must be
    /// delivered with. A held trigger changes nothing. No trigger closes the
    /// session and invalidates outstanding tickets.
    pub fn on_detection(&mut self, detection: Detection) -> Option<QueryTicket> {
        match detection {
            Detection::Fire(event) => {
                self.generation += 1;
                self.pending = Some((self.generation, event));
                Some(QueryTicket {
                    generation: self.generation,
                })
            }
            Detection::Hold(_) => None,
            Detection::None => {
                self.close();
                None
            }
        }
    }

    /// Installs results for `ticket`. Results for superseded tickets are
    /// dropped; an empty result list closes the session.
    pub fn deliver(&mut self, ticket: QueryTicket, suggestions: Vec<Suggestion>) -> bool {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|(generation, _)| *generation == ticket.generation);
        if !current {
            debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "discarding stale suggestions"
            );
            return false;
        }
        let Some((_, trigger)) = self.pending.take() else {
            return false;
        };
        self.open = (!suggestions.is_empty()).then_some(OpenSession {
            trigger,
            suggestions,
            selected: 0,
        });
        true
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    #[must_use]
    pub fn suggestions(&self) -> &[Suggestion] {
        self.open
            .as_ref()
            .map_or(&[][..], |open| open.suggestions.as_slice())
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.open.as_ref().map(|open| open.selected)
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Suggestion> {
        self.open
            .as_ref()
            .and_then(|open| open.suggestions.get(open.selected))
    }

    #[must_use]
    pub fn trigger(&self) -> Option<&TriggerEvent> {
        self.open.as_ref().map(|open| &open.trigger)
    }

    pub fn select_next(&mut self) {
        if let Some(open) = self.open.as_mut() {
            open.selected = (open.selected + 1) % open.suggestions.len();
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(open) = self.open.as_mut() {
            let len = open.suggestions.len();
            open.selected = (open.selected + len - 1) % len;
        }
    }

    /// Hover selection; out-of-range indexes are ignored.
    pub fn select(&mut self, idx: usize) {
        if let Some(open) = self.open.as_mut() {
            if idx < open.suggestions.len() {
                open.selected = idx;
            }
        }
    }

    /// Replaces the trigger span, from its start up to the editor's current
    /// cursor, with the selected suggestion and closes the session.
    pub fn confirm(&mut self, editor: &mut dyn Editor) -> Result<Option<Confirmation>> {
        let Some(open) = self.open.take() else {
            return Ok(None);
        };
        self.pending = None;
        let Some(selected) = open.suggestions.get(open.selected) else {
            return Ok(None);
        };

        let inserted = selected.insertion_text();
        let cursor = editor.get_cursor();
        editor.replace_range(&inserted, open.trigger.span_start, cursor)?;

        let anchor = match &selected.item {
            SuggestionItem::Block { line, block_id, .. } => Some(BlockAnchor {
                path: selected.source.path.clone(),
                line: *line,
                block_id: block_id.clone(),
            }),
            SuggestionItem::Content { .. } | SuggestionItem::Heading { .. } => None,
        };
        Ok(Some(Confirmation { inserted, anchor }))
    }

    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.open = None;
        self.pending = None;
    }
}
