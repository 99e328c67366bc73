use crate::complete::SuggestionSession;
use crate::config::Settings;
use crate::corpus::Corpus;
use crate::index::{RebuildReport, SharedIndex};
use crate::notify::{LogNotifier, Notifier};

mod autocomplete_service;
mod indexing_service;
mod search_service;

pub use autocomplete_service::PendingQuery;

pub const INDEX_UPDATED_NOTICE: &str = "Search index updated";

/// Explicit state container tying a corpus to its index, settings and the
/// autocomplete session.
pub struct NoteSearch<C: Corpus> {
    corpus: C,
    settings: Settings,
    index: SharedIndex,
    notifier: Box<dyn Notifier>,
    session: SuggestionSession,
    last_rebuild: Option<RebuildReport>,
}

impl<C: Corpus> std::fmt::Debug for NoteSearch<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteSearch")
            .field("settings", &self.settings)
            .field("last_rebuild", &self.last_rebuild)
            .finish_non_exhaustive()
    }
}

impl<C: Corpus> NoteSearch<C> {
    pub fn new(corpus: C, settings: Settings) -> Self {
        Self {
            corpus,
            settings,
            index: SharedIndex::new(),
            notifier: Box::new(LogNotifier),
            session: SuggestionSession::new(),
            last_rebuild: None,
        }
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub const fn corpus(&self) -> &C {
        &self.corpus
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the settings. Exclusions take effect on the next rebuild.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub const fn shared_index(&self) -> &SharedIndex {
        &self.index
    }

    pub const fn last_rebuild(&self) -> Option<&RebuildReport> {
        self.last_rebuild.as_ref()
    }

    pub const fn session(&self) -> &SuggestionSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SuggestionSession {
        &mut self.session
    }
}
