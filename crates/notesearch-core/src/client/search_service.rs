use tracing::debug;

use crate::corpus::Corpus;
use crate::search::{DIALOG_MIN_QUERY_CHARS, ResultList, SearchFields, SearchResult, search};

use super::NoteSearch;

impl<C: Corpus> NoteSearch<C> {
    /// Ranked search over the current index snapshot.
    #[must_use]
    pub fn search(&self, query: &str, fields: SearchFields) -> Vec<SearchResult> {
        let snapshot = self.index.snapshot();
        let weights = self.settings.weights();
        let results = search(&snapshot, &self.corpus, &weights, query, fields);
        debug!(query, hits = results.len(), "search finished");
        results
    }

    /// Search as typed into the dialog: short queries show nothing.
    #[must_use]
    pub fn search_dialog(&self, query: &str, fields: SearchFields) -> ResultList {
        if query.trim().chars().count() < DIALOG_MIN_QUERY_CHARS {
            return ResultList::default();
        }
        ResultList::new(self.search(query, fields))
    }
}
