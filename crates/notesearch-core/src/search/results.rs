use serde::{Deserialize, Serialize};

use super::{Match, SearchResult};

/// Interactive searches only run once the trimmed query reaches this length.
pub const DIALOG_MIN_QUERY_CHARS: usize = 2;
pub const MAX_MATCHES_SHOWN: usize = 3;

/// Where selecting a result should take the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTarget {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub path: String,
    pub file_name: String,
    pub score: u32,
    pub shown: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more: Option<String>,
}

impl SearchResult {
    #[must_use]
    pub fn open_target(&self) -> OpenTarget {
        OpenTarget {
            path: self.path.clone(),
            line: self.matches.iter().find_map(|found| found.line),
        }
    }

    #[must_use]
    pub fn summary(&self) -> ResultSummary {
        let shown = self
            .matches
            .iter()
            .take(MAX_MATCHES_SHOWN)
            .map(format_match)
            .collect();
        let hidden = self.matches.len().saturating_sub(MAX_MATCHES_SHOWN);
        ResultSummary {
            path: self.path.clone(),
            file_name: self.file_name.clone(),
            score: self.score,
            shown,
            more: (hidden > 0).then(|| format!("and {hidden} more matches")),
        }
    }
}

fn format_match(found: &Match) -> String {
    format!("[{}] {}", found.kind.label(), found.text)
}

/// Search results with keyboard selection. Nothing is selected initially.
#[derive(Debug, Clone, Default)]
pub struct ResultList {
    results: Vec<SearchResult>,
    selected: Option<usize>,
}

impl ResultList {
    #[must_use]
    pub const fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            selected: None,
        }
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn select_next(&mut self) {
        let len = self.results.len();
        if len == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |idx| (idx + 1) % len));
    }

    pub fn select_previous(&mut self) {
        let len = self.results.len();
        if len == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(len - 1, |idx| (idx + len - 1) % len));
    }

    /// Hover selection; out-of-range indexes are ignored.
    pub fn select(&mut self, idx: usize) {
        if idx < self.results.len() {
            self.selected = Some(idx);
        }
    }

    #[must_use]
    pub fn open_selected(&self) -> Option<OpenTarget> {
        self.selected
            .and_then(|idx| self.results.get(idx))
            .map(SearchResult::open_target)
    }
}
