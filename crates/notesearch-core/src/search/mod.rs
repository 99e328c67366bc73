use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::index::{DocumentIndex, DocumentRecord, HeadingEntry};
use crate::text::keywords;

mod content;
mod results;

pub use content::{content_occurrences, line_of_offset};
pub use results::{DIALOG_MIN_QUERY_CHARS, MAX_MATCHES_SHOWN, OpenTarget, ResultList, ResultSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldWeights {
    pub file_name: u32,
    pub directory: u32,
    pub tag: u32,
    pub heading1: u32,
    pub heading2: u32,
    pub heading3: u32,
    pub heading4: u32,
    pub content: u32,
    pub quote: u32,
}

impl FieldWeights {
    #[must_use]
    pub const fn weight_of(&self, kind: MatchKind) -> u32 {
        match kind {
            MatchKind::FileName => self.file_name,
            MatchKind::Directory => self.directory,
            MatchKind::Tag => self.tag,
            MatchKind::Heading1 => self.heading1,
            MatchKind::Heading2 => self.heading2,
            MatchKind::Heading3 => self.heading3,
            MatchKind::Heading4 => self.heading4,
            MatchKind::Content => self.content,
            MatchKind::Quote => self.quote,
        }
    }
}

/// Which fields a search inspects. Every field is enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFields {
    pub file_name: bool,
    pub directory: bool,
    pub tags: bool,
    pub headings: bool,
    pub content: bool,
    pub quotes: bool,
}

impl Default for SearchFields {
    fn default() -> Self {
        Self {
            file_name: true,
            directory: true,
            tags: true,
            headings: true,
            content: true,
            quotes: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
    FileName,
    Directory,
    Tags,
    Headings,
    Content,
    Quotes,
}

impl SearchFields {
    #[must_use]
    pub const fn is_enabled(&self, field: SearchField) -> bool {
        match field {
            SearchField::FileName => self.file_name,
            SearchField::Directory => self.directory,
            SearchField::Tags => self.tags,
            SearchField::Headings => self.headings,
            SearchField::Content => self.content,
            SearchField::Quotes => self.quotes,
        }
    }

    pub fn toggle(&mut self, field: SearchField) {
        let slot = match field {
            SearchField::FileName => &mut self.file_name,
            SearchField::Directory => &mut self.directory,
            SearchField::Tags => &mut self.tags,
            SearchField::Headings => &mut self.headings,
            SearchField::Content => &mut self.content,
            SearchField::Quotes => &mut self.quotes,
        };
        *slot = !*slot;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    FileName,
    Directory,
    Tag,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Content,
    Quote,
}

impl MatchKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FileName => "fileName",
            Self::Directory => "directory",
            Self::Tag => "tag",
            Self::Heading1 => "heading1",
            Self::Heading2 => "heading2",
            Self::Heading3 => "heading3",
            Self::Heading4 => "heading4",
            Self::Content => "content",
            Self::Quote => "quote",
        }
    }

    /// Label shown next to a match in result listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FileName => "file name",
            Self::Directory => "directory",
            Self::Tag => "tag",
            Self::Heading1 => "heading 1",
            Self::Heading2 => "heading 2",
            Self::Heading3 => "heading 3",
            Self::Heading4 => "heading",
            Self::Content => "content",
            Self::Quote => "quote",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub kind: MatchKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub path: String,
    pub file_name: String,
    pub score: u32,
    pub matches: Vec<Match>,
}

/// Ranks indexed documents against `query`.
///
/// Each enabled field is tested against every keyword by case-insensitive
/// substring containment and every hit adds its field weight. Documents the
/// corpus no longer contains are skipped. Equal scores keep index order.
#[must_use]
pub fn search(
    index: &DocumentIndex,
    corpus: &dyn Corpus,
    weights: &FieldWeights,
    query: &str,
    fields: SearchFields,
) -> Vec<SearchResult> {
    let keywords = keywords(query);
    if keywords.is_empty() {
        return Vec::new();
    }

    let mut results = index
        .iter()
        .filter(|record| corpus.contains(&record.path))
        .filter_map(|record| score_record(record, &keywords, weights, fields))
        .collect::<Vec<_>>();
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}

fn score_record(
    record: &DocumentRecord,
    keywords: &[String],
    weights: &FieldWeights,
    fields: SearchFields,
) -> Option<SearchResult> {
    let mut matches = Vec::new();

    if fields.file_name {
        match_single(&record.file_name, MatchKind::FileName, keywords, &mut matches);
    }
    if fields.directory {
        match_single(&record.directory, MatchKind::Directory, keywords, &mut matches);
    }
    if fields.tags {
        for tag in &record.tags {
            match_single(tag, MatchKind::Tag, keywords, &mut matches);
        }
    }
    if fields.headings {
        let buckets = [
            (MatchKind::Heading1, &record.headings.h1),
            (MatchKind::Heading2, &record.headings.h2),
            (MatchKind::Heading3, &record.headings.h3),
            (MatchKind::Heading4, &record.headings.h4),
        ];
        for (kind, headings) in buckets {
            match_headings(headings, kind, keywords, &mut matches);
        }
    }
    if fields.content {
        for keyword in keywords {
            matches.extend(content_occurrences(&record.content, keyword));
        }
    }
    if fields.quotes {
        for quote in &record.quotes {
            match_single(quote, MatchKind::Quote, keywords, &mut matches);
        }
    }

    let score = matches
        .iter()
        .map(|found| weights.weight_of(found.kind))
        .fold(0u32, u32::saturating_add);
    if score == 0 {
        return None;
    }
    Some(SearchResult {
        path: record.path.clone(),
        file_name: record.file_name.clone(),
        score,
        matches,
    })
}

fn match_single(value: &str, kind: MatchKind, keywords: &[String], out: &mut Vec<Match>) {
    let lowered = value.to_lowercase();
    for keyword in keywords {
        if lowered.contains(keyword.as_str()) {
            out.push(Match {
                kind,
                text: value.to_string(),
                line: None,
            });
        }
    }
}

fn match_headings(
    headings: &[HeadingEntry],
    kind: MatchKind,
    keywords: &[String],
    out: &mut Vec<Match>,
) {
    for heading in headings {
        let lowered = heading.text.to_lowercase();
        for keyword in keywords {
            if lowered.contains(keyword.as_str()) {
                out.push(Match {
                    kind,
                    text: heading.text.clone(),
                    line: Some(heading.line),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::corpus::MemoryCorpus;
    use crate::index::rebuild_index;

    fn indexed(docs: &[(&str, &str)]) -> (MemoryCorpus, DocumentIndex) {
        let corpus = MemoryCorpus::new();
        for (path, content) in docs {
            corpus.insert(path, content);
        }
        let (index, _) = rebuild_index(&corpus, &[]).expect("rebuild");
        (corpus, index)
    }

    fn weights() -> FieldWeights {
        Settings::default().weights()
    }

    #[test]
    fn empty_queries_return_nothing() {
        let (corpus, index) = indexed(&[("a.md", "hello")]);
        assert!(search(&index, &corpus, &weights(), "", SearchFields::default()).is_empty());
        assert!(search(&index, &corpus, &weights(), " \t\n", SearchFields::default()).is_empty());
    }

    #[test]
    fn score_is_sum_of_weights_over_every_match() {
        let (corpus, index) = indexed(&[(
            "Rust/rust-notes.md",
            "---\ntags: [rust]\n---\n# Rust intro\n> rust quote\nplain rust\n",
        )]);
        let results = search(&index, &corpus, &weights(), "RUST", SearchFields::default());
        assert_eq!(results.len(), 1);
        let result = &results[0];

        let expected = result
            .matches
            .iter()
            .map(|m| weights().weight_of(m.kind))
            .sum::<u32>();
        assert_eq!(result.score, expected);

        let kinds = result.matches.iter().map(|m| m.kind).collect::<Vec<_>>();
        assert!(kinds.contains(&MatchKind::FileName));
        assert!(kinds.contains(&MatchKind::Directory));
        assert!(kinds.contains(&MatchKind::Tag));
        assert!(kinds.contains(&MatchKind::Heading1));
        assert!(kinds.contains(&MatchKind::Quote));
        // tag list, heading, quote and body line each contain "rust" once.
        let content_hits = kinds.iter().filter(|k| **k == MatchKind::Content).count();
        assert_eq!(content_hits, 4);
    }

    #[test]
    fn oversized_weights_saturate_instead_of_overflowing() {
        let (corpus, index) = indexed(&[("alpha beta.md", "alpha beta")]);
        let huge = FieldWeights {
            file_name: 4_000_000_000,
            content: 4_000_000_000,
            ..weights()
        };
        let results = search(&index, &corpus, &huge, "alpha beta", SearchFields::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, u32::MAX);
    }

    #[test]
    fn each_keyword_hit_counts_separately() {
        let (corpus, index) = indexed(&[("alpha beta.md", "")]);
        let results = search(&index, &corpus, &weights(), "alpha beta", SearchFields::default());
        assert_eq!(results[0].matches.len(), 2);
        assert_eq!(results[0].score, 20);
    }

    #[test]
    fn disabled_fields_are_not_inspected() {
        let (corpus, index) = indexed(&[("topic.md", "topic in body")]);
        let fields = SearchFields {
            file_name: false,
            ..SearchFields::default()
        };
        let results = search(&index, &corpus, &weights(), "topic", fields);
        assert_eq!(results[0].score, 3);
        assert!(results[0].matches.iter().all(|m| m.kind == MatchKind::Content));
    }

    #[test]
    fn results_sort_by_score_and_keep_index_order_for_ties() {
        let (corpus, index) = indexed(&[
            ("first.md", "needle"),
            ("needle.md", "needle"),
            ("second.md", "needle"),
        ]);
        let results = search(&index, &corpus, &weights(), "needle", SearchFields::default());
        let order = results.iter().map(|r| r.path.as_str()).collect::<Vec<_>>();
        assert_eq!(order, vec!["needle.md", "first.md", "second.md"]);
        assert!(results.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn documents_deleted_since_indexing_are_skipped() {
        let (corpus, index) = indexed(&[("gone.md", "needle"), ("kept.md", "needle")]);
        corpus.remove("gone.md");
        let results = search(&index, &corpus, &weights(), "needle", SearchFields::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, "kept.md");
    }

    #[test]
    fn heading_matches_record_their_line() {
        let (corpus, index) = indexed(&[("a.md", "intro\n\n### Deep Topic\n")]);
        let fields = SearchFields {
            content: false,
            ..SearchFields::default()
        };
        let results = search(&index, &corpus, &weights(), "topic", fields);
        assert_eq!(
            results[0].matches,
            vec![Match {
                kind: MatchKind::Heading3,
                text: "Deep Topic".to_string(),
                line: Some(2),
            }]
        );
        assert_eq!(results[0].score, 5);
    }

    #[test]
    fn toggling_a_field_flips_only_that_field() {
        let mut fields = SearchFields::default();
        fields.toggle(SearchField::Quotes);
        assert!(!fields.is_enabled(SearchField::Quotes));
        assert!(fields.is_enabled(SearchField::Content));
        fields.toggle(SearchField::Quotes);
        assert_eq!(fields, SearchFields::default());
    }
}
