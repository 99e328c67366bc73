use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::corpus::{Corpus, DocumentHandle};
use crate::text::{contains_whole_word, keywords, truncate_text};

pub const MAX_SUGGESTIONS: usize = 10;
pub const PREVIEW_CHARS: usize = 60;
const BLOCK_HASH_CHARS: usize = 6;
const WHOLE_WORD_HIT: u32 = 3;
const PARTIAL_HIT: u32 = 1;

static BLOCK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\^([A-Za-z0-9-]+)\s*$").expect("block marker pattern"));

/// Document a suggestion was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSource {
    pub display_name: String,
    pub path: String,
}

impl From<&DocumentHandle> for SuggestionSource {
    fn from(doc: &DocumentHandle) -> Self {
        Self {
            display_name: doc.display_name().to_string(),
            path: doc.path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SuggestionItem {
    Content {
        preview: String,
        full_line: String,
        line: usize,
    },
    Heading {
        text: String,
        level: u8,
        line: usize,
    },
    Block {
        preview: String,
        full_line: String,
        line: usize,
        block_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub source: SuggestionSource,
    pub score: u32,
    pub item: SuggestionItem,
}

impl Suggestion {
    /// Text that replaces the trigger span when this suggestion is confirmed.
    #[must_use]
    pub fn insertion_text(&self) -> String {
        let file = &self.source.display_name;
        match &self.item {
            SuggestionItem::Content { full_line, .. } => full_line.clone(),
            SuggestionItem::Heading { text, .. } => format!("[[{file}#{text}|{text}]]"),
            SuggestionItem::Block {
                full_line,
                block_id,
                ..
            } => format!("[[{file}#^{block_id}|{full_line}]]"),
        }
    }

    #[must_use]
    pub fn preview(&self) -> &str {
        match &self.item {
            SuggestionItem::Content { preview, .. } | SuggestionItem::Block { preview, .. } => {
                preview
            }
            SuggestionItem::Heading { text, .. } => text,
        }
    }
}

/// Lines containing every keyword; whole-word hits score higher.
#[must_use]
pub fn search_content_lines(corpus: &dyn Corpus, scope: &[String], query: &str) -> Vec<Suggestion> {
    let keywords = keywords(query);
    if keywords.is_empty() {
        return Vec::new();
    }
    let mut found = Vec::new();
    for (doc, content) in scoped_documents(corpus, scope) {
        for (line_no, line) in content.lines().enumerate() {
            let Some(score) = score_line(line, &keywords, true) else {
                continue;
            };
            found.push(Suggestion {
                source: SuggestionSource::from(&doc),
                score,
                item: SuggestionItem::Content {
                    preview: truncate_text(line.trim(), PREVIEW_CHARS),
                    full_line: line.to_string(),
                    line: line_no,
                },
            });
        }
    }
    rank(found)
}

/// Headings containing every keyword; shallower headings score higher.
#[must_use]
pub fn search_headings(corpus: &dyn Corpus, scope: &[String], query: &str) -> Vec<Suggestion> {
    let keywords = keywords(query);
    if keywords.is_empty() {
        return Vec::new();
    }
    let mut found = Vec::new();
    for doc in scoped_handles(corpus, scope) {
        let Some(metadata) = corpus.metadata(&doc) else {
            continue;
        };
        for heading in metadata.headings {
            let lowered = heading.text.to_lowercase();
            if !keywords.iter().all(|keyword| lowered.contains(keyword.as_str())) {
                continue;
            }
            let per_hit = 5u32.saturating_sub(u32::from(heading.level)).max(1);
            found.push(Suggestion {
                source: SuggestionSource::from(&doc),
                score: per_hit * hit_count(&keywords),
                item: SuggestionItem::Heading {
                    text: heading.text,
                    level: heading.level,
                    line: heading.line,
                },
            });
        }
    }
    rank(found)
}

/// Same qualification as content lines, flat scoring, plus a block id.
#[must_use]
pub fn search_blocks(corpus: &dyn Corpus, scope: &[String], query: &str) -> Vec<Suggestion> {
    let keywords = keywords(query);
    if keywords.is_empty() {
        return Vec::new();
    }
    let mut found = Vec::new();
    for (doc, content) in scoped_documents(corpus, scope) {
        for (line_no, line) in content.lines().enumerate() {
            let (body, existing_id) = split_block_marker(line);
            let Some(score) = score_line(body, &keywords, false) else {
                continue;
            };
            let block_id = existing_id.map_or_else(|| block_id_for(body, line_no), str::to_string);
            let body = body.trim();
            found.push(Suggestion {
                source: SuggestionSource::from(&doc),
                score,
                item: SuggestionItem::Block {
                    preview: truncate_text(body, PREVIEW_CHARS),
                    full_line: body.to_string(),
                    line: line_no,
                    block_id,
                },
            });
        }
    }
    rank(found)
}

/// Short content hash of the whitespace-stripped line, joined with its line number.
#[must_use]
pub fn block_id_for(line: &str, line_no: usize) -> String {
    let stripped = line.chars().filter(|ch| !ch.is_whitespace()).collect::<String>();
    let digest = blake3::hash(stripped.as_bytes()).to_hex();
    format!("{}-{line_no}", &digest.as_str()[..BLOCK_HASH_CHARS])
}

/// Splits a trailing ` ^id` marker from a line, if present.
#[must_use]
pub fn split_block_marker(line: &str) -> (&str, Option<&str>) {
    BLOCK_MARKER.captures(line).map_or((line, None), |captures| {
        let marker_start = captures.get(0).map_or(line.len(), |m| m.start());
        (&line[..marker_start], captures.get(1).map(|m| m.as_str()))
    })
}

fn score_line(line: &str, keywords: &[String], reward_whole_words: bool) -> Option<u32> {
    if line.trim().is_empty() {
        return None;
    }
    let lowered = line.to_lowercase();
    if !keywords.iter().all(|keyword| lowered.contains(keyword.as_str())) {
        return None;
    }
    Some(
        keywords
            .iter()
            .map(|keyword| {
                if reward_whole_words && contains_whole_word(&lowered, keyword) {
                    WHOLE_WORD_HIT
                } else {
                    PARTIAL_HIT
                }
            })
            .sum(),
    )
}

fn hit_count(keywords: &[String]) -> u32 {
    u32::try_from(keywords.len()).unwrap_or(u32::MAX)
}

fn rank(mut found: Vec<Suggestion>) -> Vec<Suggestion> {
    found.sort_by(|a, b| b.score.cmp(&a.score));
    found.truncate(MAX_SUGGESTIONS);
    found
}

fn scoped_handles(corpus: &dyn Corpus, scope: &[String]) -> Vec<DocumentHandle> {
    match corpus.list_documents() {
        Ok(docs) => docs
            .into_iter()
            .filter(|doc| scope.is_empty() || doc.is_within_any(scope))
            .collect(),
        Err(err) => {
            warn!(error = %err, "autocomplete could not list documents");
            Vec::new()
        }
    }
}

fn scoped_documents(corpus: &dyn Corpus, scope: &[String]) -> Vec<(DocumentHandle, String)> {
    scoped_handles(corpus, scope)
        .into_iter()
        .filter_map(|doc| match corpus.read_text(&doc) {
            Ok(content) => Some((doc, content)),
            Err(err) => {
                warn!(path = %doc.path, error = %err, "autocomplete skipped unreadable document");
                None
            }
        })
        .collect()
}
