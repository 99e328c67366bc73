use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::editor::EditorPosition;
use crate::text::{count_cjk_ideographs, count_latin_letters};

// Tried in this order; the longer literals share the `@@` prefix.
static BLOCK_TRIGGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(@@@)\s+([^@]*)$").expect("block trigger pattern"));
static HEADING_TRIGGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(@@#)\s+([^@]*)$").expect("heading trigger pattern"));
static CONTENT_TRIGGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^@])(@@)([^@#][^@]*)$").expect("content trigger pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerKind {
    Block,
    Heading,
    Content,
}

impl TriggerKind {
    #[must_use]
    pub const fn literal(self) -> &'static str {
        match self {
            Self::Block => "@@@",
            Self::Heading => "@@#",
            Self::Content => "@@",
        }
    }
}

/// A trigger found immediately before the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub kind: TriggerKind,
    /// Query with surrounding whitespace removed.
    pub query: String,
    /// Literal plus everything typed after it, up to the cursor.
    pub span_text: String,
    pub span_start: EditorPosition,
    pub cursor: EditorPosition,
}

/// Minimum query sizes; either one being met qualifies the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryThresholds {
    pub min_chinese: usize,
    pub min_english: usize,
}

impl QueryThresholds {
    #[must_use]
    pub fn accepts(&self, query: &str) -> bool {
        count_cjk_ideographs(query) >= self.min_chinese
            || count_latin_letters(query) >= self.min_english
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Pattern matched and the query qualifies; run a search.
    Fire(TriggerEvent),
    /// Pattern matched but the query is too short; leave any open session alone.
    Hold(TriggerEvent),
    /// No pattern matched; close any open session.
    None,
}

/// Classifies the text between the start of the cursor's line and the cursor.
#[must_use]
pub fn detect(preceding: &str, cursor: EditorPosition, thresholds: QueryThresholds) -> Detection {
    let Some(event) = match_trigger(preceding, cursor) else {
        return Detection::None;
    };
    if thresholds.accepts(&event.query) {
        Detection::Fire(event)
    } else {
        Detection::Hold(event)
    }
}

fn match_trigger(preceding: &str, cursor: EditorPosition) -> Option<TriggerEvent> {
    let patterns = [
        (TriggerKind::Block, &*BLOCK_TRIGGER),
        (TriggerKind::Heading, &*HEADING_TRIGGER),
        (TriggerKind::Content, &*CONTENT_TRIGGER),
    ];
    patterns.into_iter().find_map(|(kind, pattern)| {
        let captures = pattern.captures(preceding)?;
        let literal = captures.get(1)?;
        let query = captures.get(2).map_or("", |m| m.as_str());
        let span_text = &preceding[literal.start()..];
        let span_chars = span_text.chars().count();
        Some(TriggerEvent {
            kind,
            query: query.trim().to_string(),
            span_text: span_text.to_string(),
            span_start: EditorPosition::new(cursor.line, cursor.ch.saturating_sub(span_chars)),
            cursor,
        })
    })
}
