use super::{Match, MatchKind};

/// Every non-overlapping occurrence of `keyword` in the whole text, each
/// reported with the line that contains it.
///
/// `keyword` must already be lowercase. Offsets are taken on the lowercased
/// text and mapped back to lines by walking line lengths, so the reported
/// line is always the one holding the occurrence.
#[must_use]
pub fn content_occurrences(content: &str, keyword: &str) -> Vec<Match> {
    if keyword.is_empty() {
        return Vec::new();
    }
    let lowered = content.to_lowercase();
    let lowered_lengths = lowered.split('\n').map(str::len).collect::<Vec<_>>();
    let original_lines = content.split('\n').collect::<Vec<_>>();

    lowered
        .match_indices(keyword)
        .map(|(offset, _)| {
            let line = line_of_offset(&lowered_lengths, offset);
            Match {
                kind: MatchKind::Content,
                text: original_lines.get(line).copied().unwrap_or_default().to_string(),
                line: Some(line),
            }
        })
        .collect()
}

/// Maps a byte offset to its 0-based line, given the length of each line
/// without its terminating newline.
#[must_use]
pub fn line_of_offset(line_lengths: &[usize], offset: usize) -> usize {
    let mut line = 0usize;
    let mut consumed = 0usize;
    while line < line_lengths.len() && consumed + line_lengths[line] + 1 <= offset {
        consumed += line_lengths[line] + 1;
        line += 1;
    }
    line
}
