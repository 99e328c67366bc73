use serde::{Deserialize, Serialize};

use crate::error::{NoteSearchError, Result};

/// Cursor or range endpoint. `ch` counts characters, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EditorPosition {
    pub line: usize,
    pub ch: usize,
}

impl EditorPosition {
    #[must_use]
    pub const fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// Screen placement used to anchor the suggestion box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenCoords {
    pub left: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Host editor access needed by the autocomplete session.
pub trait Editor {
    fn get_cursor(&self) -> EditorPosition;

    fn get_line(&self, line: usize) -> Option<String>;

    fn replace_range(&mut self, text: &str, from: EditorPosition, to: EditorPosition)
    -> Result<()>;

    fn coords_at_pos(&self, pos: EditorPosition) -> Option<ScreenCoords>;

    /// Text on the cursor's line from the line start up to the cursor.
    fn text_before_cursor(&self) -> String {
        let cursor = self.get_cursor();
        self.get_line(cursor.line)
            .map(|line| line.chars().take(cursor.ch).collect())
            .unwrap_or_default()
    }
}

/// In-memory multi-line buffer with a single cursor.
///
/// Coordinates are reported on a monospace grid: one unit per character
/// horizontally and one per line vertically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: EditorPosition,
}

impl TextBuffer {
    /// Buffer holding `text` with the cursor placed at its end.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let lines = text.split('\n').map(ToString::to_string).collect::<Vec<_>>();
        let last = lines.len().saturating_sub(1);
        let ch = lines.last().map_or(0, |line| line.chars().count());
        Self {
            lines,
            cursor: EditorPosition::new(last, ch),
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn set_cursor(&mut self, pos: EditorPosition) -> Result<()> {
        self.byte_offset(pos)?;
        self.cursor = pos;
        Ok(())
    }

    /// Inserts `text` at the cursor and moves the cursor past it.
    pub fn type_text(&mut self, text: &str) -> Result<()> {
        let cursor = self.cursor;
        self.replace_range(text, cursor, cursor)
    }

    fn byte_offset(&self, pos: EditorPosition) -> Result<usize> {
        let line = self.lines.get(pos.line).ok_or_else(|| {
            NoteSearchError::Validation(format!("line {} is out of range", pos.line))
        })?;
        let char_count = line.chars().count();
        if pos.ch > char_count {
            return Err(NoteSearchError::Validation(format!(
                "column {} is past the end of line {}",
                pos.ch, pos.line
            )));
        }
        let column = line
            .char_indices()
            .nth(pos.ch)
            .map_or(line.len(), |(idx, _)| idx);
        let preceding = self.lines[..pos.line]
            .iter()
            .map(|line| line.len() + 1)
            .sum::<usize>();
        Ok(preceding + column)
    }
}

impl Editor for TextBuffer {
    fn get_cursor(&self) -> EditorPosition {
        self.cursor
    }

    fn get_line(&self, line: usize) -> Option<String> {
        self.lines.get(line).cloned()
    }

    fn replace_range(
        &mut self,
        text: &str,
        from: EditorPosition,
        to: EditorPosition,
    ) -> Result<()> {
        let (from, to) = if to < from { (to, from) } else { (from, to) };
        let start = self.byte_offset(from)?;
        let end = self.byte_offset(to)?;

        let mut joined = self.text();
        joined.replace_range(start..end, text);
        self.lines = joined.split('\n').map(ToString::to_string).collect();

        let inserted_lines = text.split('\n').collect::<Vec<_>>();
        let last_inserted = inserted_lines.last().map_or(0, |line| line.chars().count());
        self.cursor = if inserted_lines.len() > 1 {
            EditorPosition::new(from.line + inserted_lines.len() - 1, last_inserted)
        } else {
            EditorPosition::new(from.line, from.ch + last_inserted)
        };
        Ok(())
    }

    fn coords_at_pos(&self, pos: EditorPosition) -> Option<ScreenCoords> {
        self.byte_offset(pos).ok()?;
        #[allow(
            clippy::cast_precision_loss,
            reason = "grid coordinates stay far below f64 precision limits"
        )]
        let (left, top) = (pos.ch as f64, pos.line as f64);
        Some(ScreenCoords {
            left,
            top,
            bottom: top + 1.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_puts_cursor_at_end() {
        let buffer = TextBuffer::new("first\nsecond line");
        assert_eq!(buffer.get_cursor(), EditorPosition::new(1, 11));
        assert_eq!(buffer.text_before_cursor(), "second line");
    }

    #[test]
    fn replace_range_counts_characters_not_bytes() {
        let mut buffer = TextBuffer::new("\u{7B14}\u{8BB0} @@ rust");
        buffer
            .replace_range("done", EditorPosition::new(0, 3), EditorPosition::new(0, 10))
            .expect("replace");
        assert_eq!(buffer.text(), "\u{7B14}\u{8BB0} done");
        assert_eq!(buffer.get_cursor(), EditorPosition::new(0, 7));
    }

    #[test]
    fn multi_line_insertions_move_cursor_to_last_inserted_line() {
        let mut buffer = TextBuffer::new("ab");
        buffer.set_cursor(EditorPosition::new(0, 1)).expect("cursor");
        buffer.type_text("x\nyz").expect("type");
        assert_eq!(buffer.text(), "ax\nyzb");
        assert_eq!(buffer.get_cursor(), EditorPosition::new(1, 2));
    }

    #[test]
    fn out_of_range_positions_are_rejected() {
        let mut buffer = TextBuffer::new("short");
        let err = buffer
            .set_cursor(EditorPosition::new(0, 9))
            .expect_err("past end");
        assert_eq!(err.code(), "VALIDATION_FAILED");
        assert!(buffer.coords_at_pos(EditorPosition::new(3, 0)).is_none());
    }

    #[test]
    fn coords_follow_a_monospace_grid() {
        let buffer = TextBuffer::new("one\ntwo");
        let coords = buffer
            .coords_at_pos(EditorPosition::new(1, 2))
            .expect("coords");
        assert_eq!(coords.left, 2.0);
        assert_eq!(coords.top, 1.0);
        assert_eq!(coords.bottom, 2.0);
    }
}
