//! Logical line index over a source buffer.
//!
//! Backed by a [`ropey::Rope`] built without CR/Unicode line breaks, so only `\n` separates
//! lines. A `\r` before the `\n` stays part of the line text.

use ropey::Rope;

/// Line lookups over char offsets.
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build a line index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Number of logical lines (an empty text has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total char count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Line containing `char_offset` (clamped to the end of the text).
    pub fn line_of(&self, char_offset: usize) -> usize {
        self.rope.char_to_line(char_offset.min(self.rope.len_chars()))
    }

    /// Char offset of the first char of `line` (clamped to the last line).
    pub fn line_start(&self, line: usize) -> usize {
        let line = line.min(self.line_count().saturating_sub(1));
        self.rope.line_to_char(line)
    }

    /// Char length of `line`, excluding its trailing `\n`.
    pub fn line_len(&self, line: usize) -> usize {
        if line >= self.line_count() {
            return 0;
        }
        let slice = self.rope.line(line);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Text of `line` without its trailing `\n`.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.line_count() {
            return None;
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        Some(text)
    }

    /// Convert a char offset to `(line, column)`.
    pub fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let offset = char_offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        (line, offset - self.rope.line_to_char(line))
    }

    /// Convert `(line, column)` to a char offset, clamping both coordinates.
    pub fn position_to_char_offset(&self, line: usize, column: usize) -> usize {
        let line = line.min(self.line_count().saturating_sub(1));
        self.line_start(line) + column.min(self.line_len(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_split_on_newline_only() {
        let index = LineIndex::from_text("a\r\nbc\n\nd");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_text(0).as_deref(), Some("a\r"));
        assert_eq!(index.line_text(1).as_deref(), Some("bc"));
        assert_eq!(index.line_text(2).as_deref(), Some(""));
        assert_eq!(index.line_text(3).as_deref(), Some("d"));
        assert_eq!(index.line_text(4), None);
    }

    #[test]
    fn test_offset_position_conversions() {
        let index = LineIndex::from_text("héllo\nwörld");
        assert_eq!(index.char_offset_to_position(0), (0, 0));
        assert_eq!(index.char_offset_to_position(5), (0, 5));
        assert_eq!(index.char_offset_to_position(6), (1, 0));
        assert_eq!(index.char_offset_to_position(99), (1, 5));

        assert_eq!(index.position_to_char_offset(1, 2), 8);
        assert_eq!(index.position_to_char_offset(0, 99), 5);
        assert_eq!(index.position_to_char_offset(7, 0), 6);
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let index = LineIndex::from_text("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_len(0), 0);
        assert_eq!(index.line_of(10), 0);
    }
}
