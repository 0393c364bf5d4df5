//! Editing affordances over a source buffer.
//!
//! Every function here is pure: it takes the current text and selection (char offsets) and
//! returns an [`EditOutcome`] with the rewritten text and the selection to restore. The
//! command layer decides which file the outcome is written back to.

use crate::line_index::LineIndex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Trailing characters that open an indented block on the next line.
static OPENS_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[{:(]\s*$").expect("valid block-opener regex"));

/// Half-open selection range in char offsets (`start <= end` after normalization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextRange {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl TextRange {
    /// Create a range from two offsets in any order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Collapsed range (a caret).
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns `true` for a collapsed range.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamp both ends to `len`.
    pub fn clamp(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// Result of an editing transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Full rewritten text.
    pub text: String,
    /// Selection after the edit.
    pub selection: TextRange,
}

/// Byte offset of the `char_offset`-th char (clamped to the text length).
pub(crate) fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Replace the chars in `range` with `insert`; caret lands after the inserted text.
pub fn replace_range(text: &str, range: TextRange, insert: &str) -> EditOutcome {
    let range = range.clamp(text.chars().count());
    let start = byte_offset(text, range.start);
    let end = byte_offset(text, range.end);

    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..start]);
    out.push_str(insert);
    out.push_str(&text[end..]);

    EditOutcome {
        text: out,
        selection: TextRange::caret(range.start + insert.chars().count()),
    }
}

/// Indent key: replace the selection with `indent_unit`.
pub fn indent(text: &str, selection: TextRange, indent_unit: &str) -> EditOutcome {
    replace_range(text, selection, indent_unit)
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Newline key: insert `\n` plus the current line's indentation, one `indent_unit` deeper when
/// the line (up to the caret) ends with `{`, `:` or `(`.
pub fn newline_with_indent(text: &str, selection: TextRange, indent_unit: &str) -> EditOutcome {
    let caret = selection.start.min(text.chars().count());
    let before = &text[..byte_offset(text, caret)];
    let current_line = before.rsplit('\n').next().unwrap_or("");

    let mut new_indent = leading_whitespace(current_line).to_string();
    if OPENS_BLOCK.is_match(current_line.trim()) {
        new_indent.push_str(indent_unit);
    }

    let mut insert = String::with_capacity(1 + new_indent.len());
    insert.push('\n');
    insert.push_str(&new_indent);
    replace_range(text, selection, &insert)
}

/// Toggle a line comment on every line touched by `selection`.
///
/// Lines whose trimmed content starts with `marker` lose the marker and at most one following
/// whitespace char; other lines get `marker` plus one space after their indentation. Each line
/// is decided on its own, so mixed selections flip line by line. Both ends of the selection move
/// by the net change in length, clamped to the new text.
pub fn toggle_line_comment(text: &str, selection: TextRange, marker: &str) -> EditOutcome {
    let char_count = text.chars().count();
    let selection = selection.clamp(char_count);
    if marker.is_empty() {
        return EditOutcome {
            text: text.to_string(),
            selection,
        };
    }

    let index = LineIndex::from_text(text);
    let start_line = index.line_of(selection.start);
    let end_line = index.line_of(selection.end);

    let mut out = String::with_capacity(text.len() + (end_line - start_line + 1) * 3);
    let mut total_delta = 0isize;

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if i < start_line || i > end_line {
            out.push_str(line);
            continue;
        }

        let indent = leading_whitespace(line);
        let rest = &line[indent.len()..];
        let delta = if let Some(after_marker) = rest.strip_prefix(marker) {
            let mut body = after_marker.chars();
            let stripped_space = match body.clone().next() {
                Some(c) if c.is_whitespace() => {
                    body.next();
                    1
                }
                _ => 0,
            };
            out.push_str(indent);
            out.push_str(body.as_str());
            -((marker.chars().count() + stripped_space) as isize)
        } else {
            out.push_str(indent);
            out.push_str(marker);
            out.push(' ');
            out.push_str(rest);
            (marker.chars().count() + 1) as isize
        };

        total_delta += delta;
    }

    let new_len = out.chars().count() as isize;
    let shift = |offset: usize| (offset as isize + total_delta).clamp(0, new_len) as usize;
    let start = shift(selection.start);
    let end = shift(selection.end);

    EditOutcome {
        text: out,
        selection: TextRange { start, end },
    }
}

/// The whitespace-delimited token that ends at `caret`, and its starting char offset.
pub fn word_before_caret(text: &str, caret: usize) -> (usize, &str) {
    let caret = caret.min(text.chars().count());
    let before = &text[..byte_offset(text, caret)];
    let word_start_byte = before
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(byte, c)| byte + c.len_utf8())
        .unwrap_or(0);
    let word = &before[word_start_byte..];
    (caret - word.chars().count(), word)
}

/// Replace the token before the caret with `completion`.
///
/// Text after the caret is preserved; the caret ends up after the inserted completion.
pub fn apply_completion(text: &str, caret: usize, completion: &str) -> EditOutcome {
    let (word_start, _) = word_before_caret(text, caret);
    replace_range(text, TextRange::new(word_start, caret), completion)
}

/// Delete the selection, or the char before the caret when the selection is empty.
pub fn backspace(text: &str, selection: TextRange) -> EditOutcome {
    let selection = selection.clamp(text.chars().count());
    if selection.is_empty() {
        if selection.start == 0 {
            return EditOutcome {
                text: text.to_string(),
                selection,
            };
        }
        return replace_range(text, TextRange::new(selection.start - 1, selection.start), "");
    }
    replace_range(text, selection, "")
}

/// Delete the selection, or the char after the caret when the selection is empty.
pub fn delete_forward(text: &str, selection: TextRange) -> EditOutcome {
    let len = text.chars().count();
    let selection = selection.clamp(len);
    if selection.is_empty() {
        if selection.start >= len {
            return EditOutcome {
                text: text.to_string(),
                selection,
            };
        }
        return replace_range(text, TextRange::new(selection.start, selection.start + 1), "");
    }
    replace_range(text, selection, "")
}
