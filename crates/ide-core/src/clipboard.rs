//! Clipboard access and copy acknowledgements.

use crate::files::FileId;
use crate::test_cases::TestCaseId;

/// What a copy action copied; acknowledgement flags are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CopyTarget {
    /// The full source of a file.
    Code(FileId),
    /// The actual output of one test case.
    Output(FileId, TestCaseId),
}

/// Clipboard write failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Host clipboard.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// In-memory clipboard (tests, headless hosts).
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    fail: bool,
}

impl MemoryClipboard {
    /// Clipboard whose writes always fail.
    pub fn failing() -> Self {
        Self {
            contents: None,
            fail: true,
        }
    }

    /// Last written text.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError("clipboard unavailable".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
