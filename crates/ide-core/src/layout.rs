//! Split layout between the editor pane and the test pane.
//!
//! The controller only tracks a percentage and a drag flag. Pointer math is done in host
//! coordinates (pixels, terminal columns, ...): the host passes the pointer x position and the
//! container's left edge and width.

use serde::{Deserialize, Serialize};

/// Bounds and initial value of the editor pane percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Initial editor pane width (percent).
    pub initial: f64,
    /// Smallest editor pane width (percent).
    pub min: f64,
    /// Largest editor pane width (percent).
    pub max: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            initial: 70.0,
            min: 20.0,
            max: 80.0,
        }
    }
}

/// Mouse cursor the host should force while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorIcon {
    /// Horizontal resize cursor.
    ColResize,
}

/// Document-level overrides active during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerCapture {
    /// Cursor to show everywhere.
    pub cursor: CursorIcon,
    /// Whether text selection must be suppressed.
    pub suppress_text_selection: bool,
}

/// Editor/test pane split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitLayout {
    editor_percent: f64,
    dragging: bool,
    min: f64,
    max: f64,
}

impl Default for SplitLayout {
    fn default() -> Self {
        Self::new(SplitConfig::default())
    }
}

impl SplitLayout {
    /// Create a layout from config. Inverted bounds are swapped.
    pub fn new(config: SplitConfig) -> Self {
        let (min, max) = if config.min <= config.max {
            (config.min, config.max)
        } else {
            (config.max, config.min)
        };
        let mut layout = Self {
            editor_percent: min,
            dragging: false,
            min,
            max,
        };
        layout.set_editor_percent(config.initial);
        layout
    }

    /// Editor pane width in percent.
    pub fn editor_percent(&self) -> f64 {
        self.editor_percent
    }

    /// Test pane width in percent.
    pub fn test_percent(&self) -> f64 {
        100.0 - self.editor_percent
    }

    /// Set the editor pane width, clamped to the bounds. Non-finite values are ignored.
    pub fn set_editor_percent(&mut self, percent: f64) -> bool {
        if !percent.is_finite() {
            return false;
        }
        let clamped = percent.clamp(self.min, self.max);
        let changed = clamped != self.editor_percent;
        self.editor_percent = clamped;
        changed
    }

    /// Arm dragging.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer moved while dragging. Returns whether the percentage changed.
    ///
    /// Ignored when no drag is armed or the container has no usable width.
    pub fn drag_to(&mut self, pointer_x: f64, container_left: f64, container_width: f64) -> bool {
        if !self.dragging || !container_width.is_finite() || container_width <= 0.0 {
            return false;
        }
        self.set_editor_percent((pointer_x - container_left) / container_width * 100.0)
    }

    /// Disarm dragging.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Overrides the host must apply while dragging; `None` restores the defaults.
    pub fn pointer_capture(&self) -> Option<PointerCapture> {
        self.dragging.then_some(PointerCapture {
            cursor: CursorIcon::ColResize,
            suppress_text_selection: true,
        })
    }

    /// Split `total` host units into `(editor, tests)` widths.
    pub fn split(&self, total: u16) -> (u16, u16) {
        let editor = ((total as f64) * self.editor_percent / 100.0).round() as u16;
        let editor = editor.min(total);
        (editor, total - editor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_and_bounds() {
        let layout = SplitLayout::default();
        assert_eq!(layout.editor_percent(), 70.0);
        assert_eq!(layout.test_percent(), 30.0);

        let layout = SplitLayout::new(SplitConfig {
            initial: 95.0,
            min: 80.0,
            max: 20.0,
        });
        assert_eq!(layout.editor_percent(), 80.0);
    }

    #[test]
    fn test_drag_requires_arming() {
        let mut layout = SplitLayout::default();
        assert!(!layout.drag_to(10.0, 0.0, 100.0));
        assert_eq!(layout.editor_percent(), 70.0);
        assert_eq!(layout.pointer_capture(), None);

        layout.begin_drag();
        assert!(layout.pointer_capture().is_some());
        assert!(layout.drag_to(150.0, 100.0, 200.0));
        assert_eq!(layout.editor_percent(), 25.0);

        layout.end_drag();
        assert_eq!(layout.pointer_capture(), None);
    }

    #[test]
    fn test_degenerate_container_is_ignored() {
        let mut layout = SplitLayout::default();
        layout.begin_drag();
        assert!(!layout.drag_to(10.0, 0.0, 0.0));
        assert!(!layout.drag_to(10.0, 0.0, f64::NAN));
        assert!(!layout.drag_to(f64::INFINITY, 0.0, 10.0));
        assert_eq!(layout.editor_percent(), 70.0);
    }

    #[test]
    fn test_split_columns() {
        let layout = SplitLayout::default();
        assert_eq!(layout.split(100), (70, 30));
        assert_eq!(layout.split(0), (0, 0));
    }
}
