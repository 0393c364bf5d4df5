//! Keyword completion.
//!
//! Suggestions come from the static per-language keyword lists in `ide-core-lang`. Filtering is
//! a case-insensitive prefix match on the token before the caret; an exact (case-insensitive)
//! match is not offered since accepting it would change nothing.

use ide_core_lang::Language;

/// Default number of suggestions surfaced at once.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 8;
/// Default minimum token length before suggestions appear.
pub const DEFAULT_MIN_PREFIX_LEN: usize = 2;

/// Filter `language`'s keywords by `prefix`.
///
/// Returns an empty list when `prefix` is shorter than `min_prefix_len` chars. Order follows
/// the keyword list and the result is capped at `limit`.
pub fn suggest(
    language: Language,
    prefix: &str,
    min_prefix_len: usize,
    limit: usize,
) -> Vec<&'static str> {
    if prefix.chars().count() < min_prefix_len {
        return Vec::new();
    }

    let needle = prefix.to_lowercase();
    language
        .keywords()
        .iter()
        .copied()
        .filter(|keyword| {
            let keyword = keyword.to_lowercase();
            keyword.starts_with(&needle) && keyword != needle
        })
        .take(limit)
        .collect()
}

/// Completion popup state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionState {
    items: Vec<String>,
    selected: usize,
    visible: bool,
}

impl CompletionState {
    /// Replace the item list; visible iff non-empty, selection back to the first item.
    pub fn show(&mut self, items: Vec<String>) {
        self.visible = !items.is_empty();
        self.items = items;
        self.selected = 0;
    }

    /// Hide the popup (items are kept until the next [`show`](Self::show)).
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the popup is showing.
    pub fn is_visible(&self) -> bool {
        self.visible && !self.items.is_empty()
    }

    /// Current items.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Index of the highlighted item.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Highlighted item, if the popup is visible.
    pub fn selected_item(&self) -> Option<&str> {
        if !self.is_visible() {
            return None;
        }
        self.items.get(self.selected).map(String::as_str)
    }

    /// Move the highlight down, stopping at the last item.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(self.items.len().saturating_sub(1));
    }

    /// Move the highlight up, stopping at the first item.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_prefix_yields_nothing() {
        assert!(suggest(Language::Cpp, "c", 2, 8).is_empty());
        assert!(suggest(Language::Cpp, "", 2, 8).is_empty());
    }

    #[test]
    fn test_exact_match_is_excluded() {
        assert_eq!(suggest(Language::Python, "def", 2, 8), Vec::<&str>::new());
        assert_eq!(suggest(Language::Python, "DEF", 2, 8), Vec::<&str>::new());
    }

    #[test]
    fn test_case_insensitive_prefix() {
        assert_eq!(
            suggest(Language::JavaScript, "ADD", 2, 8),
            vec!["addEventListener"]
        );
        assert_eq!(
            suggest(Language::JavaScript, "get", 2, 8),
            vec!["getElementById"]
        );
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut state = CompletionState::default();
        state.show(vec!["a".into(), "b".into()]);
        state.select_prev();
        assert_eq!(state.selected_index(), 0);
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected_index(), 1);
        assert_eq!(state.selected_item(), Some("b"));

        state.hide();
        assert_eq!(state.selected_item(), None);
    }

    #[test]
    fn test_show_empty_hides() {
        let mut state = CompletionState::default();
        state.show(Vec::new());
        assert!(!state.is_visible());
    }
}
