//! Engine configuration.
//!
//! Every field has a default, so hosts can deserialize a partial document (the TUI host reads
//! TOML) or use [`IdeConfig::default`].

use crate::completion::{DEFAULT_MAX_SUGGESTIONS, DEFAULT_MIN_PREFIX_LEN};
use crate::files::RenameExtensionPolicy;
use crate::layout::SplitConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Color theme of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme.
    #[default]
    Dark,
    /// Light theme.
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Completion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Maximum number of suggestions shown.
    pub max_items: usize,
    /// Minimum token length (chars) before suggesting.
    pub min_prefix_len: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_SUGGESTIONS,
            min_prefix_len: DEFAULT_MIN_PREFIX_LEN,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdeConfig {
    /// Simulated execution delay of a run, in milliseconds.
    pub run_delay_ms: u64,
    /// How long a copy acknowledgement stays visible, in milliseconds.
    pub copy_ack_ms: u64,
    /// Text inserted by the indent key.
    pub indent_unit: String,
    /// Editor/test pane split.
    pub split: SplitConfig,
    /// Completion settings.
    pub completion: CompletionConfig,
    /// Extension appended when a rename has none.
    pub rename_extension: RenameExtensionPolicy,
    /// Initial theme.
    pub theme: Theme,
}

impl Default for IdeConfig {
    fn default() -> Self {
        Self {
            run_delay_ms: 1500,
            copy_ack_ms: 2000,
            indent_unit: "  ".to_string(),
            split: SplitConfig::default(),
            completion: CompletionConfig::default(),
            rename_extension: RenameExtensionPolicy::default(),
            theme: Theme::default(),
        }
    }
}

impl IdeConfig {
    /// Run delay as a [`Duration`].
    pub fn run_delay(&self) -> Duration {
        Duration::from_millis(self.run_delay_ms)
    }

    /// Copy acknowledgement lifetime as a [`Duration`].
    pub fn copy_ack(&self) -> Duration {
        Duration::from_millis(self.copy_ack_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: IdeConfig = toml::from_str(
            r#"
run_delay_ms = 10
rename_extension = "file-language"

[split]
initial = 50.0
"#,
        )
        .unwrap();

        assert_eq!(config.run_delay(), Duration::from_millis(10));
        assert_eq!(config.copy_ack(), Duration::from_millis(2000));
        assert_eq!(config.rename_extension, RenameExtensionPolicy::FileLanguage);
        assert_eq!(config.split.initial, 50.0);
        assert_eq!(config.split.max, 80.0);
        assert_eq!(config.completion.max_items, 8);
        assert_eq!(config.indent_unit, "  ");
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }
}
