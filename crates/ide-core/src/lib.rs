#![warn(missing_docs)]
//! IDE Core - Headless Multi-File Code IDE Widget Engine
//!
//! # Overview
//!
//! `ide-core` holds the whole behavior of a small browser-style code IDE: file tabs, an editor
//! with comment toggling, auto-indent and keyword completion, a resizable editor/test split, and
//! a test panel whose cases are "run" by a mock engine that recognizes fixed greeting
//! statements. Nothing is rendered here; hosts (see `tui-ide`) draw [`IdeState`] and feed
//! input back as [`Command`]s.
//!
//! # Core Features
//!
//! - **File Store**: ordered files, never empty, exactly one active
//! - **Test Cases**: per-file input / expected-output pairs with run status
//! - **Editing Affordances**: line comment toggle, indent, newline auto-indent, completion
//! - **Mock Runs**: per-file serialized runs with a host-driven delay
//! - **Split Layout**: editor pane percentage clamped to `[20, 80]`
//! - **State Tracking**: version number mechanism and change notifications
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  State Manager (versions, timers, clipboard)│  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Command Interface (pure reduce)            │  ← Transitions
//! ├─────────────────────────────────────────────┤
//! │  Files / Test Cases / Layout / Completion   │  ← Widget State
//! ├─────────────────────────────────────────────┤
//! │  Editing Primitives + Line Index (Rope)     │  ← Text Operations
//! ├─────────────────────────────────────────────┤
//! │  Language Registry (ide-core-lang)          │  ← Templates & Keywords
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use ide_core::{Command, EditCommand, IdeConfig, IdeStateManager, TextRange};
//!
//! let mut manager = IdeStateManager::new(IdeConfig::default());
//!
//! manager.execute(Command::Edit(EditCommand::ReplaceSource {
//!     text: "int x = 1;".to_string(),
//!     selection: TextRange::caret(0),
//! })).unwrap();
//! manager.execute(Command::Edit(EditCommand::ToggleComment)).unwrap();
//!
//! assert_eq!(manager.state().active_file().unwrap().source, "// int x = 1;");
//! ```
//!
//! # Module Description
//!
//! - [`files`] - File Store
//! - [`test_cases`] - Test Case Store
//! - [`editing`] - Text editing primitives (comment toggle, indent, newline)
//! - [`completion`] - Keyword suggestions and the completion popup state
//! - [`execution`] - Mock execution engine and pass/fail judgement
//! - [`layout`] - Split layout controller
//! - [`timers`] - Host-driven timer queue
//! - [`clipboard`] - Clipboard seam and copy targets
//! - [`config`] - Engine configuration
//! - [`commands`] - Unified command interface
//! - [`state`] - State management
//!
//! # Offsets
//!
//! All text positions are char offsets (Unicode scalar values), never bytes.

pub mod clipboard;
pub mod commands;
pub mod completion;
pub mod config;
pub mod editing;
pub mod execution;
pub mod files;
pub mod layout;
pub mod line_index;
pub mod state;
pub mod test_cases;
pub mod timers;

pub use clipboard::{Clipboard, ClipboardError, CopyTarget, MemoryClipboard};
pub use commands::{
    Caret, CaretMotion, ClipboardCommand, Command, CommandError, CommandResult,
    CompletionCommand, EditCommand, EditorKey, FileCommand, IdeState, LayoutCommand,
    RenameBuffer, RunCommand, TestCaseCommand, Transition, ViewCommand, reduce,
};
pub use completion::{CompletionState, suggest};
pub use config::{CompletionConfig, IdeConfig, Theme};
pub use editing::{EditOutcome, TextRange};
pub use execution::{
    ExecutionEngine, FALLBACK_OUTPUT, MockExecutionEngine, RunSnapshot, TestOutcome, judge,
};
pub use files::{CodeFile, DeleteOutcome, FileId, FileStore, RenameExtensionPolicy, base_name};
pub use ide_core_lang::Language;
pub use layout::{CursorIcon, PointerCapture, SplitConfig, SplitLayout};
pub use line_index::LineIndex;
pub use state::{IdeStateManager, StateChange, StateChangeCallback, StateChangeType};
pub use test_cases::{TestCase, TestCaseId, TestCasePatch, TestCaseStore, TestStatus};
pub use timers::{TimerEvent, TimerQueue};
