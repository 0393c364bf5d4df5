//! Command Interface Layer
//!
//! Every user action on the widget is a [`Command`]. [`reduce`] is a pure transition: it takes
//! the current [`IdeState`] by reference and returns a fresh state plus a [`CommandResult`].
//! The old value is never touched, so a failed command leaves the state exactly as it was and
//! callers can keep previous states around for history or diffing.
//!
//! # Example
//!
//! ```rust
//! use ide_core::{Command, CommandResult, FileCommand, IdeConfig, IdeState, reduce};
//!
//! let config = IdeConfig::default();
//! let state = IdeState::new(&config);
//!
//! let transition = reduce(&state, Command::File(FileCommand::Create), &config).unwrap();
//! assert!(matches!(transition.result, CommandResult::FileCreated(_)));
//! assert_eq!(transition.state.files().len(), 2);
//!
//! // The previous state is untouched.
//! assert_eq!(state.files().len(), 1);
//! ```

use crate::clipboard::CopyTarget;
use crate::completion::{CompletionState, suggest};
use crate::config::{IdeConfig, Theme};
use crate::editing::{self, EditOutcome, TextRange};
use crate::execution::{RunSnapshot, TestOutcome};
use crate::files::{CodeFile, DeleteOutcome, FileId, FileStore, base_name};
use crate::layout::SplitLayout;
use crate::line_index::LineIndex;
use crate::test_cases::{TestCaseId, TestCasePatch, TestStatus};
use ide_core_lang::Language;
use std::collections::{BTreeMap, BTreeSet};

/// Caret of the active file: `anchor` stays put while `head` moves during an extending motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caret {
    /// Fixed end of the selection.
    pub anchor: usize,
    /// Moving end of the selection.
    pub head: usize,
}

impl Caret {
    /// Collapsed caret at `offset`.
    pub fn at(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Caret covering `range` (head at the end).
    pub fn from_range(range: TextRange) -> Self {
        Self {
            anchor: range.start,
            head: range.end,
        }
    }

    /// Normalized selection range.
    pub fn range(&self) -> TextRange {
        TextRange::new(self.anchor, self.head)
    }
}

/// In-place rename in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameBuffer {
    /// File being renamed.
    pub file: FileId,
    /// Current text of the name field.
    pub text: String,
}

/// Application state of the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct IdeState {
    files: FileStore,
    caret: Caret,
    completion: CompletionState,
    layout: SplitLayout,
    rename: Option<RenameBuffer>,
    copied: BTreeSet<CopyTarget>,
    runs: BTreeMap<FileId, RunSnapshot>,
    theme: Theme,
}

impl IdeState {
    /// Initial state: one active `main.cpp`, layout from config.
    pub fn new(config: &IdeConfig) -> Self {
        Self {
            files: FileStore::new(),
            caret: Caret::default(),
            completion: CompletionState::default(),
            layout: SplitLayout::new(config.split),
            rename: None,
            copied: BTreeSet::new(),
            runs: BTreeMap::new(),
            theme: config.theme,
        }
    }

    /// All files.
    pub fn files(&self) -> &FileStore {
        &self.files
    }

    /// The active file.
    pub fn active_file(&self) -> Option<&CodeFile> {
        self.files.active()
    }

    /// Selection in the active file.
    pub fn selection(&self) -> TextRange {
        self.caret.range()
    }

    /// Caret (anchor + head) in the active file.
    pub fn caret(&self) -> Caret {
        self.caret
    }

    /// Completion popup.
    pub fn completion(&self) -> &CompletionState {
        &self.completion
    }

    /// Editor/test pane split.
    pub fn layout(&self) -> &SplitLayout {
        &self.layout
    }

    /// Rename in progress, if any.
    pub fn rename(&self) -> Option<&RenameBuffer> {
        self.rename.as_ref()
    }

    /// Whether `target` was copied recently.
    pub fn is_copied(&self, target: CopyTarget) -> bool {
        self.copied.contains(&target)
    }

    /// Snapshot of the run in flight for `file`.
    pub fn pending_run(&self, file: FileId) -> Option<&RunSnapshot> {
        self.runs.get(&file)
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }
}

/// File tab commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCommand {
    /// Append a new cpp file and activate it.
    Create,
    /// Delete a file (the last file is kept).
    Delete {
        /// Target file.
        file: FileId,
    },
    /// Activate a file.
    SetActive {
        /// Target file.
        file: FileId,
    },
    /// Activate the file `step` tabs away from the active one (wrapping).
    Cycle {
        /// Signed tab distance.
        step: isize,
    },
    /// Rename a file directly.
    Rename {
        /// Target file.
        file: FileId,
        /// New name (trimmed; empty is ignored).
        name: String,
    },
    /// Switch a file's language (resets its source to the template).
    ChangeLanguage {
        /// Target file.
        file: FileId,
        /// New language.
        language: Language,
    },
    /// Open the in-place name editor, seeded with the name minus its extension.
    BeginRename {
        /// Target file.
        file: FileId,
    },
    /// Replace the text of the name editor.
    UpdateRename {
        /// Current field text.
        text: String,
    },
    /// Apply the name editor (Enter or focus loss).
    CommitRename,
    /// Close the name editor without renaming (Escape).
    CancelRename,
}

/// Test case panel commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestCaseCommand {
    /// Append a blank test case.
    Add {
        /// Owning file.
        file: FileId,
    },
    /// Edit a test case's input and/or expected output.
    Update {
        /// Owning file.
        file: FileId,
        /// Target test case.
        test_case: TestCaseId,
        /// Fields to change.
        patch: TestCasePatch,
    },
    /// Delete a test case (the last one is kept).
    Delete {
        /// Owning file.
        file: FileId,
        /// Target test case.
        test_case: TestCaseId,
    },
}

/// Caret motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMotion {
    /// One char left.
    Left,
    /// One char right.
    Right,
    /// One line up, same column (clamped).
    Up,
    /// One line down, same column (clamped).
    Down,
    /// Start of the current line.
    LineStart,
    /// End of the current line.
    LineEnd,
    /// Start of the text.
    DocumentStart,
    /// End of the text.
    DocumentEnd,
}

/// Editing commands on the active file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Type text, replacing the selection.
    InsertText {
        /// Typed text.
        text: String,
    },
    /// Delete the selection or the char before the caret.
    Backspace,
    /// Delete the selection or the char after the caret.
    DeleteForward,
    /// Replace the whole source (a host-side text control changed) and place the selection.
    ReplaceSource {
        /// New source.
        text: String,
        /// New selection (char offsets).
        selection: TextRange,
    },
    /// Set the selection (char offsets, clamped).
    SetSelection {
        /// New selection.
        selection: TextRange,
    },
    /// Move the caret.
    MoveCaret {
        /// Motion.
        motion: CaretMotion,
        /// Keep the anchor (extend the selection).
        extend: bool,
    },
    /// Toggle line comments on the selected lines.
    ToggleComment,
    /// Replace the selection with the indent unit.
    Indent,
    /// Insert a newline carrying the current indentation.
    InsertNewline,
}

/// Completion popup commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionCommand {
    /// Highlight the next item.
    SelectNext,
    /// Highlight the previous item.
    SelectPrev,
    /// Insert an item (`None` = highlighted item) in place of the token before the caret.
    Accept {
        /// Item index, e.g. from a click.
        index: Option<usize>,
    },
    /// Hide the popup.
    Dismiss,
}

/// Keys with context-dependent meaning in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    /// Accept a suggestion, else indent.
    Tab,
    /// Accept a suggestion, else newline with auto-indent.
    Enter,
    /// Hide suggestions.
    Escape,
    /// Previous suggestion, else caret up.
    Up,
    /// Next suggestion, else caret down.
    Down,
    /// The comment-toggle chord.
    ToggleComment,
}

/// Mock run commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunCommand {
    /// Start running a file's test cases.
    Start {
        /// Target file.
        file: FileId,
    },
    /// Store the results of a run started earlier.
    Finish {
        /// Target file.
        file: FileId,
        /// Per-test results.
        outcomes: Vec<TestOutcome>,
    },
}

/// Split layout commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutCommand {
    /// Pointer pressed on the divider.
    BeginDrag,
    /// Pointer moved.
    DragTo {
        /// Pointer x position.
        pointer_x: f64,
        /// Left edge of the container.
        container_left: f64,
        /// Width of the container.
        container_width: f64,
    },
    /// Pointer released.
    EndDrag,
    /// Set the editor pane width directly (clamped).
    SetEditorPercent(f64),
}

/// Copy acknowledgement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardCommand {
    /// A copy of `target` succeeded.
    MarkCopied(CopyTarget),
    /// The acknowledgement for `target` expired.
    ClearCopied(CopyTarget),
}

/// Widget-level commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    /// Switch between dark and light.
    ToggleTheme,
    /// Set the theme.
    SetTheme(Theme),
    /// The widget is being torn down: release pointer capture.
    Dispose,
}

/// Unified command type.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// File tab commands.
    File(FileCommand),
    /// Test case commands.
    TestCase(TestCaseCommand),
    /// Editing commands.
    Edit(EditCommand),
    /// Context-dependent editor keys.
    Key(EditorKey),
    /// Completion popup commands.
    Completion(CompletionCommand),
    /// Mock run commands.
    Run(RunCommand),
    /// Split layout commands.
    Layout(LayoutCommand),
    /// Copy acknowledgement commands.
    Clipboard(ClipboardCommand),
    /// Widget-level commands.
    View(ViewCommand),
}

/// Command execution result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Success.
    Success,
    /// The command was valid but a guard left the state as it was.
    Unchanged,
    /// A file was created.
    FileCreated(FileId),
    /// A test case was added.
    TestCaseAdded(TestCaseId),
    /// A run started; its results are due after the run delay.
    RunStarted(FileId),
    /// A run finished.
    RunFinished {
        /// File that ran.
        file: FileId,
        /// Passed test cases.
        passed: usize,
        /// Failed test cases.
        failed: usize,
    },
    /// A copy acknowledgement was raised.
    Copied(CopyTarget),
}

/// Command errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// No file with this id.
    #[error("file not found: {}", .0.get())]
    FileNotFound(FileId),
    /// No test case with this id in the file.
    #[error("test case {} not found in file {}", .test_case.get(), .file.get())]
    TestCaseNotFound {
        /// Owning file.
        file: FileId,
        /// Missing test case.
        test_case: TestCaseId,
    },
    /// A run of this file is already in flight.
    #[error("file {} is already running", .0.get())]
    RunInFlight(FileId),
}

/// A computed transition.
#[derive(Debug, Clone)]
pub struct Transition {
    /// The new state.
    pub state: IdeState,
    /// What happened.
    pub result: CommandResult,
}

/// Apply `command` to `state` and return the next state.
pub fn reduce(
    state: &IdeState,
    command: Command,
    config: &IdeConfig,
) -> Result<Transition, CommandError> {
    let mut next = state.clone();
    let result = next.apply(command, config)?;
    Ok(Transition {
        state: next,
        result,
    })
}

impl IdeState {
    fn apply(&mut self, command: Command, config: &IdeConfig) -> Result<CommandResult, CommandError> {
        match command {
            Command::File(cmd) => self.apply_file(cmd, config),
            Command::TestCase(cmd) => self.apply_test_case(cmd),
            Command::Edit(cmd) => Ok(self.apply_edit(cmd, config)),
            Command::Key(key) => self.apply_key(key, config),
            Command::Completion(cmd) => Ok(self.apply_completion(cmd)),
            Command::Run(cmd) => self.apply_run(cmd),
            Command::Layout(cmd) => Ok(self.apply_layout(cmd)),
            Command::Clipboard(cmd) => Ok(self.apply_clipboard(cmd)),
            Command::View(cmd) => Ok(self.apply_view(cmd)),
        }
    }

    fn apply_file(
        &mut self,
        command: FileCommand,
        config: &IdeConfig,
    ) -> Result<CommandResult, CommandError> {
        match command {
            FileCommand::Create => {
                let id = self.files.create();
                self.reset_editor_view();
                Ok(CommandResult::FileCreated(id))
            }
            FileCommand::Delete { file } => match self.files.delete(file) {
                DeleteOutcome::NotFound => Err(CommandError::FileNotFound(file)),
                DeleteOutcome::KeptLastFile => Ok(CommandResult::Unchanged),
                DeleteOutcome::Deleted { promoted } => {
                    if promoted.is_some() {
                        self.reset_editor_view();
                    }
                    if self.rename.as_ref().is_some_and(|r| r.file == file) {
                        self.rename = None;
                    }
                    self.runs.remove(&file);
                    self.copied.retain(|target| match target {
                        CopyTarget::Code(f) | CopyTarget::Output(f, _) => *f != file,
                    });
                    Ok(CommandResult::Success)
                }
            },
            FileCommand::SetActive { file } => self.activate(file),
            FileCommand::Cycle { step } => match self.files.neighbor_of_active(step) {
                Some(file) => self.activate(file),
                None => Ok(CommandResult::Unchanged),
            },
            FileCommand::Rename { file, name } => {
                if self.files.get(file).is_none() {
                    return Err(CommandError::FileNotFound(file));
                }
                Ok(changed(self.files.rename(file, &name, config.rename_extension)))
            }
            FileCommand::ChangeLanguage { file, language } => {
                if !self.files.change_language(file, language) {
                    return Err(CommandError::FileNotFound(file));
                }
                if self.files.active_id() == Some(file) {
                    self.reset_editor_view();
                }
                Ok(CommandResult::Success)
            }
            FileCommand::BeginRename { file } => {
                let Some(target) = self.files.get(file) else {
                    return Err(CommandError::FileNotFound(file));
                };
                self.rename = Some(RenameBuffer {
                    file,
                    text: base_name(&target.name).into_owned(),
                });
                Ok(CommandResult::Success)
            }
            FileCommand::UpdateRename { text } => match self.rename.as_mut() {
                Some(buffer) => {
                    buffer.text = text;
                    Ok(CommandResult::Success)
                }
                None => Ok(CommandResult::Unchanged),
            },
            FileCommand::CommitRename => {
                let Some(buffer) = self.rename.take() else {
                    return Ok(CommandResult::Unchanged);
                };
                self.files
                    .rename(buffer.file, &buffer.text, config.rename_extension);
                Ok(CommandResult::Success)
            }
            FileCommand::CancelRename => Ok(changed(self.rename.take().is_some())),
        }
    }

    fn activate(&mut self, file: FileId) -> Result<CommandResult, CommandError> {
        if self.files.active_id() == Some(file) {
            return Ok(CommandResult::Unchanged);
        }
        if !self.files.set_active(file) {
            return Err(CommandError::FileNotFound(file));
        }
        self.reset_editor_view();
        Ok(CommandResult::Success)
    }

    fn reset_editor_view(&mut self) {
        self.caret = Caret::default();
        self.completion.hide();
    }

    fn apply_test_case(&mut self, command: TestCaseCommand) -> Result<CommandResult, CommandError> {
        match command {
            TestCaseCommand::Add { file } => {
                let target = self
                    .files
                    .get_mut(file)
                    .ok_or(CommandError::FileNotFound(file))?;
                Ok(CommandResult::TestCaseAdded(target.test_cases.add()))
            }
            TestCaseCommand::Update {
                file,
                test_case,
                patch,
            } => {
                let target = self
                    .files
                    .get_mut(file)
                    .ok_or(CommandError::FileNotFound(file))?;
                if !target.test_cases.update(test_case, patch) {
                    return Err(CommandError::TestCaseNotFound { file, test_case });
                }
                Ok(CommandResult::Success)
            }
            TestCaseCommand::Delete { file, test_case } => {
                let target = self
                    .files
                    .get_mut(file)
                    .ok_or(CommandError::FileNotFound(file))?;
                if !target.test_cases.contains(test_case) {
                    return Err(CommandError::TestCaseNotFound { file, test_case });
                }
                if !target.test_cases.remove(test_case) {
                    return Ok(CommandResult::Unchanged);
                }
                self.copied.remove(&CopyTarget::Output(file, test_case));
                Ok(CommandResult::Success)
            }
        }
    }

    fn apply_edit(&mut self, command: EditCommand, config: &IdeConfig) -> CommandResult {
        let Some(file) = self.files.active() else {
            return CommandResult::Unchanged;
        };
        let source = file.source.as_str();
        let language = file.language;
        let len = source.chars().count();
        let selection = self.caret.range().clamp(len);

        match command {
            EditCommand::InsertText { text } => {
                let outcome = editing::replace_range(source, selection, &text);
                self.write_active(outcome, true, config)
            }
            EditCommand::Backspace => {
                let outcome = editing::backspace(source, selection);
                self.write_active(outcome, true, config)
            }
            EditCommand::DeleteForward => {
                let outcome = editing::delete_forward(source, selection);
                self.write_active(outcome, true, config)
            }
            EditCommand::ReplaceSource { text, selection } => {
                let selection = selection.clamp(text.chars().count());
                self.write_active(EditOutcome { text, selection }, true, config)
            }
            EditCommand::SetSelection { selection } => {
                self.caret = Caret::from_range(selection.clamp(len));
                self.completion.hide();
                CommandResult::Success
            }
            EditCommand::MoveCaret { motion, extend } => {
                let head = move_head(source, self.caret, motion);
                self.caret = if extend {
                    Caret {
                        anchor: self.caret.anchor.min(len),
                        head,
                    }
                } else {
                    Caret::at(head)
                };
                self.completion.hide();
                CommandResult::Success
            }
            EditCommand::ToggleComment => {
                let outcome =
                    editing::toggle_line_comment(source, selection, language.comment_marker());
                self.write_active(outcome, false, config)
            }
            EditCommand::Indent => {
                let outcome = editing::indent(source, selection, &config.indent_unit);
                self.write_active(outcome, false, config)
            }
            EditCommand::InsertNewline => {
                let outcome =
                    editing::newline_with_indent(source, selection, &config.indent_unit);
                self.write_active(outcome, false, config)
            }
        }
    }

    /// Store an edit in the active file. `typed` edits refresh completion, others hide it.
    fn write_active(&mut self, outcome: EditOutcome, typed: bool, config: &IdeConfig) -> CommandResult {
        let Some(file) = self.files.active_mut() else {
            return CommandResult::Unchanged;
        };
        file.source = outcome.text;
        let language = file.language;

        if outcome.selection.is_empty() {
            self.caret = Caret::at(outcome.selection.start);
        } else {
            self.caret = Caret::from_range(outcome.selection);
        }

        if typed {
            self.refresh_completion(language, config);
        } else {
            self.completion.hide();
        }
        CommandResult::Success
    }

    fn refresh_completion(&mut self, language: Language, config: &IdeConfig) {
        let Some(file) = self.files.active() else {
            return;
        };
        let (_, word) = editing::word_before_caret(&file.source, self.caret.range().start);
        let items = suggest(
            language,
            word,
            config.completion.min_prefix_len,
            config.completion.max_items,
        );
        if items.is_empty() {
            self.completion.hide();
        } else {
            self.completion
                .show(items.into_iter().map(str::to_string).collect());
        }
    }

    fn apply_key(&mut self, key: EditorKey, config: &IdeConfig) -> Result<CommandResult, CommandError> {
        let popup = self.completion.is_visible();
        let command = match key {
            EditorKey::Tab if popup => Command::Completion(CompletionCommand::Accept { index: None }),
            EditorKey::Enter if popup => {
                Command::Completion(CompletionCommand::Accept { index: None })
            }
            EditorKey::Escape if popup => Command::Completion(CompletionCommand::Dismiss),
            EditorKey::Up if popup => Command::Completion(CompletionCommand::SelectPrev),
            EditorKey::Down if popup => Command::Completion(CompletionCommand::SelectNext),
            EditorKey::Tab => Command::Edit(EditCommand::Indent),
            EditorKey::Enter => Command::Edit(EditCommand::InsertNewline),
            EditorKey::Escape => return Ok(CommandResult::Unchanged),
            EditorKey::Up => Command::Edit(EditCommand::MoveCaret {
                motion: CaretMotion::Up,
                extend: false,
            }),
            EditorKey::Down => Command::Edit(EditCommand::MoveCaret {
                motion: CaretMotion::Down,
                extend: false,
            }),
            EditorKey::ToggleComment => Command::Edit(EditCommand::ToggleComment),
        };
        self.apply(command, config)
    }

    fn apply_completion(&mut self, command: CompletionCommand) -> CommandResult {
        if !self.completion.is_visible() {
            return CommandResult::Unchanged;
        }
        match command {
            CompletionCommand::SelectNext => self.completion.select_next(),
            CompletionCommand::SelectPrev => self.completion.select_prev(),
            CompletionCommand::Dismiss => self.completion.hide(),
            CompletionCommand::Accept { index } => {
                let index = index.unwrap_or(self.completion.selected_index());
                let Some(item) = self.completion.items().get(index).cloned() else {
                    return CommandResult::Unchanged;
                };
                let Some(file) = self.files.active_mut() else {
                    return CommandResult::Unchanged;
                };
                let caret = self.caret.range().start;
                let outcome = editing::apply_completion(&file.source, caret, &item);
                file.source = outcome.text;
                self.caret = Caret::at(outcome.selection.start);
                self.completion.hide();
            }
        }
        CommandResult::Success
    }

    fn apply_run(&mut self, command: RunCommand) -> Result<CommandResult, CommandError> {
        match command {
            RunCommand::Start { file } => {
                let target = self
                    .files
                    .get_mut(file)
                    .ok_or(CommandError::FileNotFound(file))?;
                if target.running {
                    return Err(CommandError::RunInFlight(file));
                }
                target.running = true;
                for case in target.test_cases.iter_mut() {
                    case.status = Some(TestStatus::Running);
                }
                self.runs.insert(file, RunSnapshot::capture(target));
                Ok(CommandResult::RunStarted(file))
            }
            RunCommand::Finish { file, outcomes } => {
                self.runs.remove(&file);
                let Some(target) = self.files.get_mut(file) else {
                    return Ok(CommandResult::Unchanged);
                };

                let (mut passed, mut failed) = (0, 0);
                for outcome in outcomes {
                    let Some(case) = target.test_cases.get_mut(outcome.id) else {
                        continue;
                    };
                    match outcome.status {
                        TestStatus::Passed => passed += 1,
                        TestStatus::Failed => failed += 1,
                        TestStatus::Pending | TestStatus::Running => {}
                    }
                    case.actual_output = Some(outcome.actual_output);
                    case.status = Some(outcome.status);
                }
                target.running = false;
                Ok(CommandResult::RunFinished {
                    file,
                    passed,
                    failed,
                })
            }
        }
    }

    fn apply_layout(&mut self, command: LayoutCommand) -> CommandResult {
        match command {
            LayoutCommand::BeginDrag => self.layout.begin_drag(),
            LayoutCommand::DragTo {
                pointer_x,
                container_left,
                container_width,
            } => {
                return changed(self.layout.drag_to(pointer_x, container_left, container_width));
            }
            LayoutCommand::EndDrag => self.layout.end_drag(),
            LayoutCommand::SetEditorPercent(percent) => {
                return changed(self.layout.set_editor_percent(percent));
            }
        }
        CommandResult::Success
    }

    fn apply_clipboard(&mut self, command: ClipboardCommand) -> CommandResult {
        match command {
            ClipboardCommand::MarkCopied(target) => {
                self.copied.insert(target);
                CommandResult::Copied(target)
            }
            ClipboardCommand::ClearCopied(target) => changed(self.copied.remove(&target)),
        }
    }

    fn apply_view(&mut self, command: ViewCommand) -> CommandResult {
        match command {
            ViewCommand::ToggleTheme => self.theme = self.theme.toggled(),
            ViewCommand::SetTheme(theme) => self.theme = theme,
            ViewCommand::Dispose => self.layout.end_drag(),
        }
        CommandResult::Success
    }
}

fn changed(did_change: bool) -> CommandResult {
    if did_change {
        CommandResult::Success
    } else {
        CommandResult::Unchanged
    }
}

fn move_head(source: &str, caret: Caret, motion: CaretMotion) -> usize {
    let index = LineIndex::from_text(source);
    let len = index.char_count();
    let range = caret.range();
    let head = caret.head.min(len);
    let (line, column) = index.char_offset_to_position(head);

    match motion {
        CaretMotion::Left if !range.is_empty() => range.start,
        CaretMotion::Left => head.saturating_sub(1),
        CaretMotion::Right if !range.is_empty() => range.end.min(len),
        CaretMotion::Right => (head + 1).min(len),
        CaretMotion::Up if line == 0 => 0,
        CaretMotion::Up => index.position_to_char_offset(line - 1, column),
        CaretMotion::Down if line + 1 >= index.line_count() => len,
        CaretMotion::Down => index.position_to_char_offset(line + 1, column),
        CaretMotion::LineStart => index.line_start(line),
        CaretMotion::LineEnd => index.line_start(line) + index.line_len(line),
        CaretMotion::DocumentStart => 0,
        CaretMotion::DocumentEnd => len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> (IdeState, IdeConfig) {
        let config = IdeConfig::default();
        (IdeState::new(&config), config)
    }

    fn run(state: &IdeState, command: Command, config: &IdeConfig) -> IdeState {
        reduce(state, command, config).unwrap().state
    }

    #[test]
    fn test_failed_command_leaves_state_untouched() {
        let (state, config) = state();
        let err = reduce(
            &state,
            Command::File(FileCommand::SetActive {
                file: FileId::new(99),
            }),
            &config,
        )
        .unwrap_err();
        assert_eq!(err, CommandError::FileNotFound(FileId::new(99)));
        assert_eq!(state.files().active_id(), Some(FileId::new(1)));
    }

    #[test]
    fn test_caret_motions() {
        let (state, config) = state();
        let state = run(
            &state,
            Command::Edit(EditCommand::ReplaceSource {
                text: "ab\ncdef\ng".into(),
                selection: TextRange::caret(6),
            }),
            &config,
        );
        let moved = |state: &IdeState, motion| {
            run(
                state,
                Command::Edit(EditCommand::MoveCaret {
                    motion,
                    extend: false,
                }),
                &config,
            )
            .selection()
        };

        assert_eq!(moved(&state, CaretMotion::Up), TextRange::caret(2));
        assert_eq!(moved(&state, CaretMotion::Down), TextRange::caret(9));
        assert_eq!(moved(&state, CaretMotion::LineStart), TextRange::caret(3));
        assert_eq!(moved(&state, CaretMotion::LineEnd), TextRange::caret(7));
        assert_eq!(moved(&state, CaretMotion::Left), TextRange::caret(5));
        assert_eq!(moved(&state, CaretMotion::Right), TextRange::caret(7));
        assert_eq!(moved(&state, CaretMotion::DocumentEnd), TextRange::caret(9));
    }

    #[test]
    fn test_extending_selection_keeps_anchor() {
        let (state, config) = state();
        let state = run(
            &state,
            Command::Edit(EditCommand::ReplaceSource {
                text: "abc\ndef".into(),
                selection: TextRange::caret(5),
            }),
            &config,
        );
        let state = run(
            &state,
            Command::Edit(EditCommand::MoveCaret {
                motion: CaretMotion::Up,
                extend: true,
            }),
            &config,
        );
        assert_eq!(state.selection(), TextRange::new(1, 5));
        assert_eq!(state.caret().anchor, 5);

        let state = run(
            &state,
            Command::Edit(EditCommand::MoveCaret {
                motion: CaretMotion::Left,
                extend: false,
            }),
            &config,
        );
        assert_eq!(state.selection(), TextRange::caret(1));
    }

    #[test]
    fn test_rename_workflow() {
        let (state, config) = state();
        let id = state.files().active_id().unwrap();
        let state = run(&state, Command::File(FileCommand::BeginRename { file: id }), &config);
        assert_eq!(state.rename().unwrap().text, "main");

        let state = run(
            &state,
            Command::File(FileCommand::UpdateRename {
                text: "   ".into(),
            }),
            &config,
        );
        let state = run(&state, Command::File(FileCommand::CommitRename), &config);
        assert!(state.rename().is_none());
        assert_eq!(state.files().get(id).unwrap().name, "main.cpp");

        let state = run(&state, Command::File(FileCommand::BeginRename { file: id }), &config);
        let state = run(
            &state,
            Command::File(FileCommand::UpdateRename {
                text: " solver ".into(),
            }),
            &config,
        );
        let cancelled = run(&state, Command::File(FileCommand::CancelRename), &config);
        assert_eq!(cancelled.files().get(id).unwrap().name, "main.cpp");

        let committed = run(&state, Command::File(FileCommand::CommitRename), &config);
        assert_eq!(committed.files().get(id).unwrap().name, "solver.cpp");
    }

    #[test]
    fn test_theme_and_dispose() {
        let (state, config) = state();
        let state = run(&state, Command::View(ViewCommand::ToggleTheme), &config);
        assert_eq!(state.theme(), Theme::Light);

        let state = run(&state, Command::Layout(LayoutCommand::BeginDrag), &config);
        assert!(state.layout().pointer_capture().is_some());
        let state = run(&state, Command::View(ViewCommand::Dispose), &config);
        assert!(state.layout().pointer_capture().is_none());
    }
}
