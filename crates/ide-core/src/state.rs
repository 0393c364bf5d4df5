//! IDE State Manager
//!
//! Owns the current [`IdeState`] value and everything that lives outside the pure transition:
//! the execution engine, pending timers, the version counter and change subscribers.
//!
//! # Overview
//!
//! - **Command Execution**: every [`Command`] goes through [`reduce`]; on success the new state
//!   replaces the old one as a whole value
//! - **Version Tracking**: the version only moves when the state actually changed
//! - **Change Notifications**: subscribers receive a [`StateChange`] per bump
//! - **Timers**: run completion and copy acknowledgement resets are scheduled on a
//!   [`TimerQueue`] that the host advances with [`tick`](IdeStateManager::tick)
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use ide_core::{Command, IdeConfig, IdeStateManager, RunCommand, TestStatus};
//!
//! let mut manager = IdeStateManager::new(IdeConfig::default());
//! let file = manager.state().files().active_id().unwrap();
//!
//! manager.execute(Command::Run(RunCommand::Start { file })).unwrap();
//! manager.tick(Duration::from_millis(1500));
//!
//! let case = manager.state().active_file().unwrap().test_cases.iter().next().unwrap();
//! assert_eq!(case.status, Some(TestStatus::Passed));
//! ```

use crate::clipboard::{Clipboard, CopyTarget};
use crate::commands::{
    ClipboardCommand, Command, CommandError, CommandResult, EditCommand, EditorKey, IdeState,
    RunCommand, reduce,
};
use crate::config::IdeConfig;
use crate::execution::{ExecutionEngine, MockExecutionEngine};
use crate::timers::{TimerEvent, TimerQueue};
use std::time::Duration;

/// State change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeType {
    /// Files were added, removed, renamed, activated or changed language
    FilesChanged,
    /// Source of the active file modified
    DocumentModified,
    /// Caret or selection moved
    SelectionChanged,
    /// Completion list shown, hidden or moved
    CompletionChanged,
    /// Test cases added, removed or edited
    TestCasesChanged,
    /// A run started or finished
    RunStatusChanged,
    /// Split percentage or drag state changed
    LayoutChanged,
    /// Copy acknowledgement raised or cleared
    ClipboardChanged,
    /// Theme or other widget-level state changed
    ViewChanged,
}

/// State change record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// Change type
    pub change_type: StateChangeType,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
}

impl StateChange {
    /// Create a new state change record.
    pub fn new(change_type: StateChangeType, old_version: u64, new_version: u64) -> Self {
        Self {
            change_type,
            old_version,
            new_version,
        }
    }
}

/// State change callback function type
pub type StateChangeCallback = Box<dyn FnMut(&StateChange) + Send>;

/// Single controller of the widget state.
///
/// Hosts map their input events onto [`Command`]s, call [`execute`](Self::execute), and read the
/// result back through [`state`](Self::state). Delayed behavior is driven by
/// [`tick`](Self::tick); the manager never reads a clock itself.
pub struct IdeStateManager {
    state: IdeState,
    config: IdeConfig,
    engine: Box<dyn ExecutionEngine + Send>,
    timers: TimerQueue,
    state_version: u64,
    callbacks: Vec<StateChangeCallback>,
}

impl IdeStateManager {
    /// Create a manager with the mock execution engine.
    pub fn new(config: IdeConfig) -> Self {
        Self::with_engine(config, MockExecutionEngine)
    }

    /// Create a manager with a custom execution engine.
    pub fn with_engine(config: IdeConfig, engine: impl ExecutionEngine + Send + 'static) -> Self {
        Self {
            state: IdeState::new(&config),
            config,
            engine: Box::new(engine),
            timers: TimerQueue::new(),
            state_version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &IdeState {
        &self.state
    }

    /// Configuration in use.
    pub fn config(&self) -> &IdeConfig {
        &self.config
    }

    /// Get current version number
    pub fn version(&self) -> u64 {
        self.state_version
    }

    /// Check if state has changed since a version
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.state_version > version
    }

    /// Subscribe to state changes
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Time until the next pending timer fires, if any.
    pub fn next_timer_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Execute a command.
    ///
    /// A failed command leaves the state untouched. A successful command that changes nothing
    /// does not bump the version.
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        let change_type = Self::change_type_for_command(&command);
        tracing::debug!(?command, "executing command");

        let transition = match reduce(&self.state, command, &self.config) {
            Ok(transition) => transition,
            Err(err) => {
                tracing::debug!(%err, "command rejected");
                return Err(err);
            }
        };

        let changed = transition.state != self.state;
        self.state = transition.state;
        self.schedule_timers(&transition.result);

        if changed {
            self.mark_modified(change_type);
        }
        Ok(transition.result)
    }

    /// Copy a file's source or a test case's actual output to `clipboard` and raise the
    /// acknowledgement flag for `target`.
    ///
    /// A test case that has not produced output yet has nothing to copy. A clipboard failure
    /// is logged and leaves the state unchanged.
    pub fn copy(
        &mut self,
        target: CopyTarget,
        clipboard: &mut dyn Clipboard,
    ) -> Result<CommandResult, CommandError> {
        let text = match target {
            CopyTarget::Code(file) => {
                let file = self
                    .state
                    .files()
                    .get(file)
                    .ok_or(CommandError::FileNotFound(file))?;
                file.source.clone()
            }
            CopyTarget::Output(file, test_case) => {
                let case = self
                    .state
                    .files()
                    .get(file)
                    .ok_or(CommandError::FileNotFound(file))?
                    .test_cases
                    .get(test_case)
                    .ok_or(CommandError::TestCaseNotFound { file, test_case })?;
                match &case.actual_output {
                    Some(output) => output.clone(),
                    None => return Ok(CommandResult::Unchanged),
                }
            }
        };

        if let Err(err) = clipboard.write_text(&text) {
            tracing::warn!(%err, ?target, "failed to copy");
            return Ok(CommandResult::Unchanged);
        }
        self.execute(Command::Clipboard(ClipboardCommand::MarkCopied(target)))
    }

    /// Advance host time by `elapsed` and fire the timers that became due.
    ///
    /// Returns the results of the commands the timers produced, in firing order.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<CommandResult> {
        let mut results = Vec::new();
        for event in self.timers.advance(elapsed) {
            let command = match event {
                TimerEvent::RunComplete(file) => {
                    let Some(snapshot) = self.state.pending_run(file) else {
                        tracing::debug!(file = file.get(), "run completed for a deleted file");
                        continue;
                    };
                    let outcomes = snapshot.evaluate(self.engine.as_ref());
                    Command::Run(RunCommand::Finish { file, outcomes })
                }
                TimerEvent::ResetCopied(target) => {
                    Command::Clipboard(ClipboardCommand::ClearCopied(target))
                }
            };
            match self.execute(command) {
                Ok(result) => results.push(result),
                Err(err) => tracing::warn!(%err, ?event, "timer command failed"),
            }
        }
        results
    }

    fn schedule_timers(&mut self, result: &CommandResult) {
        match result {
            CommandResult::RunStarted(file) => {
                tracing::info!(file = file.get(), delay = ?self.config.run_delay(), "run started");
                self.timers
                    .schedule(self.config.run_delay(), TimerEvent::RunComplete(*file));
            }
            CommandResult::RunFinished {
                file,
                passed,
                failed,
            } => {
                tracing::info!(file = file.get(), passed, failed, "run finished");
            }
            CommandResult::Copied(target) => {
                self.timers
                    .reschedule(self.config.copy_ack(), TimerEvent::ResetCopied(*target));
            }
            _ => {}
        }
    }

    fn change_type_for_command(command: &Command) -> StateChangeType {
        match command {
            Command::File(_) => StateChangeType::FilesChanged,
            Command::TestCase(_) => StateChangeType::TestCasesChanged,
            Command::Edit(EditCommand::SetSelection { .. } | EditCommand::MoveCaret { .. }) => {
                StateChangeType::SelectionChanged
            }
            Command::Edit(_) => StateChangeType::DocumentModified,
            Command::Key(EditorKey::Up | EditorKey::Down) => StateChangeType::SelectionChanged,
            Command::Key(EditorKey::Escape) => StateChangeType::CompletionChanged,
            Command::Key(_) => StateChangeType::DocumentModified,
            Command::Completion(_) => StateChangeType::CompletionChanged,
            Command::Run(_) => StateChangeType::RunStatusChanged,
            Command::Layout(_) => StateChangeType::LayoutChanged,
            Command::Clipboard(_) => StateChangeType::ClipboardChanged,
            Command::View(_) => StateChangeType::ViewChanged,
        }
    }

    /// Increment the version and notify subscribers.
    pub fn mark_modified(&mut self, change_type: StateChangeType) {
        let old_version = self.state_version;
        self.state_version += 1;
        let change = StateChange::new(change_type, old_version, self.state_version);
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::commands::{FileCommand, LayoutCommand};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_version_moves_only_on_change() {
        let mut manager = IdeStateManager::new(IdeConfig::default());
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        manager.subscribe(move |change| sink.lock().unwrap().push(change.clone()));

        let result = manager
            .execute(Command::Layout(LayoutCommand::DragTo {
                pointer_x: 10.0,
                container_left: 0.0,
                container_width: 100.0,
            }))
            .unwrap();
        assert_eq!(result, CommandResult::Unchanged);
        assert_eq!(manager.version(), 0);

        manager.execute(Command::File(FileCommand::Create)).unwrap();
        assert_eq!(manager.version(), 1);
        assert!(manager.has_changed_since(0));

        let changes = changes.lock().unwrap();
        assert_eq!(
            changes.as_slice(),
            &[StateChange::new(StateChangeType::FilesChanged, 0, 1)]
        );
    }

    #[test]
    fn test_copy_of_missing_output_is_a_no_op() {
        let mut manager = IdeStateManager::new(IdeConfig::default());
        let file = manager.state().files().active_id().unwrap();
        let case = manager.state().active_file().unwrap().test_cases.iter().next().unwrap().id;

        let mut clipboard = MemoryClipboard::default();
        let result = manager
            .copy(CopyTarget::Output(file, case), &mut clipboard)
            .unwrap();
        assert_eq!(result, CommandResult::Unchanged);
        assert_eq!(clipboard.contents(), None);
        assert_eq!(manager.next_timer_deadline(), None);
    }
}
