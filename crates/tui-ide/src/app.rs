//! Terminal front end: maps key/mouse events onto `ide-core` commands and draws the state.

use crate::clipboard::SystemClipboard;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ide_core::{
    CaretMotion, Command, CommandResult, CompletionCommand, CopyTarget, EditCommand, EditorKey,
    FileCommand, FileId, IdeConfig, IdeStateManager, LayoutCommand, LineIndex, RunCommand,
    TestCase, TestCaseCommand, TestCasePatch, TestStatus, Theme, ViewCommand,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

const SPLIT_STEP: f64 = 5.0;
const POPUP_WIDTH: u16 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Editor,
    Tests,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TestField {
    Input,
    Expected,
}

impl TestField {
    fn other(self) -> Self {
        match self {
            TestField::Input => TestField::Expected,
            TestField::Expected => TestField::Input,
        }
    }
}

struct Palette {
    bg: Color,
    fg: Color,
    muted: Color,
    accent: Color,
    selection: Color,
    bar_bg: Color,
    passed: Color,
    failed: Color,
    running: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Black,
                fg: Color::Gray,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                selection: Color::Blue,
                bar_bg: Color::DarkGray,
                passed: Color::Green,
                failed: Color::Red,
                running: Color::Yellow,
            },
            Theme::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                selection: Color::LightBlue,
                bar_bg: Color::Gray,
                passed: Color::Green,
                failed: Color::Red,
                running: Color::Magenta,
            },
        }
    }
}

/// Screen regions from the last frame, used for mouse hit testing.
#[derive(Debug, Default, Clone, Copy)]
struct HitAreas {
    tabs: Rect,
    body: Rect,
    divider_x: u16,
    popup: Option<Rect>,
}

pub(crate) struct App {
    manager: IdeStateManager,
    clipboard: SystemClipboard,
    focus: Focus,
    focused_case: usize,
    test_field: TestField,
    scroll_top: usize,
    status_message: String,
    should_quit: bool,
    /// `(file, start column, end column)` of each tab in the last frame.
    tab_spans: Vec<(FileId, u16, u16)>,
    areas: HitAreas,
}

impl App {
    pub(crate) fn new(config: IdeConfig) -> Self {
        let mut manager = IdeStateManager::new(config);
        manager.subscribe(|change| {
            tracing::trace!(
                change = ?change.change_type,
                version = change.new_version,
                "state changed"
            );
        });

        Self {
            manager,
            clipboard: SystemClipboard::default(),
            focus: Focus::Editor,
            focused_case: 0,
            test_field: TestField::Input,
            scroll_top: 0,
            status_message: String::new(),
            should_quit: false,
            tab_spans: Vec::new(),
            areas: HitAreas::default(),
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn next_timer_deadline(&self) -> Option<Duration> {
        self.manager.next_timer_deadline()
    }

    pub(crate) fn tick(&mut self, elapsed: Duration) {
        for result in self.manager.tick(elapsed) {
            if let CommandResult::RunFinished { passed, failed, .. } = result {
                self.status_message = format!("Run finished: {passed} passed, {failed} failed");
            }
        }
    }

    fn execute(&mut self, command: Command) -> Option<CommandResult> {
        match self.manager.execute(command) {
            Ok(result) => Some(result),
            Err(err) => {
                self.status_message = format!("Command failed: {err}");
                None
            }
        }
    }

    fn active_file_id(&self) -> Option<FileId> {
        self.manager.state().files().active_id()
    }

    fn focused_test_case(&self) -> Option<(FileId, &TestCase)> {
        let file = self.manager.state().active_file()?;
        let len = file.test_cases.len();
        let case = file
            .test_cases
            .iter()
            .nth(self.focused_case.min(len.saturating_sub(1)))?;
        Some((file.id, case))
    }

    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.manager.state().rename().is_some() {
            self.handle_rename_key(key);
            return;
        }

        if self.handle_global_key(key) {
            return;
        }

        match self.focus {
            Focus::Editor => self.handle_editor_key(key),
            Focus::Tests => self.handle_tests_key(key),
        }
    }

    fn handle_rename_key(&mut self, key: KeyEvent) {
        let Some(mut text) = self.manager.state().rename().map(|r| r.text.clone()) else {
            return;
        };
        match key.code {
            KeyCode::Enter => {
                self.execute(Command::File(FileCommand::CommitRename));
            }
            KeyCode::Esc => {
                self.execute(Command::File(FileCommand::CancelRename));
            }
            KeyCode::Backspace => {
                text.pop();
                self.execute(Command::File(FileCommand::UpdateRename { text }));
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                text.push(c);
                self.execute(Command::File(FileCommand::UpdateRename { text }));
            }
            _ => {}
        }
    }

    /// Shortcuts that work regardless of focus. Returns whether the key was consumed.
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('n') if ctrl => {
                self.execute(Command::File(FileCommand::Create));
                self.focused_case = 0;
            }
            KeyCode::Char('w') if ctrl => {
                if let Some(file) = self.active_file_id() {
                    if self.manager.state().files().len() == 1 {
                        self.status_message = "The last file cannot be closed".to_string();
                    } else {
                        self.execute(Command::File(FileCommand::Delete { file }));
                        self.focused_case = 0;
                    }
                }
            }
            KeyCode::PageUp if ctrl => {
                self.execute(Command::File(FileCommand::Cycle { step: -1 }));
                self.focused_case = 0;
            }
            KeyCode::PageDown if ctrl => {
                self.execute(Command::File(FileCommand::Cycle { step: 1 }));
                self.focused_case = 0;
            }
            KeyCode::F(2) => {
                if let Some(file) = self.active_file_id() {
                    self.execute(Command::File(FileCommand::BeginRename { file }));
                }
            }
            KeyCode::F(4) => {
                if let Some(file) = self.manager.state().active_file() {
                    let (file, language) = (file.id, file.language.next());
                    self.execute(Command::File(FileCommand::ChangeLanguage { file, language }));
                    self.status_message = format!("Language: {}", language.display_name());
                }
            }
            KeyCode::F(5) => self.run_active(),
            KeyCode::Char('r') if ctrl => self.run_active(),
            KeyCode::Char('t') if ctrl => {
                if let Some(file) = self.active_file_id() {
                    self.execute(Command::TestCase(TestCaseCommand::Add { file }));
                    let len = self
                        .manager
                        .state()
                        .active_file()
                        .map_or(0, |f| f.test_cases.len());
                    self.focused_case = len.saturating_sub(1);
                }
            }
            KeyCode::Char('k') if ctrl => self.delete_focused_case(),
            KeyCode::Char('y') if ctrl => {
                if let Some(file) = self.active_file_id() {
                    self.copy(CopyTarget::Code(file));
                }
            }
            KeyCode::Char('o') if ctrl => {
                if let Some((file, case)) = self.focused_test_case() {
                    let target = CopyTarget::Output(file, case.id);
                    if case.actual_output.is_some() {
                        self.copy(target);
                    } else {
                        self.status_message = "Run the tests first".to_string();
                    }
                }
            }
            KeyCode::Char('d') if ctrl => {
                self.execute(Command::View(ViewCommand::ToggleTheme));
            }
            KeyCode::F(6) => {
                self.focus = match self.focus {
                    Focus::Editor => Focus::Tests,
                    Focus::Tests => Focus::Editor,
                };
            }
            KeyCode::Left if alt => self.nudge_split(-SPLIT_STEP),
            KeyCode::Right if alt => self.nudge_split(SPLIT_STEP),
            _ => return false,
        }
        true
    }

    fn run_active(&mut self) {
        let Some(file) = self.active_file_id() else {
            return;
        };
        if self.execute(Command::Run(RunCommand::Start { file })).is_some() {
            self.status_message = "Running...".to_string();
        }
    }

    fn delete_focused_case(&mut self) {
        let Some((file, case)) = self.focused_test_case() else {
            return;
        };
        let test_case = case.id;
        if let Some(CommandResult::Unchanged) = self.execute(Command::TestCase(
            TestCaseCommand::Delete { file, test_case },
        )) {
            self.status_message = "The last test case cannot be deleted".to_string();
        }
        self.focused_case = self.focused_case.saturating_sub(1);
    }

    fn copy(&mut self, target: CopyTarget) {
        match self.manager.copy(target, &mut self.clipboard) {
            Ok(CommandResult::Copied(_)) => {
                self.status_message = match target {
                    CopyTarget::Code(_) => "Code copied".to_string(),
                    CopyTarget::Output(..) => "Output copied".to_string(),
                };
            }
            Ok(_) => self.status_message = "Copy failed".to_string(),
            Err(err) => self.status_message = format!("Copy failed: {err}"),
        }
    }

    fn nudge_split(&mut self, delta: f64) {
        let percent = self.manager.state().layout().editor_percent() + delta;
        self.execute(Command::Layout(LayoutCommand::SetEditorPercent(percent)));
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let move_caret = |motion| {
            Command::Edit(EditCommand::MoveCaret {
                motion,
                extend: shift,
            })
        };

        let command = match key.code {
            // Terminals report Ctrl+/ as Ctrl+7 or Ctrl+_.
            KeyCode::Char('/' | '7' | '_') if ctrl => Command::Key(EditorKey::ToggleComment),
            KeyCode::Up if !shift => Command::Key(EditorKey::Up),
            KeyCode::Down if !shift => Command::Key(EditorKey::Down),
            KeyCode::Up => move_caret(CaretMotion::Up),
            KeyCode::Down => move_caret(CaretMotion::Down),
            KeyCode::Left => move_caret(CaretMotion::Left),
            KeyCode::Right => move_caret(CaretMotion::Right),
            KeyCode::Home if ctrl => move_caret(CaretMotion::DocumentStart),
            KeyCode::End if ctrl => move_caret(CaretMotion::DocumentEnd),
            KeyCode::Home => move_caret(CaretMotion::LineStart),
            KeyCode::End => move_caret(CaretMotion::LineEnd),
            KeyCode::Tab => Command::Key(EditorKey::Tab),
            KeyCode::Enter => Command::Key(EditorKey::Enter),
            KeyCode::Esc => Command::Key(EditorKey::Escape),
            KeyCode::Backspace => Command::Edit(EditCommand::Backspace),
            KeyCode::Delete => Command::Edit(EditCommand::DeleteForward),
            KeyCode::Char(c) if !ctrl => Command::Edit(EditCommand::InsertText {
                text: c.to_string(),
            }),
            _ => return,
        };
        self.execute(command);
    }

    fn handle_tests_key(&mut self, key: KeyEvent) {
        let case_count = self
            .manager
            .state()
            .active_file()
            .map_or(0, |f| f.test_cases.len());

        match key.code {
            KeyCode::Up => self.focused_case = self.focused_case.saturating_sub(1),
            KeyCode::Down => {
                self.focused_case = (self.focused_case + 1).min(case_count.saturating_sub(1));
            }
            KeyCode::Tab | KeyCode::BackTab => self.test_field = self.test_field.other(),
            KeyCode::Esc => self.focus = Focus::Editor,
            KeyCode::Backspace => self.edit_focused_field(|text| {
                text.pop();
            }),
            KeyCode::Enter => self.edit_focused_field(|text| text.push('\n')),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit_focused_field(|text| text.push(c));
            }
            _ => {}
        }
    }

    fn edit_focused_field(&mut self, edit: impl FnOnce(&mut String)) {
        let Some((file, case)) = self.focused_test_case() else {
            return;
        };
        let test_case = case.id;
        let patch = match self.test_field {
            TestField::Input => {
                let mut text = case.input.clone();
                edit(&mut text);
                TestCasePatch {
                    input: Some(text),
                    expected_output: None,
                }
            }
            TestField::Expected => {
                let mut text = case.expected_output.clone().unwrap_or_default();
                edit(&mut text);
                TestCasePatch {
                    input: None,
                    expected_output: Some(Some(text)),
                }
            }
        };
        self.execute(Command::TestCase(TestCaseCommand::Update {
            file,
            test_case,
            patch,
        }));
    }

    pub(crate) fn handle_paste(&mut self, text: String) {
        match self.focus {
            Focus::Editor => {
                self.execute(Command::Edit(EditCommand::InsertText { text }));
            }
            Focus::Tests => self.edit_focused_field(|field| field.push_str(&text)),
        }
    }

    pub(crate) fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let body = self.areas.body;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(popup) = self.areas.popup
                    && contains(popup, mouse.column, mouse.row)
                {
                    let index = (mouse.row - popup.y).saturating_sub(1) as usize;
                    self.execute(Command::Completion(CompletionCommand::Accept {
                        index: Some(index),
                    }));
                    return;
                }

                if mouse.row == self.areas.tabs.y {
                    let hit = self
                        .tab_spans
                        .iter()
                        .find(|(_, start, end)| (*start..*end).contains(&mouse.column))
                        .map(|(file, ..)| *file);
                    if let Some(file) = hit {
                        self.execute(Command::File(FileCommand::SetActive { file }));
                        self.focused_case = 0;
                    }
                    return;
                }

                if contains(body, mouse.column, mouse.row)
                    && mouse.column.abs_diff(self.areas.divider_x) <= 1
                {
                    self.execute(Command::Layout(LayoutCommand::BeginDrag));
                } else if contains(body, mouse.column, mouse.row) {
                    self.focus = if mouse.column < self.areas.divider_x {
                        Focus::Editor
                    } else {
                        Focus::Tests
                    };
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.execute(Command::Layout(LayoutCommand::DragTo {
                    pointer_x: f64::from(mouse.column),
                    container_left: f64::from(body.x),
                    container_width: f64::from(body.width),
                }));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.execute(Command::Layout(LayoutCommand::EndDrag));
            }
            _ => {}
        }
    }

    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let palette = Palette::for_theme(self.manager.state().theme());
        let size = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
            size,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // tabs
                Constraint::Min(3),    // editor + tests
                Constraint::Length(1), // status line
                Constraint::Length(1), // shortcuts
            ])
            .split(size);

        let body = chunks[1];
        let (editor_width, tests_width) = self.manager.state().layout().split(body.width);
        let editor_area = Rect::new(body.x, body.y, editor_width, body.height);
        let tests_area = Rect::new(body.x + editor_width, body.y, tests_width, body.height);

        self.areas = HitAreas {
            tabs: chunks[0],
            body,
            divider_x: body.x + editor_width,
            popup: None,
        };

        self.render_tabs(frame, chunks[0], &palette);
        self.render_editor(frame, editor_area, &palette);
        self.render_tests(frame, tests_area, &palette);
        self.render_status_line(frame, chunks[2], &palette);
        self.render_shortcuts(frame, chunks[3], &palette);
    }

    fn render_tabs(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let state = self.manager.state();
        let rename = state.rename();
        let mut spans = Vec::new();
        let mut column = area.x;
        self.tab_spans.clear();

        for file in state.files().iter() {
            let label = match rename {
                Some(buffer) if buffer.file == file.id => format!(" [{}_] ", buffer.text),
                _ => {
                    let marker = if file.running { " ●" } else { "" };
                    format!(" {}{} ", file.name, marker)
                }
            };
            let style = if file.active {
                Style::default()
                    .bg(palette.accent)
                    .fg(palette.bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg)
            };

            let width = label.width() as u16;
            self.tab_spans.push((file.id, column, column + width));
            column += width + 1;
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_editor(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let state = self.manager.state();
        let Some(file) = state.active_file() else {
            return;
        };
        let index = LineIndex::from_text(&file.source);
        let selection = state.selection();
        let caret = state.caret().head;
        let (caret_line, caret_column) = index.char_offset_to_position(caret);

        let inner_height = area.height.saturating_sub(2) as usize;
        let gutter = index.line_count().to_string().len() + 1;

        if inner_height > 0 {
            if caret_line < self.scroll_top {
                self.scroll_top = caret_line;
            } else if caret_line >= self.scroll_top + inner_height {
                self.scroll_top = caret_line + 1 - inner_height;
            }
        }

        let mut lines = Vec::with_capacity(inner_height);
        for line in self.scroll_top..(self.scroll_top + inner_height).min(index.line_count()) {
            let text = index.line_text(line).unwrap_or_default();
            let line_start = index.line_start(line);
            let line_len = text.chars().count();

            let sel_start = selection.start.clamp(line_start, line_start + line_len) - line_start;
            let sel_end = selection.end.clamp(line_start, line_start + line_len) - line_start;

            let mut spans = vec![Span::styled(
                format!("{:>width$} ", line + 1, width = gutter - 1),
                Style::default().fg(palette.muted),
            )];
            let chars: Vec<char> = text.chars().collect();
            let before: String = chars[..sel_start].iter().collect();
            let selected: String = chars[sel_start..sel_end].iter().collect();
            let after: String = chars[sel_end..].iter().collect();
            spans.push(Span::raw(before));
            if !selected.is_empty() {
                spans.push(Span::styled(
                    selected,
                    Style::default().bg(palette.selection).fg(Color::White),
                ));
            }
            spans.push(Span::raw(after));
            lines.push(Line::from(spans));
        }

        let border_style = if self.focus == Focus::Editor {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.muted)
        };
        let title = format!(" {} · {} ", file.name, file.language.display_name());
        let copied = if state.is_copied(CopyTarget::Code(file.id)) {
            " Copied! "
        } else {
            ""
        };
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title)
                .title_bottom(copied),
        );
        frame.render_widget(paragraph, area);

        if inner_height == 0 || area.width <= 2 {
            return;
        }
        let caret_text = index.line_text(caret_line).unwrap_or_default();
        let prefix: String = caret_text.chars().take(caret_column).collect();
        let inner_right = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + 1 + gutter as u16 + prefix.width() as u16).min(inner_right);
        let cursor_y = area.y + 1 + (caret_line - self.scroll_top) as u16;
        if self.focus == Focus::Editor && state.rename().is_none() {
            frame.set_cursor_position((cursor_x, cursor_y));
        }

        let completion = state.completion();
        if completion.is_visible() {
            let height = completion.items().len() as u16 + 2;
            let below = cursor_y + 1;
            let y = if below + height <= area.y + area.height {
                below
            } else {
                cursor_y.saturating_sub(height)
            };
            let popup = Rect::new(
                cursor_x.min((area.x + area.width).saturating_sub(POPUP_WIDTH)),
                y,
                POPUP_WIDTH.min(area.width),
                height,
            )
            .intersection(frame.area());

            let items: Vec<Line> = completion
                .items()
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    if i == completion.selected_index() {
                        Line::styled(
                            item.clone(),
                            Style::default()
                                .bg(palette.accent)
                                .fg(palette.bg)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Line::raw(item.clone())
                    }
                })
                .collect();
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Paragraph::new(items).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(palette.accent))
                        .style(Style::default().bg(palette.bg).fg(palette.fg)),
                ),
                popup,
            );
            self.areas.popup = Some(popup);
        }
    }

    fn render_tests(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let state = self.manager.state();
        let Some(file) = state.active_file() else {
            return;
        };
        let focused = self.focused_case.min(file.test_cases.len().saturating_sub(1));

        let mut lines = Vec::new();
        for (i, case) in file.test_cases.iter().enumerate() {
            let (label, color) = match case.status {
                None => ("not run", palette.muted),
                Some(TestStatus::Pending) => ("pending", palette.muted),
                Some(TestStatus::Running) => ("running", palette.running),
                Some(TestStatus::Passed) => ("passed", palette.passed),
                Some(TestStatus::Failed) => ("failed", palette.failed),
            };
            let is_focused = i == focused && self.focus == Focus::Tests;
            let header_style = if is_focused {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("Test {}  ", i + 1), header_style),
                Span::styled(format!("[{label}]"), Style::default().fg(color)),
            ]));

            let field_style = |field: TestField| {
                if is_focused && self.test_field == field {
                    Style::default().fg(palette.accent)
                } else {
                    Style::default().fg(palette.muted)
                }
            };
            lines.push(Line::styled("Input:", field_style(TestField::Input)));
            push_block(&mut lines, &case.input);
            lines.push(Line::styled("Expected:", field_style(TestField::Expected)));
            push_block(&mut lines, case.expected_output.as_deref().unwrap_or_default());

            if let Some(output) = &case.actual_output {
                let copied = if state.is_copied(CopyTarget::Output(file.id, case.id)) {
                    " (copied)"
                } else {
                    ""
                };
                lines.push(Line::styled(
                    format!("Output:{copied}"),
                    Style::default().fg(palette.muted),
                ));
                push_block(&mut lines, output);
            }
            lines.push(Line::raw(""));
        }

        let border_style = if self.focus == Focus::Tests {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.muted)
        };
        let title = if file.running {
            " Test Cases · running ".to_string()
        } else {
            format!(" Test Cases ({}) ", file.test_cases.len())
        };
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let state = self.manager.state();
        let status_text = if let Some(buffer) = state.rename() {
            format!("Rename > {}  (Enter=Apply, Esc=Cancel)", buffer.text)
        } else if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let caret = state.caret().head;
            let (line, column) = state
                .active_file()
                .map(|f| LineIndex::from_text(&f.source).char_offset_to_position(caret))
                .unwrap_or_default();
            format!(
                "Ln {}, Col {} | {} | split {:.0}% | v{}",
                line + 1,
                column + 1,
                state
                    .active_file()
                    .map_or("", |f| f.language.display_name()),
                state.layout().editor_percent(),
                self.manager.version()
            )
        };

        let status_line = Paragraph::new(status_text).style(
            Style::default()
                .bg(palette.bar_bg)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status_line, area);
    }

    fn render_shortcuts(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let shortcuts = "^N:new  ^W:close  F2:rename  F4:lang  ^R:run  ^/:comment  ^T/^K:add/del test  ^Y/^O:copy  F6:focus  ^D:theme  ^Q:quit";
        frame.render_widget(
            Paragraph::new(shortcuts).style(Style::default().bg(palette.accent).fg(palette.bg)),
            area,
        );
    }
}

fn push_block<'a>(lines: &mut Vec<Line<'a>>, text: &str) {
    if text.is_empty() {
        lines.push(Line::raw("  "));
        return;
    }
    for line in text.split('\n') {
        lines.push(Line::raw(format!("  {line}")));
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}
