//! Terminal UI (TUI) wizard.
//!
//! Layout (UI spec):
//! - Centered "application window" frame titled "Interview Application"
//! - Left banner panel with ASCII logo
//! - Content panel: step-indicator chip row plus the active step's fields
//! - Bottom button row: [ Back ] [ Next ] [ Cancel ] (Next reads Submit on
//!   the last step)
//! - Modal overlays: cancel confirmation, notifications, file browser,
//!   submission confirmation
//!
//! All record/position mutation flows through the wizard controller; this
//! module only holds view state (focus, edit cursor, cached diagnostics,
//! active modal).
//!
//! Note: Logging is file-only in TUI mode (stdout logging is disabled) to avoid corrupting the terminal UI.

pub mod options;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::info;
use ratatui::backend::{CrosstermBackend, TestBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Terminal;

use crate::models::attachment::{Attachment, AttachmentSlot, MediaKind};
use crate::models::record::{FieldId, InputPolicy};
use crate::utils::validation;
use crate::wizard::{Step, Wizard};

const ASCII_LOGO: &str = r#"    _    ____  ____  _     __   __
   / \  |  _ \|  _ \| |    \ \ / /
  / _ \ | |_) | |_) | |     \ V /
 / ___ \|  __/|  __/| |___   | |
/_/   \_\_|   |_|   |_____|  |_|

  interview application form"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonFocus {
    Back,
    Next,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    Field(usize),
    Button(ButtonFocus),
}

#[derive(Debug, Clone, PartialEq)]
struct BrowseEntry {
    path: PathBuf,
    is_dir: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Modal {
    ConfirmCancel,
    Message {
        title: String,
        body: String,
    },
    Submitted,
    BrowseFile {
        slot: AttachmentSlot,
        current: PathBuf,
        entries: Vec<BrowseEntry>,
        selected: usize,
    },
}

/// Single-line text editor with a per-field character policy.
#[derive(Debug, Clone)]
struct TextInput {
    value: String,
    cursor: usize,
    masked: bool,
    policy: InputPolicy,
    max_len: Option<usize>,
}

impl TextInput {
    fn new(
        value: impl Into<String>,
        masked: bool,
        policy: InputPolicy,
        max_len: Option<usize>,
    ) -> Self {
        let v = value.into();
        Self {
            cursor: v.len(),
            value: v,
            masked,
            policy,
            max_len,
        }
    }

    fn display(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor].char_indices().map(|(i, _)| i).last()
    }

    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.cursor)
    }

    /// Handle one key. Returns true when the key was consumed, including
    /// keystrokes the character policy drops without applying.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) => {
                let within_cap = self
                    .max_len
                    .map(|cap| self.value.chars().count() < cap)
                    .unwrap_or(true);
                if self.policy.allows(c) && within_cap {
                    self.value.insert(self.cursor, c);
                    self.cursor += c.len_utf8();
                }
                true
            }
            KeyCode::Backspace => {
                if let Some(idx) = self.prev_boundary() {
                    self.value.remove(idx);
                    self.cursor = idx;
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
                true
            }
            KeyCode::Left => {
                if let Some(idx) = self.prev_boundary() {
                    self.cursor = idx;
                }
                true
            }
            KeyCode::Right => {
                self.cursor = self.next_boundary();
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                true
            }
            _ => false,
        }
    }
}

struct TuiState {
    wizard: Wizard,
    focus: FocusTarget,
    editor: Option<TextInput>,
    errors: Vec<(FieldId, String)>,
    modal: Option<Modal>,
    quit: bool,
}

impl TuiState {
    fn new() -> TuiState {
        let mut state = TuiState {
            wizard: Wizard::new(),
            focus: FocusTarget::Field(0),
            editor: None,
            errors: Vec::new(),
            modal: None,
            quit: false,
        };
        sync_editor(&mut state);
        update_step_validation(&mut state);
        state
    }
}

fn page_field_count(state: &TuiState) -> usize {
    let step = state.wizard.position();
    if step.is_last() {
        AttachmentSlot::ALL.len()
    } else {
        step.fields().len()
    }
}

fn focused_field(state: &TuiState) -> Option<FieldId> {
    let FocusTarget::Field(idx) = state.focus else {
        return None;
    };
    let step = state.wizard.position();
    if step.is_last() {
        return None;
    }
    step.fields().get(idx).copied()
}

fn focused_slot(state: &TuiState) -> Option<AttachmentSlot> {
    let FocusTarget::Field(idx) = state.focus else {
        return None;
    };
    if !state.wizard.position().is_last() {
        return None;
    }
    AttachmentSlot::ALL.get(idx).copied()
}

/// Option list for select-valued fields; None means free text.
fn select_options(field: FieldId) -> Option<Vec<&'static str>> {
    match field {
        FieldId::Gender => Some(options::GENDERS.to_vec()),
        FieldId::MaritalStatus => Some(options::MARITAL_STATUSES.to_vec()),
        FieldId::LanguagesSpoken => Some(options::LANGUAGES.to_vec()),
        FieldId::Nationality => Some(options::nationality_options()),
        _ => None,
    }
}

fn focused_text_field(state: &TuiState) -> Option<FieldId> {
    let field = focused_field(state)?;
    if select_options(field).is_none() {
        Some(field)
    } else {
        None
    }
}

/// Seed the edit buffer from the record when focus lands on a text field.
fn sync_editor(state: &mut TuiState) {
    state.editor = focused_text_field(state).map(|field| {
        TextInput::new(
            state.wizard.record().get(field),
            field == FieldId::Password,
            field.policy(),
            field.max_len(),
        )
    });
}

/// Recompute the inline diagnostics for the active step. These never gate
/// navigation.
fn update_step_validation(state: &mut TuiState) {
    state.errors.clear();
    for field in state.wizard.position().fields() {
        let value = state.wizard.record().get(*field);
        let checked = match field {
            FieldId::Email => validation::validate_email(value),
            FieldId::Phone => validation::validate_phone(value),
            FieldId::DateOfBirth => validation::validate_birth_date(value),
            _ => continue,
        };
        if let Err(e) = checked {
            state.errors.push((*field, e.to_string()));
        }
    }
}

fn cycle_select(state: &mut TuiState, field: FieldId, forward: bool) {
    let Some(choices) = select_options(field) else {
        return;
    };

    // A leading empty entry stands for "not selected yet".
    let mut ring: Vec<&str> = vec![""];
    ring.extend(choices);

    let current = state.wizard.record().get(field).to_string();
    let pos = ring.iter().position(|c| *c == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % ring.len()
    } else {
        (pos + ring.len() - 1) % ring.len()
    };

    state.wizard.update(field, ring[next]);
    update_step_validation(state);
}

fn focused_button(state: &TuiState) -> ButtonFocus {
    match state.focus {
        FocusTarget::Button(b) => b,
        _ => ButtonFocus::Next,
    }
}

fn set_focused_button(state: &mut TuiState, b: ButtonFocus) {
    state.focus = FocusTarget::Button(b);
    state.editor = None;
}

fn can_go_back(step: Step) -> bool {
    !step.is_first()
}

fn next_label(step: Step) -> &'static str {
    if step.is_last() {
        "Submit"
    } else {
        "Next"
    }
}

/// Reset focus after any navigation: first field of the new step, or the
/// Next button when the step has no focusable fields.
fn after_navigation(state: &mut TuiState) {
    if page_field_count(state) > 0 {
        state.focus = FocusTarget::Field(0);
    } else {
        state.focus = FocusTarget::Button(ButtonFocus::Next);
    }
    sync_editor(state);
    update_step_validation(state);
}

fn browse_entries(dir: &std::path::Path) -> Vec<BrowseEntry> {
    let mut out = Vec::new();
    let rd = match std::fs::read_dir(dir) {
        Ok(r) => r,
        Err(_) => return out,
    };

    for entry in rd.flatten() {
        let path = entry.path();
        let is_dir = path.is_dir();
        out.push(BrowseEntry { path, is_dir });
    }

    // Folders first, then files, each alphabetically.
    out.sort_by_key(|e| (!e.is_dir, e.path.to_string_lossy().to_lowercase()));
    out
}

fn browse_start_dir(state: &TuiState, slot: AttachmentSlot) -> PathBuf {
    if let Some(att) = state.wizard.record().attachment(slot) {
        if let Some(parent) = att.path.parent() {
            return parent.to_path_buf();
        }
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn open_browse_modal(state: &mut TuiState, slot: AttachmentSlot) {
    let current = browse_start_dir(state, slot);
    let entries = browse_entries(&current);
    state.modal = Some(Modal::BrowseFile {
        slot,
        current,
        entries,
        selected: 0,
    });
}

fn handle_key(state: &mut TuiState, code: KeyCode) {
    // Modal handling
    if let Some(modal) = state.modal.clone() {
        match modal {
            Modal::ConfirmCancel => match code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                    let next = match focused_button(state) {
                        ButtonFocus::Cancel => ButtonFocus::Next,
                        _ => ButtonFocus::Cancel,
                    };
                    set_focused_button(state, next);
                }
                KeyCode::Enter => {
                    let confirm = focused_button(state) == ButtonFocus::Cancel;
                    state.modal = None;
                    if confirm {
                        state.quit = true;
                    }
                }
                KeyCode::Esc => {
                    state.modal = None;
                }
                _ => {}
            },
            Modal::Message { .. } => match code {
                KeyCode::Enter | KeyCode::Esc => {
                    state.modal = None;
                }
                _ => {}
            },
            Modal::Submitted => match code {
                KeyCode::Enter | KeyCode::Esc => {
                    state.modal = None;
                    state.wizard.acknowledge_submission();
                    after_navigation(state);
                }
                _ => {}
            },
            Modal::BrowseFile {
                slot,
                mut current,
                mut entries,
                mut selected,
            } => {
                match code {
                    KeyCode::Up => {
                        selected = selected.saturating_sub(1);
                    }
                    KeyCode::Down => {
                        if !entries.is_empty() {
                            selected = (selected + 1).min(entries.len().saturating_sub(1));
                        }
                    }
                    KeyCode::Backspace => {
                        if let Some(parent) = current.parent() {
                            current = parent.to_path_buf();
                            entries = browse_entries(&current);
                            selected = 0;
                        }
                    }
                    KeyCode::Enter => {
                        if let Some(entry) = entries.get(selected).cloned() {
                            if entry.is_dir {
                                current = entry.path;
                                entries = browse_entries(&current);
                                selected = 0;
                            } else {
                                attach_file(state, slot, &entry.path);
                                return;
                            }
                        }
                    }
                    KeyCode::Esc => {
                        state.modal = None;
                        return;
                    }
                    _ => {}
                }

                // Update modal state
                state.modal = Some(Modal::BrowseFile {
                    slot,
                    current,
                    entries,
                    selected,
                });
            }
        }
        return;
    }

    // Global keys
    if matches!(code, KeyCode::Esc) {
        state.modal = Some(Modal::ConfirmCancel);
        set_focused_button(state, ButtonFocus::Next); // "No"
        return;
    }

    // Text input handling (when a text field is focused). Keystrokes the
    // character policy rejects are consumed without being applied.
    if let Some(field) = focused_text_field(state) {
        let mut consumed = false;
        let mut value = String::new();
        if let Some(editor) = state.editor.as_mut() {
            if editor.handle_key(code) {
                consumed = true;
                value = editor.value.clone();
            }
        }
        if consumed {
            state.wizard.update(field, value);
            update_step_validation(state);
            return;
        }
    }

    match code {
        // Step-indicator chips: direct jump, no completion gate.
        KeyCode::Char(c) if ('1'..='6').contains(&c) => {
            if let Some(step) = c.to_digit(10).and_then(|d| Step::from_index(d as u8)) {
                state.wizard.jump_to(step);
                after_navigation(state);
            }
        }
        KeyCode::Left | KeyCode::Right => {
            if let Some(field) = focused_field(state) {
                if select_options(field).is_some() {
                    cycle_select(state, field, matches!(code, KeyCode::Right));
                }
            }
        }
        KeyCode::Enter if focused_slot(state).is_some() => {
            if let Some(slot) = focused_slot(state) {
                open_browse_modal(state, slot);
            }
        }
        KeyCode::Delete if focused_slot(state).is_some() => {
            if let Some(slot) = focused_slot(state) {
                state.wizard.clear_attachment(slot);
            }
        }
        KeyCode::Tab => {
            let fields = page_field_count(state);
            if fields == 0 {
                let next = match focused_button(state) {
                    ButtonFocus::Back => ButtonFocus::Next,
                    ButtonFocus::Next => ButtonFocus::Cancel,
                    ButtonFocus::Cancel => ButtonFocus::Back,
                };
                set_focused_button(state, next);
            } else {
                state.focus = match state.focus {
                    FocusTarget::Button(ButtonFocus::Back) => {
                        FocusTarget::Button(ButtonFocus::Next)
                    }
                    FocusTarget::Button(ButtonFocus::Next) => {
                        FocusTarget::Button(ButtonFocus::Cancel)
                    }
                    FocusTarget::Button(ButtonFocus::Cancel) => FocusTarget::Field(0),
                    FocusTarget::Field(i) => {
                        if i + 1 < fields {
                            FocusTarget::Field(i + 1)
                        } else {
                            FocusTarget::Button(ButtonFocus::Back)
                        }
                    }
                };
                sync_editor(state);
            }
        }
        KeyCode::Enter => match focused_button(state) {
            ButtonFocus::Back => {
                if can_go_back(state.wizard.position()) {
                    state.wizard.retreat();
                    after_navigation(state);
                }
            }
            ButtonFocus::Next => {
                if state.wizard.position().is_last() {
                    let _id = state.wizard.submit();
                    after_navigation(state);
                    state.modal = Some(Modal::Submitted);
                } else {
                    state.wizard.advance();
                    after_navigation(state);
                }
            }
            ButtonFocus::Cancel => {
                state.modal = Some(Modal::ConfirmCancel);
                set_focused_button(state, ButtonFocus::Next);
            }
        },
        _ => {}
    }
}

fn attach_file(state: &mut TuiState, slot: AttachmentSlot, path: &std::path::Path) {
    match Attachment::from_path(path) {
        Ok(att) => match state.wizard.update_attachment(slot, Some(att)) {
            Ok(()) => {
                state.modal = None;
            }
            Err(e) => {
                state.modal = Some(Modal::Message {
                    title: "File not accepted".to_string(),
                    body: e.to_string(),
                });
            }
        },
        Err(e) => {
            state.modal = Some(Modal::Message {
                title: "Unable to attach file".to_string(),
                body: e.to_string(),
            });
        }
    }
}

pub fn run(tick_ms: u64) -> Result<()> {
    info!("[PHASE: tui] [STEP: start] Starting application form wizard");

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, tick_ms);
    restore_terminal(&mut terminal)?;

    result
}

/// Non-interactive smoke mode: render a single frame and exit.
/// Targets: personal|education|experience|skills|family|documents|submitted|cancel|browse
pub fn smoke(target: &str) -> Result<()> {
    info!(
        "[PHASE: tui] [STEP: smoke] Rendering single-frame TUI smoke target={}",
        target
    );

    let t = target.trim().to_ascii_lowercase();
    let state = new_smoke_state(t.as_str());

    // Use an in-memory backend so this can be executed in CI/tooling without
    // manipulating the real terminal (no raw mode / alternate screen).
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|f| draw(f.size(), f, &state))?;

    Ok(())
}

fn sample_attachment(name: &str, kind: MediaKind, size_bytes: u64) -> Attachment {
    Attachment {
        path: PathBuf::from(name),
        file_name: name.to_string(),
        size_bytes,
        kind,
    }
}

/// Smoke-only: seeded state for deterministic page rendering in CI/tooling.
/// A real interactive run always starts from the empty record.
fn new_smoke_state(target: &str) -> TuiState {
    let mut state = TuiState::new();

    match target {
        "education" => {
            state.wizard.jump_to(Step::Education);
            state.wizard.update(FieldId::HighestQualification, "MSc");
            state.wizard.update(FieldId::University, "Example State University");
            state.wizard.update(FieldId::PassingYear, "2017");
            state.wizard.update(FieldId::Percentage, "First Class");
        }
        "experience" => {
            state.wizard.jump_to(Step::WorkExperience);
            state.wizard.update(FieldId::CompanyName, "Initech");
            state.wizard.update(FieldId::JobTitle, "Engineer");
            state.wizard.update(FieldId::JobDuration, "2019 - 2024");
            state
                .wizard
                .update(FieldId::Responsibilities, "Shipped the TPS pipeline");
        }
        "skills" => {
            state.wizard.jump_to(Step::Skills);
            state.wizard.update(FieldId::TechnicalSkills, "Rust, SQL");
            state.wizard.update(FieldId::SoftSkills, "Mentoring");
            state.wizard.update(FieldId::LanguagesSpoken, "English");
        }
        "family" => {
            state.wizard.jump_to(Step::FamilyDetails);
            state.wizard.update(FieldId::FatherName, "John Doe");
            state.wizard.update(FieldId::MotherName, "Joan Doe");
            state.wizard.update(FieldId::Siblings, "two");
        }
        "documents" => {
            state.wizard.jump_to(Step::Documents);
            let _ = state.wizard.update_attachment(
                AttachmentSlot::ProfileMedia,
                Some(sample_attachment("intro.mp4", MediaKind::Video, 2_400_000)),
            );
            let _ = state.wizard.update_attachment(
                AttachmentSlot::Resume,
                Some(sample_attachment("resume.pdf", MediaKind::Document, 84_000)),
            );
        }
        "submitted" => {
            state.wizard.jump_to(Step::Documents);
            let _ = state.wizard.submit();
            state.modal = Some(Modal::Submitted);
        }
        "cancel" => {
            state.modal = Some(Modal::ConfirmCancel);
        }
        "browse" => {
            state.wizard.jump_to(Step::Documents);
            state.modal = Some(Modal::BrowseFile {
                slot: AttachmentSlot::Resume,
                current: PathBuf::from("/home/applicant"),
                entries: vec![
                    BrowseEntry {
                        path: PathBuf::from("/home/applicant/documents"),
                        is_dir: true,
                    },
                    BrowseEntry {
                        path: PathBuf::from("/home/applicant/resume.pdf"),
                        is_dir: false,
                    },
                ],
                selected: 1,
            });
        }
        _ => {
            // default: personal information
            state.wizard.update(FieldId::FullName, "Jane Doe");
            state.wizard.update(FieldId::Email, "jane.doe@example.com");
            state.wizard.update(FieldId::Phone, "5551234");
            state.wizard.update(FieldId::DateOfBirth, "1994-05-17");
            state.wizard.update(FieldId::Gender, "Female");
            state.wizard.update(FieldId::Nationality, "Canadian");
        }
    }

    if state.modal.is_none() || matches!(state.modal, Some(Modal::BrowseFile { .. })) {
        let modal = state.modal.take();
        after_navigation(&mut state);
        state.modal = modal;
    }

    state
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, tick_ms: u64) -> Result<()> {
    let tick_rate = Duration::from_millis(tick_ms.max(10));
    let mut last_tick = Instant::now();
    let mut state = TuiState::new();

    while !state.quit {
        terminal.draw(|f| draw(f.size(), f, &state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut state, key.code),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    info!("[PHASE: tui] [STEP: quit] Wizard session ended");
    Ok(())
}

fn draw(area: Rect, f: &mut ratatui::Frame<'_>, state: &TuiState) {
    let (window_area, _) = centered_window(area, 100, 30);

    // Outer frame
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Interview Application");
    f.render_widget(outer_block, window_area);

    // Inner layout: banner + content + buttons row
    let inner = window_area.inner(&ratatui::layout::Margin {
        vertical: 1,
        horizontal: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(inner);

    let body = rows[0];
    let buttons = rows[1];

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(0)].as_ref())
        .split(body);

    // Left banner
    let banner_block = Block::default().borders(Borders::ALL);
    let logo = Paragraph::new(ASCII_LOGO)
        .block(banner_block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    f.render_widget(logo, cols[0]);

    // Right content
    let step = state.wizard.position();
    let title = format!("Step {} of 6: {}", step.index(), step.title());
    let content_block = Block::default().borders(Borders::ALL).title(title);
    f.render_widget(content_block, cols[1]);
    let content_inner = cols[1].inner(&ratatui::layout::Margin {
        vertical: 1,
        horizontal: 1,
    });

    let content_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)].as_ref())
        .split(content_inner);

    draw_step_chips(f, content_rows[0], state);

    let content = Paragraph::new(page_text(state))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    f.render_widget(content, content_rows[1]);

    // Bottom buttons row (right-aligned)
    draw_buttons(f, buttons, state);

    // Modal overlay
    if let Some(modal) = state.modal.as_ref() {
        match modal {
            Modal::ConfirmCancel => draw_cancel_modal(f, window_area, state),
            Modal::Message { title, body } => draw_message_modal(f, window_area, title, body),
            Modal::Submitted => draw_submitted_modal(f, window_area),
            Modal::BrowseFile {
                slot,
                current,
                entries,
                selected,
            } => draw_browse_file_modal(f, window_area, *slot, current, entries, *selected),
        }
    }
}

fn centered_window(area: Rect, width: u16, height: u16) -> (Rect, Rect) {
    let w = width.min(area.width.saturating_sub(2)).max(60);
    let h = height.min(area.height.saturating_sub(2)).max(20);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    let rect = Rect {
        x,
        y,
        width: w,
        height: h,
    };
    (rect, rect)
}

fn draw_step_chips(f: &mut ratatui::Frame<'_>, area: Rect, state: &TuiState) {
    let current = state.wizard.position();

    let mut spans: Vec<Span> = Vec::new();
    for step in Step::ALL {
        let label = format!(" {} {} ", step.index(), step.chip_label());
        let style = if step == current {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    let lines = vec![
        Line::from(spans),
        Line::from("Press 1-6 to jump to a step (while not typing in a field)."),
    ];
    let p = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn field_prefix(state: &TuiState, idx: usize) -> &'static str {
    if matches!(state.focus, FocusTarget::Field(i) if i == idx) {
        ">"
    } else {
        " "
    }
}

fn page_text(state: &TuiState) -> Text<'static> {
    let step = state.wizard.position();
    let record = state.wizard.record();

    let mut lines: Vec<Line> = vec![Line::from(step_lead_in(step)), Line::from("")];

    if step.is_last() {
        for (i, slot) in AttachmentSlot::ALL.iter().enumerate() {
            let value = record
                .attachment(*slot)
                .map(|a| a.preview())
                .unwrap_or_else(|| "(none)".to_string());
            lines.push(Line::from(format!(
                "{} {}: {}",
                field_prefix(state, i),
                slot.label(),
                value
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(
            "Enter browses for a file. Del clears the slot. Tab cycles slots.",
        ));
        lines.push(Line::from("Select Submit when you are done."));
    } else {
        for (i, field) in step.fields().iter().enumerate() {
            let marker = if field.required() { " *" } else { "" };
            let editor = match (&state.focus, &state.editor) {
                (FocusTarget::Field(j), Some(ed)) if *j == i => Some(ed),
                _ => None,
            };
            let value = if let Some(ed) = editor {
                ed.display()
            } else if *field == FieldId::Password {
                "*".repeat(record.get(*field).chars().count())
            } else if select_options(*field).is_some() && record.get(*field).is_empty() {
                "(not selected)".to_string()
            } else {
                record.get(*field).to_string()
            };
            lines.push(Line::from(format!(
                "{} {}{}: {}",
                field_prefix(state, i),
                field.label(),
                marker,
                value
            )));
        }

        for (_, msg) in &state.errors {
            lines.push(Line::from(format!("Error: {}", msg)));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(
            "Tab cycles fields. Left/Right changes selections. * marks required fields.",
        ));
    }

    Text::from(lines)
}

fn step_lead_in(step: Step) -> &'static str {
    match step {
        Step::PersonalInfo => "Basic contact and identity details.",
        Step::Education => "Your qualifications and academic record.",
        Step::WorkExperience => "Your current or most recent employment.",
        Step::Skills => "Skills, achievements, and languages.",
        Step::FamilyDetails => "Family background.",
        Step::Documents => "Attach your profile media and documents.",
    }
}

fn button_text(label: &str, focused: bool, enabled: bool) -> Span<'static> {
    let mut style = Style::default();
    if !enabled {
        style = style.fg(Color::DarkGray);
    }
    if focused && enabled {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!("[ {} ]", label), style)
}

fn draw_buttons(f: &mut ratatui::Frame<'_>, area: Rect, state: &TuiState) {
    let step = state.wizard.position();
    let back = button_text(
        "Back",
        matches!(state.focus, FocusTarget::Button(ButtonFocus::Back)),
        can_go_back(step),
    );
    let next = button_text(
        next_label(step),
        matches!(state.focus, FocusTarget::Button(ButtonFocus::Next)),
        true,
    );
    let cancel = button_text(
        "Cancel",
        matches!(state.focus, FocusTarget::Button(ButtonFocus::Cancel)),
        true,
    );

    let line = Line::from(vec![back, Span::raw(" "), next, Span::raw(" "), cancel]);
    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, area);
}

fn draw_cancel_modal(f: &mut ratatui::Frame<'_>, window_area: Rect, state: &TuiState) {
    let modal_w = 56u16.min(window_area.width.saturating_sub(4)).max(40);
    let modal_h = 7u16;
    let x = window_area.x + (window_area.width.saturating_sub(modal_w)) / 2;
    let y = window_area.y + (window_area.height.saturating_sub(modal_h)) / 2;
    let area = Rect {
        x,
        y,
        width: modal_w,
        height: modal_h,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Leave the application?");
    let body = Paragraph::new(Text::from(vec![
        Line::from("If you leave now, your answers will be discarded."),
        Line::from(""),
        Line::from(""),
    ]))
    .block(block)
    .wrap(Wrap { trim: false });
    f.render_widget(body, area);

    // Buttons: [Yes, leave] [No] (safe choice on the right)
    let buttons_area = Rect {
        x: area.x + 1,
        y: area.y + area.height - 2,
        width: area.width - 2,
        height: 1,
    };

    let yes_focused = focused_button(state) == ButtonFocus::Cancel;
    let no_focused = focused_button(state) == ButtonFocus::Next;
    let yes = Span::styled(
        "[ Yes, leave ]",
        if yes_focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        },
    );
    let no = Span::styled(
        "[ No ]",
        if no_focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        },
    );

    let line = Line::from(vec![yes, Span::raw(" "), no]);
    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, buttons_area);
}

fn draw_message_modal(f: &mut ratatui::Frame<'_>, window_area: Rect, title: &str, body: &str) {
    let modal_w = 70u16.min(window_area.width.saturating_sub(4)).max(40);
    let modal_h = 10u16.min(window_area.height.saturating_sub(4)).max(7);
    let x = window_area.x + (window_area.width.saturating_sub(modal_w)) / 2;
    let y = window_area.y + (window_area.height.saturating_sub(modal_h)) / 2;
    let area = Rect {
        x,
        y,
        width: modal_w,
        height: modal_h,
    };

    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let p = Paragraph::new(Text::from(body.to_string()))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);

    let buttons_area = Rect {
        x: area.x + 1,
        y: area.y + area.height - 2,
        width: area.width - 2,
        height: 1,
    };
    let ok = Span::styled("[ OK ]", Style::default().add_modifier(Modifier::REVERSED));
    let p = Paragraph::new(Text::from(Line::from(vec![ok]))).alignment(Alignment::Right);
    f.render_widget(p, buttons_area);
}

fn draw_submitted_modal(f: &mut ratatui::Frame<'_>, window_area: Rect) {
    let modal_w = 56u16.min(window_area.width.saturating_sub(4)).max(40);
    let modal_h = 8u16;
    let x = window_area.x + (window_area.width.saturating_sub(modal_w)) / 2;
    let y = window_area.y + (window_area.height.saturating_sub(modal_h)) / 2;
    let area = Rect {
        x,
        y,
        width: modal_w,
        height: modal_h,
    };

    let block = Block::default().borders(Borders::ALL).title("Submission");
    let body = Paragraph::new(Text::from(vec![
        Line::from("Form Submitted Successfully!"),
        Line::from(""),
        Line::from("Your answers have been cleared from this session."),
        Line::from(""),
    ]))
    .block(block)
    .wrap(Wrap { trim: false });
    f.render_widget(body, area);

    let buttons_area = Rect {
        x: area.x + 1,
        y: area.y + area.height - 2,
        width: area.width - 2,
        height: 1,
    };
    let close = Span::styled(
        "[ Close ]",
        Style::default().add_modifier(Modifier::REVERSED),
    );
    let p = Paragraph::new(Text::from(Line::from(vec![close]))).alignment(Alignment::Right);
    f.render_widget(p, buttons_area);
}

fn draw_browse_file_modal(
    f: &mut ratatui::Frame<'_>,
    window_area: Rect,
    slot: AttachmentSlot,
    current: &std::path::Path,
    entries: &[BrowseEntry],
    selected: usize,
) {
    let modal_w = 78u16.min(window_area.width.saturating_sub(4)).max(48);
    let modal_h = 16u16.min(window_area.height.saturating_sub(4)).max(10);
    let x = window_area.x + (window_area.width.saturating_sub(modal_w)) / 2;
    let y = window_area.y + (window_area.height.saturating_sub(modal_h)) / 2;
    let area = Rect {
        x,
        y,
        width: modal_w,
        height: modal_h,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Attach: {}", slot.label()));
    f.render_widget(block, area);

    let inner = area.inner(&ratatui::layout::Margin {
        vertical: 1,
        horizontal: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(inner);

    let header = Paragraph::new(Text::from(vec![
        Line::from(format!("Current: {}", current.to_string_lossy())),
        Line::from("Enter=open folder / pick file  Backspace=up  Esc=cancel"),
    ]))
    .wrap(Wrap { trim: true });
    f.render_widget(header, rows[0]);

    // List
    let list_height = rows[1].height as usize;
    let start = selected.saturating_sub(list_height / 2);
    let end = (start + list_height).min(entries.len());

    let mut lines: Vec<Line> = Vec::new();
    if entries.is_empty() {
        lines.push(Line::from("(empty folder)"));
    } else {
        for (i, entry) in entries.iter().enumerate().take(end).skip(start) {
            let name = entry
                .path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("<entry>");
            let display = if entry.is_dir {
                format!("{}/", name)
            } else {
                name.to_string()
            };
            let style = if i == selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(display, style)));
        }
    }

    let list = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    f.render_widget(list, rows[1]);

    let footer = Paragraph::new(Text::from("Picking a file attaches it to this slot."))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    f.render_widget(footer, rows[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_only_input_drops_digits_but_consumes_the_key() {
        let mut input = TextInput::new("", false, InputPolicy::LettersOnly, None);
        assert!(input.handle_key(KeyCode::Char('a')));
        assert!(input.handle_key(KeyCode::Char('9')));
        assert!(input.handle_key(KeyCode::Char(' ')));
        assert_eq!(input.value, "a ");
    }

    #[test]
    fn digits_input_respects_the_length_cap() {
        let mut input = TextInput::new("", false, InputPolicy::Digits, Some(7));
        for c in "55512345".chars() {
            input.handle_key(KeyCode::Char(c));
        }
        assert_eq!(input.value, "5551234");
        assert!(input.handle_key(KeyCode::Char('x')));
        assert_eq!(input.value, "5551234");
    }

    #[test]
    fn editing_keys_move_and_delete_on_char_boundaries() {
        let mut input = TextInput::new("résumé", false, InputPolicy::Any, None);
        input.handle_key(KeyCode::Backspace);
        assert_eq!(input.value, "résum");
        input.handle_key(KeyCode::Home);
        input.handle_key(KeyCode::Delete);
        assert_eq!(input.value, "ésum");
        input.handle_key(KeyCode::Right);
        input.handle_key(KeyCode::Char('x'));
        assert_eq!(input.value, "éxsum");
    }

    #[test]
    fn masked_display_hides_the_value() {
        let input = TextInput::new("hunter2", true, InputPolicy::Any, None);
        assert_eq!(input.display(), "*******");
    }

    #[test]
    fn number_keys_jump_between_steps() {
        let mut state = TuiState::new();
        set_focused_button(&mut state, ButtonFocus::Next);
        handle_key(&mut state, KeyCode::Char('4'));
        assert_eq!(state.wizard.position(), Step::Skills);

        // Navigation refocuses the first field, so leave it before jumping.
        set_focused_button(&mut state, ButtonFocus::Next);
        handle_key(&mut state, KeyCode::Char('1'));
        assert_eq!(state.wizard.position(), Step::PersonalInfo);
    }

    #[test]
    fn typing_digits_into_a_text_field_does_not_jump_steps() {
        let mut state = TuiState::new();
        assert_eq!(focused_text_field(&state), Some(FieldId::FullName));
        handle_key(&mut state, KeyCode::Char('3'));
        assert_eq!(state.wizard.position(), Step::PersonalInfo);
        assert_eq!(state.wizard.record().get(FieldId::FullName), "3");
    }

    #[test]
    fn keystrokes_route_to_the_record_per_field() {
        let mut state = TuiState::new();
        for c in "Jane".chars() {
            handle_key(&mut state, KeyCode::Char(c));
        }
        assert_eq!(state.wizard.record().get(FieldId::FullName), "Jane");
    }

    #[test]
    fn enter_on_next_advances_without_any_required_gate() {
        // Step 1 is completely empty; Next must still work.
        let mut state = TuiState::new();
        set_focused_button(&mut state, ButtonFocus::Next);
        handle_key(&mut state, KeyCode::Enter);
        assert_eq!(state.wizard.position(), Step::Education);
    }

    #[test]
    fn enter_on_back_retreats_and_is_ignored_on_the_first_step() {
        let mut state = TuiState::new();
        set_focused_button(&mut state, ButtonFocus::Back);
        handle_key(&mut state, KeyCode::Enter);
        assert_eq!(state.wizard.position(), Step::PersonalInfo);

        state.wizard.jump_to(Step::Education);
        set_focused_button(&mut state, ButtonFocus::Back);
        handle_key(&mut state, KeyCode::Enter);
        assert_eq!(state.wizard.position(), Step::PersonalInfo);
    }

    #[test]
    fn submit_on_last_step_raises_the_confirmation_dialog() {
        let mut state = TuiState::new();
        state.wizard.update(FieldId::FullName, "Jane Doe");
        state.wizard.jump_to(Step::Documents);
        set_focused_button(&mut state, ButtonFocus::Next);

        handle_key(&mut state, KeyCode::Enter);

        assert_eq!(state.modal, Some(Modal::Submitted));
        assert!(state.wizard.confirmation_pending());
        assert_eq!(state.wizard.position(), Step::PersonalInfo);
        assert_eq!(state.wizard.record().get(FieldId::FullName), "");
    }

    #[test]
    fn closing_the_confirmation_dialog_clears_the_flag() {
        let mut state = TuiState::new();
        state.wizard.jump_to(Step::Documents);
        set_focused_button(&mut state, ButtonFocus::Next);
        handle_key(&mut state, KeyCode::Enter);

        handle_key(&mut state, KeyCode::Enter);
        assert_eq!(state.modal, None);
        assert!(!state.wizard.confirmation_pending());
    }

    #[test]
    fn select_fields_cycle_through_their_options() {
        let mut state = TuiState::new();
        cycle_select(&mut state, FieldId::Gender, true);
        assert_eq!(state.wizard.record().get(FieldId::Gender), "Male");
        cycle_select(&mut state, FieldId::Gender, true);
        assert_eq!(state.wizard.record().get(FieldId::Gender), "Female");
        cycle_select(&mut state, FieldId::Gender, false);
        assert_eq!(state.wizard.record().get(FieldId::Gender), "Male");
    }

    #[test]
    fn nationality_cycle_never_offers_the_excluded_name() {
        let mut state = TuiState::new();
        // One full lap through the ring (empty entry + options).
        for _ in 0..=options::nationality_options().len() {
            cycle_select(&mut state, FieldId::Nationality, true);
            assert_ne!(
                state.wizard.record().get(FieldId::Nationality),
                options::EXCLUDED_NATIONALITY
            );
        }
    }

    #[test]
    fn escape_asks_before_quitting() {
        let mut state = TuiState::new();
        handle_key(&mut state, KeyCode::Esc);
        assert_eq!(state.modal, Some(Modal::ConfirmCancel));
        assert!(!state.quit);

        // Default answer is "No".
        handle_key(&mut state, KeyCode::Enter);
        assert_eq!(state.modal, None);
        assert!(!state.quit);
    }

    #[test]
    fn browse_entries_list_folders_before_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("zeta")).unwrap();
        std::fs::write(dir.path().join("alpha.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("beta.mp3"), b"x").unwrap();

        let entries = browse_entries(dir.path());
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_dir, "folders sort first: {:?}", entries);
        assert!(!entries[1].is_dir);
        assert!(entries[1].path.to_string_lossy() < entries[2].path.to_string_lossy());
    }

    #[test]
    fn rejected_profile_pick_shows_a_notification_and_keeps_the_slot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"plain text").unwrap();

        let mut state = TuiState::new();
        state.wizard.jump_to(Step::Documents);
        attach_file(&mut state, AttachmentSlot::ProfileMedia, &path);

        assert!(matches!(state.modal, Some(Modal::Message { .. })));
        assert!(state.wizard.record().profile_media.is_none());
    }

    #[test]
    fn smoke_targets_render_without_panicking() {
        for target in [
            "personal",
            "education",
            "experience",
            "skills",
            "family",
            "documents",
            "submitted",
            "cancel",
            "browse",
            "unknown-target",
        ] {
            smoke(target).unwrap_or_else(|e| panic!("smoke {} failed: {}", target, e));
        }
    }
}
