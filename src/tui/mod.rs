//! Terminal user interface: state management, event loop, and widgets.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

pub mod chart_canvas;
pub mod confirm_dialog;
pub mod context_menu;
pub mod element_form;
pub mod handlers;
pub mod help_overlay;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::models::Sequence;
use crate::services::{EditorMode, SequenceEditor};

// Re-export TUI components
pub use chart_canvas::ChartCanvas;
pub use help_overlay::HelpOverlay;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Application state - single source of truth
///
/// All UI widgets read from this state immutably. Only event handlers
/// modify state, and only through the editor's transition operations.
pub struct AppState {
    /// The sequence editor controller (owns the sequence and UI mode)
    pub editor: SequenceEditor,
    /// The chart surface widget (ephemeral render/drag state only)
    pub canvas: ChartCanvas,
    /// Application configuration
    pub config: Config,
    /// Current UI theme
    pub theme: Theme,
    /// Keyboard cursor: highlighted marker position
    pub cursor: usize,
    /// Status bar message
    pub status_message: String,
    /// Optional color override for the status message (warnings)
    pub status_color_override: Option<Color>,
    /// Current error message (if any)
    pub error_message: Option<String>,
    /// Whether the help overlay is shown
    pub show_help: bool,
}

impl AppState {
    /// Creates a new `AppState` over the given sequence and config.
    #[must_use]
    pub fn new(sequence: Sequence, config: Config) -> Self {
        let theme = Theme::from_mode(config.ui.theme_mode);
        let editor = SequenceEditor::new(sequence, config.ui.default_marker_color);
        let show_help = config.ui.show_help_on_startup;

        Self {
            editor,
            canvas: ChartCanvas::new(),
            config,
            theme,
            cursor: 0,
            status_message: "Press ? for help".to_string(),
            status_color_override: None,
            error_message: None,
            show_help,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_color_override = None;
    }

    /// Set a status message rendered in the warning color.
    ///
    /// Used for tolerated failures: the gesture had no effect, the app
    /// carries on.
    pub fn report_warning(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_color_override = Some(self.theme.warning);
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Keeps the cursor on a live position after removals.
    pub fn clamp_cursor(&mut self) {
        let count = self.editor.sequence().len();
        if self.cursor >= count {
            self.cursor = count.saturating_sub(1);
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        // Apply theme based on user preference (Auto detects OS)
        state.theme = Theme::from_mode(state.config.ui.theme_mode);

        // Render current state
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if handlers::handle_key_event(state, key)? {
                        break; // User quit
                    }
                }
                Event::Mouse(mouse) => handlers::handle_mouse_event(state, mouse),
                // Terminal resized, will re-render on next loop
                _ => {}
            }
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &mut AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(7),    // Chart
            Constraint::Length(5), // Status bar (message + detail + hints)
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);

    // The chart always renders from a freshly regenerated projection
    let projection = state.editor.sequence().projection();
    let cursor = (!projection.is_empty()).then_some(state.cursor);
    state
        .canvas
        .render(f, chunks[1], &projection, &state.theme, cursor);

    StatusBar::render(f, chunks[2], state, &state.theme);

    render_popup(f, state);

    // Error overlay on top of everything if an error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }

    if state.show_help {
        HelpOverlay::render(f, &state.theme);
    }
}

/// Render title bar with app name and element count
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let count = state.editor.sequence().len();
    let noun = if count == 1 { "element" } else { "elements" };
    let title = format!(" {APP_NAME} · {count} {noun}");

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Render the popup matching the editor's mode, if any
fn render_popup(f: &mut Frame, state: &AppState) {
    match state.editor.mode() {
        EditorMode::Idle => {}
        EditorMode::MenuOpen { id, anchor, cursor } => {
            let name = state
                .editor
                .sequence()
                .get(*id)
                .map_or_else(String::new, |element| element.name.clone());
            context_menu::render_context_menu(f, *anchor, &name, *cursor, &state.theme);
        }
        EditorMode::FormOpen { draft } => {
            element_form::render_element_form(f, draft, &state.theme);
        }
        EditorMode::ConfirmingDelete { id } => {
            let name = state
                .editor
                .sequence()
                .get(*id)
                .map_or_else(|| id.to_string(), |element| element.name.clone());
            confirm_dialog::render_delete_confirm(f, &name, &state.theme);
        }
    }
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(70, 40, f.area());

    // Clear the background area first
    f.render_widget(Clear, area);

    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Error message
            Constraint::Length(2), // Help text
        ])
        .split(area);

    let title = Paragraph::new("ERROR")
        .style(
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.error).bg(theme.background)),
        );
    f.render_widget(title, chunks[0]);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[1]);

    let help = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            "Enter/Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Dismiss"),
    ])])
    .style(Style::default().fg(theme.text).bg(theme.background))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(help, chunks[2]);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ElementPatch;

    fn app_state_with(count: usize) -> AppState {
        let mut sequence = Sequence::new();
        for i in 0..count {
            sequence.insert(ElementPatch::new(format!("E{i}"), "", None));
        }
        AppState::new(sequence, Config::default())
    }

    #[test]
    fn test_new_state_starts_idle() {
        let state = app_state_with(3);
        assert_eq!(*state.editor.mode(), EditorMode::Idle);
        assert_eq!(state.cursor, 0);
        assert!(state.show_help, "default config shows help on startup");
    }

    #[test]
    fn test_help_respects_config() {
        let mut config = Config::default();
        config.ui.show_help_on_startup = false;
        let state = AppState::new(Sequence::new(), config);
        assert!(!state.show_help);
    }

    #[test]
    fn test_clamp_cursor_after_shrink() {
        let mut state = app_state_with(3);
        state.cursor = 2;
        let id = state.editor.sequence().element_at(2).unwrap().id;
        // Direct removal path, as a stale-delete would do
        state.editor.click_point(id, 0, 0);
        state.editor.request_delete();
        state.editor.confirm_delete();
        state.clamp_cursor();
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_clamp_cursor_on_empty() {
        let mut state = app_state_with(0);
        state.cursor = 5;
        state.clamp_cursor();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_warning_uses_theme_color() {
        let mut state = app_state_with(1);
        state.report_warning("careful");
        assert_eq!(state.status_message, "careful");
        assert_eq!(state.status_color_override, Some(state.theme.warning));
        state.set_status("ok");
        assert_eq!(state.status_color_override, None);
    }
}
