//! Blocking yes/no confirmation shown before deleting an element.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::Theme;

/// Answer resolved from a key press while the confirmation is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Keep waiting for an answer
    Continue,
    /// Proceed with the deletion
    Confirm,
    /// Keep the element
    Cancel,
}

/// Handle input for the delete confirmation.
#[must_use]
pub fn handle_confirm_input(key: KeyEvent) -> ConfirmAction {
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => ConfirmAction::Confirm,
        KeyCode::Char('n' | 'N') | KeyCode::Esc => ConfirmAction::Cancel,
        _ => ConfirmAction::Continue,
    }
}

/// Render the delete confirmation prompt.
pub fn render_delete_confirm(f: &mut Frame, element_name: &str, theme: &Theme) {
    let area = centered_rect(50, 25, f.area());

    // Clear the background area first
    f.render_widget(Clear, area);

    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let text = vec![
        Line::from(""),
        Line::from(format!("Delete \"{element_name}\"?")),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                "[Y]",
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Delete   "),
            Span::styled(
                "[N]",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Cancel"),
        ]),
    ];

    let prompt = Paragraph::new(text).block(
        Block::default()
            .title(" Confirm Delete ")
            .borders(Borders::ALL)
            .style(Style::default().fg(theme.warning)),
    );

    f.render_widget(prompt, area);
}

/// Helper to create a centered rectangle.
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
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_affirmative_answers() {
        assert_eq!(handle_confirm_input(key(KeyCode::Char('y'))), ConfirmAction::Confirm);
        assert_eq!(handle_confirm_input(key(KeyCode::Char('Y'))), ConfirmAction::Confirm);
        assert_eq!(handle_confirm_input(key(KeyCode::Enter)), ConfirmAction::Confirm);
    }

    #[test]
    fn test_negative_answers() {
        assert_eq!(handle_confirm_input(key(KeyCode::Char('n'))), ConfirmAction::Cancel);
        assert_eq!(handle_confirm_input(key(KeyCode::Esc)), ConfirmAction::Cancel);
    }

    #[test]
    fn test_other_keys_wait() {
        assert_eq!(handle_confirm_input(key(KeyCode::Char('x'))), ConfirmAction::Continue);
    }
}
