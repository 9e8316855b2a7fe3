//! Element form dialog for create, update, and read-only view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::RgbColor;
use crate::services::{FormDraft, FormField, FormMode};
use crate::tui::Theme;

/// Action returned by the form input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Continue editing
    Continue,
    /// Submit the draft
    Confirm,
    /// Discard the draft
    Cancel,
}

/// Handle input for the element form.
///
/// View mode accepts only closing keys; edits are ignored.
pub fn handle_element_form_input(draft: &mut FormDraft, key: KeyEvent) -> FormAction {
    if draft.is_read_only() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => FormAction::Cancel,
            _ => FormAction::Continue,
        };
    }

    match (key.code, key.modifiers) {
        (KeyCode::Enter, KeyModifiers::NONE) => FormAction::Confirm,
        (KeyCode::Esc, _) => FormAction::Cancel,
        (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Down, _) => {
            draft.next_field();
            FormAction::Continue
        }
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => {
            draft.previous_field();
            FormAction::Continue
        }
        (KeyCode::Backspace, _) => {
            draft.active_value_mut().pop();
            FormAction::Continue
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            draft.active_value_mut().push(c);
            FormAction::Continue
        }
        _ => FormAction::Continue,
    }
}

/// Render the element form dialog.
pub fn render_element_form(f: &mut Frame, draft: &FormDraft, theme: &Theme) {
    let area = centered_rect(60, 60, f.area());

    // Clear the background
    f.render_widget(Clear, area);

    let title = match draft.mode {
        FormMode::Create => " New Element ",
        FormMode::Update => " Edit Element ",
        FormMode::View => " Element Details ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(theme.primary).bg(theme.background));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Description
            Constraint::Length(3), // Color
            Constraint::Min(1),    // Color preview / hint
            Constraint::Length(1), // Controls
        ])
        .margin(1)
        .split(inner_area);

    let read_only = draft.is_read_only();
    render_field(f, chunks[0], FormField::Name, &draft.name, draft, theme);
    render_field(
        f,
        chunks[1],
        FormField::Description,
        &draft.description,
        draft,
        theme,
    );
    render_field(
        f,
        chunks[2],
        FormField::Color,
        &draft.color_input,
        draft,
        theme,
    );

    // Swatch when the hex parses, gentle note when it will fall back
    let preview = match RgbColor::from_hex(&draft.color_input) {
        Ok(color) => Line::from(vec![
            Span::styled("Marker: ", Style::default().fg(theme.text_muted)),
            Span::styled("███", Style::default().fg(color.to_ratatui_color())),
            Span::styled(
                format!(" {}", color.to_hex()),
                Style::default().fg(theme.text_muted),
            ),
        ]),
        Err(_) if read_only => Line::from(""),
        Err(_) => Line::from(Span::styled(
            "Color not recognized; the previous color will be kept",
            Style::default().fg(theme.warning),
        )),
    };
    f.render_widget(
        Paragraph::new(preview).wrap(Wrap { trim: true }),
        chunks[3],
    );

    let controls = if read_only {
        Line::from(vec![
            Span::styled("Enter/Esc", bold(theme.success)),
            Span::raw(" close"),
        ])
    } else {
        Line::from(vec![
            Span::styled("Enter", bold(theme.success)),
            Span::raw(" save  "),
            Span::styled("Esc", bold(theme.error)),
            Span::raw(" cancel  "),
            Span::styled("Tab", bold(theme.accent)),
            Span::raw(" next field"),
        ])
    };
    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center),
        chunks[4],
    );
}

/// Render a single field.
fn render_field(
    f: &mut Frame,
    area: Rect,
    field: FormField,
    value: &str,
    draft: &FormDraft,
    theme: &Theme,
) {
    let is_active = !draft.is_read_only() && draft.active_field == field;

    let style = if is_active {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let border_style = if is_active {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };

    // Display value with cursor if active
    let display_value = if is_active {
        format!("{value}█")
    } else {
        value.to_string()
    };

    let block = Block::default()
        .title(field.label())
        .borders(Borders::ALL)
        .border_style(border_style);

    let paragraph = Paragraph::new(display_value).style(style).block(block);
    f.render_widget(paragraph, area);
}

fn bold(color: ratatui::style::Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Create a centered rect with the given percentage width and height.
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

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn create_draft() -> FormDraft {
        FormDraft::for_create(RgbColor::default())
    }

    #[test]
    fn test_typing_edits_active_field() {
        let mut draft = create_draft();
        handle_element_form_input(&mut draft, key(KeyCode::Char('H')));
        handle_element_form_input(&mut draft, key(KeyCode::Char('i')));
        assert_eq!(draft.name, "Hi");
    }

    #[test]
    fn test_tab_cycles_fields() {
        let mut draft = create_draft();
        assert_eq!(draft.active_field, FormField::Name);
        handle_element_form_input(&mut draft, key(KeyCode::Tab));
        assert_eq!(draft.active_field, FormField::Description);
        handle_element_form_input(&mut draft, key(KeyCode::Tab));
        assert_eq!(draft.active_field, FormField::Color);
        handle_element_form_input(&mut draft, key(KeyCode::Tab));
        assert_eq!(draft.active_field, FormField::Name);
    }

    #[test]
    fn test_backspace_deletes() {
        let mut draft = create_draft();
        draft.name = "AB".to_string();
        handle_element_form_input(&mut draft, key(KeyCode::Backspace));
        assert_eq!(draft.name, "A");
    }

    #[test]
    fn test_enter_confirms_escape_cancels() {
        let mut draft = create_draft();
        assert_eq!(
            handle_element_form_input(&mut draft, key(KeyCode::Enter)),
            FormAction::Confirm
        );
        assert_eq!(
            handle_element_form_input(&mut draft, key(KeyCode::Esc)),
            FormAction::Cancel
        );
    }

    #[test]
    fn test_view_mode_ignores_edits() {
        let mut draft = create_draft();
        draft.mode = FormMode::View;
        draft.name = "A".to_string();
        assert_eq!(
            handle_element_form_input(&mut draft, key(KeyCode::Char('x'))),
            FormAction::Continue
        );
        assert_eq!(draft.name, "A");
        assert_eq!(
            handle_element_form_input(&mut draft, key(KeyCode::Enter)),
            FormAction::Cancel
        );
    }
}
