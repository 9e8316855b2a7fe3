//! Help overlay listing shortcuts and mouse gestures.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::Theme;

/// Help overlay widget.
pub struct HelpOverlay;

impl HelpOverlay {
    /// Render the help overlay centered over the UI.
    pub fn render(f: &mut Frame, theme: &Theme) {
        let area = centered_rect(60, 70, f.area());

        // Clear the background area first
        f.render_widget(Clear, area);

        let background = Block::default().style(Style::default().bg(theme.background));
        f.render_widget(background, area);

        let entry = |keys: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(
                    format!("  {keys:<14}"),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(what, Style::default().fg(theme.text)),
            ])
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Click on elements to access the menu. Drag to reorder.",
                Style::default().fg(theme.text_muted),
            )),
            Line::from(""),
            entry("Click marker", "open View/Update/Delete menu"),
            entry("Drag marker", "swap it with the target slot"),
            Line::from(""),
            entry("←/→", "move the marker cursor"),
            entry("Enter", "open the menu for the cursor"),
            entry("Shift+←/→", "swap the cursor's marker"),
            entry("a", "add a new element"),
            Line::from(""),
            entry("?", "toggle this help"),
            entry("q", "quit"),
        ];

        let help = Paragraph::new(text).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.primary)),
        );

        f.render_widget(help, area);
    }
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
