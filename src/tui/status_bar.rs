//! Status bar widget for displaying status messages and help hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::services::EditorMode;

use super::{AppState, Theme};

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar: message, marker detail, and key hints.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let status_style = state.status_color_override.map_or_else(
            || Style::default().fg(theme.text),
            |color| Style::default().fg(color),
        );
        let mut lines = vec![Line::from(Span::styled(
            state.status_message.clone(),
            status_style,
        ))];

        // Marker detail mirrors the hover tooltip: name, description, order
        if matches!(state.editor.mode(), EditorMode::Idle) {
            if let Some(element) = state.editor.sequence().element_at(state.cursor) {
                // Truncate on char boundaries; descriptions are free text
                let description = if element.description.is_empty() {
                    String::new()
                } else if element.description.chars().count() > 50 {
                    let truncated: String = element.description.chars().take(47).collect();
                    format!(" — {truncated}…")
                } else {
                    format!(" — {}", element.description)
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        element.name.clone(),
                        Style::default()
                            .fg(element.color.to_ratatui_color())
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description, Style::default().fg(theme.text)),
                    Span::styled(
                        format!("  Position: #{}", state.cursor + 1),
                        Style::default().fg(theme.text_muted),
                    ),
                ]));
            } else {
                lines.push(Line::from(""));
            }
        } else {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("a", Style::default().fg(theme.accent)),
            Span::styled(" add  ", Style::default().fg(theme.text_muted)),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::styled(" menu  ", Style::default().fg(theme.text_muted)),
            Span::styled("drag/Shift+←→", Style::default().fg(theme.accent)),
            Span::styled(" reorder  ", Style::default().fg(theme.text_muted)),
            Span::styled("?", Style::default().fg(theme.accent)),
            Span::styled(" help  ", Style::default().fg(theme.text_muted)),
            Span::styled("q", Style::default().fg(theme.accent)),
            Span::styled(" quit", Style::default().fg(theme.text_muted)),
        ]));

        let status = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.primary).bg(theme.background)),
        );

        f.render_widget(status, area);
    }
}
