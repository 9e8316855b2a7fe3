//! Contextual menu popup for the clicked marker.
//!
//! Offers View/Update/Delete for the selected element, anchored at the
//! click point. Creation is offered by a persistent shortcut instead, so
//! it does not appear here.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::services::MenuEntry;
use crate::tui::Theme;

/// Menu popup width in cells (including borders).
const MENU_WIDTH: u16 = 22;
/// Menu popup height: three entries, a hint line, and borders.
const MENU_HEIGHT: u16 = 6;

/// Action resolved from a key press while the menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Keep the menu open
    Continue,
    /// Move the highlight down
    Next,
    /// Move the highlight up
    Previous,
    /// Choose the given entry
    Choose(MenuEntry),
    /// Close without choosing
    Dismiss,
}

/// Handle input for the context menu.
#[must_use]
pub fn handle_context_menu_input(cursor: MenuEntry, key: KeyEvent) -> MenuAction {
    match key.code {
        KeyCode::Esc => MenuAction::Dismiss,
        KeyCode::Down | KeyCode::Char('j') => MenuAction::Next,
        KeyCode::Up | KeyCode::Char('k') => MenuAction::Previous,
        KeyCode::Enter => MenuAction::Choose(cursor),
        KeyCode::Char('v') => MenuAction::Choose(MenuEntry::View),
        KeyCode::Char('u') => MenuAction::Choose(MenuEntry::Update),
        KeyCode::Char('d') => MenuAction::Choose(MenuEntry::Delete),
        _ => MenuAction::Continue,
    }
}

/// Render the context menu near its anchor, clamped to the frame.
pub fn render_context_menu(
    f: &mut Frame,
    anchor: (u16, u16),
    element_name: &str,
    cursor: MenuEntry,
    theme: &Theme,
) {
    let area = anchored_rect(anchor, f.area());

    // Clear the background area first
    f.render_widget(Clear, area);

    let title: String = element_name.chars().take(MENU_WIDTH as usize - 4).collect();
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .style(Style::default().fg(theme.primary).bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let items: Vec<ListItem> = MenuEntry::ALL
        .iter()
        .map(|entry| {
            let style = if *entry == cursor {
                Style::default()
                    .fg(theme.accent)
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(format!(" {}", entry.label())).style(style)
        })
        .collect();

    let list_area = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };
    f.render_widget(List::new(items), list_area);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("↑↓", Style::default().fg(theme.accent)),
        Span::styled(" move  ", Style::default().fg(theme.text_muted)),
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::styled(" close", Style::default().fg(theme.text_muted)),
    ]));
    if inner.height > 0 {
        f.render_widget(
            hint,
            Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1,
                ..inner
            },
        );
    }
}

/// Popup rect next to the anchor cell, kept fully on screen.
fn anchored_rect(anchor: (u16, u16), frame: Rect) -> Rect {
    let width = MENU_WIDTH.min(frame.width);
    let height = MENU_HEIGHT.min(frame.height);
    let max_x = frame.width.saturating_sub(width);
    let max_y = frame.height.saturating_sub(height);
    Rect {
        x: (anchor.0.saturating_add(1)).min(max_x),
        y: (anchor.1.saturating_add(1)).min(max_y),
        width,
        height,
    }
}
