//! Input handlers for the main UI and the active popup.
//!
//! Keyboard and mouse events are translated here into editor transitions;
//! all state changes flow through `SequenceEditor` operations.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::chart::SurfaceEvent;
use crate::models::{ElementId, SequenceError};
use crate::services::{
    DeleteOutcome, DropEvent, DropResolution, EditorMode, MenuEntry, SubmitOutcome,
};
use crate::tui::confirm_dialog::{self, ConfirmAction};
use crate::tui::context_menu::{self, MenuAction};
use crate::tui::element_form::{self, FormAction};
use crate::tui::AppState;

/// Handle a keyboard event. Returns true when the application should quit.
pub fn handle_key_event(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Error overlay swallows input until dismissed
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        return Ok(false);
    }

    if state.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
            state.show_help = false;
        }
        return Ok(false);
    }

    match state.editor.mode() {
        EditorMode::Idle => handle_main_input(state, key),
        EditorMode::MenuOpen { cursor, .. } => {
            let cursor = *cursor;
            handle_menu_input(state, cursor, key);
            Ok(false)
        }
        EditorMode::FormOpen { .. } => {
            handle_form_input(state, key);
            Ok(false)
        }
        EditorMode::ConfirmingDelete { .. } => {
            handle_confirm_input(state, key);
            Ok(false)
        }
    }
}

/// Handle input for the main UI (no popup active).
fn handle_main_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    use crossterm::event::KeyModifiers;

    let count = state.editor.sequence().len();
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('?') => state.show_help = true,
        KeyCode::Char('a') => {
            state.canvas.cancel_drag();
            state.editor.open_create_form();
        }
        KeyCode::Left if shift => state.swap_with_neighbor(-1),
        KeyCode::Right if shift => state.swap_with_neighbor(1),
        KeyCode::Left => {
            state.cursor = state.cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            if count > 0 && state.cursor + 1 < count {
                state.cursor += 1;
            }
        }
        KeyCode::Home => state.cursor = 0,
        KeyCode::End => state.cursor = count.saturating_sub(1),
        KeyCode::Enter => state.open_menu_at_cursor(),
        _ => {}
    }
    Ok(false)
}

/// Handle input while the context menu is open.
fn handle_menu_input(state: &mut AppState, cursor: MenuEntry, key: KeyEvent) {
    match context_menu::handle_context_menu_input(cursor, key) {
        MenuAction::Continue => {}
        MenuAction::Next => state.editor.menu_next(),
        MenuAction::Previous => state.editor.menu_previous(),
        MenuAction::Dismiss => state.editor.dismiss_menu(),
        MenuAction::Choose(entry) => match entry {
            MenuEntry::View => {
                if !state.editor.open_view_form() {
                    state.report_stale_element();
                }
            }
            MenuEntry::Update => {
                if !state.editor.open_update_form() {
                    state.report_stale_element();
                }
            }
            MenuEntry::Delete => {
                state.editor.request_delete();
            }
        },
    }
}

/// Handle input while the element form is open.
fn handle_form_input(state: &mut AppState, key: KeyEvent) {
    let Some(draft) = state.editor.form_draft_mut() else {
        return;
    };
    match element_form::handle_element_form_input(draft, key) {
        FormAction::Continue => {}
        FormAction::Cancel => state.editor.cancel_form(),
        FormAction::Confirm => {
            match state.editor.submit_form() {
                Ok(SubmitOutcome::Created(id)) => {
                    let name = state.element_name(id);
                    state.set_status(format!("Added '{name}'"));
                }
                Ok(SubmitOutcome::Updated(id)) => {
                    let name = state.element_name(id);
                    state.set_status(format!("Updated '{name}'"));
                }
                Ok(SubmitOutcome::Closed) => {}
                Err(SequenceError::ElementNotFound(id)) => {
                    state.report_warning(format!(
                        "Element {id} no longer exists; nothing was updated"
                    ));
                }
                Err(err) => {
                    state.set_error(err.to_string());
                }
            }
            state.clamp_cursor();
        }
    }
}

/// Handle input while the delete confirmation is open.
fn handle_confirm_input(state: &mut AppState, key: KeyEvent) {
    match confirm_dialog::handle_confirm_input(key) {
        ConfirmAction::Continue => {}
        ConfirmAction::Cancel => state.editor.cancel_delete(),
        ConfirmAction::Confirm => {
            match state.editor.confirm_delete() {
                Some(DeleteOutcome::Removed { name, .. }) => {
                    state.set_status(format!("Deleted '{name}'"));
                }
                Some(DeleteOutcome::Missing(id)) => {
                    state.report_warning(format!("Element {id} was already gone"));
                }
                None => {}
            }
            state.clamp_cursor();
        }
    }
}

/// Handle a mouse event, routing chart gestures through the surface.
pub fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent) {
    if state.error_message.is_some() || state.show_help {
        return;
    }

    match state.editor.mode() {
        EditorMode::Idle => {
            let projection = state.editor.sequence().projection();
            if let Some(event) = state.canvas.handle_mouse(mouse, &projection) {
                match event {
                    SurfaceEvent::PointClicked { id, column, row } => {
                        if state.editor.click_point(id, column, row) {
                            if let Some(position) = state.editor.sequence().position_of(id) {
                                state.cursor = position;
                            }
                        }
                    }
                    SurfaceEvent::PointDropped { id, target } => {
                        state.apply_drop(id, target);
                    }
                }
            }
        }
        // Clicking away from the open menu dismisses it
        EditorMode::MenuOpen { .. } => {
            if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
                state.editor.dismiss_menu();
            }
        }
        // Form and confirmation are modal; gestures are ignored
        EditorMode::FormOpen { .. } | EditorMode::ConfirmingDelete { .. } => {}
    }
}

impl AppState {
    /// Opens the context menu for the cursor's marker, anchored at its cell.
    fn open_menu_at_cursor(&mut self) {
        self.canvas.cancel_drag();
        let count = self.editor.sequence().len();
        let Some(element) = self.editor.sequence().element_at(self.cursor) else {
            return;
        };
        let id = element.id;
        let (column, row) = self
            .canvas
            .marker_anchor(count, self.cursor)
            .unwrap_or((0, 0));
        self.editor.click_point(id, column, row);
    }

    /// Keyboard reorder: a drop of the cursor's marker onto a neighbor slot.
    fn swap_with_neighbor(&mut self, direction: i64) {
        let Some(element) = self.editor.sequence().element_at(self.cursor) else {
            return;
        };
        let id = element.id;
        let target = self.cursor as i64 + direction;
        self.apply_drop(id, target as f64);
    }

    /// Routes a drop gesture into the editor and reports the outcome.
    fn apply_drop(&mut self, id: ElementId, target: f64) {
        match self.editor.apply_drop(&DropEvent::new(id, target)) {
            DropResolution::Swap { from, to } => {
                self.cursor = to;
                // After the swap the dragged element occupies `to`
                let dragged = self.element_name_at(to);
                let other = self.element_name_at(from);
                self.set_status(format!(
                    "Moved '{dragged}' to #{} (swapped with '{other}')",
                    to + 1
                ));
            }
            // An identity or out-of-range drop has no effect, by design
            DropResolution::Identity { .. } | DropResolution::OutOfRange => {}
            DropResolution::UnknownElement => {
                self.report_warning("Dragged element no longer exists");
            }
        }
    }

    fn element_name(&self, id: ElementId) -> String {
        self.editor
            .sequence()
            .get(id)
            .map_or_else(String::new, |element| element.name.clone())
    }

    fn element_name_at(&self, position: usize) -> String {
        self.editor
            .sequence()
            .element_at(position)
            .map_or_else(String::new, |element| element.name.clone())
    }

    fn report_stale_element(&mut self) {
        self.report_warning("Element no longer exists");
    }
}
