//! The sequence editor controller.
//!
//! Owns the sequence plus all transient UI state (selection, context menu,
//! edit form, delete confirmation) as one explicit mode machine, and
//! exposes only well-defined transition operations. Gestures arrive from
//! the chart surface already translated into element identifiers; the
//! editor never consumes raw input events.

use crate::models::{Element, ElementId, ElementPatch, RgbColor, Sequence, SequenceError};
use crate::services::reorder::{resolve_drop, DropEvent, DropResolution};

/// What the edit form is doing: creating, updating, or read-only viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Drafting a new element
    Create,
    /// Editing an existing element, resolved by stored id on submit
    Update,
    /// Read-only details view
    View,
}

/// Field in the element form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Display label field
    Name,
    /// Description field
    Description,
    /// Hex color field
    Color,
}

impl FormField {
    /// Get the next field.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Description,
            Self::Description => Self::Color,
            Self::Color => Self::Name,
        }
    }

    /// Get the previous field.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Name => Self::Color,
            Self::Description => Self::Name,
            Self::Color => Self::Description,
        }
    }

    /// Get the field label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Color => "Color (hex)",
        }
    }
}

/// Transient draft record backing the element form.
///
/// Exists only while the form is open and is discarded unless explicitly
/// submitted. The color is edited as hex text; an unparseable or blank
/// value becomes "unset" and falls back on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    /// What submitting will do
    pub mode: FormMode,
    /// Update target; required to resolve the element on submit
    pub target: Option<ElementId>,
    /// Currently focused field
    pub active_field: FormField,
    /// Name field value
    pub name: String,
    /// Description field value
    pub description: String,
    /// Color field value as hex text
    pub color_input: String,
}

impl FormDraft {
    /// Creates a draft for a new element, prefilled with the default color.
    #[must_use]
    pub fn for_create(default_color: RgbColor) -> Self {
        Self {
            mode: FormMode::Create,
            target: None,
            active_field: FormField::Name,
            name: String::new(),
            description: String::new(),
            color_input: default_color.to_hex(),
        }
    }

    /// Creates a draft populated from an existing element.
    #[must_use]
    pub fn for_element(mode: FormMode, element: &Element) -> Self {
        Self {
            mode,
            target: Some(element.id),
            active_field: FormField::Name,
            name: element.name.clone(),
            description: element.description.clone(),
            color_input: element.color.to_hex(),
        }
    }

    /// Whether the form accepts edits.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self.mode, FormMode::View)
    }

    /// Move focus to the next field.
    pub fn next_field(&mut self) {
        self.active_field = self.active_field.next();
    }

    /// Move focus to the previous field.
    pub fn previous_field(&mut self) {
        self.active_field = self.active_field.previous();
    }

    /// Get a mutable reference to the focused field's value.
    pub fn active_value_mut(&mut self) -> &mut String {
        match self.active_field {
            FormField::Name => &mut self.name,
            FormField::Description => &mut self.description,
            FormField::Color => &mut self.color_input,
        }
    }

    /// Builds the submission patch from the draft fields.
    ///
    /// Name and description are always "set" (the store applies the
    /// empty-name fallback); the color is set only when the hex parses.
    #[must_use]
    pub fn patch(&self) -> ElementPatch {
        ElementPatch {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            color: RgbColor::from_hex(&self.color_input).ok(),
        }
    }
}

/// Entry of the contextual menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    /// Open the read-only details form
    View,
    /// Open the edit form
    Update,
    /// Ask for delete confirmation
    Delete,
}

impl MenuEntry {
    /// Entries in display order.
    pub const ALL: [Self; 3] = [Self::View, Self::Update, Self::Delete];

    /// Get the next entry, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::View => Self::Update,
            Self::Update => Self::Delete,
            Self::Delete => Self::View,
        }
    }

    /// Get the previous entry, wrapping.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::View => Self::Delete,
            Self::Update => Self::View,
            Self::Delete => Self::Update,
        }
    }

    /// Get the entry label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

/// The editor's current interaction state.
///
/// At most one element is "selected" at a time: the one whose menu is open,
/// whose draft populates the form, or whose deletion awaits confirmation.
/// The machine cycles for the application's lifetime; there is no terminal
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    /// No transient UI open
    Idle,
    /// Contextual menu open for a clicked element
    MenuOpen {
        /// The selected element
        id: ElementId,
        /// Screen cell the menu is anchored to (the click point)
        anchor: (u16, u16),
        /// Highlighted menu entry
        cursor: MenuEntry,
    },
    /// Element form open with a transient draft
    FormOpen {
        /// The draft record
        draft: FormDraft,
    },
    /// Blocking yes/no confirmation before removal
    ConfirmingDelete {
        /// The element to delete on confirmation
        id: ElementId,
    },
}

/// Outcome of a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new element was appended
    Created(ElementId),
    /// An existing element was overwritten
    Updated(ElementId),
    /// Nothing to apply (view mode, or no form open)
    Closed,
}

/// Outcome of a confirmed deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The element was removed
    Removed {
        /// Identifier of the removed element
        id: ElementId,
        /// Its display label, for the status line
        name: String,
    },
    /// The element was already gone (stale reference)
    Missing(ElementId),
}

/// Single controller owning the sequence and all transient UI state.
pub struct SequenceEditor {
    sequence: Sequence,
    mode: EditorMode,
    default_color: RgbColor,
}

impl SequenceEditor {
    /// Creates an editor over the given sequence.
    #[must_use]
    pub const fn new(sequence: Sequence, default_color: RgbColor) -> Self {
        Self {
            sequence,
            mode: EditorMode::Idle,
            default_color,
        }
    }

    /// The underlying sequence.
    #[must_use]
    pub const fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// The current interaction mode.
    #[must_use]
    pub const fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        match &self.mode {
            EditorMode::Idle => None,
            EditorMode::MenuOpen { id, .. } | EditorMode::ConfirmingDelete { id } => Some(*id),
            EditorMode::FormOpen { draft } => draft.target,
        }
    }

    /// Opens the contextual menu for a clicked marker.
    ///
    /// Returns false when the identifier no longer resolves (stale click),
    /// in which case the mode is unchanged. Clicking another marker while
    /// a menu is open re-anchors the menu to the new element.
    pub fn click_point(&mut self, id: ElementId, column: u16, row: u16) -> bool {
        if !matches!(self.mode, EditorMode::Idle | EditorMode::MenuOpen { .. }) {
            return false;
        }
        if self.sequence.get(id).is_none() {
            return false;
        }
        self.mode = EditorMode::MenuOpen {
            id,
            anchor: (column, row),
            cursor: MenuEntry::View,
        };
        true
    }

    /// Moves the menu highlight down.
    pub fn menu_next(&mut self) {
        if let EditorMode::MenuOpen { cursor, .. } = &mut self.mode {
            *cursor = cursor.next();
        }
    }

    /// Moves the menu highlight up.
    pub fn menu_previous(&mut self) {
        if let EditorMode::MenuOpen { cursor, .. } = &mut self.mode {
            *cursor = cursor.previous();
        }
    }

    /// Dismisses the menu without choosing; clears the selection.
    pub fn dismiss_menu(&mut self) {
        if matches!(self.mode, EditorMode::MenuOpen { .. }) {
            self.mode = EditorMode::Idle;
        }
    }

    /// Opens the create form. Offered independently of any selection; an
    /// open menu is closed first.
    pub fn open_create_form(&mut self) {
        if matches!(self.mode, EditorMode::Idle | EditorMode::MenuOpen { .. }) {
            self.mode = EditorMode::FormOpen {
                draft: FormDraft::for_create(self.default_color),
            };
        }
    }

    /// Opens the read-only details form for the menu's element.
    pub fn open_view_form(&mut self) -> bool {
        self.open_form_for_selected(FormMode::View)
    }

    /// Opens the edit form for the menu's element, carrying its id.
    pub fn open_update_form(&mut self) -> bool {
        self.open_form_for_selected(FormMode::Update)
    }

    fn open_form_for_selected(&mut self, mode: FormMode) -> bool {
        let EditorMode::MenuOpen { id, .. } = self.mode else {
            return false;
        };
        // The element can vanish between click and choice
        let Some(element) = self.sequence.get(id) else {
            self.mode = EditorMode::Idle;
            return false;
        };
        self.mode = EditorMode::FormOpen {
            draft: FormDraft::for_element(mode, element),
        };
        true
    }

    /// Asks for delete confirmation for the menu's element.
    ///
    /// The menu closes regardless of how the confirmation is answered.
    pub fn request_delete(&mut self) -> Option<ElementId> {
        let EditorMode::MenuOpen { id, .. } = self.mode else {
            return None;
        };
        self.mode = EditorMode::ConfirmingDelete { id };
        Some(id)
    }

    /// Affirmative answer to the delete confirmation.
    pub fn confirm_delete(&mut self) -> Option<DeleteOutcome> {
        let EditorMode::ConfirmingDelete { id } = self.mode else {
            return None;
        };
        self.mode = EditorMode::Idle;
        let name = self.sequence.get(id).map(|element| element.name.clone());
        if self.sequence.remove(id) {
            Some(DeleteOutcome::Removed {
                id,
                name: name.unwrap_or_default(),
            })
        } else {
            Some(DeleteOutcome::Missing(id))
        }
    }

    /// Negative answer or dismissal of the delete confirmation.
    pub fn cancel_delete(&mut self) {
        if matches!(self.mode, EditorMode::ConfirmingDelete { .. }) {
            self.mode = EditorMode::Idle;
        }
    }

    /// The open form draft, if any.
    #[must_use]
    pub const fn form_draft(&self) -> Option<&FormDraft> {
        match &self.mode {
            EditorMode::FormOpen { draft } => Some(draft),
            _ => None,
        }
    }

    /// Mutable access to the open form draft, if any.
    pub const fn form_draft_mut(&mut self) -> Option<&mut FormDraft> {
        match &mut self.mode {
            EditorMode::FormOpen { draft } => Some(draft),
            _ => None,
        }
    }

    /// Applies the open form and returns to idle.
    ///
    /// Create inserts, update replaces by the draft's stored id, view is a
    /// no-op. A stale update target surfaces as [`SequenceError`]; the form
    /// still closes, matching the non-fatal error policy.
    pub fn submit_form(&mut self) -> Result<SubmitOutcome, SequenceError> {
        if !matches!(self.mode, EditorMode::FormOpen { .. }) {
            return Ok(SubmitOutcome::Closed);
        }
        let EditorMode::FormOpen { draft } = std::mem::replace(&mut self.mode, EditorMode::Idle)
        else {
            return Ok(SubmitOutcome::Closed);
        };

        match draft.mode {
            FormMode::Create => {
                let id = self.sequence.insert(draft.patch());
                Ok(SubmitOutcome::Created(id))
            }
            FormMode::Update => {
                let Some(id) = draft.target else {
                    return Ok(SubmitOutcome::Closed);
                };
                self.sequence.replace(id, &draft.patch())?;
                Ok(SubmitOutcome::Updated(id))
            }
            FormMode::View => Ok(SubmitOutcome::Closed),
        }
    }

    /// Discards the draft and returns to idle.
    pub fn cancel_form(&mut self) {
        if matches!(self.mode, EditorMode::FormOpen { .. }) {
            self.mode = EditorMode::Idle;
        }
    }

    /// Applies a drop gesture from the chart surface.
    ///
    /// Resolution and mutation happen back to back on the event thread, so
    /// any later render reads a fully-swapped sequence.
    pub fn apply_drop(&mut self, event: &DropEvent) -> DropResolution {
        let resolution = resolve_drop(&self.sequence, event);
        if let DropResolution::Swap { from, to } = resolution {
            if self.sequence.swap(from, to).is_err() {
                return DropResolution::OutOfRange;
            }
        }
        resolution
    }
}
