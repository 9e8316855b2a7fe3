//! Domain services: the reorder protocol and the editor controller.

pub mod editor;
pub mod reorder;

pub use editor::{
    DeleteOutcome, EditorMode, FormDraft, FormField, FormMode, MenuEntry, SequenceEditor,
    SubmitOutcome,
};
pub use reorder::{resolve_drop, DropEvent, DropResolution};
