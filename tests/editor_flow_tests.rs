//! Integration tests for the selection, menu, and form flows.

use lazyseq::constants::PLACEHOLDER_ELEMENT_NAME;
use lazyseq::models::{ElementId, ElementPatch, RgbColor, Sequence, SequenceError};
use lazyseq::services::{
    DeleteOutcome, EditorMode, FormMode, MenuEntry, SequenceEditor, SubmitOutcome,
};

fn editor_abc() -> SequenceEditor {
    let mut sequence = Sequence::new();
    sequence.insert(ElementPatch::new("A", "first", Some(RgbColor::new(1, 1, 1))));
    sequence.insert(ElementPatch::new("B", "second", Some(RgbColor::new(2, 2, 2))));
    sequence.insert(ElementPatch::new("C", "third", Some(RgbColor::new(3, 3, 3))));
    SequenceEditor::new(sequence, RgbColor::default())
}

#[test]
fn test_full_update_flow() {
    let mut editor = editor_abc();

    assert!(editor.click_point(ElementId::new(2), 12, 4));
    assert_eq!(editor.selection(), Some(ElementId::new(2)));

    assert!(editor.open_update_form());
    {
        let draft = editor.form_draft_mut().unwrap();
        assert_eq!(draft.mode, FormMode::Update);
        assert_eq!(draft.name, "B");
        assert_eq!(draft.description, "second");
        draft.name = "Beta".to_string();
        draft.color_input = "#102030".to_string();
    }

    assert_eq!(
        editor.submit_form().unwrap(),
        SubmitOutcome::Updated(ElementId::new(2))
    );
    assert_eq!(*editor.mode(), EditorMode::Idle);
    assert_eq!(editor.selection(), None);

    let element = editor.sequence().get(ElementId::new(2)).unwrap();
    assert_eq!(element.name, "Beta");
    assert_eq!(element.color, RgbColor::new(0x10, 0x20, 0x30));
    // Order is untouched by an update
    let ids: Vec<u64> = editor
        .sequence()
        .projection()
        .iter()
        .map(|p| p.id.raw())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_update_with_unparseable_color_keeps_existing() {
    let mut editor = editor_abc();
    editor.click_point(ElementId::new(1), 0, 0);
    editor.open_update_form();
    editor.form_draft_mut().unwrap().color_input = "not-a-color".to_string();
    editor.submit_form().unwrap();
    assert_eq!(
        editor.sequence().get(ElementId::new(1)).unwrap().color,
        RgbColor::new(1, 1, 1)
    );
}

#[test]
fn test_create_flow_with_blank_name() {
    let mut editor = editor_abc();
    editor.open_create_form();
    {
        let draft = editor.form_draft_mut().unwrap();
        assert_eq!(draft.mode, FormMode::Create);
        // Prefilled with the default marker color
        assert_eq!(draft.color_input, RgbColor::default().to_hex());
        draft.description = "made in a test".to_string();
    }
    let SubmitOutcome::Created(id) = editor.submit_form().unwrap() else {
        panic!("expected a creation outcome");
    };

    assert_eq!(id, ElementId::new(4));
    let element = editor.sequence().get(id).unwrap();
    assert_eq!(element.name, PLACEHOLDER_ELEMENT_NAME);
    assert_eq!(element.description, "made in a test");
    assert_eq!(element.color, RgbColor::default());
    // Appended at the end
    assert_eq!(editor.sequence().projection().last().unwrap().id, id);
}

#[test]
fn test_view_flow_changes_nothing() {
    let mut editor = editor_abc();
    let before = editor.sequence().clone();

    editor.click_point(ElementId::new(3), 0, 0);
    assert!(editor.open_view_form());
    assert!(editor.form_draft().unwrap().is_read_only());
    assert_eq!(editor.submit_form().unwrap(), SubmitOutcome::Closed);
    assert_eq!(*editor.sequence(), before);
    assert_eq!(*editor.mode(), EditorMode::Idle);
}

#[test]
fn test_menu_cursor_drives_choice() {
    let mut editor = editor_abc();
    editor.click_point(ElementId::new(1), 0, 0);
    // View -> Update
    editor.menu_next();
    let EditorMode::MenuOpen { cursor, .. } = editor.mode() else {
        panic!("menu should be open");
    };
    assert_eq!(*cursor, MenuEntry::Update);
}

#[test]
fn test_menu_dismissal_returns_to_idle() {
    let mut editor = editor_abc();
    editor.click_point(ElementId::new(1), 0, 0);
    editor.dismiss_menu();
    assert_eq!(*editor.mode(), EditorMode::Idle);
    assert_eq!(editor.selection(), None);
}

#[test]
fn test_delete_flow_confirmed() {
    let mut editor = editor_abc();
    editor.click_point(ElementId::new(2), 0, 0);
    assert_eq!(editor.request_delete(), Some(ElementId::new(2)));
    assert!(matches!(
        editor.mode(),
        EditorMode::ConfirmingDelete { id } if *id == ElementId::new(2)
    ));

    let outcome = editor.confirm_delete().unwrap();
    assert_eq!(
        outcome,
        DeleteOutcome::Removed {
            id: ElementId::new(2),
            name: "B".to_string()
        }
    );
    assert_eq!(editor.sequence().len(), 2);
    assert!(editor.sequence().get(ElementId::new(2)).is_none());
}

#[test]
fn test_delete_flow_cancelled_still_closes_menu() {
    let mut editor = editor_abc();
    editor.click_point(ElementId::new(2), 0, 0);
    editor.request_delete();
    editor.cancel_delete();

    // The element survives, and the menu did not reopen
    assert_eq!(editor.sequence().len(), 3);
    assert_eq!(*editor.mode(), EditorMode::Idle);
}

#[test]
fn test_stale_update_is_reported_and_form_closes() {
    let mut editor = editor_abc();
    editor.click_point(ElementId::new(2), 0, 0);
    editor.open_update_form();

    // Simulate the element disappearing underneath the open form by
    // retargeting the draft at an id that no longer resolves
    {
        let draft = editor.form_draft_mut().unwrap();
        draft.name = "stale".to_string();
        draft.target = Some(ElementId::new(99));
    }

    let err = editor.submit_form().unwrap_err();
    assert_eq!(err, SequenceError::ElementNotFound(ElementId::new(99)));
    // The failure is reported, not fatal: the form still closed
    assert_eq!(*editor.mode(), EditorMode::Idle);
    assert_eq!(editor.sequence().len(), 3);
}

#[test]
fn test_create_offered_while_menu_open() {
    let mut editor = editor_abc();
    editor.click_point(ElementId::new(1), 0, 0);
    // The persistent create control closes the menu and opens the form
    editor.open_create_form();
    assert!(matches!(editor.mode(), EditorMode::FormOpen { .. }));
    assert_eq!(editor.form_draft().unwrap().mode, FormMode::Create);
}

#[test]
fn test_cancel_form_discards_draft() {
    let mut editor = editor_abc();
    editor.click_point(ElementId::new(1), 0, 0);
    editor.open_update_form();
    editor.form_draft_mut().unwrap().name = "Changed".to_string();
    editor.cancel_form();

    assert_eq!(editor.sequence().get(ElementId::new(1)).unwrap().name, "A");
    assert_eq!(*editor.mode(), EditorMode::Idle);
}

#[test]
fn test_machine_cycles_without_terminal_state() {
    let mut editor = editor_abc();
    for _ in 0..3 {
        editor.click_point(ElementId::new(1), 0, 0);
        editor.open_view_form();
        editor.cancel_form();
        assert_eq!(*editor.mode(), EditorMode::Idle);
    }
}
