//! Integration tests for the sequence store invariants.

use lazyseq::models::{ElementId, ElementPatch, RgbColor, Sequence, SequenceError};

fn sequence_abc() -> Sequence {
    let mut sequence = Sequence::new();
    sequence.insert(ElementPatch::new("A", "", None));
    sequence.insert(ElementPatch::new("B", "", None));
    sequence.insert(ElementPatch::new("C", "", None));
    sequence
}

fn id_order(sequence: &Sequence) -> Vec<u64> {
    sequence.projection().iter().map(|p| p.id.raw()).collect()
}

#[test]
fn test_ids_stay_unique_across_mixed_operations() {
    let mut sequence = Sequence::new();
    let mut live: Vec<ElementId> = Vec::new();

    for round in 0..10 {
        live.push(sequence.insert(ElementPatch::new(format!("E{round}"), "", None)));
        if round % 3 == 0 {
            let id = live.remove(0);
            assert!(sequence.remove(id));
        }
    }

    let mut ids: Vec<u64> = sequence.iter().map(|e| e.id.raw()).collect();
    let count = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), count, "live identifiers must be pairwise distinct");
}

#[test]
fn test_positions_stay_dense_after_every_mutation() {
    let mut sequence = sequence_abc();

    sequence.remove(ElementId::new(2));
    sequence.insert(ElementPatch::new("D", "", None));
    sequence.swap(0, 2).unwrap();
    sequence
        .replace(ElementId::new(1), &ElementPatch::new("A2", "", None))
        .unwrap();

    let positions: Vec<usize> = sequence.projection().iter().map(|p| p.position).collect();
    assert_eq!(positions, (0..sequence.len()).collect::<Vec<_>>());

    let orders: Vec<usize> = sequence
        .projection()
        .iter()
        .map(|p| p.order_number)
        .collect();
    assert_eq!(orders, (1..=sequence.len()).collect::<Vec<_>>());
}

#[test]
fn test_swap_is_an_involution() {
    let mut sequence = sequence_abc();
    let original = sequence.clone();

    sequence.swap(0, 2).unwrap();
    assert_ne!(sequence, original);
    sequence.swap(0, 2).unwrap();
    assert_eq!(sequence, original);
}

#[test]
fn test_swap_rejects_out_of_range_positions() {
    let mut sequence = sequence_abc();
    let original = sequence.clone();

    assert!(matches!(
        sequence.swap(0, 5),
        Err(SequenceError::PositionOutOfRange {
            position: 5,
            count: 3
        })
    ));
    assert!(matches!(
        sequence.swap(7, 1),
        Err(SequenceError::PositionOutOfRange { .. })
    ));
    assert_eq!(sequence, original, "failed swaps must be no-ops");
}

#[test]
fn test_replace_fallback_and_explicit_set() {
    let mut sequence = Sequence::new();
    let id = sequence.insert(ElementPatch::new("A", "d", None));

    // Empty description is an explicit set
    let patch = ElementPatch {
        description: Some(String::new()),
        ..ElementPatch::default()
    };
    sequence.replace(id, &patch).unwrap();
    assert_eq!(sequence.get(id).unwrap().description, "");

    // Empty name falls back to the existing value
    let patch = ElementPatch {
        name: Some(String::new()),
        ..ElementPatch::default()
    };
    sequence.replace(id, &patch).unwrap();
    assert_eq!(sequence.get(id).unwrap().name, "A");
}

#[test]
fn test_replace_missing_element_is_reported_not_fatal() {
    let mut sequence = sequence_abc();
    let before = sequence.clone();
    let err = sequence
        .replace(ElementId::new(99), &ElementPatch::new("X", "", None))
        .unwrap_err();
    assert_eq!(err, SequenceError::ElementNotFound(ElementId::new(99)));
    assert_eq!(sequence, before);
}

#[test]
fn test_delete_then_reorder() {
    let mut sequence = sequence_abc();

    sequence.remove(ElementId::new(2));
    assert_eq!(id_order(&sequence), vec![1, 3]);
    let positions: Vec<usize> = sequence.projection().iter().map(|p| p.position).collect();
    assert_eq!(positions, vec![0, 1]);

    sequence.swap(0, 1).unwrap();
    assert_eq!(id_order(&sequence), vec![3, 1]);
}

#[test]
fn test_create_assigns_next_id_and_appends() {
    // Counter at 5 with existing ids {1, 2, 3, 4}
    let mut sequence = Sequence::seeded();
    // Scramble the order so "appends at the end" is not "largest id last"
    sequence.swap(0, 3).unwrap();

    let id = sequence.insert(ElementPatch::new("E", "", None));
    assert_eq!(id, ElementId::new(5));
    assert_eq!(sequence.projection().last().unwrap().id, id);
    assert_eq!(sequence.len(), 5);
}

#[test]
fn test_projection_carries_display_fields() {
    let mut sequence = Sequence::new();
    sequence.insert(ElementPatch::new(
        "Alpha",
        "first one",
        Some(RgbColor::new(1, 2, 3)),
    ));

    let projection = sequence.projection();
    assert_eq!(projection.len(), 1);
    let point = &projection[0];
    assert_eq!(point.label, "Alpha");
    assert_eq!(point.description, "first one");
    assert_eq!(point.color, RgbColor::new(1, 2, 3));
    assert_eq!(point.position, 0);
    assert_eq!(point.order_number, 1);
}
