//! Reorder protocol: resolving a drop gesture into a pairwise swap.
//!
//! The chart surface reports a drop with the dragged element's identifier
//! and a continuous target coordinate. This adapter rounds the coordinate,
//! re-validates it against the live bounds (the surface's own drag limits
//! are not trusted), resolves the element's current position by identifier
//! rather than by any position attached to the event, and classifies the
//! result. A drop is always at most one pairwise swap.

use crate::models::{ElementId, Sequence};

/// A drop gesture as reported by the chart surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropEvent {
    /// Identifier of the dragged element
    pub element_id: ElementId,
    /// Candidate target position, continuous
    pub target: f64,
}

impl DropEvent {
    /// Creates a drop event.
    #[must_use]
    pub const fn new(element_id: ElementId, target: f64) -> Self {
        Self { element_id, target }
    }
}

/// Outcome of resolving a drop against the current sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResolution {
    /// The drop maps to a pairwise exchange of two positions.
    Swap {
        /// Current position of the dragged element
        from: usize,
        /// Rounded target position
        to: usize,
    },
    /// The element was dropped onto its own slot; nothing to do.
    Identity {
        /// The unchanged position
        position: usize,
    },
    /// The rounded target lies outside `0..count`; the gesture has no effect.
    OutOfRange,
    /// The dragged identifier no longer exists (stale reference).
    UnknownElement,
}

/// Resolves a drop event against the sequence without mutating it.
#[must_use]
pub fn resolve_drop(sequence: &Sequence, event: &DropEvent) -> DropResolution {
    let rounded = event.target.round();
    // The negated comparison also rejects non-finite targets
    if !(rounded >= 0.0 && rounded < sequence.len() as f64) {
        return DropResolution::OutOfRange;
    }
    let to = rounded as usize;

    // Positions attached to in-flight drag state can be stale; the
    // identifier is the only trustworthy handle.
    let Some(from) = sequence.position_of(event.element_id) else {
        return DropResolution::UnknownElement;
    };

    if from == to {
        DropResolution::Identity { position: from }
    } else {
        DropResolution::Swap { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ElementPatch;

    fn sequence_abc() -> Sequence {
        let mut sequence = Sequence::new();
        sequence.insert(ElementPatch::new("A", "", None));
        sequence.insert(ElementPatch::new("B", "", None));
        sequence.insert(ElementPatch::new("C", "", None));
        sequence
    }

    #[test]
    fn test_resolve_rounds_to_nearest_position() {
        let sequence = sequence_abc();
        let event = DropEvent::new(ElementId::new(1), 1.4);
        assert_eq!(
            resolve_drop(&sequence, &event),
            DropResolution::Swap { from: 0, to: 1 }
        );

        let event = DropEvent::new(ElementId::new(1), 1.6);
        assert_eq!(
            resolve_drop(&sequence, &event),
            DropResolution::Swap { from: 0, to: 2 }
        );
    }

    #[test]
    fn test_resolve_identity() {
        let sequence = sequence_abc();
        let event = DropEvent::new(ElementId::new(2), 1.2);
        assert_eq!(
            resolve_drop(&sequence, &event),
            DropResolution::Identity { position: 1 }
        );
    }

    #[test]
    fn test_resolve_out_of_range() {
        let sequence = sequence_abc();
        for target in [-1.0, -0.6, 3.0, 7.5] {
            let event = DropEvent::new(ElementId::new(1), target);
            assert_eq!(resolve_drop(&sequence, &event), DropResolution::OutOfRange);
        }
    }

    #[test]
    fn test_resolve_near_zero_rounds_in_range() {
        let sequence = sequence_abc();
        let event = DropEvent::new(ElementId::new(2), -0.4);
        assert_eq!(
            resolve_drop(&sequence, &event),
            DropResolution::Swap { from: 1, to: 0 }
        );
    }

    #[test]
    fn test_resolve_unknown_element() {
        let sequence = sequence_abc();
        let event = DropEvent::new(ElementId::new(99), 1.0);
        assert_eq!(
            resolve_drop(&sequence, &event),
            DropResolution::UnknownElement
        );
    }

    #[test]
    fn test_resolve_by_id_survives_prior_reorder() {
        let mut sequence = sequence_abc();
        // Element 1 has moved since the drag started
        sequence.swap(0, 1).unwrap();
        let event = DropEvent::new(ElementId::new(1), 2.0);
        assert_eq!(
            resolve_drop(&sequence, &event),
            DropResolution::Swap { from: 1, to: 2 }
        );
    }

    #[test]
    fn test_resolve_on_empty_sequence() {
        let sequence = Sequence::new();
        let event = DropEvent::new(ElementId::new(1), 0.0);
        assert_eq!(resolve_drop(&sequence, &event), DropResolution::OutOfRange);
    }
}
