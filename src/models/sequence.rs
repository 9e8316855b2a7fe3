//! The ordered element sequence and its positional projection.
//!
//! The sequence owns the identifier counter and performs all structural
//! mutations. Every read of the positional projection is regenerated from
//! the current order, so renders can never drift from the data.

use crate::constants::PLACEHOLDER_ELEMENT_NAME;
use crate::models::{Element, ElementId, ElementPatch, RgbColor};
use thiserror::Error;

/// Failure conditions for sequence mutations.
///
/// None of these are fatal: callers treat a failed mutation as a no-op and
/// report it to the status line at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A swap index is outside `0..count`.
    #[error("position {position} is out of range for {count} element(s)")]
    PositionOutOfRange {
        /// The offending index
        position: usize,
        /// Element count at the time of the call
        count: usize,
    },
    /// The target of an update no longer exists (stale reference).
    #[error("no element with id {0}")]
    ElementNotFound(ElementId),
}

/// One entry of the positional projection handed to the chart surface.
///
/// Derived, read-only view: regenerated on every read, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedPoint {
    /// Position index along the axis (0-based)
    pub position: usize,
    /// Identifier of the projected element
    pub id: ElementId,
    /// Display label
    pub label: String,
    /// Free-text description
    pub description: String,
    /// Marker fill color
    pub color: RgbColor,
    /// 1-based order number, display only
    pub order_number: usize,
}

/// The ordered collection of elements.
///
/// # Invariants
///
/// - Identifiers are pairwise distinct and never reused, even after deletion
/// - The identifier space is monotonically increasing
/// - Positions are a dense permutation of `0..count`: no gaps, no duplicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    elements: Vec<Element>,
    next_id: u64,
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequence {
    /// Creates an empty sequence with the identifier counter at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates the demo sequence shown on startup.
    #[must_use]
    pub fn seeded() -> Self {
        let mut sequence = Self::new();
        for (name, description, hex) in crate::constants::DEMO_ELEMENTS {
            // Static palette entries always parse; fall back to the
            // default marker color anyway rather than panic.
            let color = RgbColor::from_hex(hex).unwrap_or_default();
            sequence.insert(ElementPatch::new(name, description, Some(color)));
        }
        sequence
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the sequence holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Appends a new element built from the draft, assigning the next
    /// identifier.
    ///
    /// Blank fields take creation defaults: the placeholder label for the
    /// name, an empty description, and the default marker color. Never
    /// fails.
    pub fn insert(&mut self, draft: ElementPatch) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;

        let name = draft
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_ELEMENT_NAME.to_string());
        let description = draft.description.unwrap_or_default();
        let color = draft.color.unwrap_or_default();

        self.elements.push(Element::new(id, name, description, color));
        id
    }

    /// Removes the element with the given identifier, if present.
    ///
    /// An absent identifier is a silent no-op. Remaining elements keep
    /// their relative order. Returns whether an element was removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|element| element.id != id);
        self.elements.len() != before
    }

    /// Exchanges the elements occupying two positions.
    ///
    /// Swapping a position with itself is a no-op. Either index being
    /// outside `0..count` leaves the sequence unchanged.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), SequenceError> {
        let count = self.elements.len();
        for position in [a, b] {
            if position >= count {
                return Err(SequenceError::PositionOutOfRange { position, count });
            }
        }
        if a != b {
            self.elements.swap(a, b);
        }
        Ok(())
    }

    /// Overwrites the fields of the element matching `id` from the patch,
    /// with per-field fallback semantics (see [`ElementPatch`]).
    pub fn replace(&mut self, id: ElementId, patch: &ElementPatch) -> Result<(), SequenceError> {
        let element = self
            .elements
            .iter_mut()
            .find(|element| element.id == id)
            .ok_or(SequenceError::ElementNotFound(id))?;
        patch.apply_to(element);
        Ok(())
    }

    /// Returns the element with the given identifier.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|element| element.id == id)
    }

    /// Returns the element occupying the given position.
    #[must_use]
    pub fn element_at(&self, position: usize) -> Option<&Element> {
        self.elements.get(position)
    }

    /// Resolves an identifier to its current position.
    #[must_use]
    pub fn position_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|element| element.id == id)
    }

    /// Iterates the elements in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Regenerates the positional projection for rendering.
    ///
    /// Each entry carries the position index, the element's identity and
    /// display fields, and a 1-based order number used purely for display.
    #[must_use]
    pub fn projection(&self) -> Vec<ProjectedPoint> {
        self.elements
            .iter()
            .enumerate()
            .map(|(position, element)| ProjectedPoint {
                position,
                id: element.id,
                label: element.name.clone(),
                description: element.description.clone(),
                color: element.color,
                order_number: position + 1,
            })
            .collect()
    }
}
