//! Element data structures: the reorderable record and its patch form.

use crate::models::RgbColor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an element.
///
/// Identifiers are assigned by the sequence's auto-incrementing counter,
/// are immutable once assigned, and are never reused after deletion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ElementId(u64);

impl ElementId {
    /// Creates an identifier from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single reorderable record with identity, label, description, and color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Unique identifier, stable across reorders
    pub id: ElementId,
    /// Display label
    pub name: String,
    /// Free text, may be empty
    pub description: String,
    /// Marker fill color
    pub color: RgbColor,
}

impl Element {
    /// Creates a new `Element` with the given identity and fields.
    #[must_use]
    pub fn new(
        id: ElementId,
        name: impl Into<String>,
        description: impl Into<String>,
        color: RgbColor,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            color,
        }
    }
}

/// Partial record used for create and update submissions.
///
/// Field application is deliberately asymmetric: an empty `name` falls back
/// to the existing value, a `Some` description is applied even when empty,
/// and a `None` color falls back. This matches the form's behavior, where
/// clearing the description is meaningful but clearing the name is not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementPatch {
    /// Replacement label; empty strings fall back to the existing name
    pub name: Option<String>,
    /// Replacement description; applied verbatim, including empty strings
    pub description: Option<String>,
    /// Replacement color; `None` falls back to the existing color
    pub color: Option<RgbColor>,
}

impl ElementPatch {
    /// Creates a patch with all fields set.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        color: Option<RgbColor>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            color,
        }
    }

    /// Applies the patch to an element, honoring the fallback asymmetry.
    pub fn apply_to(&self, element: &mut Element) {
        if let Some(name) = self.name.as_ref().filter(|n| !n.is_empty()) {
            element.name = name.clone();
        }
        if let Some(description) = &self.description {
            element.description = description.clone();
        }
        if let Some(color) = self.color {
            element.color = color;
        }
    }
}
