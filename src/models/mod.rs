//! Data models for elements, the ordered sequence, and colors.
//!
//! This module contains all the core data structures used throughout the
//! application. Models are designed to be independent of UI and business
//! logic.

pub mod element;
pub mod rgb;
pub mod sequence;

// Re-export all model types
pub use element::{Element, ElementId, ElementPatch};
pub use rgb::RgbColor;
pub use sequence::{ProjectedPoint, Sequence, SequenceError};
