//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the demo sequence contents.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "LazySeq";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "lazyseq";

/// Label substituted when an element is created with an empty name.
pub const PLACEHOLDER_ELEMENT_NAME: &str = "New Element";

/// Demo sequence shown on startup: (name, description, hex color).
pub const DEMO_ELEMENTS: [(&str, &str, &str); 4] = [
    ("Element 1", "First element", "#3498DB"),
    ("Element 2", "Second element", "#2ECC71"),
    ("Element 3", "Third element", "#F39C12"),
    ("Element 4", "Fourth element", "#E74C3C"),
];
