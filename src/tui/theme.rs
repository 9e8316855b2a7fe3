//! Theme system for consistent UI colors across dark and light modes.
//!
//! This module provides a centralized theme management system that
//! automatically detects the OS theme (dark/light mode) and applies
//! appropriate colors.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Semantic color theme for the TUI.
///
/// Provides consistent colors across all UI components with support
/// for both dark and light terminal backgrounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and focus states
    pub accent: Color,
    /// Success state color for confirmations and success messages
    pub success: Color,
    /// Error state color for errors and destructive actions
    pub error: Color,
    /// Warning state color for warnings and cautions
    pub warning: Color,
    /// Primary text content color
    pub text: Color,
    /// Muted text color for help text and dim content
    pub text_muted: Color,
    /// Main background color
    pub background: Color,
    /// Highlight/selection background color
    pub highlight_bg: Color,
}

impl Theme {
    /// Detects the OS theme and returns the appropriate Theme.
    ///
    /// Uses the `dark-light` crate to detect whether the OS is in dark or
    /// light mode, and returns the matching theme.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Fall back to dark theme for dark mode, unspecified, or errors
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Resolves the configured mode into a theme.
    ///
    /// `Auto` detects the OS setting; `Dark`/`Light` are explicit.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Creates a dark theme optimized for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::DarkGray,
        }
    }

    /// Creates a light theme optimized for light terminal backgrounds.
    ///
    /// Accent colors are darkened for visibility on light backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0),
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(230, 230, 230),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
