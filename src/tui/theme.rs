// Theme system for the TUI
//
// Two built-in color themes, switchable at runtime with `t`.
// Each theme defines colors for every UI element the gallery draws.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    /// Get all available themes
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light]
    }

    /// Resolve a configured theme name (case-insensitive), falling back to Dark
    pub fn from_name(name: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                tracing::warn!("Unknown theme '{}', using dark", name);
                ThemeKind::Dark
            })
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
        }
    }

    /// Get the theme configuration
    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,
    /// Focused borders, modal frames
    pub highlight: Color,

    // Title and status
    pub title: Color,
    pub status_bar: Color,

    // Selection
    pub selection: Color,
    pub selection_fg: Color,

    // Gallery
    pub artwork_title: Color,
    pub artist: Color,
    pub field_label: Color,
    pub spinner: Color,
    pub error: Color,
    pub end_marker: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            kind: ThemeKind::Dark,

            background: Color::Reset,
            foreground: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
            border_type: BorderType::Rounded,
            highlight: Color::Cyan,

            title: Color::Cyan,
            status_bar: Color::Green,

            selection: Color::DarkGray,
            selection_fg: Color::Yellow,

            artwork_title: Color::White,
            artist: Color::Gray,
            field_label: Color::Cyan,
            spinner: Color::Yellow,
            error: Color::Red,
            end_marker: Color::DarkGray,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Green,
            log_debug: Color::Blue,
            log_trace: Color::DarkGray,
        }
    }

    /// Light theme for light terminal backgrounds
    pub fn light() -> Self {
        Self {
            kind: ThemeKind::Light,

            background: Color::White,
            foreground: Color::Black,
            muted: Color::Gray,
            border: Color::DarkGray,
            border_type: BorderType::Plain,
            highlight: Color::Blue,

            title: Color::Blue,
            status_bar: Color::Rgb(0, 110, 0),

            selection: Color::Rgb(210, 225, 245),
            selection_fg: Color::Black,

            artwork_title: Color::Black,
            artist: Color::DarkGray,
            field_label: Color::Blue,
            spinner: Color::Rgb(180, 100, 0),
            error: Color::Rgb(180, 0, 0),
            end_marker: Color::Gray,

            log_error: Color::Red,
            log_warn: Color::Rgb(180, 100, 0),
            log_info: Color::Rgb(0, 110, 0),
            log_debug: Color::Blue,
            log_trace: Color::Gray,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ThemeKind::from_name("light"), ThemeKind::Light);
        assert_eq!(ThemeKind::from_name(" Dark "), ThemeKind::Dark);
        assert_eq!(ThemeKind::from_name("solarized"), ThemeKind::Dark);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(ThemeKind::Dark.next(), ThemeKind::Light);
        assert_eq!(ThemeKind::Light.next(), ThemeKind::Dark);
        assert_eq!(ThemeKind::Light.theme().name(), "light");
    }
}
