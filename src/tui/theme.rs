use ratatui::style::Color;

use crate::model::ThemeMode;

/// Terminal colors for one widget theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub badge_bg: Color,
    pub badge_fg: Color,
    /// Row belonging to a selected item
    pub selected_fg: Color,
    pub highlight_bg: Color,
    pub create_fg: Color,
    pub status_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            background: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x37, 0x41, 0x51),
            text_bright: Color::Rgb(0x11, 0x18, 0x27),
            dim: Color::Rgb(0x9C, 0xA3, 0xAF),
            badge_bg: Color::Rgb(0xDB, 0xEA, 0xFE),
            badge_fg: Color::Rgb(0x1E, 0x40, 0xAF),
            selected_fg: Color::Rgb(0x1D, 0x4E, 0xD8),
            highlight_bg: Color::Rgb(0xF3, 0xF4, 0xF6),
            create_fg: Color::Rgb(0x25, 0x63, 0xEB),
            status_fg: Color::Rgb(0x6B, 0x72, 0x80),
        }
    }

    pub fn dark() -> Self {
        Theme {
            background: Color::Rgb(0x11, 0x18, 0x27),
            text: Color::Rgb(0xD1, 0xD5, 0xDB),
            text_bright: Color::Rgb(0xF9, 0xFA, 0xFB),
            dim: Color::Rgb(0x6B, 0x72, 0x80),
            badge_bg: Color::Rgb(0x1E, 0x3A, 0x8A),
            badge_fg: Color::Rgb(0xDB, 0xEA, 0xFE),
            selected_fg: Color::Rgb(0x93, 0xC5, 0xFD),
            highlight_bg: Color::Rgb(0x37, 0x41, 0x51),
            create_fg: Color::Rgb(0x60, 0xA5, 0xFA),
            status_fg: Color::Rgb(0x9C, 0xA3, 0xAF),
        }
    }

    /// `Auto` has no media query to consult in a terminal; it renders dark.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Theme::light(),
            ThemeMode::Dark | ThemeMode::Auto => Theme::dark(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode() {
        assert_eq!(Theme::for_mode(ThemeMode::Light), Theme::light());
        assert_eq!(Theme::for_mode(ThemeMode::Dark), Theme::dark());
        assert_eq!(Theme::for_mode(ThemeMode::Auto), Theme::dark());
    }

    #[test]
    fn test_light_and_dark_differ() {
        assert_ne!(Theme::light().background, Theme::dark().background);
        assert_eq!(Theme::default(), Theme::dark());
    }
}
