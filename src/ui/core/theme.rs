use crate::ui::core::style::Color;

/// Colors for the pane chrome. Widgets read fields directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub tab_bar_bg: Color,
    pub tab_active_bg: Color,
    pub tab_active_fg: Color,
    pub tab_inactive_bg: Color,
    pub tab_inactive_fg: Color,
    pub tab_hover_bg: Color,
    pub dirty_fg: Color,
    pub close_fg: Color,
    pub close_hover_bg: Color,
    pub focus_border: Color,
    pub separator: Color,
    pub editor_bg: Color,
    pub editor_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub error_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            tab_bar_bg: Color::Rgb(40, 44, 54),
            tab_active_bg: Color::Rgb(29, 33, 41),
            tab_active_fg: Color::Rgb(0xE6, 0xE6, 0xE6),
            tab_inactive_bg: Color::Rgb(40, 44, 54),
            tab_inactive_fg: Color::Rgb(0x9A, 0xA0, 0xA6),
            tab_hover_bg: Color::Rgb(46, 51, 61),
            dirty_fg: Color::Rgb(74, 143, 227),
            close_fg: Color::Rgb(0xB0, 0xB4, 0xBA),
            close_hover_bg: Color::Rgb(0x5A, 0x60, 0x6C),
            focus_border: Color::Rgb(74, 143, 227),
            separator: Color::Rgb(0x3A, 0x3F, 0x4B),
            editor_bg: Color::Rgb(29, 33, 41),
            editor_fg: Color::Rgb(0xD4, 0xD4, 0xD4),
            status_bg: Color::Rgb(40, 44, 54),
            status_fg: Color::Rgb(0xC8, 0xCC, 0xD2),
            error_fg: Color::Rgb(0xF4, 0x47, 0x47),
        }
    }
}
