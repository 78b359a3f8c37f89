//! Color palette - Monochrome grayscale theme

use ratatui::style::Color;

/// Monochrome grayscale palette
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub error: Color,
}

impl Palette {
    /// Monochrome palette - pure black, white, and grays
    pub const MONO: Self = Self {
        bg_primary: Color::Rgb(0, 0, 0),          // #000000 pure black
        fg_primary: Color::Rgb(255, 255, 255),    // #ffffff white
        fg_secondary: Color::Rgb(136, 136, 136),  // #888888 medium gray
        accent: Color::Rgb(255, 255, 255),        // #ffffff white
        accent_alt: Color::Rgb(200, 200, 200),    // #c8c8c8 light gray
        border: Color::Rgb(64, 64, 64),           // #404040 dark gray
        error: Color::Rgb(224, 108, 117),         // #e06c75 muted red
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::MONO
    }
}
