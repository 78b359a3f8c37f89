//! Nerd Font icons for TUI display
//! Requires a Nerd Font to be installed (https://www.nerdfonts.com)

/// Icon set using Nerd Font glyphs
#[derive(Debug, Clone)]
pub struct Icons {
    // Navigation
    pub home: &'static str,
    pub collection: &'static str,
    pub search: &'static str,
    pub sort: &'static str,
    pub help: &'static str,

    // Status
    pub success: &'static str,
    pub error: &'static str,
    pub info: &'static str,

    // Media
    pub video: &'static str,
    pub play: &'static str,
    pub star: &'static str,
    pub file: &'static str,
    pub calendar: &'static str,
    pub tag: &'static str,

    pub bullet: &'static str,
}

impl Icons {
    /// Nerd Font icon set
    pub const fn nerd() -> Self {
        Self {
            home: "\u{f015}",       // nf-fa-home
            collection: "\u{f07b}", // nf-fa-folder
            search: "\u{f002}",     // nf-fa-search
            sort: "\u{f0dc}",       // nf-fa-sort
            help: "\u{f059}",       // nf-fa-question_circle

            success: "\u{f00c}", // nf-fa-check
            error: "\u{f00d}",   // nf-fa-times
            info: "\u{f05a}",    // nf-fa-info_circle

            video: "\u{f03d}",    // nf-fa-video_camera
            play: "\u{f04b}",     // nf-fa-play
            star: "\u{f005}",     // nf-fa-star
            file: "\u{f15b}",     // nf-fa-file
            calendar: "\u{f073}", // nf-fa-calendar
            tag: "\u{f02b}",      // nf-fa-tag

            bullet: "•",
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::nerd()
    }
}

/// Loading spinner frames
pub struct LoadingSpinner;

impl LoadingSpinner {
    /// Braille-based smooth spinner
    pub const BRAILLE: [&'static str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

    pub fn frame(tick: u64) -> &'static str {
        let idx = (tick / 2) as usize % Self::BRAILLE.len();
        Self::BRAILLE[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        let frames = LoadingSpinner::BRAILLE.len() as u64;
        assert_eq!(LoadingSpinner::frame(0), LoadingSpinner::frame(frames * 2));
        assert_ne!(LoadingSpinner::frame(0), LoadingSpinner::frame(2));
    }
}
