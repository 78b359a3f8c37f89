//! Border styles

use ratatui::symbols::border;

/// Rounded for the base panes, thick for overlays so they stand out from
/// whatever list sits underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Pane,
    Overlay,
}

impl BorderStyle {
    pub fn to_border_set(self) -> border::Set<'static> {
        match self {
            BorderStyle::Pane => border::ROUNDED,
            BorderStyle::Overlay => border::THICK,
        }
    }
}
