#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    EditingPattern,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(3)
    }
}

/// Highlight position within one list, kept separately per context so
/// returning home does not lose the place.
#[derive(Debug, Clone, Default)]
pub struct ListCursor {
    pub selected: usize,
    pub scroll_offset: usize,
}

impl ListCursor {
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn go_top(&mut self) {
        self.selected = 0;
    }

    pub fn go_bottom(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Pull the selection back inside a list that shrank.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected - visible_height + 1;
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }
}

/// Presentation-only state. Everything about what is being browsed lives in
/// the navigator.
#[derive(Debug, Default)]
pub struct AppState {
    pub should_quit: bool,
    pub tick: u64,
    pub show_help: bool,

    pub input_mode: InputMode,
    pub pattern_input: String,

    pub root_cursor: ListCursor,
    pub videos_cursor: ListCursor,

    pub toast: Option<Toast>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_bounds() {
        let mut c = ListCursor::default();
        c.select_prev();
        assert_eq!(c.selected, 0);
        c.select_next(0);
        assert_eq!(c.selected, 0);
        for _ in 0..10 {
            c.select_next(3);
        }
        assert_eq!(c.selected, 2);
        c.clamp(1);
        assert_eq!(c.selected, 0);
        c.go_bottom(12);
        assert_eq!(c.selected, 11);
        c.go_top();
        assert_eq!(c.selected, 0);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut c = ListCursor::default();
        c.go_bottom(20);
        c.update_scroll(5);
        assert_eq!(c.scroll_offset, 15);
        c.selected = 3;
        c.update_scroll(5);
        assert_eq!(c.scroll_offset, 3);
        c.reset();
        assert_eq!((c.selected, c.scroll_offset), (0, 0));
    }
}
