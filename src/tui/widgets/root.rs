//! Root layout widget - orchestrates main layout structure

use crate::app::state::{AppState, InputMode, ToastKind};
use crate::browse::query::SortKey;
use crate::browse::{FetchOutcome, Navigator};
use crate::tui::theme::{Theme, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{detail, help, listing};

/// Main layout structure:
/// ┌──────────────────────────────────────────────┐
/// │ Collections  pattern: *   sort: Stars  1/12  │
/// ├──────────────────────────────────────────────┤
/// │                                              │
/// │            Collection / video list           │
/// │                                              │
/// ├──────────────────────────────────────────────┤
/// │ status line / toast / key hints              │
/// └──────────────────────────────────────────────┘
///
/// Detail and help render as centered overlays on top.
pub fn render(frame: &mut Frame, state: &mut AppState, nav: &Navigator) {
    let root = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // List
            Constraint::Length(1), // Status
        ])
        .split(root);

    render_header(frame, state, nav, rows[0]);
    listing::render(frame, state, nav, rows[1]);
    render_status(frame, state, nav, rows[2]);

    if nav.detail().is_open() {
        detail::render(frame, state, nav.detail(), centered(root, 80, 80));
    }
    if state.show_help {
        help::render(frame, centered(root, 70, 70));
    }
}

fn render_header(frame: &mut Frame, state: &AppState, nav: &Navigator, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let (title, sort_label, page, total) = match nav.videos() {
        Some(v) => (
            format!(" {} {} ", icons.collection, v.title()),
            v.query().sort().label(),
            v.query().page(),
            page_count(v.outcome()),
        ),
        None => (
            format!(" {} Collections ", icons.home),
            nav.root_query().sort().label(),
            nav.root_query().page(),
            page_count(nav.root_outcome()),
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(title)
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = match nav.videos() {
        Some(v) => vec![Span::styled(
            v.collection_id().to_string(),
            Style::default().fg(theme.palette.fg_secondary),
        )],
        None => pattern_spans(state, nav, &theme),
    };
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        format!("{} ", icons.sort),
        Style::default().fg(theme.palette.fg_secondary),
    ));
    spans.push(Span::styled(
        sort_label,
        Style::default().fg(theme.palette.accent_alt),
    ));
    spans.push(Span::raw("   "));
    let page_text = match total {
        Some(total) => format!("Page {page}/{total}"),
        None => format!("Page {page}"),
    };
    spans.push(Span::styled(
        page_text,
        Style::default().fg(theme.palette.fg_secondary),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn pattern_spans(state: &AppState, nav: &Navigator, theme: &Theme) -> Vec<Span<'static>> {
    let icon = Span::styled(
        format!("{} ", theme.icons.search),
        Style::default().fg(theme.palette.fg_secondary),
    );
    match state.input_mode {
        InputMode::EditingPattern => vec![
            icon,
            Span::styled(
                format!("{}▏", state.pattern_input),
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ],
        InputMode::Normal => vec![
            icon,
            Span::styled(
                nav.root_query().pattern().unwrap_or_default().to_string(),
                Style::default().fg(theme.palette.fg_primary),
            ),
        ],
    }
}

fn page_count<T>(outcome: &FetchOutcome<T>) -> Option<u32> {
    match outcome {
        FetchOutcome::Success(page) if page.total_count.is_some() => Some(page.total_pages()),
        _ => None,
    }
}

fn render_status(frame: &mut Frame, state: &AppState, nav: &Navigator, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let line = if let Some(toast) = &state.toast {
        let (icon, color) = match toast.kind {
            ToastKind::Success => (icons.success, theme.palette.accent),
            ToastKind::Error => (icons.error, theme.palette.error),
        };
        Line::from(Span::styled(
            format!(" {} {}", icon, toast.message),
            Style::default().fg(color),
        ))
    } else if let Some(message) = nav.status_message() {
        Line::from(Span::styled(
            format!(" {} {}", icons.info, message),
            Style::default().fg(theme.palette.fg_secondary),
        ))
    } else {
        let hints = match state.input_mode {
            InputMode::EditingPattern => " Enter apply  Esc cancel  Ctrl+u clear",
            InputMode::Normal if nav.videos().is_some() => {
                " Enter details  n/p page  s sort  Esc back  ? help  q quit"
            }
            InputMode::Normal => {
                " Enter open  / filter  n/p page  s sort  f featured  ? help  q quit"
            }
        };
        Line::from(Span::styled(
            hints,
            Style::default().fg(theme.palette.fg_secondary),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Rect of `percent_x` by `percent_y` centered within `area`.
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let char_count: usize = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Evening News", 20), "Evening News");
        assert_eq!(truncate_str("Evening News", 8), "Eveni...");
        assert_eq!(truncate_str("Evening", 2), "Ev");
        assert_eq!(truncate_str("Evening", 0), "");
    }

    #[test]
    fn test_centered_stays_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = centered(area, 80, 50);
        assert!(inner.x >= area.x && inner.right() <= area.right());
        assert!(inner.y >= area.y && inner.bottom() <= area.bottom());
        assert_eq!(inner.width, 80);
        assert_eq!(inner.height, 20);
    }
}
