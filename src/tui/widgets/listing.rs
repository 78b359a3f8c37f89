//! The main list: collections at the root, videos inside a collection.

use crate::app::state::{AppState, ListCursor};
use crate::archive::models::{Collection, Video, format_date};
use crate::browse::{Context, FetchOutcome, Navigator};
use crate::tui::theme::{LoadingSpinner, Theme, get_theme};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::root::truncate_str;

pub fn render(frame: &mut Frame, state: &mut AppState, nav: &Navigator, area: Rect) {
    let theme = get_theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let context = nav.context();
    match nav.videos() {
        Some(v) => render_outcome(
            frame,
            &theme,
            state.tick,
            &mut state.videos_cursor,
            &context,
            v.outcome(),
            inner,
            video_row,
        ),
        None => render_outcome(
            frame,
            &theme,
            state.tick,
            &mut state.root_cursor,
            &context,
            nav.root_outcome(),
            inner,
            collection_row,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn render_outcome<T>(
    frame: &mut Frame,
    theme: &Theme,
    tick: u64,
    cursor: &mut ListCursor,
    context: &Context,
    outcome: &FetchOutcome<T>,
    area: Rect,
    row: fn(&T, &Theme, usize) -> Line<'static>,
) {
    let page = match outcome {
        FetchOutcome::Loading => {
            let spinner = LoadingSpinner::frame(tick);
            let loading = Paragraph::new(Line::from(format!("{} Loading...", spinner)))
                .style(Style::default().fg(theme.palette.fg_secondary))
                .alignment(Alignment::Center);
            frame.render_widget(loading, area);
            return;
        }
        FetchOutcome::Empty => {
            render_message(frame, theme, context.empty_message(), false, area);
            return;
        }
        FetchOutcome::Error(_) => {
            render_message(frame, theme, context.error_message(), true, area);
            return;
        }
        FetchOutcome::Success(page) => page,
    };

    let visible_height = area.height as usize;
    cursor.clamp(page.items.len());
    cursor.update_scroll(visible_height);
    let max_width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = page
        .items
        .iter()
        .skip(cursor.scroll_offset)
        .take(visible_height)
        .map(|item| ListItem::new(row(item, theme, max_width)))
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(cursor.selected.saturating_sub(cursor.scroll_offset)));

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.palette.bg_primary)
                .bg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("\u{f054} ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_message(frame: &mut Frame, theme: &Theme, message: &str, error: bool, area: Rect) {
    let color = if error {
        theme.palette.error
    } else {
        theme.palette.fg_secondary
    };
    let paragraph = Paragraph::new(Line::from(message.to_string()))
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn collection_row(c: &Collection, theme: &Theme, max_width: usize) -> Line<'static> {
    let icons = &theme.icons;
    let stars = c
        .stars
        .map(|s| format!("{} {:.1}", icons.star, s))
        .unwrap_or_else(|| format!("{} -  ", icons.star));
    let stats = format!(
        "{} reviews {} {} files",
        c.num_reviews.unwrap_or(0),
        icons.bullet,
        c.files_count.unwrap_or(0),
    );
    let title_width = max_width.saturating_sub(stars.chars().count() + stats.chars().count() + 6);

    Line::from(vec![
        Span::styled(
            format!("{} ", icons.collection),
            Style::default().fg(theme.palette.fg_secondary),
        ),
        Span::styled(
            truncate_str(c.display_title(), title_width),
            Style::default().fg(theme.palette.fg_primary),
        ),
        Span::raw("  "),
        Span::styled(stars, Style::default().fg(theme.palette.accent_alt)),
        Span::raw("  "),
        Span::styled(stats, Style::default().fg(theme.palette.fg_secondary)),
    ])
}

fn video_row(v: &Video, theme: &Theme, max_width: usize) -> Line<'static> {
    let icons = &theme.icons;
    let date = v.published().map(format_date).unwrap_or_default();
    let creator = v.creator.clone().unwrap_or_default();
    let meta = match (date.is_empty(), creator.is_empty()) {
        (true, true) => String::new(),
        (false, true) => date,
        (true, false) => creator,
        (false, false) => format!("{date} {} {creator}", icons.bullet),
    };
    let title_width = max_width.saturating_sub(meta.chars().count() + 4);

    Line::from(vec![
        Span::styled(
            format!("{} ", icons.video),
            Style::default().fg(theme.palette.fg_secondary),
        ),
        Span::styled(
            truncate_str(v.display_title(), title_width),
            Style::default().fg(theme.palette.fg_primary),
        ),
        Span::raw("  "),
        Span::styled(meta, Style::default().fg(theme.palette.fg_secondary)),
    ])
}
