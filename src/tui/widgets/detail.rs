//! Video detail overlay

use crate::app::state::AppState;
use crate::archive::models::{Video, format_date};
use crate::browse::DetailState;
use crate::browse::nav::DETAIL_ERROR_MESSAGE;
use crate::tui::theme::{LoadingSpinner, Theme, get_theme};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, state: &AppState, detail: &DetailState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    frame.render_widget(Clear, area);

    let title = match detail {
        DetailState::Ready(video) => format!(" {} {} ", icons.video, video.display_title()),
        _ => format!(" {} {} ", icons.video, detail.identifier().unwrap_or_default()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.overlay_border_set())
        .border_style(Style::default().fg(theme.palette.accent_alt))
        .title(title)
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = match detail {
        DetailState::Closed => return,
        DetailState::Loading { .. } => {
            let spinner = LoadingSpinner::frame(state.tick);
            Paragraph::new(Line::from(format!("{} Loading details...", spinner)))
                .style(Style::default().fg(theme.palette.fg_secondary))
                .alignment(Alignment::Center)
        }
        DetailState::Error { .. } => Paragraph::new(vec![
            Line::from(Span::styled(
                DETAIL_ERROR_MESSAGE,
                Style::default().fg(theme.palette.error),
            )),
            Line::default(),
            Line::from(Span::styled(
                "r retry  Esc close",
                Style::default().fg(theme.palette.fg_secondary),
            )),
        ])
        .alignment(Alignment::Center),
        DetailState::Ready(video) => {
            Paragraph::new(video_lines(video, &theme)).wrap(Wrap { trim: false })
        }
    };
    frame.render_widget(paragraph, inner);
}

fn video_lines(video: &Video, theme: &Theme) -> Vec<Line<'static>> {
    let icons = &theme.icons;
    let mut lines = vec![Line::from(Span::styled(
        video.display_title().to_string(),
        Style::default()
            .fg(theme.palette.fg_primary)
            .add_modifier(Modifier::BOLD),
    ))];

    if let Some(date) = video.published() {
        lines.push(field(icons.calendar, "Date", format_date(date), theme));
    }
    if let Some(creator) = &video.creator {
        lines.push(field(icons.info, "Creator", creator.clone(), theme));
    }
    if !video.collection.is_empty() {
        lines.push(field(
            icons.collection,
            "Collections",
            video.collection.join(", "),
            theme,
        ));
    }
    if !video.tags.is_empty() {
        lines.push(field(icons.tag, "Tags", video.tags.join(", "), theme));
    }
    lines.push(field(icons.file, "Thumbnail", video.thumbnail(), theme));

    if let Some(description) = &video.description {
        lines.push(Line::default());
        lines.extend(description.lines().map(|l| {
            Line::from(Span::styled(
                l.to_string(),
                Style::default().fg(theme.palette.fg_primary),
            ))
        }));
    }

    lines.push(Line::default());
    if video.playback_urls.is_empty() {
        lines.push(Line::from(Span::styled(
            "No playback sources",
            Style::default().fg(theme.palette.fg_secondary),
        )));
    } else {
        for (i, source) in video.playback_urls.iter().enumerate() {
            let marker = if i == 0 { icons.play } else { icons.bullet };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} {:10} ", marker, source.format),
                    Style::default().fg(theme.palette.accent_alt),
                ),
                Span::styled(
                    source.url.clone(),
                    Style::default().fg(theme.palette.fg_secondary),
                ),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "o play  Esc close",
            Style::default().fg(theme.palette.fg_secondary),
        )));
    }
    lines
}

fn field(icon: &str, label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{} {:12}", icon, label),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(theme.palette.fg_primary)),
    ])
}
