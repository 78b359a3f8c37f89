use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, InputMode};
use crate::browse::{Context, DetailState, Navigator};
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>, mouse_enabled: bool) {
    tokio::task::spawn_blocking(move || {
        loop {
            if event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                let forwarded = match event::read() {
                    Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => {
                        Some(InputEvent::Key(k))
                    }
                    Ok(CtEvent::Mouse(m)) if mouse_enabled => Some(InputEvent::Mouse(m)),
                    Ok(CtEvent::Resize(_, _)) => Some(InputEvent::Resize),
                    Ok(_) => None,
                    Err(e) => {
                        tracing::debug!(error = %e, "terminal read failed");
                        None
                    }
                };
                if let Some(ev) = forwarded
                    && tx.blocking_send(Event::Input(ev)).is_err()
                {
                    break;
                }
            } else if tx.is_closed() {
                break;
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, nav: &Navigator, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) => match m.kind {
            MouseEventKind::ScrollUp => Some(Action::ListUp),
            MouseEventKind::ScrollDown => Some(Action::ListDown),
            _ => None,
        },
        InputEvent::Key(k) => {
            if state.input_mode == InputMode::EditingPattern {
                return handle_pattern_input(k);
            }
            if state.show_help {
                return handle_help_overlay(k);
            }
            if nav.detail().is_open() {
                return handle_detail_overlay(nav.detail(), k);
            }
            handle_list(nav.context(), k)
        }
    }
}

fn handle_pattern_input(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Enter => Some(Action::SubmitPattern),
        KeyCode::Esc => Some(Action::CancelInput),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::ClearInput)
        }
        KeyCode::Char(c) => Some(Action::InputChar(c)),
        _ => None,
    }
}

fn handle_help_overlay(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::ToggleHelp),
        _ => None,
    }
}

fn handle_detail_overlay(detail: &DetailState, k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
        KeyCode::Char('o') | KeyCode::Enter if matches!(detail, DetailState::Ready(_)) => {
            Some(Action::PlayDetail)
        }
        KeyCode::Char('r') | KeyCode::F(5) if matches!(detail, DetailState::Error { .. }) => {
            Some(Action::Retry)
        }
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::ToggleHelp),
        _ => None,
    }
}

fn handle_list(context: Context, k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),

        // Navigation - vim style
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::GoTop),
        KeyCode::Char('G') | KeyCode::End => Some(Action::GoBottom),
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Esc | KeyCode::Backspace => match context {
            Context::Root => None,
            Context::CollectionVideos(_) => Some(Action::Back),
        },

        // Paging
        KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => Some(Action::NextPage),
        KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => Some(Action::PrevPage),

        KeyCode::Char('s') => Some(Action::CycleSort),
        KeyCode::Char('/') => match context {
            Context::Root => Some(Action::StartPatternEdit),
            Context::CollectionVideos(_) => None,
        },
        KeyCode::Char('r') | KeyCode::F(5) => Some(Action::Retry),
        KeyCode::Char('f') => Some(Action::OpenFeatured),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::ToggleHelp),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_root_keys() {
        let state = AppState::new();
        let nav = Navigator::new();
        assert_eq!(
            map_input_to_action(&state, &nav, key(KeyCode::Char('j'))),
            Some(Action::ListDown)
        );
        assert_eq!(
            map_input_to_action(&state, &nav, key(KeyCode::Char('/'))),
            Some(Action::StartPatternEdit)
        );
        // Nothing to go back to from the root list.
        assert_eq!(map_input_to_action(&state, &nav, key(KeyCode::Esc)), None);
    }

    #[test]
    fn test_pattern_mode_captures_letters() {
        let state = AppState {
            input_mode: InputMode::EditingPattern,
            ..AppState::default()
        };
        let nav = Navigator::new();
        assert_eq!(
            map_input_to_action(&state, &nav, key(KeyCode::Char('q'))),
            Some(Action::InputChar('q'))
        );
        assert_eq!(
            map_input_to_action(&state, &nav, key(KeyCode::Enter)),
            Some(Action::SubmitPattern)
        );
        assert_eq!(
            map_input_to_action(&state, &nav, key(KeyCode::Esc)),
            Some(Action::CancelInput)
        );
    }

    #[test]
    fn test_videos_context_keys() {
        let state = AppState::new();
        let mut nav = Navigator::new();
        nav.enter_collection("TV-FOXNEWSW");
        assert_eq!(map_input_to_action(&state, &nav, key(KeyCode::Esc)), Some(Action::Back));
        assert_eq!(map_input_to_action(&state, &nav, key(KeyCode::Char('/'))), None);
    }

    #[test]
    fn test_loading_detail_swallows_list_keys() {
        let state = AppState::new();
        let mut nav = Navigator::new();
        nav.open_detail("v1");
        assert_eq!(map_input_to_action(&state, &nav, key(KeyCode::Char('j'))), None);
        assert_eq!(map_input_to_action(&state, &nav, key(KeyCode::Char('o'))), None);
        assert_eq!(map_input_to_action(&state, &nav, key(KeyCode::Esc)), Some(Action::Back));
    }
}
