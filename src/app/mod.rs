pub mod actions;
pub mod events;
pub mod state;

use crate::archive::DataSource;
use crate::browse::query::QueryError;
use crate::browse::{
    self, Context, DetailState, Disposition, Filter, Navigator, Request, Response, Selection,
};
use crate::config::Config;
use crate::input;
use crate::player;
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::{Event, NetworkEvent};
use state::{AppState, InputMode, Toast};
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct App {
    cfg: Config,
    state: AppState,
    nav: Navigator,
    source: Arc<dyn DataSource>,
}

impl App {
    pub fn new(cfg: Config, source: Arc<dyn DataSource>) -> Self {
        Self {
            cfg,
            state: AppState::new(),
            nav: Navigator::new(),
            source,
        }
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone(), self.cfg.input.mouse);
        spawn_ticker(tx.clone());

        let first = self.nav.start();
        self.spawn_request(first, &tx);
        tui::draw(terminal, &mut self.state, &self.nav)?;

        while let Some(ev) = rx.recv().await {
            let redraw = match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, &self.nav, input_ev) {
                        self.handle_action(action, &tx);
                    }
                    true
                }
                Event::Network(ne) => {
                    self.handle_network(ne);
                    true
                }
                Event::Tick => {
                    self.state.tick = self.state.tick.wrapping_add(1);
                    // Spinner frames only matter while something is pending.
                    self.is_busy() || self.state.toast.is_some()
                }
            };

            if self.state.should_quit {
                break;
            }

            if redraw {
                tui::draw(terminal, &mut self.state, &self.nav)?;
            }
        }

        Ok(())
    }

    fn is_busy(&self) -> bool {
        let list_loading = match self.nav.videos() {
            Some(v) => v.outcome().is_loading(),
            None => self.nav.root_outcome().is_loading(),
        };
        list_loading || matches!(self.nav.detail(), DetailState::Loading { .. })
    }

    fn active_len(&self) -> usize {
        match self.nav.videos() {
            Some(v) => v.outcome().items().len(),
            None => self.nav.root_outcome().items().len(),
        }
    }

    fn active_cursor(&mut self) -> &mut state::ListCursor {
        match self.nav.context() {
            Context::Root => &mut self.state.root_cursor,
            Context::CollectionVideos(_) => &mut self.state.videos_cursor,
        }
    }

    /// Identifier of the highlighted row in the current list.
    fn highlighted(&self) -> Option<Selection> {
        match self.nav.videos() {
            Some(v) => v
                .outcome()
                .items()
                .get(self.state.videos_cursor.selected)
                .map(|video| Selection::Video(video.identifier.clone())),
            None => self
                .nav
                .root_outcome()
                .items()
                .get(self.state.root_cursor.selected)
                .map(|c| Selection::Collection(c.identifier.clone())),
        }
    }

    fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Resize => {}

            Action::ListUp => self.active_cursor().select_prev(),
            Action::ListDown => {
                let len = self.active_len();
                self.active_cursor().select_next(len);
            }
            Action::GoTop => self.active_cursor().go_top(),
            Action::GoBottom => {
                let len = self.active_len();
                self.active_cursor().go_bottom(len);
            }

            Action::Activate => {
                let Some(selection) = self.highlighted() else {
                    return;
                };
                let entering = matches!(selection, Selection::Collection(_));
                if let Some(req) = self.nav.select(selection) {
                    if entering {
                        self.state.videos_cursor.reset();
                    }
                    self.spawn_request(req, tx);
                }
            }
            Action::Back => {
                if self.state.show_help {
                    self.state.show_help = false;
                } else if self.nav.detail().is_open() {
                    self.nav.close_detail();
                } else if let Some(req) = self.nav.go_home() {
                    self.spawn_request(req, tx);
                }
            }

            Action::NextPage => {
                let result = self.nav.next_page();
                self.issue(result, tx);
            }
            Action::PrevPage => {
                let result = self.nav.prev_page();
                self.issue(result, tx);
            }
            Action::CycleSort => {
                let req = self.nav.cycle_sort();
                self.spawn_request(req, tx);
            }
            Action::Retry => {
                let failed_detail = match self.nav.detail() {
                    DetailState::Error { identifier, .. } => Some(identifier.clone()),
                    _ => None,
                };
                let req = match failed_detail {
                    Some(identifier) => self.nav.open_detail(&identifier),
                    None => self.nav.retry(),
                };
                self.spawn_request(req, tx);
            }
            Action::OpenFeatured => {
                let featured = self.cfg.browse.featured_collection.clone();
                let req = self.nav.enter_collection(&featured);
                self.state.videos_cursor.reset();
                self.spawn_request(req, tx);
            }

            Action::StartPatternEdit => {
                if let Context::Root = self.nav.context() {
                    self.state.pattern_input = self
                        .nav
                        .root_query()
                        .pattern()
                        .unwrap_or_default()
                        .to_string();
                    self.state.input_mode = InputMode::EditingPattern;
                }
            }
            Action::InputChar(c) => self.state.pattern_input.push(c),
            Action::Backspace => {
                self.state.pattern_input.pop();
            }
            Action::ClearInput => self.state.pattern_input.clear(),
            Action::SubmitPattern => {
                self.state.input_mode = InputMode::Normal;
                let pattern = std::mem::take(&mut self.state.pattern_input);
                let result = self.nav.set_filter(Filter::Pattern(pattern));
                self.issue(result, tx);
            }
            Action::CancelInput => {
                self.state.input_mode = InputMode::Normal;
                self.state.pattern_input.clear();
            }

            Action::PlayDetail => {
                if let DetailState::Ready(video) = self.nav.detail() {
                    self.state.toast = Some(match player::launch(&self.cfg.player, video) {
                        Ok(_) => Toast::success(format!("Playing {}", video.display_title())),
                        Err(e) => Toast::error(format!("{e:#}")),
                    });
                }
            }
            Action::ToggleHelp => self.state.show_help = !self.state.show_help,
        }
    }

    fn issue(
        &mut self,
        result: Result<Request, QueryError>,
        tx: &mpsc::Sender<Event>,
    ) {
        match result {
            Ok(req) => self.spawn_request(req, tx),
            Err(e) => self.state.toast = Some(Toast::error(e.to_string())),
        }
    }

    fn handle_network(&mut self, ne: NetworkEvent) {
        match ne {
            NetworkEvent::Completed(response) => {
                let seq = response.seq();
                let is_root = matches!(response, Response::Collections { .. });
                let is_videos = matches!(response, Response::Videos { .. });
                if self.nav.apply(response) == Disposition::Discarded {
                    tracing::trace!(seq = seq.get(), "response dropped by navigator");
                    return;
                }
                if is_root {
                    self.state.root_cursor.reset();
                } else if is_videos {
                    self.state.videos_cursor.reset();
                }
            }
        }
    }

    fn spawn_request(&self, req: Request, tx: &mpsc::Sender<Event>) {
        let source = self.source.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let response = browse::execute(source.as_ref(), req).await;
            let _ = tx
                .send(Event::Network(NetworkEvent::Completed(response)))
                .await;
        });
    }
}

fn spawn_ticker(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(120));
        loop {
            interval.tick().await;
            if tx.send(Event::Tick).await.is_err() {
                break;
            }
        }
    });
}
