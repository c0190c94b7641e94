//! Main application orchestrator.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Layout};
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};

use crate::application::{
    Applied, ChainLoader, FeedController, ImageLoadedEvent, PendingFetch,
};
use crate::domain::entities::PageQuery;
use crate::domain::errors::FeedError;
use crate::domain::ports::{FeedPage, FeedPort, ImageFetchPort, LocationPort};
use crate::domain::services::{ChainConfig, ImageResolver};
use crate::infrastructure::AppConfig;
use crate::presentation::events::{classify, FeedAction};
use crate::presentation::ui::FeedScreenState;
use crate::presentation::widgets::{
    ControlsBar, HeaderBar, PagerBar, StatusBar, StatusMessage,
};

/// Drives the retry scheduler and periodic redraws.
const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Debug)]
enum Action {
    PageLoaded {
        generation: u64,
        result: Result<FeedPage, FeedError>,
    },
}

/// The running application: owns the controller, the card grid, and the
/// channels feeding results back into the event loop.
pub struct App {
    config: AppConfig,
    controller: FeedController,
    feed: Arc<dyn FeedPort>,
    loader: ChainLoader,
    resolver: ImageResolver,
    screen: FeedScreenState,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    image_rx: mpsc::UnboundedReceiver<ImageLoadedEvent>,
    status: StatusMessage,
    running: bool,
}

impl App {
    #[must_use]
    pub fn new(
        config: AppConfig,
        feed: Arc<dyn FeedPort>,
        fetcher: Arc<dyn ImageFetchPort>,
        location: Arc<dyn LocationPort>,
    ) -> Self {
        let resolver = ImageResolver::new(&config.base_url);
        let chain_config = ChainConfig {
            asset_domain: config.asset_domain.clone(),
            proxy_base: config.image_proxy.clone(),
        };

        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (image_tx, image_rx) = mpsc::unbounded_channel();
        let loader = ChainLoader::new(fetcher, chain_config, image_tx);

        let controller = match &config.query {
            Some(query) => {
                FeedController::with_query(location, PageQuery::parse_query(query))
            }
            None => FeedController::new(location),
        };

        let screen = FeedScreenState::new(config.ui.image_preview);

        Self {
            config,
            controller,
            feed,
            loader,
            resolver,
            screen,
            action_tx,
            action_rx,
            image_rx,
            status: StatusMessage::info("Loading feed"),
            running: true,
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.screen.init_picker();

        let pending = self.controller.begin_initial();
        self.dispatch(pending);

        let mut terminal_events = EventStream::new();
        let mut tick = interval(TICK_RATE);

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            // Visibility is computed from the area laid out in the draw
            // above, so new loads spawn right after it.
            let now = Instant::now();
            self.screen.apply_render_failures(now);
            if self.config.ui.image_preview {
                for (card, source, adopted) in self.screen.pending_loads() {
                    self.loader.spawn_walk(card, source, adopted);
                }
            }

            tokio::select! {
                biased;

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                Some(event) = self.image_rx.recv() => {
                    self.screen.apply_outcome(event, Instant::now());
                }

                _ = tick.tick() => {
                    let now = Instant::now();
                    for (card, source, adopted) in self.screen.due_retries(now) {
                        self.loader.spawn_walk(card, source, adopted);
                    }
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if let Event::Key(key) = event
                        && let Some(action) = classify(&key)
                    {
                        self.handle_feed_action(action);
                    }
                }
            }
        }

        info!("Application exiting normally");
        Ok(())
    }

    fn handle_feed_action(&mut self, action: FeedAction) {
        let query = self.controller.query();
        let pending = match action {
            FeedAction::Quit => {
                self.running = false;
                None
            }
            FeedAction::NextPage => self.controller.request_page(query.page + 1),
            FeedAction::PrevPage => {
                if query.page > 1 {
                    self.controller.request_page(query.page - 1)
                } else {
                    None
                }
            }
            FeedAction::FirstPage => self.controller.request_page(1),
            FeedAction::LastPage => {
                let last = self.controller.total_pages();
                self.controller.request_page(last)
            }
            FeedAction::JumpPage(page) => self.controller.request_page(page),
            FeedAction::CycleSize => Some(self.controller.request_size(query.size.next())),
            FeedAction::ToggleSort => Some(self.controller.request_sort(query.sort.toggled())),
            FeedAction::Refresh => Some(self.controller.refresh()),
            FeedAction::ScrollDown => {
                self.screen.scroll_down();
                None
            }
            FeedAction::ScrollUp => {
                self.screen.scroll_up();
                None
            }
        };

        if let Some(pending) = pending {
            self.status = StatusMessage::info(format!(
                "Loading ?{}",
                pending.query.query_string()
            ));
            self.dispatch(pending);
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::PageLoaded { generation, result } => {
                match self.controller.apply_result(generation, result) {
                    Applied::Loaded => {
                        self.screen.set_posts(self.controller.posts(), &self.resolver);
                        self.status = StatusMessage::success(format!(
                            "Page {} of {}",
                            self.controller.query().page,
                            self.controller.total_pages().max(1)
                        ));
                    }
                    Applied::Failed(message) => {
                        self.screen.clear();
                        self.status = StatusMessage::error(message);
                    }
                    Applied::Stale => {
                        debug!("Ignored stale page response");
                    }
                }
            }
        }
    }

    fn dispatch(&self, pending: PendingFetch) {
        let action_tx = self.action_tx.clone();
        FeedController::dispatch(pending, self.feed.clone(), move |generation, result| {
            let _ = action_tx.send(Action::PageLoaded { generation, result });
        });
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        let [header, controls, grid, pager, status] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            HeaderBar::new(&self.config.ui.feed_title, &self.config.ui.feed_tagline),
            header,
        );
        frame.render_widget(
            ControlsBar::new(self.controller.query(), self.controller.total()),
            controls,
        );
        self.screen.render(frame, grid);
        frame.render_widget(
            PagerBar::new(self.controller.query(), self.controller.total()),
            pager,
        );
        frame.render_widget(
            StatusBar::new(&self.status, self.controller.query().query_string()),
            status,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockFeedPort, MockImageFetcher, MockLocation};
    use crate::presentation::widgets::StatusLevel;

    fn app(total: u64) -> (App, Arc<MockFeedPort>) {
        let feed = Arc::new(MockFeedPort::new(total));
        let fetcher = Arc::new(MockImageFetcher::rejecting_all());
        let location = Arc::new(MockLocation::default());
        let app = App::new(AppConfig::default(), feed.clone(), fetcher, location);
        (app, feed)
    }

    async fn load_page(app: &mut App, feed: &MockFeedPort, pending: PendingFetch) {
        let result = feed.fetch_page(&pending.query).await;
        app.handle_action(Action::PageLoaded {
            generation: pending.generation,
            result,
        });
    }

    #[tokio::test]
    async fn test_quit_action_stops_loop() {
        let (mut app, _feed) = app(0);
        assert!(app.running);
        app.handle_feed_action(FeedAction::Quit);
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_loaded_page_populates_grid() {
        let (mut app, feed) = app(25);
        let pending = app.controller.begin_initial();
        load_page(&mut app, &feed, pending).await;

        assert_eq!(app.screen.cards().len(), 10);
        assert_eq!(app.status.level, StatusLevel::Success);
        assert_eq!(app.status.text, "Page 1 of 3");
    }

    #[tokio::test]
    async fn test_failed_page_clears_grid() {
        let (mut app, feed) = app(25);
        let pending = app.controller.begin_initial();
        load_page(&mut app, &feed, pending).await;

        feed.set_fail(true);
        let pending = app.controller.refresh();
        load_page(&mut app, &feed, pending).await;

        assert!(app.screen.cards().is_empty());
        assert_eq!(app.status.level, StatusLevel::Error);
    }

    #[tokio::test]
    async fn test_prev_page_from_first_is_noop() {
        let (mut app, feed) = app(25);
        let pending = app.controller.begin_initial();
        load_page(&mut app, &feed, pending).await;

        app.handle_feed_action(FeedAction::PrevPage);
        assert_eq!(app.controller.query().page, 1);
        assert!(!app.controller.is_loading());
    }
}
