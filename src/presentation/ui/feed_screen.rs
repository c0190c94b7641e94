//! Card grid state and rendering.

use std::sync::Arc;
use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::Frame;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::{Resize, StatefulImage};
use tracing::{debug, trace};

use crate::application::{ChainOutcome, ImageLoadedEvent};
use crate::domain::entities::{ImageSlot, Post, SlotStatus};
use crate::domain::services::ImageResolver;
use crate::infrastructure::image::placeholder_image;
use crate::presentation::widgets::{image_area, IdeaCard};

/// Card footprint in terminal cells.
pub const CARD_WIDTH: u16 = 32;
/// Card height in rows.
pub const CARD_HEIGHT: u16 = 12;
/// Horizontal gap between cards.
const CARD_GAP: u16 = 2;

/// Minimum overlap with the grid viewport, in tenths, for a card row to
/// count as visible and trigger loading.
const VISIBILITY_TENTHS: u16 = 1;

/// A parameter set for one chain walk: card index, resolved source, and
/// the currently adopted candidate to skip.
pub type WalkRequest = (usize, Option<String>, Option<String>);

/// One card in the grid.
pub struct Card {
    /// The post displayed.
    pub post: Post,
    /// Lazy-loading state for the image.
    pub slot: ImageSlot,
    image: Option<Arc<image::DynamicImage>>,
    protocol: Option<StatefulProtocol>,
}

impl Card {
    fn new(post: Post, source: Option<String>) -> Self {
        Self {
            post,
            slot: ImageSlot::new(source),
            image: None,
            protocol: None,
        }
    }
}

/// State of the feed screen: cards, scroll position, and the terminal
/// graphics picker.
pub struct FeedScreenState {
    cards: Vec<Card>,
    scroll_row: u16,
    columns: u16,
    grid_area: Rect,
    picker: Option<Picker>,
    image_preview: bool,
    render_failures: Vec<usize>,
}

impl FeedScreenState {
    /// Creates an empty screen.
    #[must_use]
    pub fn new(image_preview: bool) -> Self {
        Self {
            cards: Vec::new(),
            scroll_row: 0,
            columns: 1,
            grid_area: Rect::ZERO,
            picker: None,
            image_preview,
            render_failures: Vec::new(),
        }
    }

    /// Probes the terminal for its graphics protocol. Must run after the
    /// terminal enters raw mode; falls back to halfblock rendering.
    pub fn init_picker(&mut self) {
        if !self.image_preview {
            return;
        }
        let picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::halfblocks());
        debug!(protocol = ?picker.protocol_type(), "Graphics picker initialized");
        self.picker = Some(picker);
    }

    /// Replaces the cards with a freshly fetched page and resets scroll.
    pub fn set_posts(&mut self, posts: &[Post], resolver: &ImageResolver) {
        self.cards = posts
            .iter()
            .map(|post| Card::new(post.clone(), resolver.resolve(post)))
            .collect();
        self.scroll_row = 0;
    }

    /// Drops all cards, e.g. after a failed fetch.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.scroll_row = 0;
    }

    /// Returns the cards.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[allow(clippy::cast_possible_truncation)]
    fn total_rows(&self) -> u16 {
        let columns = usize::from(self.columns.max(1));
        self.cards.len().div_ceil(columns).min(usize::from(u16::MAX)) as u16
    }

    /// Scrolls down one card row.
    pub fn scroll_down(&mut self) {
        let max = self.total_rows().saturating_sub(1);
        self.scroll_row = (self.scroll_row + 1).min(max);
    }

    /// Scrolls up one card row.
    pub fn scroll_up(&mut self) {
        self.scroll_row = self.scroll_row.saturating_sub(1);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn card_rect(&self, index: usize) -> Option<Rect> {
        let columns = usize::from(self.columns.max(1));
        let row = (index / columns) as u16;
        let column = (index % columns) as u16;
        if row < self.scroll_row {
            return None;
        }

        let y_offset = (row - self.scroll_row) * CARD_HEIGHT;
        if y_offset >= self.grid_area.height {
            return None;
        }
        let full = Rect::new(
            self.grid_area.x + column * (CARD_WIDTH + CARD_GAP),
            self.grid_area.y + y_offset,
            CARD_WIDTH,
            CARD_HEIGHT,
        );
        let clipped = full.intersection(self.grid_area);
        (clipped.height > 0).then_some(clipped)
    }

    fn is_visible(&self, index: usize) -> bool {
        self.card_rect(index)
            .is_some_and(|rect| rect.height * 10 >= CARD_HEIGHT * VISIBILITY_TENTHS)
    }

    /// Marks newly visible cards and returns the chain walks to spawn.
    ///
    /// Each returned card has transitioned through visible into loading;
    /// cards already loading, loaded, or finally failed are untouched.
    pub fn pending_loads(&mut self) -> Vec<WalkRequest> {
        let mut requests = Vec::new();
        for index in 0..self.cards.len() {
            if !self.is_visible(index) {
                continue;
            }
            let card = &mut self.cards[index];
            if card.slot.mark_visible() && card.slot.begin_loading() {
                trace!(card = index, "Card became visible, starting load");
                requests.push((
                    index,
                    card.slot.source().map(str::to_string),
                    card.slot.adopted().map(str::to_string),
                ));
            }
        }
        requests
    }

    /// Collects retries whose backoff has elapsed.
    pub fn due_retries(&mut self, now: Instant) -> Vec<WalkRequest> {
        let mut requests = Vec::new();
        for (index, card) in self.cards.iter_mut().enumerate() {
            if card.slot.take_due_retry(now) {
                debug!(card = index, retries = card.slot.retries(), "Retrying image load");
                requests.push((
                    index,
                    card.slot.source().map(str::to_string),
                    card.slot.adopted().map(str::to_string),
                ));
            }
        }
        requests
    }

    /// Applies a finished chain walk to its card.
    pub fn apply_outcome(&mut self, event: ImageLoadedEvent, now: Instant) {
        let Some(card) = self.cards.get_mut(event.card) else {
            // The page changed while the walk was in flight.
            return;
        };
        match event.outcome {
            ChainOutcome::Adopted { url, image } => {
                card.slot.adopt(url);
                card.image = Some(image);
                card.protocol = None;
            }
            ChainOutcome::Exhausted => {
                card.slot.record_exhausted(now);
                card.image = Some(placeholder_image());
                card.protocol = None;
            }
        }
    }

    /// Applies render failures collected during the last draw, scheduling
    /// retries. Returns true if any card changed.
    pub fn apply_render_failures(&mut self, now: Instant) -> bool {
        let failures = std::mem::take(&mut self.render_failures);
        let mut changed = false;
        for index in failures {
            if let Some(card) = self.cards.get_mut(index) {
                debug!(card = index, "Adopted image failed to render");
                card.slot.record_render_error(now);
                card.image = None;
                card.protocol = None;
                changed = true;
            }
        }
        changed
    }

    /// Renders the card grid into `area`.
    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect) {
        self.grid_area = area;
        self.columns = (area.width / (CARD_WIDTH + CARD_GAP)).max(1);

        for index in 0..self.cards.len() {
            let Some(rect) = self.card_rect(index) else {
                continue;
            };

            let status = self.cards[index].slot.status();
            let draw_image = self.image_preview
                && self.picker.is_some()
                && self.cards[index].image.is_some()
                && rect.height == CARD_HEIGHT;

            // Terminal failures draw the placeholder raster under the card
            // chrome so the unavailable notice stays readable on top of it.
            let raster_under_chrome = draw_image && status == SlotStatus::FailedFinal;
            if raster_under_chrome {
                self.render_raster(frame, index, rect);
            }

            let card = &self.cards[index];
            frame.render_widget(
                IdeaCard::new(&card.post, status).image_drawn(draw_image && !raster_under_chrome),
                rect,
            );

            if draw_image && !raster_under_chrome {
                self.render_raster(frame, index, rect);
            }
        }
    }

    fn render_raster(&mut self, frame: &mut Frame<'_>, index: usize, rect: Rect) {
        let Some(picker) = &self.picker else {
            return;
        };
        let card = &mut self.cards[index];
        if card.protocol.is_none()
            && let Some(image) = &card.image
        {
            card.protocol = Some(picker.new_resize_protocol((**image).clone()));
        }
        if let Some(protocol) = &mut card.protocol {
            frame.render_stateful_widget(
                StatefulImage::default().resize(Resize::Fit(None)),
                image_area(rect),
                protocol,
            );
            let failed = protocol
                .last_encoding_result()
                .is_some_and(|result| result.is_err());
            if failed && card.slot.status() == SlotStatus::Loaded {
                self.render_failures.push(index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ImageField;

    fn posts(count: usize) -> Vec<Post> {
        (0..count)
            .map(|index| Post {
                id: index as u64,
                title: Some(format!("Idea {index}")),
                published_at: None,
                small_image: ImageField::Url(format!("/storage/{index}.jpg")),
                medium_image: ImageField::Absent,
                image: ImageField::Absent,
            })
            .collect()
    }

    fn screen(count: usize, area: Rect) -> FeedScreenState {
        let resolver = ImageResolver::new("https://content.example.com");
        let mut screen = FeedScreenState::new(true);
        screen.set_posts(&posts(count), &resolver);
        screen.grid_area = area;
        screen.columns = (area.width / (CARD_WIDTH + CARD_GAP)).max(1);
        screen
    }

    #[test]
    fn test_only_visible_cards_start_loading() {
        // Two columns, viewport fits one card row.
        let mut screen = screen(6, Rect::new(0, 0, 70, CARD_HEIGHT));
        let requests = screen.pending_loads();
        let indices: Vec<usize> = requests.iter().map(|(index, _, _)| *index).collect();
        assert_eq!(indices, vec![0, 1]);

        // Off-screen cards stay idle.
        assert_eq!(screen.cards()[2].slot.status(), SlotStatus::Idle);
        // Marking is one-shot.
        assert!(screen.pending_loads().is_empty());
    }

    #[test]
    fn test_scrolling_reveals_new_rows() {
        let mut screen = screen(6, Rect::new(0, 0, 70, CARD_HEIGHT));
        screen.pending_loads();

        screen.scroll_down();
        let indices: Vec<usize> = screen
            .pending_loads()
            .iter()
            .map(|(index, _, _)| *index)
            .collect();
        assert_eq!(indices, vec![2, 3]);
    }

    #[test]
    fn test_partially_visible_row_counts_at_ten_percent() {
        // Viewport shows one full row plus 2 of the next row's 12 rows.
        let mut screen = screen(4, Rect::new(0, 0, 70, CARD_HEIGHT + 2));
        let indices: Vec<usize> = screen
            .pending_loads()
            .iter()
            .map(|(index, _, _)| *index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_sliver_below_threshold_stays_idle() {
        // One extra row is under 10% of a card's height.
        let mut screen = screen(4, Rect::new(0, 0, 70, CARD_HEIGHT + 1));
        let indices: Vec<usize> = screen
            .pending_loads()
            .iter()
            .map(|(index, _, _)| *index)
            .collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_adoption_outcome_updates_slot() {
        let mut screen = screen(2, Rect::new(0, 0, 70, CARD_HEIGHT));
        screen.pending_loads();

        let image = Arc::new(image::DynamicImage::new_rgb8(4, 4));
        screen.apply_outcome(
            ImageLoadedEvent {
                card: 0,
                outcome: ChainOutcome::Adopted {
                    url: "https://wsrv.nl/?url=x".to_string(),
                    image,
                },
            },
            Instant::now(),
        );
        assert_eq!(screen.cards()[0].slot.status(), SlotStatus::Loaded);
        assert_eq!(screen.cards()[1].slot.status(), SlotStatus::Loading);
    }

    #[test]
    fn test_exhaustion_schedules_retry_with_placeholder() {
        let mut screen = screen(1, Rect::new(0, 0, 70, CARD_HEIGHT));
        screen.pending_loads();

        let now = Instant::now();
        screen.apply_outcome(
            ImageLoadedEvent {
                card: 0,
                outcome: ChainOutcome::Exhausted,
            },
            now,
        );
        assert_eq!(screen.cards()[0].slot.status(), SlotStatus::Loading);
        assert!(screen.cards()[0].image.is_some());

        assert!(screen.due_retries(now).is_empty());
        let due = screen.due_retries(now + crate::domain::entities::RETRY_BACKOFF);
        assert_eq!(due.len(), 1);
    }

    #[test]
    fn test_failed_final_notice_overlays_placeholder() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let area = Rect::new(0, 0, 36, CARD_HEIGHT);
        let mut screen = screen(1, area);
        screen.picker = Some(Picker::halfblocks());
        screen.pending_loads();

        // Budget (3 cycles) plus the terminal failure.
        let now = Instant::now();
        for _ in 0..4 {
            screen.apply_outcome(
                ImageLoadedEvent {
                    card: 0,
                    outcome: ChainOutcome::Exhausted,
                },
                now,
            );
        }
        assert_eq!(screen.cards()[0].slot.status(), SlotStatus::FailedFinal);
        assert!(screen.cards()[0].image.is_some());

        let backend = TestBackend::new(area.width, area.height);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| screen.render(frame, area))
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
        }
        assert!(text.contains("Image not available"));
    }

    #[test]
    fn test_outcome_for_stale_card_index_is_dropped() {
        let mut screen = screen(1, Rect::new(0, 0, 70, CARD_HEIGHT));
        screen.apply_outcome(
            ImageLoadedEvent {
                card: 9,
                outcome: ChainOutcome::Exhausted,
            },
            Instant::now(),
        );
        assert_eq!(screen.cards().len(), 1);
    }

    #[test]
    fn test_new_page_resets_cards_and_scroll() {
        let mut screen = screen(6, Rect::new(0, 0, 70, CARD_HEIGHT));
        screen.scroll_down();
        let resolver = ImageResolver::new("https://content.example.com");
        screen.set_posts(&posts(2), &resolver);
        assert_eq!(screen.cards().len(), 2);
        assert_eq!(screen.scroll_row, 0);
        assert_eq!(screen.cards()[0].slot.status(), SlotStatus::Idle);
    }
}
