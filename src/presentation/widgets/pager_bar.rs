use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::domain::entities::PageQuery;

pub struct PagerBarStyle {
    pub page: Style,
    pub current_page: Style,
    pub arrow: Style,
    pub arrow_disabled: Style,
}

impl Default for PagerBarStyle {
    fn default() -> Self {
        Self {
            page: Style::default().fg(Color::Gray),
            current_page: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            arrow: Style::default().fg(Color::Gray),
            arrow_disabled: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Centered pager: first/previous arrows, a window of up to five page
/// numbers around the current page, then next/last arrows.
pub struct PagerBar {
    query: PageQuery,
    total: u64,
    style: PagerBarStyle,
}

impl PagerBar {
    #[must_use]
    pub fn new(query: PageQuery, total: u64) -> Self {
        Self {
            query,
            total,
            style: PagerBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn style(mut self, style: PagerBarStyle) -> Self {
        self.style = style;
        self
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let total_pages = self.query.total_pages(self.total);
        let at_first = self.query.page <= 1;
        let at_last = self.query.page >= total_pages;

        let arrow = |symbol: &'static str, disabled: bool| {
            Span::styled(
                format!(" {symbol} "),
                if disabled {
                    self.style.arrow_disabled
                } else {
                    self.style.arrow
                },
            )
        };

        let mut spans = vec![arrow("«", at_first), arrow("‹", at_first)];
        for number in self.query.page_window(self.total) {
            let style = if number == self.query.page {
                self.style.current_page
            } else {
                self.style.page
            };
            spans.push(Span::styled(format!(" {number} "), style));
        }
        spans.push(arrow("›", at_last));
        spans.push(arrow("»", at_last));
        spans
    }
}

impl Widget for PagerBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 || self.total == 0 {
            return;
        }
        Paragraph::new(Line::from(self.spans()).centered()).render(area, buf);
    }
}
