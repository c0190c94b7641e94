use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::entities::{PageQuery, SortOrder};

pub struct ControlsBarStyle {
    pub summary: Style,
    pub label: Style,
    pub value: Style,
    pub key_hint: Style,
}

impl Default for ControlsBarStyle {
    fn default() -> Self {
        Self {
            summary: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            key_hint: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Row above the grid: "Showing X - Y of Z" on the left, page-size and
/// sort selectors with their key hints on the right.
pub struct ControlsBar {
    query: PageQuery,
    total: u64,
    style: ControlsBarStyle,
}

impl ControlsBar {
    #[must_use]
    pub fn new(query: PageQuery, total: u64) -> Self {
        Self {
            query,
            total,
            style: ControlsBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn style(mut self, style: ControlsBarStyle) -> Self {
        self.style = style;
        self
    }

    fn summary_text(&self) -> String {
        format!(
            " Showing {} - {} of {}",
            self.query.start_item(self.total),
            self.query.end_item(self.total),
            self.total
        )
    }

    fn selector_spans(&self) -> Vec<Span<'static>> {
        let sort_label = match self.query.sort {
            SortOrder::NewestFirst => "Newest",
            SortOrder::OldestFirst => "Oldest",
        };
        vec![
            Span::styled("Per page: ", self.style.label),
            Span::styled(self.query.size.as_u32().to_string(), self.style.value),
            Span::styled(" [s]", self.style.key_hint),
            Span::styled("   Sort: ", self.style.label),
            Span::styled(sort_label, self.style.value),
            Span::styled(" [o] ", self.style.key_hint),
        ]
    }
}

impl Widget for ControlsBar {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let summary = self.summary_text();
        Paragraph::new(Line::from(Span::styled(
            summary.clone(),
            self.style.summary,
        )))
        .render(Rect { height: 1, ..area }, buf);

        let selectors = self.selector_spans();
        let selectors_width: u16 = selectors
            .iter()
            .map(|span| span.content.width() as u16)
            .sum();
        let summary_width = summary.width() as u16;
        if selectors_width < area.width.saturating_sub(summary_width) {
            let right_area = Rect::new(
                area.right().saturating_sub(selectors_width),
                area.y,
                selectors_width,
                1,
            );
            Paragraph::new(Line::from(selectors)).render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PageSize;

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_summary_reflects_page_window() {
        let query = PageQuery {
            page: 3,
            size: PageSize::Ten,
            sort: SortOrder::NewestFirst,
        };
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 1));
        ControlsBar::new(query, 25).render(buf.area, &mut buf);
        let text = row(&buf);
        assert!(text.contains("Showing 21 - 25 of 25"));
        assert!(text.contains("Per page: 10"));
        assert!(text.contains("Sort: Newest"));
    }

    #[test]
    fn test_empty_feed_summary() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 1));
        ControlsBar::new(PageQuery::default(), 0).render(buf.area, &mut buf);
        assert!(row(&buf).contains("Showing 0 - 0 of 0"));
    }

    #[test]
    fn test_selectors_dropped_when_too_narrow() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 1));
        ControlsBar::new(PageQuery::default(), 25).render(buf.area, &mut buf);
        assert!(!row(&buf).contains("Per page"));
    }
}
