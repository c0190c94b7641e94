use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::domain::entities::{Post, SlotStatus};

/// Rows at the bottom of a card reserved for the date and title.
const TEXT_ROWS: u16 = 3;

pub struct CardStyle {
    pub border: Style,
    pub title: Style,
    pub date: Style,
    pub notice: Style,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            border: Style::default().fg(Color::DarkGray),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            date: Style::default().fg(Color::DarkGray),
            notice: Style::default().fg(Color::DarkGray),
        }
    }
}

/// One idea card: bordered frame with the image region on top and the
/// publication date plus wrapped title underneath.
///
/// The image itself is rendered separately by the screen, into the rect
/// returned by [`image_area`]; this widget only draws the chrome and the
/// textual stand-ins for the non-loaded states.
pub struct IdeaCard<'a> {
    post: &'a Post,
    status: SlotStatus,
    image_drawn: bool,
    style: CardStyle,
}

/// Returns the region inside `area` where the card's image is drawn.
#[must_use]
pub fn image_area(area: Rect) -> Rect {
    let inner = Block::bordered().inner(area);
    Rect {
        height: inner.height.saturating_sub(TEXT_ROWS),
        ..inner
    }
}

impl<'a> IdeaCard<'a> {
    #[must_use]
    pub fn new(post: &'a Post, status: SlotStatus) -> Self {
        Self {
            post,
            status,
            image_drawn: false,
            style: CardStyle::default(),
        }
    }

    /// Marks that a raster will be drawn over the image area, suppressing
    /// the textual stand-ins.
    #[must_use]
    pub const fn image_drawn(mut self, drawn: bool) -> Self {
        self.image_drawn = drawn;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: CardStyle) -> Self {
        self.style = style;
        self
    }

    fn status_notice(&self) -> Option<&'static str> {
        if self.image_drawn {
            return None;
        }
        match self.status {
            SlotStatus::Idle | SlotStatus::PendingVisible => None,
            SlotStatus::Loading => Some("Loading…"),
            SlotStatus::Loaded => None,
            SlotStatus::FailedFinal => Some("Image not available"),
        }
    }
}

impl Widget for IdeaCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 || area.width < 4 {
            return;
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.style.border);
        let inner = block.inner(area);
        block.render(area, buf);

        let image = image_area(area);
        if let Some(notice) = self.status_notice()
            && image.height > 0
        {
            let middle = Rect {
                y: image.y + image.height / 2,
                height: 1,
                ..image
            };
            Paragraph::new(Line::from(Span::styled(notice, self.style.notice)).centered())
                .render(middle, buf);
        }

        if inner.height < TEXT_ROWS {
            return;
        }
        let text_top = inner.bottom() - TEXT_ROWS;

        let date_area = Rect::new(inner.x, text_top, inner.width, 1);
        Paragraph::new(Line::from(Span::styled(
            self.post.published_label(),
            self.style.date,
        )))
        .render(date_area, buf);

        let title_area = Rect::new(inner.x, text_top + 1, inner.width, 2);
        Paragraph::new(Line::from(Span::styled(
            self.post.display_title().to_string(),
            self.style.title,
        )))
        .wrap(Wrap { trim: true })
        .render(title_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ImageField;

    fn post(title: &str) -> Post {
        Post {
            id: 1,
            title: Some(title.to_string()),
            published_at: Some("2023-09-05T10:00:00.000000Z".to_string()),
            small_image: ImageField::Absent,
            medium_image: ImageField::Absent,
            image: ImageField::Absent,
        }
    }

    fn rendered(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_card_shows_title_and_date() {
        let post = post("Great idea");
        let mut buf = Buffer::empty(Rect::new(0, 0, 32, 12));
        IdeaCard::new(&post, SlotStatus::Loaded).render(buf.area, &mut buf);
        let text = rendered(&buf);
        assert!(text.contains("Great idea"));
        assert!(text.contains("5 September 2023"));
    }

    #[test]
    fn test_failed_card_shows_notice() {
        let post = post("Great idea");
        let mut buf = Buffer::empty(Rect::new(0, 0, 32, 12));
        IdeaCard::new(&post, SlotStatus::FailedFinal).render(buf.area, &mut buf);
        assert!(rendered(&buf).contains("Image not available"));
    }

    #[test]
    fn test_loading_card_shows_spinner_text() {
        let post = post("Great idea");
        let mut buf = Buffer::empty(Rect::new(0, 0, 32, 12));
        IdeaCard::new(&post, SlotStatus::Loading).render(buf.area, &mut buf);
        assert!(rendered(&buf).contains("Loading…"));
    }

    #[test]
    fn test_image_area_leaves_room_for_text() {
        let area = Rect::new(0, 0, 32, 12);
        let image = image_area(area);
        assert_eq!(image.y, 1);
        assert_eq!(image.height, 7);
    }
}
