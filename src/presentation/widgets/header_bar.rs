use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct HeaderBarStyle {
    pub title: Style,
    pub tagline: Style,
    pub app_name: Style,
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tagline: Style::default().fg(Color::DarkGray),
            app_name: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Two-line banner: feed title with the app badge on the first row,
/// tagline on the second.
pub struct HeaderBar<'a> {
    title: &'a str,
    tagline: &'a str,
    app_name: &'a str,
    version: &'a str,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    pub fn new(title: &'a str, tagline: &'a str) -> Self {
        Self {
            title,
            tagline,
            app_name: crate::NAME,
            version: crate::VERSION,
            style: HeaderBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn style(mut self, style: HeaderBarStyle) -> Self {
        self.style = style;
        self
    }
}

impl Widget for HeaderBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let title_line = Line::from(Span::styled(
            format!(" {} ", self.title.to_uppercase()),
            self.style.title,
        ));
        Paragraph::new(title_line).render(Rect { height: 1, ..area }, buf);

        let badge = format!(" {} v{} ", self.app_name, self.version);
        let badge_width = badge.chars().count() as u16;
        if badge_width < area.width {
            let badge_area = Rect::new(
                area.right().saturating_sub(badge_width),
                area.y,
                badge_width,
                1,
            );
            Paragraph::new(Line::from(Span::styled(badge, self.style.app_name)))
                .render(badge_area, buf);
        }

        if area.height > 1 {
            let tagline_area = Rect::new(area.x, area.y + 1, area.width, 1);
            Paragraph::new(Line::from(Span::styled(
                format!(" {}", self.tagline),
                self.style.tagline,
            )))
            .render(tagline_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_renders_title_and_tagline() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 2));
        HeaderBar::new("Ideas", "Where all our great things begin")
            .render(buf.area, &mut buf);

        let top: String = (0..60).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(top.contains("IDEAS"));
        let bottom: String = (0..60).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(bottom.contains("Where all our great things begin"));
    }

    #[test]
    fn test_header_tolerates_tiny_area() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        HeaderBar::new("Ideas", "tagline").render(buf.area, &mut buf);
    }
}
