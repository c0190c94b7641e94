use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Severity of the status message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusLevel {
    /// Neutral information.
    #[default]
    Info,
    /// Completed operation.
    Success,
    /// Recoverable problem.
    Warning,
    /// Failed operation.
    Error,
}

/// A message shown in the status bar.
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    /// Severity.
    pub level: StatusLevel,
    /// Text to display.
    pub text: String,
}

impl StatusMessage {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Success,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Warning,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

/// Bottom row: status message on the left, canonical query string on the
/// right so the current location is always visible.
pub struct StatusBar<'a> {
    message: &'a StatusMessage,
    location: String,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub fn new(message: &'a StatusMessage, location: String) -> Self {
        Self { message, location }
    }

    fn message_style(&self) -> Style {
        match self.message.level {
            StatusLevel::Info => Style::default().fg(Color::Gray),
            StatusLevel::Success => Style::default().fg(Color::Green),
            StatusLevel::Warning => Style::default().fg(Color::Yellow),
            StatusLevel::Error => Style::default().fg(Color::Red),
        }
    }
}

impl Widget for StatusBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let message = format!(" {}", self.message.text);
        Paragraph::new(Line::from(Span::styled(
            message.clone(),
            self.message_style(),
        )))
        .render(Rect { height: 1, ..area }, buf);

        let location = format!("?{} ", self.location);
        let location_width = location.width() as u16;
        if location_width < area.width.saturating_sub(message.width() as u16) {
            let right_area = Rect::new(
                area.right().saturating_sub(location_width),
                area.y,
                location_width,
                1,
            );
            Paragraph::new(Line::from(Span::styled(
                location,
                Style::default().fg(Color::DarkGray),
            )))
            .render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PageQuery;

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_status_bar_shows_message_and_location() {
        let message = StatusMessage::success("Loaded page 2");
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 1));
        StatusBar::new(&message, PageQuery::default().query_string()).render(buf.area, &mut buf);
        let text = row(&buf);
        assert!(text.contains("Loaded page 2"));
        assert!(text.contains("?page=1&size=10&sort=-published_at"));
    }

    #[test]
    fn test_error_message_is_red() {
        let message = StatusMessage::error("Network error");
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 1));
        StatusBar::new(&message, String::new()).render(buf.area, &mut buf);
        let x = (0..80).find(|&x| buf[(x, 0)].symbol() == "N").expect("text");
        assert_eq!(buf[(x, 0)].fg, Color::Red);
    }
}
