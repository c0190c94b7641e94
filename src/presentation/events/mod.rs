//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Action derived from a key press on the feed screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedAction {
    /// Exit the application.
    Quit,
    /// Go to the next page.
    NextPage,
    /// Go to the previous page.
    PrevPage,
    /// Jump to the first page.
    FirstPage,
    /// Jump to the last page.
    LastPage,
    /// Jump directly to a page number.
    JumpPage(u32),
    /// Cycle the page size through the allowed set.
    CycleSize,
    /// Toggle the sort order.
    ToggleSort,
    /// Re-fetch the current page.
    Refresh,
    /// Scroll the grid down one card row.
    ScrollDown,
    /// Scroll the grid up one card row.
    ScrollUp,
}

/// Classifies a key event into a feed action, if it maps to one.
#[must_use]
pub fn classify(key: &KeyEvent) -> Option<FeedAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(FeedAction::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(FeedAction::Quit),
        KeyCode::Char('n') | KeyCode::Right | KeyCode::Char('l') => Some(FeedAction::NextPage),
        KeyCode::Char('p') | KeyCode::Left | KeyCode::Char('h') => Some(FeedAction::PrevPage),
        KeyCode::Char('g') | KeyCode::Home => Some(FeedAction::FirstPage),
        KeyCode::Char('G') | KeyCode::End => Some(FeedAction::LastPage),
        KeyCode::Char('s') => Some(FeedAction::CycleSize),
        KeyCode::Char('o') => Some(FeedAction::ToggleSort),
        KeyCode::Char('r') => Some(FeedAction::Refresh),
        KeyCode::Char('j') | KeyCode::Down => Some(FeedAction::ScrollDown),
        KeyCode::Char('k') | KeyCode::Up => Some(FeedAction::ScrollUp),
        KeyCode::Char(digit @ '1'..='9') => {
            Some(FeedAction::JumpPage(u32::from(digit as u8 - b'0')))
        }
        _ => None,
    }
}
