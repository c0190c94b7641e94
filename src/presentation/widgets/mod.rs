//! Reusable widgets.

/// Idea card frame.
pub mod card;
/// Summary and selector row.
pub mod controls_bar;
/// Title banner.
pub mod header_bar;
/// Page-number strip.
pub mod pager_bar;
/// Bottom status row.
pub mod status_bar;

pub use card::{image_area, CardStyle, IdeaCard};
pub use controls_bar::ControlsBar;
pub use header_bar::HeaderBar;
pub use pager_bar::PagerBar;
pub use status_bar::{StatusBar, StatusLevel, StatusMessage};
