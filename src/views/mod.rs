//! Presentation layer: maps fetched movie data and session state to plain
//! display records for the UI renderer.

pub mod images;
pub mod labels;
pub mod page;
pub mod state;

pub use images::{ImageUrls, ImageView};
pub use page::{render_page, PageView, RecommendationsView};
pub use state::{Action, SelectionState};
