//! View layer: interactive state reducers and the HTML they render

pub mod archive;
pub mod list;
pub mod render;
pub mod theme;

pub use archive::ArchiveState;
pub use list::{ListPage, ListState, SortOrder};
pub use theme::{Theme, ThemeContext};
