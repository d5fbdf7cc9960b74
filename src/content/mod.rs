//! Content module - post documents and the pipeline that loads them

mod frontmatter;
mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use markdown::{html_escape, MarkdownRenderer};
pub use post::{excerpt_of, normalize_date, Post};
