//! Content module - posts, front-matter, and markdown rendering

mod frontmatter;
mod markdown;
mod post;
pub mod store;

pub use frontmatter::FrontMatter;
pub use markdown::{MarkdownRenderer, Render};
pub use post::{Post, SortOrder};
pub use store::{ContentStore, Scan, ScanWarning};
