//! Content module - discovers posts and categories and prepares them for display

mod defaults;
mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
pub mod query;
mod stats;
pub mod toc;

pub use defaults::{Fallback, Field, FrontMatterDefaults};
pub use error::ContentError;
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{Category, Post, RenderedPost};
pub use query::Visibility;
pub use stats::{BlogStats, MonthlyCount, PostSummary};
pub use toc::TocItem;
