//! markblog: a markdown-backed blog engine
//!
//! Posts live as markdown files under a content directory; the first
//! directory level is the category and the second the subcategory. This
//! crate discovers them, answers listing and lookup queries, renders posts
//! with a table of contents, and serves the results as JSON.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;

use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use content::query::{self, Visibility};
use content::{
    BlogStats, Category, ContentError, ContentLoader, MarkdownRenderer, Post, RenderedPost,
};

/// The blog: configuration plus the location of its content.
///
/// Every query walks the content directory afresh; nothing is cached.
#[derive(Clone)]
pub struct Blog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory
    pub content_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::BlogConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// A loader bound to this blog's content directory
    pub fn loader(&self) -> ContentLoader {
        ContentLoader::new(&self.content_dir)
            .with_defaults(self.config.front_matter.clone())
            .with_default_category(&self.config.default_category)
    }

    /// The category tree
    pub fn categories(&self) -> Result<Vec<Category>, ContentError> {
        self.loader().build_categories()
    }

    /// Every post, unpublished included, newest first
    pub fn all_posts(&self) -> Result<Vec<Post>, ContentError> {
        Ok(query::list(self.loader().collect_posts()?, Visibility::All))
    }

    /// Published posts, newest first
    pub fn published_posts(&self) -> Result<Vec<Post>, ContentError> {
        Ok(query::list(self.loader().collect_posts()?, Visibility::Published))
    }

    /// Published posts in a category (and subcategory)
    pub fn posts_by_category(
        &self,
        category: &str,
        subcategory: Option<&str>,
    ) -> Result<Vec<Post>, ContentError> {
        let posts = self.loader().collect_posts()?;
        Ok(query::by_category(posts, Visibility::Published, category, subcategory))
    }

    /// All posts in a category (and subcategory), for administrative views
    pub fn posts_by_category_including_private(
        &self,
        category: &str,
        subcategory: Option<&str>,
    ) -> Result<Vec<Post>, ContentError> {
        let posts = self.loader().collect_posts()?;
        Ok(query::by_category(posts, Visibility::All, category, subcategory))
    }

    /// A published post by slug; see [`query::by_slug`] for the lookup order
    pub fn post_by_slug(
        &self,
        category: &str,
        slug: &str,
        subcategory: Option<&str>,
    ) -> Result<Option<Post>, ContentError> {
        let posts = self.loader().collect_posts()?;
        Ok(query::by_slug(posts, Visibility::Published, category, slug, subcategory))
    }

    /// Any post by slug, for administrative views
    pub fn post_by_slug_including_private(
        &self,
        category: &str,
        slug: &str,
        subcategory: Option<&str>,
    ) -> Result<Option<Post>, ContentError> {
        let posts = self.loader().collect_posts()?;
        Ok(query::by_slug(posts, Visibility::All, category, slug, subcategory))
    }

    /// A markdown renderer using the configured highlighting
    pub fn renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        )
    }

    /// Render a post's body and build its table of contents
    pub fn render_post(&self, post: Post, renderer: &MarkdownRenderer) -> RenderedPost {
        let html = renderer.render(&post.content);
        let toc = content::toc::extract_toc(&post.content, self.config.toc_max_depth);
        RenderedPost { post, html, toc }
    }

    /// Dashboard statistics as of `today`
    pub fn stats(&self, today: NaiveDate) -> Result<BlogStats, ContentError> {
        let posts = self.all_posts()?;
        let categories = self.categories()?;
        Ok(BlogStats::compute(
            &posts,
            categories.len(),
            today,
            self.config.stats_months,
            self.config.latest_posts,
        ))
    }
}
