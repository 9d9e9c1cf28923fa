//! Post and Category models

use chrono::NaiveDate;
use serde::Serialize;

use super::toc::TocItem;

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// `category/subcategory/slug`, unique across the content store
    pub id: String,

    pub title: String,

    pub description: String,

    /// Raw markdown body (front-matter stripped)
    pub content: String,

    /// Publication date
    pub date: NaiveDate,

    /// First directory below the content root
    pub category: String,

    /// Second directory below the content root, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    /// Display string such as "5분"
    pub read_time: String,

    pub tags: Vec<String>,

    /// File stem; unique only within (category, subcategory)
    pub slug: String,

    /// Unpublished posts only appear in the `_including_private` queries
    pub published: bool,

    /// Source file path relative to the content root
    #[serde(skip)]
    pub source: String,
}

impl Post {
    /// Build the post id from its location
    pub fn make_id(category: &str, subcategory: Option<&str>, slug: &str) -> String {
        match subcategory {
            Some(sub) => format!("{}/{}/{}", category, sub, slug),
            None => format!("{}/{}", category, slug),
        }
    }

    /// "category / subcategory" badge text
    pub fn category_label(&self) -> String {
        match &self.subcategory {
            Some(sub) => format!("{} / {}", self.category, sub),
            None => self.category.clone(),
        }
    }

    pub fn in_category(&self, category: &str, subcategory: Option<&str>) -> bool {
        self.category == category
            && subcategory.map_or(true, |sub| self.subcategory.as_deref() == Some(sub))
    }
}

/// A directory in the content tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub slug: String,
    /// Published posts in this directory and every directory below it
    pub post_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<Category>,
}

impl Category {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: name.to_string(),
            post_count: 0,
            subcategories: Vec::new(),
        }
    }

    /// Find a top-level category by slug
    pub fn find<'a>(categories: &'a [Category], slug: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.slug == slug)
    }

    pub fn subcategory(&self, slug: &str) -> Option<&Category> {
        Category::find(&self.subcategories, slug)
    }
}

/// A post ready for display: rendered HTML plus its table of contents
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPost {
    #[serde(flatten)]
    pub post: Post,
    pub html: String,
    pub toc: Vec<TocItem>,
}
