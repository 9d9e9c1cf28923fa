//! Listing, filtering and lookup over collected posts
//!
//! All functions are pure: they take the collector's output and never touch
//! the filesystem. "Nothing found" is an empty list or `None`.

use super::Post;

/// Which posts a query may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Public views: unpublished posts are hidden
    Published,
    /// Administrative views: everything
    All,
}

impl Visibility {
    pub fn admits(self, post: &Post) -> bool {
        match self {
            Visibility::Published => post.published,
            Visibility::All => true,
        }
    }
}

/// Newest first; posts on the same day are ordered by id
pub fn sort_by_date(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
}

/// Every visible post, newest first
pub fn list(mut posts: Vec<Post>, visibility: Visibility) -> Vec<Post> {
    posts.retain(|p| visibility.admits(p));
    sort_by_date(&mut posts);
    posts
}

/// Visible posts in a category, optionally narrowed to one subcategory.
///
/// An empty subcategory string is treated as no subcategory.
pub fn by_category(
    posts: Vec<Post>,
    visibility: Visibility,
    category: &str,
    subcategory: Option<&str>,
) -> Vec<Post> {
    let subcategory = subcategory.filter(|s| !s.is_empty());
    list(posts, visibility)
        .into_iter()
        .filter(|p| p.in_category(category, subcategory))
        .collect()
}

/// Find a post by slug.
///
/// With a subcategory hint the exact (category, subcategory, slug) match
/// wins; otherwise, or if that fails, any post in the category with that
/// slug is returned. When several subcategories share the slug, the newest
/// post (then lowest id) is picked.
pub fn by_slug(
    posts: Vec<Post>,
    visibility: Visibility,
    category: &str,
    slug: &str,
    subcategory: Option<&str>,
) -> Option<Post> {
    let mut candidates: Vec<Post> = list(posts, visibility)
        .into_iter()
        .filter(|p| p.category == category && p.slug == slug)
        .collect();

    if let Some(sub) = subcategory.filter(|s| !s.is_empty()) {
        if let Some(pos) = candidates
            .iter()
            .position(|p| p.subcategory.as_deref() == Some(sub))
        {
            return Some(candidates.swap_remove(pos));
        }
    }

    if candidates.len() > 1 {
        let ids: Vec<&str> = candidates.iter().map(|p| p.id.as_str()).collect();
        tracing::warn!(
            "Slug {:?} is ambiguous in category {:?} ({}); using {}",
            slug,
            category,
            ids.join(", "),
            ids[0]
        );
    }

    candidates.into_iter().next()
}
