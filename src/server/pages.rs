//! Resolve `/blog/{category}/{rest...}` paths into pages

use serde::Serialize;

use crate::content::{Category, ContentError, MarkdownRenderer, Post, RenderedPost};
use crate::helpers::category_path;
use crate::Blog;

/// What a blog path points at
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Page {
    /// A top-level category and its published posts
    Category {
        category: Category,
        url: String,
        posts: Vec<Post>,
    },
    /// A subcategory and its published posts
    Subcategory {
        category: String,
        subcategory: Category,
        url: String,
        posts: Vec<Post>,
    },
    /// A single rendered post
    Post(RenderedPost),
}

/// The page for `/{category}`. Unknown categories resolve to `None`.
pub fn category_page(blog: &Blog, category: &str) -> Result<Option<Page>, ContentError> {
    let categories = blog.categories()?;
    let Some(info) = Category::find(&categories, category) else {
        return Ok(None);
    };

    let posts = blog.posts_by_category(category, None)?;
    Ok(Some(Page::Category {
        category: info.clone(),
        url: category_path(&blog.config, category, None),
        posts,
    }))
}

/// The page for `/{category}/{rest...}`.
///
/// One segment is a post slug, or failing that a subcategory. Two segments
/// are `subcategory/slug`. Anything else does not exist.
pub fn resolve(
    blog: &Blog,
    renderer: &MarkdownRenderer,
    category: &str,
    rest: &[&str],
) -> Result<Option<Page>, ContentError> {
    match rest {
        [slug] => {
            let slug = *slug;
            if let Some(post) = blog.post_by_slug(category, slug, None)? {
                return Ok(Some(Page::Post(blog.render_post(post, renderer))));
            }

            let categories = blog.categories()?;
            let Some(subcategory) = Category::find(&categories, category)
                .and_then(|c| c.subcategory(slug))
            else {
                return Ok(None);
            };

            let posts = blog.posts_by_category(category, Some(slug))?;
            Ok(Some(Page::Subcategory {
                category: category.to_string(),
                subcategory: subcategory.clone(),
                url: category_path(&blog.config, category, Some(slug)),
                posts,
            }))
        }
        [subcategory, slug] => Ok(blog
            .post_by_slug(category, slug, Some(*subcategory))?
            .map(|post| Page::Post(blog.render_post(post, renderer)))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn blog() -> (TempDir, Blog) {
        let temp = TempDir::new().unwrap();
        let posts = temp.path().join("posts");
        write(&posts, "nextjs/basics/intro.md", "---\ntitle: Intro\ndate: 2024-01-15\n---\n## Hi\n");
        write(&posts, "nextjs/routing.md", "---\ntitle: Routing\ndate: 2024-01-10\n---\nbody");
        fs::create_dir_all(posts.join("nextjs/empty")).unwrap();
        let blog = Blog::new(temp.path()).unwrap();
        (temp, blog)
    }

    #[test]
    fn test_category_page() {
        let (_temp, blog) = blog();
        match category_page(&blog, "nextjs").unwrap() {
            Some(Page::Category { category, url, posts }) => {
                assert_eq!(url, "/blog/nextjs");
                assert_eq!(category.post_count, 2);
                assert_eq!(posts.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(category_page(&blog, "rust").unwrap().is_none());
    }

    #[test]
    fn test_single_segment_post_or_subcategory() {
        let (_temp, blog) = blog();
        let renderer = blog.renderer();

        match resolve(&blog, &renderer, "nextjs", &["intro"]).unwrap() {
            Some(Page::Post(rendered)) => {
                assert_eq!(rendered.post.id, "nextjs/basics/intro");
                assert_eq!(rendered.toc[0].id, "hi");
            }
            other => panic!("unexpected {:?}", other),
        }

        match resolve(&blog, &renderer, "nextjs", &["basics"]).unwrap() {
            Some(Page::Subcategory { subcategory, url, posts, .. }) => {
                assert_eq!(url, "/blog/nextjs/basics");
                assert_eq!(subcategory.name, "basics");
                assert_eq!(posts.len(), 1);
            }
            other => panic!("unexpected {:?}", other),
        }

        match resolve(&blog, &renderer, "nextjs", &["empty"]).unwrap() {
            Some(Page::Subcategory { posts, .. }) => assert!(posts.is_empty()),
            other => panic!("unexpected {:?}", other),
        }

        assert!(resolve(&blog, &renderer, "nextjs", &["missing"]).unwrap().is_none());
    }

    #[test]
    fn test_two_segments() {
        let (_temp, blog) = blog();
        let renderer = blog.renderer();

        let page = resolve(&blog, &renderer, "nextjs", &["wrong-guess", "intro"]).unwrap();
        assert!(matches!(page, Some(Page::Post(ref p)) if p.post.slug == "intro"));

        assert!(resolve(&blog, &renderer, "nextjs", &["basics", "nope"]).unwrap().is_none());
        assert!(resolve(&blog, &renderer, "nextjs", &["a", "b", "c"]).unwrap().is_none());
        assert!(resolve(&blog, &renderer, "nextjs", &[]).unwrap().is_none());
    }

    #[test]
    fn test_page_json_is_tagged() {
        let (_temp, blog) = blog();
        let page = category_page(&blog, "nextjs").unwrap().unwrap();
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["kind"], "category");
        assert_eq!(json["category"]["postCount"], 2);
        assert_eq!(json["url"], "/blog/nextjs");
    }
}
