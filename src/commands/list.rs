//! List blog content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::Category;
use crate::Blog;

/// List blog content by type
pub fn run(blog: &Blog, content_type: &str, include_private: bool) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = if include_private {
                blog.all_posts()?
            } else {
                blog.published_posts()?
            };
            println!("Posts ({}):", posts.len());
            for post in posts {
                let marker = if post.published { "" } else { " (private)" };
                println!(
                    "  {} - {} ({}) [{}]{}",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.category_label(),
                    post.id,
                    marker
                );
            }
        }
        "category" | "categories" => {
            let categories = blog.categories()?;
            println!("Categories ({}):", categories.len());
            for line in category_lines(&categories) {
                println!("{}", line);
            }
        }
        "tag" | "tags" => {
            let posts = if include_private {
                blog.all_posts()?
            } else {
                blog.published_posts()?
            };
            let mut tags: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category, tag",
                content_type
            );
        }
    }

    Ok(())
}

/// Indented `name (count)` lines for a category tree
fn category_lines(categories: &[Category]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stack: Vec<(&Category, usize)> = categories.iter().rev().map(|c| (c, 1)).collect();
    while let Some((category, depth)) = stack.pop() {
        lines.push(format!(
            "{}{} ({})",
            "  ".repeat(depth),
            category.name,
            category.post_count
        ));
        stack.extend(category.subcategories.iter().rev().map(|c| (c, depth + 1)));
    }
    lines
}
