//! Print dashboard statistics and post outlines

use anyhow::Result;
use chrono::Local;

use crate::content::toc::extract_toc;
use crate::helpers::post_path;
use crate::Blog;

/// Print the dashboard numbers
pub fn stats(blog: &Blog) -> Result<()> {
    let stats = blog.stats(Local::now().date_naive())?;

    println!("{}", blog.config.title);
    if !blog.config.description.is_empty() {
        println!("{}", blog.config.description);
    }
    println!();
    println!("Posts:       {}", stats.total_posts);
    println!("Categories:  {}", stats.total_categories);
    println!("This month:  {}", stats.posts_this_month);
    println!();
    println!("Monthly:");
    for month in &stats.monthly {
        println!("  {} {:>3} {}", month.month, month.count, "#".repeat(month.count));
    }
    println!();
    println!("Latest:");
    for post in &stats.latest {
        println!("  {} - {} [{}]", post.date.format("%Y-%m-%d"), post.title, post.id);
    }

    Ok(())
}

/// Print the table of contents of one published post.
///
/// `path` is `slug` or `subcategory/slug`, as in the post URL.
pub fn toc(blog: &Blog, category: &str, path: &[String]) -> Result<()> {
    let (subcategory, slug) = match path {
        [slug] => (None, slug.as_str()),
        [subcategory, slug] => (Some(subcategory.as_str()), slug.as_str()),
        _ => anyhow::bail!("Expected <slug> or <subcategory> <slug>"),
    };

    let Some(post) = blog.post_by_slug(category, slug, subcategory)? else {
        anyhow::bail!("Post not found: {}/{}", category, path.join("/"));
    };

    println!("{} ({})", post.title, post_path(&blog.config, &post));
    for item in extract_toc(&post.content, blog.config.toc_max_depth) {
        println!("{}- {} #{}", "  ".repeat(item.level - 1), item.text, item.id);
    }

    Ok(())
}
