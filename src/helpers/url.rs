//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::BlogConfig;
use crate::content::Post;

/// Everything except RFC 3986 unreserved characters
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "nextjs/") // -> "/blog/nextjs/"
/// ```
pub fn url_for(config: &BlogConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Percent-encode a single path segment (category names are often Korean)
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

fn join_segments<'a>(config: &BlogConfig, segments: impl IntoIterator<Item = &'a str>) -> String {
    let path = segments
        .into_iter()
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/");
    url_for(config, &path)
}

/// `{root}/{category}[/{subcategory}]`
pub fn category_path(config: &BlogConfig, category: &str, subcategory: Option<&str>) -> String {
    join_segments(config, std::iter::once(category).chain(subcategory))
}

/// `{root}/{category}[/{subcategory}]/{slug}`
pub fn post_path(config: &BlogConfig, post: &Post) -> String {
    join_segments(
        config,
        std::iter::once(post.category.as_str())
            .chain(post.subcategory.as_deref())
            .chain(std::iter::once(post.slug.as_str())),
    )
}
