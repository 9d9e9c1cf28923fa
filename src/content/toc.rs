//! Table of contents and heading anchors

use lazy_static::lazy_static;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// One entry in a post's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    /// Anchor id of the heading in the rendered HTML
    pub id: String,
    pub text: String,
    /// 1 for `#`, 6 for `######`
    pub level: usize,
}

/// A heading found in a parsed event stream
#[derive(Debug)]
pub(crate) struct Heading {
    /// Index of the `Start(Heading)` event
    pub index: usize,
    pub level: usize,
    pub explicit_id: Option<String>,
    pub text: String,
}

impl Heading {
    pub fn anchor(&self) -> String {
        self.explicit_id
            .clone()
            .unwrap_or_else(|| anchor_id(&self.text))
    }
}

/// Derive the fragment id for a heading.
///
/// Lowercases, keeps ASCII letters and digits, Hangul syllables and
/// whitespace, then turns each whitespace run into a single `-`.
pub fn anchor_id(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| {
            c.is_ascii_lowercase()
                || c.is_ascii_digit()
                || ('가'..='힣').contains(&c)
                || c.is_whitespace()
        })
        .collect();
    WHITESPACE.replace_all(&kept, "-").into_owned()
}

pub(crate) fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_DEFINITION_LIST
        | Options::ENABLE_GFM
}

/// Locate every heading in an event stream, in document order
pub(crate) fn find_headings(events: &[Event<'_>]) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut current: Option<Heading> = None;

    for (index, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some(Heading {
                    index,
                    level: *level as usize,
                    explicit_id: id.as_ref().map(|id| id.to_string()),
                    text: String::new(),
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(mut heading) = current.take() {
                    heading.text = heading.text.trim().to_string();
                    headings.push(heading);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push_str(text);
                }
            }
            _ => {}
        }
    }

    headings
}

/// Extract the table of contents from a markdown body.
///
/// Only real headings count: `#` lines inside code fences are skipped.
pub fn extract_toc(markdown: &str, max_depth: usize) -> Vec<TocItem> {
    let events: Vec<Event> = Parser::new_ext(markdown, parser_options()).collect();

    find_headings(&events)
        .into_iter()
        .filter(|h| h.level <= max_depth && !h.text.is_empty())
        .map(|h| TocItem {
            id: h.anchor(),
            level: h.level,
            text: h.text,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_id() {
        assert_eq!(anchor_id("Hello World"), "hello-world");
        assert_eq!(anchor_id("Next.js 14의 새로운 기능들"), "nextjs-14의-새로운-기능들");
        assert_eq!(anchor_id("App Router & Server  Components!"), "app-router-server-components");
        assert_eq!(anchor_id("C++ / Rust"), "c-rust");
        assert_eq!(anchor_id("!!!"), "");
    }

    #[test]
    fn test_extract_toc() {
        let md = "# Next.js 14\n\nintro\n\n## App Router\n\ntext\n\n### Server `Components`\n";
        let toc = extract_toc(md, 6);
        assert_eq!(
            toc,
            vec![
                TocItem { id: "nextjs-14".into(), text: "Next.js 14".into(), level: 1 },
                TocItem { id: "app-router".into(), text: "App Router".into(), level: 2 },
                TocItem {
                    id: "server-components".into(),
                    text: "Server Components".into(),
                    level: 3
                },
            ]
        );
    }

    #[test]
    fn test_code_fence_lines_are_not_headings() {
        let md = "## Setup\n\n```bash\n# install deps\nnpm install\n```\n";
        let toc = extract_toc(md, 6);
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].text, "Setup");
    }

    #[test]
    fn test_max_depth_and_empty_headings() {
        let md = "# One\n\n## Two\n\n### Three\n\n##\n";
        let toc = extract_toc(md, 2);
        let texts: Vec<_> = toc.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["One", "Two"]);
    }

    #[test]
    fn test_explicit_heading_id() {
        let toc = extract_toc("## 설치 방법 {#install}\n", 6);
        assert_eq!(toc[0].id, "install");
        assert_eq!(toc[0].text, "설치 방법");
    }
}
