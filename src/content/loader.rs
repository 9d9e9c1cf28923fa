//! Content loader - collects posts and the category tree from the content directory

use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::defaults::{Field, FrontMatterDefaults};
use super::frontmatter::{parse_date, FrontMatter};
use super::{Category, ContentError, Post};

/// Category assigned to files sitting directly in the content root
pub const DEFAULT_CATEGORY: &str = "unknown";

/// Loads posts and categories from a content root.
///
/// Nothing is cached: every call walks the directory again.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    root: PathBuf,
    defaults: FrontMatterDefaults,
    default_category: String,
    today: NaiveDate,
}

/// Where a post file sits relative to the content root
struct Location {
    category: String,
    subcategory: Option<String>,
    source: String,
}

/// A directory in the index arena
struct DirNode {
    name: String,
    parent: Option<usize>,
    children: Vec<usize>,
    post_count: usize,
}

impl ContentLoader {
    /// Create a loader for the given content root
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            defaults: FrontMatterDefaults::default(),
            default_category: DEFAULT_CATEGORY.to_string(),
            today: Local::now().date_naive(),
        }
    }

    pub fn with_defaults(mut self, defaults: FrontMatterDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_default_category(mut self, category: &str) -> Self {
        self.default_category = category.to_string();
        self
    }

    /// Date used for posts without a `date` field
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    fn walker(&self) -> WalkDir {
        WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
    }

    /// Collect every markdown post below the root, in lexical path order.
    ///
    /// A missing root yields no posts. Unreadable files and malformed
    /// front-matter abort the whole collection.
    pub fn collect_posts(&self) -> Result<Vec<Post>, ContentError> {
        if !self.root.is_dir() {
            tracing::debug!("Content directory {:?} not found", self.root);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        let mut seen: HashMap<String, String> = HashMap::new();

        for entry in self.walker() {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_markdown_file(entry.path()) {
                continue;
            }

            let post = self.load_post(entry.path())?;
            if let Some(first) = seen.insert(post.id.clone(), post.source.clone()) {
                return Err(ContentError::DuplicateId {
                    id: post.id,
                    first,
                    second: post.source,
                });
            }
            posts.push(post);
        }

        tracing::debug!("Collected {} posts from {:?}", posts.len(), self.root);
        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post, ContentError> {
        let content = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        let (fm, body) = FrontMatter::parse(&content).map_err(|e| ContentError::FrontMatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let date = match fm.raw_date() {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| ContentError::InvalidDate {
                path: path.to_path_buf(),
                value: raw.to_string(),
            })?),
            None => None,
        };

        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let location = self.locate(path);
        let defaults = &self.defaults;

        Ok(Post {
            id: Post::make_id(&location.category, location.subcategory.as_deref(), &slug),
            title: defaults.text(Field::Title, fm.title),
            description: defaults.text(Field::Description, fm.description),
            content: body.to_string(),
            date: defaults.date(date, self.today),
            category: location.category,
            subcategory: location.subcategory,
            read_time: defaults.text(Field::ReadTime, fm.read_time),
            tags: defaults.tags(fm.tags),
            slug,
            published: defaults.published(fm.published.as_ref()),
            source: location.source,
        })
    }

    /// Infer category and subcategory from the directories between the
    /// root and the file. Only the first two levels are significant.
    fn locate(&self, path: &Path) -> Location {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            let category = path
                .parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.default_category.clone());
            return Location {
                category,
                subcategory: None,
                source: path.to_string_lossy().into_owned(),
            };
        };

        let segments: Vec<String> = relative
            .parent()
            .map(|dir| {
                dir.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();

        if segments.len() > 2 {
            tracing::debug!(
                "{:?} is nested {} levels deep; filing it under {}/{}",
                relative,
                segments.len(),
                segments[0],
                segments[1]
            );
        }

        let mut segments = segments.into_iter();
        Location {
            category: segments
                .next()
                .unwrap_or_else(|| self.default_category.clone()),
            subcategory: segments.next(),
            source: relative.to_string_lossy().into_owned(),
        }
    }

    /// Build the category tree: one node per directory, to any depth, each
    /// counting the published posts at or below it.
    pub fn build_categories(&self) -> Result<Vec<Category>, ContentError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        // Directories land in the arena in pre-order, so a parent's index
        // is always lower than its children's.
        let mut nodes: Vec<DirNode> = Vec::new();
        let mut index_of: HashMap<PathBuf, usize> = HashMap::new();
        let mut top_level = Vec::new();

        for entry in self.walker() {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path())
                .to_path_buf();
            let parent = relative
                .parent()
                .and_then(|p| index_of.get(p).copied());

            let index = nodes.len();
            nodes.push(DirNode {
                name: entry.file_name().to_string_lossy().into_owned(),
                parent,
                children: Vec::new(),
                post_count: 0,
            });
            match parent {
                Some(p) => nodes[p].children.push(index),
                None => top_level.push(index),
            }
            index_of.insert(relative, index);
        }

        for post in self.collect_posts()?.iter().filter(|p| p.published) {
            let mut cursor = Path::new(&post.source)
                .parent()
                .and_then(|dir| index_of.get(dir).copied());
            while let Some(i) = cursor {
                nodes[i].post_count += 1;
                cursor = nodes[i].parent;
            }
        }

        let mut built: Vec<Option<Category>> = (0..nodes.len()).map(|_| None).collect();
        for i in (0..nodes.len()).rev() {
            let node = &nodes[i];
            let mut category = Category::new(&node.name);
            category.post_count = node.post_count;
            category.subcategories = node
                .children
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[i] = Some(category);
        }

        Ok(top_level
            .into_iter()
            .filter_map(|i| built[i].take())
            .collect())
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn post_md(title: &str, date: &str, published: Option<bool>) -> String {
        let published = published
            .map(|p| format!("published: {}\n", p))
            .unwrap_or_default();
        format!("---\ntitle: {}\ndate: {}\n{}---\n\n# {}\n", title, date, published, title)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_category_inference() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("posts");
        write(&root, "nextjs/basics/intro.md", &post_md("Intro", "2024-01-15", None));
        write(&root, "nextjs/routing.md", &post_md("Routing", "2024-01-10", None));
        write(&root, "about.md", &post_md("About", "2024-01-01", None));

        let posts = ContentLoader::new(&root).collect_posts().unwrap();
        assert_eq!(posts.len(), 3);

        let intro = posts.iter().find(|p| p.slug == "intro").unwrap();
        assert_eq!(intro.category, "nextjs");
        assert_eq!(intro.subcategory.as_deref(), Some("basics"));
        assert_eq!(intro.id, "nextjs/basics/intro");
        assert_eq!(intro.source, Path::new("nextjs/basics/intro.md").to_string_lossy());

        let routing = posts.iter().find(|p| p.slug == "routing").unwrap();
        assert_eq!(routing.category, "nextjs");
        assert_eq!(routing.subcategory, None);

        let about = posts.iter().find(|p| p.slug == "about").unwrap();
        assert_eq!(about.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_defaults_applied() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "misc/bare.md", "no front-matter here\n");

        let posts = ContentLoader::new(temp.path())
            .with_today(today())
            .collect_posts()
            .unwrap();
        let post = &posts[0];
        assert_eq!(post.title, "제목 없음");
        assert_eq!(post.description, "");
        assert_eq!(post.read_time, "5분");
        assert_eq!(post.date, today());
        assert!(post.tags.is_empty());
        assert!(post.published);
        assert_eq!(post.content, "no front-matter here\n");
    }

    #[test]
    fn test_leading_brace_is_plain_body() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "rust/brace.md", "{중괄호로 시작하는 본문\n\n# Heading\n");
        write(temp.path(), "rust/ok.md", &post_md("Ok", "2024-01-01", None));

        let loader = ContentLoader::new(temp.path()).with_today(today());
        let posts = loader.collect_posts().unwrap();
        let brace = posts.iter().find(|p| p.slug == "brace").unwrap();
        assert_eq!(brace.title, "제목 없음");
        assert_eq!(brace.date, today());
        assert!(brace.content.starts_with("{중괄호로"));
        assert_eq!(loader.build_categories().unwrap()[0].post_count, 2);
    }

    #[test]
    fn test_json_front_matter() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "rust/json.md",
            ";;;\n{\"title\": \"Json\", \"date\": \"2024-03-05\", \"tags\": \"one\", \"published\": false}\n;;;\nbody",
        );

        let post = ContentLoader::new(temp.path())
            .load_post(&temp.path().join("rust/json.md"))
            .unwrap();
        assert_eq!(post.title, "Json");
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(post.tags, vec!["one"]);
        assert!(!post.published);
        assert_eq!(post.content, "body");
    }

    #[test]
    fn test_file_outside_root_uses_parent_dir() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "elsewhere/notes/loose.md", &post_md("Loose", "2024-01-01", None));

        let loader = ContentLoader::new(temp.path().join("posts"));
        let post = loader
            .load_post(&temp.path().join("elsewhere/notes/loose.md"))
            .unwrap();
        assert_eq!(post.category, "notes");
        assert_eq!(post.subcategory, None);
        assert_eq!(post.id, "notes/loose");
    }

    #[test]
    fn test_custom_defaults() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "misc/bare.md", "body");

        let defaults = FrontMatterDefaults {
            title: "Untitled".into(),
            description: "-".into(),
            read_time: "1 min".into(),
        };
        let posts = ContentLoader::new(temp.path())
            .with_defaults(defaults)
            .collect_posts()
            .unwrap();
        assert_eq!(posts[0].title, "Untitled");
        assert_eq!(posts[0].description, "-");
        assert_eq!(posts[0].read_time, "1 min");
    }

    #[test]
    fn test_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let loader = ContentLoader::new(temp.path().join("nope"));
        assert!(loader.collect_posts().unwrap().is_empty());
        assert!(loader.build_categories().unwrap().is_empty());
    }

    #[test]
    fn test_non_markdown_files_ignored() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "rust/notes.txt", "not a post");
        write(temp.path(), "rust/image.png", "");
        write(temp.path(), "rust/long.markdown", &post_md("Long", "2024-02-02", None));

        let posts = ContentLoader::new(temp.path()).collect_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "long");
    }

    #[test]
    fn test_invalid_date_is_an_error() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "rust/bad.md", "---\ntitle: Bad\ndate: someday\n---\n");

        let err = ContentLoader::new(temp.path()).collect_posts().unwrap_err();
        assert!(matches!(err, ContentError::InvalidDate { ref value, .. } if value == "someday"));
    }

    #[test]
    fn test_malformed_front_matter_is_an_error() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "rust/bad.md", "---\ntitle: [oops\n---\nbody");

        let err = ContentLoader::new(temp.path()).build_categories().unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_deep_nesting_collapses_and_collisions_are_reported() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a/b/c/deep.md", &post_md("Deep", "2024-01-01", None));

        let posts = ContentLoader::new(temp.path()).collect_posts().unwrap();
        assert_eq!(posts[0].category, "a");
        assert_eq!(posts[0].subcategory.as_deref(), Some("b"));
        assert_eq!(posts[0].id, "a/b/deep");

        write(temp.path(), "a/b/deep.md", &post_md("Shallow", "2024-01-01", None));
        let err = ContentLoader::new(temp.path()).collect_posts().unwrap_err();
        assert!(matches!(err, ContentError::DuplicateId { ref id, .. } if id == "a/b/deep"));
    }

    #[test]
    fn test_ids_unique() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "nextjs/intro.md", "a");
        write(temp.path(), "nextjs/basics/intro.md", "b");
        write(temp.path(), "nextjs/advanced/intro.md", "c");
        write(temp.path(), "react/intro.md", "d");

        let posts = ContentLoader::new(temp.path()).collect_posts().unwrap();
        let mut ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_build_categories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "nextjs/basics/intro.md", &post_md("Intro", "2024-01-15", None));
        write(root, "nextjs/basics/draft.md", &post_md("Draft", "2024-01-16", Some(false)));
        write(root, "nextjs/advanced/cache.md", &post_md("Cache", "2024-01-12", Some(true)));
        write(root, "nextjs/routing.md", &post_md("Routing", "2024-01-10", None));
        write(root, "git/deep/er/rebase.md", &post_md("Rebase", "2024-01-02", None));
        fs::create_dir_all(root.join("css")).unwrap();

        let categories = ContentLoader::new(root).build_categories().unwrap();
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["css", "git", "nextjs"]);

        let css = &categories[0];
        assert_eq!(css.post_count, 0);
        assert!(css.subcategories.is_empty());

        let git = &categories[1];
        assert_eq!(git.post_count, 1);
        assert_eq!(git.subcategories[0].name, "deep");
        assert_eq!(git.subcategories[0].post_count, 1);
        assert_eq!(git.subcategories[0].subcategories[0].name, "er");
        assert_eq!(git.subcategories[0].subcategories[0].post_count, 1);

        let nextjs = &categories[2];
        assert_eq!(nextjs.slug, "nextjs");
        assert_eq!(nextjs.post_count, 3);
        let subs: Vec<_> = nextjs
            .subcategories
            .iter()
            .map(|c| (c.name.as_str(), c.post_count))
            .collect();
        assert_eq!(subs, vec![("advanced", 1), ("basics", 1)]);
    }

    #[test]
    fn test_category_count_matches_published_posts() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "rust/a.md", &post_md("A", "2024-01-01", None));
        write(root, "rust/b.md", &post_md("B", "2024-01-02", Some(false)));
        write(root, "rust/async/c.md", &post_md("C", "2024-01-03", None));
        write(root, "go/d.md", &post_md("D", "2024-01-04", Some(false)));

        let loader = ContentLoader::new(root);
        let posts = loader.collect_posts().unwrap();
        for category in loader.build_categories().unwrap() {
            let expected = posts
                .iter()
                .filter(|p| p.published && p.category == category.name)
                .count();
            assert_eq!(category.post_count, expected, "{}", category.name);
            for sub in &category.subcategories {
                let expected = posts
                    .iter()
                    .filter(|p| p.published && p.in_category(&category.name, Some(&sub.name)))
                    .count();
                assert_eq!(sub.post_count, expected, "{}/{}", category.name, sub.name);
            }
        }
    }
}
