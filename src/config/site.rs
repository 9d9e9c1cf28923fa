//! Blog configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::loader::DEFAULT_CATEGORY;
use crate::content::FrontMatterDefaults;

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,
    pub description: String,

    // URL
    /// Path prefix of post pages, e.g. `/blog`
    pub root: String,

    // Directory
    /// Content directory, relative to the base directory
    pub content_dir: String,

    // Writing
    /// Category for posts placed directly in the content directory
    pub default_category: String,
    #[serde(default)]
    pub front_matter: FrontMatterDefaults,
    #[serde(default)]
    pub highlight: HighlightConfig,
    /// Deepest heading level listed in a table of contents
    pub toc_max_depth: usize,

    // Dashboard
    pub latest_posts: usize,
    /// Months shown in the monthly series
    pub stats_months: u16,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "블로그".to_string(),
            description: String::new(),

            root: "/blog".to_string(),

            content_dir: "posts".to_string(),

            default_category: DEFAULT_CATEGORY.to_string(),
            front_matter: FrontMatterDefaults::default(),
            highlight: HighlightConfig::default(),
            toc_max_depth: 6,

            latest_posts: 5,
            stats_months: 12,

            extra: HashMap::new(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "InspiredGitHub".to_string(),
            line_number: false,
        }
    }
}
