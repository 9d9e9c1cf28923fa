//! Fallback values for missing front-matter fields
//!
//! Every coercion the collector applies is declared here, in one table,
//! instead of being scattered through the loader.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::frontmatter::parse_date;

/// A post field that can be absent from front-matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Date,
    ReadTime,
    Tags,
    Published,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Description,
        Field::Date,
        Field::ReadTime,
        Field::Tags,
        Field::Published,
    ];
}

/// What a missing field turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// A fixed placeholder string
    Text(String),
    /// The date the collection ran
    Today,
    /// An empty list
    Empty,
    /// `true`, unless the front-matter holds the boolean `false`
    TrueUnlessFalse,
}

/// Configurable placeholder strings (`front_matter:` in `_config.yml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatterDefaults {
    pub title: String,
    pub description: String,
    pub read_time: String,
}

impl Default for FrontMatterDefaults {
    fn default() -> Self {
        Self {
            title: "제목 없음".to_string(),
            description: String::new(),
            read_time: "5분".to_string(),
        }
    }
}

impl FrontMatterDefaults {
    /// The fallback rule for a single field
    pub fn rule(&self, field: Field) -> Fallback {
        match field {
            Field::Title => Fallback::Text(self.title.clone()),
            Field::Description => Fallback::Text(self.description.clone()),
            Field::Date => Fallback::Today,
            Field::ReadTime => Fallback::Text(self.read_time.clone()),
            Field::Tags => Fallback::Empty,
            Field::Published => Fallback::TrueUnlessFalse,
        }
    }

    /// The full `field -> fallback` table
    pub fn rules(&self) -> Vec<(Field, Fallback)> {
        Field::ALL.iter().map(|&f| (f, self.rule(f))).collect()
    }

    /// Resolve a text field. Blank values count as missing.
    pub fn text(&self, field: Field, value: Option<String>) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => match self.rule(field) {
                Fallback::Text(placeholder) => placeholder,
                _ => String::new(),
            },
        }
    }

    /// Resolve the date field against the collection date
    pub fn date(&self, value: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
        match (value, self.rule(Field::Date)) {
            (Some(date), _) => date,
            (None, Fallback::Text(raw)) => parse_date(&raw).unwrap_or(today),
            (None, _) => today,
        }
    }

    /// Resolve the tag list. An absent or null `tags` key is missing.
    pub fn tags(&self, value: Option<Vec<String>>) -> Vec<String> {
        match (value, self.rule(Field::Tags)) {
            (Some(tags), _) => tags,
            (None, Fallback::Text(tag)) if !tag.is_empty() => vec![tag],
            (None, _) => Vec::new(),
        }
    }

    /// Resolve visibility from the raw `published` value
    pub fn published(&self, value: Option<&serde_yaml::Value>) -> bool {
        match self.rule(Field::Published) {
            Fallback::TrueUnlessFalse => !matches!(value, Some(serde_yaml::Value::Bool(false))),
            _ => matches!(value, Some(serde_yaml::Value::Bool(true))),
        }
    }
}
