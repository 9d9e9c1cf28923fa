//! Content discovery errors

use std::path::PathBuf;
use thiserror::Error;

/// Faults raised while walking or parsing the content store.
///
/// Missing content (no root directory, unknown category, unknown slug) is
/// never one of these; it shows up as an empty list or `None`.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid front-matter in {path:?}: {message}")]
    FrontMatter { path: PathBuf, message: String },

    #[error("Invalid date {value:?} in {path:?}")]
    InvalidDate { path: PathBuf, value: String },

    #[error("Duplicate post id {id:?} ({first} and {second})")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
