//! Helper functions for presenting posts

mod url;

pub use url::*;
