//! Post model

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Why a source file was rejected during loading
#[derive(Debug, Error)]
pub enum ContentError {
    /// The `---` delimiter pair is absent
    #[error("missing front-matter delimiter")]
    MissingFrontmatter,

    /// The header block between the delimiters is not valid YAML
    #[error("malformed front-matter: {0}")]
    Malformed(#[from] serde_yaml::Error),

    /// A required field is absent (strict mode)
    #[error("missing required front-matter field `{0}`")]
    MissingField(&'static str),

    /// The date value does not parse (strict mode)
    #[error("invalid date `{0}`")]
    InvalidDate(String),
}

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date, used for sorting
    pub date: NaiveDate,

    /// The unmodified front-matter date value, for `<time datetime>`
    pub raw_date: String,

    /// Short summary shown on cards
    pub description: String,

    /// Post category
    pub category: String,

    /// URL-safe name derived from the source filename
    pub slug: String,

    /// Site-rooted URL, e.g. "/blog/hello/"
    pub url: String,

    /// Rendered HTML content
    pub content: String,

    /// Full source file path
    #[serde(skip)]
    pub source: PathBuf,
}
