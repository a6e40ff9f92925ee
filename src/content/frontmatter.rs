//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::post::ContentError;

/// Front-matter data from a post
///
/// Keys outside the recognized set are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from file content.
    /// Returns (front_matter, body).
    ///
    /// The header must open with a `---` line at the top of the file and
    /// close with another; anything else is `MissingFrontmatter`.
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let content = content.trim_start();
        let rest = content
            .strip_prefix("---")
            .ok_or(ContentError::MissingFrontmatter)?;
        let rest = rest.trim_start_matches(['\n', '\r']);

        let end_pos = rest.find("\n---").ok_or(ContentError::MissingFrontmatter)?;
        let yaml_content = &rest[..end_pos];
        let body = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)?;
        Ok((fm, body))
    }

    /// Parse the date string into a calendar date
    pub fn parse_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date string in the formats posts actually use
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
description: First post
category: Rust
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.date, Some("2024-01-15".to_string()));
        assert_eq!(fm.description, Some("First post".to_string()));
        assert_eq!(fm.category, Some("Rust".to_string()));
        assert!(body.starts_with("This is the content."));
    }

    #[test]
    fn test_missing_delimiter() {
        let err = FrontMatter::parse("# Just markdown\n\nNo header here.").unwrap_err();
        assert!(matches!(err, ContentError::MissingFrontmatter));
    }

    #[test]
    fn test_unclosed_delimiter() {
        let err = FrontMatter::parse("---\ntitle: Oops\n\nbody").unwrap_err();
        assert!(matches!(err, ContentError::MissingFrontmatter));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let content = "---\ntitle: T\nlayout: post\ntags: [a, b]\n---\nbody\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("T".to_string()));
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_parse_date() {
        let fm = FrontMatter {
            date: Some("2024-01-15".to_string()),
            ..Default::default()
        };
        let d = fm.parse_date().unwrap();
        assert_eq!(d.format("%Y-%m-%d").to_string(), "2024-01-15");
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date_string("2024/01/15").is_some());
        assert!(parse_date_string("2024-01-15 10:30:00").is_some());
        assert!(parse_date_string("2024-01-15T10:30:00+08:00").is_some());
        assert!(parse_date_string("not a date").is_none());
    }
}
