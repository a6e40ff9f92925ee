//! Site configuration (site.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,
    /// Write posts as `blog/{slug}/index.html` instead of `blog/{slug}.html`
    pub pretty_urls: bool,

    // Directory
    pub posts_dir: String,
    pub static_dir: String,
    pub output_dir: String,
    pub blog_dir: String,

    // Writing
    pub frontmatter: FrontmatterPolicy,
    pub default_category: String,

    // Home page
    pub teaser_count: usize,

    // Date display (moment-style format string)
    pub date_format: String,

    // Feed
    pub feed_limit: usize,

    // Static assets
    pub assets: AssetsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Site".to_string(),
            description: String::new(),
            author: String::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            pretty_urls: true,

            posts_dir: "content/posts".to_string(),
            static_dir: "static".to_string(),
            output_dir: "dist".to_string(),
            blog_dir: "blog".to_string(),

            frontmatter: FrontmatterPolicy::Lenient,
            default_category: "Development".to_string(),

            teaser_count: 3,

            date_format: "MMMM D, YYYY".to_string(),

            feed_limit: 20,

            assets: AssetsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// How strictly front-matter is validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontmatterPolicy {
    /// Require title, date, and description; reject unparseable dates
    Strict,
    /// Fill missing fields with defaults
    Lenient,
}

/// Static asset selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Glob patterns (relative to the static directory) to copy
    pub include: Vec<String>,
    /// Glob patterns to skip even when included
    pub exclude: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            include: vec!["**/*".to_string()],
            exclude: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "My Site");
        assert_eq!(config.default_category, "Development");
        assert_eq!(config.teaser_count, 3);
        assert_eq!(config.frontmatter, FrontmatterPolicy::Lenient);
        assert!(config.pretty_urls);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Ryan Carr
author: Ryan Carr
output_dir: public
frontmatter: strict
teaser_count: 5
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Ryan Carr");
        assert_eq!(config.output_dir, "public");
        assert_eq!(config.frontmatter, FrontmatterPolicy::Strict);
        assert_eq!(config.teaser_count, 5);
        // Unspecified keys keep their defaults
        assert_eq!(config.blog_dir, "blog");
    }

    #[test]
    fn test_parse_assets_config() {
        let yaml = r#"
assets:
  include:
    - "*.css"
    - "*.js"
  exclude:
    - "drafts/**"
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.assets.include, vec!["*.css", "*.js"]);
        assert_eq!(config.assets.exclude, vec!["drafts/**"]);
    }
}
