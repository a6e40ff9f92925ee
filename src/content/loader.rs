//! Content loader - loads posts from the source directory

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentError, FrontMatter, MarkdownRenderer, Post};
use crate::config::{FrontmatterPolicy, SiteConfig};
use crate::helpers::url_for;

/// Loads posts from the posts directory
pub struct ContentLoader<'a> {
    config: &'a SiteConfig,
    posts_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(config: &'a SiteConfig, posts_dir: &Path) -> Self {
        Self {
            config,
            posts_dir: posts_dir.to_path_buf(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load all posts, newest first
    ///
    /// Files that fail to parse are skipped with a warning; the rest of
    /// the build continues. A missing posts directory yields an empty
    /// collection.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        if !self.posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path) {
                    Ok(post) => posts.push(post),
                    Err(e) => {
                        tracing::warn!("Skipping {:?}: {}", path, e);
                    }
                }
            }
        }

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;
        let strict = self.config.frontmatter == FrontmatterPolicy::Strict;

        let title = match fm.title.clone() {
            Some(t) => t,
            None if strict => return Err(ContentError::MissingField("title").into()),
            None => "Untitled Post".to_string(),
        };

        let description = match fm.description.clone() {
            Some(d) => d,
            None if strict => return Err(ContentError::MissingField("description").into()),
            None => String::new(),
        };

        let (date, raw_date) = match fm.date.clone() {
            Some(value) => match fm.parse_date() {
                Some(d) => (d, value),
                None if strict => return Err(ContentError::InvalidDate(value).into()),
                // Unparseable dates still sort; display keeps the raw value
                None => (file_date(path)?, value),
            },
            None if strict => return Err(ContentError::MissingField("date").into()),
            None => {
                let d = file_date(path)?;
                (d, d.format("%Y-%m-%d").to_string())
            }
        };

        let category = fm
            .category
            .unwrap_or_else(|| self.config.default_category.clone());

        // Slug comes from the filename, not the title
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let url = if self.config.pretty_urls {
            url_for(
                &self.config.root,
                &format!("{}/{}/", self.config.blog_dir, slug),
            )
        } else {
            url_for(
                &self.config.root,
                &format!("{}/{}.html", self.config.blog_dir, slug),
            )
        };

        let content = self.renderer.render(body);

        Ok(Post {
            title,
            date,
            raw_date,
            description,
            category,
            slug,
            url,
            content,
            source: path.to_path_buf(),
        })
    }
}

/// Date fallback for lenient mode: the file's modification time.
/// Stable across runs, unlike the wall clock.
fn file_date(path: &Path) -> Result<NaiveDate> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(DateTime::<Local>::from(modified).date_naive())
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
