//! Built-in page templates using the Tera template engine
//!
//! The default theme is embedded directly in the binary. Pages are
//! produced by binding a typed context record to a template name, never
//! by pattern-matching on HTML markup.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Template renderer with the embedded theme loaded
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Post bodies are already HTML; autoescaping would mangle them
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("base.html", include_str!("basic/base.html")),
            ("home.html", include_str!("basic/home.html")),
            ("blog.html", include_str!("basic/blog.html")),
            ("post.html", include_str!("basic/post.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,
    pub root: String,
    /// Rooted URL of the blog index, e.g. "/blog/"
    pub blog_url: String,
}

/// A post as shown on index and teaser cards
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub title: String,
    /// Raw front-matter date value, for `<time datetime>`
    pub date: String,
    /// Display form, e.g. "January 15, 2024"
    pub date_formatted: String,
    pub description: String,
    pub category: String,
    pub url: String,
}

/// A full post page: the card fields plus the rendered body
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    #[serde(flatten)]
    pub card: PostCard,
    pub content: String,
}
