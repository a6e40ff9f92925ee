//! Generator module - writes the output tree from loaded posts

use anyhow::{anyhow, Context as _, Result};
use glob::Pattern;
use std::fs;
use tera::Context;

use walkdir::WalkDir;

use crate::content::Post;
use crate::helpers::{absolute_url, format_date, url_for};
use crate::templates::{PostCard, PostPage, SiteContext, TemplateRenderer};
use crate::Site;

/// Static site generator using the embedded templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            site: site.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        // Ensure the output directory exists
        fs::create_dir_all(&self.site.output_dir)?;

        // Copy static assets
        self.copy_static_assets()?;

        let site_context = self.build_site_context();
        let cards: Vec<PostCard> = posts.iter().map(|p| self.build_card(p)).collect();

        // Generate individual post pages
        self.generate_post_pages(posts, &site_context)?;

        // Generate the blog index
        self.generate_blog_index(&cards, &site_context)?;

        // Generate the homepage with teaser cards
        self.generate_homepage(&cards, &site_context)?;

        // Generate the Atom feed
        self.generate_atom_feed(posts)?;

        Ok(())
    }

    /// Build site data for templates
    fn build_site_context(&self) -> SiteContext {
        let config = &self.site.config;
        let root = if config.root.ends_with('/') {
            config.root.clone()
        } else {
            format!("{}/", config.root)
        };

        let blog_url = url_for(&config.root, &format!("{}/", config.blog_dir));

        SiteContext {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            url: config.url.clone(),
            root,
            blog_url,
        }
    }

    fn build_card(&self, post: &Post) -> PostCard {
        PostCard {
            title: post.title.clone(),
            date: post.raw_date.clone(),
            date_formatted: format_date(&post.date, &self.site.config.date_format),
            description: post.description.clone(),
            category: post.category.clone(),
            url: post.url.clone(),
        }
    }

    /// Create a base context with common variables
    fn create_base_context(&self, site_context: &SiteContext) -> Context {
        let mut context = Context::new();
        context.insert("site", site_context);
        context
    }

    /// Generate individual post pages
    fn generate_post_pages(&self, posts: &[Post], site_context: &SiteContext) -> Result<()> {
        let blog_dir = self.site.output_dir.join(&self.site.config.blog_dir);

        for post in posts {
            let mut context = self.create_base_context(site_context);
            context.insert(
                "post",
                &PostPage {
                    card: self.build_card(post),
                    content: post.content.clone(),
                },
            );

            let html = self.renderer.render("post.html", &context)?;

            let output_path = if self.site.config.pretty_urls {
                blog_dir.join(&post.slug).join("index.html")
            } else {
                blog_dir.join(format!("{}.html", post.slug))
            };

            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| anyhow!("Failed to create dir {:?}: {}", parent, e))?;
            }
            fs::write(&output_path, &html)
                .map_err(|e| anyhow!("Failed to write {:?}: {}", output_path, e))?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        Ok(())
    }

    /// Generate the blog index page listing all posts
    fn generate_blog_index(&self, cards: &[PostCard], site_context: &SiteContext) -> Result<()> {
        let mut context = self.create_base_context(site_context);
        context.insert("posts", cards);

        let html = self.renderer.render("blog.html", &context)?;

        let output_path = self
            .site
            .output_dir
            .join(&self.site.config.blog_dir)
            .join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::info!("Generated blog index ({} posts)", cards.len());

        Ok(())
    }

    /// Generate the homepage with the newest posts as teaser cards
    fn generate_homepage(&self, cards: &[PostCard], site_context: &SiteContext) -> Result<()> {
        let count = self.site.config.teaser_count.min(cards.len());
        let teaser = &cards[..count];

        let mut context = self.create_base_context(site_context);
        context.insert("teaser_posts", teaser);

        let html = self.renderer.render("home.html", &context)?;

        let output_path = self.site.output_dir.join("index.html");
        fs::write(&output_path, html)?;
        tracing::info!("Generated homepage ({} teasers)", count);

        Ok(())
    }

    /// Generate the Atom feed
    ///
    /// The <updated> stamp is the newest post's date so unchanged inputs
    /// produce byte-identical output.
    fn generate_atom_feed(&self, posts: &[Post]) -> Result<()> {
        if posts.is_empty() {
            tracing::debug!("No posts, skipping atom.xml");
            return Ok(());
        }

        let config = &self.site.config;
        let base_url = config.url.trim_end_matches('/');

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}/atom.xml\" rel=\"self\"/>\n",
            base_url
        ));
        feed.push_str(&format!("  <link href=\"{}/\"/>\n", base_url));
        feed.push_str(&format!(
            "  <updated>{}</updated>\n",
            posts[0].date.format("%Y-%m-%dT00:00:00Z")
        ));
        feed.push_str(&format!("  <id>{}/</id>\n", base_url));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        for post in posts.iter().take(config.feed_limit) {
            let link = absolute_url(base_url, &post.url);
            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", link));
            feed.push_str(&format!("    <id>{}</id>\n", link));
            feed.push_str(&format!(
                "    <published>{}</published>\n",
                post.date.format("%Y-%m-%dT00:00:00Z")
            ));
            feed.push_str(&format!(
                "    <summary>{}</summary>\n",
                escape_xml(&post.description)
            ));
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                strip_invalid_xml_chars(&post.content)
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        let output_path = self.site.output_dir.join("atom.xml");
        fs::write(&output_path, feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }

    /// Copy static assets into the output tree
    ///
    /// Files are selected by the configured include globs and filtered by
    /// the exclude globs, both relative to the static directory.
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            tracing::debug!("No static directory at {:?}", static_dir);
            return Ok(());
        }

        let include = compile_patterns(&self.site.config.assets.include)?;
        let exclude = compile_patterns(&self.site.config.assets.exclude)?;

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            if !include.iter().any(|p| p.matches_path(relative)) {
                continue;
            }
            if exclude.iter().any(|p| p.matches_path(relative)) {
                tracing::debug!("Excluded asset: {:?}", relative);
                continue;
            }

            let dest = self.site.output_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy asset {:?}", path))?;
            tracing::debug!("Copied asset: {:?}", relative);
        }

        Ok(())
    }
}

fn compile_patterns(globs: &[String]) -> Result<Vec<Pattern>> {
    globs
        .iter()
        .map(|g| Pattern::new(g).with_context(|| format!("Invalid glob pattern `{}`", g)))
        .collect()
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
/// XML 1.0 only allows: #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn test_strip_invalid_xml_chars() {
        assert_eq!(strip_invalid_xml_chars("ok\u{0008}text"), "oktext");
        assert_eq!(strip_invalid_xml_chars("tab\tkept"), "tab\tkept");
    }

    #[test]
    fn test_compile_patterns() {
        assert!(compile_patterns(&["**/*".to_string()]).is_ok());
        assert!(compile_patterns(&["[".to_string()]).is_err());
    }
}
