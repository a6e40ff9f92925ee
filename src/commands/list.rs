//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::loader::ContentLoader;
use crate::Site;

/// List loaded posts and category counts
pub fn run(site: &Site) -> Result<()> {
    let loader = ContentLoader::new(&site.config, &site.posts_dir);
    let posts = loader.load_posts()?;

    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!(
            "  {} - {} [{}]",
            post.date.format("%Y-%m-%d"),
            post.title,
            post.category
        );
    }

    let mut categories: HashMap<String, usize> = HashMap::new();
    for post in &posts {
        *categories.entry(post.category.clone()).or_insert(0) += 1;
    }

    let mut categories: Vec<_> = categories.into_iter().collect();
    categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    println!("Categories ({}):", categories.len());
    for (category, count) in categories {
        println!("  {} ({})", category, count);
    }

    Ok(())
}
