//! CLI commands over the content pipeline

use anyhow::Result;

use crate::aggregate::{build_archive, compute_stats, find_related};
use crate::Blog;

/// List site content by type
pub fn list(blog: &Blog, content_type: &str) -> Result<()> {
    let loader = blog.loader();

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_all()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.date, post.title, post.id);
            }
        }
        "id" | "ids" => {
            for id in loader.list_ids()? {
                println!("{}", id);
            }
        }
        "tag" | "tags" => {
            let posts = loader.load_all()?;
            let stats = compute_stats(&posts);
            println!("Tags ({}):", stats.tag_distribution.len());
            let mut tags: Vec<_> = stats.tag_distribution.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, id, tag", content_type);
        }
    }

    Ok(())
}

/// Print corpus statistics, optionally as JSON
pub fn stats(blog: &Blog, json: bool) -> Result<()> {
    let posts = blog.loader().load_all()?;
    let stats = compute_stats(&posts);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Total posts: {}", stats.total_posts);
    println!("Popular tags:");
    for tag in &stats.popular_tags {
        let count = stats.tag_distribution.get(tag).copied().unwrap_or(0);
        println!("  {} ({})", tag, count);
    }

    Ok(())
}

/// Print the year/month archive
pub fn archive(blog: &Blog) -> Result<()> {
    let posts = blog.loader().load_all()?;
    let archive = build_archive(&posts);

    let mut years: Vec<_> = archive.keys().collect();
    years.sort_by(|a, b| b.cmp(a));

    for year in years {
        println!("{}:", year);
        let mut months: Vec<_> = archive[year].keys().collect();
        months.sort_by(|a, b| b.cmp(a));
        for month in months {
            println!("  {}:", month);
            for post in &archive[year][month] {
                println!("    {} - {} [{}]", post.date, post.title, post.id);
            }
        }
    }

    Ok(())
}

/// Show the related-post ranking for one post
pub fn related(blog: &Blog, id: &str) -> Result<()> {
    let loader = blog.loader();
    let posts = loader.load_all()?;
    let current = posts
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| crate::Error::PostNotFound(id.to_string()))?;

    let related = find_related(&current.id, &current.tags, &posts);
    if related.is_empty() {
        println!("No related posts for {}", id);
        return Ok(());
    }

    println!("Related to {}:", id);
    for post in related {
        println!("  {} - {} [{}]", post.date, post.title, post.id);
    }

    Ok(())
}

/// Render one post's body to HTML on stdout
pub fn render(blog: &Blog, id: &str) -> Result<()> {
    let post = blog.loader().render(id)?;
    println!("{}", post.content_html.unwrap_or_default());
    Ok(())
}
