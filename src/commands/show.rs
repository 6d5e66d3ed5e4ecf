//! Show a single post

use anyhow::Result;

use crate::content::Render;
use crate::Blog;

/// Print one post by slug, rendered to HTML unless `raw` is set.
///
/// A missing slug is an ordinary outcome, not an error.
pub fn run(blog: &Blog, slug: &str, raw: bool) -> Result<()> {
    let store = blog.store();

    let Some(post) = store.get(slug) else {
        println!("Post not found: {}", slug);
        return Ok(());
    };

    println!("{}", post.title);
    println!("By {} on {}", post.author, post.formatted_date);
    if !post.excerpt.is_empty() {
        println!("{}", post.excerpt);
    }
    if !post.tags.is_empty() {
        println!("Tags: {}", post.tags.join(", "));
    }
    println!();

    if raw {
        println!("{}", post.content);
    } else {
        let renderer = blog.renderer();
        println!("{}", renderer.render(&post.content)?);
    }

    Ok(())
}
