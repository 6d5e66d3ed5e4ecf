//! List blog content

use anyhow::Result;

use crate::content::SortOrder;
use crate::Blog;

/// List blog content by type
pub fn run(blog: &Blog, content_type: &str, order: SortOrder) -> Result<()> {
    let store = blog.store();

    match content_type {
        "post" | "posts" => {
            let posts = store.posts(order);
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.formatted_date, post.title, post.slug);
            }
        }
        "slug" | "slugs" => {
            let slugs = store.slugs();
            println!("Slugs ({}):", slugs.len());
            for slug in slugs {
                println!("  {}", slug);
            }
        }
        "tag" | "tags" => {
            let posts = store.posts(SortOrder::Desc);
            let mut tags: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "featured" => {
            let posts = store.featured(3);
            println!("Featured ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.formatted_date, post.title, post.slug);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, slug, tag, featured",
                content_type
            );
        }
    }

    Ok(())
}
