//! Post model

use serde::{Deserialize, Serialize};

/// Sort direction for post listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first (the canonical order)
    #[default]
    Desc,
    /// Oldest first
    Asc,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier, derived from the source file's stem
    pub slug: String,

    /// Display title
    pub title: String,

    /// Origination timestamp as written in front matter (ISO-8601)
    pub date: String,

    /// Human-readable rendering of `date`
    pub formatted_date: String,

    /// Short summary
    pub excerpt: String,

    /// Raw markdown body, metadata stripped
    pub content: String,

    /// Label strings
    pub tags: Vec<String>,

    /// Display name of the author
    pub author: String,

    /// Whether the post is pinned on the home page
    pub featured: bool,

    /// Optional cover image reference
    pub featured_image: Option<String>,
}
