//! inkpost: markdown content pipeline for a personal blog
//!
//! Reads a directory of markdown files with front-matter metadata into
//! post records, supports lookup by slug, and renders post bodies to
//! HTML with syntax-highlighted code blocks.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::Path;

/// The blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory (one markdown file per post)
    pub content_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Content store over the configured content directory
    pub fn store(&self) -> content::ContentStore {
        content::ContentStore::new(&self.content_dir)
    }

    /// Markdown renderer configured from the site config
    pub fn renderer(&self) -> content::MarkdownRenderer {
        content::MarkdownRenderer::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        )
    }
}
