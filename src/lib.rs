//! foglio: a small personal blog engine
//!
//! Markdown documents with YAML front-matter are loaded, normalized, and
//! served through three read-only views: a searchable home listing, a post
//! detail page with related-post suggestions, and a year/month archive.
//! Every view recomputes from the content store on each read; nothing is
//! cached or persisted between reads.

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod server;
pub mod view;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use content::ContentLoader;

/// The blog application: configuration plus resolved directories
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post documents
    pub posts_dir: PathBuf,
}

impl Blog {
    /// Open a blog rooted at a directory, reading `_config.yml` when present
    pub fn open<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
        })
    }

    /// A fresh loader over the content store
    pub fn loader(&self) -> ContentLoader {
        ContentLoader::new(&self.posts_dir)
    }
}
