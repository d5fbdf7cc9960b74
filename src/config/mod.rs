//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::view::Theme;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub author: String,
    pub description: String,
    pub url: String,

    /// Directory of post documents, relative to the base directory
    pub posts_dir: String,

    /// Initial theme for the served views
    pub theme: Theme,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Foglio".to_string(),
            author: String::new(),
            description: String::new(),
            url: "http://localhost:4000".to_string(),
            posts_dir: "posts".to_string(),
            theme: Theme::Light,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
