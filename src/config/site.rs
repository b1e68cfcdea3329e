//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::{ComponentMap, MalformedPolicy, MetadataSchema};
use crate::theme::ColorMode;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub url: String,

    // Content
    pub content_dir: String,
    pub extensions: Vec<String>,
    pub schema: MetadataSchema,
    pub listing: ListingConfig,

    // Rendering
    pub highlight: HighlightConfig,
    pub components: ComponentMap,

    // Theme
    pub color_theme_cookie: String,
    pub default_color_mode: ColorMode,

    // Footer
    pub links: Vec<LinkConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Jaayden Halko".to_string(),
            description: "Jaayden Halko's blog".to_string(),
            url: "http://localhost:4000".to_string(),

            content_dir: "content".to_string(),
            extensions: vec!["mdx".to_string(), "md".to_string()],
            schema: MetadataSchema::default(),
            listing: ListingConfig::default(),

            highlight: HighlightConfig::default(),
            components: ComponentMap::default(),

            color_theme_cookie: "color-theme".to_string(),
            default_color_mode: ColorMode::Light,

            links: vec![
                LinkConfig::new("RSS feed", "/rss.xml"),
                LinkConfig::new("Portfolio", "https://jaayden.com/"),
                LinkConfig::new("LinkedIn", "https://www.linkedin.com/in/jaaydenhalko/"),
            ],
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }
}

/// Homepage listing behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub on_malformed: MalformedPolicy,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

/// A footer navigation link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub name: String,
    pub href: String,
}

impl LinkConfig {
    pub fn new(name: &str, href: &str) -> Self {
        Self {
            name: name.to_string(),
            href: href.to_string(),
        }
    }
}
