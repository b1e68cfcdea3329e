//! halko-blog: a small Markdown blog
//!
//! Posts live as Markdown files with a front-matter block. The crate
//! resolves a slug to a post (or reports that it does not exist), lists
//! post summaries newest first, and serves both as HTML pages themed with
//! light/dark design tokens.

pub mod commands;
pub mod config;
pub mod content;
pub mod feed;
pub mod helpers;
pub mod server;
pub mod templates;
pub mod theme;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use content::{ContentStore, FsStore, MarkdownRenderer, PostLister, PostResolver};

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the posts
    pub content_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog instance from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// Filesystem store over the content directory
    pub fn store(&self) -> Arc<dyn ContentStore> {
        Arc::new(FsStore::new(&self.content_dir, &self.config.extensions))
    }

    pub fn resolver(&self) -> PostResolver {
        self.resolver_for(self.store())
    }

    pub fn lister(&self) -> PostLister {
        self.lister_for(self.store())
    }

    /// Resolver over an arbitrary store, using this blog's schema
    pub fn resolver_for(&self, store: Arc<dyn ContentStore>) -> PostResolver {
        PostResolver::new(store, Arc::new(self.config.schema.clone()))
    }

    /// Lister over an arbitrary store, using this blog's schema and policy
    pub fn lister_for(&self, store: Arc<dyn ContentStore>) -> PostLister {
        PostLister::new(
            store,
            Arc::new(self.config.schema.clone()),
            self.config.listing.on_malformed,
        )
    }

    /// Markdown renderer configured from the site config
    pub fn markdown_renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
            self.config.components.clone(),
        )
    }
}
