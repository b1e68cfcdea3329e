//! Built-in blog templates using Tera template engine
//!
//! All templates are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{LinkConfig, SiteConfig};
use crate::content::{Post, Summary};
use crate::helpers::{date_xml, format_date};
use crate::theme::ColorMode;

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("not_found.html", include_str!("blog/not_found.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("blog/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("blog/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Homepage: one summary card per post
    pub fn render_index(&self, site: &SiteData, posts: &[Summary]) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("page_title", &site.title);
        context.insert("page_description", &site.description);
        context.insert("posts", posts);
        self.render("index.html", &context)
    }

    /// A single post with its rendered body
    pub fn render_post(&self, site: &SiteData, post: &PostData) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("page_title", &page_title(&post.title, &site.title));
        context.insert(
            "page_description",
            post.abstract_text.as_deref().unwrap_or(&site.description),
        );
        context.insert("post", post);
        self.render("post.html", &context)
    }

    pub fn render_not_found(&self, site: &SiteData) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("page_title", &page_title("Not Found", &site.title));
        context.insert("page_description", &site.description);
        self.render("not_found.html", &context)
    }
}

/// `<title>` text for a page below the homepage
fn page_title(page: &str, site_title: &str) -> String {
    format!("{} • {}", page, site_title)
}

/// Tera filter: format an RFC 3339 date string
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    match chrono::DateTime::parse_from_rfc3339(&s) {
        Ok(date) => Ok(tera::Value::String(format_date(&date, &format))),
        // Not a timestamp: leave it as written
        Err(_) => Ok(tera::Value::String(s)),
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub url: String,
    pub links: Vec<LinkConfig>,
    pub color_mode: ColorMode,
    /// Theme tokens as inline CSS declarations
    pub theme_style: String,
}

impl SiteData {
    pub fn new(config: &SiteConfig, color_mode: ColorMode) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            url: config.url.clone(),
            links: config.links.clone(),
            color_mode,
            theme_style: color_mode.tokens().css_declarations(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub title: String,
    #[serde(rename = "publishedOn")]
    pub published_on: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    /// Rendered HTML body
    pub content: String,
}

impl PostData {
    pub fn new(post: &Post, content: String) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title().unwrap_or(&post.slug).to_string(),
            published_on: post.frontmatter.published_on().map(|d| date_xml(&d)),
            abstract_text: post.frontmatter.abstract_text().map(str::to_string),
            content,
        }
    }
}
