//! Post and Summary models

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::error::{ContentError, MalformedReason, Result};
use super::frontmatter::FrontMatter;
use super::schema::{MetadataSchema, PUBLISHED_ON_FIELD, TITLE_FIELD};

/// A resolved blog post: typed front-matter plus the raw body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Slug (URL-friendly name, from the storage key)
    pub slug: String,

    pub frontmatter: FrontMatter,

    /// Raw markdown content, without the front-matter block
    pub body: String,
}

impl Post {
    /// Decompose raw stored text into a post
    pub fn parse(slug: &str, raw: &str, schema: &MetadataSchema) -> Result<Self> {
        let (frontmatter, body) =
            FrontMatter::parse(raw, schema).map_err(|reason| ContentError::malformed(slug, reason))?;

        Ok(Self {
            slug: slug.to_string(),
            frontmatter,
            body: body.to_string(),
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.frontmatter.title()
    }

    /// Metadata-only projection used on the homepage
    pub fn summary(&self) -> Result<Summary> {
        let title = self.frontmatter.title().ok_or_else(|| {
            ContentError::malformed(&self.slug, MalformedReason::MissingField(TITLE_FIELD.to_string()))
        })?;
        let published_on = self.frontmatter.published_on().ok_or_else(|| {
            ContentError::malformed(
                &self.slug,
                MalformedReason::MissingField(PUBLISHED_ON_FIELD.to_string()),
            )
        })?;

        Ok(Summary {
            slug: self.slug.clone(),
            title: title.to_string(),
            published_on,
            abstract_text: self.frontmatter.abstract_text().map(str::to_string),
        })
    }
}

/// A post without its body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub slug: String,
    pub title: String,
    #[serde(rename = "publishedOn")]
    pub published_on: DateTime<FixedOffset>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
}
