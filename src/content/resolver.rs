//! Post resolver - maps a slug to exactly one post

use std::sync::Arc;

use super::error::{ContentError, Result};
use super::schema::MetadataSchema;
use super::store::ContentStore;
use super::Post;

/// Resolves a single post by slug. Every call re-reads storage.
#[derive(Clone)]
pub struct PostResolver {
    store: Arc<dyn ContentStore>,
    schema: Arc<MetadataSchema>,
}

impl PostResolver {
    pub fn new(store: Arc<dyn ContentStore>, schema: Arc<MetadataSchema>) -> Self {
        Self { store, schema }
    }

    /// Load the post stored under `slug`.
    ///
    /// The slug is matched exactly. Absence is [`ContentError::NotFound`];
    /// a post whose front-matter does not satisfy the schema is
    /// [`ContentError::Malformed`].
    pub async fn resolve(&self, slug: &str) -> Result<Post> {
        if slug.is_empty() {
            return Err(ContentError::NotFound(String::new()));
        }

        let raw = self
            .store
            .read_raw(slug)
            .await?
            .ok_or_else(|| ContentError::NotFound(slug.to_string()))?;

        let post = Post::parse(slug, &raw, &self.schema)?;
        tracing::debug!("Resolved {:?} from {}", slug, self.store.describe());
        Ok(post)
    }
}
