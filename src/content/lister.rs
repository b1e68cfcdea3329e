//! Post lister - summaries of every stored post, newest first

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::{ContentError, Result};
use super::schema::MetadataSchema;
use super::store::ContentStore;
use super::{Post, Summary};

/// What to do with a post whose front-matter is unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Log a warning and leave the post out
    #[default]
    Skip,
    /// Fail the whole listing
    Fail,
}

/// Lists post summaries. Every call re-enumerates storage.
#[derive(Clone)]
pub struct PostLister {
    store: Arc<dyn ContentStore>,
    schema: Arc<MetadataSchema>,
    policy: MalformedPolicy,
}

impl PostLister {
    pub fn new(
        store: Arc<dyn ContentStore>,
        schema: Arc<MetadataSchema>,
        policy: MalformedPolicy,
    ) -> Self {
        Self {
            store,
            schema,
            policy,
        }
    }

    /// Summaries ordered by publication date, newest first.
    /// Posts published at the same instant are ordered by slug.
    pub async fn list(&self) -> Result<Vec<Summary>> {
        let keys = self.store.list_keys().await?;
        let mut summaries = Vec::with_capacity(keys.len());

        for key in keys {
            let summary = match self.store.read_raw(&key).await {
                Ok(Some(raw)) => {
                    Post::parse(&key, &raw, &self.schema).and_then(|post| post.summary())
                }
                Ok(None) => {
                    tracing::debug!("Post {:?} disappeared while listing", key);
                    continue;
                }
                Err(e) => Err(e),
            };

            match summary {
                Ok(summary) => summaries.push(summary),
                Err(e @ ContentError::Malformed { .. }) => match self.policy {
                    MalformedPolicy::Skip => tracing::warn!("Skipping post: {}", e),
                    MalformedPolicy::Fail => return Err(e),
                },
                Err(e) => return Err(e),
            }
        }

        sort_newest_first(&mut summaries);
        tracing::debug!(
            "Listed {} posts from {}",
            summaries.len(),
            self.store.describe()
        );

        Ok(summaries)
    }
}

fn sort_newest_first(summaries: &mut [Summary]) {
    summaries.sort_by(|a, b| {
        b.published_on
            .cmp(&a.published_on)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::store::{FsStore, MemoryStore};

    fn post(title: &str, date: &str) -> String {
        format!("---\ntitle: {}\npublishedOn: {}\nabstract: About {}\n---\nBody of {}\n", title, date, title, title)
    }

    fn lister(store: MemoryStore, policy: MalformedPolicy) -> PostLister {
        PostLister::new(
            Arc::new(store),
            Arc::new(MetadataSchema::default()),
            policy,
        )
    }

    fn slugs(summaries: &[Summary]) -> Vec<&str> {
        summaries.iter().map(|s| s.slug.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = MemoryStore::new()
            .with("hello-world", post("Hello", "2023-01-05"))
            .with("second-post", post("Second", "2023-02-01"));
        let summaries = lister(store, MalformedPolicy::Skip).list().await.unwrap();

        assert_eq!(slugs(&summaries), vec!["second-post", "hello-world"]);
        assert_eq!(summaries[0].title, "Second");
        assert_eq!(summaries[0].abstract_text.as_deref(), Some("About Second"));
        assert!(summaries
            .windows(2)
            .all(|w| w[0].published_on >= w[1].published_on));
    }

    #[tokio::test]
    async fn test_list_ties_break_by_slug() {
        let store = MemoryStore::new()
            .with("zebra", post("Z", "2023-03-01"))
            .with("apple", post("A", "2023-03-01"))
            .with("mango", post("M", "2023-03-01T00:00:00Z"));
        let summaries = lister(store, MalformedPolicy::Skip).list().await.unwrap();
        assert_eq!(slugs(&summaries), vec!["apple", "mango", "zebra"]);
    }

    #[tokio::test]
    async fn test_list_compares_instants_across_offsets() {
        // 09:00-04:00 is 13:00Z, later than 12:00Z
        let store = MemoryStore::new()
            .with("noon-utc", post("Noon", "2023-05-15T12:00:00Z"))
            .with("morning-est", post("Morning", "2023-05-15T09:00:00-0400"));
        let summaries = lister(store, MalformedPolicy::Skip).list().await.unwrap();
        assert_eq!(slugs(&summaries), vec!["morning-est", "noon-utc"]);
    }

    #[tokio::test]
    async fn test_list_skips_malformed_by_default() {
        let store = MemoryStore::new()
            .with("good", post("Good", "2023-01-05"))
            .with("broken", "no front-matter at all");
        let summaries = lister(store, MalformedPolicy::default()).list().await.unwrap();
        assert_eq!(slugs(&summaries), vec!["good"]);
    }

    #[tokio::test]
    async fn test_list_fail_policy() {
        let store = MemoryStore::new()
            .with("good", post("Good", "2023-01-05"))
            .with("broken", "---\ntitle: Broken\n---\n");
        let err = lister(store, MalformedPolicy::Fail).list().await.unwrap_err();
        match err {
            ContentError::Malformed { slug, .. } => assert_eq!(slug, "broken"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_skips_non_utf8_post() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("good.mdx"), post("Good", "2023-01-05")).unwrap();
        std::fs::write(
            dir.path().join("latin1.mdx"),
            b"---\ntitle: Caf\xe9\npublishedOn: 2023-01-06\n---\n",
        )
        .unwrap();
        let exts = vec!["mdx".to_string()];
        let store: Arc<dyn ContentStore> = Arc::new(FsStore::new(dir.path(), &exts));

        let skipping = PostLister::new(
            store.clone(),
            Arc::new(MetadataSchema::default()),
            MalformedPolicy::Skip,
        );
        let summaries = skipping.list().await.unwrap();
        assert_eq!(slugs(&summaries), vec!["good"]);

        let failing = PostLister::new(
            store,
            Arc::new(MetadataSchema::default()),
            MalformedPolicy::Fail,
        );
        match failing.list().await.unwrap_err() {
            ContentError::Malformed { slug, reason } => {
                assert_eq!(slug, "latin1");
                assert_eq!(reason, crate::content::MalformedReason::InvalidUtf8);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let summaries = lister(MemoryStore::new(), MalformedPolicy::Skip)
            .list()
            .await
            .unwrap();
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_parse_policy() {
        let policy: MalformedPolicy = serde_yaml::from_str("fail").unwrap();
        assert_eq!(policy, MalformedPolicy::Fail);
    }
}
