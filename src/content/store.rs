//! Storage boundary for posts
//!
//! Posts are addressed by identifier (slug). The filesystem store maps a
//! slug to `<content_dir>/<slug>.<ext>`; the memory store backs tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::{ContentError, MalformedReason, Result};

/// Read-only access to raw post text
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Every identifier currently stored, sorted
    async fn list_keys(&self) -> Result<Vec<String>>;

    /// Raw text for one identifier, or `None` if there is no such item.
    /// Text that is not UTF-8 is [`ContentError::Malformed`].
    async fn read_raw(&self, key: &str) -> Result<Option<String>>;

    /// Human-readable description for logging
    fn describe(&self) -> String;
}

/// Posts stored as files in a single directory
#[derive(Debug, Clone)]
pub struct FsStore {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl FsStore {
    /// Create a store over `dir`, accepting files with any of `extensions`
    /// (earlier extensions win when a slug exists twice)
    pub fn new<P: AsRef<Path>>(dir: P, extensions: &[String]) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slug_for(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?;
        if !self.extensions.iter().any(|e| e == ext) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        is_addressable(stem).then(|| stem.to_string())
    }

    /// File names of the non-directory entries in the content directory
    async fn file_names(&self) -> std::io::Result<BTreeSet<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Content directory {:?} does not exist", self.dir);
                return Ok(BTreeSet::new());
            }
            Err(e) => return Err(e),
        };

        let mut names = BTreeSet::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.insert(name.to_string());
            }
        }
        Ok(names)
    }
}

/// Slugs that cannot escape the content directory or name hidden files
pub(crate) fn is_addressable(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && !key.contains(['/', '\\'])
        && !key.contains("..")
}

#[async_trait]
impl ContentStore for FsStore {
    async fn list_keys(&self) -> Result<Vec<String>> {
        let names = self
            .file_names()
            .await
            .map_err(|e| ContentError::storage(self.dir.display().to_string(), e))?;

        let keys: BTreeSet<String> = names
            .iter()
            .filter_map(|name| self.slug_for(Path::new(name)))
            .collect();
        Ok(keys.into_iter().collect())
    }

    async fn read_raw(&self, key: &str) -> Result<Option<String>> {
        if !is_addressable(key) {
            return Ok(None);
        }

        // Exact, byte-for-byte name match, even where the filesystem folds case
        let names = self
            .file_names()
            .await
            .map_err(|e| ContentError::storage(key, e))?;

        for ext in &self.extensions {
            let name = format!("{}.{}", key, ext);
            if !names.contains(&name) {
                continue;
            }

            let path = self.dir.join(&name);
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(ContentError::storage(key, e)),
            };
            tracing::debug!("Read {:?}", path);

            return String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| ContentError::malformed(key, MalformedReason::InvalidUtf8));
        }

        Ok(None)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }
}

/// In-memory store, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.items.insert(key.into(), raw.into());
    }

    pub fn with(mut self, key: impl Into<String>, raw: impl Into<String>) -> Self {
        self.insert(key, raw);
        self
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_keys(&self) -> Result<Vec<String>> {
        Ok(self.items.keys().cloned().collect())
    }

    async fn read_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn describe(&self) -> String {
        format!("memory ({} items)", self.items.len())
    }
}
