//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::store::is_addressable;
use crate::Blog;

/// Create a new post file and return its path
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }
    if !is_addressable(&slug) {
        anyhow::bail!("Invalid slug {:?}: must be a plain file name", slug);
    }

    fs::create_dir_all(&blog.content_dir)?;

    let ext = blog
        .config
        .extensions
        .first()
        .map(String::as_str)
        .unwrap_or("mdx");
    let file_path = blog.content_dir.join(format!("{}.{}", slug, ext));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    // Quote the title so colons and the like stay valid YAML
    let title_yaml = serde_yaml::to_string(title)?;
    let content = format!(
        "---\ntitle: {}\npublishedOn: {}\nabstract: ''\n---\n",
        title_yaml.trim_end(),
        now.format("%Y-%m-%dT%H:%M:%S%z")
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_new_post_resolves() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());

        let path = create_post(&blog, "Rust: A Love Story", None).unwrap();
        assert!(path.ends_with("content/rust-a-love-story.mdx"));

        let post = blog.resolver().resolve("rust-a-love-story").await.unwrap();
        assert_eq!(post.title(), Some("Rust: A Love Story"));
        assert_eq!(post.body, "");
    }

    #[test]
    fn test_new_post_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());

        create_post(&blog, "Twice", Some("twice")).unwrap();
        assert!(create_post(&blog, "Twice again", Some("twice")).is_err());
    }

    #[test]
    fn test_new_post_rejects_unaddressable_slug() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());

        for slug in ["../escaped", "nested/post", ".hidden"] {
            let err = create_post(&blog, "Oops", Some(slug)).unwrap_err();
            assert!(err.to_string().contains("Invalid slug"), "{slug}");
        }
        assert!(!dir.path().join("escaped.mdx").exists());
        assert!(!blog.content_dir.join("nested").exists());
    }
}
