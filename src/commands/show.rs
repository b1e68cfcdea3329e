//! Show a single post

use anyhow::Result;
use clap::ValueEnum;
use std::io::Write;

use crate::content::{ContentError, FieldValue, Post};
use crate::Blog;

/// How `show` prints a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShowFormat {
    /// Front-matter fields followed by the raw body
    #[default]
    Text,
    /// The post as JSON
    Json,
    /// The body rendered to HTML
    Html,
}

/// Resolve `slug` and print it
pub async fn run(blog: &Blog, slug: &str, format: ShowFormat) -> Result<()> {
    let post = match blog.resolver().resolve(slug).await {
        Ok(post) => post,
        Err(ContentError::NotFound(_)) => anyhow::bail!("No post named {:?}", slug),
        Err(e) => return Err(e.into()),
    };

    let mut out = std::io::stdout().lock();
    match format {
        ShowFormat::Text => write_text(&mut out, &post)?,
        ShowFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &post)?;
            writeln!(out)?;
        }
        ShowFormat::Html => {
            let html = blog.markdown_renderer().render(&post.body)?;
            out.write_all(html.as_bytes())?;
        }
    }

    Ok(())
}

fn write_text<W: Write>(out: &mut W, post: &Post) -> Result<()> {
    writeln!(out, "slug: {}", post.slug)?;
    for (name, value) in post.frontmatter.fields() {
        writeln!(out, "{}: {}", name, display_value(value))?;
    }
    for (name, value) in post.frontmatter.extra() {
        let rendered = serde_yaml::to_string(value)?;
        writeln!(out, "{}: {}", name, rendered.trim_end())?;
    }
    writeln!(out, "---")?;
    out.write_all(post.body.as_bytes())?;
    Ok(())
}

fn display_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::Date(d) => d.to_rfc3339(),
        FieldValue::Flag(b) => b.to_string(),
        FieldValue::List(items) => items.join(", "),
    }
}
