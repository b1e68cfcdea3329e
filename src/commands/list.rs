//! List posts

use anyhow::Result;
use std::io::Write;

use crate::content::Summary;
use crate::helpers::format_date;
use crate::Blog;

/// Print every post summary, newest first
pub async fn run(blog: &Blog, json: bool) -> Result<()> {
    let summaries = blog.lister().list().await?;
    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &summaries)?;
        writeln!(out)?;
    } else {
        write_table(&mut out, &summaries)?;
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, summaries: &[Summary]) -> Result<()> {
    writeln!(out, "Posts ({}):", summaries.len())?;
    for summary in summaries {
        writeln!(
            out,
            "  {} - {} [{}]",
            format_date(&summary.published_on, "YYYY-MM-DD"),
            summary.title,
            summary.slug
        )?;
    }
    Ok(())
}
