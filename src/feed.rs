//! RSS feed built from post summaries

use crate::config::SiteConfig;
use crate::content::Summary;

/// Maximum number of items in the feed
const FEED_LIMIT: usize = 20;

/// Render an RSS 2.0 document; `summaries` are expected newest first
pub fn rss(config: &SiteConfig, summaries: &[Summary]) -> String {
    let base_url = config.url.trim_end_matches('/');

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#);
    feed.push_str("\n<channel>\n");
    feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
    feed.push_str(&format!("  <link>{}/</link>\n", base_url));
    feed.push_str(&format!(
        "  <description>{}</description>\n",
        escape_xml(&config.description)
    ));
    feed.push_str(&format!(
        "  <atom:link href=\"{}/rss.xml\" rel=\"self\" type=\"application/rss+xml\"/>\n",
        base_url
    ));
    if let Some(latest) = summaries.first() {
        feed.push_str(&format!(
            "  <lastBuildDate>{}</lastBuildDate>\n",
            latest.published_on.to_rfc2822()
        ));
    }

    for summary in summaries.iter().take(FEED_LIMIT) {
        let link = escape_xml(&format!("{}/{}", base_url, summary.slug));
        feed.push_str("  <item>\n");
        feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&summary.title)));
        feed.push_str(&format!("    <link>{}</link>\n", link));
        feed.push_str(&format!("    <guid>{}</guid>\n", link));
        feed.push_str(&format!(
            "    <pubDate>{}</pubDate>\n",
            summary.published_on.to_rfc2822()
        ));
        if let Some(abstract_text) = &summary.abstract_text {
            feed.push_str(&format!(
                "    <description>{}</description>\n",
                escape_xml(abstract_text)
            ));
        }
        feed.push_str("  </item>\n");
    }

    feed.push_str("</channel>\n</rss>\n");
    feed
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::schema::parse_date_string;

    fn summary(slug: &str, title: &str, date: &str) -> Summary {
        Summary {
            slug: slug.to_string(),
            title: title.to_string(),
            published_on: parse_date_string(date).unwrap(),
            abstract_text: Some(format!("About {}", title)),
        }
    }

    #[test]
    fn test_rss_items() {
        let config = SiteConfig {
            url: "https://blog.example.com/".to_string(),
            ..SiteConfig::default()
        };
        let posts = vec![
            summary("second-post", "Second & last", "2023-02-01"),
            summary("hello-world", "Hello", "2023-01-05"),
        ];

        let xml = rss(&config, &posts);
        assert!(xml.contains("<link>https://blog.example.com/second-post</link>"));
        assert!(xml.contains("<title>Second &amp; last</title>"));
        assert!(xml.contains("Feb 2023 00:00:00 +0000</pubDate>"));
        assert!(xml.contains("<lastBuildDate>Wed,"));
        assert!(xml.find("second-post").unwrap() < xml.find("hello-world").unwrap());
    }

    #[test]
    fn test_rss_escapes_links() {
        let posts = vec![summary("salt&pepper", "Seasoning", "2023-03-01")];
        let xml = rss(&SiteConfig::default(), &posts);
        assert!(xml.contains("/salt&amp;pepper</link>"));
        assert!(xml.contains("/salt&amp;pepper</guid>"));
        assert!(!xml.contains("salt&pepper"));
    }

    #[test]
    fn test_rss_limit() {
        let posts: Vec<_> = (0..30)
            .map(|i| summary(&format!("post-{i}"), "T", "2023-01-01"))
            .collect();
        let xml = rss(&SiteConfig::default(), &posts);
        assert_eq!(xml.matches("<item>").count(), FEED_LIMIT);
    }
}
