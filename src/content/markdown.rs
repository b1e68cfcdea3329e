//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Maps a markup element name (`pre`, `h2`, `blockquote`) to the
/// presentation component that renders it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentMap(BTreeMap<String, String>);

impl Default for ComponentMap {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        map.insert("pre".to_string(), "CodeSnippet".to_string());
        Self(map)
    }
}

impl ComponentMap {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, element: &str, component: &str) -> Self {
        self.0.insert(element.to_string(), component.to_string());
        self
    }

    pub fn component(&self, element: &str) -> Option<&str> {
        self.0.get(element).map(String::as_str)
    }

    fn class_for(&self, element: &str) -> Option<String> {
        self.component(element)
            .map(|c| format!("component-{}", html_escape(c)))
    }
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
    components: ComponentMap,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", true, ComponentMap::default())
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool, components: ComponentMap) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
            components,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        // Front-matter is split off before rendering, so no metadata blocks here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            // Info strings may carry extra words: ```rust title="x"
                            lang.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => match self.components.class_for(&level.to_string()) {
                    Some(class) => {
                        let mut all_classes = vec![class];
                        all_classes.extend(classes.iter().map(|c| html_escape(c)));
                        let id_attr = id
                            .map(|id| format!(r#" id="{}""#, html_escape(&id)))
                            .unwrap_or_default();
                        events.push(Event::Html(CowStr::from(format!(
                            r#"<{}{} class="{}">"#,
                            level,
                            id_attr,
                            all_classes.join(" ")
                        ))));
                    }
                    None => events.push(Event::Start(Tag::Heading {
                        level,
                        id,
                        classes,
                        attrs,
                    })),
                },
                Event::Start(Tag::BlockQuote(kind)) => match self.components.class_for("blockquote") {
                    Some(class) => events.push(Event::Html(CowStr::from(format!(
                        "<blockquote class=\"{}\">\n",
                        class
                    )))),
                    None => events.push(Event::Start(Tag::BlockQuote(kind))),
                },
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let block = match theme
            .and_then(|theme| highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok())
        {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                html_escape(lang),
                highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                html_escape(lang),
                html_escape(code)
            ),
        };

        match self.components.class_for("pre") {
            Some(class) => format!(r#"<div class="{}">{}</div>"#, class, block),
            None => block,
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            html_escape(lang),
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block_uses_component() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains(r#"<div class="component-CodeSnippet">"#));
        assert!(html.contains("highlight rust"));
        assert!(html.contains("line-number"));
    }

    #[test]
    fn test_render_code_block_without_components() {
        let renderer =
            MarkdownRenderer::with_options("base16-ocean.dark", false, ComponentMap::empty());
        let html = renderer.render("```\n<b>\n```").unwrap();
        assert!(!html.contains("component-"));
        assert!(html.contains(r#"<pre><code class="language-text">"#));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_heading_and_blockquote_components() {
        let components = ComponentMap::empty()
            .with("h2", "SectionHeading")
            .with("blockquote", "Callout");
        let renderer = MarkdownRenderer::with_options("base16-ocean.dark", false, components);

        let html = renderer
            .render("## Intro {#intro}\n\n> Note this\n\n### Plain")
            .unwrap();
        assert!(html.contains(r#"<h2 id="intro" class="component-SectionHeading">Intro</h2>"#));
        assert!(html.contains(r#"<blockquote class="component-Callout">"#));
        assert!(html.contains("</blockquote>"));
        assert!(html.contains("<h3>Plain</h3>"));
    }

    #[test]
    fn test_parse_component_map() {
        let map: ComponentMap = serde_yaml::from_str("pre: CodeSnippet\nh2: Heading\n").unwrap();
        assert_eq!(map.component("h2"), Some("Heading"));
        assert_eq!(map.component("pre"), Some("CodeSnippet"));
        assert_eq!(map.component("a"), None);
    }
}
