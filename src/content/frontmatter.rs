//! Front-matter parsing
//!
//! A stored post is a metadata block followed by the body:
//!
//! ```text
//! ---
//! title: Hello World
//! publishedOn: 2023-01-05
//! ---
//! Body text
//! ```
//!
//! The opening `---` line is optional. The block ends at the first line made
//! of `---` alone; everything after that line is the body, byte for byte.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use super::error::MalformedReason;
use super::schema::{FieldValue, MetadataSchema, ABSTRACT_FIELD, PUBLISHED_ON_FIELD, TITLE_FIELD};

const DELIMITER: &str = "---";

/// Front-matter data from a post, typed against a [`MetadataSchema`]
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FrontMatter {
    /// Declared fields, in schema order
    #[serde(flatten)]
    fields: IndexMap<String, FieldValue>,

    /// Keys the schema does not declare, kept verbatim
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse<'a>(
        content: &'a str,
        schema: &MetadataSchema,
    ) -> Result<(Self, &'a str), MalformedReason> {
        let (block, body) = split(content).ok_or(MalformedReason::MissingDelimiter)?;
        let fm = Self::from_block(block, schema)?;
        Ok((fm, body))
    }

    /// Parse the YAML block alone
    pub fn from_block(block: &str, schema: &MetadataSchema) -> Result<Self, MalformedReason> {
        let value = if block.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str::<Value>(block)
                .map_err(|e| MalformedReason::InvalidYaml(e.to_string()))?
        };

        let mapping = match value {
            Value::Mapping(m) => m,
            Value::Null => Mapping::new(),
            _ => return Err(MalformedReason::NotAMapping),
        };

        let mut raw = IndexMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let key = key.as_str().ok_or(MalformedReason::NotAMapping)?.to_string();
            raw.insert(key, value);
        }

        let mut fields = IndexMap::with_capacity(schema.fields.len());
        for spec in &schema.fields {
            match raw.shift_remove(&spec.name) {
                None | Some(Value::Null) => {
                    if spec.required {
                        return Err(MalformedReason::MissingField(spec.name.clone()));
                    }
                }
                Some(value) => {
                    let typed = spec.kind.convert(&spec.name, &value)?;
                    fields.insert(spec.name.clone(), typed);
                }
            }
        }

        Ok(Self { fields, extra: raw })
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn date(&self, name: &str) -> Option<DateTime<FixedOffset>> {
        match self.fields.get(name) {
            Some(FieldValue::Date(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.text(TITLE_FIELD)
    }

    pub fn published_on(&self) -> Option<DateTime<FixedOffset>> {
        self.date(PUBLISHED_ON_FIELD)
    }

    pub fn abstract_text(&self) -> Option<&str> {
        self.text(ABSTRACT_FIELD)
    }

    /// Declared fields that were present
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Undeclared keys
    pub fn extra(&self) -> &IndexMap<String, Value> {
        &self.extra
    }
}

/// Split raw text into (metadata block, body).
/// Returns `None` when there is no closing delimiter.
pub fn split(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut offset = 0;
    let mut block_start = 0;
    let mut first_line = true;

    for line in raw.split_inclusive('\n') {
        let end = offset + line.len();
        if line.trim_end() == DELIMITER {
            if first_line {
                block_start = end;
            } else {
                return Some((&raw[block_start..offset], &raw[end..]));
            }
        }
        first_line = false;
        offset = end;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::schema::FieldKind;

    fn title_only() -> MetadataSchema {
        MetadataSchema::empty().field("title", FieldKind::String, true)
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
publishedOn: 2024-01-15T10:30:00-0400
abstract: A first post.
tags:
  - rust
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content, &MetadataSchema::default()).unwrap();
        assert_eq!(fm.title(), Some("Hello World"));
        assert_eq!(fm.abstract_text(), Some("A first post."));
        assert_eq!(
            fm.published_on().unwrap().format("%Y-%m-%d").to_string(),
            "2024-01-15"
        );
        assert!(fm.extra().contains_key("tags"));
        assert_eq!(remaining, "\nThis is the content.\n");
    }

    #[test]
    fn test_opening_delimiter_is_optional() {
        let (fm, body) = FrontMatter::parse("title: Hi\n---\nBody text", &title_only()).unwrap();
        assert_eq!(fm.title(), Some("Hi"));
        assert_eq!(fm.fields().count(), 1);
        assert_eq!(body, "Body text");
    }

    #[test]
    fn test_later_separators_stay_in_body() {
        let content = "---\ntitle: Hi\n---\nIntro\n\n---\n\nMore after a rule.\n";
        let (_, body) = FrontMatter::parse(content, &title_only()).unwrap();
        assert_eq!(body, "Intro\n\n---\n\nMore after a rule.\n");
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: Hi\r\n---\r\nBody";
        let (fm, body) = FrontMatter::parse(content, &title_only()).unwrap();
        assert_eq!(fm.title(), Some("Hi"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_missing_closing_delimiter() {
        let err = FrontMatter::parse("---\ntitle: Hi\nBody", &title_only()).unwrap_err();
        assert_eq!(err, MalformedReason::MissingDelimiter);

        let err = FrontMatter::parse("Just body content", &title_only()).unwrap_err();
        assert_eq!(err, MalformedReason::MissingDelimiter);
    }

    #[test]
    fn test_missing_required_field() {
        let content = "---\ntitle: Hi\n---\nBody";
        let err = FrontMatter::parse(content, &MetadataSchema::default()).unwrap_err();
        assert_eq!(err, MalformedReason::MissingField("publishedOn".to_string()));
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let err = FrontMatter::parse("---\ntitle:\n---\nBody", &title_only()).unwrap_err();
        assert_eq!(err, MalformedReason::MissingField("title".to_string()));
    }

    #[test]
    fn test_empty_block_with_empty_schema() {
        let (fm, body) = FrontMatter::parse("---\n---\nBody", &MetadataSchema::empty()).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_invalid_yaml() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let err = FrontMatter::parse(content, &title_only()).unwrap_err();
        assert!(matches!(err, MalformedReason::InvalidYaml(_)));
    }

    #[test]
    fn test_scalar_block_is_not_a_mapping() {
        let err = FrontMatter::parse("---\njust words\n---\nBody", &title_only()).unwrap_err();
        assert_eq!(err, MalformedReason::NotAMapping);
    }
}
