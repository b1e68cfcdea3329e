//! Metadata schema: which frontmatter fields a post declares and their types

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use super::error::MalformedReason;

/// Field name holding the post title
pub const TITLE_FIELD: &str = "title";
/// Field name holding the publication date
pub const PUBLISHED_ON_FIELD: &str = "publishedOn";
/// Field name holding the short abstract shown on cards and in `<meta>`
pub const ABSTRACT_FIELD: &str = "abstract";

/// Type of a declared frontmatter field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Date,
    Bool,
    List,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Date => "date",
            FieldKind::Bool => "boolean",
            FieldKind::List => "list of strings",
        }
    }

    /// Convert a raw YAML value into the declared type
    pub fn convert(self, field: &str, value: &Value) -> Result<FieldValue, MalformedReason> {
        let invalid = || MalformedReason::InvalidType {
            field: field.to_string(),
            expected: self.expected(),
        };

        match self {
            FieldKind::String => scalar_to_string(value).map(FieldValue::Text).ok_or_else(invalid),
            FieldKind::Date => {
                let raw = value.as_str().ok_or_else(invalid)?;
                parse_date_string(raw)
                    .map(FieldValue::Date)
                    .ok_or_else(|| MalformedReason::InvalidDate {
                        field: field.to_string(),
                        value: raw.to_string(),
                    })
            }
            FieldKind::Bool => value.as_bool().map(FieldValue::Flag).ok_or_else(invalid),
            FieldKind::List => match value {
                Value::Sequence(items) => items
                    .iter()
                    .map(scalar_to_string)
                    .collect::<Option<Vec<_>>>()
                    .map(FieldValue::List)
                    .ok_or_else(invalid),
                other => scalar_to_string(other)
                    .map(|s| FieldValue::List(vec![s]))
                    .ok_or_else(invalid),
            },
        }
    }
}

/// A typed frontmatter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Date(DateTime<FixedOffset>),
    Flag(bool),
    List(Vec<String>),
}

/// One declared field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required,
        }
    }
}

/// The set of fields a post's frontmatter is validated against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataSchema {
    pub fields: Vec<FieldSpec>,
}

impl Default for MetadataSchema {
    fn default() -> Self {
        Self {
            fields: vec![
                FieldSpec::new(TITLE_FIELD, FieldKind::String, true),
                FieldSpec::new(PUBLISHED_ON_FIELD, FieldKind::Date, true),
                FieldSpec::new(ABSTRACT_FIELD, FieldKind::String, false),
            ],
        }
    }
}

impl MetadataSchema {
    /// A schema with no declared fields
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// Builder-style field declaration
    pub fn field(mut self, name: &str, kind: FieldKind, required: bool) -> Self {
        self.fields.retain(|f| f.name != name);
        self.fields.push(FieldSpec::new(name, kind, required));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a date string in the formats authors actually write.
/// Values without an offset are taken as UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let naive_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in naive_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().fixed_offset());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema() {
        let schema = MetadataSchema::default();
        assert!(schema.get(TITLE_FIELD).unwrap().required);
        assert_eq!(schema.get(PUBLISHED_ON_FIELD).unwrap().kind, FieldKind::Date);
        assert!(!schema.get(ABSTRACT_FIELD).unwrap().required);
    }

    #[test]
    fn test_parse_schema_from_yaml() {
        let yaml = r#"
fields:
  - name: title
    type: string
    required: true
  - name: tags
    type: list
"#;
        let schema: MetadataSchema = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.get("tags").unwrap().kind, FieldKind::List);
        assert!(!schema.get("tags").unwrap().required);
    }

    #[test]
    fn test_parse_date_formats() {
        let date_only = parse_date_string("2023-01-05").unwrap();
        assert_eq!(date_only.to_rfc3339(), "2023-01-05T00:00:00+00:00");

        let with_offset = parse_date_string("2023-05-15T11:00:00-0400").unwrap();
        assert_eq!(with_offset.to_rfc3339(), "2023-05-15T11:00:00-04:00");

        let rfc = parse_date_string("2023-05-15T11:00:00+02:00").unwrap();
        assert_eq!(rfc.offset().local_minus_utc(), 2 * 3600);

        let slashed = parse_date_string("2024/01/15 10:30:00").unwrap();
        assert_eq!(slashed.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");

        assert!(parse_date_string("last tuesday").is_none());
    }

    #[test]
    fn test_convert_string_accepts_scalars() {
        let v = FieldKind::String.convert("title", &Value::from(2024)).unwrap();
        assert_eq!(v, FieldValue::Text("2024".to_string()));

        let err = FieldKind::String
            .convert("title", &Value::Sequence(vec![]))
            .unwrap_err();
        assert_eq!(
            err,
            MalformedReason::InvalidType {
                field: "title".to_string(),
                expected: "string"
            }
        );
    }

    #[test]
    fn test_convert_invalid_date() {
        let err = FieldKind::Date
            .convert("publishedOn", &Value::from("soon"))
            .unwrap_err();
        assert_eq!(
            err,
            MalformedReason::InvalidDate {
                field: "publishedOn".to_string(),
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_convert_list_from_single_string() {
        let v = FieldKind::List.convert("tags", &Value::from("rust")).unwrap();
        assert_eq!(v, FieldValue::List(vec!["rust".to_string()]));
    }
}
