//! Errors raised while resolving and listing posts

use thiserror::Error;

/// Why a stored post could not be decomposed into frontmatter and body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("file is not valid UTF-8")]
    InvalidUtf8,

    #[error("no closing `---` delimiter after the frontmatter block")]
    MissingDelimiter,

    #[error("frontmatter is not valid YAML: {0}")]
    InvalidYaml(String),

    #[error("frontmatter must be a mapping of field names to values")]
    NotAMapping,

    #[error("required field `{0}` is missing")]
    MissingField(String),

    #[error("field `{field}` should be a {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },

    #[error("field `{field}` has an unrecognised date `{value}`")]
    InvalidDate { field: String, value: String },
}

/// Outcome of a failed resolution or listing
#[derive(Debug, Error)]
pub enum ContentError {
    /// No post exists for the identifier. Expected; maps to a 404.
    #[error("no post found for slug {0:?}")]
    NotFound(String),

    /// The post exists but its frontmatter is unusable
    #[error("malformed post {slug:?}: {reason}")]
    Malformed {
        slug: String,
        reason: MalformedReason,
    },

    #[error("storage error while reading {key:?}: {source}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    pub fn malformed(slug: impl Into<String>, reason: MalformedReason) -> Self {
        Self::Malformed {
            slug: slug.into(),
            reason,
        }
    }

    pub fn storage(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            key: key.into(),
            source,
        }
    }

    /// True when the identifier simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
