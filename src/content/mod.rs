//! Content module - resolves, lists and renders posts

pub mod error;
mod frontmatter;
pub mod lister;
mod markdown;
mod post;
pub mod resolver;
pub mod schema;
pub mod store;

pub use error::{ContentError, MalformedReason};
pub use frontmatter::{split, FrontMatter};
pub use lister::{MalformedPolicy, PostLister};
pub use markdown::{ComponentMap, MarkdownRenderer};
pub use post::{Post, Summary};
pub use resolver::PostResolver;
pub use schema::{FieldKind, FieldSpec, FieldValue, MetadataSchema};
pub use store::{ContentStore, FsStore, MemoryStore};
