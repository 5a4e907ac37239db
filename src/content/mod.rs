//! Recipe content: typed records, header parsing and the on-disk store.

pub mod document;
pub mod frontmatter;
pub mod store;

pub use document::{Document, Frontmatter, RecipeSummary};
pub use store::{ContentError, ContentStore};
