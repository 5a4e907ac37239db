//! Content Store: recipe files on disk.
//!
//! Every call goes back to the filesystem; nothing is cached between calls.

use super::{document::Document, frontmatter::{self, FrontmatterError}};
use crate::{config::SiteConfig, utils::slug::{is_valid_slug, slug_from_path}};
use std::{fs, io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("recipe `{slug}` not found")]
    NotFound { slug: String },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse recipe `{slug}`")]
    Parse {
        slug: String,
        #[source]
        source: FrontmatterError,
    },
}

impl ContentError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Directory of `<slug>.<extension>` recipe files.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    extension: String,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.build.content, &config.build.extension)
    }

    /// Source file for a slug (may not exist).
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{slug}.{}", self.extension))
    }

    /// Slugs of every recipe file, sorted.
    ///
    /// A missing content directory yields an empty list.
    pub fn list_slugs(&self) -> Result<Vec<String>, ContentError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ContentError::Io {
                    path: self.root.clone(),
                    source,
                });
            }
        };

        let mut slugs: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter_map(|path| slug_from_path(&path, &self.extension))
            .collect();
        slugs.sort();
        Ok(slugs)
    }

    /// Read and parse one recipe.
    pub fn load_by_slug(&self, slug: &str) -> Result<Document, ContentError> {
        let not_found = || ContentError::NotFound {
            slug: slug.to_owned(),
        };
        if !is_valid_slug(slug) {
            return Err(not_found());
        }

        let path = self.path_for(slug);
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(not_found()),
            Err(source) => return Err(ContentError::Io { path, source }),
        };

        frontmatter::parse_document(slug, &source).map_err(|source| ContentError::Parse {
            slug: slug.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID: &str = "---\ntitle: RAG Knowledge Base\ndescription: D\ntags: [rag]\ndifficulty: intermediate\nauthor: a\ndate: 2025-02-01\n---\nBody\n";

    fn store_with(files: &[(&str, &str)]) -> (TempDir, ContentStore) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let store = ContentStore::new(dir.path(), "mdx");
        (dir, store)
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path().join("nope"), "mdx");
        assert!(store.list_slugs().unwrap().is_empty());
    }

    #[test]
    fn test_list_slugs_filters_and_sorts() {
        let (dir, store) = store_with(&[
            ("zeta.mdx", VALID),
            ("alpha.mdx", VALID),
            ("notes.md", VALID),
            ("README", "readme"),
        ]);
        fs::create_dir(dir.path().join("folder.mdx")).unwrap();

        assert_eq!(store.list_slugs().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_double_dot_in_name_is_listed() {
        let (_dir, store) = store_with(&[("intro..v2.mdx", VALID), ("plain.mdx", VALID)]);

        assert_eq!(store.list_slugs().unwrap(), vec!["intro..v2", "plain"]);
        assert_eq!(store.load_by_slug("intro..v2").unwrap().slug, "intro..v2");
    }

    #[test]
    fn test_load_by_slug() {
        let (_dir, store) = store_with(&[("rag.mdx", VALID)]);
        let doc = store.load_by_slug("rag").unwrap();

        assert_eq!(doc.slug, "rag");
        assert_eq!(doc.meta.title, "RAG Knowledge Base");
        assert_eq!(doc.body, "Body\n");
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let (_dir, store) = store_with(&[]);
        let err = store.load_by_slug("ghost").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_rejects_path_slugs() {
        let (_dir, store) = store_with(&[]);
        for slug in ["", ".", "..", "../outside", "a/b", "a\\b"] {
            assert!(store.load_by_slug(slug).unwrap_err().is_not_found());
        }
    }

    #[test]
    fn test_load_malformed_is_parse_error() {
        let (_dir, store) = store_with(&[("broken.mdx", "---\ntitle: x\n")]);
        let err = store.load_by_slug("broken").unwrap_err();

        assert!(!err.is_not_found());
        assert!(matches!(
            err,
            ContentError::Parse { ref slug, source: FrontmatterError::MissingDelimiter } if slug == "broken"
        ));
    }

    #[test]
    fn test_path_for() {
        let store = ContentStore::new("content/recipes", "mdx");
        assert_eq!(
            store.path_for("rag"),
            PathBuf::from("content/recipes/rag.mdx")
        );
    }
}
