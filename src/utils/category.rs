//! File category classification for watch mode.
//!
//! | Category | Rebuild Strategy | Example Files            |
//! |----------|------------------|--------------------------|
//! | Content  | Full rebuild     | `content/recipes/*.mdx`  |
//! | Config   | Reload + rebuild | `cookbook.toml`          |
//! | Unknown  | Ignored          | Files outside watched paths |
//!
//! Every recipe appears on the home page, topic pages, sitemap and search
//! index, so a single changed recipe still rebuilds the whole site.

use crate::config::SiteConfig;
use std::{
    env,
    path::{Path, PathBuf},
};

/// Category of a changed file, used to determine rebuild strategy in watch mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    /// Recipe document inside the content directory
    Content,
    /// Site configuration (cookbook.toml)
    Config,
    /// Anything else
    Unknown,
}

impl FileCategory {
    /// Get the short name for this category (used in logs)
    pub const fn name(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Config => "config",
            Self::Unknown => "unknown",
        }
    }

    /// Path watched for this category.
    pub fn path(self, config: &SiteConfig) -> Option<PathBuf> {
        match self {
            Self::Content => Some(config.build.content.clone()),
            Self::Config => Some(config.config_path.clone()),
            Self::Unknown => None,
        }
    }

    /// Returns true if this category represents a directory (vs a single file)
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Content)
    }
}

/// Categorize a file path to determine how changes should be handled.
///
/// Only files with the recipe extension count as content; editor swap files
/// and images next to the recipes are `Unknown`.
pub fn categorize_path(path: &Path, config: &SiteConfig) -> FileCategory {
    let path = normalize_path(path);

    if path == config.config_path {
        FileCategory::Config
    } else if path.starts_with(&config.build.content)
        && path
            .extension()
            .is_some_and(|ext| ext == config.build.extension.as_str())
    {
        FileCategory::Content
    } else {
        FileCategory::Unknown
    }
}

/// Normalize a path to absolute form for reliable comparison.
///
/// Config paths are already canonicalized, so incoming watcher paths are
/// canonicalized too. Removed files fall back to joining with the cwd.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> SiteConfig {
        let root = dir.canonicalize().unwrap();
        let content = root.join("content/recipes");
        fs::create_dir_all(&content).unwrap();

        let mut config = SiteConfig::default();
        config.config_path = root.join("cookbook.toml");
        config.build.content = content;
        config
    }

    #[test]
    fn test_category_name() {
        assert_eq!(FileCategory::Content.name(), "content");
        assert_eq!(FileCategory::Config.name(), "config");
        assert_eq!(FileCategory::Unknown.name(), "unknown");
    }

    #[test]
    fn test_is_directory() {
        assert!(FileCategory::Content.is_directory());
        assert!(!FileCategory::Config.is_directory());
        assert!(!FileCategory::Unknown.is_directory());
    }

    #[test]
    fn test_categorize_path() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());

        let recipe = config.build.content.join("rag.mdx");
        fs::write(&recipe, "---\n---\n").unwrap();
        fs::write(&config.config_path, "").unwrap();

        assert_eq!(categorize_path(&recipe, &config), FileCategory::Content);
        assert_eq!(
            categorize_path(&config.config_path, &config),
            FileCategory::Config
        );
        assert_eq!(
            categorize_path(&config.build.content.join("diagram.png"), &config),
            FileCategory::Unknown
        );
        assert_eq!(
            categorize_path(&dir.path().join("README.mdx"), &config),
            FileCategory::Unknown
        );
    }

    #[test]
    fn test_categorize_removed_recipe() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());

        let gone = config.build.content.join("deleted.mdx");
        assert_eq!(categorize_path(&gone, &config), FileCategory::Content);
    }

    #[test]
    fn test_paths() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());

        assert_eq!(
            FileCategory::Content.path(&config),
            Some(config.build.content.clone())
        );
        assert_eq!(FileCategory::Unknown.path(&config), None);
    }

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/path/file.mdx"));
        assert!(normalized.is_absolute());
    }
}
