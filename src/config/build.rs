//! `[build]` section configuration.
//!
//! Contains build settings including paths, document extension, minification,
//! highlighting and the generated side files (sitemap, rss, search index).

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in cookbook.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "content/recipes"  # Recipe documents
/// output = "public"            # Output directory
/// extension = "mdx"            # Recipe file extension
/// minify = true                # Minify HTML
/// strict = false               # Fail the build on malformed recipes
///
/// [build.highlight]
/// theme = "base16-ocean.dark"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Recipe source directory, one `<slug>.<extension>` file per recipe.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Recipe file extension, without the dot.
    #[serde(default = "defaults::build::extension")]
    #[educe(Default = defaults::build::extension())]
    pub extension: String,

    /// Minify HTML output (removes whitespace).
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Clear output directory before each build.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// Treat a malformed recipe as a build error instead of skipping it.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub strict: bool,

    /// Code block highlighting.
    #[serde(default)]
    pub highlight: HighlightConfig,

    /// Sitemap generation settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// RSS feed generation settings.
    #[serde(default)]
    pub rss: RssConfig,

    /// Client-side search index settings.
    #[serde(default)]
    pub search: SearchIndexConfig,
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// `[build.highlight]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct HighlightConfig {
    /// Name of a bundled syntect theme
    #[serde(default = "defaults::build::highlight::theme")]
    #[educe(Default = defaults::build::highlight::theme())]
    pub theme: String,
}

/// `[build.sitemap]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path, relative to the output directory.
    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: PathBuf,
}

/// `[build.rss]` section - RSS feed generation configuration.
///
/// Requires `[base].url` so item links can be absolute.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RssConfig {
    #[serde(default = "defaults::r#false")]
    #[educe(Default = defaults::r#false())]
    pub enable: bool,

    /// Output path, relative to the output directory.
    #[serde(default = "defaults::build::rss::path")]
    #[educe(Default = defaults::build::rss::path())]
    pub path: PathBuf,
}

/// `[build.search]` section - JSON index consumed by the search overlay.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SearchIndexConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path, relative to the output directory.
    #[serde(default = "defaults::build::search::path")]
    #[educe(Default = defaults::build::search::path())]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
        "#,
        )
        .unwrap();

        assert_eq!(config.build.content, PathBuf::from("content/recipes"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.extension, "mdx");
        assert!(config.build.minify);
        assert!(!config.build.clean);
        assert!(!config.build.strict);
        assert_eq!(config.build.highlight.theme, "base16-ocean.dark");
        assert!(config.build.sitemap.enable);
        assert_eq!(config.build.sitemap.path, PathBuf::from("sitemap.xml"));
        assert!(!config.build.rss.enable);
        assert_eq!(config.build.rss.path, PathBuf::from("feed.xml"));
        assert!(config.build.search.enable);
        assert_eq!(config.build.search.path, PathBuf::from("search.json"));
    }

    #[test]
    fn test_build_config_custom() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"

            [build]
            content = "recipes"
            output = "dist"
            extension = "md"
            minify = false
            strict = true

            [build.highlight]
            theme = "InspiredGitHub"

            [build.sitemap]
            enable = false

            [build.search]
            path = "data/search.json"
        "#,
        )
        .unwrap();

        assert_eq!(config.build.content, PathBuf::from("recipes"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.build.extension, "md");
        assert!(!config.build.minify);
        assert!(config.build.strict);
        assert_eq!(config.build.highlight.theme, "InspiredGitHub");
        assert!(!config.build.sitemap.enable);
        assert_eq!(config.build.search.path, PathBuf::from("data/search.json"));
    }

    #[test]
    fn test_build_unknown_field_rejection() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [base]
            title = "Test"

            [build.rss]
            enable = true
            format = "atom"
        "#,
        );
        assert!(result.is_err());
    }
}
