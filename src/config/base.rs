//! `[base]` section configuration.
//!
//! Contains basic site information like title, description, public url.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in cookbook.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Anam Cookbook"
/// description = "Recipes for building with Anam avatars"
/// url = "https://anam.ai/cookbook"
/// base_path = "/cookbook"
/// repository = "https://github.com/anam-org/anam-cookbook"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title displayed in browser tab and headers.
    pub title: String,

    /// Site description for SEO meta tags and the rss channel.
    #[serde(default)]
    pub description: String,

    /// Absolute public URL used by sitemap and rss.
    /// Required when `[build.rss].enable = true`.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Path prefix the site is mounted under (e.g. `/cookbook`).
    ///
    /// Prepended to site-absolute links and image sources.
    #[serde(default = "defaults::base::base_path")]
    #[educe(Default = defaults::base::base_path())]
    pub base_path: String,

    /// BCP 47 language code (e.g., "en-US").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Source repository, for "Open in GitHub" / "View markdown" links.
    #[serde(default = "defaults::base::repository")]
    #[educe(Default = defaults::base::repository())]
    pub repository: Option<String>,
}

impl BaseConfig {
    /// `base_path` without trailing slash, always starting with `/` unless empty.
    pub fn path_prefix(&self) -> String {
        let trimmed = self.base_path.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Join a site-relative path onto `base_path`.
    ///
    /// `link("rag")` → `/cookbook/rag/`, `link("")` → `/cookbook/`
    pub fn link(&self, path: &str) -> String {
        let path = path.trim_matches('/');
        let prefix = self.path_prefix();
        if path.is_empty() {
            format!("{prefix}/")
        } else {
            format!("{prefix}/{path}/")
        }
    }

    /// Absolute URL of a site-relative path, when `url` is set.
    ///
    /// `url` already points at the mount, so `base_path` is not added again.
    pub fn absolute_url(&self, path: &str) -> Option<String> {
        let url = self.url.as_deref()?.trim_end_matches('/');
        let path = path.trim_matches('/');
        Some(if path.is_empty() {
            format!("{url}/")
        } else {
            format!("{url}/{path}/")
        })
    }
}
