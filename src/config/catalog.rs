//! `[catalog]` section configuration.
//!
//! Editorial curation of the recipe collection: featured recipes, topics,
//! tags hidden from the list filter and organisation members.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[catalog]` section in cookbook.toml.
///
/// # Example
/// ```toml
/// [catalog]
/// featured = ["basic-nextjs-app", "rag-knowledge-base"]
/// hidden_tags = ["intermediate", "advanced"]
/// org_members = ["a-aitken", "robbie-anam"]
/// org_name = "Anam"
///
/// [[catalog.topics]]
/// name = "Agents"
/// slug = "agents"
/// gradient = "linear-gradient(135deg, #D9F2F9 0%, #41BEE0 100%)"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Featured recipe slugs, in display order.
    #[serde(default)]
    pub featured: Vec<String>,

    /// Topics shown on the home page, each one a themed tag view.
    #[serde(default)]
    pub topics: Vec<TopicConfig>,

    /// Tags removed from the list filter options (still shown as badges).
    #[serde(default = "defaults::catalog::hidden_tags")]
    #[educe(Default = defaults::catalog::hidden_tags())]
    pub hidden_tags: Vec<String>,

    /// GitHub handles of organisation members, marked in author bylines.
    #[serde(default)]
    pub org_members: Vec<String>,

    /// Label shown after a member's handle, `(team)` when empty.
    #[serde(default)]
    pub org_name: String,
}

/// One `[[catalog.topics]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopicConfig {
    /// Display name
    pub name: String,
    /// Tag the topic filters by, also its URL segment
    pub slug: String,
    /// CSS background for the topic card
    #[serde(default)]
    pub gradient: String,
}

impl CatalogConfig {
    /// Find a configured topic by slug.
    pub fn topic(&self, slug: &str) -> Option<&TopicConfig> {
        self.topics.iter().find(|t| t.slug == slug)
    }

    /// Byline label for organisation members.
    pub fn org_label(&self) -> &str {
        if self.org_name.is_empty() {
            "team"
        } else {
            &self.org_name
        }
    }

    /// Case-insensitive organisation membership check.
    pub fn is_org_member(&self, handle: &str) -> bool {
        !handle.is_empty()
            && self
                .org_members
                .iter()
                .any(|m| m.eq_ignore_ascii_case(handle))
    }
}
