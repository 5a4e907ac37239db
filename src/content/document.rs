//! Recipe records.
//!
//! These types are exposed to the page templates and serialized into the
//! client search index.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Difficulty marker carried by every recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    /// Only beginner recipes get a visible badge.
    pub const fn has_badge(self) -> bool {
        matches!(self, Self::Beginner)
    }
}

/// SDK a recipe is written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sdk {
    Javascript,
    Python,
    React,
    ReactNative,
}

impl Sdk {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Javascript => "javascript",
            Self::Python => "python",
            Self::React => "react",
            Self::ReactNative => "react-native",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Javascript => "JavaScript",
            Self::Python => "Python",
            Self::React => "React",
            Self::ReactNative => "React Native",
        }
    }
}

/// Validated header block of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frontmatter {
    pub title: String,
    pub description: String,
    /// Authored order, duplicates removed
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    /// `author` and `authors` merged, at least one
    pub authors: Vec<String>,
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk: Option<Sdk>,
}

impl Frontmatter {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// `January 15, 2025`
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    /// `Jan 15, 2025`
    pub fn short_date(&self) -> String {
        self.date.format("%b %-d, %Y").to_string()
    }
}

/// One recipe: slug, header and raw markup body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub slug: String,
    #[serde(flatten)]
    pub meta: Frontmatter,
    pub body: String,
}

/// A [`Document`] without its body, used by listings and search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub slug: String,
    #[serde(flatten)]
    pub meta: Frontmatter,
}

impl Document {
    pub fn into_summary(self) -> RecipeSummary {
        RecipeSummary {
            slug: self.slug,
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> Frontmatter {
        Frontmatter {
            title: "RAG Knowledge Base".into(),
            description: "Ground answers in your docs".into(),
            tags: vec!["rag".into(), "python".into()],
            difficulty: Difficulty::Intermediate,
            authors: vec!["a-aitken".into()],
            date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            sdk: None,
        }
    }

    #[test]
    fn test_display_date() {
        assert_eq!(meta().display_date(), "January 5, 2025");
        assert_eq!(meta().short_date(), "Jan 5, 2025");
    }

    #[test]
    fn test_has_tag_is_exact() {
        let meta = meta();
        assert!(meta.has_tag("rag"));
        assert!(!meta.has_tag("RAG"));
        assert!(!meta.has_tag("ra"));
    }

    #[test]
    fn test_badge_only_for_beginner() {
        assert!(Difficulty::Beginner.has_badge());
        assert!(!Difficulty::Intermediate.has_badge());
        assert!(!Difficulty::Advanced.has_badge());
    }

    #[test]
    fn test_summary_drops_body() {
        let doc = Document {
            slug: "rag-knowledge-base".into(),
            meta: meta(),
            body: "# Hello".into(),
        };
        let expected = RecipeSummary {
            slug: doc.slug.clone(),
            meta: doc.meta.clone(),
        };
        assert_eq!(doc.into_summary(), expected);
    }

    #[test]
    fn test_summary_serializes_flat() {
        let mut meta = meta();
        meta.sdk = Some(Sdk::ReactNative);
        let summary = RecipeSummary {
            slug: "rag-knowledge-base".into(),
            meta,
        };
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["slug"], "rag-knowledge-base");
        assert_eq!(json["title"], "RAG Knowledge Base");
        assert_eq!(json["date"], "2025-01-05");
        assert_eq!(json["difficulty"], "intermediate");
        assert_eq!(json["sdk"], "react-native");
        assert!(json.get("body").is_none());
    }

    #[test]
    fn test_sdk_names() {
        assert_eq!(Sdk::ReactNative.as_str(), "react-native");
        assert_eq!(Sdk::Javascript.label(), "JavaScript");
    }
}
