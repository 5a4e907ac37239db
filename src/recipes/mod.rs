//! Recipe Index: query operations over every recipe in the Content Store.
//!
//! ```text
//! ContentStore ──list_slugs──► load_by_slug (each) ──► IndexReport
//!                                                     ├─ recipes   (date desc, stable)
//!                                                     └─ failures  (slug, error)
//! ```
//!
//! Each top-level call re-reads the store. The slice helpers at the bottom
//! (`collect_tags`, `with_tag`, `select_featured`) answer the same queries
//! over summaries already in memory, so a build can load once. Featured
//! recipes are only ever picked from an already loaded list.

pub mod filter;

use crate::{
    content::{ContentError, ContentStore, Document, RecipeSummary},
    log,
    utils::slug::is_canonical_tag,
};
use anyhow::Chain;
use filter::filter_by_tag;
use std::{collections::BTreeSet, error::Error};

/// Result of loading the whole store.
#[derive(Debug, Default)]
pub struct IndexReport {
    /// Newest first; equal dates keep enumeration order
    pub recipes: Vec<RecipeSummary>,
    /// Recipes that could not be read or parsed
    pub failures: Vec<(String, ContentError)>,
}

impl IndexReport {
    /// `(slug, tag)` pairs whose tag is not lowercase-hyphenated.
    pub fn tag_warnings(&self) -> Vec<(&str, &str)> {
        self.recipes
            .iter()
            .flat_map(|r| {
                r.meta
                    .tags
                    .iter()
                    .filter(|t| !is_canonical_tag(t))
                    .map(|t| (r.slug.as_str(), t.as_str()))
            })
            .collect()
    }

    /// Log every failure and tag warning under `[content]`.
    pub fn log_problems(&self) {
        for (slug, err) in &self.failures {
            log!("content"; "skipped {slug}: {}", error_chain(err));
        }
        for (slug, tag) in self.tag_warnings() {
            log!("content"; "tag `{tag}` in {slug} is not lowercase-hyphenated");
        }
    }
}

/// Read-only query surface over a [`ContentStore`].
#[derive(Debug, Clone)]
pub struct RecipeIndex {
    store: ContentStore,
}

impl RecipeIndex {
    pub const fn new(store: ContentStore) -> Self {
        Self { store }
    }

    /// Load every recipe, keeping failures apart from the summaries.
    ///
    /// Only an unreadable content directory is an error here.
    pub fn load(&self) -> Result<IndexReport, ContentError> {
        let mut report = IndexReport::default();

        for slug in self.store.list_slugs()? {
            match self.store.load_by_slug(&slug) {
                Ok(doc) => report.recipes.push(doc.into_summary()),
                Err(err) => report.failures.push((slug, err)),
            }
        }

        sort_newest_first(&mut report.recipes);
        Ok(report)
    }

    /// Every parsable recipe, newest first. Failures are logged and left out.
    pub fn all(&self) -> Result<Vec<RecipeSummary>, ContentError> {
        let report = self.load()?;
        report.log_problems();
        Ok(report.recipes)
    }

    /// Sorted, deduplicated union of every recipe's tags.
    pub fn all_tags(&self) -> Result<Vec<String>, ContentError> {
        Ok(collect_tags(&self.all()?))
    }

    /// Recipes carrying `tag` (exact, case-sensitive), in index order.
    pub fn by_tag(&self, tag: &str) -> Result<Vec<RecipeSummary>, ContentError> {
        let recipes = self.all()?;
        Ok(filter_by_tag(&recipes, Some(tag)).into_iter().cloned().collect())
    }

    /// Full document, body included.
    ///
    /// A missing recipe is [`ContentError::NotFound`], see
    /// [`ContentError::is_not_found`].
    pub fn by_slug(&self, slug: &str) -> Result<Document, ContentError> {
        self.store.load_by_slug(slug)
    }
}

// ============================================================================
// In-memory Queries
// ============================================================================

/// Stable sort, newest date first.
pub fn sort_newest_first(recipes: &mut [RecipeSummary]) {
    recipes.sort_by(|a, b| b.meta.date.cmp(&a.meta.date));
}

pub fn collect_tags(recipes: &[RecipeSummary]) -> Vec<String> {
    recipes
        .iter()
        .flat_map(|r| r.meta.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn with_tag<'a>(
    recipes: &'a [RecipeSummary],
    tag: &'a str,
) -> impl Iterator<Item = &'a RecipeSummary> + 'a {
    recipes.iter().filter(move |r| r.meta.has_tag(tag))
}

/// Summaries for `slugs` in the given order; unknown slugs are dropped.
pub fn select_featured<'a>(
    recipes: &'a [RecipeSummary],
    slugs: &'a [String],
) -> impl Iterator<Item = &'a RecipeSummary> + 'a {
    slugs
        .iter()
        .filter_map(move |slug| recipes.iter().find(|r| &r.slug == slug))
}

/// `outer: inner: root` rendering of an error and its sources, the same
/// shape anyhow prints for `{:#}`.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    Chain::new(err)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn recipe(title: &str, tags: &str, date: &str) -> String {
        format!(
            "---\ntitle: {title}\ndescription: About {title}\ntags: [{tags}]\ndifficulty: beginner\nauthor: a-aitken\ndate: {date}\n---\n# {title}\n"
        )
    }

    fn index_with(files: &[(&str, String)]) -> (TempDir, RecipeIndex) {
        let dir = TempDir::new().unwrap();
        for (slug, content) in files {
            fs::write(dir.path().join(format!("{slug}.mdx")), content).unwrap();
        }
        let index = RecipeIndex::new(ContentStore::new(dir.path(), "mdx"));
        (dir, index)
    }

    fn slugs(recipes: &[RecipeSummary]) -> Vec<&str> {
        recipes.iter().map(|r| r.slug.as_str()).collect()
    }

    fn sample() -> (TempDir, RecipeIndex) {
        index_with(&[
            ("livekit", recipe("Getting Started with LiveKit", "livekit, javascript", "2025-01-15")),
            ("rag", recipe("RAG Knowledge Base", "rag, python", "2025-03-01")),
            ("tools", recipe("Client Tools", "tools, javascript", "2024-11-20")),
        ])
    }

    #[test]
    fn test_by_slug_round_trips_header() {
        let (_dir, index) = sample();
        let doc = index.by_slug("rag").unwrap();

        assert_eq!(doc.meta.title, "RAG Knowledge Base");
        assert_eq!(doc.meta.tags, vec!["rag", "python"]);
        assert_eq!(doc.meta.date.to_string(), "2025-03-01");
        assert_eq!(doc.body, "# RAG Knowledge Base\n");
    }

    #[test]
    fn test_by_slug_missing() {
        let (_dir, index) = sample();
        assert!(index.by_slug("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_all_sorted_newest_first() {
        let (_dir, index) = sample();
        assert_eq!(slugs(&index.all().unwrap()), vec!["rag", "livekit", "tools"]);
    }

    #[test]
    fn test_all_ties_keep_enumeration_order() {
        let (_dir, index) = index_with(&[
            ("c-third", recipe("C", "x", "2025-01-01")),
            ("a-first", recipe("A", "x", "2025-01-01")),
            ("newer", recipe("N", "x", "2025-06-01")),
            ("b-second", recipe("B", "x", "2025-01-01")),
        ]);
        assert_eq!(
            slugs(&index.all().unwrap()),
            vec!["newer", "a-first", "b-second", "c-third"]
        );
    }

    #[test]
    fn test_all_is_idempotent() {
        let (_dir, index) = sample();
        assert_eq!(index.all().unwrap(), index.all().unwrap());
    }

    #[test]
    fn test_all_tags_sorted_union() {
        let (_dir, index) = sample();
        assert_eq!(
            index.all_tags().unwrap(),
            vec!["javascript", "livekit", "python", "rag", "tools"]
        );
    }

    #[test]
    fn test_by_tag_subsequence() {
        let (_dir, index) = sample();
        assert_eq!(slugs(&index.by_tag("javascript").unwrap()), vec!["livekit", "tools"]);
        assert!(index.by_tag("JavaScript").unwrap().is_empty());
        assert!(index.by_tag("unknown").unwrap().is_empty());
    }

    #[test]
    fn test_featured_keeps_order_and_drops_missing() {
        let (_dir, index) = sample();
        let recipes = index.all().unwrap();
        let wanted = vec!["tools".to_string(), "ghost".to_string(), "rag".to_string()];
        let featured: Vec<_> = select_featured(&recipes, &wanted)
            .map(|r| r.slug.as_str())
            .collect();
        assert_eq!(featured, vec!["tools", "rag"]);
    }

    #[test]
    fn test_failures_are_reported_not_listed() {
        let (_dir, index) = index_with(&[
            ("good", recipe("Good", "rag", "2025-01-01")),
            ("broken", "---\ntitle: [oops\n---\n".into()),
        ]);
        let report = index.load().unwrap();

        assert_eq!(slugs(&report.recipes), vec!["good"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "broken");
        assert_eq!(slugs(&index.all().unwrap()), vec!["good"]);
    }

    #[test]
    fn test_missing_directory_is_empty_index() {
        let dir = TempDir::new().unwrap();
        let index = RecipeIndex::new(ContentStore::new(dir.path().join("missing"), "mdx"));
        assert!(index.all().unwrap().is_empty());
        assert!(index.all_tags().unwrap().is_empty());
    }

    #[test]
    fn test_tag_warnings() {
        let (_dir, index) = index_with(&[
            ("a", recipe("A", "LiveKit, rag, custom_llm", "2025-01-01")),
        ]);
        let report = index.load().unwrap();
        assert_eq!(report.tag_warnings(), vec![("a", "LiveKit"), ("a", "custom_llm")]);
    }

    #[test]
    fn test_error_chain() {
        let (_dir, index) = index_with(&[("broken", "---\ntitle: T\n".into())]);
        let report = index.load().unwrap();
        let chain = error_chain(&report.failures[0].1);
        assert_eq!(
            chain,
            "failed to parse recipe `broken`: header opened with `---` but never closed"
        );
    }
}
