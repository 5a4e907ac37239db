//! Search/Filter Engine: substring search over in-memory summaries.
//!
//! The query and every candidate field are lowercased; a recipe matches when
//! the query occurs in its title, its description or any of its tags.
//! Results keep index order and stop at [`MAX_RESULTS`].

use crate::content::RecipeSummary;

/// Upper bound on returned matches.
pub const MAX_RESULTS: usize = 8;

/// Matches for `query`, in index order, at most [`MAX_RESULTS`].
///
/// A blank query returns nothing. The query itself is not trimmed, so
/// `"rag "` only matches text containing the trailing space.
pub fn search<'a>(query: &str, recipes: &'a [RecipeSummary]) -> Vec<&'a RecipeSummary> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let mut results = Vec::with_capacity(MAX_RESULTS);
    for recipe in recipes {
        if matches(recipe, &needle) {
            results.push(recipe);
            if results.len() == MAX_RESULTS {
                break;
            }
        }
    }
    results
}

/// `needle` must already be lowercase.
fn matches(recipe: &RecipeSummary, needle: &str) -> bool {
    let meta = &recipe.meta;
    meta.title.to_lowercase().contains(needle)
        || meta.description.to_lowercase().contains(needle)
        || meta.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Frontmatter, document::Difficulty};
    use chrono::NaiveDate;

    fn summary(slug: &str, title: &str, description: &str, tags: &[&str]) -> RecipeSummary {
        RecipeSummary {
            slug: slug.into(),
            meta: Frontmatter {
                title: title.into(),
                description: description.into(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                difficulty: Difficulty::Beginner,
                authors: vec!["a".into()],
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                sdk: None,
            },
        }
    }

    fn corpus() -> Vec<RecipeSummary> {
        vec![
            summary("livekit", "Getting Started with LiveKit", "Rooms and tracks", &["livekit"]),
            summary("rag", "RAG Knowledge Base", "Ground answers in documents", &["rag", "python"]),
        ]
    }

    fn slugs(results: &[&RecipeSummary]) -> Vec<String> {
        results.iter().map(|r| r.slug.clone()).collect()
    }

    #[test]
    fn test_title_match_any_case() {
        let recipes = corpus();
        for query in ["live", "LIVE", "Live"] {
            assert_eq!(slugs(&search(query, &recipes)), vec!["livekit"]);
        }
    }

    #[test]
    fn test_no_match() {
        assert!(search("zzz-no-match", &corpus()).is_empty());
    }

    #[test]
    fn test_description_and_tag_match() {
        let recipes = corpus();
        assert_eq!(slugs(&search("documents", &recipes)), vec!["rag"]);
        assert_eq!(slugs(&search("PYTH", &recipes)), vec!["rag"]);
    }

    #[test]
    fn test_blank_query() {
        let recipes = corpus();
        assert!(search("", &recipes).is_empty());
        assert!(search("   \t", &recipes).is_empty());
    }

    #[test]
    fn test_query_not_trimmed() {
        let recipes = corpus();
        assert!(search(" rag ", &recipes).is_empty());
        assert_eq!(slugs(&search("rag ", &recipes)), vec!["rag"]);
    }

    #[test]
    fn test_capped_at_eight_in_index_order() {
        let recipes: Vec<_> = (0..10)
            .map(|i| summary(&format!("r{i}"), &format!("Agent recipe {i}"), "", &[]))
            .collect();
        let results = search("agent", &recipes);

        assert_eq!(results.len(), MAX_RESULTS);
        assert_eq!(
            slugs(&results),
            (0..8).map(|i| format!("r{i}")).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_order_follows_input() {
        let mut recipes = corpus();
        recipes.reverse();
        assert_eq!(slugs(&search("e", &recipes)), vec!["rag", "livekit"]);
    }
}
