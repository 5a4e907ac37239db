//! List-view tag filter and topic views.

use super::with_tag;
use crate::{config::TopicConfig, content::RecipeSummary};

/// Recipes shown as cards at the top of a topic page.
pub const TOPIC_CARD_COUNT: usize = 3;

/// Filter options for the list view: every tag except the hidden ones.
pub fn selectable_tags(all_tags: &[String], hidden: &[String]) -> Vec<String> {
    all_tags
        .iter()
        .filter(|tag| !hidden.contains(tag))
        .cloned()
        .collect()
}

/// All recipes when nothing is selected, otherwise those carrying the tag.
pub fn filter_by_tag<'a>(
    recipes: &'a [RecipeSummary],
    selected: Option<&'a str>,
) -> Vec<&'a RecipeSummary> {
    match selected {
        Some(tag) => with_tag(recipes, tag).collect(),
        None => recipes.iter().collect(),
    }
}

/// Recipes of one topic, split into leading cards and the remainder.
#[derive(Debug)]
pub struct TopicView<'a> {
    pub topic: &'a TopicConfig,
    pub cards: Vec<&'a RecipeSummary>,
    pub more: Vec<&'a RecipeSummary>,
}

impl<'a> TopicView<'a> {
    pub fn new(topic: &'a TopicConfig, recipes: &'a [RecipeSummary]) -> Self {
        let mut cards: Vec<_> = with_tag(recipes, &topic.slug).collect();
        let more = cards.split_off(cards.len().min(TOPIC_CARD_COUNT));
        Self { topic, cards, more }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::{Difficulty, Frontmatter};
    use chrono::NaiveDate;

    fn summary(slug: &str, tags: &[&str]) -> RecipeSummary {
        RecipeSummary {
            slug: slug.into(),
            meta: Frontmatter {
                title: slug.into(),
                description: String::new(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                difficulty: Difficulty::Beginner,
                authors: vec!["a".into()],
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                sdk: None,
            },
        }
    }

    fn topic(slug: &str) -> TopicConfig {
        TopicConfig {
            name: slug.to_uppercase(),
            slug: slug.into(),
            gradient: String::new(),
        }
    }

    fn slugs(recipes: &[&RecipeSummary]) -> Vec<String> {
        recipes.iter().map(|r| r.slug.clone()).collect()
    }

    #[test]
    fn test_selectable_tags_hides_difficulty() {
        let all: Vec<String> = ["advanced", "intermediate", "rag", "tools"]
            .map(String::from)
            .to_vec();
        let hidden = vec!["intermediate".to_string(), "advanced".to_string()];
        assert_eq!(selectable_tags(&all, &hidden), vec!["rag", "tools"]);
    }

    #[test]
    fn test_filter_by_tag() {
        let recipes = vec![
            summary("a", &["rag", "advanced"]),
            summary("b", &["tools"]),
            summary("c", &["rag"]),
        ];

        assert_eq!(slugs(&filter_by_tag(&recipes, None)), vec!["a", "b", "c"]);
        assert_eq!(slugs(&filter_by_tag(&recipes, Some("rag"))), vec!["a", "c"]);
        // hidden from the options but still filterable data
        assert_eq!(slugs(&filter_by_tag(&recipes, Some("advanced"))), vec!["a"]);
        assert!(filter_by_tag(&recipes, Some("nope")).is_empty());
    }

    #[test]
    fn test_topic_view_split() {
        let recipes: Vec<_> = (0..5)
            .map(|i| summary(&format!("r{i}"), &["agents"]))
            .chain([summary("other", &["rag"])])
            .collect();
        let topic = topic("agents");
        let view = TopicView::new(&topic, &recipes);

        assert_eq!(slugs(&view.cards), vec!["r0", "r1", "r2"]);
        assert_eq!(slugs(&view.more), vec!["r3", "r4"]);
        assert!(!view.is_empty());
    }

    #[test]
    fn test_topic_view_small_and_empty() {
        let recipes = vec![summary("a", &["rag"])];

        let rag = topic("rag");
        let view = TopicView::new(&rag, &recipes);
        assert_eq!(slugs(&view.cards), vec!["a"]);
        assert!(view.more.is_empty());

        let empty = topic("tools");
        assert!(TopicView::new(&empty, &recipes).is_empty());
    }
}
