//! Page templates.
//!
//! | Page        | Output path               | Contents                              |
//! |-------------|---------------------------|---------------------------------------|
//! | home        | `index.html`              | topics, featured cards, filterable list |
//! | recipe      | `<slug>/index.html`       | header, bylines, source links, body   |
//! | topic       | `topic/<slug>/index.html` | first cards, "More cookbooks" list    |
//! | not found   | `404.html`                | link back home                        |
//!
//! Every interpolated value goes through `escape_html`.

use super::{MarkdownRenderer, SCRIPT_PATH, STYLESHEET_PATH};
use crate::{
    config::{SiteConfig, TopicConfig},
    content::{Document, Frontmatter, RecipeSummary},
    highlight::Highlighter,
    recipes::filter::TopicView,
    utils::escape::escape_html,
};
use std::fmt::Write;

/// Tags shown on a card or list row before collapsing into `+N`.
const VISIBLE_TAG_COUNT: usize = 3;

pub struct PageRenderer<'a> {
    config: &'a SiteConfig,
    markdown: MarkdownRenderer<'a>,
}

impl<'a> PageRenderer<'a> {
    pub fn new(config: &'a SiteConfig, highlighter: &'a Highlighter) -> Self {
        Self {
            config,
            markdown: MarkdownRenderer::new(highlighter, config.base.path_prefix()),
        }
    }

    /// Home page: topics, featured selection, then every recipe with the
    /// tag filter options.
    pub fn home(
        &self,
        recipes: &[RecipeSummary],
        featured: &[&RecipeSummary],
        filter_tags: &[String],
    ) -> String {
        let mut main = String::new();

        let topics = &self.config.catalog.topics;
        if !topics.is_empty() {
            main.push_str("<section class=\"topics\">\n<h2>Topics</h2>\n<div class=\"topic-grid\">\n");
            for topic in topics {
                main.push_str(&self.topic_card(topic));
            }
            main.push_str("</div>\n</section>\n");
        }

        if !featured.is_empty() {
            main.push_str("<section class=\"featured\">\n<h2>Featured Cookbooks</h2>\n<div class=\"card-grid\">\n");
            for recipe in featured {
                main.push_str(&self.card(recipe));
            }
            main.push_str("</div>\n</section>\n");
        }

        main.push_str("<section class=\"all-recipes\">\n<div class=\"section-head\">\n");
        let _ = writeln!(
            main,
            "<h2>All <span class=\"count\" id=\"recipe-count\">{}</span></h2>",
            recipes.len()
        );
        if !filter_tags.is_empty() {
            main.push_str("<div class=\"tag-filter\" id=\"tag-filter\">\n");
            for tag in filter_tags {
                let tag = escape_html(tag);
                let _ = writeln!(
                    main,
                    "<button type=\"button\" data-filter-tag=\"{tag}\">{tag}</button>"
                );
            }
            main.push_str("</div>\n");
        }
        main.push_str("</div>\n<ul class=\"recipe-list\" id=\"recipe-list\">\n");
        for recipe in recipes {
            main.push_str(&self.list_item(recipe));
        }
        main.push_str("</ul>\n");
        let _ = writeln!(
            main,
            "<p class=\"empty\" id=\"recipe-empty\"{}>No recipes found.</p>",
            if recipes.is_empty() { "" } else { " hidden" }
        );
        main.push_str("</section>\n");

        self.layout(&self.config.base.title, &self.config.base.description, &main)
    }

    /// Recipe detail page.
    pub fn recipe(&self, doc: &Document) -> String {
        let meta = &doc.meta;
        let mut main = String::from("<article class=\"recipe\">\n<header class=\"recipe-header\">\n");

        let _ = writeln!(
            main,
            "<p class=\"recipe-date\"><time datetime=\"{}\">{}</time></p>",
            meta.date,
            meta.display_date()
        );
        let _ = writeln!(main, "<h1>{}</h1>", escape_html(&meta.title));
        if !meta.description.is_empty() {
            let _ = writeln!(
                main,
                "<p class=\"recipe-description\">{}</p>",
                escape_html(&meta.description)
            );
        }

        main.push_str("<div class=\"recipe-meta\">\n");
        main.push_str(&self.bylines(meta));
        main.push_str(&self.badges(meta));
        main.push_str(&self.source_links(doc));
        main.push_str("</div>\n");

        if !meta.tags.is_empty() {
            main.push_str("<ul class=\"tags\">");
            for tag in &meta.tags {
                let _ = write!(main, "<li>{}</li>", self.tag_badge(tag));
            }
            main.push_str("</ul>\n");
        }

        main.push_str("</header>\n<div class=\"prose\">\n");
        main.push_str(&self.markdown.render(&doc.body));
        main.push_str("</div>\n</article>\n");

        let title = format!("{} | {}", meta.title, self.config.base.title);
        self.layout(&title, &meta.description, &main)
    }

    /// Topic page.
    pub fn topic(&self, view: &TopicView) -> String {
        let topic = view.topic;
        let mut main = String::new();

        let _ = writeln!(
            main,
            "<div class=\"topic-hero\" style=\"background: {}\"><h1>{}</h1></div>",
            escape_html(&topic.gradient),
            escape_html(&topic.name)
        );

        if view.is_empty() {
            let _ = writeln!(
                main,
                "<div class=\"empty\"><p>No cookbooks found for this topic yet.</p><a href=\"{}\">Browse all cookbooks</a></div>",
                self.config.base.link("")
            );
        } else {
            main.push_str("<section class=\"card-grid\">\n");
            for recipe in &view.cards {
                main.push_str(&self.card(recipe));
            }
            main.push_str("</section>\n");
        }

        if !view.more.is_empty() {
            main.push_str("<section class=\"more\">\n<h2>More cookbooks</h2>\n<ul class=\"recipe-list\">\n");
            for recipe in &view.more {
                main.push_str(&self.list_item(recipe));
            }
            main.push_str("</ul>\n</section>\n");
        }

        let title = format!("{} - {}", topic.name, self.config.base.title);
        let description = format!("Explore {} cookbooks and tutorials.", topic.name.to_lowercase());
        self.layout(&title, &description, &main)
    }

    /// 404 page.
    pub fn not_found(&self) -> String {
        let main = format!(
            "<div class=\"not-found\">\n<h1>Cookbook Not Found</h1>\n<p>The page you are looking for does not exist.</p>\n<a href=\"{}\">Browse all cookbooks</a>\n</div>\n",
            self.config.base.link("")
        );
        let title = format!("Not Found | {}", self.config.base.title);
        self.layout(&title, "", &main)
    }

    // ========================================================================
    // Fragments
    // ========================================================================

    fn layout(&self, title: &str, description: &str, main: &str) -> String {
        let base = &self.config.base;
        let build = &self.config.build;
        let prefix = base.path_prefix();

        let mut html = String::with_capacity(main.len() + 1024);
        html.push_str("<!DOCTYPE html>\n");
        let _ = writeln!(html, "<html lang=\"{}\">", escape_html(&base.language));
        html.push_str("<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape_html(title));
        if !description.is_empty() {
            let _ = writeln!(
                html,
                "<meta name=\"description\" content=\"{}\">",
                escape_html(description)
            );
        }
        let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{prefix}/{STYLESHEET_PATH}\">");
        if build.rss.enable {
            let _ = writeln!(
                html,
                "<link rel=\"alternate\" type=\"application/rss+xml\" title=\"{}\" href=\"{prefix}/{}\">",
                escape_html(&base.title),
                build.rss.path.display()
            );
        }
        html.push_str("</head>\n");

        let _ = write!(html, "<body data-base=\"{prefix}\"");
        if build.search.enable {
            let _ = write!(html, " data-search-index=\"{prefix}/{}\"", build.search.path.display());
        }
        html.push_str(">\n<header class=\"site-header\">\n");
        let _ = writeln!(
            html,
            "<a class=\"site-title\" href=\"{}\">{}</a>",
            base.link(""),
            escape_html(&base.title)
        );
        if build.search.enable {
            html.push_str("<div class=\"search\">\n<input type=\"search\" id=\"search-input\" placeholder=\"Search cookbooks\" autocomplete=\"off\">\n<ul class=\"search-results\" id=\"search-results\" hidden></ul>\n</div>\n");
        }
        html.push_str("</header>\n<main>\n");
        html.push_str(main);
        html.push_str("</main>\n");
        let _ = writeln!(html, "<script src=\"{prefix}/{SCRIPT_PATH}\" defer></script>");
        html.push_str("</body>\n</html>\n");
        html
    }

    fn topic_card(&self, topic: &TopicConfig) -> String {
        format!(
            "<a class=\"topic-card\" href=\"{}\" style=\"background: {}\"><span>{}</span></a>\n",
            self.config.base.link(&format!("topic/{}", topic.slug)),
            escape_html(&topic.gradient),
            escape_html(&topic.name)
        )
    }

    fn card(&self, recipe: &RecipeSummary) -> String {
        let meta = &recipe.meta;
        let mut html = String::new();
        let _ = writeln!(
            html,
            "<a class=\"recipe-card\" href=\"{}\">",
            self.config.base.link(&recipe.slug)
        );
        let _ = writeln!(html, "<span class=\"recipe-date\">{}</span>", meta.short_date());
        let _ = writeln!(html, "<h3>{}</h3>", escape_html(&meta.title));
        html.push_str("<div class=\"card-footer\">\n");
        html.push_str(&self.visible_tags(meta));
        html.push_str("<span class=\"avatars\">");
        for author in &meta.authors {
            html.push_str(&avatar(author, 26));
        }
        html.push_str("</span>\n</div>\n</a>\n");
        html
    }

    fn list_item(&self, recipe: &RecipeSummary) -> String {
        let meta = &recipe.meta;
        let tags = serde_json::to_string(&meta.tags).unwrap_or_default();
        format!(
            "<li data-tags=\"{}\"><a href=\"{}\"><span class=\"title\">{}</span>{}<span class=\"recipe-date\">{}</span></a></li>\n",
            escape_html(&tags),
            self.config.base.link(&recipe.slug),
            escape_html(&meta.title),
            self.visible_tags(meta).trim_end(),
            meta.short_date()
        )
    }

    /// Up to three non-hidden tags, then `+N` for the rest.
    fn visible_tags(&self, meta: &Frontmatter) -> String {
        let hidden = &self.config.catalog.hidden_tags;
        let visible: Vec<&String> = meta.tags.iter().filter(|t| !hidden.contains(*t)).collect();

        let mut html = String::from("<span class=\"tags\">");
        for tag in visible.iter().take(VISIBLE_TAG_COUNT) {
            html.push_str(&self.tag_badge(tag));
        }
        if visible.len() > VISIBLE_TAG_COUNT {
            let _ = write!(html, "<span class=\"more-tags\">+{}</span>", visible.len() - VISIBLE_TAG_COUNT);
        }
        html.push_str("</span>\n");
        html
    }

    /// A tag that names a topic links to the topic page.
    fn tag_badge(&self, tag: &str) -> String {
        match self.config.catalog.topic(tag) {
            Some(topic) => format!(
                "<a class=\"tag\" href=\"{}\">{}</a>",
                self.config.base.link(&format!("topic/{}", topic.slug)),
                escape_html(tag)
            ),
            None => format!("<span class=\"tag\">{}</span>", escape_html(tag)),
        }
    }

    fn bylines(&self, meta: &Frontmatter) -> String {
        let catalog = &self.config.catalog;
        let mut html = String::from("<div class=\"authors\"><span class=\"avatars\">");
        for author in &meta.authors {
            html.push_str(&avatar(author, 32));
        }
        html.push_str("</span><span class=\"names\">");

        let names: Vec<String> = meta
            .authors
            .iter()
            .map(|author| {
                let mut name = escape_html(author);
                if catalog.is_org_member(author) {
                    let _ = write!(
                        name,
                        "<span class=\"org-member\"> ({})</span>",
                        escape_html(catalog.org_label())
                    );
                }
                name
            })
            .collect();
        html.push_str(&names.join(", "));
        html.push_str("</span></div>\n");
        html
    }

    fn badges(&self, meta: &Frontmatter) -> String {
        let mut html = String::new();
        if meta.difficulty.has_badge() {
            let _ = write!(
                html,
                "<span class=\"badge badge-{}\">{}</span>",
                meta.difficulty.as_str(),
                meta.difficulty.label()
            );
        }
        if let Some(sdk) = meta.sdk {
            let _ = write!(
                html,
                "<span class=\"badge badge-sdk\" data-sdk=\"{}\">{}</span>",
                sdk.as_str(),
                sdk.label()
            );
        }
        if !html.is_empty() {
            html.push('\n');
        }
        html
    }

    fn source_links(&self, doc: &Document) -> String {
        let Some(repository) = self.config.base.repository.as_deref() else {
            return String::new();
        };
        let repository = repository.trim_end_matches('/');
        let file = format!(
            "{}/{}.{}",
            self.config.content_rel_path().trim_matches('/'),
            doc.slug,
            self.config.build.extension
        );

        let raw = match repository.strip_prefix("https://github.com/") {
            Some(repo) => format!("https://raw.githubusercontent.com/{repo}/main/{file}"),
            None => format!("{repository}/raw/main/{file}"),
        };

        format!(
            "<div class=\"source-links\"><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Open in GitHub</a><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">View markdown</a></div>\n",
            escape_html(&format!("{repository}/blob/main/{file}")),
            escape_html(&raw)
        )
    }
}

fn avatar(handle: &str, size: u32) -> String {
    let handle = escape_html(handle);
    format!(
        "<img class=\"avatar\" src=\"https://github.com/{handle}.png\" alt=\"{handle}\" width=\"{size}\" height=\"{size}\" loading=\"lazy\">"
    )
}

// ============================================================================
// Tests
// ============================================================================
