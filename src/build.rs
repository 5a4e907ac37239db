//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── prepare_output()      clean / create the output directory
//!     │
//!     ├── RecipeIndex::load()   summaries (newest first) + failures
//!     │       │
//!     │       └── strict: any failure aborts, otherwise logged and skipped
//!     │
//!     ├── render_recipes()      <slug>/index.html, in parallel
//!     ├── render_listings()     index.html, topic/<slug>/index.html, 404.html
//!     ├── write_assets()        style.css, cookbook.js
//!     │
//!     └── sitemap / rss / search.json
//! ```

use crate::{
    config::SiteConfig,
    content::{ContentStore, RecipeSummary},
    generator::{build_rss, build_search_index, build_sitemap},
    highlight::Highlighter,
    log,
    recipes::{
        IndexReport, RecipeIndex, collect_tags, error_chain,
        filter::{TopicView, selectable_tags},
        select_featured,
    },
    render::{ASSETS, PageRenderer},
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{fs, path::Path};

/// Build the entire site into `[build].output`.
///
/// Returns the index report so callers can inspect what was skipped.
pub fn build_site(config: &SiteConfig) -> Result<IndexReport> {
    prepare_output(&config.build.output, config.build.clean)?;

    let index = RecipeIndex::new(ContentStore::from_config(config));
    let report = index.load().with_context(|| {
        format!(
            "Failed to read recipe directory {}",
            config.build.content.display()
        )
    })?;

    if config.build.strict && !report.failures.is_empty() {
        for (slug, err) in &report.failures {
            log!("error"; "{slug}: {}", error_chain(err));
        }
        bail!(
            "{} recipe(s) failed to parse (strict mode)",
            report.failures.len()
        );
    }
    report.log_problems();

    let highlighter = Highlighter::new(config.build.highlight.theme.as_str());
    let renderer = PageRenderer::new(config, &highlighter);

    let (pages, side_files) = rayon::join(
        || -> Result<()> {
            render_recipes(config, &index, &renderer, &report.recipes)?;
            render_listings(config, &renderer, &report.recipes)?;
            write_assets(config)
        },
        || write_side_files(config, &report.recipes),
    );
    pages?;
    side_files?;

    if report.recipes.is_empty() {
        log!("warn"; "no recipes found in {}", config.build.content.display());
    } else {
        log!("build"; "done, {} recipes", report.recipes.len());
    }

    Ok(report)
}

/// Create the output directory, clearing it first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

// ============================================================================
// Pages
// ============================================================================

/// One detail page per indexed recipe.
///
/// A recipe deleted after the index was loaded is skipped.
fn render_recipes(
    config: &SiteConfig,
    index: &RecipeIndex,
    renderer: &PageRenderer,
    recipes: &[RecipeSummary],
) -> Result<()> {
    recipes.par_iter().try_for_each(|recipe| {
        let doc = match index.by_slug(&recipe.slug) {
            Ok(doc) => doc,
            Err(err) if err.is_not_found() => {
                log!("warn"; "recipe `{}` removed during build, skipped", recipe.slug);
                return Ok(());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to reload recipe `{}`", recipe.slug));
            }
        };
        let html = renderer.recipe(&doc);
        write_page(config, &Path::new(&recipe.slug).join("index.html"), &html)
    })
}

/// Home, topic and not-found pages.
fn render_listings(
    config: &SiteConfig,
    renderer: &PageRenderer,
    recipes: &[RecipeSummary],
) -> Result<()> {
    let catalog = &config.catalog;

    let featured: Vec<_> = select_featured(recipes, &catalog.featured).collect();
    for slug in &catalog.featured {
        if !featured.iter().any(|r| &r.slug == slug) {
            log!("warn"; "featured recipe `{slug}` not found");
        }
    }
    let filter_tags = selectable_tags(&collect_tags(recipes), &catalog.hidden_tags);
    write_page(
        config,
        Path::new("index.html"),
        &renderer.home(recipes, &featured, &filter_tags),
    )?;

    catalog.topics.par_iter().try_for_each(|topic| {
        let view = TopicView::new(topic, recipes);
        let path = Path::new("topic").join(&topic.slug).join("index.html");
        write_page(config, &path, &renderer.topic(&view))
    })?;

    write_page(config, Path::new("404.html"), &renderer.not_found())
}

fn write_page(config: &SiteConfig, rel: &Path, html: &str) -> Result<()> {
    let path = config.build.output.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let html = minify(MinifyType::Html(html.as_bytes()), config);
    fs::write(&path, &*html).with_context(|| format!("Failed to write {}", path.display()))
}

// ============================================================================
// Assets and side files
// ============================================================================

fn write_assets(config: &SiteConfig) -> Result<()> {
    for (name, content) in ASSETS {
        let path = config.build.output.join(name);
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

fn write_side_files(config: &SiteConfig, recipes: &[RecipeSummary]) -> Result<()> {
    let (sitemap, (rss, search)) = rayon::join(
        || build_sitemap(config, recipes),
        || {
            rayon::join(
                || build_rss(config, recipes),
                || build_search_index(config, recipes),
            )
        },
    );
    sitemap?;
    rss?;
    search
}
