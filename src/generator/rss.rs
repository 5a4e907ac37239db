//! rss feed generation.
//!
//! One item per recipe, newest first, built with the `rss` crate and
//! validated before it is written.

use super::write_output;
use crate::{
    config::SiteConfig,
    content::RecipeSummary,
    utils::minify::{MinifyType, minify},
};
use anyhow::{Result, anyhow};
use chrono::NaiveTime;
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};

// ============================================================================
// Public API
// ============================================================================

/// Build rss feed if enabled in config.
///
/// `recipes` must already be in index order (newest first).
pub fn build_rss(config: &SiteConfig, recipes: &[RecipeSummary]) -> Result<()> {
    if !config.build.rss.enable {
        return Ok(());
    }

    let xml = into_xml(config, recipes)?;
    let xml = minify(MinifyType::Xml(xml.as_bytes()), config);
    write_output(config, "rss", &config.build.rss.path, &xml)
}

// ============================================================================
// Feed
// ============================================================================

fn into_xml(config: &SiteConfig, recipes: &[RecipeSummary]) -> Result<String> {
    let base = &config.base;
    let link = base
        .absolute_url("")
        .ok_or_else(|| anyhow!("[base.url] is required for RSS generation"))?;

    let items: Vec<_> = recipes
        .iter()
        .filter_map(|recipe| recipe_to_rss_item(recipe, config))
        .collect();

    let channel = ChannelBuilder::default()
        .title(&base.title)
        .link(link)
        .description(&base.description)
        .language(base.language.clone())
        .generator(format!("cookbook {}", env!("CARGO_PKG_VERSION")))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("rss validation failed: {e}"))?;
    Ok(channel.to_string())
}

/// Convert a recipe summary to an rss item.
/// Returns None when `[base].url` is missing.
fn recipe_to_rss_item(recipe: &RecipeSummary, config: &SiteConfig) -> Option<rss::Item> {
    let meta = &recipe.meta;
    let link = config.base.absolute_url(&recipe.slug)?;
    let pub_date = meta.date.and_time(NaiveTime::MIN).and_utc().to_rfc2822();
    let categories = meta
        .tags
        .iter()
        .map(|tag| CategoryBuilder::default().name(tag.as_str()).build())
        .collect::<Vec<_>>();
    let description = (!meta.description.is_empty()).then(|| meta.description.clone());

    Some(
        ItemBuilder::default()
            .title(meta.title.clone())
            .link(Some(link.clone()))
            .guid(GuidBuilder::default().permalink(true).value(link).build())
            .description(description)
            .pub_date(pub_date)
            .categories(categories)
            .build(),
    )
}
