//! Cookbook - a static site generator for mdx recipe collections.

mod build;
mod cli;
mod config;
mod content;
mod generator;
mod highlight;
mod recipes;
mod render;
mod search;
mod serve;
mod utils;
mod watch;

use anyhow::{Context, Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};
use content::{ContentStore, RecipeSummary};
use recipes::{RecipeIndex, error_chain};
use serve::serve_site;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = init_config(cli.clone())?;

    match &cli.command {
        Commands::Build { .. } => build_site(&config).map(|_| ()),
        Commands::Serve { .. } => {
            build_site(&config)?;
            serve_site()
        }
        Commands::List { tag } => list(&config, tag.as_deref()),
        Commands::Tags => tags(&config),
        Commands::Search { query } => search(&config, query),
        Commands::Check => check(&config),
    }
}

fn index(config: &SiteConfig) -> RecipeIndex {
    RecipeIndex::new(ContentStore::from_config(config))
}

fn content_context(config: &SiteConfig) -> String {
    format!(
        "Failed to read recipe directory {}",
        config.build.content.display()
    )
}

fn print_row(recipe: &RecipeSummary) {
    println!(
        "{}  {:<32}  {}",
        recipe.meta.date, recipe.slug, recipe.meta.title
    );
}

/// `cookbook list [--tag T]`
fn list(config: &SiteConfig, tag: Option<&str>) -> Result<()> {
    let index = index(config);
    let recipes = match tag {
        Some(tag) => index.by_tag(tag),
        None => index.all(),
    }
    .with_context(|| content_context(config))?;

    recipes.iter().for_each(print_row);
    Ok(())
}

/// `cookbook tags`
fn tags(config: &SiteConfig) -> Result<()> {
    let tags = index(config)
        .all_tags()
        .with_context(|| content_context(config))?;

    for tag in tags {
        println!("{tag}");
    }
    Ok(())
}

/// `cookbook search <query>`
fn search(config: &SiteConfig, query: &str) -> Result<()> {
    let recipes = index(config)
        .all()
        .with_context(|| content_context(config))?;

    search::search(query, &recipes).into_iter().for_each(print_row);
    Ok(())
}

/// `cookbook check`: fails when any recipe cannot be loaded.
fn check(config: &SiteConfig) -> Result<()> {
    let report = index(config)
        .load()
        .with_context(|| content_context(config))?;

    for (slug, err) in &report.failures {
        log!("error"; "{slug}: {}", error_chain(err));
    }
    for (slug, tag) in report.tag_warnings() {
        log!("warn"; "tag `{tag}` in {slug} is not lowercase-hyphenated");
    }

    let total = report.recipes.len() + report.failures.len();
    if !report.failures.is_empty() {
        bail!("{} of {total} recipes failed to load", report.failures.len());
    }

    log!("check"; "{total} recipes ok");
    Ok(())
}
