//! Client search index.
//!
//! Every [`RecipeSummary`] in index order, serialized as a JSON array. The
//! search overlay fetches it once and runs the same substring rule as
//! [`crate::search::search`].

use super::write_output;
use crate::{config::SiteConfig, content::RecipeSummary};
use anyhow::{Context, Result};

/// Build `search.json` if enabled in config.
pub fn build_search_index(config: &SiteConfig, recipes: &[RecipeSummary]) -> Result<()> {
    if !config.build.search.enable {
        return Ok(());
    }

    let json = serde_json::to_vec(recipes).context("Failed to serialize search index")?;
    write_output(config, "search", &config.build.search.path, &json)
}
