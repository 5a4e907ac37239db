//! Side files written next to the pages: sitemap, rss feed and the client
//! search index. Each one is skipped when its `[build.*].enable` is off.

mod rss;
mod search_index;
mod sitemap;

pub use rss::build_rss;
pub use search_index::build_search_index;
pub use sitemap::build_sitemap;

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Write `content` to `rel` under the output directory and log its name.
fn write_output(config: &SiteConfig, module: &str, rel: &Path, content: &[u8]) -> Result<()> {
    let path = config.build.output.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, content)
        .with_context(|| format!("Failed to write {module} to {}", path.display()))?;

    log!(module; "{}", rel.display());
    Ok(())
}
