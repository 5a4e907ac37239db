//! Sitemap generation.
//!
//! Lists the home page, every topic page and every recipe for search engine
//! indexing. Recipes carry their frontmatter date as `lastmod`.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://anam.ai/cookbook/</loc>
//!   </url>
//!   <url>
//!     <loc>https://anam.ai/cookbook/basic-nextjs-app/</loc>
//!     <lastmod>2025-01-15</lastmod>
//!   </url>
//! </urlset>
//! ```

use super::write_output;
use crate::{
    config::SiteConfig,
    content::RecipeSummary,
    log,
    utils::{
        escape::escape_xml,
        minify::{MinifyType, minify},
    },
};
use anyhow::Result;
use std::fmt::Write;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// ============================================================================
// Public API
// ============================================================================

/// Build sitemap if enabled in config.
///
/// Needs `[base].url`; without it the sitemap is skipped with a warning.
pub fn build_sitemap(config: &SiteConfig, recipes: &[RecipeSummary]) -> Result<()> {
    if !config.build.sitemap.enable {
        return Ok(());
    }

    let Some(sitemap) = Sitemap::from_recipes(config, recipes) else {
        log!("warn"; "sitemap skipped, [base.url] is not set");
        return Ok(());
    };

    let xml = sitemap.into_xml();
    let xml = minify(MinifyType::Xml(xml.as_bytes()), config);
    write_output(config, "sitemap", &config.build.sitemap.path, &xml)
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

struct Sitemap {
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Last modification date (YYYY-MM-DD)
    lastmod: Option<String>,
}

impl Sitemap {
    /// Home, then topics in config order, then recipes in index order.
    fn from_recipes(config: &SiteConfig, recipes: &[RecipeSummary]) -> Option<Self> {
        let base = &config.base;
        let mut urls = vec![UrlEntry {
            loc: base.absolute_url("")?,
            lastmod: None,
        }];

        for topic in &config.catalog.topics {
            urls.push(UrlEntry {
                loc: base.absolute_url(&format!("topic/{}", topic.slug))?,
                lastmod: None,
            });
        }

        for recipe in recipes {
            urls.push(UrlEntry {
                loc: base.absolute_url(&recipe.slug)?,
                lastmod: Some(recipe.meta.date.format("%Y-%m-%d").to_string()),
            });
        }

        Some(Self { urls })
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 96);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        let _ = writeln!(xml, r#"<urlset xmlns="{SITEMAP_NS}">"#);

        for entry in self.urls {
            xml.push_str("  <url>\n");
            let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.loc));
            if let Some(lastmod) = entry.lastmod {
                let _ = writeln!(xml, "    <lastmod>{lastmod}</lastmod>");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

// ============================================================================
// Tests
// ============================================================================
