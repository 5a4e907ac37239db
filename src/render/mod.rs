//! Rendering Layer: markdown bodies and page templates.
//!
//! Pages only see [`RecipeSummary`](crate::content::RecipeSummary) and
//! [`Document`](crate::content::Document) values handed over by the build;
//! they never read the Content Store.

mod markdown;
mod page;

pub use markdown::MarkdownRenderer;
pub use page::PageRenderer;

/// Stylesheet path, relative to the output directory.
pub const STYLESHEET_PATH: &str = "style.css";
/// Client script path (search overlay, tag filter), relative to the output directory.
pub const SCRIPT_PATH: &str = "cookbook.js";

/// Static files written next to the pages.
pub const ASSETS: &[(&str, &str)] = &[
    (STYLESHEET_PATH, include_str!("style.css")),
    (SCRIPT_PATH, include_str!("cookbook.js")),
];
