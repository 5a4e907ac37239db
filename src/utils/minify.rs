//! Minification utilities for HTML and XML.
//!
//! Provides a unified `minify` function that handles both rendered pages and
//! the generated XML files, honouring `[build].minify`.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Content type for minification.
pub enum MinifyType<'a> {
    /// Rendered page
    Html(&'a [u8]),
    /// Sitemap or feed
    Xml(&'a [u8]),
}

/// Minify content based on type and config.
///
/// Returns `Cow::Borrowed` if minify is disabled or the input is left as-is.
pub fn minify<'a>(content: MinifyType<'a>, config: &SiteConfig) -> Cow<'a, [u8]> {
    match content {
        MinifyType::Html(html) | MinifyType::Xml(html) if !config.build.minify => {
            Cow::Borrowed(html)
        }
        MinifyType::Html(html) => Cow::Owned(minify_html_inner(html)),
        MinifyType::Xml(xml) => minify_xml_inner(xml),
    }
}

/// Minify HTML content using `minify_html` crate.
///
/// Code blocks keep their whitespace; `minify_html` leaves `<pre>` alone.
fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}

/// Minify XML by joining trimmed, non-empty lines.
///
/// Input that is not valid UTF-8 is returned unchanged.
fn minify_xml_inner(xml: &[u8]) -> Cow<'_, [u8]> {
    let Ok(text) = std::str::from_utf8(xml) else {
        return Cow::Borrowed(xml);
    };
    let joined: String = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    Cow::Owned(joined.into_bytes())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_minify(enabled: bool) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.minify = enabled;
        config
    }

    #[test]
    fn test_minify_recipe_page() {
        let html = b"<html>\n  <body>\n    <article>\n      <h1>RAG Knowledge Base</h1>\n    </article>\n  </body>\n</html>";
        let result = minify(MinifyType::Html(html), &config_with_minify(true));
        let result = String::from_utf8_lossy(&result);

        assert!(!result.contains("\n  "));
        assert!(result.contains("<h1>RAG Knowledge Base</h1>"));
    }

    #[test]
    fn test_minify_keeps_code_whitespace() {
        let html = b"<pre><code>fn main() {\n    run();\n}</code></pre>";
        let result = minify(MinifyType::Html(html), &config_with_minify(true));
        let result = String::from_utf8_lossy(&result);

        assert!(result.contains("fn main() {\n    run();\n}"));
    }

    #[test]
    fn test_minify_disabled_borrows() {
        let html = b"<html>\n  <body>\n  </body>\n</html>";
        let result = minify(MinifyType::Html(html), &config_with_minify(false));
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, html);

        let xml = b"<urlset>\n  <url/>\n</urlset>";
        let result = minify(MinifyType::Xml(xml), &config_with_minify(false));
        assert_eq!(&*result, xml);
    }

    #[test]
    fn test_minify_sitemap() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">

  <url>
    <loc>https://anam.ai/cookbook/rag-knowledge-base/</loc>
    <lastmod>2025-01-15</lastmod>
  </url>
</urlset>"#;
        let result = minify(MinifyType::Xml(xml), &config_with_minify(true));
        let result = String::from_utf8_lossy(&result);

        assert!(!result.contains('\n'));
        assert!(result.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><urlset"#));
        assert!(result.contains("<url><loc>https://anam.ai/cookbook/rag-knowledge-base/</loc>"));
    }

    #[test]
    fn test_minify_xml_keeps_inner_spaces() {
        let xml = b"  <title>  Getting Started  </title>  ";
        let result = minify(MinifyType::Xml(xml), &config_with_minify(true));
        assert_eq!(&*result, b"<title>  Getting Started  </title>");
    }

    #[test]
    fn test_minify_xml_invalid_utf8_unchanged() {
        let xml: &[u8] = &[b'<', 0xff, b'>', b'\n'];
        let result = minify(MinifyType::Xml(xml), &config_with_minify(true));
        assert_eq!(&*result, xml);
    }
}
