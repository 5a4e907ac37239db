//! Slug and tag helpers.
//!
//! A recipe slug is the file stem of `<slug>.<ext>`. Heading anchors are
//! produced by [`slugify`].

use deunicode::deunicode;
use std::path::Path;

/// Slug of a recipe file, if the path carries the recipe extension.
///
/// `content/recipes/rag-knowledge-base.mdx` → `rag-knowledge-base`
pub fn slug_from_path(path: &Path, extension: &str) -> Option<String> {
    if path.extension()?.to_str()? != extension {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    is_valid_slug(stem).then(|| stem.to_owned())
}

/// A slug names exactly one file inside the content directory: no path
/// separators and not a `.` or `..` component.
pub fn is_valid_slug(slug: &str) -> bool {
    !matches!(slug, "" | "." | "..") && !slug.contains(['/', '\\'])
}

/// Convert heading text to an anchor id.
///
/// Transliterates to ASCII, lowercases, and collapses every run of other
/// characters into a single `-`.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut out = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Tags are expected as lowercase words joined by single hyphens
/// (`custom-llm`, `react-native`).
pub fn is_canonical_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .split('-')
            .all(|word| !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
}
