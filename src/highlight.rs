//! Syntax Highlighter service.
//!
//! ```text
//! Highlighter::new(theme)      cheap, nothing loaded
//!        │
//!        ▼ first highlight() from any thread
//! OnceLock<Engine>             SyntaxSet + Theme loaded exactly once,
//!        │                     concurrent callers wait on the same init
//!        ▼
//! highlight(code, lang) ──► <pre style=..>..</pre>  or escaped <pre><code>
//! ```
//!
//! One instance is built per build/serve run and passed by reference to the
//! markdown renderer.

use crate::{log, utils::escape::escape_html};
use std::sync::OnceLock;
use syntect::{
    highlighting::{Theme, ThemeSet},
    html::highlighted_html_for_string,
    parsing::{SyntaxReference, SyntaxSet},
};

/// Theme used when `[build.highlight].theme` is unset or unknown.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Fence languages without a bundled grammar, mapped to the closest one.
const ALIASES: &[(&str, &str)] = &[
    ("ts", "js"),
    ("typescript", "js"),
    ("tsx", "js"),
    ("jsx", "js"),
    ("javascript", "js"),
    ("sh", "bash"),
    ("shell", "bash"),
    ("zsh", "bash"),
    ("console", "bash"),
    ("mdx", "md"),
    ("markdown", "md"),
    ("py", "py"),
];

struct Engine {
    syntaxes: SyntaxSet,
    /// `None` only if the bundled theme set lacks the default too
    theme: Option<Theme>,
}

impl Engine {
    fn load(theme_name: &str) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes.remove(theme_name).or_else(|| {
            log!("warn"; "unknown highlight theme `{theme_name}`, using {DEFAULT_THEME}");
            themes.remove(DEFAULT_THEME)
        });
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    fn syntax(&self, lang: &str) -> Option<&SyntaxReference> {
        let lang = lang.to_ascii_lowercase();
        let token = ALIASES
            .iter()
            .find(|(alias, _)| *alias == lang)
            .map_or(lang.as_str(), |&(_, token)| token);
        self.syntaxes.find_syntax_by_token(token)
    }
}

/// Code block highlighter with a lazily loaded engine.
pub struct Highlighter {
    theme: String,
    engine: OnceLock<Engine>,
}

impl Highlighter {
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            engine: OnceLock::new(),
        }
    }

    /// Whether the syntax and theme sets have been loaded yet.
    #[cfg(test)]
    fn is_loaded(&self) -> bool {
        self.engine.get().is_some()
    }

    fn engine(&self) -> &Engine {
        self.engine.get_or_init(|| Engine::load(&self.theme))
    }

    /// Highlight `code` as `lang`.
    ///
    /// `text`, unknown languages and highlighting errors produce escaped,
    /// unstyled `<pre><code>` instead of failing the page.
    pub fn highlight(&self, code: &str, lang: &str) -> String {
        if lang.is_empty() || lang.eq_ignore_ascii_case("text") {
            return plain(code);
        }

        let engine = self.engine();
        let (Some(syntax), Some(theme)) = (engine.syntax(lang), engine.theme.as_ref()) else {
            return plain(code);
        };

        match highlighted_html_for_string(code, &engine.syntaxes, syntax, theme) {
            Ok(html) => html,
            Err(err) => {
                log!("warn"; "highlighting {lang} failed: {err}");
                plain(code)
            }
        }
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

fn plain(code: &str) -> String {
    format!("<pre><code>{}</code></pre>\n", escape_html(code))
}
