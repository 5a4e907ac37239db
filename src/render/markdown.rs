//! Recipe body rendering.
//!
//! # Pipeline
//!
//! ```text
//! body ──expand_components──► markdown ──pulldown-cmark──► events ──► HTML
//!          <Tip>, <Steps>...      │                          │
//!          become <div> blocks    │                          ├─ fenced code → Highlighter
//!          (fences untouched)     │                          ├─ headings    → id anchors
//!                                 │                          └─ /img.png    → base_path prefixed
//! ```
//!
//! Component tags must open and close on their own lines (or both on one
//! line); the markdown between them renders normally.

use crate::{
    highlight::Highlighter,
    utils::{escape::escape_html, slug::slugify},
};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};
use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^<(Callout|Tip|Warning|Info|Steps)((?:\s+[A-Za-z]+\s*=\s*(?:"[^"]*"|'[^']*'))*)\s*>(.*)$"#,
    )
    .unwrap()
});
static CLOSE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)</(Callout|Tip|Warning|Info|Steps)>\s*$").unwrap());
static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

const CALLOUT_KINDS: &[&str] = &["tip", "warning", "info"];

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Renders recipe bodies to HTML.
pub struct MarkdownRenderer<'a> {
    highlighter: &'a Highlighter,
    /// `/cookbook` or empty, no trailing slash
    path_prefix: String,
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new(highlighter: &'a Highlighter, path_prefix: impl Into<String>) -> Self {
        Self {
            highlighter,
            path_prefix: path_prefix.into(),
        }
    }

    pub fn render(&self, body: &str) -> String {
        let source = expand_components(body);
        let events = self.transform(Parser::new_ext(&source, options()));

        let mut out = String::with_capacity(source.len() * 2);
        html::push_html(&mut out, events.into_iter());
        out
    }

    fn transform<'e>(&self, parser: Parser<'e>) -> Vec<Event<'e>> {
        let mut out = Vec::new();
        let mut anchors = FxHashMap::<String, usize>::default();
        let mut code: Option<(FenceInfo, String)> = None;
        let mut heading: Option<(u8, Option<CowStr<'e>>, Vec<Event<'e>>)> = None;

        for event in parser {
            let event = self.rewrite_image(event);

            if let Some((info, buf)) = &mut code {
                match event {
                    Event::Text(text) => buf.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        out.push(Event::Html(self.code_block(buf, info).into()));
                        code = None;
                    }
                    _ => {}
                }
                continue;
            }

            if let Some((level, id, inner)) = &mut heading {
                if matches!(event, Event::End(TagEnd::Heading(_))) {
                    let anchor = match id.take() {
                        Some(id) => id.to_string(),
                        None => slugify(&plain_text(inner)),
                    };
                    let anchor = unique_anchor(&mut anchors, anchor);
                    out.push(Event::Html(
                        format!("<h{level} id=\"{}\">", escape_html(&anchor)).into(),
                    ));
                    out.append(inner);
                    out.push(Event::Html(format!("</h{level}>\n").into()));
                    heading = None;
                } else {
                    inner.push(event);
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code = Some((FenceInfo::parse(&kind), String::new()));
                }
                Event::Start(Tag::Heading { level, id, .. }) => {
                    heading = Some((level as u8, id, Vec::new()));
                }
                other => out.push(other),
            }
        }
        out
    }

    /// Site-absolute image sources get the base path prefixed.
    fn rewrite_image<'e>(&self, event: Event<'e>) -> Event<'e> {
        match event {
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) if dest_url.starts_with('/') && !dest_url.starts_with("//") => {
                Event::Start(Tag::Image {
                    link_type,
                    dest_url: format!("{}{dest_url}", self.path_prefix).into(),
                    title,
                    id,
                })
            }
            other => other,
        }
    }

    /// Highlighted code with an optional filename header and a copy button
    /// (wired up by `cookbook.js`).
    fn code_block(&self, code: &str, info: &FenceInfo) -> String {
        let lang = escape_html(&info.lang);
        let header = info
            .filename
            .as_deref()
            .map(|name| {
                format!(
                    r#"<div class="code-header"><span class="code-filename">{}</span><span class="code-language">{lang}</span></div>"#,
                    escape_html(name)
                )
            })
            .unwrap_or_default();

        format!(
            "<div class=\"code-block\" data-language=\"{lang}\">{header}{COPY_BUTTON}{}</div>\n",
            self.highlighter.highlight(code.trim(), &info.lang)
        )
    }
}

const COPY_BUTTON: &str =
    r#"<button type="button" class="code-copy" aria-label="Copy code">Copy</button>"#;

/// Fence info string, e.g. `ts title="app.ts"`.
#[derive(Debug, PartialEq, Eq)]
struct FenceInfo {
    /// First word, `text` if absent
    lang: String,
    /// `title=` or `filename=` attribute
    filename: Option<String>,
}

impl FenceInfo {
    fn parse(kind: &CodeBlockKind) -> Self {
        let info = match kind {
            CodeBlockKind::Fenced(info) => info.trim(),
            CodeBlockKind::Indented => "",
        };
        let (lang, attrs) = info
            .split_once(char::is_whitespace)
            .unwrap_or((info, ""));

        let filename = ATTR
            .captures_iter(attrs)
            .find(|c| matches!(&c[1], "title" | "filename"))
            .and_then(|c| c.get(2).or_else(|| c.get(3)))
            .map(|m| m.as_str().to_owned())
            .filter(|name| !name.is_empty());

        let lang = if lang.is_empty() { "text" } else { lang };
        Self {
            lang: lang.to_owned(),
            filename,
        }
    }
}

fn plain_text(events: &[Event]) -> String {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Text(t) | Event::Code(t) => Some(t.as_ref()),
            _ => None,
        })
        .collect()
}

/// First use keeps the anchor; repeats get `-1`, `-2`, ...
fn unique_anchor(seen: &mut FxHashMap<String, usize>, anchor: String) -> String {
    let count = seen.entry(anchor.clone()).or_insert(0);
    let unique = if *count == 0 {
        anchor
    } else {
        format!("{anchor}-{count}")
    };
    *count += 1;
    unique
}

// ============================================================================
// Components
// ============================================================================

/// Replace component tags outside code fences with HTML blocks.
fn expand_components(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 256);
    let mut fence: Option<&str> = None;

    for line in source.lines() {
        let trimmed = line.trim();

        if let Some(marker) = fence {
            if trimmed.starts_with(marker) {
                fence = None;
            }
            push_line(&mut out, line);
        } else if let Some(marker) = ["```", "~~~"].into_iter().find(|m| trimmed.starts_with(m)) {
            fence = Some(marker);
            push_line(&mut out, line);
        } else {
            expand_line(&mut out, line);
        }
    }
    out
}

/// Expand one line. Generated blocks keep the line's indentation so a
/// component inside a list item stays in that item.
fn expand_line(out: &mut String, line: &str) {
    let trimmed = line.trim();
    let indent = &line[..line.len() - line.trim_start().len()];

    let Some(caps) = OPEN_TAG.captures(trimmed) else {
        expand_close(out, indent, line);
        return;
    };

    let attrs = caps.get(2).map_or("", |m| m.as_str());
    push_block(out, indent, &open_component(&caps[1], attrs));
    let rest = caps.get(3).map_or("", |m| m.as_str()).trim();
    if !rest.is_empty() {
        expand_close(out, indent, &format!("{indent}{rest}"));
    }
}

fn expand_close(out: &mut String, indent: &str, line: &str) {
    let Some(caps) = CLOSE_TAG.captures(line.trim()) else {
        push_line(out, line);
        return;
    };

    let before = caps.get(1).map_or("", |m| m.as_str()).trim();
    if !before.is_empty() {
        push_line(out, &format!("{indent}{before}"));
    }
    push_block(out, indent, close_component(&caps[2]));
}

fn open_component(name: &str, attrs: &str) -> String {
    let attr = |key: &str| {
        ATTR.captures_iter(attrs)
            .find(|c| &c[1] == key)
            .and_then(|c| c.get(2).or_else(|| c.get(3)))
            .map(|m| m.as_str())
    };

    let kind = match name {
        "Steps" => return r#"<div class="steps">"#.to_owned(),
        "Tip" => "tip",
        "Warning" => "warning",
        "Info" => "info",
        _ => attr("type")
            .filter(|t| CALLOUT_KINDS.contains(t))
            .unwrap_or("info"),
    };

    let title = attr("title")
        .filter(|t| !t.is_empty())
        .map(|t| format!(r#"<p class="callout-title">{}</p>"#, escape_html(t)))
        .unwrap_or_default();

    format!(r#"<div class="callout callout-{kind}">{title}<div class="callout-content">"#)
}

fn close_component(name: &str) -> &'static str {
    match name {
        "Steps" => "</div>",
        _ => "</div></div>",
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Raw HTML on its own, separated by blank lines so the markdown around it
/// is parsed as markdown.
fn push_block(out: &mut String, indent: &str, html: &str) {
    out.push('\n');
    out.push_str(indent);
    out.push_str(html);
    out.push_str("\n\n");
}

// ============================================================================
// Tests
// ============================================================================
