//! Recipe header parsing.
//!
//! ```text
//! ---                      <- opening delimiter (first line)
//! title: RAG Knowledge Base
//! tags: [rag, python]      <- YAML header
//! ---                      <- closing delimiter
//! # Body markup...         <- body (kept verbatim)
//! ```
//!
//! The YAML is decoded into a loose [`RawFrontmatter`] and then checked into
//! a [`Frontmatter`] with every required field present.

use super::document::{Difficulty, Document, Frontmatter, Sdk};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

const DELIMITER: &str = "---";

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("header opened with `---` but never closed")]
    MissingDelimiter,

    #[error("invalid YAML header")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("no author given, set `author` or `authors`")]
    MissingAuthor,
}

/// Header as written; every key optional until validated.
#[derive(Debug, Default, Deserialize)]
struct RawFrontmatter {
    title: Option<String>,
    description: Option<String>,
    tags: Option<Vec<String>>,
    difficulty: Option<Difficulty>,
    author: Option<String>,
    authors: Option<Vec<String>>,
    date: Option<String>,
    sdk: Option<Sdk>,
}

/// Split the leading `---` header from the body.
///
/// Returns `None` for the header when the source does not open with a
/// delimiter line. Both `\n` and `\r\n` line endings are accepted.
pub fn split(source: &str) -> Result<(Option<&str>, &str), FrontmatterError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let (first, rest) = source.split_once('\n').unwrap_or((source, ""));
    if first.trim_end() != DELIMITER {
        return Ok((None, source));
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Ok((Some(&rest[..offset]), &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(FrontmatterError::MissingDelimiter)
}

/// Parse a whole recipe source into a [`Document`].
pub fn parse_document(slug: &str, source: &str) -> Result<Document, FrontmatterError> {
    let (header, body) = split(source)?;
    let meta = parse_header(header.unwrap_or_default())?;
    Ok(Document {
        slug: slug.to_owned(),
        meta,
        body: body.to_owned(),
    })
}

/// Decode and validate a header block (without delimiters).
pub fn parse_header(header: &str) -> Result<Frontmatter, FrontmatterError> {
    let raw: RawFrontmatter = if header.trim().is_empty() {
        RawFrontmatter::default()
    } else {
        serde_yaml::from_str(header)?
    };
    raw.validate()
}

impl RawFrontmatter {
    fn validate(self) -> Result<Frontmatter, FrontmatterError> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(FrontmatterError::MissingField("title"))?;
        let description = self
            .description
            .ok_or(FrontmatterError::MissingField("description"))?;
        let tags = self.tags.ok_or(FrontmatterError::MissingField("tags"))?;
        let difficulty = self
            .difficulty
            .ok_or(FrontmatterError::MissingField("difficulty"))?;
        let date = self.date.ok_or(FrontmatterError::MissingField("date"))?;
        let date = parse_date(&date).ok_or(FrontmatterError::InvalidDate(date))?;

        let authors = dedup(
            self.author
                .into_iter()
                .chain(self.authors.into_iter().flatten())
                .map(|a| a.trim().to_owned())
                .filter(|a| !a.is_empty()),
        );
        if authors.is_empty() {
            return Err(FrontmatterError::MissingAuthor);
        }

        Ok(Frontmatter {
            title,
            description,
            tags: dedup(tags.into_iter()),
            difficulty,
            authors,
            date,
            sdk: self.sdk,
        })
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date part kept).
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

/// Remove repeats, keeping first occurrences in order.
fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPE: &str = "---
title: Getting Started with LiveKit
description: Stream an avatar into a LiveKit room
tags: [livekit, javascript, beginner]
difficulty: beginner
author: robbie-anam
date: 2025-01-15
sdk: javascript
---

# Introduction

Hello.
";

    #[test]
    fn test_parse_document() {
        let doc = parse_document("getting-started-with-livekit", RECIPE).unwrap();

        assert_eq!(doc.slug, "getting-started-with-livekit");
        assert_eq!(doc.meta.title, "Getting Started with LiveKit");
        assert_eq!(doc.meta.tags, vec!["livekit", "javascript", "beginner"]);
        assert_eq!(doc.meta.difficulty, Difficulty::Beginner);
        assert_eq!(doc.meta.authors, vec!["robbie-anam"]);
        assert_eq!(doc.meta.date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(doc.meta.sdk, Some(Sdk::Javascript));
        assert_eq!(doc.body, "\n# Introduction\n\nHello.\n");
    }

    #[test]
    fn test_split_without_header() {
        let (header, body) = split("# Just markdown\n").unwrap();
        assert!(header.is_none());
        assert_eq!(body, "# Just markdown\n");
    }

    #[test]
    fn test_split_crlf_and_bom() {
        let source = "\u{feff}---\r\ntitle: x\r\n---\r\nbody";
        let (header, body) = split(source).unwrap();
        assert_eq!(header, Some("title: x\r\n"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_unclosed() {
        assert!(matches!(
            split("---\ntitle: x\nbody"),
            Err(FrontmatterError::MissingDelimiter)
        ));
        assert!(matches!(split("---"), Err(FrontmatterError::MissingDelimiter)));
    }

    #[test]
    fn test_empty_body_is_valid() {
        let source = "---\ntitle: T\ndescription: D\ntags: []\ndifficulty: advanced\nauthor: a\ndate: 2024-12-01\n---\n";
        let doc = parse_document("t", source).unwrap();
        assert_eq!(doc.body, "");
        assert!(doc.meta.tags.is_empty());
        assert_eq!(doc.meta.sdk, None);
    }

    #[test]
    fn test_no_header_is_missing_title() {
        let err = parse_document("plain", "# Body only").unwrap_err();
        assert!(matches!(err, FrontmatterError::MissingField("title")));
    }

    #[test]
    fn test_missing_fields() {
        let err = parse_header("title: T\ndescription: D\ndifficulty: beginner\nauthor: a\ndate: 2025-01-01").unwrap_err();
        assert!(matches!(err, FrontmatterError::MissingField("tags")));

        let err = parse_header("title: T\ndescription: D\ntags: []\nauthor: a\ndate: 2025-01-01").unwrap_err();
        assert!(matches!(err, FrontmatterError::MissingField("difficulty")));

        let err = parse_header("title: '  '\ndescription: D").unwrap_err();
        assert!(matches!(err, FrontmatterError::MissingField("title")));
    }

    #[test]
    fn test_unknown_difficulty_is_yaml_error() {
        let err = parse_header("title: T\ndescription: D\ntags: []\ndifficulty: expert\nauthor: a\ndate: 2025-01-01").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = parse_header("title: [unclosed\ndescription: D").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn test_invalid_date() {
        let err = parse_header("title: T\ndescription: D\ntags: []\ndifficulty: beginner\nauthor: a\ndate: 15/01/2025").unwrap_err();
        assert!(matches!(err, FrontmatterError::InvalidDate(ref d) if d == "15/01/2025"));
    }

    #[test]
    fn test_rfc3339_date() {
        let meta = parse_header("title: T\ndescription: D\ntags: []\ndifficulty: beginner\nauthor: a\ndate: '2025-03-02T10:00:00Z'").unwrap();
        assert_eq!(meta.date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
    }

    #[test]
    fn test_authors_merged() {
        let meta = parse_header(
            "title: T\ndescription: D\ntags: [rag, rag, tools]\ndifficulty: beginner\nauthor: a-aitken\nauthors: [robbie-anam, a-aitken, '']\ndate: 2025-01-01",
        )
        .unwrap();
        assert_eq!(meta.authors, vec!["a-aitken", "robbie-anam"]);
        assert_eq!(meta.tags, vec!["rag", "tools"]);
    }

    #[test]
    fn test_missing_author() {
        let err = parse_header("title: T\ndescription: D\ntags: []\ndifficulty: beginner\nauthors: []\ndate: 2025-01-01").unwrap_err();
        assert!(matches!(err, FrontmatterError::MissingAuthor));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let meta = parse_header("title: T\ndescription: D\ntags: []\ndifficulty: beginner\nauthor: a\ndate: 2025-01-01\nogImage: /og.png").unwrap();
        assert_eq!(meta.title, "T");
    }
}
