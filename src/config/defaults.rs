//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn base_path() -> String {
        "".into()
    }

    pub fn language() -> String {
        "en-US".into()
    }

    pub fn repository() -> Option<String> {
        None
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content/recipes".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn extension() -> String {
        "mdx".into()
    }

    pub mod highlight {
        pub fn theme() -> String {
            crate::highlight::DEFAULT_THEME.into()
        }
    }

    pub mod rss {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "feed.xml".into()
        }
    }

    pub mod sitemap {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "sitemap.xml".into()
        }
    }

    pub mod search {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "search.json".into()
        }
    }
}

// ============================================================================
// [catalog] Section Defaults
// ============================================================================

pub mod catalog {
    pub fn hidden_tags() -> Vec<String> {
        vec!["intermediate".into(), "advanced".into()]
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
