//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! This enables hot-reloading of `cookbook.toml` while `serve` is watching.
//!
//! # Usage
//!
//! ```ignore
//! use crate::config::cfg;
//!
//! let c = cfg();
//! build_site(&c)?;  // Arc auto-derefs to &SiteConfig
//! ```

use super::SiteConfig;
use crate::cli::Cli;
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use std::{
    fs,
    hash::{Hash, Hasher},
    sync::{
        Arc, LazyLock, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
};

// =============================================================================
// Global State
// =============================================================================

/// Global config storage, replaced with the loaded config in main.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// CLI arguments the config was loaded with, reapplied on every reload.
static CLI: OnceLock<Cli> = OnceLock::new();

/// Hash of the config file content behind the current config.
static CONFIG_HASH: AtomicU64 = AtomicU64::new(0);

// =============================================================================
// Public API
// =============================================================================

/// Get current config as `Arc<SiteConfig>`.
///
/// Lock-free read via atomic load, fine to call from rayon workers.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Load the config named by `cli` and install it as the global config.
pub fn init_config(cli: Cli) -> Result<Arc<SiteConfig>> {
    let config = SiteConfig::load(&cli)?;

    if let Ok(content) = fs::read_to_string(&config.config_path) {
        CONFIG_HASH.store(content_hash(&content), Ordering::Relaxed);
    }

    let _ = CLI.set(cli);
    let config = Arc::new(config);
    CONFIG.store(Arc::clone(&config));
    Ok(config)
}

/// Re-read `cookbook.toml` and swap it in.
///
/// Returns `false` when the file content is unchanged since the last load.
/// On a parse or validation error the previous config stays installed.
pub fn reload_config() -> Result<bool> {
    let c = cfg();
    let cli = CLI.get().context("config reloaded before init_config")?;

    let content = fs::read_to_string(&c.config_path)
        .with_context(|| format!("Failed to read {}", c.config_path.display()))?;
    let new_hash = content_hash(&content);
    if new_hash == CONFIG_HASH.load(Ordering::Relaxed) {
        return Ok(false);
    }

    let new_config = SiteConfig::load(cli)?;
    CONFIG.store(Arc::new(new_config));
    CONFIG_HASH.store(new_hash, Ordering::Relaxed);

    Ok(true)
}

fn content_hash(content: &str) -> u64 {
    let mut hasher = rustc_hash::FxHasher::default();
    content.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_stable() {
        assert_eq!(content_hash("[base]"), content_hash("[base]"));
        assert_ne!(content_hash("[base]"), content_hash("[build]"));
    }

    #[test]
    fn test_cfg_default_before_init() {
        // Other tests never call init_config, so the default stays installed.
        assert_eq!(cfg().serve.port, 5277);
    }
}
