//! File system watcher for live reload.
//!
//! Monitors the recipe directory and `cookbook.toml`. Every recipe shows up
//! on the home page, topic pages, sitemap and search index, so any relevant
//! change triggers a full rebuild.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌──────────────────────────────┐
//! │ notify   │───▶│ Debouncer │───▶│ handle_changes()             │
//! │ events   │    │ (300ms)   │    │  config → reload + rebuild   │
//! └──────────┘    └───────────┘    │  recipe → rebuild            │
//!                                  └──────────────────────────────┘
//! ```

use crate::{
    build::build_site,
    config::{SiteConfig, cfg, reload_config},
    log,
    utils::category::{FileCategory, categorize_path},
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::{Arc, mpsc},
    time::{Duration, Instant},
};

// =============================================================================
// Constants
// =============================================================================

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

const WATCH_CATEGORIES: &[FileCategory] = &[FileCategory::Content, FileCategory::Config];

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Format path as relative to root for log display.
///
/// `/proj/content/recipes/rag.mdx` → `content/recipes/rag.mdx`
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Rebuild the site with the current config. Returns true on success.
fn try_rebuild(reason: &str) -> bool {
    log!("watch"; "{reason}");

    match build_site(&cfg()) {
        Ok(_) => true,
        Err(e) => {
            log!("watch"; "build failed");
            log!("error"; "{e:#}");
            false
        }
    }
}

/// Process a debounced batch. Returns true if a rebuild succeeded.
fn handle_changes(paths: &[PathBuf]) -> bool {
    if paths.is_empty() {
        return false;
    }

    let config = cfg();
    let root = config.get_root();

    let mut config_changed = false;
    let mut recipes: Vec<&PathBuf> = Vec::new();
    for path in paths {
        match categorize_path(path, &config) {
            FileCategory::Config => config_changed = true,
            FileCategory::Content => recipes.push(path),
            FileCategory::Unknown => {}
        }
    }

    if config_changed {
        match reload_config() {
            Ok(true) => return try_rebuild("config changed, rebuilding..."),
            Ok(false) => {}
            Err(e) => {
                log!("watch"; "config not reloaded, keeping the previous one");
                log!("error"; "{e:#}");
                return false;
            }
        }
    }

    match recipes.as_slice() {
        [] => false,
        [one] => try_rebuild(&format!("{} changed, rebuilding...", rel_path(one, root))),
        many => try_rebuild(&format!("{} recipes changed, rebuilding...", many.len())),
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn watch_path(watcher: &mut impl Watcher, cat: FileCategory, config: &SiteConfig) -> Result<()> {
    if let Some(path) = cat.path(config)
        && path.exists()
    {
        let mode = if cat.is_directory() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        watcher
            .watch(&path, mode)
            .with_context(|| format!("Failed to watch {}: {}", cat.name(), path.display()))?;
        log!("watch"; "{}", rel_path(&path, config.get_root()));
    }
    Ok(())
}

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    for &cat in WATCH_CATEGORIES {
        watch_path(watcher, cat, config)?;
    }
    Ok(())
}

/// Follow a `[build].content` change picked up by a config reload.
fn rewatch_content(watcher: &mut impl Watcher, before: &SiteConfig, after: &SiteConfig) {
    if before.build.content == after.build.content {
        return;
    }
    let _ = watcher.unwatch(&before.build.content);
    if let Err(e) = watch_path(watcher, FileCategory::Content, after) {
        log!("watch"; "{e:#}");
    }
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
pub fn watch_for_changes_blocking() -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, &cfg())?;

    let mut debouncer = Debouncer::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(mpsc::RecvTimeoutError::Timeout) if debouncer.ready() => {
                let before = cfg();
                if handle_changes(&debouncer.take()) {
                    debouncer.mark_rebuild();
                }
                let after = cfg();
                if !Arc::ptr_eq(&before, &after) {
                    rewatch_content(&mut watcher, &before, &after);
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}
