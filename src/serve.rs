//! Development server with live reload support.
//!
//! A lightweight HTTP server for local preview, built on `tiny_http`:
//!
//! - Static file serving from the build output directory
//! - `[base].base_path` stripped from request paths, `/` redirected to it
//! - Automatic `index.html` resolution for directories
//! - `GET <base_path>/_search?q=` answered by the search engine as JSON
//! - File watching and auto-rebuild (via `watch` module)
//! - Graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (File Monitor)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//!    Handle requests         Detect changes
//!    Serve files             Trigger rebuild
//! ```

use crate::{
    config::{SiteConfig, cfg},
    content::ContentStore,
    log,
    recipes::RecipeIndex,
    search::search,
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result, anyhow, bail};
use std::{
    fs,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

// ============================================================================
// Constants
// ============================================================================

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Search endpoint, relative to the base path.
const SEARCH_ENDPOINT: &str = "_search";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the development server with optional file watching.
///
/// Blocks until Ctrl+C is received.
pub fn serve_site() -> Result<()> {
    let c = cfg();
    let (server, addr) = try_bind_port(c.serve.ip()?, c.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}{}", addr, c.base.link(""));

    if c.serve.watch {
        std::thread::spawn(|| {
            if let Err(err) = watch_for_changes_blocking() {
                log!("watch"; "{err:#}");
            }
        });
    }

    for request in server.incoming_requests() {
        // Re-load config on each request to pick up hot-reloaded changes
        if let Err(e) = handle_request(request, &cfg()) {
            log!("serve"; "request error: {e:#}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    let last_port = base_port.saturating_add(max_retries.saturating_sub(1));
    match last_error {
        Some(e) => bail!(
            "Failed to bind after {max_retries} attempts (ports {base_port}-{last_port}): {e}"
        ),
        None => bail!("No port to bind, max_retries is 0"),
    }
}

// ============================================================================
// Routing
// ============================================================================

/// What a request resolves to.
#[derive(Debug, PartialEq, Eq)]
enum Route {
    /// A file under the output directory
    File(PathBuf),
    /// Search endpoint with the decoded query
    Search(String),
    /// Another location on the site
    Redirect(String),
    NotFound,
}

/// Resolve a raw request URL against the output directory.
///
/// Resolution order:
/// 1. Search endpoint
/// 2. Exact file match
/// 3. Directory with index.html
/// 4. Nothing found
fn resolve(url: &str, config: &SiteConfig) -> Route {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let path = urlencoding::decode(path)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    let prefix = config.base.path_prefix();
    let Some(rest) = path.strip_prefix(prefix.as_str()) else {
        return if path == "/" {
            Route::Redirect(config.base.link(""))
        } else {
            Route::NotFound
        };
    };
    if !rest.is_empty() && !rest.starts_with('/') {
        return Route::NotFound;
    }

    let request_path = rest.trim_matches('/');
    if request_path == SEARCH_ENDPOINT {
        return Route::Search(query_param(query, "q").unwrap_or_default());
    }

    if request_path.split('/').any(|seg| seg == "..") {
        return Route::NotFound;
    }

    let local_path = config.build.output.join(request_path);
    if local_path.is_file() {
        return Route::File(local_path);
    }

    let index_path = local_path.join("index.html");
    if local_path.is_dir() && index_path.is_file() {
        return Route::File(index_path);
    }

    Route::NotFound
}

/// Decoded value of `key` in a query string, with `+` read as a space.
fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (k == key).then(|| {
            let v = v.replace('+', " ");
            urlencoding::decode(&v)
                .map(std::borrow::Cow::into_owned)
                .unwrap_or(v)
        })
    })
}

/// Run the search engine over a fresh load of the store.
fn search_json(query: &str, config: &SiteConfig) -> Result<String> {
    let index = RecipeIndex::new(ContentStore::from_config(config));
    let report = index.load()?;
    let results = search(query, &report.recipes);
    Ok(serde_json::to_string(&results)?)
}

// ============================================================================
// Request Handling
// ============================================================================

fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    match resolve(request.url(), config) {
        Route::File(path) => serve_file(request, &path),
        Route::Search(query) => match search_json(&query, config) {
            Ok(json) => respond(request, 200, "application/json; charset=utf-8", json.into_bytes()),
            Err(e) => {
                log!("serve"; "search failed: {e:#}");
                respond(request, 500, "text/plain", b"500 Internal Server Error".to_vec())
            }
        },
        Route::Redirect(location) => {
            let response = Response::empty(StatusCode(302)).with_header(header("Location", &location)?);
            request.respond(response)?;
            Ok(())
        }
        Route::NotFound => serve_not_found(request, config),
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow!("invalid header `{name}: {value}`"))
}

fn respond(request: Request, status: u16, content_type: &str, body: Vec<u8>) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    respond(request, 200, guess_content_type(path), content)
}

/// Serve the built `404.html`, or plain text before the first build.
fn serve_not_found(request: Request, config: &SiteConfig) -> Result<()> {
    match fs::read(config.build.output.join("404.html")) {
        Ok(page) => respond(request, 404, "text/html; charset=utf-8", page),
        Err(_) => respond(request, 404, "text/plain", b"404 Not Found".to_vec()),
    }
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",

        // Documents
        Some("txt") => "text/plain; charset=utf-8",
        Some("md" | "mdx") => "text/markdown; charset=utf-8",

        // Default binary
        _ => "application/octet-stream",
    }
}
