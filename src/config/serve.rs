//! `[serve]` section configuration.
//!
//! Local preview server settings.

use super::defaults;
use anyhow::{Context, Result};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// `[serve]` section in cookbook.toml.
///
/// # Example
/// ```toml
/// [serve]
/// interface = "0.0.0.0"  # Listen on all interfaces
/// port = 3000
/// watch = true           # Rebuild when recipes or config change
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Network interface to bind (`127.0.0.1` by default).
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// First port to try; the server walks upward when it is taken.
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Rebuild on recipe or config changes.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub watch: bool,
}

impl ServeConfig {
    /// Parsed bind interface.
    pub fn ip(&self) -> Result<IpAddr> {
        self.interface
            .parse()
            .with_context(|| format!("invalid [serve.interface] `{}`", self.interface))
    }
}
