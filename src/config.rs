//! Loader configuration.
//!
//! Options can be built in code or read from TOML:
//!
//! ```toml
//! fail_fast = false
//!
//! [limits]
//! max_string_bytes = 98301
//! max_collection_len = 1048576
//! ```
//!
//! Every key is optional; missing keys keep their default.

use crate::error::Result;
use loadable_core::CodecLimits;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for [`ContentLoader`](crate::ContentLoader) and packet decoding.
///
/// `limits` reaches packet decoding through
/// [`SyncPacket::with_options`](crate::SyncPacket::with_options) or
/// [`ContentLoader::sync_packet`](crate::ContentLoader::sync_packet).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderOptions {
    /// Stop a batch load at the first failing record
    pub fail_fast: bool,

    /// Bounds on binary reads
    pub limits: CodecLimits,
}

impl LoaderOptions {
    /// Default options: collect every failure, default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop batch loads at the first failure.
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Replace the binary read limits.
    pub fn limits(mut self, limits: CodecLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Parse options from a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(toml::from_str(toml)?)
    }

    /// Read options from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
