//! Bounds applied while reading binary buffers.
//!
//! Length prefixes come from the wire, so every allocation they drive is
//! checked against these limits before it happens.

use serde::{Deserialize, Serialize};

/// Default cap on a single length-prefixed string, in bytes
///
/// 32767 UTF-16 units at up to three UTF-8 bytes each.
pub const DEFAULT_MAX_STRING_BYTES: usize = 32767 * 3;

/// Default cap on list and map element counts
pub const DEFAULT_MAX_COLLECTION_LEN: usize = 1 << 20;

/// Limits for binary decoding.
///
/// ```
/// use loadable_core::CodecLimits;
///
/// let limits = CodecLimits::new().max_string_bytes(256);
/// assert_eq!(limits.max_string_bytes, 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecLimits {
    /// Largest accepted string, in UTF-8 bytes
    pub max_string_bytes: usize,
    /// Largest accepted list or map element count
    pub max_collection_len: usize,
}

impl CodecLimits {
    /// Default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the string byte limit
    pub fn max_string_bytes(mut self, max: usize) -> Self {
        self.max_string_bytes = max;
        self
    }

    /// Set the element count limit
    pub fn max_collection_len(mut self, max: usize) -> Self {
        self.max_collection_len = max;
        self
    }
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_string_bytes: DEFAULT_MAX_STRING_BYTES,
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
        }
    }
}
