//! Convenient imports for Loadable.
//!
//! ```
//! use loadable::prelude::*;
//!
//! let limits = CodecLimits::new().max_string_bytes(256);
//! let options = LoaderOptions::new().limits(limits);
//! assert!(!options.fail_fast);
//! ```

// Call-site layer
pub use crate::config::LoaderOptions;
pub use crate::error::{Error, Result};
pub use crate::loader::{ContentLoader, LoadReport};
pub use crate::sync::SyncPacket;

// Codec building blocks
pub use loadable_codec::prelude::*;
pub use loadable_codec::{ListLoadable, MappedLoadable, StringMapLoadable};

// Core types
pub use loadable_core::{CodecLimits, ContextKey};

// Re-export serde_json for convenience
pub use serde_json::json;
