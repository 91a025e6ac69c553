//! Shared building blocks for loadable codecs
//!
//! This crate holds everything a codec touches that is not itself a codec:
//!
//! - [`ByteBuf`] / [`ByteReader`]: ordered binary writes and reads
//! - [`TypedMap`] / [`ContextKey`]: the caller-owned parse context
//! - [`LoadError`] / [`BufferError`]: the error taxonomy
//! - [`CodecLimits`]: bounds on length prefixes read from the wire
//!
//! JSON documents use [`serde_json::Value`] directly; it is re-exported
//! along with its object type so codec crates agree on one tree type.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod context;
pub mod error;
pub mod limits;

pub use buffer::{ByteBuf, ByteReader, VAR_INT_MAX_BYTES, VAR_LONG_MAX_BYTES};
pub use context::{ContextKey, TypedMap, ID};
pub use error::{BufferError, LoadError, LoadResult};
pub use limits::CodecLimits;

/// JSON tree value
pub use serde_json::Value as Json;

/// JSON object, the unit a record codec reads from and writes into
pub type JsonObject = serde_json::Map<String, Json>;
