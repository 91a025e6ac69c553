//! # Loadable
//!
//! Declarative record codecs: describe a record type once, as an ordered
//! list of fields, and get its JSON form (content files) and its binary
//! form (network sync) from the same description.
//!
//! ## Quick Start
//!
//! ```
//! use loadable::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct Rect {
//!     width: i32,
//!     height: i32,
//! }
//!
//! let codec = create(
//!     (
//!         IntLoadable::ANY.required_field("width", |r: &Rect| &r.width),
//!         IntLoadable::ANY.default_field("height", 0, |r: &Rect| &r.height),
//!     ),
//!     |width: i32, height: i32| Rect { width, height },
//! );
//!
//! // JSON: absent defaults are filled in, and left out again on save
//! let loader = ContentLoader::new(&codec);
//! let rect = loader.load("square", r#"{"width": 4}"#)?;
//! assert_eq!(rect, Rect { width: 4, height: 0 });
//!
//! // Binary: fields in declaration order, nothing else
//! let bytes = codec.encode_to_vec(&Rect { width: 4, height: 7 });
//! assert_eq!(bytes, [0x04, 0x07]);
//! # Ok::<(), loadable::Error>(())
//! ```
//!
//! ## Crates
//!
//! - `loadable-core`: binary buffer, parse context, error taxonomy, limits
//! - `loadable-codec`: value codecs, field codecs, the record engine
//!
//! This crate re-exports both and adds the call-site layer: [`ContentLoader`]
//! for JSON content, [`SyncPacket`] for shipping loaded records, and
//! [`LoaderOptions`] to configure them.

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod sync;

pub mod prelude;

pub use config::LoaderOptions;
pub use error::{Error, Result};
pub use loader::{ContentLoader, LoadReport};
pub use sync::SyncPacket;

pub use loadable_codec::*;
pub use loadable_core::{
    BufferError, ByteBuf, ByteReader, CodecLimits, ContextKey, Json, JsonObject, LoadError,
    LoadResult, TypedMap, ID,
};
