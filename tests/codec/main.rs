//! Record Codec Integration Tests
//!
//! End-to-end behaviour of record codecs through the public facade:
//! JSON and binary round-trips for every supported arity, default
//! handling, field order on the wire, nested values, and the content
//! loader and sync packets built on top.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test codec
//!
//! # Arity suite only
//! cargo test --test codec arity::
//! ```

pub use loadable::prelude::*;
pub use loadable::{BufferError, LoadError};
pub use proptest::prelude::*;

pub mod loader;
pub mod ordering;
pub mod values;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Two-field record with a defaulted second field
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// `width` required, `height` defaulting to 0
pub fn rect_codec() -> impl RecordCodec<Rect> + Loadable<Output = Rect> {
    create(
        (
            IntLoadable::ANY.required_field("width", |r: &Rect| &r.width),
            IntLoadable::ANY.default_field("height", 0, |r: &Rect| &r.height),
        ),
        Rect::new,
    )
}

/// Unwrap a `json!` literal that must be an object
pub fn object(value: Json) -> JsonObject {
    match value {
        Json::Object(map) => map,
        other => panic!("Expected JSON object, got {}", other),
    }
}

/// Route log output through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
