//! Unified error type for the loadable facade.
//!
//! Wraps the codec's field-level errors together with the failures that
//! happen around a codec call: malformed JSON text, a document that is not
//! an object, bad configuration, unreadable files.

use loadable_core::{BufferError, LoadError};
use thiserror::Error;

/// All loadable errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A record failed to load, serialize or decode
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Text is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an object
    #[error("expected a JSON object, got {actual}")]
    NotAnObject {
        /// Kind of JSON value found instead
        actual: &'static str,
    },

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bytes remain after the last record of a packet
    #[error("{0} trailing bytes after packet")]
    TrailingBytes(usize),
}

/// Result type for loadable operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<BufferError> for Error {
    fn from(e: BufferError) -> Self {
        Error::Load(LoadError::Buffer(e))
    }
}

impl Error {
    /// Check if this is a missing-field error.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Error::Load(e) if e.is_missing_field())
    }

    /// Check if this error came from decoding binary data.
    pub fn is_binary(&self) -> bool {
        matches!(self, Error::Load(e) if e.is_binary()) || matches!(self, Error::TrailingBytes(_))
    }

    /// The field-level error, if this is one.
    pub fn as_load_error(&self) -> Option<&LoadError> {
        match self {
            Error::Load(e) => Some(e),
            _ => None,
        }
    }
}
