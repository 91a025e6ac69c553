//! Error taxonomy for loadable codecs
//!
//! Two layers:
//!
//! - [`BufferError`]: raw failures of the binary buffer (underrun, bad
//!   discriminant, oversized length). These carry no field information.
//! - [`LoadError`]: field-level failures surfaced by every codec operation.
//!   JSON failures name the offending key. Binary failures are positional:
//!   the record engine turns an unpositioned [`LoadError::Buffer`] into
//!   [`LoadError::BinaryDecodeFailure`] carrying the index and key of the
//!   field that was being read.
//!
//! All operations are fail-fast: the first error aborts the whole record
//! operation and is returned unchanged to the caller.

use serde_json::Value;
use thiserror::Error;

/// Failures of the binary buffer itself
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Fewer bytes remain than the read requires
    #[error("buffer underrun: needed {needed} bytes, {remaining} remaining")]
    Underrun {
        /// Bytes requested by the read
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// A variable-length integer did not terminate in time
    #[error("variable-length integer longer than {max_bytes} bytes")]
    VarIntTooLong {
        /// Maximum encoded width for the integer type
        max_bytes: usize,
    },

    /// A length-prefixed string was not valid UTF-8
    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    /// An encoded discriminant does not name any variant
    #[error("invalid {type_name} discriminant: {value}")]
    InvalidDiscriminant {
        /// The discriminant read from the buffer
        value: i64,
        /// Name of the sum type being decoded
        type_name: &'static str,
    },

    /// A length prefix is negative or exceeds the configured limit
    #[error("length {length} out of bounds (max {max})")]
    LengthOutOfBounds {
        /// Length read from the buffer
        length: i64,
        /// Largest accepted length
        max: usize,
    },

    /// The bytes decoded but do not form a valid value
    #[error("malformed value: {0}")]
    Malformed(String),
}

/// Field-level codec failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A mandatory key is absent from the JSON object
    #[error("missing required field '{key}'")]
    MissingRequiredField {
        /// The absent key
        key: String,
    },

    /// The JSON value at `key` cannot be decoded as the field's type
    #[error("invalid value for field '{key}': expected {expected}, got {actual}")]
    InvalidFieldValue {
        /// Key of the offending value (nested keys use `a.b` / `a[0]`)
        key: String,
        /// Human readable description of the accepted values
        expected: String,
        /// The offending JSON, rendered compactly
        actual: String,
    },

    /// Reading field number `index` from a binary buffer failed
    #[error("failed to decode field {index} ('{key}'): {source}")]
    BinaryDecodeFailure {
        /// Zero-based position of the field in declaration order
        ///
        /// Counts every declared field, including context fields that
        /// occupy no bytes, so it is not a position on the wire.
        index: usize,
        /// Key of the field, for diagnostics only
        key: String,
        /// Underlying buffer failure
        #[source]
        source: BufferError,
    },

    /// A context field found nothing under its key
    #[error("missing context value '{key}'")]
    MissingContext {
        /// Name of the context key
        key: &'static str,
    },

    /// A value cannot be represented in JSON (out of range, non-finite)
    #[error("cannot serialize field '{key}': {reason}")]
    Unserializable {
        /// Key of the offending value
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Unpositioned buffer failure, before the record engine attaches a field
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Result type for codec operations
pub type LoadResult<T> = std::result::Result<T, LoadError>;

impl LoadError {
    /// Missing mandatory key
    pub fn missing(key: impl Into<String>) -> Self {
        LoadError::MissingRequiredField { key: key.into() }
    }

    /// Wrong JSON shape or value for `key`
    pub fn invalid(key: impl Into<String>, expected: impl Into<String>, actual: &Value) -> Self {
        LoadError::InvalidFieldValue {
            key: key.into(),
            expected: expected.into(),
            actual: actual.to_string(),
        }
    }

    /// Value rejected on the serialize path
    pub fn unserializable(key: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::Unserializable {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Attach a binary field position to an unpositioned buffer error
    ///
    /// Errors that already carry a position (from a nested record) and
    /// non-buffer errors are returned unchanged, so the innermost failing
    /// field is the one reported.
    pub fn at_field(self, index: usize, key: &str) -> Self {
        match self {
            LoadError::Buffer(source) => LoadError::BinaryDecodeFailure {
                index,
                key: key.to_string(),
                source,
            },
            other => other,
        }
    }

    /// Check if this is a missing-field error
    pub fn is_missing_field(&self) -> bool {
        matches!(self, LoadError::MissingRequiredField { .. })
    }

    /// Check if this error came from the binary path
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            LoadError::BinaryDecodeFailure { .. } | LoadError::Buffer(_)
        )
    }

    /// Key the error refers to, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            LoadError::MissingRequiredField { key }
            | LoadError::InvalidFieldValue { key, .. }
            | LoadError::BinaryDecodeFailure { key, .. }
            | LoadError::Unserializable { key, .. } => Some(key),
            LoadError::MissingContext { key } => Some(key),
            LoadError::Buffer(_) => None,
        }
    }
}
