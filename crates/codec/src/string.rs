//! String loadable

use crate::loadable::Loadable;
use loadable_core::{BufferError, ByteBuf, ByteReader, Json, LoadError, LoadResult, TypedMap};

/// `String` codec: JSON string, binary length-prefixed UTF-8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringLoadable {
    allow_empty: bool,
}

impl StringLoadable {
    /// Any string
    pub const DEFAULT: Self = Self { allow_empty: true };
    /// Strings with at least one character
    pub const NON_EMPTY: Self = Self { allow_empty: false };

    fn expected(&self) -> &'static str {
        if self.allow_empty {
            "string"
        } else {
            "non-empty string"
        }
    }
}

impl Default for StringLoadable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Loadable for StringLoadable {
    type Output = String;

    fn from_json(&self, json: &Json, key: &str, _context: &TypedMap) -> LoadResult<String> {
        match json.as_str() {
            Some(s) if self.allow_empty || !s.is_empty() => Ok(s.to_string()),
            _ => Err(LoadError::invalid(key, self.expected(), json)),
        }
    }

    fn to_json(&self, value: &String, key: &str) -> LoadResult<Json> {
        if !self.allow_empty && value.is_empty() {
            return Err(LoadError::unserializable(key, "string must not be empty"));
        }
        Ok(Json::String(value.clone()))
    }

    fn from_binary(&self, buf: &mut ByteReader<'_>, _context: &TypedMap) -> LoadResult<String> {
        let value = buf.read_utf()?;
        if !self.allow_empty && value.is_empty() {
            return Err(BufferError::Malformed("empty string".to_string()).into());
        }
        Ok(value)
    }

    /// Unchecked; emptiness is rejected on read
    fn to_binary(&self, value: &String, buf: &mut ByteBuf) {
        buf.write_utf(value);
    }
}
