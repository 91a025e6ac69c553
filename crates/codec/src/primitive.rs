//! Loadables for booleans and numbers
//!
//! | Loadable | Type | JSON | Binary |
//! |----------|------|------|--------|
//! | [`BooleanLoadable`] | `bool` | `true`/`false` | 1 byte |
//! | [`IntLoadable`] | `i32` | integer | VarInt |
//! | [`LongLoadable`] | `i64` | integer | VarLong |
//! | [`FloatLoadable`] | `f32` | number | 4 bytes BE |
//! | [`DoubleLoadable`] | `f64` | number | 8 bytes BE |
//!
//! Ranged loadables check bounds when reading JSON, when writing JSON (an
//! out-of-range value is unserializable) and when reading binary.

use crate::loadable::Loadable;
use loadable_core::{BufferError, ByteBuf, ByteReader, Json, LoadError, LoadResult, TypedMap};

/// `bool` codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BooleanLoadable;

impl Loadable for BooleanLoadable {
    type Output = bool;

    fn from_json(&self, json: &Json, key: &str, _context: &TypedMap) -> LoadResult<bool> {
        json.as_bool()
            .ok_or_else(|| LoadError::invalid(key, "boolean", json))
    }

    fn to_json(&self, value: &bool, _key: &str) -> LoadResult<Json> {
        Ok(Json::Bool(*value))
    }

    fn from_binary(&self, buf: &mut ByteReader<'_>, _context: &TypedMap) -> LoadResult<bool> {
        Ok(buf.read_bool()?)
    }

    fn to_binary(&self, value: &bool, buf: &mut ByteBuf) {
        buf.write_bool(*value);
    }
}

/// `i32` codec with an inclusive range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntLoadable {
    min: i32,
    max: i32,
}

impl IntLoadable {
    /// Any `i32`
    pub const ANY: Self = Self::range(i32::MIN, i32::MAX);
    /// Non-negative
    pub const FROM_ZERO: Self = Self::min(0);
    /// Strictly positive
    pub const FROM_ONE: Self = Self::min(1);

    /// Values in `min..=max`
    pub const fn range(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Values of at least `min`
    pub const fn min(min: i32) -> Self {
        Self::range(min, i32::MAX)
    }

    fn contains(&self, value: i64) -> bool {
        value >= i64::from(self.min) && value <= i64::from(self.max)
    }

    fn expected(&self) -> String {
        describe_range("integer", self.min, self.max, i32::MIN, i32::MAX)
    }
}

impl Default for IntLoadable {
    fn default() -> Self {
        Self::ANY
    }
}

impl Loadable for IntLoadable {
    type Output = i32;

    fn from_json(&self, json: &Json, key: &str, _context: &TypedMap) -> LoadResult<i32> {
        match json.as_i64() {
            Some(value) if self.contains(value) => Ok(value as i32),
            _ => Err(LoadError::invalid(key, self.expected(), json)),
        }
    }

    fn to_json(&self, value: &i32, key: &str) -> LoadResult<Json> {
        if !self.contains(i64::from(*value)) {
            return Err(LoadError::unserializable(
                key,
                format!("{} is not an {}", value, self.expected()),
            ));
        }
        Ok(Json::from(*value))
    }

    fn from_binary(&self, buf: &mut ByteReader<'_>, _context: &TypedMap) -> LoadResult<i32> {
        let value = buf.read_var_int()?;
        if !self.contains(i64::from(value)) {
            return Err(BufferError::Malformed(format!(
                "{} is not an {}",
                value,
                self.expected()
            ))
            .into());
        }
        Ok(value)
    }

    /// Unchecked; the range applies on read
    fn to_binary(&self, value: &i32, buf: &mut ByteBuf) {
        buf.write_var_int(*value);
    }
}

/// `i64` codec, unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LongLoadable;

impl Loadable for LongLoadable {
    type Output = i64;

    fn from_json(&self, json: &Json, key: &str, _context: &TypedMap) -> LoadResult<i64> {
        json.as_i64()
            .ok_or_else(|| LoadError::invalid(key, "64-bit integer", json))
    }

    fn to_json(&self, value: &i64, _key: &str) -> LoadResult<Json> {
        Ok(Json::from(*value))
    }

    fn from_binary(&self, buf: &mut ByteReader<'_>, _context: &TypedMap) -> LoadResult<i64> {
        Ok(buf.read_var_long()?)
    }

    fn to_binary(&self, value: &i64, buf: &mut ByteBuf) {
        buf.write_var_long(*value);
    }
}

/// `f32` codec with an inclusive range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatLoadable {
    min: f32,
    max: f32,
}

impl FloatLoadable {
    /// Any finite `f32`
    pub const ANY: Self = Self::range(f32::MIN, f32::MAX);
    /// Non-negative
    pub const FROM_ZERO: Self = Self::min(0.0);
    /// Between 0 and 1 inclusive
    pub const PERCENT: Self = Self::range(0.0, 1.0);

    /// Values in `min..=max`
    pub const fn range(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Values of at least `min`
    pub const fn min(min: f32) -> Self {
        Self::range(min, f32::MAX)
    }

    fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn expected(&self) -> String {
        describe_range("number", self.min, self.max, f32::MIN, f32::MAX)
    }
}

impl Default for FloatLoadable {
    fn default() -> Self {
        Self::ANY
    }
}

impl Loadable for FloatLoadable {
    type Output = f32;

    fn from_json(&self, json: &Json, key: &str, _context: &TypedMap) -> LoadResult<f32> {
        match json.as_f64().map(|value| value as f32) {
            Some(value) if self.contains(value) => Ok(value),
            _ => Err(LoadError::invalid(key, self.expected(), json)),
        }
    }

    fn to_json(&self, value: &f32, key: &str) -> LoadResult<Json> {
        if !self.contains(*value) {
            return Err(LoadError::unserializable(
                key,
                format!("{} is not a {}", value, self.expected()),
            ));
        }
        // Go through the shortest decimal form so 0.1f32 stays "0.1"
        let widened = value.to_string().parse::<f64>().unwrap_or(f64::from(*value));
        finite_number(widened, key)
    }

    fn from_binary(&self, buf: &mut ByteReader<'_>, _context: &TypedMap) -> LoadResult<f32> {
        let value = buf.read_f32()?;
        if !self.contains(value) {
            return Err(BufferError::Malformed(format!(
                "{} is not a {}",
                value,
                self.expected()
            ))
            .into());
        }
        Ok(value)
    }

    /// Unchecked; the range applies on read
    fn to_binary(&self, value: &f32, buf: &mut ByteBuf) {
        buf.write_f32(*value);
    }
}

/// `f64` codec; finite values only on the JSON side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DoubleLoadable;

impl Loadable for DoubleLoadable {
    type Output = f64;

    fn from_json(&self, json: &Json, key: &str, _context: &TypedMap) -> LoadResult<f64> {
        json.as_f64()
            .ok_or_else(|| LoadError::invalid(key, "number", json))
    }

    fn to_json(&self, value: &f64, key: &str) -> LoadResult<Json> {
        finite_number(*value, key)
    }

    fn from_binary(&self, buf: &mut ByteReader<'_>, _context: &TypedMap) -> LoadResult<f64> {
        Ok(buf.read_f64()?)
    }

    fn to_binary(&self, value: &f64, buf: &mut ByteBuf) {
        buf.write_f64(*value);
    }
}

fn finite_number(value: f64, key: &str) -> LoadResult<Json> {
    serde_json::Number::from_f64(value)
        .map(Json::Number)
        .ok_or_else(|| LoadError::unserializable(key, format!("{} has no JSON form", value)))
}

fn describe_range<T: PartialEq + std::fmt::Display>(
    what: &str,
    min: T,
    max: T,
    type_min: T,
    type_max: T,
) -> String {
    match (min == type_min, max == type_max) {
        (true, true) => what.to_string(),
        (false, true) => format!("{} >= {}", what, min),
        (true, false) => format!("{} <= {}", what, max),
        (false, false) => format!("{} between {} and {}", what, min, max),
    }
}
