//! Field codecs: a value codec bound to a JSON key and a record accessor
//!
//! | Field | JSON read | JSON write | Binary |
//! |-------|-----------|------------|--------|
//! | [`RequiredField`] | mandatory | always | value |
//! | [`DefaultField`] | absent → default | omitted when default (unless always) | value |
//! | [`NullableField`] | absent/`null` → `None` | omitted when `None` | presence flag + value |
//! | [`ContextField`] | from context | nothing | nothing |
//!
//! Binary never carries keys. Keys only exist for JSON and for error
//! messages.

use crate::loadable::Loadable;
use loadable_core::{
    ByteBuf, ByteReader, ContextKey, Json, JsonObject, LoadError, LoadResult, TypedMap,
};
use std::fmt;
use std::marker::PhantomData;

/// One named component of a record of type `R`
pub trait RecordField<R>: Send + Sync {
    /// Value handed to the record constructor
    type Value;

    /// JSON key
    fn key(&self) -> &str;

    /// Read this field from a JSON object
    fn read_json(&self, json: &JsonObject, context: &TypedMap) -> LoadResult<Self::Value>;

    /// Write this field of `record` into `json`
    fn write_json(&self, record: &R, json: &mut JsonObject) -> LoadResult<()>;

    /// Read this field from the buffer
    fn read_binary(&self, buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<Self::Value>;

    /// Append this field of `record` to the buffer
    fn write_binary(&self, record: &R, buf: &mut ByteBuf);
}

/// Field that must be present in JSON
pub struct RequiredField<L, R, G> {
    key: String,
    loadable: L,
    getter: G,
    _record: PhantomData<fn(&R)>,
}

impl<L, R, G> RequiredField<L, R, G> {
    /// Bind `loadable` to `key`, reading the value out of a record with `getter`
    pub fn new(key: impl Into<String>, loadable: L, getter: G) -> Self {
        Self {
            key: key.into(),
            loadable,
            getter,
            _record: PhantomData,
        }
    }
}

impl<L: fmt::Debug, R, G> fmt::Debug for RequiredField<L, R, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequiredField")
            .field("key", &self.key)
            .field("loadable", &self.loadable)
            .finish()
    }
}

impl<L, R, G> RecordField<R> for RequiredField<L, R, G>
where
    L: Loadable,
    G: Fn(&R) -> &L::Output + Send + Sync,
{
    type Value = L::Output;

    fn key(&self) -> &str {
        &self.key
    }

    fn read_json(&self, json: &JsonObject, context: &TypedMap) -> LoadResult<L::Output> {
        match json.get(&self.key) {
            Some(value) => self.loadable.from_json(value, &self.key, context),
            None => Err(LoadError::missing(&self.key)),
        }
    }

    fn write_json(&self, record: &R, json: &mut JsonObject) -> LoadResult<()> {
        let value = self.loadable.to_json((self.getter)(record), &self.key)?;
        json.insert(self.key.clone(), value);
        Ok(())
    }

    fn read_binary(&self, buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<L::Output> {
        self.loadable.from_binary(buf, context)
    }

    fn write_binary(&self, record: &R, buf: &mut ByteBuf) {
        self.loadable.to_binary((self.getter)(record), buf)
    }
}

/// Field with a fallback value for absent JSON keys
pub struct DefaultField<L: Loadable, R, G> {
    key: String,
    loadable: L,
    default: L::Output,
    always_write: bool,
    getter: G,
    _record: PhantomData<fn(&R)>,
}

impl<L: Loadable, R, G> DefaultField<L, R, G> {
    /// Bind `loadable` to `key` with a default
    ///
    /// With `always_write` unset, values equal to `default` are left out
    /// of the JSON output.
    pub fn new(
        key: impl Into<String>,
        loadable: L,
        default: L::Output,
        always_write: bool,
        getter: G,
    ) -> Self {
        Self {
            key: key.into(),
            loadable,
            default,
            always_write,
            getter,
            _record: PhantomData,
        }
    }

    /// The fallback value
    pub fn default_value(&self) -> &L::Output {
        &self.default
    }
}

impl<L, R, G> fmt::Debug for DefaultField<L, R, G>
where
    L: Loadable + fmt::Debug,
    L::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultField")
            .field("key", &self.key)
            .field("loadable", &self.loadable)
            .field("default", &self.default)
            .field("always_write", &self.always_write)
            .finish()
    }
}

impl<L, R, G> RecordField<R> for DefaultField<L, R, G>
where
    L: Loadable,
    L::Output: Clone + PartialEq + Send + Sync,
    G: Fn(&R) -> &L::Output + Send + Sync,
{
    type Value = L::Output;

    fn key(&self) -> &str {
        &self.key
    }

    fn read_json(&self, json: &JsonObject, context: &TypedMap) -> LoadResult<L::Output> {
        match json.get(&self.key) {
            Some(value) => self.loadable.from_json(value, &self.key, context),
            None => Ok(self.default.clone()),
        }
    }

    fn write_json(&self, record: &R, json: &mut JsonObject) -> LoadResult<()> {
        let value = (self.getter)(record);
        if !self.always_write && *value == self.default {
            return Ok(());
        }
        let value = self.loadable.to_json(value, &self.key)?;
        json.insert(self.key.clone(), value);
        Ok(())
    }

    fn read_binary(&self, buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<L::Output> {
        self.loadable.from_binary(buf, context)
    }

    fn write_binary(&self, record: &R, buf: &mut ByteBuf) {
        self.loadable.to_binary((self.getter)(record), buf)
    }
}

/// Optional field, `Option<T>` on the record
pub struct NullableField<L, R, G> {
    key: String,
    loadable: L,
    getter: G,
    _record: PhantomData<fn(&R)>,
}

impl<L, R, G> NullableField<L, R, G> {
    /// Bind `loadable` to `key` as an optional value
    pub fn new(key: impl Into<String>, loadable: L, getter: G) -> Self {
        Self {
            key: key.into(),
            loadable,
            getter,
            _record: PhantomData,
        }
    }
}

impl<L: fmt::Debug, R, G> fmt::Debug for NullableField<L, R, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullableField")
            .field("key", &self.key)
            .field("loadable", &self.loadable)
            .finish()
    }
}

impl<L, R, G> RecordField<R> for NullableField<L, R, G>
where
    L: Loadable,
    G: Fn(&R) -> &Option<L::Output> + Send + Sync,
{
    type Value = Option<L::Output>;

    fn key(&self) -> &str {
        &self.key
    }

    fn read_json(&self, json: &JsonObject, context: &TypedMap) -> LoadResult<Self::Value> {
        match json.get(&self.key) {
            None | Some(Json::Null) => Ok(None),
            Some(value) => self.loadable.from_json(value, &self.key, context).map(Some),
        }
    }

    fn write_json(&self, record: &R, json: &mut JsonObject) -> LoadResult<()> {
        if let Some(value) = (self.getter)(record) {
            let value = self.loadable.to_json(value, &self.key)?;
            json.insert(self.key.clone(), value);
        }
        Ok(())
    }

    fn read_binary(&self, buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<Self::Value> {
        if buf.read_bool()? {
            self.loadable.from_binary(buf, context).map(Some)
        } else {
            Ok(None)
        }
    }

    fn write_binary(&self, record: &R, buf: &mut ByteBuf) {
        match (self.getter)(record) {
            Some(value) => {
                buf.write_bool(true);
                self.loadable.to_binary(value, buf);
            }
            None => buf.write_bool(false),
        }
    }
}

/// Field filled from the context instead of the serialized data
///
/// Typically used to hand the record its own id (see
/// [`ID`](loadable_core::ID)). Nothing is written for it in either
/// format, so it does not occupy a position in the binary layout.
pub struct ContextField<T> {
    key: ContextKey<T>,
}

/// Field reading `key` from the context
pub const fn context_field<T>(key: ContextKey<T>) -> ContextField<T> {
    ContextField { key }
}

impl<T> Clone for ContextField<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextField<T> {}

impl<T> fmt::Debug for ContextField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextField").field(&self.key.name()).finish()
    }
}

impl<T> ContextField<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn lookup(&self, context: &TypedMap) -> LoadResult<T> {
        context
            .get(self.key)
            .cloned()
            .ok_or(LoadError::MissingContext {
                key: self.key.name(),
            })
    }
}

impl<R, T> RecordField<R> for ContextField<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Value = T;

    fn key(&self) -> &str {
        self.key.name()
    }

    fn read_json(&self, _json: &JsonObject, context: &TypedMap) -> LoadResult<T> {
        self.lookup(context)
    }

    fn write_json(&self, _record: &R, _json: &mut JsonObject) -> LoadResult<()> {
        Ok(())
    }

    fn read_binary(&self, _buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<T> {
        self.lookup(context)
    }

    fn write_binary(&self, _record: &R, _buf: &mut ByteBuf) {}
}
