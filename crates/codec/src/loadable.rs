//! The value-level codec trait
//!
//! A [`Loadable`] knows how to turn one JSON value into a `T` and back, and
//! how to read and write the same `T` from a binary buffer. It does not know
//! about keys or records: the `key` passed to the JSON methods is only used
//! to build error messages.
//!
//! Records are assembled from loadables by attaching a key and an accessor,
//! which turns them into field codecs (see [`crate::field`]).

use crate::collection::{ListLoadable, StringMapLoadable};
use crate::field::{DefaultField, NullableField, RequiredField};
use crate::mapped::{Fallible, MappedLoadable, Total};
use loadable_core::{ByteBuf, ByteReader, Json, LoadResult, TypedMap};
use std::sync::Arc;

/// Bidirectional codec for a single value
pub trait Loadable: Send + Sync {
    /// The decoded type
    type Output;

    /// Decode a JSON value found under `key`
    fn from_json(&self, json: &Json, key: &str, context: &TypedMap) -> LoadResult<Self::Output>;

    /// Encode a value for storage under `key`
    fn to_json(&self, value: &Self::Output, key: &str) -> LoadResult<Json>;

    /// Decode a value from the buffer
    fn from_binary(&self, buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<Self::Output>;

    /// Append a value to the buffer
    fn to_binary(&self, value: &Self::Output, buf: &mut ByteBuf);

    /// Codec for a list of values with at least `min_size` elements
    fn list(self, min_size: usize) -> ListLoadable<Self>
    where
        Self: Sized,
    {
        ListLoadable::new(self, min_size)
    }

    /// Codec for a string-keyed map of values
    fn string_map(self) -> StringMapLoadable<Self>
    where
        Self: Sized,
    {
        StringMapLoadable::new(self)
    }

    /// Codec for a type convertible to and from this one
    fn map<T, F, G>(self, from: F, to: G) -> MappedLoadable<Self, T, Total<F>, G>
    where
        Self: Sized,
        F: Fn(Self::Output) -> T + Send + Sync,
        G: Fn(&T) -> Self::Output + Send + Sync,
    {
        MappedLoadable::new(self, Total(from), to)
    }

    /// Codec for a type that only some values of this one convert into
    ///
    /// The error string of `from` describes what was expected and ends up in
    /// [`LoadError::InvalidFieldValue`](loadable_core::LoadError::InvalidFieldValue)
    /// on the JSON path.
    fn try_map<T, F, G>(self, from: F, to: G) -> MappedLoadable<Self, T, Fallible<F>, G>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Result<T, String> + Send + Sync,
        G: Fn(&T) -> Self::Output + Send + Sync,
    {
        MappedLoadable::new(self, Fallible(from), to)
    }

    /// Field that must be present in JSON
    fn required_field<R, G>(self, key: impl Into<String>, getter: G) -> RequiredField<Self, R, G>
    where
        Self: Sized,
        G: Fn(&R) -> &Self::Output + Send + Sync,
    {
        RequiredField::new(key, self, getter)
    }

    /// Field that falls back to `default` when absent, and is omitted from
    /// JSON when equal to it
    fn default_field<R, G>(
        self,
        key: impl Into<String>,
        default: Self::Output,
        getter: G,
    ) -> DefaultField<Self, R, G>
    where
        Self: Sized,
        G: Fn(&R) -> &Self::Output + Send + Sync,
    {
        DefaultField::new(key, self, default, false, getter)
    }

    /// Like [`Loadable::default_field`], but always written to JSON
    fn default_field_always<R, G>(
        self,
        key: impl Into<String>,
        default: Self::Output,
        getter: G,
    ) -> DefaultField<Self, R, G>
    where
        Self: Sized,
        G: Fn(&R) -> &Self::Output + Send + Sync,
    {
        DefaultField::new(key, self, default, true, getter)
    }

    /// Optional field: absent or `null` reads as `None`, `None` is omitted
    fn nullable_field<R, G>(self, key: impl Into<String>, getter: G) -> NullableField<Self, R, G>
    where
        Self: Sized,
        G: Fn(&R) -> &Option<Self::Output> + Send + Sync,
    {
        NullableField::new(key, self, getter)
    }
}

impl<L: Loadable + ?Sized> Loadable for &L {
    type Output = L::Output;

    fn from_json(&self, json: &Json, key: &str, context: &TypedMap) -> LoadResult<Self::Output> {
        (**self).from_json(json, key, context)
    }

    fn to_json(&self, value: &Self::Output, key: &str) -> LoadResult<Json> {
        (**self).to_json(value, key)
    }

    fn from_binary(&self, buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<Self::Output> {
        (**self).from_binary(buf, context)
    }

    fn to_binary(&self, value: &Self::Output, buf: &mut ByteBuf) {
        (**self).to_binary(value, buf)
    }
}

impl<L: Loadable + ?Sized> Loadable for Arc<L> {
    type Output = L::Output;

    fn from_json(&self, json: &Json, key: &str, context: &TypedMap) -> LoadResult<Self::Output> {
        (**self).from_json(json, key, context)
    }

    fn to_json(&self, value: &Self::Output, key: &str) -> LoadResult<Json> {
        (**self).to_json(value, key)
    }

    fn from_binary(&self, buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<Self::Output> {
        (**self).from_binary(buf, context)
    }

    fn to_binary(&self, value: &Self::Output, buf: &mut ByteBuf) {
        (**self).to_binary(value, buf)
    }
}
