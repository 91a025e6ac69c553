//! Loadables derived from another loadable by a conversion
//!
//! Built with [`Loadable::map`] (total conversion) or [`Loadable::try_map`]
//! (conversion that may reject a value). The JSON and binary forms are those
//! of the wrapped loadable.

use crate::loadable::Loadable;
use loadable_core::{BufferError, ByteBuf, ByteReader, Json, LoadError, LoadResult, TypedMap};
use std::fmt;
use std::marker::PhantomData;

/// Conversion from the wrapped loadable's output into `T`
pub trait Conversion<A, T>: Send + Sync {
    /// Convert, or describe what was expected
    fn apply(&self, value: A) -> Result<T, String>;
}

/// Conversion that always succeeds
#[derive(Clone, Copy)]
pub struct Total<F>(pub F);

/// Conversion that may reject its input
#[derive(Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<A, T, F> Conversion<A, T> for Total<F>
where
    F: Fn(A) -> T + Send + Sync,
{
    fn apply(&self, value: A) -> Result<T, String> {
        Ok((self.0)(value))
    }
}

impl<A, T, F> Conversion<A, T> for Fallible<F>
where
    F: Fn(A) -> Result<T, String> + Send + Sync,
{
    fn apply(&self, value: A) -> Result<T, String> {
        (self.0)(value)
    }
}

/// Loadable for `T`, stored as the output of `L`
pub struct MappedLoadable<L, T, F, G> {
    inner: L,
    from: F,
    to: G,
    _output: PhantomData<fn() -> T>,
}

impl<L, T, F, G> MappedLoadable<L, T, F, G> {
    /// Wrap `inner` with conversions in both directions
    pub fn new(inner: L, from: F, to: G) -> Self {
        Self {
            inner,
            from,
            to,
            _output: PhantomData,
        }
    }
}

impl<L: fmt::Debug, T, F, G> fmt::Debug for MappedLoadable<L, T, F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedLoadable")
            .field("inner", &self.inner)
            .field("output", &std::any::type_name::<T>())
            .finish()
    }
}

impl<L, T, F, G> Loadable for MappedLoadable<L, T, F, G>
where
    L: Loadable,
    F: Conversion<L::Output, T>,
    G: Fn(&T) -> L::Output + Send + Sync,
{
    type Output = T;

    fn from_json(&self, json: &Json, key: &str, context: &TypedMap) -> LoadResult<T> {
        let raw = self.inner.from_json(json, key, context)?;
        self.from
            .apply(raw)
            .map_err(|expected| LoadError::invalid(key, expected, json))
    }

    fn to_json(&self, value: &T, key: &str) -> LoadResult<Json> {
        self.inner.to_json(&(self.to)(value), key)
    }

    fn from_binary(&self, buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<T> {
        let raw = self.inner.from_binary(buf, context)?;
        self.from
            .apply(raw)
            .map_err(|expected| BufferError::Malformed(format!("expected {}", expected)).into())
    }

    fn to_binary(&self, value: &T, buf: &mut ByteBuf) {
        self.inner.to_binary(&(self.to)(value), buf)
    }
}
