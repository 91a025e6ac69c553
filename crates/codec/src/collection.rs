//! Lists and string-keyed maps of loadable values
//!
//! Both are length-prefixed on the wire (VarInt count). Element diagnostics
//! extend the key: `inputs[2]` for a list element, `weights.iron` for a map
//! value.

use crate::loadable::Loadable;
use loadable_core::{BufferError, ByteBuf, ByteReader, Json, JsonObject, LoadError, LoadResult, TypedMap};
use std::collections::BTreeMap;

/// `Vec<T>` codec with a minimum length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLoadable<L> {
    inner: L,
    min_size: usize,
}

impl<L: Loadable> ListLoadable<L> {
    /// Wrap an element codec
    pub fn new(inner: L, min_size: usize) -> Self {
        Self { inner, min_size }
    }

    fn expected(&self) -> String {
        if self.min_size == 0 {
            "array".to_string()
        } else {
            format!("array with at least {} elements", self.min_size)
        }
    }
}

impl<L: Loadable> Loadable for ListLoadable<L> {
    type Output = Vec<L::Output>;

    fn from_json(&self, json: &Json, key: &str, context: &TypedMap) -> LoadResult<Self::Output> {
        let items = match json.as_array() {
            Some(items) if items.len() >= self.min_size => items,
            _ => return Err(LoadError::invalid(key, self.expected(), json)),
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.inner.from_json(item, &format!("{}[{}]", key, i), context))
            .collect()
    }

    fn to_json(&self, value: &Self::Output, key: &str) -> LoadResult<Json> {
        if value.len() < self.min_size {
            return Err(LoadError::unserializable(
                key,
                format!("{} elements, expected {}", value.len(), self.expected()),
            ));
        }
        value
            .iter()
            .enumerate()
            .map(|(i, item)| self.inner.to_json(item, &format!("{}[{}]", key, i)))
            .collect::<LoadResult<Vec<_>>>()
            .map(Json::Array)
    }

    fn from_binary(&self, buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<Self::Output> {
        let len = buf.read_length()?;
        if len < self.min_size {
            return Err(BufferError::Malformed(format!(
                "{} elements, expected {}",
                len,
                self.expected()
            ))
            .into());
        }
        // The count is untrusted until the elements are actually read
        let mut items = Vec::with_capacity(len.min(buf.remaining()));
        for _ in 0..len {
            items.push(self.inner.from_binary(buf, context)?);
        }
        Ok(items)
    }

    fn to_binary(&self, value: &Self::Output, buf: &mut ByteBuf) {
        buf.write_length(value.len());
        for item in value {
            self.inner.to_binary(item, buf);
        }
    }
}

/// `BTreeMap<String, T>` codec, JSON object on the JSON side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringMapLoadable<L> {
    inner: L,
}

impl<L: Loadable> StringMapLoadable<L> {
    /// Wrap a value codec
    pub fn new(inner: L) -> Self {
        Self { inner }
    }
}

impl<L: Loadable> Loadable for StringMapLoadable<L> {
    type Output = BTreeMap<String, L::Output>;

    fn from_json(&self, json: &Json, key: &str, context: &TypedMap) -> LoadResult<Self::Output> {
        let object = json
            .as_object()
            .ok_or_else(|| LoadError::invalid(key, "JSON object", json))?;
        object
            .iter()
            .map(|(name, value)| {
                let item = self
                    .inner
                    .from_json(value, &format!("{}.{}", key, name), context)?;
                Ok((name.clone(), item))
            })
            .collect()
    }

    fn to_json(&self, value: &Self::Output, key: &str) -> LoadResult<Json> {
        let mut object = JsonObject::new();
        for (name, item) in value {
            let json = self.inner.to_json(item, &format!("{}.{}", key, name))?;
            object.insert(name.clone(), json);
        }
        Ok(Json::Object(object))
    }

    fn from_binary(&self, buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<Self::Output> {
        let len = buf.read_length()?;
        let mut map = BTreeMap::new();
        for _ in 0..len {
            let name = buf.read_utf()?;
            let item = self.inner.from_binary(buf, context)?;
            map.insert(name, item);
        }
        Ok(map)
    }

    fn to_binary(&self, value: &Self::Output, buf: &mut ByteBuf) {
        buf.write_length(value.len());
        for (name, item) in value {
            buf.write_utf(name);
            self.inner.to_binary(item, buf);
        }
    }
}
