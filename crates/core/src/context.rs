//! Parse-time context threaded through every codec read
//!
//! A [`TypedMap`] is owned by the caller and handed, unchanged, to every
//! field read of a single `deserialize` or `decode` call. Codecs never mutate
//! it. Entries are addressed by [`ContextKey`], which pairs a name with the
//! value type, so two keys with the same name but different types never
//! collide.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Typed key into a [`TypedMap`]
pub struct ContextKey<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> ContextKey<T> {
    /// Create a key; usually stored in a `const`
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    /// Name of the key, used in diagnostics
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextKey<T> {}

impl<T> fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextKey({})", self.name)
    }
}

/// Identifier of the record currently being loaded
pub const ID: ContextKey<String> = ContextKey::new("id");

type Slot = (&'static str, TypeId);

/// Heterogeneous map of context values
#[derive(Default)]
pub struct TypedMap {
    entries: HashMap<Slot, Box<dyn Any + Send + Sync>>,
}

impl TypedMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`TypedMap::insert`]
    pub fn with<T: Any + Send + Sync>(mut self, key: ContextKey<T>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the previous one under the same key
    pub fn insert<T: Any + Send + Sync>(&mut self, key: ContextKey<T>, value: T) -> Option<T> {
        self.entries
            .insert(Self::slot(&key), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Look up a value
    pub fn get<T: Any>(&self, key: ContextKey<T>) -> Option<&T> {
        self.entries
            .get(&Self::slot(&key))
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Check if a value is present
    pub fn contains<T: Any>(&self, key: ContextKey<T>) -> bool {
        self.entries.contains_key(&Self::slot(&key))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map holds nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn slot<T: Any>(key: &ContextKey<T>) -> Slot {
        (key.name, TypeId::of::<T>())
    }
}

impl fmt::Debug for TypedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.keys().map(|(name, _)| *name).collect();
        names.sort_unstable();
        f.debug_struct("TypedMap").field("keys", &names).finish()
    }
}
