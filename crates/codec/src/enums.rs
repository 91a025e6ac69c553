//! Loadable for field-less enums
//!
//! JSON uses the variant name, binary the VarInt position of the variant in
//! [`NamedEnum::VARIANTS`]. Reordering `VARIANTS` therefore changes the wire
//! format, just like reordering record fields does.

use crate::loadable::Loadable;
use loadable_core::{BufferError, ByteBuf, ByteReader, Json, LoadError, LoadResult, TypedMap};
use std::marker::PhantomData;

/// Enum with a fixed, named set of variants
pub trait NamedEnum: Copy + PartialEq + Send + Sync + 'static {
    /// Every variant, in wire order
    const VARIANTS: &'static [Self];

    /// Name used in JSON
    fn name(&self) -> &'static str;
}

/// Codec for a [`NamedEnum`]
pub struct EnumLoadable<E> {
    _enum: PhantomData<fn() -> E>,
}

impl<E: NamedEnum> EnumLoadable<E> {
    /// Create the codec
    pub const fn new() -> Self {
        Self {
            _enum: PhantomData,
        }
    }

    fn ordinal(value: &E) -> usize {
        let ordinal = E::VARIANTS.iter().position(|variant| variant == value);
        debug_assert!(ordinal.is_some(), "variant missing from VARIANTS");
        // An unlisted variant encodes past the end and fails to decode
        ordinal.unwrap_or(E::VARIANTS.len())
    }

    fn expected() -> String {
        let names: Vec<_> = E::VARIANTS.iter().map(NamedEnum::name).collect();
        format!("one of [{}]", names.join(", "))
    }
}

impl<E: NamedEnum> Default for EnumLoadable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EnumLoadable<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EnumLoadable<E> {}

impl<E> std::fmt::Debug for EnumLoadable<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EnumLoadable<{}>", std::any::type_name::<E>())
    }
}

impl<E: NamedEnum> Loadable for EnumLoadable<E> {
    type Output = E;

    fn from_json(&self, json: &Json, key: &str, _context: &TypedMap) -> LoadResult<E> {
        json.as_str()
            .and_then(|name| E::VARIANTS.iter().find(|variant| variant.name() == name))
            .copied()
            .ok_or_else(|| LoadError::invalid(key, Self::expected(), json))
    }

    fn to_json(&self, value: &E, _key: &str) -> LoadResult<Json> {
        Ok(Json::String(value.name().to_string()))
    }

    fn from_binary(&self, buf: &mut ByteReader<'_>, _context: &TypedMap) -> LoadResult<E> {
        let ordinal = buf.read_var_int()?;
        usize::try_from(ordinal)
            .ok()
            .and_then(|index| E::VARIANTS.get(index))
            .copied()
            .ok_or_else(|| {
                BufferError::InvalidDiscriminant {
                    value: i64::from(ordinal),
                    type_name: std::any::type_name::<E>(),
                }
                .into()
            })
    }

    fn to_binary(&self, value: &E, buf: &mut ByteBuf) {
        buf.write_length(Self::ordinal(value));
    }
}
