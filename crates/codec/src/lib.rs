//! Record codecs for loadable content
//!
//! One ordered list of fields describes a record type once and drives
//! three representations of it: a JSON object (content files), the domain
//! value, and a compact binary message (network sync).
//!
//! ## Layers
//!
//! | Layer | Trait | Knows |
//! |-------|-------|-------|
//! | Value | [`Loadable`] | one value's JSON and binary form |
//! | Field | [`RecordField`] | a value plus its key and record accessor |
//! | Record | [`RecordCodec`] | an ordered tuple of fields plus a constructor |
//!
//! Records are also values ([`RecordLoadable`] implements [`Loadable`]), so
//! they nest inside other records, lists and maps.
//!
//! ## Built-in values
//!
//! | Loadable | Type | JSON | Binary |
//! |----------|------|------|--------|
//! | [`BooleanLoadable`] | `bool` | boolean | 1 byte |
//! | [`IntLoadable`] | `i32` | integer | VarInt |
//! | [`LongLoadable`] | `i64` | integer | VarLong |
//! | [`FloatLoadable`] | `f32` | number | 4 bytes BE |
//! | [`DoubleLoadable`] | `f64` | number | 8 bytes BE |
//! | [`StringLoadable`] | `String` | string | VarInt length + UTF-8 |
//! | [`EnumLoadable`] | [`NamedEnum`] | name | VarInt ordinal |
//! | [`ListLoadable`] | `Vec<T>` | array | VarInt count + items |
//! | [`StringMapLoadable`] | `BTreeMap<String, T>` | object | VarInt count + entries |
//!
//! Range and emptiness checks run when writing JSON and when reading either
//! form. Binary writes are infallible and unchecked: an out-of-range value
//! encodes, and decoding those bytes with the same codec fails. Write
//! through [`RecordCodec::serialize`] first when values are not trusted.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod enums;
pub mod field;
pub mod loadable;
pub mod mapped;
pub mod primitive;
pub mod record;
pub mod string;

pub use collection::{ListLoadable, StringMapLoadable};
pub use enums::{EnumLoadable, NamedEnum};
pub use field::{context_field, ContextField, DefaultField, NullableField, RecordField, RequiredField};
pub use loadable::Loadable;
pub use mapped::{Conversion, Fallible, MappedLoadable, Total};
pub use primitive::{BooleanLoadable, DoubleLoadable, FloatLoadable, IntLoadable, LongLoadable};
pub use record::{create, Construct, FieldSet, RecordCodec, RecordLoadable};
pub use string::StringLoadable;

/// Everything needed to declare and use record codecs
pub mod prelude {
    pub use crate::{
        context_field, create, BooleanLoadable, DoubleLoadable, EnumLoadable, FloatLoadable,
        IntLoadable, Loadable, LongLoadable, NamedEnum, RecordCodec, RecordField, StringLoadable,
    };
    pub use loadable_core::{ByteBuf, ByteReader, Json, JsonObject, LoadError, TypedMap, ID};
}
