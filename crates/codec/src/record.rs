//! Record engine
//!
//! A [`RecordLoadable`] combines an ordered tuple of field codecs with a
//! constructor taking one argument per field. Every operation walks the
//! fields in declaration order and stops at the first failure:
//!
//! - `deserialize`: read each field from a JSON object, then construct
//! - `serialize_into`: write each field of a record into a JSON object
//! - `decode`: read each field from a buffer, then construct
//! - `encode`: append each field of a record to a buffer
//!
//! The binary form is the plain concatenation of the field encodings,
//! with no length prefix, tag or key. Reordering fields therefore changes
//! the wire format even when the JSON form stays compatible.
//!
//! Tuples of 1 to 16 fields are supported. The tuple arity and the
//! constructor arity must match; a mismatch does not compile.
//!
//! # Example
//!
//! ```
//! use loadable_codec::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct Rect {
//!     width: i32,
//!     height: i32,
//! }
//!
//! let codec = create(
//!     (
//!         IntLoadable::ANY.required_field("width", |r: &Rect| &r.width),
//!         IntLoadable::ANY.default_field("height", 0, |r: &Rect| &r.height),
//!     ),
//!     |width: i32, height: i32| Rect { width, height },
//! );
//!
//! let mut buf = ByteBuf::new();
//! codec.encode(&Rect { width: 4, height: 7 }, &mut buf);
//! assert_eq!(buf.as_slice(), &[0x04, 0x07]);
//! ```

use crate::field::RecordField;
use crate::loadable::Loadable;
use loadable_core::{ByteBuf, ByteReader, Json, JsonObject, LoadError, LoadResult, TypedMap};
use std::fmt;
use std::marker::PhantomData;
use tracing::trace;

/// Ordered set of field codecs for records of type `R`
///
/// Implemented for tuples of [`RecordField`]s.
pub trait FieldSet<R>: Send + Sync {
    /// Tuple of the decoded field values, in declaration order
    type Values;

    /// Number of fields
    const ARITY: usize;

    /// JSON keys in declaration order
    fn keys(&self) -> Vec<&str>;

    /// Read every field from a JSON object
    fn read_json(&self, json: &JsonObject, context: &TypedMap) -> LoadResult<Self::Values>;

    /// Write every field of `record` into a JSON object
    fn write_json(&self, record: &R, json: &mut JsonObject) -> LoadResult<()>;

    /// Read every field from the buffer
    fn read_binary(&self, buf: &mut ByteReader<'_>, context: &TypedMap)
        -> LoadResult<Self::Values>;

    /// Append every field of `record` to the buffer
    fn write_binary(&self, record: &R, buf: &mut ByteBuf);
}

/// Constructor building an `R` from a tuple of field values
///
/// Implemented for every `Fn` whose parameter list matches `Args`.
pub trait Construct<Args, R>: Send + Sync {
    /// Build the record
    fn construct(&self, args: Args) -> R;
}

fn read_positioned<R, F>(
    field: &F,
    index: usize,
    buf: &mut ByteReader<'_>,
    context: &TypedMap,
) -> LoadResult<F::Value>
where
    F: RecordField<R>,
{
    field.read_binary(buf, context).map_err(|err| {
        trace!(index, key = field.key(), error = %err, "Binary field decode failed");
        err.at_field(index, field.key())
    })
}

macro_rules! impl_record_arity {
    ($arity:expr; $($index:tt => $field:ident, $value:ident, $arg:ident);+) => {
        impl<R, $($field),+> FieldSet<R> for ($($field,)+)
        where
            $($field: RecordField<R>,)+
        {
            type Values = ($(<$field as RecordField<R>>::Value,)+);

            const ARITY: usize = $arity;

            fn keys(&self) -> Vec<&str> {
                vec![$(self.$index.key()),+]
            }

            fn read_json(&self, json: &JsonObject, context: &TypedMap) -> LoadResult<Self::Values> {
                Ok(($(self.$index.read_json(json, context)?,)+))
            }

            fn write_json(&self, record: &R, json: &mut JsonObject) -> LoadResult<()> {
                $(self.$index.write_json(record, json)?;)+
                Ok(())
            }

            fn read_binary(
                &self,
                buf: &mut ByteReader<'_>,
                context: &TypedMap,
            ) -> LoadResult<Self::Values> {
                Ok(($(read_positioned::<R, $field>(&self.$index, $index, buf, context)?,)+))
            }

            fn write_binary(&self, record: &R, buf: &mut ByteBuf) {
                $(self.$index.write_binary(record, buf);)+
            }
        }

        impl<R, Func, $($value),+> Construct<($($value,)+), R> for Func
        where
            Func: Fn($($value),+) -> R + Send + Sync,
        {
            fn construct(&self, ($($arg,)+): ($($value,)+)) -> R {
                (self)($($arg),+)
            }
        }
    };
}

impl_record_arity!(1; 0 => F0, V0, v0);
impl_record_arity!(2; 0 => F0, V0, v0; 1 => F1, V1, v1);
impl_record_arity!(3; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2);
impl_record_arity!(4; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2; 3 => F3, V3, v3);
impl_record_arity!(5; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2; 3 => F3, V3, v3;
    4 => F4, V4, v4);
impl_record_arity!(6; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2; 3 => F3, V3, v3;
    4 => F4, V4, v4; 5 => F5, V5, v5);
impl_record_arity!(7; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2; 3 => F3, V3, v3;
    4 => F4, V4, v4; 5 => F5, V5, v5; 6 => F6, V6, v6);
impl_record_arity!(8; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2; 3 => F3, V3, v3;
    4 => F4, V4, v4; 5 => F5, V5, v5; 6 => F6, V6, v6; 7 => F7, V7, v7);
impl_record_arity!(9; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2; 3 => F3, V3, v3;
    4 => F4, V4, v4; 5 => F5, V5, v5; 6 => F6, V6, v6; 7 => F7, V7, v7; 8 => F8, V8, v8);
impl_record_arity!(10; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2; 3 => F3, V3, v3;
    4 => F4, V4, v4; 5 => F5, V5, v5; 6 => F6, V6, v6; 7 => F7, V7, v7; 8 => F8, V8, v8;
    9 => F9, V9, v9);
impl_record_arity!(11; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2; 3 => F3, V3, v3;
    4 => F4, V4, v4; 5 => F5, V5, v5; 6 => F6, V6, v6; 7 => F7, V7, v7; 8 => F8, V8, v8;
    9 => F9, V9, v9; 10 => F10, V10, v10);
impl_record_arity!(12; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2; 3 => F3, V3, v3;
    4 => F4, V4, v4; 5 => F5, V5, v5; 6 => F6, V6, v6; 7 => F7, V7, v7; 8 => F8, V8, v8;
    9 => F9, V9, v9; 10 => F10, V10, v10; 11 => F11, V11, v11);
impl_record_arity!(13; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2; 3 => F3, V3, v3;
    4 => F4, V4, v4; 5 => F5, V5, v5; 6 => F6, V6, v6; 7 => F7, V7, v7; 8 => F8, V8, v8;
    9 => F9, V9, v9; 10 => F10, V10, v10; 11 => F11, V11, v11; 12 => F12, V12, v12);
impl_record_arity!(14; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2; 3 => F3, V3, v3;
    4 => F4, V4, v4; 5 => F5, V5, v5; 6 => F6, V6, v6; 7 => F7, V7, v7; 8 => F8, V8, v8;
    9 => F9, V9, v9; 10 => F10, V10, v10; 11 => F11, V11, v11; 12 => F12, V12, v12;
    13 => F13, V13, v13);
impl_record_arity!(15; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2; 3 => F3, V3, v3;
    4 => F4, V4, v4; 5 => F5, V5, v5; 6 => F6, V6, v6; 7 => F7, V7, v7; 8 => F8, V8, v8;
    9 => F9, V9, v9; 10 => F10, V10, v10; 11 => F11, V11, v11; 12 => F12, V12, v12;
    13 => F13, V13, v13; 14 => F14, V14, v14);
impl_record_arity!(16; 0 => F0, V0, v0; 1 => F1, V1, v1; 2 => F2, V2, v2; 3 => F3, V3, v3;
    4 => F4, V4, v4; 5 => F5, V5, v5; 6 => F6, V6, v6; 7 => F7, V7, v7; 8 => F8, V8, v8;
    9 => F9, V9, v9; 10 => F10, V10, v10; 11 => F11, V11, v11; 12 => F12, V12, v12;
    13 => F13, V13, v13; 14 => F14, V14, v14; 15 => F15, V15, v15);

/// The four record operations, without the field and constructor types
///
/// Object safe: call sites can hold a `&dyn RecordCodec<R>`.
pub trait RecordCodec<R>: Send + Sync {
    /// Build a record from a JSON object
    fn deserialize(&self, json: &JsonObject, context: &TypedMap) -> LoadResult<R>;

    /// Write the fields of `record` into an existing JSON object
    ///
    /// Keys already present are overwritten, other keys are left alone.
    /// On failure the object may hold the fields written before the
    /// failing one.
    fn serialize_into(&self, record: &R, json: &mut JsonObject) -> LoadResult<()>;

    /// Serialize `record` into a fresh JSON object
    fn serialize(&self, record: &R) -> LoadResult<JsonObject> {
        let mut json = JsonObject::new();
        self.serialize_into(record, &mut json)?;
        Ok(json)
    }

    /// Build a record from the buffer
    fn decode(&self, buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<R>;

    /// Append `record` to the buffer
    fn encode(&self, record: &R, buf: &mut ByteBuf);

    /// Encode `record` into a new byte vector
    fn encode_to_vec(&self, record: &R) -> Vec<u8> {
        let mut buf = ByteBuf::new();
        self.encode(record, &mut buf);
        buf.into_inner()
    }

    /// JSON keys in declaration order
    fn keys(&self) -> Vec<&str>;

    /// Number of fields
    fn arity(&self) -> usize;
}

/// Record codec over a tuple of fields `F` and a constructor `C`
pub struct RecordLoadable<R, F, C> {
    fields: F,
    constructor: C,
    _record: PhantomData<fn() -> R>,
}

impl<R, F, C> RecordLoadable<R, F, C>
where
    F: FieldSet<R>,
    C: Construct<F::Values, R>,
{
    /// Combine fields and a constructor of the same arity
    pub fn new(fields: F, constructor: C) -> Self {
        Self {
            fields,
            constructor,
            _record: PhantomData,
        }
    }

    /// Number of fields
    pub fn arity(&self) -> usize {
        F::ARITY
    }

    /// The field codecs
    pub fn fields(&self) -> &F {
        &self.fields
    }
}

/// Create a record codec from a tuple of fields and a constructor
///
/// Same as [`RecordLoadable::new`].
pub fn create<R, F, C>(fields: F, constructor: C) -> RecordLoadable<R, F, C>
where
    F: FieldSet<R>,
    C: Construct<F::Values, R>,
{
    RecordLoadable::new(fields, constructor)
}

impl<R, F: FieldSet<R>, C> fmt::Debug for RecordLoadable<R, F, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordLoadable")
            .field("record", &std::any::type_name::<R>())
            .field("keys", &self.fields.keys())
            .finish()
    }
}

impl<R, F, C> RecordCodec<R> for RecordLoadable<R, F, C>
where
    F: FieldSet<R>,
    C: Construct<F::Values, R>,
{
    fn deserialize(&self, json: &JsonObject, context: &TypedMap) -> LoadResult<R> {
        let values = self.fields.read_json(json, context)?;
        Ok(self.constructor.construct(values))
    }

    fn serialize_into(&self, record: &R, json: &mut JsonObject) -> LoadResult<()> {
        self.fields.write_json(record, json)
    }

    fn decode(&self, buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<R> {
        let values = self.fields.read_binary(buf, context)?;
        Ok(self.constructor.construct(values))
    }

    fn encode(&self, record: &R, buf: &mut ByteBuf) {
        self.fields.write_binary(record, buf)
    }

    fn keys(&self) -> Vec<&str> {
        self.fields.keys()
    }

    fn arity(&self) -> usize {
        F::ARITY
    }
}

/// Prefix the key of a nested failure with the key of the enclosing field
fn nested(err: LoadError, parent: &str) -> LoadError {
    let join = |key: String| format!("{}.{}", parent, key);
    match err {
        LoadError::MissingRequiredField { key } => LoadError::MissingRequiredField { key: join(key) },
        LoadError::InvalidFieldValue {
            key,
            expected,
            actual,
        } => LoadError::InvalidFieldValue {
            key: join(key),
            expected,
            actual,
        },
        LoadError::Unserializable { key, reason } => LoadError::Unserializable {
            key: join(key),
            reason,
        },
        other => other,
    }
}

impl<R, F, C> Loadable for RecordLoadable<R, F, C>
where
    F: FieldSet<R>,
    C: Construct<F::Values, R>,
{
    type Output = R;

    fn from_json(&self, json: &Json, key: &str, context: &TypedMap) -> LoadResult<R> {
        let object = json
            .as_object()
            .ok_or_else(|| LoadError::invalid(key, "JSON object", json))?;
        self.deserialize(object, context)
            .map_err(|err| nested(err, key))
    }

    fn to_json(&self, value: &R, key: &str) -> LoadResult<Json> {
        self.serialize(value)
            .map(Json::Object)
            .map_err(|err| nested(err, key))
    }

    fn from_binary(&self, buf: &mut ByteReader<'_>, context: &TypedMap) -> LoadResult<R> {
        self.decode(buf, context)
    }

    fn to_binary(&self, value: &R, buf: &mut ByteBuf) {
        self.encode(value, buf)
    }
}
