//! Sync packets: many records of one type in a single binary message.
//!
//! Layout:
//!
//! ```text
//! VarInt count
//! count × ( VarInt id length, id UTF-8, record encoding )
//! ```
//!
//! Record encodings carry no length prefix, so a packet can only be read
//! with the same codec (same field order) it was written with.

use crate::config::LoaderOptions;
use crate::error::{Error, Result};
use loadable_codec::RecordCodec;
use loadable_core::{ByteBuf, ByteReader, CodecLimits, TypedMap, ID};
use std::collections::BTreeMap;
use tracing::debug;

/// Encoder and decoder for packets of `R` records.
pub struct SyncPacket<'a, R> {
    codec: &'a dyn RecordCodec<R>,
    limits: CodecLimits,
}

impl<'a, R> SyncPacket<'a, R> {
    /// Packets for `codec` with default read limits.
    pub fn new(codec: &'a dyn RecordCodec<R>) -> Self {
        Self::with_limits(codec, CodecLimits::default())
    }

    /// Packets for `codec` with explicit read limits.
    pub fn with_limits(codec: &'a dyn RecordCodec<R>, limits: CodecLimits) -> Self {
        Self { codec, limits }
    }

    /// Packets for `codec` read under the limits in `options`.
    pub fn with_options(codec: &'a dyn RecordCodec<R>, options: &LoaderOptions) -> Self {
        Self::with_limits(codec, options.limits)
    }

    /// The limits applied by [`SyncPacket::decode_packet`].
    pub fn limits(&self) -> &CodecLimits {
        &self.limits
    }

    /// Encode every record, in id order.
    pub fn encode_packet(&self, records: &BTreeMap<String, R>) -> Vec<u8> {
        let mut buf = ByteBuf::new();
        buf.write_length(records.len());
        for (id, record) in records {
            buf.write_utf(id);
            self.codec.encode(record, &mut buf);
        }
        buf.into_inner()
    }

    /// Decode a packet written by [`SyncPacket::encode_packet`].
    ///
    /// Each record is decoded with its id installed in the context under
    /// [`ID`]. The whole packet must be consumed.
    pub fn decode_packet(&self, bytes: &[u8]) -> Result<BTreeMap<String, R>> {
        let mut reader = ByteReader::with_limits(bytes, self.limits);
        let count = reader.read_length()?;
        let mut records = BTreeMap::new();

        for _ in 0..count {
            let id = reader.read_utf()?;
            let context = TypedMap::new().with(ID, id.clone());
            let record = self.codec.decode(&mut reader, &context)?;
            records.insert(id, record);
        }

        if !reader.is_exhausted() {
            return Err(Error::TrailingBytes(reader.remaining()));
        }

        debug!("Decoded sync packet: {} records, {} bytes", records.len(), bytes.len());
        Ok(records)
    }
}
