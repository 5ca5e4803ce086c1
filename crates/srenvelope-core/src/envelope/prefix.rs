//! Schema-registry prefix codec (panic-free).
//!
//! Layout:
//! - byte 0: marker (written as `0x00`, never validated on read)
//! - bytes 1..5: schema id, big-endian u32
//! - bytes 5..: schema-encoded payload

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, SrEnvelopeError};

/// Marker byte written by the encoder.
pub const MAGIC_BYTE: u8 = 0x00;

/// Marker byte plus the u32 schema id.
pub const PREFIX_LEN: usize = 5;

/// Build the 5-byte prefix for `schema_id`. Payload bytes are appended by the caller.
pub fn encode_prefix(schema_id: u32) -> [u8; PREFIX_LEN] {
    let id = schema_id.to_be_bytes();
    [MAGIC_BYTE, id[0], id[1], id[2], id[3]]
}

/// Build a complete wire message: prefix followed by `payload`.
pub fn encode_message(schema_id: u32, payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(PREFIX_LEN + payload.len());
    buf.put_u8(MAGIC_BYTE);
    buf.put_u32(schema_id);
    buf.put_slice(payload);
    buf.freeze()
}

/// Read the schema id carried at bytes 1..5 of `message`.
///
/// The marker byte is skipped without inspection.
pub fn extract_schema_id(message: &[u8]) -> Result<u32> {
    split_message(message).map(|(id, _)| id)
}

/// Split `message` into its schema id and the payload following the prefix.
pub fn split_message(message: &[u8]) -> Result<(u32, &[u8])> {
    let mut buf = message;
    if buf.remaining() < PREFIX_LEN {
        return Err(SrEnvelopeError::MalformedEnvelope(format!(
            "need {PREFIX_LEN} bytes, got {}",
            buf.remaining()
        )));
    }

    let _marker = buf.get_u8();
    let schema_id = buf.get_u32();
    Ok((schema_id, buf))
}
