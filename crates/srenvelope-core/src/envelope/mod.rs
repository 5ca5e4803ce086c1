//! Envelope modules (binary prefix + text-safe framing).
//!
//! This module hosts both layers of the wire convention:
//! - Prefix: marker byte + big-endian u32 schema id ahead of the payload.
//! - Text: quoted base64 carrying the prefix plus any producer header bytes.
//!
//! All parsers are panic-free: short or malformed input is reported as
//! `SrEnvelopeError` instead of indexing past the end of a buffer.

pub mod prefix;
pub mod text;
