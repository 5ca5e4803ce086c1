//! Schema compilation and payload decoding.
//!
//! Schema text is Avro JSON. Payload bytes are a single Avro binary datum
//! written with that schema; decoding maps it onto the generic [`Value`].
//!
//! [`Value`]: crate::value::Value

pub mod decoder;

pub use decoder::{decode, decode_payload, CompiledSchema};
