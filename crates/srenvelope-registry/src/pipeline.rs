//! Message decode pipeline.
//!
//! message -> schema id (prefix) -> schema text (registry) -> payload bytes
//! (after `payload_offset`) -> record.
//!
//! Each call is a one-shot: nothing is retained between decodes except what
//! the registry itself caches.

use serde::Serialize;

use srenvelope_core::envelope::{prefix, text};
use srenvelope_core::error::{Result, SrEnvelopeError};
use srenvelope_core::schema::decode_payload;
use srenvelope_core::value::Object;

use crate::config::DecoderConfig;
use crate::resolver::{CachedSchemaRegistry, HttpSchemaRegistry, SchemaRegistry};

/// A decoded message together with the schema id it was written with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedMessage {
    pub schema_id: u32,
    pub record: Object,
}

pub struct MessageDecoder<R> {
    registry: R,
    payload_offset: usize,
}

impl<R: SchemaRegistry> MessageDecoder<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            payload_offset: text::PAYLOAD_OFFSET,
        }
    }

    /// Skip `offset` bytes (prefix included) before the payload.
    ///
    /// Offsets below the prefix length are raised to it; prefix bytes are
    /// never handed to the schema decoder.
    pub fn with_payload_offset(mut self, offset: usize) -> Self {
        self.payload_offset = offset.max(text::PAYLOAD_OFFSET);
        self
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn payload_offset(&self) -> usize {
        self.payload_offset
    }

    pub fn resolve_schema(&self, schema_id: u32) -> Result<String> {
        tracing::debug!(schema_id, "resolving schema");
        self.registry.lookup_schema_by_id(schema_id)
    }

    /// Decode a raw binary wire message.
    pub fn decode_binary(&self, message: &[u8]) -> Result<DecodedMessage> {
        let schema_id = prefix::extract_schema_id(message)?;
        let schema_text = self.resolve_schema(schema_id)?;

        let payload = message.get(self.payload_offset..).ok_or_else(|| {
            SrEnvelopeError::Framing(format!(
                "message has {} bytes, payload offset {} out of range",
                message.len(),
                self.payload_offset
            ))
        })?;

        let record = decode_payload(&schema_text, payload)?;
        Ok(DecodedMessage { schema_id, record })
    }

    /// Decode a quoted base64 message; the prefix is read after unwrapping.
    pub fn decode_text(&self, message: &str) -> Result<DecodedMessage> {
        let bytes = text::unwrap(message, 0)?;
        self.decode_binary(&bytes)
    }
}

impl MessageDecoder<Box<dyn SchemaRegistry>> {
    /// Build an HTTP-backed decoder, cached when `registry.cache` is set.
    pub fn from_config(cfg: &DecoderConfig) -> Self {
        let http = HttpSchemaRegistry::from_config(&cfg.registry);
        let registry: Box<dyn SchemaRegistry> = if cfg.registry.cache {
            Box::new(CachedSchemaRegistry::new(http))
        } else {
            Box::new(http)
        };

        tracing::info!(
            url = %cfg.registry.url,
            cache = cfg.registry.cache,
            payload_offset = cfg.decode.payload_offset,
            "schema registry configured"
        );
        MessageDecoder::new(registry).with_payload_offset(cfg.decode.payload_offset)
    }
}
