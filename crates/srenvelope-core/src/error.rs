//! Shared error type across srenvelope crates.

use thiserror::Error;

/// Stable error codes, one per pipeline stage that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Message too short to carry the 5-byte prefix.
    MalformedEnvelope,
    /// Text framing is not valid base64.
    DecodeError,
    /// Decoded framing is shorter than the requested offset.
    FramingError,
    /// Schema identifier text is not a non-negative 32-bit integer.
    InvalidIdentifier,
    /// Registry unreachable or identifier unknown.
    SchemaLookupError,
    /// Schema text does not compile.
    SchemaCompileError,
    /// Payload bytes do not conform to the schema.
    PayloadDecodeError,
    /// Decoded value is not a record.
    UnexpectedShape,
    /// Configuration could not be loaded or validated.
    ConfigError,
}

impl ErrorCode {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedEnvelope => "MALFORMED_ENVELOPE",
            ErrorCode::DecodeError => "DECODE_ERROR",
            ErrorCode::FramingError => "FRAMING_ERROR",
            ErrorCode::InvalidIdentifier => "INVALID_IDENTIFIER",
            ErrorCode::SchemaLookupError => "SCHEMA_LOOKUP_ERROR",
            ErrorCode::SchemaCompileError => "SCHEMA_COMPILE_ERROR",
            ErrorCode::PayloadDecodeError => "PAYLOAD_DECODE_ERROR",
            ErrorCode::UnexpectedShape => "UNEXPECTED_SHAPE",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SrEnvelopeError>;

/// Unified error type used by core and registry.
#[derive(Debug, Error)]
pub enum SrEnvelopeError {
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
    #[error("invalid base64: {0}")]
    Base64(String),
    #[error("framing error: {0}")]
    Framing(String),
    #[error("invalid schema identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("schema lookup failed (id={id}): {reason}")]
    SchemaLookup { id: u32, reason: String },
    #[error("schema compile failed: {0}")]
    SchemaCompile(String),
    #[error("payload decode failed: {0}")]
    PayloadDecode(String),
    #[error("unexpected shape: {0}")]
    UnexpectedShape(String),
    #[error("config: {0}")]
    Config(String),
}

impl SrEnvelopeError {
    /// Map the error to the stable code of the stage that failed.
    pub fn code(&self) -> ErrorCode {
        match self {
            SrEnvelopeError::MalformedEnvelope(_) => ErrorCode::MalformedEnvelope,
            SrEnvelopeError::Base64(_) => ErrorCode::DecodeError,
            SrEnvelopeError::Framing(_) => ErrorCode::FramingError,
            SrEnvelopeError::InvalidIdentifier(_) => ErrorCode::InvalidIdentifier,
            SrEnvelopeError::SchemaLookup { .. } => ErrorCode::SchemaLookupError,
            SrEnvelopeError::SchemaCompile(_) => ErrorCode::SchemaCompileError,
            SrEnvelopeError::PayloadDecode(_) => ErrorCode::PayloadDecodeError,
            SrEnvelopeError::UnexpectedShape(_) => ErrorCode::UnexpectedShape,
            SrEnvelopeError::Config(_) => ErrorCode::ConfigError,
        }
    }
}
