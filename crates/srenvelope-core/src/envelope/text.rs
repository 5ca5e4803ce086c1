//! Text-safe framing (quoted base64).
//!
//! Producers may ship the wire message pre-serialized inside a JSON string and
//! may prepend extra header bytes before the payload. Unwrapping strips the
//! quotes, decodes standard padded base64, and drops the first `offset` bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Result, SrEnvelopeError};
use crate::envelope::prefix::PREFIX_LEN;

/// Bytes dropped by [`unwrap_default`]: the 5-byte prefix plus 2 producer header bytes.
pub const DEFAULT_FRAMING_OFFSET: usize = 7;

/// Offset used when the schema was already resolved from the prefix.
pub const PAYLOAD_OFFSET: usize = PREFIX_LEN;

/// Remove every literal `"` from `text`.
pub fn strip_quotes(text: &str) -> String {
    text.replace('"', "")
}

/// Decode quoted base64 `text` and return the bytes after the first `offset`.
pub fn unwrap(text: &str, offset: usize) -> Result<Vec<u8>> {
    let cleaned = strip_quotes(text);
    let mut decoded = STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| SrEnvelopeError::Base64(e.to_string()))?;

    if decoded.len() < offset {
        return Err(SrEnvelopeError::Framing(format!(
            "decoded {} bytes, offset {offset} out of range",
            decoded.len()
        )));
    }

    decoded.drain(..offset);
    Ok(decoded)
}

/// [`unwrap`] with [`DEFAULT_FRAMING_OFFSET`].
pub fn unwrap_default(text: &str) -> Result<Vec<u8>> {
    unwrap(text, DEFAULT_FRAMING_OFFSET)
}

/// Encode `bytes` as standard padded base64 (no quotes).
pub fn wrap(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_offset_drops_seven_bytes() {
        let bytes: Vec<u8> = (0u8..20).collect();
        let out = unwrap_default(&wrap(&bytes)).unwrap();
        assert_eq!(out, &bytes[7..]);
    }

    #[test]
    fn quotes_are_stripped_anywhere() {
        let text = format!("\"{}\"", wrap(b"0123456789"));
        assert_eq!(unwrap(&text, 0).unwrap(), b"0123456789");
        assert_eq!(unwrap("\"QU\"JD\"", 1).unwrap(), b"BC");
    }

    #[test]
    fn offset_equal_to_length_yields_empty() {
        let out = unwrap(&wrap(&[1, 2, 3]), 3).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn short_framing_fails() {
        let err = unwrap_default(&wrap(&[0u8; 6])).unwrap_err();
        assert!(matches!(err, SrEnvelopeError::Framing(_)));
    }

    #[test]
    fn invalid_base64_fails() {
        let err = unwrap_default("not base64!").unwrap_err();
        assert!(matches!(err, SrEnvelopeError::Base64(_)));

        // Missing padding is rejected by the padded alphabet.
        let err = unwrap("QUJDRA", 0).unwrap_err();
        assert!(matches!(err, SrEnvelopeError::Base64(_)));
    }
}
