//! Schema resolution: identifier parsing and the registry client seam.
//!
//! Every lookup goes to the configured registry unless the caller wraps it in
//! [`CachedSchemaRegistry`]. Schema text for an id never changes once
//! registered, so caching does not change decode results.

pub mod cache;
pub mod http;
pub mod memory;

use std::sync::Arc;

use srenvelope_core::error::{Result, SrEnvelopeError};

pub use cache::CachedSchemaRegistry;
pub use http::HttpSchemaRegistry;
pub use memory::InMemorySchemaRegistry;

/// Source of schema text keyed by registry id.
pub trait SchemaRegistry: Send + Sync {
    /// Fetch the schema text registered under `id`.
    ///
    /// Unknown ids and unreachable registries fail with `SchemaLookup`.
    fn lookup_schema_by_id(&self, id: u32) -> Result<String>;
}

impl<R: SchemaRegistry + ?Sized> SchemaRegistry for Arc<R> {
    fn lookup_schema_by_id(&self, id: u32) -> Result<String> {
        (**self).lookup_schema_by_id(id)
    }
}

impl<R: SchemaRegistry + ?Sized> SchemaRegistry for Box<R> {
    fn lookup_schema_by_id(&self, id: u32) -> Result<String> {
        (**self).lookup_schema_by_id(id)
    }
}

/// Parse a schema id that arrived as text.
pub fn parse_schema_id(text: &str) -> Result<u32> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| SrEnvelopeError::InvalidIdentifier(text.to_string()))
}

/// Parse `id_text` and look it up in `registry`.
pub fn resolve_schema_str<R: SchemaRegistry + ?Sized>(registry: &R, id_text: &str) -> Result<String> {
    let id = parse_schema_id(id_text)?;
    tracing::debug!(schema_id = id, "resolving schema");
    registry.lookup_schema_by_id(id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_ids() {
        assert_eq!(parse_schema_id("7").unwrap(), 7);
        assert_eq!(parse_schema_id(" 528\n").unwrap(), 528);
        assert_eq!(parse_schema_id("4294967295").unwrap(), u32::MAX);
    }

    #[test]
    fn rejects_non_numeric_negative_and_oversized() {
        for bad in ["", "abc", "7a", "-1", "4294967296", "1.0"] {
            let err = parse_schema_id(bad).unwrap_err();
            assert!(matches!(err, SrEnvelopeError::InvalidIdentifier(_)), "input={bad:?}");
        }
    }

    #[test]
    fn resolve_checks_identifier_before_lookup() {
        let registry = InMemorySchemaRegistry::new();
        registry.register(3, r#""string""#);

        assert_eq!(resolve_schema_str(&registry, "3").unwrap(), r#""string""#);

        let err = resolve_schema_str(&registry, "three").unwrap_err();
        assert!(matches!(err, SrEnvelopeError::InvalidIdentifier(_)));

        let err = resolve_schema_str(&registry, "4").unwrap_err();
        assert!(matches!(err, SrEnvelopeError::SchemaLookup { id: 4, .. }));
    }
}
