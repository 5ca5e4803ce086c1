use dashmap::DashMap;

use srenvelope_core::error::{Result, SrEnvelopeError};

use super::SchemaRegistry;

/// Map-backed registry for tests and offline decoding.
#[derive(Debug, Default)]
pub struct InMemorySchemaRegistry {
    schemas: DashMap<u32, String>,
}

impl InMemorySchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: u32, schema_text: impl Into<String>) {
        self.schemas.insert(id, schema_text.into());
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl SchemaRegistry for InMemorySchemaRegistry {
    fn lookup_schema_by_id(&self, id: u32) -> Result<String> {
        self.schemas
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or_else(|| SrEnvelopeError::SchemaLookup {
                id,
                reason: "schema not found".into(),
            })
    }
}
