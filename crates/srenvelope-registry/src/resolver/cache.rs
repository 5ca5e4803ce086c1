use dashmap::DashMap;

use srenvelope_core::error::Result;

use super::SchemaRegistry;

/// Caches successful lookups of an inner registry, keyed by schema id.
///
/// Failures are never cached; the next call for that id queries again.
#[derive(Debug)]
pub struct CachedSchemaRegistry<R> {
    inner: R,
    schemas: DashMap<u32, String>,
}

impl<R: SchemaRegistry> CachedSchemaRegistry<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            schemas: DashMap::new(),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn cached_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.schemas.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn clear(&self) {
        self.schemas.clear();
    }
}

impl<R: SchemaRegistry> SchemaRegistry for CachedSchemaRegistry<R> {
    fn lookup_schema_by_id(&self, id: u32) -> Result<String> {
        if let Some(hit) = self.schemas.get(&id) {
            tracing::debug!(schema_id = id, "schema cache hit");
            return Ok(hit.value().clone());
        }

        let schema = self.inner.lookup_schema_by_id(id)?;
        self.schemas.insert(id, schema.clone());
        Ok(schema)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use srenvelope_core::error::SrEnvelopeError;

    use super::*;
    use crate::resolver::InMemorySchemaRegistry;

    #[derive(Default)]
    struct Counting {
        registry: InMemorySchemaRegistry,
        calls: AtomicUsize,
    }

    impl SchemaRegistry for Counting {
        fn lookup_schema_by_id(&self, id: u32) -> Result<String> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.registry.lookup_schema_by_id(id)
        }
    }

    #[test]
    fn second_lookup_is_served_from_cache() {
        let counting = Counting::default();
        counting.registry.register(1, r#""int""#);
        let cached = CachedSchemaRegistry::new(counting);

        assert_eq!(cached.lookup_schema_by_id(1).unwrap(), r#""int""#);
        assert_eq!(cached.lookup_schema_by_id(1).unwrap(), r#""int""#);
        assert_eq!(cached.inner().calls.load(Ordering::Relaxed), 1);
        assert_eq!(cached.cached_ids(), vec![1]);

        cached.clear();
        cached.lookup_schema_by_id(1).unwrap();
        assert_eq!(cached.inner().calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let cached = CachedSchemaRegistry::new(Counting::default());

        let err = cached.lookup_schema_by_id(9).unwrap_err();
        assert!(matches!(err, SrEnvelopeError::SchemaLookup { id: 9, .. }));
        assert!(cached.cached_ids().is_empty());

        cached.inner().registry.register(9, r#""bytes""#);
        assert_eq!(cached.lookup_schema_by_id(9).unwrap(), r#""bytes""#);
        assert_eq!(cached.inner().calls.load(Ordering::Relaxed), 2);
    }
}
