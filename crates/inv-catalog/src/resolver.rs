//! Find-or-create resolution of API entities with a per-kind cache.

use std::collections::HashMap;

use inv_api::{InventoryApi, Record, create_entity, list_entities, pk_of};
use inv_core::{CategoryPath, CompositeKey, EntityKind, Pk};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::CatalogError;

/// Resolves records to primary keys, creating them when absent.
///
/// Each kind's cache maps the record's [`CompositeKey`] to its pk. On a cache
/// miss the full list of that kind is fetched once more before creating, so
/// records made outside this process are found too.
pub struct EntityResolver<'a> {
    api: &'a dyn InventoryApi,
    caches: HashMap<EntityKind, HashMap<CompositeKey, Pk>>,
}

impl<'a> EntityResolver<'a> {
    #[must_use]
    pub fn new(api: &'a dyn InventoryApi) -> Self {
        Self {
            api,
            caches: HashMap::new(),
        }
    }

    #[must_use]
    pub fn api(&self) -> &'a dyn InventoryApi {
        self.api
    }

    /// Primary key of the record identified by `data`, created if needed.
    ///
    /// # Errors
    ///
    /// API errors from listing or creating.
    pub async fn resolve(&mut self, kind: EntityKind, data: &Record) -> Result<Pk, CatalogError> {
        let key = CompositeKey::from_record(kind, data);

        if let Some(pk) = self.lookup(kind, &key) {
            debug!(%kind, %key, pk, "found in cache");
            return Ok(pk);
        }

        self.refresh(kind).await?;
        if let Some(pk) = self.lookup(kind, &key) {
            debug!(%kind, %key, pk, "already exists");
            return Ok(pk);
        }

        let pk = create_entity(self.api, kind, data).await?;
        debug!(%kind, %key, pk, "created");
        self.caches.entry(kind).or_default().insert(key, pk);
        Ok(pk)
    }

    /// Convenience wrapper taking a `json!` object.
    ///
    /// # Errors
    ///
    /// Same as [`EntityResolver::resolve`].
    pub async fn resolve_value(&mut self, kind: EntityKind, data: Value) -> Result<Pk, CatalogError> {
        match data {
            Value::Object(record) => self.resolve(kind, &record).await,
            other => Err(CatalogError::EntityCreation {
                kind,
                key: other.to_string(),
            }),
        }
    }

    /// Resolve every level of a category path, returning the leaf pk.
    ///
    /// # Errors
    ///
    /// API errors from any level.
    pub async fn resolve_category_path(&mut self, path: &CategoryPath) -> Result<Pk, CatalogError> {
        let mut parent: Option<Pk> = None;
        for level in path.levels() {
            let pk = self
                .resolve_value(
                    EntityKind::PartCategory,
                    json!({
                        "name": level.name,
                        "structural": level.structural,
                        "parent": parent,
                    }),
                )
                .await?;
            parent = Some(pk);
        }
        parent.ok_or_else(|| CatalogError::EntityCreation {
            kind: EntityKind::PartCategory,
            key: path.to_string(),
        })
    }

    /// Reload the cache of `kind` from the API.
    ///
    /// # Errors
    ///
    /// API errors from the list request.
    pub async fn refresh(&mut self, kind: EntityKind) -> Result<(), CatalogError> {
        let records = list_entities(self.api, kind, &[]).await?;
        let cache = self.caches.entry(kind).or_default();
        for record in &records {
            if let Some(pk) = pk_of(record) {
                cache.insert(CompositeKey::from_record(kind, record), pk);
            }
        }
        Ok(())
    }

    fn lookup(&self, kind: EntityKind, key: &CompositeKey) -> Option<Pk> {
        self.caches.get(&kind).and_then(|cache| cache.get(key)).copied()
    }

    /// Cached entries of `kind`.
    #[must_use]
    pub fn cached(&self, kind: EntityKind) -> Vec<(CompositeKey, Pk)> {
        self.caches
            .get(&kind)
            .map(|cache| cache.iter().map(|(k, pk)| (k.clone(), *pk)).collect())
            .unwrap_or_default()
    }

    /// Part name to pk, from the cached parts.
    #[must_use]
    pub fn part_names(&self) -> HashMap<String, Pk> {
        self.cached(EntityKind::Part)
            .into_iter()
            .filter_map(|(key, pk)| key.first().map(|name| (name.to_string(), pk)))
            .collect()
    }

    pub fn clear_kind(&mut self, kind: EntityKind) {
        self.caches.remove(&kind);
    }

    pub fn clear(&mut self) {
        self.caches.clear();
    }
}
