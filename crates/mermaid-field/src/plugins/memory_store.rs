//! In-memory entity store
//!
//! Loadable from a JSON array of entities, for previews, tooling and tests.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::core::{ContentEntity, EntityStore, Result};

/// Entity store backed by a map keyed on (entity type, id)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ContentEntity>", into = "Vec<ContentEntity>")]
pub struct MemoryEntityStore {
    entities: HashMap<(String, String), ContentEntity>,
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, replacing any with the same type and id
    pub fn insert(&mut self, entity: ContentEntity) -> Option<ContentEntity> {
        let key = (entity.entity_type.clone(), entity.id.clone());
        self.entities.insert(key, entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Parse a JSON array of entities
    pub fn from_json(input: &str) -> Result<Self> {
        let store: Self = serde_json::from_str(input)?;
        debug!(entity_count = store.len(), "Loaded entity store");
        Ok(store)
    }

    /// Load a JSON array of entities from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl From<Vec<ContentEntity>> for MemoryEntityStore {
    fn from(entities: Vec<ContentEntity>) -> Self {
        let mut store = Self::new();
        for entity in entities {
            store.insert(entity);
        }
        store
    }
}

impl From<MemoryEntityStore> for Vec<ContentEntity> {
    fn from(store: MemoryEntityStore) -> Self {
        let mut entities: Vec<ContentEntity> = store.entities.into_values().collect();
        entities.sort_by(|a, b| (&a.entity_type, &a.id).cmp(&(&b.entity_type, &b.id)));
        entities
    }
}

impl EntityStore for MemoryEntityStore {
    fn load(&self, entity_type: &str, entity_id: &str) -> Option<ContentEntity> {
        self.entities
            .get(&(entity_type.to_string(), entity_id.to_string()))
            .cloned()
    }
}
