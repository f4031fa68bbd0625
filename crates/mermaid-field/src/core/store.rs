//! Entity storage seam
//!
//! The host content system owns entities and their fields. This trait is the
//! read-only view the modal resolver needs of it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::DiagramItem;

/// A content entity with named multi-value diagram fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntity {
    pub entity_type: String,
    pub id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<DiagramItem>>,
}

impl ContentEntity {
    pub fn new(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add or replace a field's values
    pub fn with_field(mut self, name: impl Into<String>, items: Vec<DiagramItem>) -> Self {
        self.fields.insert(name.into(), items);
        self
    }

    /// Values of a field, if the entity has it
    pub fn field(&self, name: &str) -> Option<&[DiagramItem]> {
        self.fields.get(name).map(Vec::as_slice)
    }
}

/// Read-only access to stored entities
pub trait EntityStore {
    /// Load an entity by type and id
    fn load(&self, entity_type: &str, entity_id: &str) -> Option<ContentEntity>;
}

impl<S: EntityStore + ?Sized> EntityStore for &S {
    fn load(&self, entity_type: &str, entity_id: &str) -> Option<ContentEntity> {
        (**self).load(entity_type, entity_id)
    }
}
