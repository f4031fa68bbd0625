//! Modal content resolver
//!
//! Serves the target of a modal link: loads the referenced field item and
//! builds the same inline payload the formatter produces for inline display.

use tracing::{debug, info, span, warn, Level};

use crate::core::{
    inline_dependencies, DiagramFieldError, EntityStore, InlinePayload, ModalRequest, Result,
};

/// Resolves modal requests against an entity store
#[derive(Debug, Clone)]
pub struct ModalResolver<S> {
    store: S,
}

impl<S: EntityStore> ModalResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying entity store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve one field item into its inline payload
    ///
    /// Fails with a not-found error when the entity cannot be loaded, the
    /// field does not exist on it, or `delta` is out of range.
    pub fn resolve(
        &self,
        entity_type: &str,
        entity_id: &str,
        field_name: &str,
        delta: usize,
        pan_zoom: bool,
    ) -> Result<InlinePayload> {
        let resolve_span = span!(
            Level::INFO,
            "resolve_modal",
            entity_type,
            entity_id,
            field_name,
            delta,
            pan_zoom
        );
        let _enter = resolve_span.enter();

        let entity = self.store.load(entity_type, entity_id).ok_or_else(|| {
            warn!("Entity not found");
            DiagramFieldError::EntityNotFound {
                entity_type: entity_type.to_string(),
                entity_id: entity_id.to_string(),
            }
        })?;

        let items = entity.field(field_name).ok_or_else(|| {
            warn!("Field not found");
            DiagramFieldError::FieldNotFound {
                entity_type: entity_type.to_string(),
                entity_id: entity_id.to_string(),
                field_name: field_name.to_string(),
            }
        })?;

        let item = items.get(delta).ok_or_else(|| {
            warn!(count = items.len(), "Delta out of range");
            DiagramFieldError::DeltaOutOfRange {
                field_name: field_name.to_string(),
                delta,
                count: items.len(),
            }
        })?;
        debug!(source_len = item.diagram.len(), "Loaded field item");

        let payload = InlinePayload::from_item(item, inline_dependencies(pan_zoom));
        info!("Modal content resolved");
        Ok(payload)
    }

    /// Resolve a parsed modal request
    pub fn resolve_request(&self, request: &ModalRequest) -> Result<InlinePayload> {
        self.resolve(
            &request.entity_type,
            &request.entity_id,
            &request.field_name,
            request.delta,
            request.pan_zoom,
        )
    }

    /// Parse a modal URL and resolve it
    pub fn resolve_href(&self, href: &str) -> Result<InlinePayload> {
        let request = ModalRequest::from_href(href)?;
        self.resolve_request(&request)
    }
}

/// Resolve one field item from `store` into its inline payload
pub fn resolve_modal<S: EntityStore>(
    store: &S,
    entity_type: &str,
    entity_id: &str,
    field_name: &str,
    delta: usize,
    pan_zoom: bool,
) -> Result<InlinePayload> {
    ModalResolver::new(store).resolve(entity_type, entity_id, field_name, delta, pan_zoom)
}
