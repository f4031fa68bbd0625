//! Core type definitions for diagram fields
//!
//! This module contains the field item model read from the host storage
//! layer and the render payloads produced for it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::assets::AssetDependency;
use super::route::ModalRequest;

/// One diagram attached to one delta of a content entity field
///
/// Items are owned by the host storage layer; this crate only reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramItem {
    /// Diagram source text, opaque to this crate
    #[serde(default)]
    pub diagram: String,
    /// Optional display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional text shown below the diagram
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Optional legend key consumed by the display template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Also show the raw source next to the rendered diagram
    #[serde(default)]
    pub show_code: bool,
}

impl DiagramItem {
    /// Create an item with only diagram source set
    pub fn new(diagram: impl Into<String>) -> Self {
        Self {
            diagram: diagram.into(),
            ..Self::default()
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the caption
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the legend key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set whether the raw source is shown
    pub fn with_show_code(mut self, show_code: bool) -> Self {
        self.show_code = show_code;
        self
    }
}

/// The entity field a list of items belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOwner {
    pub entity_type: String,
    pub entity_id: String,
    pub field_name: String,
}

impl FieldOwner {
    pub fn new(
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            field_name: field_name.into(),
        }
    }
}

/// Ordered field values together with the field they came from
#[derive(Debug, Clone, Copy)]
pub struct FieldItems<'a> {
    pub owner: &'a FieldOwner,
    pub items: &'a [DiagramItem],
}

impl<'a> FieldItems<'a> {
    pub fn new(owner: &'a FieldOwner, items: &'a [DiagramItem]) -> Self {
        Self { owner, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A diagram rendered in place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlinePayload {
    pub diagram: String,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub key: Option<String>,
    pub show_code: bool,
    /// Ordered and unique; the base diagram bundle is always first
    pub dependencies: Vec<AssetDependency>,
}

impl InlinePayload {
    /// Build the payload for an item with an already resolved dependency list
    pub fn from_item(item: &DiagramItem, dependencies: Vec<AssetDependency>) -> Self {
        Self {
            diagram: item.diagram.clone(),
            title: item.title.clone(),
            caption: item.caption.clone(),
            key: item.key.clone(),
            show_code: item.show_code,
            dependencies,
        }
    }

    /// Whether this payload pulls in the pan/zoom bundle
    pub fn wants_pan_zoom(&self) -> bool {
        self.dependencies.contains(&AssetDependency::PanZoom)
    }
}

/// HTML attributes of a link that opens in a dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttributes {
    pub class: Vec<String>,
    #[serde(flatten)]
    pub data: BTreeMap<String, String>,
}

impl LinkAttributes {
    /// Attributes that make the host open the link target in a modal dialog
    pub fn modal_dialog() -> Self {
        let mut data = BTreeMap::new();
        data.insert("data-dialog-type".to_string(), "modal".to_string());
        data.insert(
            "data-dialog-options".to_string(),
            serde_json::json!({ "width": "90%" }).to_string(),
        );

        Self {
            class: vec!["use-ajax".to_string(), "mermaid-diagram-open".to_string()],
            data,
        }
    }
}

/// A link pointing at the modal endpoint for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPayload {
    pub target: ModalRequest,
    pub href: String,
    pub label: String,
    pub attributes: LinkAttributes,
    pub dependencies: Vec<AssetDependency>,
}

/// Output unit for one field item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderPayload {
    Inline(InlinePayload),
    Link(LinkPayload),
}

impl RenderPayload {
    pub fn as_inline(&self) -> Option<&InlinePayload> {
        match self {
            RenderPayload::Inline(payload) => Some(payload),
            RenderPayload::Link(_) => None,
        }
    }

    pub fn as_link(&self) -> Option<&LinkPayload> {
        match self {
            RenderPayload::Link(payload) => Some(payload),
            RenderPayload::Inline(_) => None,
        }
    }

    /// Asset dependencies the host must attach for this payload
    pub fn dependencies(&self) -> &[AssetDependency] {
        match self {
            RenderPayload::Inline(payload) => &payload.dependencies,
            RenderPayload::Link(payload) => &payload.dependencies,
        }
    }
}
