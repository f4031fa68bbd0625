//! Mermaid Field - display Mermaid diagrams attached to content entities
//!
//! A diagram field formatter for a content management system, split across
//! the server/client boundary:
//!
//! - **Presentation selection** (server): each field value becomes either an
//!   inline diagram payload or a link that opens the diagram in a modal,
//!   together with the asset bundles it needs.
//! - **Modal resolution** (server): the modal endpoint reloads one field
//!   value and produces exactly the inline payload inline display would.
//! - **Diagram rendering** (client): placeholders are rendered through the
//!   Mermaid library one task per element, with optional pan/zoom.
//!
//! # Quick Start
//!
//! ```rust
//! use mermaid_field::{select_presentation, DiagramItem, DisplaySettings, FieldItems, FieldOwner};
//!
//! let owner = FieldOwner::new("node", "1", "field_diagram");
//! let items = vec![DiagramItem::new("graph TD; A-->B;").with_title("Flow A")];
//!
//! let settings = DisplaySettings {
//!     display_in_modal: true,
//!     modal_link_text: "See @title".to_string(),
//!     ..DisplaySettings::default()
//! };
//!
//! let payloads = select_presentation(FieldItems::new(&owner, &items), &settings);
//! let link = payloads[0].as_link().unwrap();
//! assert_eq!(link.label, "See Flow A");
//! assert_eq!(link.href, "/mermaid-diagram-field/modal/node/1/field_diagram/0");
//! ```
//!
//! # Modal Content
//!
//! ```rust
//! use mermaid_field::prelude::*;
//!
//! let mut store = MemoryEntityStore::new();
//! store.insert(ContentEntity::new("node", "1").with_field(
//!     "field_diagram",
//!     vec![DiagramItem::new("graph TD; A-->B;")],
//! ));
//!
//! let payload = ModalResolver::new(&store)
//!     .resolve_href("/mermaid-diagram-field/modal/node/1/field_diagram/0?pz=1")
//!     .unwrap();
//! assert_eq!(
//!     payload.dependencies,
//!     vec![AssetDependency::DiagramBase, AssetDependency::PanZoom]
//! );
//! ```

pub mod client;
pub mod core;
pub mod plugins;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;
pub use plugins::{resolve_modal, select_presentation};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::{
        DiagramBehavior, DiagramEngine, ElementState, PageSettings, PanZoomHandle,
        PanZoomLibrary, PanZoomOptions, Placeholder, Scope, TaskSpawner, WindowEvents,
    };
    pub use crate::core::{
        AssetDependency, ContentEntity, DiagramFieldError, DiagramItem, DisplaySettings,
        EntityStore, FieldItems, FieldOwner, Formatter, InlinePayload, LinkPayload, ModalRequest,
        RenderPayload,
    };
    pub use crate::plugins::{MemoryEntityStore, MermaidDiagramFormatter, ModalResolver};
}
