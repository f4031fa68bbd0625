//! Client-side asset dependencies
//!
//! Payloads never load scripts themselves. They name the symbolic asset
//! bundles the host asset pipeline must attach for them to work.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A symbolic asset bundle resolved by the host asset pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetDependency {
    /// Diagram rendering library plus the attach behavior
    #[serde(rename = "diagram-base")]
    DiagramBase,
    /// Pan/zoom library
    #[serde(rename = "pan-zoom")]
    PanZoom,
    /// Dialog support for links that open in a modal
    #[serde(rename = "dialog-ajax-link")]
    DialogAjaxLink,
}

impl AssetDependency {
    /// Symbolic identifier of this dependency
    pub fn id(&self) -> &'static str {
        match self {
            AssetDependency::DiagramBase => "diagram-base",
            AssetDependency::PanZoom => "pan-zoom",
            AssetDependency::DialogAjaxLink => "dialog-ajax-link",
        }
    }

    /// Host library name this dependency resolves to
    pub fn library(&self) -> &'static str {
        match self {
            AssetDependency::DiagramBase => "mermaid_diagram_field/diagram",
            AssetDependency::PanZoom => "mermaid_diagram_field/pan_zoom",
            AssetDependency::DialogAjaxLink => "core/drupal.dialog.ajax",
        }
    }
}

impl fmt::Display for AssetDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Dependencies of an inline diagram payload
///
/// The base diagram bundle always comes first; pan/zoom is appended only
/// when enabled. Both the presentation selector and the modal resolver go
/// through this function so inline and modal output cannot drift apart.
pub fn inline_dependencies(enable_pan_zoom: bool) -> Vec<AssetDependency> {
    let mut dependencies = vec![AssetDependency::DiagramBase];
    if enable_pan_zoom {
        dependencies.push(AssetDependency::PanZoom);
    }
    dependencies
}

/// Dependencies of a modal link payload
pub fn link_dependencies() -> Vec<AssetDependency> {
    vec![AssetDependency::DialogAjaxLink]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_dependencies_without_pan_zoom() {
        assert_eq!(inline_dependencies(false), vec![AssetDependency::DiagramBase]);
    }

    #[test]
    fn test_inline_dependencies_with_pan_zoom() {
        assert_eq!(
            inline_dependencies(true),
            vec![AssetDependency::DiagramBase, AssetDependency::PanZoom]
        );
    }

    #[test]
    fn test_serialized_ids() {
        let json = serde_json::to_string(&inline_dependencies(true)).unwrap();
        assert_eq!(json, r#"["diagram-base","pan-zoom"]"#);
        assert_eq!(AssetDependency::DialogAjaxLink.to_string(), "dialog-ajax-link");
    }

    #[test]
    fn test_library_names() {
        assert_eq!(AssetDependency::DiagramBase.library(), "mermaid_diagram_field/diagram");
        assert_eq!(AssetDependency::PanZoom.library(), "mermaid_diagram_field/pan_zoom");
        assert_eq!(AssetDependency::DialogAjaxLink.library(), "core/drupal.dialog.ajax");
    }
}
