//! Mermaid diagram field formatter
//!
//! Chooses between inline and modal presentation for every value of a
//! diagram field and resolves the asset dependencies each payload needs.

use tracing::{debug, info, span, trace, Level};

use crate::core::{
    inline_dependencies, link_dependencies, link_label, DisplaySettings, FieldItems, Formatter,
    InlinePayload, LinkAttributes, LinkPayload, ModalRequest, RenderPayload,
};

/// Presentation selector for diagram fields
#[derive(Debug, Clone, Default)]
pub struct MermaidDiagramFormatter {
    settings: DisplaySettings,
}

impl MermaidDiagramFormatter {
    /// Create a formatter with default settings (inline, no pan/zoom)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with the given settings
    pub fn with_settings(settings: DisplaySettings) -> Self {
        Self { settings }
    }

    fn link_payload(&self, items: &FieldItems<'_>, delta: usize) -> LinkPayload {
        let item = &items.items[delta];
        let target = ModalRequest::for_item(items.owner, delta, self.settings.enable_pan_zoom);
        let label = link_label(&self.settings.modal_link_text, item.title.as_deref());
        trace!(delta, %label, "Built modal link");

        LinkPayload {
            href: target.href(),
            target,
            label,
            attributes: LinkAttributes::modal_dialog(),
            dependencies: link_dependencies(),
        }
    }
}

impl Formatter for MermaidDiagramFormatter {
    type Settings = DisplaySettings;

    fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    fn view_elements(&self, items: FieldItems<'_>) -> Vec<RenderPayload> {
        let view_span = span!(
            Level::INFO,
            "view_elements",
            entity_type = %items.owner.entity_type,
            entity_id = %items.owner.entity_id,
            field = %items.owner.field_name,
            item_count = items.len()
        );
        let _enter = view_span.enter();

        let base_dependencies = inline_dependencies(self.settings.enable_pan_zoom);
        debug!(
            modal = self.settings.display_in_modal,
            pan_zoom = self.settings.enable_pan_zoom,
            "Selecting presentation"
        );

        let payloads: Vec<RenderPayload> = items
            .items
            .iter()
            .enumerate()
            .map(|(delta, item)| {
                if self.settings.display_in_modal {
                    RenderPayload::Link(self.link_payload(&items, delta))
                } else {
                    if item.diagram.trim().is_empty() {
                        debug!(delta, "Item has no diagram source");
                    }
                    RenderPayload::Inline(InlinePayload::from_item(item, base_dependencies.clone()))
                }
            })
            .collect();

        info!(payload_count = payloads.len(), "Presentation selected");
        payloads
    }
}

/// Select the presentation of every item with the given settings
pub fn select_presentation(items: FieldItems<'_>, settings: &DisplaySettings) -> Vec<RenderPayload> {
    MermaidDiagramFormatter::with_settings(settings.clone()).view_elements(items)
}
