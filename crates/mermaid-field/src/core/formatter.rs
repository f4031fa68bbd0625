//! Core formatter trait
//!
//! A formatter turns the values of one field into render payloads using
//! its own read-only settings.

use super::types::{FieldItems, RenderPayload};

/// Computes render payloads for the values of a field
pub trait Formatter {
    /// Settings type this formatter is configured with
    type Settings;

    /// Settings used for this render pass
    fn settings(&self) -> &Self::Settings;

    /// One payload per item, in item order
    fn view_elements(&self, items: FieldItems<'_>) -> Vec<RenderPayload>;
}
