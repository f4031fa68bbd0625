//! Page-level renderer settings and pan/zoom intent
//!
//! The page may carry a default pan/zoom flag in its settings object; each
//! placeholder may override it with `data-pan-zoom="true"` or `"false"`.

use serde_json::Value;
use tracing::trace;

use crate::core::Result;

/// Namespace of this module's entries in the page settings object
pub const SETTINGS_NAMESPACE: &str = "mermaidDiagramField";

/// Accepted spellings of the pan/zoom default, checked in order
pub const PAN_ZOOM_SETTING_KEYS: [&str; 2] = ["enablePanZoom", "enable_pan_zoom"];

/// Page-wide settings read by the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSettings {
    /// Pan/zoom for placeholders without an override
    pub pan_zoom_default: bool,
}

impl PageSettings {
    pub fn new(pan_zoom_default: bool) -> Self {
        Self { pan_zoom_default }
    }

    /// Read settings from the page settings object
    ///
    /// The first pan/zoom key present under the namespace wins; anything
    /// missing defaults to off.
    pub fn from_value(settings: &Value) -> Self {
        let pan_zoom_default = settings
            .get(SETTINGS_NAMESPACE)
            .and_then(|namespace| {
                PAN_ZOOM_SETTING_KEYS
                    .iter()
                    .find_map(|key| namespace.get(*key).filter(|v| !v.is_null()))
            })
            .map(truthy)
            .unwrap_or(false);

        trace!(pan_zoom_default, "Read page settings");
        Self { pan_zoom_default }
    }

    /// Parse the page settings object from JSON
    pub fn from_json(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Ok(Self::from_value(&value))
    }
}

/// Read an element-level override; only explicit boolean tokens count
pub fn parse_override(value: Option<&str>) -> Option<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

/// Whether an element wants pan/zoom: its override, else the page default
pub fn resolve_pan_zoom(override_value: Option<&str>, settings: &PageSettings) -> bool {
    parse_override(override_value).unwrap_or(settings.pan_zoom_default)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(text.trim(), "true" | "1"),
        _ => false,
    }
}
