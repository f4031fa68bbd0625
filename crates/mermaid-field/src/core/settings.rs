//! Display settings of a diagram field formatter

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{DiagramFieldError, Result};

/// Label used when neither the link text template nor the item title yields one
pub const DEFAULT_LINK_TEXT: &str = "View diagram";

/// Maximum length of the modal link text template, in characters
pub const MODAL_LINK_TEXT_MAX_LENGTH: usize = 255;

/// Placeholder substituted with the item title in the link text template
pub const TITLE_PLACEHOLDER: &str = "@title";

/// Per-field-instance display configuration
///
/// Settings are read once per render pass and never mutated by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Attach pan/zoom support to rendered diagrams
    #[serde(alias = "enablePanZoom")]
    pub enable_pan_zoom: bool,
    /// Render a link opening a modal instead of inline content
    #[serde(alias = "displayInModal")]
    pub display_in_modal: bool,
    /// Link label template, may contain `@title`
    #[serde(alias = "modalLinkText")]
    pub modal_link_text: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            enable_pan_zoom: false,
            display_in_modal: false,
            modal_link_text: DEFAULT_LINK_TEXT.to_string(),
        }
    }
}

impl DisplaySettings {
    /// Inline display with the given pan/zoom choice
    pub fn inline(enable_pan_zoom: bool) -> Self {
        Self {
            enable_pan_zoom,
            ..Self::default()
        }
    }

    /// Parse settings from a JSON document; missing keys take their defaults
    pub fn from_json(input: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check the constraints the settings form enforces
    pub fn validate(&self) -> Result<()> {
        let length = self.modal_link_text.chars().count();
        if length > MODAL_LINK_TEXT_MAX_LENGTH {
            return Err(DiagramFieldError::invalid_settings(format!(
                "modal_link_text is {} characters, maximum is {}",
                length, MODAL_LINK_TEXT_MAX_LENGTH
            )));
        }
        Ok(())
    }

    /// Human-readable summary lines for the formatter administration UI
    pub fn summary(&self) -> Vec<String> {
        let mode = if self.display_in_modal { "Modal" } else { "Inline" };
        let link_text = if self.modal_link_text.is_empty() {
            DEFAULT_LINK_TEXT
        } else {
            self.modal_link_text.as_str()
        };
        let pan_zoom = if self.enable_pan_zoom { "On" } else { "Off" };

        vec![
            format!("Display: {}", mode),
            format!("Modal link text: {}", link_text),
            format!("Pan & zoom: {}", pan_zoom),
        ]
    }
}

/// Resolve the label of a modal link
///
/// A non-blank template wins, with `@title` replaced by the title (empty when
/// absent). Otherwise the title itself is used, then [`DEFAULT_LINK_TEXT`].
pub fn link_label(template: &str, title: Option<&str>) -> String {
    if !template.trim().is_empty() {
        return template.replace(TITLE_PLACEHOLDER, title.unwrap_or(""));
    }

    match title {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => DEFAULT_LINK_TEXT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DisplaySettings::default();
        assert!(!settings.enable_pan_zoom);
        assert!(!settings.display_in_modal);
        assert_eq!(settings.modal_link_text, "View diagram");
    }

    #[test]
    fn test_from_json_partial() {
        let settings = DisplaySettings::from_json(r#"{"display_in_modal": true}"#).unwrap();
        assert!(settings.display_in_modal);
        assert!(!settings.enable_pan_zoom);
        assert_eq!(settings.modal_link_text, DEFAULT_LINK_TEXT);
    }

    #[test]
    fn test_from_json_camel_case_aliases() {
        let settings =
            DisplaySettings::from_json(r#"{"enablePanZoom": true, "modalLinkText": "Open"}"#)
                .unwrap();
        assert!(settings.enable_pan_zoom);
        assert_eq!(settings.modal_link_text, "Open");
    }

    #[test]
    fn test_validate_link_text_length() {
        let settings = DisplaySettings {
            modal_link_text: "x".repeat(256),
            ..DisplaySettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, DiagramFieldError::InvalidSettings { .. }));

        let settings = DisplaySettings {
            modal_link_text: "x".repeat(255),
            ..DisplaySettings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_summary() {
        let settings = DisplaySettings {
            enable_pan_zoom: true,
            display_in_modal: true,
            modal_link_text: String::new(),
        };
        assert_eq!(
            settings.summary(),
            vec![
                "Display: Modal".to_string(),
                "Modal link text: View diagram".to_string(),
                "Pan & zoom: On".to_string(),
            ]
        );
        assert_eq!(DisplaySettings::default().summary()[0], "Display: Inline");
    }

    #[test]
    fn test_link_label_template() {
        assert_eq!(link_label("See @title", Some("Flow A")), "See Flow A");
        assert_eq!(link_label("See @title", None), "See ");
        assert_eq!(link_label("Open", Some("Flow A")), "Open");
    }

    #[test]
    fn test_link_label_fallbacks() {
        assert_eq!(link_label("", Some("Flow A")), "Flow A");
        assert_eq!(link_label("   ", Some("Flow A")), "Flow A");
        assert_eq!(link_label("", None), "View diagram");
        assert_eq!(link_label("", Some("")), "View diagram");
    }
}
