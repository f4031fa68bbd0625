//! HTML markup for render payloads
//!
//! The inline markup is the page contract of the client renderer: a
//! `.mermaid` placeholder whose text content is the diagram source, with an
//! optional `data-pan-zoom` override.

use htmlize::{escape_attribute, escape_text};
use std::fmt::Write;

use super::types::{InlinePayload, LinkPayload};

/// Class of the placeholder element the client renderer looks for
pub const PLACEHOLDER_CLASS: &str = "mermaid";

/// Element-level pan/zoom override attribute
pub const PAN_ZOOM_ATTRIBUTE: &str = "data-pan-zoom";

impl InlinePayload {
    /// Render the display template
    pub fn to_html(&self) -> String {
        let mut html = String::from("<figure class=\"mermaid-diagram\">");

        if let Some(title) = non_empty(&self.title) {
            let _ = write!(
                html,
                "<h3 class=\"mermaid-diagram__title\">{}</h3>",
                escape_text(title)
            );
        }

        let pan_zoom = if self.wants_pan_zoom() {
            format!(" {}=\"true\"", PAN_ZOOM_ATTRIBUTE)
        } else {
            String::new()
        };
        let _ = write!(
            html,
            "<div class=\"{}\"{}>{}</div>",
            PLACEHOLDER_CLASS,
            pan_zoom,
            escape_text(&self.diagram)
        );

        if let Some(key) = non_empty(&self.key) {
            let _ = write!(
                html,
                "<div class=\"mermaid-diagram__key\">{}</div>",
                escape_text(key)
            );
        }

        if self.show_code {
            let _ = write!(
                html,
                "<pre class=\"mermaid-diagram__code\"><code>{}</code></pre>",
                escape_text(&self.diagram)
            );
        }

        if let Some(caption) = non_empty(&self.caption) {
            let _ = write!(
                html,
                "<figcaption class=\"mermaid-diagram__caption\">{}</figcaption>",
                escape_text(caption)
            );
        }

        html.push_str("</figure>");
        html
    }
}

impl LinkPayload {
    /// Render the dialog link
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<a href=\"{}\" class=\"{}\"",
            escape_attribute(&self.href),
            escape_attribute(&self.attributes.class.join(" "))
        );
        for (name, value) in &self.attributes.data {
            let _ = write!(html, " {}=\"{}\"", name, escape_attribute(value));
        }
        let _ = write!(html, ">{}</a>", escape_text(&self.label));
        html
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::{inline_dependencies, link_dependencies};
    use crate::core::route::ModalRequest;
    use crate::core::types::{DiagramItem, LinkAttributes};

    #[test]
    fn test_inline_html_minimal() {
        let payload =
            InlinePayload::from_item(&DiagramItem::new("graph TD; A-->B;"), inline_dependencies(false));
        assert_eq!(
            payload.to_html(),
            "<figure class=\"mermaid-diagram\"><div class=\"mermaid\">graph TD; A--&gt;B;</div></figure>"
        );
    }

    #[test]
    fn test_inline_html_full() {
        let item = DiagramItem::new("graph LR; A-->B")
            .with_title("Flow <A>")
            .with_caption("Steps")
            .with_key("legend")
            .with_show_code(true);
        let html = InlinePayload::from_item(&item, inline_dependencies(true)).to_html();
        assert!(html.contains("<h3 class=\"mermaid-diagram__title\">Flow &lt;A&gt;</h3>"));
        assert!(html.contains("<div class=\"mermaid\" data-pan-zoom=\"true\">"));
        assert!(html.contains("<div class=\"mermaid-diagram__key\">legend</div>"));
        assert!(html.contains("<pre class=\"mermaid-diagram__code\"><code>graph LR; A--&gt;B</code></pre>"));
        assert!(html.ends_with("<figcaption class=\"mermaid-diagram__caption\">Steps</figcaption></figure>"));
    }

    #[test]
    fn test_link_html() {
        let target = ModalRequest::new("node", "1", "field_diagram", 0, true);
        let payload = LinkPayload {
            href: target.href(),
            target,
            label: "See <Flow>".to_string(),
            attributes: LinkAttributes::modal_dialog(),
            dependencies: link_dependencies(),
        };
        let html = payload.to_html();
        assert!(html.starts_with("<a href=\"/mermaid-diagram-field/modal/node/1/field_diagram/0?pz=1\""));
        assert!(html.contains("class=\"use-ajax mermaid-diagram-open\""));
        assert!(html.contains("data-dialog-type=\"modal\""));
        assert!(html.contains("data-dialog-options=\"{&quot;width&quot;:&quot;90%&quot;}\""));
        assert!(html.ends_with(">See &lt;Flow&gt;</a>"));
    }
}
