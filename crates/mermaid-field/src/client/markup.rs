//! Render ids and error markup

use htmlize::escape_text;
use std::cell::Cell;
use uuid::Uuid;

use crate::core::DiagramFieldError;

/// Prefix of generated render target ids
pub const RENDER_ID_PREFIX: &str = "mmd";

/// Class of the block that replaces a diagram that failed to render
pub const ERROR_CLASS: &str = "mermaid-error";

/// Generates render target ids unique within a page view
///
/// Ids combine a per-pass sequence number, the element's index in the pass
/// and a random fragment: `mmd-{pass}-{index}-{random}`.
#[derive(Debug, Default)]
pub struct RenderIds {
    pass: Cell<u64>,
}

impl RenderIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new attach pass and return its sequence number
    pub fn next_pass(&self) -> u64 {
        let pass = self.pass.get() + 1;
        self.pass.set(pass);
        pass
    }

    /// Id for the element at `index` within `pass`
    pub fn render_id(&self, pass: u64, index: usize) -> String {
        let random = Uuid::new_v4().simple().to_string();
        format!("{}-{}-{}-{}", RENDER_ID_PREFIX, pass, index, &random[..10])
    }
}

/// Text shown for a failed render
pub fn failure_detail(error: &DiagramFieldError) -> String {
    match error {
        DiagramFieldError::RenderFailure { message } => message.clone(),
        other => other.to_string(),
    }
}

/// Visible error block carrying the failure detail as text
pub fn error_block(detail: &str) -> String {
    format!(
        "<pre class=\"{}\">Mermaid render error:\n{}</pre>",
        ERROR_CLASS,
        escape_text(detail)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_render_ids_unique() {
        let ids = RenderIds::new();
        let pass = ids.next_pass();
        let generated: HashSet<String> = (0..100).map(|i| ids.render_id(pass, i)).collect();
        assert_eq!(generated.len(), 100);
        assert!(generated.iter().all(|id| id.starts_with("mmd-1-")));
    }

    #[test]
    fn test_passes_increase() {
        let ids = RenderIds::new();
        assert_eq!(ids.next_pass(), 1);
        assert_eq!(ids.next_pass(), 2);
        assert!(ids.render_id(2, 3).starts_with("mmd-2-3-"));
    }

    #[test]
    fn test_error_block_escapes_detail() {
        let html = error_block("Parse error: expected <node>");
        assert_eq!(
            html,
            "<pre class=\"mermaid-error\">Mermaid render error:\nParse error: expected &lt;node&gt;</pre>"
        );
    }

    #[test]
    fn test_failure_detail() {
        let render = DiagramFieldError::render_failure("Lexical error on line 1");
        assert_eq!(failure_detail(&render), "Lexical error on line 1");

        let other = DiagramFieldError::missing_capability("svgPanZoom");
        assert!(failure_detail(&other).contains("svgPanZoom"));
    }
}
