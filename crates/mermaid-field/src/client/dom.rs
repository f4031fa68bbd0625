//! DOM and host seams of the client renderer
//!
//! The renderer never talks to a browser directly. It works through these
//! traits, implemented by `web-sys` adapters in the browser and by in-memory
//! fakes in tests. Elements use interior mutability the way DOM handles do,
//! so every mutator takes `&self`.

use futures::future::LocalBoxFuture;
use serde::Serialize;
use std::rc::Rc;

use crate::core::Result;

/// A diagram placeholder element
pub trait Placeholder: Clone + 'static {
    /// Handle to the rendered graphic node inside the element
    type Graphic: 'static;

    /// Text content of the element
    fn text_content(&self) -> String;

    /// Value of an attribute, if present
    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    /// Replace the element's children with parsed markup
    fn set_inner_html(&self, html: &str);

    /// Show or hide the element without affecting layout
    fn set_visible(&self, visible: bool);

    /// The rendered graphic node, if the element contains one
    fn graphic(&self) -> Option<Self::Graphic>;
}

/// A subtree of the page that may contain placeholders
pub trait Scope {
    type Element: Placeholder;

    /// Elements matching `selector` inside this scope, in document order
    fn placeholders(&self, selector: &str) -> Vec<Self::Element>;
}

/// The third-party diagram rendering library
pub trait DiagramEngine {
    /// Whether the library is loaded on the page
    fn is_available(&self) -> bool {
        true
    }

    /// Configure the library before a pass; automatic rendering stays off
    fn initialize(&self) {}

    /// Render `source` to markup under the target id `id`
    fn render(&self, id: &str, source: &str) -> LocalBoxFuture<'static, Result<String>>;
}

/// Options passed to the pan/zoom library
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanZoomOptions {
    pub zoom_enabled: bool,
    pub control_icons_enabled: bool,
    pub fit: bool,
    pub center: bool,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for PanZoomOptions {
    fn default() -> Self {
        Self {
            zoom_enabled: true,
            control_icons_enabled: true,
            fit: true,
            center: true,
            min_zoom: 0.4,
            max_zoom: 12.0,
        }
    }
}

/// A live pan/zoom instance bound to one graphic
pub trait PanZoomHandle {
    /// Recompute the viewport size
    fn resize(&self);
    fn fit(&self);
    fn center(&self);
}

/// The third-party pan/zoom library
pub trait PanZoomLibrary<G> {
    /// Whether the library is loaded on the page
    fn is_available(&self) -> bool {
        true
    }

    /// Attach pan/zoom to a rendered graphic
    fn attach(&self, graphic: &G, options: &PanZoomOptions) -> Result<Rc<dyn PanZoomHandle>>;
}

/// Global window events
pub trait WindowEvents {
    /// Subscribe to window resizes for the life of the page
    fn on_resize(&self, listener: Box<dyn Fn()>);
}

/// Launches render tasks on the local event loop
pub trait TaskSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}
