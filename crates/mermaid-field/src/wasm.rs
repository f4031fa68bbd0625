//! WebAssembly bindings for the diagram renderer
//!
//! Adapts the browser DOM, the global `mermaid` object and the global
//! `svgPanZoom` function to the renderer seams, and exports the attach entry
//! points the page's behavior script calls after load and after every
//! partial page update.

use futures::future::LocalBoxFuture;
use js_sys::{Promise, Reflect, JSON};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement};

use crate::client::{
    BrowserSpawner, DiagramBehavior, DiagramEngine, PageSettings, PanZoomHandle, PanZoomLibrary,
    PanZoomOptions, Placeholder, Scope, WindowEvents,
};
use crate::core::logging::init_logging;
use crate::core::{DiagramFieldError, Result};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mermaid, js_name = initialize)]
    fn mermaid_initialize(config: &JsValue);

    #[wasm_bindgen(js_namespace = mermaid, js_name = render, catch)]
    fn mermaid_render(id: &str, code: &str) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(js_name = svgPanZoom, catch)]
    fn svg_pan_zoom(
        element: &Element,
        options: &JsValue,
    ) -> std::result::Result<SvgPanZoomInstance, JsValue>;

    type SvgPanZoomInstance;

    #[wasm_bindgen(method)]
    fn resize(this: &SvgPanZoomInstance);

    #[wasm_bindgen(method)]
    fn fit(this: &SvgPanZoomInstance);

    #[wasm_bindgen(method)]
    fn center(this: &SvgPanZoomInstance);
}

/// Initialize WASM module
///
/// Sets up panic hooks and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = init_logging(Some("info"), None);
}

fn global_defined(name: &str) -> bool {
    Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false)
}

/// Stringify a thrown JavaScript value the way `String(e)` would
fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.to_string());
    }
    format!("{:?}", value)
}

fn js_failure(value: JsValue) -> DiagramFieldError {
    DiagramFieldError::render_failure(js_message(&value))
}

/// A DOM element used as a diagram placeholder
#[derive(Debug, Clone)]
pub struct BrowserElement(Element);

impl BrowserElement {
    pub fn new(element: Element) -> Self {
        Self(element)
    }
}

impl Placeholder for BrowserElement {
    type Graphic = Element;

    fn text_content(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.0.set_attribute(name, value) {
            warn!(name, error = %js_message(&err), "Failed to set attribute");
        }
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn set_visible(&self, visible: bool) {
        if let Some(element) = self.0.dyn_ref::<HtmlElement>() {
            let opacity = if visible { "1" } else { "0" };
            if let Err(err) = element.style().set_property("opacity", opacity) {
                warn!(visible, error = %js_message(&err), "Failed to set visibility");
            }
        }
    }

    fn graphic(&self) -> Option<Element> {
        self.0.query_selector("svg").ok().flatten()
    }
}

/// Where an attach pass looks for placeholders
pub enum BrowserScope {
    Document(Document),
    Element(Element),
}

impl Scope for BrowserScope {
    type Element = BrowserElement;

    fn placeholders(&self, selector: &str) -> Vec<BrowserElement> {
        let found = match self {
            BrowserScope::Document(document) => document.query_selector_all(selector),
            BrowserScope::Element(element) => element.query_selector_all(selector),
        };
        let list = match found {
            Ok(list) => list,
            Err(err) => {
                warn!(selector, error = %js_message(&err), "Placeholder query failed");
                return Vec::new();
            }
        };

        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(BrowserElement::new)
            .collect()
    }
}

/// The global `mermaid` library
#[derive(Debug, Default)]
pub struct MermaidJs;

impl DiagramEngine for MermaidJs {
    fn is_available(&self) -> bool {
        global_defined("mermaid")
    }

    fn initialize(&self) {
        let config = js_sys::Object::new();
        if let Err(err) = Reflect::set(&config, &JsValue::from_str("startOnLoad"), &JsValue::FALSE) {
            warn!(error = %js_message(&err), "Failed to build diagram library config");
        }
        mermaid_initialize(&config.into());
    }

    fn render(&self, id: &str, source: &str) -> LocalBoxFuture<'static, Result<String>> {
        let started = mermaid_render(id, source);
        Box::pin(async move {
            let promise = started.map_err(js_failure)?;
            let result = JsFuture::from(promise).await.map_err(js_failure)?;
            let svg = Reflect::get(&result, &JsValue::from_str("svg")).map_err(js_failure)?;
            svg.as_string()
                .ok_or_else(|| DiagramFieldError::render_failure("render result has no svg markup"))
        })
    }
}

struct SvgPanZoomHandle(SvgPanZoomInstance);

impl PanZoomHandle for SvgPanZoomHandle {
    fn resize(&self) {
        self.0.resize();
    }

    fn fit(&self) {
        self.0.fit();
    }

    fn center(&self) {
        self.0.center();
    }
}

/// The global `svgPanZoom` library
#[derive(Debug, Default)]
pub struct SvgPanZoom;

impl PanZoomLibrary<Element> for SvgPanZoom {
    fn is_available(&self) -> bool {
        global_defined("svgPanZoom")
    }

    fn attach(&self, graphic: &Element, options: &PanZoomOptions) -> Result<Rc<dyn PanZoomHandle>> {
        let options = JSON::parse(&serde_json::to_string(options)?).map_err(js_failure)?;
        let instance = svg_pan_zoom(graphic, &options).map_err(js_failure)?;
        Ok(Rc::new(SvgPanZoomHandle(instance)))
    }
}

/// The browser window
#[derive(Debug, Default)]
pub struct BrowserWindow;

impl WindowEvents for BrowserWindow {
    fn on_resize(&self, listener: Box<dyn Fn()>) {
        let Some(window) = web_sys::window() else {
            warn!("No window, resize listener not installed");
            return;
        };

        let closure = Closure::<dyn Fn()>::wrap(listener);
        if let Err(err) =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        {
            warn!(error = %js_message(&err), "Failed to install resize listener");
            return;
        }
        // the listener lives as long as the page
        closure.forget();
    }
}

thread_local! {
    static BEHAVIOR: RefCell<Option<Rc<DiagramBehavior<BrowserElement>>>> = const { RefCell::new(None) };
}

fn behavior() -> Rc<DiagramBehavior<BrowserElement>> {
    BEHAVIOR.with(|slot| {
        Rc::clone(slot.borrow_mut().get_or_insert_with(|| {
            Rc::new(
                DiagramBehavior::new(
                    Rc::new(MermaidJs),
                    Rc::new(BrowserSpawner),
                    Rc::new(BrowserWindow),
                )
                .with_pan_zoom(Rc::new(SvgPanZoom)),
            )
        }))
    })
}

fn page_settings(settings: &JsValue) -> PageSettings {
    if settings.is_undefined() || settings.is_null() {
        return PageSettings::default();
    }

    let parsed = JSON::stringify(settings)
        .ok()
        .and_then(|json| json.as_string())
        .map(|json| PageSettings::from_json(&json));

    match parsed {
        Some(Ok(settings)) => settings,
        Some(Err(err)) => {
            warn!(error = %err, "Unreadable page settings, using defaults");
            PageSettings::default()
        }
        None => PageSettings::default(),
    }
}

/// Attach diagrams inside `context`
///
/// # Arguments
/// * `context` - root element of the page fragment to scan
/// * `settings` - page-wide settings object (may be undefined)
///
/// # Returns
/// * The number of renders dispatched
#[wasm_bindgen]
pub fn attach_diagrams(context: Element, settings: JsValue) -> usize {
    let behavior = behavior();
    behavior.update_settings(page_settings(&settings));
    behavior.attach(&BrowserScope::Element(context))
}

/// Attach diagrams anywhere in the current document
#[wasm_bindgen]
pub fn attach_document(settings: JsValue) -> std::result::Result<usize, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("No document available"))?;

    let behavior = behavior();
    behavior.update_settings(page_settings(&settings));
    Ok(behavior.attach(&BrowserScope::Document(document)))
}
