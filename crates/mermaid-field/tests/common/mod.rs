//! Shared fakes for renderer tests
//!
//! An in-memory page of placeholder elements, a scripted diagram engine, a
//! recording pan/zoom library and a window whose resize can be fired by hand.

#![allow(dead_code)]

use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::future::{self, LocalBoxFuture};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use mermaid_field::client::{
    DiagramBehavior, DiagramEngine, PageSettings, PanZoomHandle, PanZoomLibrary, PanZoomOptions,
    Placeholder, Scope, WindowEvents,
};
use mermaid_field::core::{DiagramFieldError, Result};

/// Source that never finishes rendering
pub const HANG: &str = "HANG";

/// Source that renders markup without an svg node
pub const NO_SVG: &str = "NO_SVG";

#[derive(Debug, Default)]
pub struct NodeState {
    pub text: String,
    pub html: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub visible: bool,
    pub visibility_changes: Vec<bool>,
}

#[derive(Debug, Clone)]
pub struct FakeElement(Rc<RefCell<NodeState>>);

impl FakeElement {
    pub fn placeholder(source: &str) -> Self {
        let mut state = NodeState {
            text: source.to_string(),
            visible: true,
            ..NodeState::default()
        };
        state
            .attributes
            .insert("class".to_string(), "mermaid".to_string());
        Self(Rc::new(RefCell::new(state)))
    }

    pub fn with_class(self, class: &str) -> Self {
        self.set_attribute("class", class);
        self
    }

    pub fn with_pan_zoom(self, value: &str) -> Self {
        self.set_attribute("data-pan-zoom", value);
        self
    }

    pub fn html(&self) -> Option<String> {
        self.0.borrow().html.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.0.borrow().visible
    }

    pub fn visibility_changes(&self) -> Vec<bool> {
        self.0.borrow().visibility_changes.clone()
    }

    /// Attribute value, panicking when it is absent
    pub fn attribute_value(&self, name: &str) -> String {
        self.attribute_value_opt(name)
            .unwrap_or_else(|| panic!("attribute {} is not set", name))
    }

    pub fn attribute_value_opt(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    pub fn same_node(&self, other: &FakeElement) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Placeholder for FakeElement {
    type Graphic = FakeElement;

    fn text_content(&self) -> String {
        self.0.borrow().text.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_inner_html(&self, html: &str) {
        self.0.borrow_mut().html = Some(html.to_string());
    }

    fn set_visible(&self, visible: bool) {
        let mut state = self.0.borrow_mut();
        state.visible = visible;
        state.visibility_changes.push(visible);
    }

    fn graphic(&self) -> Option<FakeElement> {
        let has_svg = self
            .0
            .borrow()
            .html
            .as_deref()
            .is_some_and(|html| html.contains("<svg"));
        has_svg.then(|| self.clone())
    }
}

/// A page fragment holding placeholder and other elements
#[derive(Debug, Default)]
pub struct FakePage {
    elements: RefCell<Vec<FakeElement>>,
}

impl FakePage {
    pub fn new(elements: Vec<FakeElement>) -> Self {
        Self {
            elements: RefCell::new(elements),
        }
    }

    pub fn push(&self, element: FakeElement) {
        self.elements.borrow_mut().push(element);
    }
}

impl Scope for FakePage {
    type Element = FakeElement;

    fn placeholders(&self, selector: &str) -> Vec<FakeElement> {
        let class = selector.trim_start_matches('.');
        self.elements
            .borrow()
            .iter()
            .filter(|element| {
                element
                    .attribute("class")
                    .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
            })
            .cloned()
            .collect()
    }
}

/// Diagram engine with scripted outcomes
///
/// Sources containing `FAIL` and empty sources reject, [`HANG`] never
/// completes, [`NO_SVG`] renders plain markup, gated sources complete when
/// the test says so, and everything else renders an svg.
#[derive(Debug)]
pub struct ScriptedEngine {
    available: Cell<bool>,
    always_fail: bool,
    pub initialized: Cell<usize>,
    pub calls: RefCell<Vec<(String, String)>>,
    gates: RefCell<HashMap<String, oneshot::Receiver<Result<String>>>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            available: Cell::new(true),
            always_fail: false,
            initialized: Cell::new(0),
            calls: RefCell::new(Vec::new()),
            gates: RefCell::new(HashMap::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            always_fail: true,
            ..Self::new()
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Hold the render of `source` until the returned sender fires
    pub fn gate(&self, source: &str) -> oneshot::Sender<Result<String>> {
        let (sender, receiver) = oneshot::channel();
        self.gates.borrow_mut().insert(source.to_string(), receiver);
        sender
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn ids(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn sources(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(_, source)| source.clone())
            .collect()
    }
}

pub fn svg_for(id: &str, source: &str) -> String {
    format!("<svg id=\"{}\"><g>{}</g></svg>", id, source)
}

impl DiagramEngine for ScriptedEngine {
    fn is_available(&self) -> bool {
        self.available.get()
    }

    fn initialize(&self) {
        self.initialized.set(self.initialized.get() + 1);
    }

    fn render(&self, id: &str, source: &str) -> LocalBoxFuture<'static, Result<String>> {
        self.calls
            .borrow_mut()
            .push((id.to_string(), source.to_string()));

        if let Some(receiver) = self.gates.borrow_mut().remove(source) {
            return Box::pin(async move {
                receiver
                    .await
                    .unwrap_or_else(|_| Err(DiagramFieldError::render_failure("gate dropped")))
            });
        }

        let outcome = if self.always_fail {
            Err(DiagramFieldError::render_failure(
                "Parse error on line 1: <graph>",
            ))
        } else if source.is_empty() {
            Err(DiagramFieldError::render_failure("No diagram type detected"))
        } else if source.contains("FAIL") {
            Err(DiagramFieldError::render_failure(format!(
                "Syntax error in text: {}",
                source
            )))
        } else if source == HANG {
            return Box::pin(future::pending());
        } else if source == NO_SVG {
            Ok("<p>not a graphic</p>".to_string())
        } else {
            Ok(svg_for(id, source))
        };

        Box::pin(future::ready(outcome))
    }
}

/// Pan/zoom handle that logs every call
pub struct RecordingHandle {
    name: String,
    log: Rc<RefCell<Vec<String>>>,
}

impl PanZoomHandle for RecordingHandle {
    fn resize(&self) {
        self.log.borrow_mut().push(format!("resize:{}", self.name));
    }

    fn fit(&self) {
        self.log.borrow_mut().push(format!("fit:{}", self.name));
    }

    fn center(&self) {
        self.log.borrow_mut().push(format!("center:{}", self.name));
    }
}

/// Pan/zoom library recording attachments
#[derive(Debug)]
pub struct RecordingPanZoom {
    available: Cell<bool>,
    pub attached: RefCell<Vec<PanZoomOptions>>,
    pub log: Rc<RefCell<Vec<String>>>,
}

impl RecordingPanZoom {
    pub fn new() -> Self {
        Self {
            available: Cell::new(true),
            attached: RefCell::new(Vec::new()),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn unavailable() -> Self {
        let library = Self::new();
        library.available.set(false);
        library
    }

    pub fn attach_count(&self) -> usize {
        self.attached.borrow().len()
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl PanZoomLibrary<FakeElement> for RecordingPanZoom {
    fn is_available(&self) -> bool {
        self.available.get()
    }

    fn attach(
        &self,
        graphic: &FakeElement,
        options: &PanZoomOptions,
    ) -> Result<Rc<dyn PanZoomHandle>> {
        self.attached.borrow_mut().push(*options);
        let name = graphic
            .attribute("data-diagram-id")
            .unwrap_or_else(|| "unknown".to_string());
        Ok(Rc::new(RecordingHandle {
            name,
            log: Rc::clone(&self.log),
        }))
    }
}

/// Window whose resize listeners are fired by the test
#[derive(Default)]
pub struct FakeWindow {
    listeners: RefCell<Vec<Box<dyn Fn()>>>,
}

impl FakeWindow {
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn fire_resize(&self) {
        for listener in self.listeners.borrow().iter() {
            listener();
        }
    }
}

impl WindowEvents for FakeWindow {
    fn on_resize(&self, listener: Box<dyn Fn()>) {
        self.listeners.borrow_mut().push(listener);
    }
}

/// A behavior wired to fakes, driven by a local pool
pub struct Harness {
    pub pool: LocalPool,
    pub engine: Rc<ScriptedEngine>,
    pub pan_zoom: Rc<RecordingPanZoom>,
    pub window: Rc<FakeWindow>,
    pub behavior: DiagramBehavior<FakeElement>,
}

impl Harness {
    pub fn new(settings: PageSettings) -> Self {
        Self::with_parts(settings, ScriptedEngine::new(), RecordingPanZoom::new())
    }

    pub fn with_parts(
        settings: PageSettings,
        engine: ScriptedEngine,
        pan_zoom: RecordingPanZoom,
    ) -> Self {
        let pool = LocalPool::new();
        let engine = Rc::new(engine);
        let pan_zoom = Rc::new(pan_zoom);
        let window = Rc::new(FakeWindow::default());

        let behavior = DiagramBehavior::<FakeElement>::new(
            engine.clone(),
            Rc::new(pool.spawner()),
            window.clone(),
        )
        .with_pan_zoom(pan_zoom.clone())
        .with_settings(settings);

        Self {
            pool,
            engine,
            pan_zoom,
            window,
            behavior,
        }
    }

    /// Run every task until none can make progress
    pub fn run(&mut self) {
        self.pool.run_until_stalled();
    }
}
