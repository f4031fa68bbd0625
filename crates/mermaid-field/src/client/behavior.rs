//! Diagram display behavior
//!
//! Scans a scope for `.mermaid` placeholders and renders each one in its own
//! task. A pass returns as soon as every task is dispatched; renders complete
//! in any order and fail independently.
//!
//! Per element: `Pending -> Rendering -> Rendered | Failed`. Elements are
//! hidden while rendering and shown again in either terminal state.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, error, info, span, trace, warn, Level};

use super::dom::{
    DiagramEngine, PanZoomLibrary, PanZoomOptions, Placeholder, Scope, TaskSpawner, WindowEvents,
};
use super::markup::{error_block, failure_detail, RenderIds};
use super::once::once;
use super::resize::ResizeHub;
use super::settings::{resolve_pan_zoom, PageSettings};
use crate::core::{DiagramFieldError, PAN_ZOOM_ATTRIBUTE, PLACEHOLDER_CLASS};

/// Behavior id recorded in the attach-once marker
pub const BEHAVIOR_ID: &str = "diagram-display";

/// Attribute holding the render id assigned to a claimed element
pub const DIAGRAM_ID_ATTRIBUTE: &str = "data-diagram-id";

/// Render progress of one placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Pending,
    Rendering,
    Rendered {
        /// A pan/zoom instance with a live resize listener is attached
        pan_zoom: bool,
    },
    Failed,
}

impl ElementState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ElementState::Rendered { .. } | ElementState::Failed)
    }
}

type States = Rc<RefCell<HashMap<String, ElementState>>>;

/// Client-side diagram renderer
pub struct DiagramBehavior<E: Placeholder> {
    engine: Rc<dyn DiagramEngine>,
    pan_zoom: Option<Rc<dyn PanZoomLibrary<E::Graphic>>>,
    spawner: Rc<dyn TaskSpawner>,
    resize: Rc<ResizeHub>,
    settings: Cell<PageSettings>,
    options: PanZoomOptions,
    ids: RenderIds,
    /// One entry per claimed element, kept for the life of the behavior.
    /// Like the resize hub, this only grows while elements are added
    /// without a page reload.
    states: States,
}

impl<E: Placeholder> DiagramBehavior<E> {
    pub fn new(
        engine: Rc<dyn DiagramEngine>,
        spawner: Rc<dyn TaskSpawner>,
        window: Rc<dyn WindowEvents>,
    ) -> Self {
        Self {
            engine,
            pan_zoom: None,
            spawner,
            resize: Rc::new(ResizeHub::new(window)),
            settings: Cell::new(PageSettings::default()),
            options: PanZoomOptions::default(),
            ids: RenderIds::new(),
            states: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Use this pan/zoom library for elements that want it
    pub fn with_pan_zoom(mut self, library: Rc<dyn PanZoomLibrary<E::Graphic>>) -> Self {
        self.pan_zoom = Some(library);
        self
    }

    pub fn with_settings(self, settings: PageSettings) -> Self {
        self.settings.set(settings);
        self
    }

    pub fn with_options(mut self, options: PanZoomOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the page settings used by later passes
    pub fn update_settings(&self, settings: PageSettings) {
        self.settings.set(settings);
    }

    pub fn settings(&self) -> PageSettings {
        self.settings.get()
    }

    /// State of the element, if it was ever claimed by this behavior
    pub fn state_of(&self, element: &E) -> Option<ElementState> {
        element
            .attribute(DIAGRAM_ID_ATTRIBUTE)
            .and_then(|id| self.state(&id))
    }

    /// State by render id
    pub fn state(&self, id: &str) -> Option<ElementState> {
        self.states.borrow().get(id).copied()
    }

    /// Number of elements ever claimed, in any state
    pub fn tracked_elements(&self) -> usize {
        self.states.borrow().len()
    }

    /// Number of pan/zoom instances kept responsive to window resizes
    pub fn pan_zoom_instances(&self) -> usize {
        self.resize.len()
    }

    /// Dispatch a render for every placeholder in `scope` not seen before
    ///
    /// Returns the number of renders dispatched. Does not wait for them.
    pub fn attach<S>(&self, scope: &S) -> usize
    where
        S: Scope<Element = E> + ?Sized,
    {
        let attach_span = span!(Level::INFO, "attach_diagrams");
        let _enter = attach_span.enter();

        if !self.engine.is_available() {
            warn!("Diagram library is not loaded, skipping pass");
            return 0;
        }

        let selector = format!(".{}", PLACEHOLDER_CLASS);
        let elements = once(BEHAVIOR_ID, scope.placeholders(&selector));
        if elements.is_empty() {
            trace!("No new placeholders");
            return 0;
        }

        self.engine.initialize();
        let pass = self.ids.next_pass();
        let settings = self.settings.get();
        let count = elements.len();

        for (index, element) in elements.into_iter().enumerate() {
            let id = self.ids.render_id(pass, index);
            element.set_attribute(DIAGRAM_ID_ATTRIBUTE, &id);
            self.set_state(&id, ElementState::Pending);
            element.set_visible(false);

            let wants_pan_zoom =
                resolve_pan_zoom(element.attribute(PAN_ZOOM_ATTRIBUTE).as_deref(), &settings);
            let source = element.text_content().trim().to_string();
            debug!(%id, wants_pan_zoom, source_len = source.len(), "Dispatching render");

            let task = RenderTask {
                element,
                id: id.clone(),
                source,
                wants_pan_zoom,
                engine: Rc::clone(&self.engine),
                pan_zoom: self.pan_zoom.clone(),
                options: self.options,
                resize: Rc::clone(&self.resize),
                states: Rc::clone(&self.states),
            };
            self.set_state(&id, ElementState::Rendering);
            self.spawner.spawn(Box::pin(task.run()));
        }

        info!(pass, count, "Dispatched diagram renders");
        count
    }

    fn set_state(&self, id: &str, state: ElementState) {
        self.states.borrow_mut().insert(id.to_string(), state);
    }
}

struct RenderTask<E: Placeholder> {
    element: E,
    id: String,
    source: String,
    wants_pan_zoom: bool,
    engine: Rc<dyn DiagramEngine>,
    pan_zoom: Option<Rc<dyn PanZoomLibrary<E::Graphic>>>,
    options: PanZoomOptions,
    resize: Rc<ResizeHub>,
    states: States,
}

impl<E: Placeholder> RenderTask<E> {
    async fn run(self) {
        let rendered = self.engine.render(&self.id, &self.source).await;

        let state = match rendered {
            Ok(markup) => {
                self.element.set_inner_html(&markup);
                let pan_zoom = self.wants_pan_zoom && self.attach_pan_zoom();
                debug!(id = %self.id, pan_zoom, "Diagram rendered");
                ElementState::Rendered { pan_zoom }
            }
            Err(err) => {
                error!(id = %self.id, error = %err, "Diagram render failed");
                self.element.set_inner_html(&error_block(&failure_detail(&err)));
                ElementState::Failed
            }
        };

        self.element.set_visible(true);
        self.states.borrow_mut().insert(self.id.clone(), state);
    }

    fn attach_pan_zoom(&self) -> bool {
        let library = match &self.pan_zoom {
            Some(library) if library.is_available() => library,
            _ => {
                let err = DiagramFieldError::missing_capability("svg-pan-zoom");
                warn!(id = %self.id, error = %err, "Pan/zoom requested but not available");
                return false;
            }
        };

        let Some(graphic) = self.element.graphic() else {
            debug!(id = %self.id, "No rendered graphic, skipping pan/zoom");
            return false;
        };

        match library.attach(&graphic, &self.options) {
            Ok(handle) => {
                self.resize.register(&self.id, handle);
                true
            }
            Err(err) => {
                warn!(id = %self.id, error = %err, "Pan/zoom attach failed");
                false
            }
        }
    }
}
