//! Window resize fan-out for pan/zoom instances
//!
//! A single window subscription is opened lazily on first registration and
//! refits every registered instance. Instances are keyed by render id, so an
//! element never holds more than one live listener.
//!
//! Nothing is ever unregistered. Pages that keep adding pan/zoom diagrams
//! without a reload grow this map, and the per-element state map of
//! [`DiagramBehavior`](super::DiagramBehavior), by one entry per element.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::trace;

use super::dom::{PanZoomHandle, WindowEvents};

type Handles = Rc<RefCell<BTreeMap<String, Rc<dyn PanZoomHandle>>>>;

pub struct ResizeHub {
    window: Rc<dyn WindowEvents>,
    handles: Handles,
    subscribed: Cell<bool>,
}

impl ResizeHub {
    pub fn new(window: Rc<dyn WindowEvents>) -> Self {
        Self {
            window,
            handles: Rc::new(RefCell::new(BTreeMap::new())),
            subscribed: Cell::new(false),
        }
    }

    /// Register the instance for `key`, replacing any earlier one
    pub fn register(&self, key: &str, handle: Rc<dyn PanZoomHandle>) {
        self.handles.borrow_mut().insert(key.to_string(), handle);

        if !self.subscribed.replace(true) {
            let handles = Rc::clone(&self.handles);
            self.window.on_resize(Box::new(move || refit_all(&handles)));
            trace!("Subscribed to window resize");
        }
    }

    /// Number of registered instances
    pub fn len(&self) -> usize {
        self.handles.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.borrow().is_empty()
    }

    /// Refit every instance as a window resize would
    pub fn refit(&self) {
        refit_all(&self.handles);
    }
}

fn refit_all(handles: &Handles) {
    // snapshot so a handle may register new instances while refitting
    let snapshot: Vec<Rc<dyn PanZoomHandle>> = handles.borrow().values().cloned().collect();
    trace!(count = snapshot.len(), "Refitting pan/zoom instances");
    for handle in snapshot {
        handle.resize();
        handle.fit();
        handle.center();
    }
}
