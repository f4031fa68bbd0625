//! Task spawners

use futures::executor::LocalSpawner;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use tracing::warn;

use super::dom::TaskSpawner;

/// Runs render tasks on a `futures` local pool
impl TaskSpawner for LocalSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(err) = self.spawn_local(task) {
            warn!(error = %err, "Failed to spawn render task");
        }
    }
}

/// Runs render tasks on the browser event loop
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

#[cfg(target_arch = "wasm32")]
impl TaskSpawner for BrowserSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
