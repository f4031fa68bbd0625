//! Server-side plugin implementations
//!
//! The diagram field formatter, the modal content resolver that serves its
//! links, and an in-memory entity store.

pub mod formatter;
pub mod memory_store;
pub mod modal;

pub use formatter::*;
pub use memory_store::*;
pub use modal::*;
