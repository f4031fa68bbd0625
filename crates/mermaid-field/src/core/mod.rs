//! Core abstractions for diagram fields
//!
//! Field items, display settings, render payloads and the shared
//! dependency policy, plus the traits that connect them to a host system.

mod assets;
mod error;
mod formatter;
pub mod logging;
mod route;
mod settings;
mod store;
mod template;
mod types;

pub use assets::*;
pub use error::*;
pub use formatter::*;
pub use logging::*;
pub use route::*;
pub use settings::*;
pub use store::*;
pub use template::*;
pub use types::*;
