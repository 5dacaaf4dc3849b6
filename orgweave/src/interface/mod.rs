//! Public interface: context and tangle orchestration.

mod context;
mod document;

pub use context::Context;
pub use document::{tangle_documents, tangle_files};
