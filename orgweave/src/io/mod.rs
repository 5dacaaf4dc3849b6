//! Filesystem output: write transactions and cache cleanup.

mod cleanup;
mod transaction;

pub use cleanup::clean_build_caches;
pub use transaction::{ExecuteReport, Transaction, WriteAction};
