//! Shared parameter store.
//!
//! The setup only ever writes parameters; readers are other processes.

mod file;
mod memory;

pub use file::FileParameterStore;
pub use memory::MemoryParameterStore;

use crate::Result;
use serde_json::Value;

/// Trait for write-only key-value parameter stores.
pub trait ParameterStore: Send + Sync {
    /// The store name, used in logs.
    fn name(&self) -> &'static str;

    /// Sets `key` to `value`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&self, key: &str, value: Value) -> Result<()>;
}
