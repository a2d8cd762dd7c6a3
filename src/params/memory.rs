//! In-memory parameter store.

use super::ParameterStore;
use crate::{Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
    values: BTreeMap<String, Value>,
    writes: Vec<String>,
}

/// Parameter store held in process memory.
///
/// Unlike the trait, this store can be read back, which makes it the store
/// of choice for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryParameterStore {
    inner: Mutex<Inner>,
}

impl MemoryParameterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.values.get(key).cloned())
    }

    /// Returns the stored keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.values.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns every key written, in write order, repeats included.
    #[must_use]
    pub fn write_log(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.writes.clone())
            .unwrap_or_default()
    }
}

impl ParameterStore for MemoryParameterStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut inner = self.inner.lock().map_err(|e| Error::OperationFailed {
            operation: "param_set".to_string(),
            cause: e.to_string(),
        })?;
        inner.values.insert(key.to_string(), value);
        inner.writes.push(key.to_string());
        Ok(())
    }
}
