//! File-backed parameter store.
//!
//! All parameters live in a single JSON object. Every `set` rewrites the
//! whole document through a temporary file so readers never see a partial
//! write.

use super::ParameterStore;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Parameter store persisted as a JSON document.
pub struct FileParameterStore {
    /// Document path.
    path: PathBuf,
    /// Current document contents.
    document: Mutex<Map<String, Value>>,
}

impl FileParameterStore {
    /// Opens the store at `path`.
    ///
    /// Parent directories are created. Parameters already in the file are
    /// kept so that keys owned by other processes survive.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or an existing
    /// file is not a JSON object.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
                operation: "create_params_dir".to_string(),
                cause: e.to_string(),
            })?;
        }

        let document = if path.exists() {
            read_document(&path)?
        } else {
            Map::new()
        };

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<()> {
        let content = serde_json::to_string_pretty(document).map_err(|e| Error::OperationFailed {
            operation: "serialize_params".to_string(),
            cause: e.to_string(),
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).map_err(|e| Error::OperationFailed {
            operation: "write_params_file".to_string(),
            cause: format!("{}: {e}", tmp_path.display()),
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| Error::OperationFailed {
            operation: "write_params_file".to_string(),
            cause: format!("{}: {e}", self.path.display()),
        })
    }
}

fn read_document(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path).map_err(|e| Error::OperationFailed {
        operation: "read_params_file".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;
    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Error::InvalidInput(format!(
            "{} does not hold a JSON object",
            path.display()
        ))),
        Err(e) => Err(Error::OperationFailed {
            operation: "parse_params_file".to_string(),
            cause: e.to_string(),
        }),
    }
}

impl ParameterStore for FileParameterStore {
    fn name(&self) -> &'static str {
        "file"
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut document = self.document.lock().map_err(|e| Error::OperationFailed {
            operation: "param_set".to_string(),
            cause: e.to_string(),
        })?;
        document.insert(key.to_string(), value);
        self.write_document(&document)
    }
}
