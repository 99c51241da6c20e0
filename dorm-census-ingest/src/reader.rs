//! Read a JSON array of objects from a file.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON array of objects in {0}")]
    NotAnArray(PathBuf),
}

/// Parse a file into a list of field-name → value records.
///
/// The file must hold a JSON array of objects. No side effects beyond the
/// read.
pub fn read_records(path: &Path) -> Result<Vec<Map<String, Value>>, ReadError> {
    if !path.exists() {
        return Err(ReadError::FileNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&text).map_err(|source| ReadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let items = match value {
        Value::Array(items) => items,
        _ => return Err(ReadError::NotAnArray(path.to_path_buf())),
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            _ => Err(ReadError::NotAnArray(path.to_path_buf())),
        })
        .collect()
}
