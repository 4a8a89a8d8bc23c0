//! Whole-document JSON read/write for settings files.
//!
//! Documents are always replaced as a whole; a missing file reads as an empty
//! object.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Result, SettingsError};

pub async fn file_exists(path: &Path) -> Result<bool> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|e| SettingsError::io(path, e))
}

pub async fn load_json_map(path: &Path) -> Result<Map<String, Value>> {
    if !file_exists(path).await? {
        return Ok(Map::new());
    }
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| SettingsError::io(path, e))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|source| SettingsError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SettingsError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

pub async fn write_json_map(path: &Path, map: &Map<String, Value>) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| SettingsError::io(parent, e))?;
    }
    let mut bytes =
        serde_json::to_vec_pretty(map).map_err(|source| SettingsError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;
    bytes.push(b'\n');
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| SettingsError::io(path, e))
}
