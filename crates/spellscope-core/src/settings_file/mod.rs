//! Project settings file (`cspell.json`) document model and discovery.
//!
//! The file mirrors a subset of the editor settings. Unknown keys are kept
//! verbatim; list edits replace the whole list.

pub mod discovery;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::json_file::{file_exists, load_json_map, write_json_map};
use crate::error::{Result, SettingsError};
use crate::settings::keys::{ENABLED_LANGUAGE_IDS, IGNORE_WORDS, LANGUAGE, WORDS};
use crate::settings::words::split_words;

pub use discovery::{
    CONFIG_FILE_NAME, candidate_paths, find_existing_settings_file_location,
    find_settings_file_location, find_settings_files,
};

/// Format version written into newly created files.
pub const SETTINGS_FILE_VERSION: &str = "0.2";

#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
    document: Map<String, Value>,
    exists: bool,
}

impl SettingsFile {
    /// Read the file at `path`; a missing file loads as an empty document.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let exists = file_exists(&path).await?;
        let document = load_json_map(&path).await?;
        Ok(Self {
            path,
            document,
            exists,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file was on disk when loaded or has been saved since.
    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn words(&self) -> Result<Vec<String>> {
        self.string_list(WORDS)
    }

    pub fn ignore_words(&self) -> Result<Vec<String>> {
        self.string_list(IGNORE_WORDS)
    }

    pub fn enabled_language_ids(&self) -> Result<Vec<String>> {
        self.string_list(ENABLED_LANGUAGE_IDS)
    }

    pub fn language(&self) -> Option<&str> {
        self.document.get(LANGUAGE).and_then(Value::as_str)
    }

    pub fn string_list(&self, key: &str) -> Result<Vec<String>> {
        match self.document.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|source| {
                SettingsError::InvalidValue {
                    key: key.to_string(),
                    source,
                }
            }),
        }
    }

    /// Add `items` to the list at `key`, keeping it sorted and unique.
    /// Returns whether the list changed.
    pub fn add_to_list<'a>(
        &mut self,
        key: &str,
        items: impl IntoIterator<Item = &'a str>,
    ) -> Result<bool> {
        let before = self.string_list(key)?;
        let mut list: BTreeSet<String> = before.iter().cloned().collect();
        list.extend(items.into_iter().map(str::to_string));
        let after: Vec<String> = list.into_iter().collect();
        let changed = after != before || !self.document.contains_key(key);
        self.set_list(key, after);
        Ok(changed)
    }

    /// Remove `items` from the list at `key`. Returns whether the list changed.
    pub fn remove_from_list<'a>(
        &mut self,
        key: &str,
        items: impl IntoIterator<Item = &'a str>,
    ) -> Result<bool> {
        let before = self.string_list(key)?;
        let removed: BTreeSet<&str> = items.into_iter().collect();
        let after: Vec<String> = before
            .iter()
            .filter(|item| !removed.contains(item.as_str()))
            .cloned()
            .collect();
        if after.len() == before.len() {
            return Ok(false);
        }
        self.set_list(key, after);
        Ok(true)
    }

    fn set_list(&mut self, key: &str, list: Vec<String>) {
        self.document.insert(
            key.to_string(),
            Value::Array(list.into_iter().map(Value::String).collect()),
        );
    }

    /// Write the whole document back, stamping a version on new files.
    pub async fn save(&mut self) -> Result<()> {
        if !self.exists && !self.document.contains_key("version") {
            self.document.insert(
                "version".to_string(),
                Value::String(SETTINGS_FILE_VERSION.to_string()),
            );
        }
        write_json_map(&self.path, &self.document).await?;
        self.exists = true;
        tracing::info!(path = %self.path.display(), "wrote settings file");
        Ok(())
    }
}

/// Add each word of `phrase` to the `words` list of the file at `path`,
/// creating the file when needed. Returns the resulting list.
pub async fn add_words_to_settings_file(path: &Path, phrase: &str) -> Result<Vec<String>> {
    let mut file = SettingsFile::load(path).await?;
    if file.add_to_list(WORDS, split_words(phrase))? {
        file.save().await?;
    }
    file.words()
}
