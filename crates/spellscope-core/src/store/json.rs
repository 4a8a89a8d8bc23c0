//! Configuration store backed by editor JSON settings files.
//!
//! Settings are stored flattened under their qualified name
//! (`"cSpell.language": "en"`), the layout editor settings files use. Every
//! read loads the files fresh and every write replaces the whole document.

use std::path::PathBuf;

use serde_json::{Map, Value};
use url::Url;

use super::{ConfigurationStore, Inspect, SECTION, WriteLocation, resolve_write_location};
use crate::config::json_file::{load_json_map, write_json_map};
use crate::config::paths::{MULTI_ROOT_WORKSPACE_FILE, SETTINGS_DIR, SETTINGS_FILE};
use crate::error::{Result, SettingsError};
use crate::types::ConfigTarget;
use crate::workspace::{Workspace, WorkspaceFolder};

#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    workspace: Workspace,
    defaults: Map<String, Value>,
    user_settings: PathBuf,
    workspace_settings: Option<PathBuf>,
}

impl JsonSettingsStore {
    pub fn new(workspace: Workspace, user_settings: PathBuf) -> Self {
        Self {
            workspace,
            defaults: Map::new(),
            user_settings,
            workspace_settings: None,
        }
    }

    /// Built-in default-scope values, keyed relative to the section.
    pub fn with_defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_workspace_settings(mut self, path: PathBuf) -> Self {
        self.workspace_settings = Some(path);
        self
    }

    pub fn user_settings_path(&self) -> &PathBuf {
        &self.user_settings
    }

    /// Workspace settings file.
    ///
    /// An explicit path wins. A single-root workspace shares the root's
    /// folder settings file, as the host editor does; a multi-root workspace
    /// gets a file of its own so folder writes never leak into the value
    /// every other root inherits.
    pub fn workspace_settings_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.workspace_settings {
            return Some(path.clone());
        }
        let root = self.workspace.first_root()?;
        if self.workspace.folders.len() == 1 {
            folder_settings_path(root)
        } else {
            root.path()
                .map(|dir| dir.join(SETTINGS_DIR).join(MULTI_ROOT_WORKSPACE_FILE))
        }
    }

    fn path_for(&self, location: &WriteLocation) -> Result<PathBuf> {
        match location {
            WriteLocation::User => Ok(self.user_settings.clone()),
            WriteLocation::Workspace => {
                self.workspace_settings_path().ok_or_else(|| {
                    match self.workspace.first_root() {
                        Some(root) => not_a_file_folder(root),
                        None => SettingsError::NoWorkspace,
                    }
                })
            }
            WriteLocation::Folder(folder) => {
                folder_settings_path(folder).ok_or_else(|| not_a_file_folder(folder))
            }
        }
    }
}

/// `<folder>/.vscode/settings.json` for `file://` folders.
pub fn folder_settings_path(folder: &WorkspaceFolder) -> Option<PathBuf> {
    folder
        .path()
        .map(|root| root.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

fn not_a_file_folder(folder: &WorkspaceFolder) -> SettingsError {
    SettingsError::NotAFileFolder {
        uri: folder.uri.clone(),
    }
}

fn qualified(key: &str) -> String {
    format!("{SECTION}.{key}")
}

async fn read_key(path: Option<PathBuf>, key: &str) -> Result<Option<Value>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let mut map = load_json_map(&path).await?;
    Ok(map.remove(&qualified(key)))
}

impl ConfigurationStore for JsonSettingsStore {
    fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    async fn inspect(&self, key: &str, resource: Option<&Url>) -> Result<Inspect<Value>> {
        let workspace_path = self.workspace_settings_path();
        let folder_path = resource
            .and_then(|r| self.workspace.folder_for(r))
            .and_then(folder_settings_path);

        let mut inspect = Inspect::new(key);
        inspect.default_value = self.defaults.get(key).cloned();
        inspect.global_value = read_key(Some(self.user_settings.clone()), key).await?;
        inspect.workspace_value = read_key(workspace_path, key).await?;
        inspect.workspace_folder_value = read_key(folder_path, key).await?;
        Ok(inspect)
    }

    async fn update(&self, key: &str, value: Option<Value>, target: &ConfigTarget) -> Result<()> {
        let location = resolve_write_location(&self.workspace, target)?;
        let path = self.path_for(&location)?;

        let mut map = load_json_map(&path).await?;
        let name = qualified(key);
        match value {
            Some(value) => {
                map.insert(name, value);
            }
            None => {
                if map.remove(&name).is_none() {
                    return Ok(());
                }
            }
        }
        write_json_map(&path, &map).await?;
        tracing::info!(
            key,
            scope = %location.scope(),
            path = %path.display(),
            "updated settings file"
        );
        Ok(())
    }
}
