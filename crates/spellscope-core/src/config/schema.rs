//! `spellscope.toml` schema.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool configuration: where the editor settings live and what the built-in
/// defaults are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// User settings file. Defaults to `<config_dir>/spellscope/settings.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_settings: Option<PathBuf>,

    /// Workspace settings file. Defaults to the first folder's
    /// `.vscode/settings.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_settings: Option<PathBuf>,

    /// Absolute workspace folder roots, in workspace order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub folders: Vec<PathBuf>,

    /// Built-in default-scope values, keyed like the editor settings.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub defaults: Map<String, Value>,
}

impl ToolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for folder in &self.folders {
            if !folder.is_absolute() {
                anyhow::bail!(
                    "Workspace folder must be an absolute path: {}",
                    folder.display()
                );
            }
        }
        Ok(())
    }
}
